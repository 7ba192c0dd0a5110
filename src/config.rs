use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Everything the bot needs from the environment, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    /// Shared password gating registration.
    pub password: String,
    /// Full URL of the question bank document in blob storage.
    pub bank_url: String,
    /// Base URL of the chat registry collection.
    pub registry_endpoint: String,
    pub registry_key: String,
    /// Public URL Telegram should deliver updates to. When unset the bot
    /// falls back to long polling.
    pub webhook_url: Option<Url>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            token: require("TELOXIDE_TOKEN")?,
            password: require("BOT_PASSWORD")?,
            bank_url: require("QUESTION_BANK_URL")?,
            registry_endpoint: require("REGISTRY_ENDPOINT")?,
            registry_key: require("REGISTRY_KEY")?,
            webhook_url: parse_optional("WEBHOOK_URL")?,
            port: parse_optional("PORT")?.unwrap_or(8443),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parse_optional<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                name,
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
