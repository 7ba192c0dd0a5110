pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// The question bank came back empty (or could not be fetched at all).
    #[error("no questions available")]
    NoQuestions,
    #[error("registry request failed: {0}")]
    Registry(#[source] reqwest::Error),
    #[error("registry returned unexpected status {0}")]
    RegistryStatus(reqwest::StatusCode),
    #[error("delivery failed: {0}")]
    Delivery(#[from] teloxide::RequestError),
}
