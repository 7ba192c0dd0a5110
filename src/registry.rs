//! The chat registry: the durable list of chats that have passed the
//! password check. Doubles as the broadcast list. Entries are write-once;
//! nothing ever updates or deletes them.

use async_trait::async_trait;
use reqwest::StatusCode;
use teloxide::types::ChatId;

use crate::error::BotError;

#[async_trait]
pub trait Registry: Send + Sync {
    /// Adds the chat if it is not already present. Registering a known chat
    /// is not an error.
    async fn register(&self, chat: ChatId) -> Result<(), BotError>;
    async fn contains(&self, chat: ChatId) -> Result<bool, BotError>;
    /// Every registered chat, in storage order.
    async fn chat_ids(&self) -> Result<Vec<ChatId>, BotError>;
}

/// Stored document shape. The collection keys on `id` and carries the same
/// value again under `chat_id`; both fields are kept to match the existing
/// collection schema.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ChatEntry {
    id: String,
    chat_id: String,
}

/// Registry backed by the document store's REST interface: POST to create,
/// GET by id for the existence check, GET on the collection for the scan.
/// The access key travels in a header on every request.
pub struct DocumentRegistry {
    http: reqwest::Client,
    endpoint: String,
    key: String,
}

const KEY_HEADER: &str = "x-api-key";

impl DocumentRegistry {
    pub fn new(http: reqwest::Client, endpoint: String, key: String) -> Self {
        Self {
            http,
            endpoint,
            key,
        }
    }

    fn docs_url(&self) -> String {
        format!("{}/docs", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Registry for DocumentRegistry {
    async fn register(&self, chat: ChatId) -> Result<(), BotError> {
        let entry = ChatEntry {
            id: chat.to_string(),
            chat_id: chat.to_string(),
        };
        let response = self
            .http
            .post(self.docs_url())
            .header(KEY_HEADER, &self.key)
            .json(&entry)
            .send()
            .await
            .map_err(BotError::Registry)?;

        // A conflict means the chat registered earlier; that is success.
        if response.status() == StatusCode::CONFLICT {
            log::info!("chat {chat} is already registered");
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(BotError::RegistryStatus(response.status()));
        }
        Ok(())
    }

    async fn contains(&self, chat: ChatId) -> Result<bool, BotError> {
        let url = format!("{}/{}", self.docs_url(), chat);
        let response = self
            .http
            .get(url)
            .header(KEY_HEADER, &self.key)
            .send()
            .await
            .map_err(BotError::Registry)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(BotError::RegistryStatus(response.status()));
        }
        Ok(true)
    }

    async fn chat_ids(&self) -> Result<Vec<ChatId>, BotError> {
        let response = self
            .http
            .get(self.docs_url())
            .header(KEY_HEADER, &self.key)
            .send()
            .await
            .map_err(BotError::Registry)?;

        if !response.status().is_success() {
            return Err(BotError::RegistryStatus(response.status()));
        }
        let entries: Vec<ChatEntry> = response.json().await.map_err(BotError::Registry)?;

        // Entries with an id that does not parse are skipped, not fatal.
        Ok(entries
            .iter()
            .filter_map(|entry| entry.chat_id.parse::<i64>().ok())
            .map(ChatId)
            .collect())
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryRegistry;
    use super::*;

    #[tokio::test]
    async fn register_is_idempotent() {
        let registry = MemoryRegistry::default();
        registry.register(ChatId(1)).await.unwrap();
        registry.register(ChatId(1)).await.unwrap();
        assert_eq!(registry.chat_ids().await.unwrap(), vec![ChatId(1)]);
    }

    #[tokio::test]
    async fn contains_tracks_registration() {
        let registry = MemoryRegistry::default();
        assert!(!registry.contains(ChatId(5)).await.unwrap());
        registry.register(ChatId(5)).await.unwrap();
        assert!(registry.contains(ChatId(5)).await.unwrap());
    }

    #[tokio::test]
    async fn chat_ids_lists_every_registered_chat() {
        let registry = MemoryRegistry::default();
        for id in [1, 2, 3] {
            registry.register(ChatId(id)).await.unwrap();
        }
        assert_eq!(
            registry.chat_ids().await.unwrap(),
            vec![ChatId(1), ChatId(2), ChatId(3)]
        );
    }

    #[test]
    fn entry_document_keeps_the_duplicate_id_field() {
        let entry = ChatEntry {
            id: "42".to_string(),
            chat_id: "42".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["chat_id"], "42");
    }
}
