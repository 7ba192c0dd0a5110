use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use teloxide::types::ChatId;

use crate::quiz::Question;

/// Per-chat state, created lazily on first contact and kept for the process
/// lifetime. `authenticated` caches registry membership; the registry stays
/// the source of truth, so the flag is only ever set, never trusted to deny.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    pub authenticated: bool,
    pub pending: Option<Question>,
}

/// The session table is read and written from both the dispatcher's handler
/// tasks and the broadcast task, hence the lock. It is never held across an
/// await.
#[derive(Clone, Default)]
pub struct Sessions {
    inner: Arc<Mutex<HashMap<ChatId, ChatSession>>>,
}

impl Sessions {
    pub fn is_authenticated(&self, chat: ChatId) -> bool {
        self.inner
            .lock()
            .get(&chat)
            .map(|session| session.authenticated)
            .unwrap_or(false)
    }

    pub fn mark_authenticated(&self, chat: ChatId) {
        self.inner.lock().entry(chat).or_default().authenticated = true;
    }

    pub fn set_pending(&self, chat: ChatId, question: Question) {
        self.inner.lock().entry(chat).or_default().pending = Some(question);
    }

    pub fn pending(&self, chat: ChatId) -> Option<Question> {
        self.inner
            .lock()
            .get(&chat)
            .and_then(|session| session.pending.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_chats_start_unauthenticated() {
        let sessions = Sessions::default();
        assert!(!sessions.is_authenticated(ChatId(1)));
        assert!(sessions.pending(ChatId(1)).is_none());
    }

    #[test]
    fn marking_authenticated_sticks() {
        let sessions = Sessions::default();
        sessions.mark_authenticated(ChatId(1));
        assert!(sessions.is_authenticated(ChatId(1)));
        assert!(!sessions.is_authenticated(ChatId(2)));
    }

    #[test]
    fn pending_is_per_chat_and_overwritable() {
        let sessions = Sessions::default();
        let mut question = Question::default();
        question.text = "primera".to_string();
        sessions.set_pending(ChatId(1), question.clone());

        question.text = "segunda".to_string();
        sessions.set_pending(ChatId(1), question);

        assert_eq!(sessions.pending(ChatId(1)).unwrap().text, "segunda");
        assert!(sessions.pending(ChatId(2)).is_none());
    }

    #[test]
    fn setting_pending_does_not_authenticate() {
        let sessions = Sessions::default();
        sessions.set_pending(ChatId(1), Question::default());
        assert!(!sessions.is_authenticated(ChatId(1)));
    }
}
