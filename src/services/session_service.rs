use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::models::{ChatId, DialogueState};

/// Per-chat dialogue state. A chat with no entry is idle.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<ChatId, DialogueState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, chat: ChatId) -> DialogueState {
        self.inner
            .lock()
            .await
            .get(&chat)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn set(&self, chat: ChatId, state: DialogueState) {
        let mut map = self.inner.lock().await;
        if state == DialogueState::Idle {
            map.remove(&chat);
        } else {
            map.insert(chat, state);
        }
    }

    pub async fn clear(&self, chat: ChatId) {
        self.inner.lock().await.remove(&chat);
    }
}
