//! Per-chat conversation state.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// The current step of a single chat's interaction.
///
/// Used to interpret ambiguous free-text input. Created on first
/// interaction, never persisted beyond process lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversationState {
    /// Main menu shown, no pending prompt.
    #[default]
    Menu,
    /// Waiting for a free-text image query.
    ImageInput,
    /// An image search just ran (success or failure).
    ImageResult,
    /// Waiting for a free-text sound query.
    AudioInput,
    /// A sound search just ran (success or failure).
    AudioResult,
}

/// In-memory map from chat identifier to [`ConversationState`].
///
/// The only state shared across handler invocations. Guarded by an async
/// lock because teloxide dispatches updates for different chats
/// concurrently.
#[derive(Debug, Default)]
pub struct SessionMap {
    states: RwLock<HashMap<i64, ConversationState>>,
}

impl SessionMap {
    /// Current state for `chat_id`, defaulting to [`ConversationState::Menu`].
    pub async fn get(&self, chat_id: i64) -> ConversationState {
        self.states
            .read()
            .await
            .get(&chat_id)
            .copied()
            .unwrap_or_default()
    }

    /// Record a transition for `chat_id`.
    pub async fn set(&self, chat_id: i64, state: ConversationState) {
        self.states.write().await.insert(chat_id, state);
    }
}
