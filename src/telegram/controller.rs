//! The conversation state machine.
//!
//! Interprets incoming chat events against per-chat state, invokes the
//! search adapters, and emits renderer-agnostic [`Reply`] values. The
//! teloxide layer in [`super`] turns replies into Bot API calls, which
//! keeps this module testable with stub adapters.

use tracing::{debug, error};

use crate::search::{AudioSearch, ImageSearch};

use super::session::{ConversationState, SessionMap};
use super::ui;

/// Callback payload of the "back to menu" button.
pub const CB_BACK: &str = "back";
/// Callback payload of the "search image" menu button.
pub const CB_IMAGE_INPUT: &str = "get_image_input";
/// Callback payload of the "search sound" menu button.
pub const CB_AUDIO_INPUT: &str = "get_audio_input";

// ---------------------------------------------------------------------------
// Events and replies
// ---------------------------------------------------------------------------

/// An incoming chat event, already stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// A text message: a slash command or free text.
    Message(String),
    /// An inline keyboard callback payload.
    Callback(String),
    /// Any update kind the bot does not handle.
    Unsupported(&'static str),
}

/// Which inline keyboard to attach to a text reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// No keyboard.
    None,
    /// Two search buttons plus the repository link.
    Menu,
    /// A single "back to menu" button.
    BackToMenu,
}

/// A reply to render. Replies are rendered in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// HTML text message with an optional inline keyboard.
    Text {
        /// Message body (HTML parse mode).
        text: String,
        /// Attached inline keyboard.
        keyboard: Keyboard,
    },
    /// A photo sent by URL.
    Photo {
        /// Remote image URL.
        url: String,
        /// Outgoing filename (the service-side image id).
        filename: String,
        /// Caption (HTML parse mode).
        caption: String,
    },
    /// An audio clip sent from memory.
    Audio {
        /// Raw audio bytes.
        bytes: Vec<u8>,
        /// Outgoing filename (the sound's display name).
        filename: String,
        /// Caption (HTML parse mode).
        caption: String,
    },
    /// Delete the message the triggering callback originated from.
    DeleteSource,
}

/// Controller-level failures. Never shown to end users; an invalid event is
/// an integration fault in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The controller received an update kind it does not support.
    #[error("unsupported event kind: {0}")]
    InvalidEvent(&'static str),
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// The per-chat finite-state conversation flow.
///
/// Generic over the two adapter traits so tests can drive it with stubs.
pub struct Controller<I, A> {
    sessions: SessionMap,
    images: I,
    audio: A,
}

impl<I: ImageSearch, A: AudioSearch> Controller<I, A> {
    /// Create a controller over fresh session state.
    pub fn new(images: I, audio: A) -> Self {
        Self {
            sessions: SessionMap::default(),
            images,
            audio,
        }
    }

    /// Current conversation state for `chat_id`.
    pub async fn state(&self, chat_id: i64) -> ConversationState {
        self.sessions.get(chat_id).await
    }

    /// Handle one event for one chat and return the replies to render.
    ///
    /// Adapter failures are caught here, logged with the triggering query,
    /// and converted into the generic not-found reply.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::InvalidEvent`] for an unsupported event
    /// kind; every other outcome is a rendered reply.
    pub async fn handle(
        &self,
        chat_id: i64,
        event: ChatEvent,
    ) -> Result<Vec<Reply>, ControllerError> {
        match event {
            ChatEvent::Callback(data) => match data.as_str() {
                CB_BACK => Ok(self.menu(chat_id, true).await),
                CB_IMAGE_INPUT => Ok(self.prompt(chat_id, ConversationState::ImageInput).await),
                CB_AUDIO_INPUT => Ok(self.prompt(chat_id, ConversationState::AudioInput).await),
                other => {
                    debug!(data = other, "ignoring unknown callback payload");
                    Ok(Vec::new())
                }
            },
            ChatEvent::Message(text) => Ok(self.message(chat_id, text.trim()).await),
            ChatEvent::Unsupported(kind) => Err(ControllerError::InvalidEvent(kind)),
        }
    }

    /// Route a text message: commands from any state, free text only while
    /// the chat is in an input state.
    async fn message(&self, chat_id: i64, text: &str) -> Vec<Reply> {
        if let Some((command, args)) = parse_command(text) {
            return match command {
                "start" => self.menu(chat_id, false).await,
                "image" => self.image_search(chat_id, args).await,
                "audio" => self.audio_search(chat_id, args).await,
                other => {
                    debug!(command = other, "ignoring unknown command");
                    Vec::new()
                }
            };
        }

        match self.sessions.get(chat_id).await {
            ConversationState::ImageInput => self.image_search(chat_id, text).await,
            ConversationState::AudioInput => self.audio_search(chat_id, text).await,
            _ => {
                debug!(chat_id, "ignoring free text outside an input state");
                Vec::new()
            }
        }
    }

    /// Render the main menu. A callback origin has its prompt deleted first.
    async fn menu(&self, chat_id: i64, from_callback: bool) -> Vec<Reply> {
        self.sessions.set(chat_id, ConversationState::Menu).await;
        let menu = Reply::Text {
            text: ui::GREETING.to_owned(),
            keyboard: Keyboard::Menu,
        };
        if from_callback {
            vec![Reply::DeleteSource, menu]
        } else {
            vec![menu]
        }
    }

    /// Ask for a free-text query and delete the menu that offered the button.
    async fn prompt(&self, chat_id: i64, state: ConversationState) -> Vec<Reply> {
        self.sessions.set(chat_id, state).await;
        let text = match state {
            ConversationState::AudioInput => ui::AUDIO_PROMPT,
            _ => ui::IMAGE_PROMPT,
        };
        vec![
            Reply::Text {
                text: text.to_owned(),
                keyboard: Keyboard::BackToMenu,
            },
            Reply::DeleteSource,
        ]
    }

    /// Run an image search. An empty query short-circuits to the usage
    /// hint with no state change and no adapter call.
    async fn image_search(&self, chat_id: i64, query: &str) -> Vec<Reply> {
        if query.is_empty() {
            return vec![Reply::Text {
                text: ui::IMAGE_USAGE.to_owned(),
                keyboard: Keyboard::None,
            }];
        }

        self.sessions
            .set(chat_id, ConversationState::ImageResult)
            .await;

        match self.images.random_image(query).await {
            Ok(image) => vec![Reply::Photo {
                url: image.url,
                filename: image.id,
                caption: ui::found_image_caption(query),
            }],
            Err(e) => {
                error!(query, error = %e, "image search failed");
                vec![not_found_reply()]
            }
        }
    }

    /// Run an audio search. Same empty-query policy as images.
    async fn audio_search(&self, chat_id: i64, query: &str) -> Vec<Reply> {
        if query.is_empty() {
            return vec![Reply::Text {
                text: ui::AUDIO_USAGE.to_owned(),
                keyboard: Keyboard::None,
            }];
        }

        self.sessions
            .set(chat_id, ConversationState::AudioResult)
            .await;

        match self.audio.random_sound(query).await {
            Ok(clip) => vec![Reply::Audio {
                bytes: clip.bytes,
                filename: clip.name,
                caption: ui::found_sound_caption(query),
            }],
            Err(e) => {
                error!(query, error = %e, "audio search failed");
                vec![not_found_reply()]
            }
        }
    }
}

/// The uniform user-facing failure reply with a single back button.
fn not_found_reply() -> Reply {
    Reply::Text {
        text: ui::NOT_FOUND.to_owned(),
        keyboard: Keyboard::BackToMenu,
    }
}

/// Split `/command args` into `(command, trimmed args)`, stripping an
/// optional `@botname` suffix. Returns `None` for non-command text.
fn parse_command(text: &str) -> Option<(&str, &str)> {
    let without_slash = text.strip_prefix('/')?;
    let (full_command, args) = match without_slash.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (without_slash, ""),
    };
    let command = full_command.split('@').next().unwrap_or(full_command);
    Some((command, args))
}
