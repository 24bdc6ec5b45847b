//! Inline keyboards, HTML escaping, and user-facing message texts.
//!
//! All output uses HTML parse mode.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

use super::controller::{CB_AUDIO_INPUT, CB_BACK, CB_IMAGE_INPUT};

// ---------------------------------------------------------------------------
// Texts
// ---------------------------------------------------------------------------

/// Menu greeting.
pub const GREETING: &str = "Hi! \u{1f44b}\n\nChoose what you want to do:";

/// Prompt shown after the "search image" menu button.
pub const IMAGE_PROMPT: &str = "\u{1f5bc} Type a search query for an image:";

/// Prompt shown after the "search sound" menu button.
pub const AUDIO_PROMPT: &str = "\u{1f3a4} Type a search query for a sound:";

/// Usage hint for a bare `/image`.
pub const IMAGE_USAGE: &str =
    "To search for an image, use the command like this:\n\n<b>/image [your query]</b>";

/// Usage hint for a bare `/audio`.
pub const AUDIO_USAGE: &str =
    "To search for a sound, use the command like this:\n\n<b>/audio [your query]</b>";

/// Generic failure reply. The underlying error kind is never exposed.
pub const NOT_FOUND: &str =
    "\u{2757} <b>Nothing found for that query.</b>\nTry again or go back to the main menu.";

/// Escape special HTML characters in user-provided text.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Caption for a successful image reply.
pub fn found_image_caption(query: &str) -> String {
    format!("\u{1f5bc} Found image for: <b>{}</b>", escape_html(query))
}

/// Caption for a successful sound reply.
pub fn found_sound_caption(query: &str) -> String {
    format!("\u{1f3b5} Found sound for: <b>{}</b>", escape_html(query))
}

// ---------------------------------------------------------------------------
// Keyboards
// ---------------------------------------------------------------------------

/// Main menu: two search buttons side by side plus a repository link row.
pub fn menu_keyboard(repository_url: Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback(
                "\u{1f5bc} Search image".to_owned(),
                CB_IMAGE_INPUT.to_owned(),
            ),
            InlineKeyboardButton::callback(
                "\u{1f3b5} Search sound".to_owned(),
                CB_AUDIO_INPUT.to_owned(),
            ),
        ],
        vec![InlineKeyboardButton::url(
            "\u{1f517} Repository".to_owned(),
            repository_url,
        )],
    ])
}

/// A single "back to menu" button.
pub fn back_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "\u{1f519} Back to menu".to_owned(),
        CB_BACK.to_owned(),
    )]])
}
