//! Mediabot — a Telegram media search bot.
//!
//! Relays search queries to Unsplash (images) and Freesound (sounds) and
//! replies with a randomly chosen result. A small per-chat state machine
//! interprets free-text input; everything else is two HTTP adapters.
//!
//! See `DESIGN.md` for architecture notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod search;
pub mod telegram;
