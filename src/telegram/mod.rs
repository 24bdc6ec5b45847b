//! Telegram adapter: dptree dispatcher and reply rendering.
//!
//! The [`controller`] emits renderer-agnostic [`controller::Reply`] values;
//! this module owns the update loop and turns replies into Bot API calls.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ParseMode};
use tracing::{debug, info, warn};
use url::Url;

use crate::search::freesound::FreesoundClient;
use crate::search::unsplash::UnsplashClient;

pub mod controller;
pub mod session;
pub mod ui;

use controller::{ChatEvent, Controller, Keyboard, Reply};

/// The controller instantiation used by the live bot.
pub type BotController = Controller<UnsplashClient, FreesoundClient>;

/// Shared dependencies injected into teloxide handlers via `dptree::deps!`.
#[derive(Clone)]
struct SharedState {
    controller: Arc<BotController>,
    repository_url: Url,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Run the Telegram bot until it is stopped (Ctrl+C).
///
/// One handler per update kind: messages and inline keyboard callbacks.
/// Everything else is left unhandled by the dispatch tree.
///
/// # Errors
///
/// Only fails on dispatcher construction; handler errors are logged and
/// never stop the loop.
pub async fn run(
    bot_token: &str,
    repository_url: Url,
    controller: Arc<BotController>,
) -> anyhow::Result<()> {
    let bot = Bot::new(bot_token);

    let shared = SharedState {
        controller,
        repository_url,
    };

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    info!("telegram dispatcher starting");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![shared])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Handle an incoming message: commands and free text.
async fn handle_message(bot: Bot, msg: Message, state: SharedState) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        debug!(chat_id = msg.chat.id.0, "ignoring non-text message");
        return Ok(());
    };

    let event = ChatEvent::Message(text.to_owned());
    match state.controller.handle(msg.chat.id.0, event).await {
        Ok(replies) => render(&bot, &state, msg.chat.id, None, replies).await,
        Err(e) => warn!(error = %e, "controller rejected message event"),
    }

    Ok(())
}

/// Handle an inline keyboard callback.
async fn handle_callback(bot: Bot, query: CallbackQuery, state: SharedState) -> ResponseResult<()> {
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(data) = query.data else {
        debug!("callback without a payload");
        return Ok(());
    };
    let Some(message) = query.message else {
        debug!("callback without an originating message");
        return Ok(());
    };
    let chat_id = message.chat().id;
    let source = message.id();

    match state
        .controller
        .handle(chat_id.0, ChatEvent::Callback(data))
        .await
    {
        Ok(replies) => render(&bot, &state, chat_id, Some(source), replies).await,
        Err(e) => warn!(error = %e, "controller rejected callback event"),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Reply rendering
// ---------------------------------------------------------------------------

/// Render controller replies in order. Send failures are logged and never
/// stop the remaining replies or the dispatcher.
async fn render(
    bot: &Bot,
    state: &SharedState,
    chat_id: ChatId,
    source: Option<MessageId>,
    replies: Vec<Reply>,
) {
    for reply in replies {
        match reply {
            Reply::Text { text, keyboard } => {
                let mut request = bot.send_message(chat_id, text).parse_mode(ParseMode::Html);
                request = match keyboard {
                    Keyboard::Menu => {
                        request.reply_markup(ui::menu_keyboard(state.repository_url.clone()))
                    }
                    Keyboard::BackToMenu => request.reply_markup(ui::back_keyboard()),
                    Keyboard::None => request,
                };
                if let Err(e) = request.await {
                    warn!(error = %e, "failed to send text reply");
                }
            }
            Reply::Photo {
                url,
                filename,
                caption,
            } => match Url::parse(&url) {
                Ok(parsed) => {
                    let photo = InputFile::url(parsed).file_name(filename);
                    if let Err(e) = bot
                        .send_photo(chat_id, photo)
                        .caption(caption)
                        .parse_mode(ParseMode::Html)
                        .await
                    {
                        warn!(error = %e, "failed to send photo reply");
                    }
                }
                Err(e) => {
                    warn!(error = %e, url, "upstream returned an unparseable image URL");
                }
            },
            Reply::Audio {
                bytes,
                filename,
                caption,
            } => {
                let audio = InputFile::memory(bytes).file_name(filename);
                if let Err(e) = bot
                    .send_audio(chat_id, audio)
                    .caption(caption)
                    .parse_mode(ParseMode::Html)
                    .await
                {
                    warn!(error = %e, "failed to send audio reply");
                }
            }
            Reply::DeleteSource => {
                if let Some(message_id) = source {
                    if let Err(e) = bot.delete_message(chat_id, message_id).await {
                        warn!(error = %e, "failed to delete source message");
                    }
                } else {
                    debug!("delete requested without a source message");
                }
            }
        }
    }
}
