//! Mediabot binary entry point.
//!
//! Loads configuration from the environment, initialises logging, wires the
//! two search adapters into the conversation controller, and runs the
//! Telegram dispatcher until Ctrl+C.

use std::sync::Arc;

use anyhow::{Context, Result};
use url::Url;

use mediabot::config::Config;
use mediabot::search::freesound::FreesoundClient;
use mediabot::search::unsplash::UnsplashClient;
use mediabot::telegram::controller::Controller;
use mediabot::{logging, telegram};

#[tokio::main]
async fn main() -> Result<()> {
    // Populate the process env from ./.env before reading configuration.
    dotenvy::dotenv().ok();

    logging::init();

    let config = Config::load().context("failed to load configuration")?;

    let repository_url =
        Url::parse(&config.repository_url).context("REPOSITORY_URL is not a valid URL")?;

    let images = UnsplashClient::new(config.unsplash_api_token.clone());
    let audio = FreesoundClient::new(
        config.freesound_api_token.clone(),
        config.freesound_oauth_token.clone(),
    );
    let controller = Arc::new(Controller::new(images, audio));

    telegram::run(&config.telegram_bot_token, repository_url, controller).await
}
