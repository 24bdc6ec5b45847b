//! Configuration resolver tests.

use mediabot::config::Config;

fn full_env(key: &str) -> Option<String> {
    match key {
        "TELEGRAM_BOT_TOKEN" => Some("bot-token".to_owned()),
        "UNSPLASH_API_TOKEN" => Some("unsplash-key".to_owned()),
        "FREESOUND_API_TOKEN" => Some("freesound-key".to_owned()),
        "FREESOUND_OAUTH_TOKEN" => Some("freesound-oauth".to_owned()),
        "REPOSITORY_URL" => Some("https://example.com/repo".to_owned()),
        _ => None,
    }
}

#[test]
fn loads_all_variables() {
    let config = match Config::load_with(full_env) {
        Ok(config) => config,
        Err(err) => panic!("config should load: {err}"),
    };

    assert_eq!(config.telegram_bot_token, "bot-token");
    assert_eq!(config.unsplash_api_token, "unsplash-key");
    assert_eq!(config.freesound_api_token, "freesound-key");
    assert_eq!(config.freesound_oauth_token, "freesound-oauth");
    assert_eq!(config.repository_url, "https://example.com/repo");
}

#[test]
fn missing_required_variable_is_named_in_the_error() {
    let env = |key: &str| {
        if key == "UNSPLASH_API_TOKEN" {
            None
        } else {
            full_env(key)
        }
    };

    match Config::load_with(env) {
        Err(err) => assert!(err.to_string().contains("UNSPLASH_API_TOKEN")),
        Ok(_) => panic!("missing variable should fail the load"),
    }
}

#[test]
fn blank_required_variable_counts_as_missing() {
    let env = |key: &str| {
        if key == "FREESOUND_OAUTH_TOKEN" {
            Some("   ".to_owned())
        } else {
            full_env(key)
        }
    };

    match Config::load_with(env) {
        Err(err) => assert!(err.to_string().contains("FREESOUND_OAUTH_TOKEN")),
        Ok(_) => panic!("blank variable should fail the load"),
    }
}

#[test]
fn repository_url_has_a_default() {
    let env = |key: &str| {
        if key == "REPOSITORY_URL" {
            None
        } else {
            full_env(key)
        }
    };

    let config = match Config::load_with(env) {
        Ok(config) => config,
        Err(err) => panic!("config should load: {err}"),
    };
    assert!(!config.repository_url.is_empty());
}

#[test]
fn values_are_trimmed() {
    let env = |key: &str| full_env(key).map(|v| format!("  {v}  "));

    let config = match Config::load_with(env) {
        Ok(config) => config,
        Err(err) => panic!("config should load: {err}"),
    };
    assert_eq!(config.telegram_bot_token, "bot-token");
}
