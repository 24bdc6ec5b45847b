//! Keyboard shape and HTML formatting tests.

use teloxide::types::InlineKeyboardButtonKind;
use url::Url;

use mediabot::telegram::controller::{CB_AUDIO_INPUT, CB_BACK, CB_IMAGE_INPUT};
use mediabot::telegram::ui::{
    back_keyboard, escape_html, found_image_caption, found_sound_caption, menu_keyboard,
};

fn repo_url() -> Url {
    match Url::parse("https://example.com/repo") {
        Ok(url) => url,
        Err(err) => panic!("test url should parse: {err}"),
    }
}

#[test]
fn escape_html_escapes_special_chars() {
    assert_eq!(escape_html("<b>test</b>"), "&lt;b&gt;test&lt;/b&gt;");
    assert_eq!(escape_html("a & b"), "a &amp; b");
}

#[test]
fn escape_html_passes_normal_text() {
    let text = "just a normal message";
    assert_eq!(escape_html(text), text);
}

#[test]
fn captions_escape_the_query() {
    assert!(found_image_caption("<i>x</i>").contains("&lt;i&gt;x&lt;/i&gt;"));
    assert!(found_sound_caption("a & b").contains("a &amp; b"));
}

#[test]
fn menu_keyboard_has_two_search_buttons_and_a_link() {
    let kb = menu_keyboard(repo_url());
    let rows = &kb.inline_keyboard;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 2);

    match &rows[0][0].kind {
        InlineKeyboardButtonKind::CallbackData(data) => assert_eq!(data, CB_IMAGE_INPUT),
        other => panic!("expected callback button, got: {other:?}"),
    }
    match &rows[0][1].kind {
        InlineKeyboardButtonKind::CallbackData(data) => assert_eq!(data, CB_AUDIO_INPUT),
        other => panic!("expected callback button, got: {other:?}"),
    }

    assert_eq!(rows[1].len(), 1);
    match &rows[1][0].kind {
        InlineKeyboardButtonKind::Url(url) => assert_eq!(url, &repo_url()),
        other => panic!("expected url button, got: {other:?}"),
    }
}

#[test]
fn back_keyboard_is_a_single_back_button() {
    let kb = back_keyboard();
    let rows = &kb.inline_keyboard;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 1);

    match &rows[0][0].kind {
        InlineKeyboardButtonKind::CallbackData(data) => assert_eq!(data, CB_BACK),
        other => panic!("expected callback button, got: {other:?}"),
    }
}
