//! Unsplash adapter wire tests against a local one-shot HTTP mock.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use mediabot::search::unsplash::UnsplashClient;
use mediabot::search::{ImageSearch, SearchError};

async fn serve_once(status_line: &str, body: &str) -> String {
    let listener = match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) => panic!("listener should bind: {err}"),
    };
    let addr = match listener.local_addr() {
        Ok(addr) => addr,
        Err(err) => panic!("listener should expose local addr: {err}"),
    };

    let status_line_owned = status_line.to_owned();
    let body_owned = body.to_owned();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut read_buf = [0_u8; 2048];
            let _ = socket.read(&mut read_buf).await;

            let response = format!(
                "HTTP/1.1 {status_line_owned}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body_owned}",
                body_owned.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn random_image_returns_url_and_id() {
    let base = serve_once("200 OK", r#"{"urls":{"full":"http://x/img.jpg"},"id":"42"}"#).await;
    let client = UnsplashClient::with_base_url(base, "test-key".to_owned());

    let image = match client.random_image("sunset").await {
        Ok(image) => image,
        Err(err) => panic!("search should succeed: {err}"),
    };

    assert_eq!(image.url, "http://x/img.jpg");
    assert_eq!(image.id, "42");
}

#[tokio::test]
async fn random_image_maps_server_error_to_status() {
    let base = serve_once("500 Internal Server Error", "{}").await;
    let client = UnsplashClient::with_base_url(base, "test-key".to_owned());

    match client.random_image("sunset").await {
        Err(SearchError::Status { status }) => assert_eq!(status, 500),
        other => panic!("expected status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn random_image_rejects_missing_fields() {
    let base = serve_once("200 OK", r#"{"id":"42"}"#).await;
    let client = UnsplashClient::with_base_url(base, "test-key".to_owned());

    match client.random_image("sunset").await {
        Err(SearchError::MalformedResponse(_)) => {}
        other => panic!("expected malformed response error, got: {other:?}"),
    }
}
