mod common;

use std::io;

use common::*;
use sporlproxy::bootstrap::{begin_authorization, pending_authorization};
use tempfile::tempdir;

const SERVER: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn test_opens_browser_once_without_refresh_token() {
    let dir = tempdir().unwrap();
    let settings = test_settings(SERVER);
    let store = test_store(&dir, Some("SPOTIFY_CLIENT_ID=client-id\n")).await;

    let mut opened = Vec::new();
    let started = begin_authorization(&settings, &store, true, |url: &str| {
        opened.push(url.to_string());
        Ok(())
    })
    .await
    .unwrap();

    assert!(started);
    assert_eq!(opened.len(), 1);
    assert!(opened[0].starts_with("http://127.0.0.1:9/authorize?"));
    assert!(opened[0].contains("client_id=client-id"));
    assert!(opened[0].contains("response_type=code"));
}

#[tokio::test]
async fn test_skips_browser_with_refresh_token() {
    let dir = tempdir().unwrap();
    let settings = test_settings(SERVER);
    let store = test_store(&dir, Some("SPOTIFY_REFRESH_TOKEN=refresh-1\n")).await;

    let mut calls = 0;
    let started = begin_authorization(&settings, &store, true, |_: &str| {
        calls += 1;
        Ok(())
    })
    .await
    .unwrap();

    assert!(!started);
    assert_eq!(calls, 0);
    assert_eq!(pending_authorization(&settings, &store).await.unwrap(), None);
}

#[tokio::test]
async fn test_no_browser_only_prints_url() {
    let dir = tempdir().unwrap();
    let settings = test_settings(SERVER);
    let store = test_store(&dir, None).await;

    let mut calls = 0;
    let started = begin_authorization(&settings, &store, false, |_: &str| {
        calls += 1;
        Ok(())
    })
    .await
    .unwrap();

    assert!(started);
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn test_browser_failure_is_not_fatal() {
    let dir = tempdir().unwrap();
    let settings = test_settings(SERVER);
    let store = test_store(&dir, None).await;

    let started = begin_authorization(&settings, &store, true, |_: &str| {
        Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
    })
    .await
    .unwrap();

    assert!(started);
}
