#![allow(dead_code)]

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use mockito::{Matcher, Mock, ServerGuard};
use sporlproxy::{
    config::{ClientIdentity, DEFAULT_SCOPE, Settings},
    server::{AppState, router},
    store::CredentialStore,
};
use tempfile::TempDir;
use tower::ServiceExt;

/// base64("client-id:client-secret")
pub const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

pub fn test_settings(server_url: &str) -> Settings {
    Settings {
        client: ClientIdentity {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "http://localhost:8888/callback".to_string(),
        },
        port: 8888,
        auth_url: format!("{server_url}/authorize"),
        token_url: format!("{server_url}/api/token"),
        api_url: format!("{server_url}/v1"),
        scope: DEFAULT_SCOPE.to_string(),
    }
}

/// Creates a store backed by `.env` inside `dir`, seeded with `contents`.
///
/// The process environment is ignored so a developer's own
/// `SPOTIFY_REFRESH_TOKEN` cannot leak into the tests.
pub async fn test_store(dir: &TempDir, contents: Option<&str>) -> CredentialStore {
    let path = dir.path().join(".env");
    if let Some(contents) = contents {
        std::fs::write(&path, contents).unwrap();
    }
    CredentialStore::open(path)
        .await
        .unwrap()
        .with_env_fallback(false)
}

pub async fn test_state(server: &ServerGuard, dir: &TempDir, contents: Option<&str>) -> AppState {
    AppState::new(test_settings(&server.url()), test_store(dir, contents).await)
}

pub fn env_contents(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join(".env")).unwrap_or_default()
}

/// Token endpoint answering a refresh grant for `refresh_token` with `access_token`.
pub async fn mock_refresh(
    server: &mut ServerGuard,
    refresh_token: &str,
    access_token: &str,
    hits: usize,
) -> Mock {
    server
        .mock("POST", "/api/token")
        .match_header("authorization", BASIC_AUTH)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), refresh_token.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"access_token":"{access_token}","token_type":"Bearer","expires_in":3600}}"#
        ))
        .expect(hits)
        .create_async()
        .await
}

pub fn track_json(id: &str, name: &str, artist: &str) -> String {
    format!(
        r#"{{"id":"{id}","name":"{name}","artists":[{{"name":"{artist}"}},{{"name":"Featured"}}],"external_urls":{{"spotify":"https://open.spotify.com/track/{id}"}}}}"#
    )
}

pub fn top_tracks_path() -> Matcher {
    Matcher::Regex(r"^/v1/me/top/tracks".to_string())
}

pub async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, String) {
    let response = router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
