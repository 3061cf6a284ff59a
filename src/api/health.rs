use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::{config::REFRESH_TOKEN_KEY, server::AppState};

pub async fn health(Extension(state): Extension<AppState>) -> Json<Value> {
    let authorized = state.store.get(REFRESH_TOKEN_KEY).await.is_some();
    Json(json!({
        "status": "ok",
        "authorized": authorized,
        "version": env!("CARGO_PKG_VERSION")
    }))
}
