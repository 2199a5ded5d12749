//! Route handlers, one module per resource

pub mod artworks;
pub mod awards;
pub mod categories;
pub mod hero_slides;
pub mod messages;
pub mod photography;

use crate::core::query::{QueryRequest, parse_positive};
use axum::Json;
use serde_json::{Value, json};

/// `limit` parameter of the short lists (featured, latest)
pub(crate) fn limit_or(request: &QueryRequest, default: u64) -> u64 {
    parse_positive(request.get_text("limit")).unwrap_or(default)
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "atelier"
    }))
}
