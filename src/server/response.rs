//! Success envelopes shared by every route

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// `{success: true, data}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

/// `{success: true, count, data}` for unpaginated lists
#[derive(Debug, Serialize)]
pub struct CountResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

/// `200` with the record
pub fn ok<T: Serialize>(data: T) -> Response {
    Json(DataResponse {
        success: true,
        data,
    })
    .into_response()
}

/// `201` with the newly created record
pub fn created<T: Serialize>(data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(DataResponse {
            success: true,
            data,
        }),
    )
        .into_response()
}

/// `200` with an unpaginated list
pub fn counted<T: Serialize>(data: Vec<T>) -> Response {
    Json(CountResponse {
        success: true,
        count: data.len(),
        data,
    })
    .into_response()
}

/// `200` with `data: {}` after a delete
pub fn deleted() -> Response {
    ok(serde_json::json!({}))
}
