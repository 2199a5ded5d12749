use super::limit_or;
use crate::core::entity::CREATED_AT_FIELD;
use crate::core::error::AtelierResult;
use crate::core::query::{Filter, SortSpec};
use crate::server::extractors::{Caller, ListQuery, Payload, RecordId, RequireAdmin};
use crate::server::response::{counted, created, deleted, ok};
use crate::server::state::AppState;
use axum::extract::State;
use axum::response::Response;
use serde_json::Value;

const ACTIVE_FIELD: &str = "isActive";
const LATEST_LIMIT: u64 = 6;

/// `GET /photography?category=&active=`
///
/// Anonymous callers only see active works; admins may pick with `active`.
pub async fn list_photography(
    State(state): State<AppState>,
    caller: Caller,
    ListQuery(request): ListQuery,
) -> AtelierResult<Response> {
    let mut filter = Filter::new();
    if let Some(category) = request.get_text("category").filter(|c| !c.is_empty()) {
        filter = filter.eq("category", category);
    }
    if !caller.is_authenticated() {
        filter = filter.eq(ACTIVE_FIELD, true);
    } else if let Some(active) = request.get_text("active") {
        filter = filter.eq(ACTIVE_FIELD, active == "true");
    }

    let photos = state
        .photography
        .list(&filter, &SortSpec::descending(CREATED_AT_FIELD), None)
        .await?;
    Ok(counted(photos))
}

/// `GET /photography/latest`
pub async fn latest_photography(
    State(state): State<AppState>,
    ListQuery(request): ListQuery,
) -> AtelierResult<Response> {
    let photos = state
        .photography
        .list(
            &Filter::new().eq(ACTIVE_FIELD, true),
            &SortSpec::descending(CREATED_AT_FIELD),
            Some(limit_or(&request, LATEST_LIMIT)),
        )
        .await?;
    Ok(counted(photos))
}

/// `GET /photography/categories`: distinct non-empty categories of active works
pub async fn photography_categories(State(state): State<AppState>) -> AtelierResult<Response> {
    let categories: Vec<Value> = state
        .photography
        .distinct("category", &Filter::new().eq(ACTIVE_FIELD, true))
        .await?
        .into_iter()
        .filter(|value| value.as_str().is_some_and(|s| !s.is_empty()))
        .collect();
    Ok(ok(categories))
}

/// `GET /photography/{id}`
pub async fn get_photography(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    Ok(ok(state.photography.require(&id).await?))
}

/// `POST /photography`
pub async fn create_photography(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    Ok(created(state.photography.create(payload).await?))
}

/// `PUT /photography/{id}`
pub async fn update_photography(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    Ok(ok(state.photography.update(&id, payload).await?))
}

/// `DELETE /photography/{id}`
pub async fn delete_photography(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    state.photography.delete(&id).await?;
    Ok(deleted())
}
