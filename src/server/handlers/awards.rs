use crate::core::entity::{ORDER_FIELD, Record};
use crate::core::error::AtelierResult;
use crate::core::query::{Filter, SortDirection, SortSpec};
use crate::entities::Award;
use crate::server::extractors::{Caller, Payload, RecordId, RequireAdmin};
use crate::server::response::{counted, created, deleted, ok};
use crate::server::state::AppState;
use axum::extract::State;
use axum::response::Response;

/// `GET /awards`; most recent year first, then manual order
pub async fn list_awards(State(state): State<AppState>, caller: Caller) -> AtelierResult<Response> {
    let mut filter = Filter::new();
    if !caller.is_authenticated()
        && let Some(rule) = Award::visibility()
    {
        filter = filter.restrict_to_public(&rule);
    }
    let sort = SortSpec::descending("year").then(ORDER_FIELD, SortDirection::Ascending);
    Ok(counted(state.awards.list(&filter, &sort, None).await?))
}

/// `GET /awards/{id}`
pub async fn get_award(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    Ok(ok(state.awards.require(&id).await?))
}

/// `POST /awards`
pub async fn create_award(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    Ok(created(state.awards.create_ordered(payload).await?))
}

/// `PUT /awards/reorder` with `{awards: [{id, order}]}`
pub async fn reorder_awards(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    let awards = state.awards.reorder(payload.get("awards"), "awards").await?;
    Ok(ok(awards))
}

/// `PUT /awards/{id}`
pub async fn update_award(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    Ok(ok(state.awards.update(&id, payload).await?))
}

/// `DELETE /awards/{id}`
pub async fn delete_award(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    state.awards.delete(&id).await?;
    Ok(deleted())
}
