//! Hero slides: the manually ordered carousel on the landing page

use crate::core::entity::{ORDER_FIELD, Record};
use crate::core::error::AtelierResult;
use crate::core::query::{Filter, SortSpec};
use crate::entities::HeroSlide;
use crate::server::extractors::{Caller, Payload, RecordId, RequireAdmin};
use crate::server::response::{counted, created, deleted, ok};
use crate::server::state::AppState;
use axum::extract::State;
use axum::response::Response;

/// `GET /hero-slides`; anonymous callers only see active slides
pub async fn list_hero_slides(
    State(state): State<AppState>,
    caller: Caller,
) -> AtelierResult<Response> {
    let mut filter = Filter::new();
    if !caller.is_authenticated()
        && let Some(rule) = HeroSlide::visibility()
    {
        filter = filter.restrict_to_public(&rule);
    }
    let slides = state
        .hero_slides
        .list(&filter, &SortSpec::ascending(ORDER_FIELD), None)
        .await?;
    Ok(counted(slides))
}

/// `GET /hero-slides/{id}`
pub async fn get_hero_slide(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    Ok(ok(state.hero_slides.require(&id).await?))
}

/// `POST /hero-slides`; appended after the last slide unless `order` is given
pub async fn create_hero_slide(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    Ok(created(state.hero_slides.create_ordered(payload).await?))
}

/// `PUT /hero-slides/reorder` with `{slides: [{id, order}]}`
pub async fn reorder_hero_slides(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    let slides = state
        .hero_slides
        .reorder(payload.get("slides"), "slides")
        .await?;
    Ok(ok(slides))
}

/// `PUT /hero-slides/{id}`
pub async fn update_hero_slide(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    Ok(ok(state.hero_slides.update(&id, payload).await?))
}

/// `DELETE /hero-slides/{id}`
pub async fn delete_hero_slide(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    state.hero_slides.delete(&id).await?;
    Ok(deleted())
}
