use crate::core::entity::{ORDER_FIELD, Record};
use crate::core::error::{AtelierResult, EntityError};
use crate::core::query::{Filter, SortDirection, SortSpec};
use crate::entities::Category;
use crate::server::extractors::{Payload, RecordId, RequireAdmin};
use crate::server::response::{counted, created, deleted, ok};
use crate::server::state::AppState;
use axum::extract::{Path, State};
use axum::response::Response;

/// `GET /categories`
pub async fn list_categories(State(state): State<AppState>) -> AtelierResult<Response> {
    let sort = SortSpec::ascending(ORDER_FIELD).then("name", SortDirection::Ascending);
    Ok(counted(state.categories.list(&Filter::new(), &sort, None).await?))
}

/// `GET /categories/{id}`
pub async fn get_category(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    Ok(ok(state.categories.require(&id).await?))
}

/// `GET /categories/slug/{slug}`
pub async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AtelierResult<Response> {
    let category = state
        .categories
        .find_one(&Filter::new().eq("slug", slug.as_str()))
        .await?
        .ok_or_else(|| EntityError::not_found(Category::LABEL, &slug))?;
    Ok(ok(category))
}

/// `POST /categories`
pub async fn create_category(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    Ok(created(state.categories.create(payload).await?))
}

/// `PUT /categories/{id}`
pub async fn update_category(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    Ok(ok(state.categories.update(&id, payload).await?))
}

/// `DELETE /categories/{id}`
pub async fn delete_category(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    state.categories.delete(&id).await?;
    Ok(deleted())
}
