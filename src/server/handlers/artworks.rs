//! Artwork routes: paginated catalogue, featured strip, statistics

use super::limit_or;
use crate::core::entity::{ID_FIELD, Record};
use crate::core::error::{AtelierResult, EntityError};
use crate::core::query::{CompareOp, Filter, SortSpec};
use crate::core::repository::Repository;
use crate::core::store::Document;
use crate::entities::{Artwork, ArtworkStatus, Category, Medium};
use crate::server::extractors::{Caller, ListQuery, Payload, RecordId, RequireAdmin};
use crate::server::response::{counted, created, deleted, ok};
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

const CATEGORY_FIELD: &str = "category";
const FEATURED_LIMIT: u64 = 6;

/// `GET /artworks`
pub async fn list_artworks(
    State(state): State<AppState>,
    caller: Caller,
    ListQuery(request): ListQuery,
) -> AtelierResult<Response> {
    let mut result = state
        .artworks
        .query(&request, caller.is_authenticated())
        .await?;
    populate_categories(&state, &mut result.records).await?;
    Ok(Json(result.into_response()).into_response())
}

/// `GET /artworks/featured`
pub async fn featured_artworks(
    State(state): State<AppState>,
    ListQuery(request): ListQuery,
) -> AtelierResult<Response> {
    let filter = Filter::new()
        .eq("featured", true)
        .eq("status", json!(ArtworkStatus::Published));
    let artworks = state
        .artworks
        .list(&filter, &SortSpec::default(), Some(limit_or(&request, FEATURED_LIMIT)))
        .await?;
    Ok(counted(into_populated(&state, artworks).await?))
}

/// `GET /artworks/{id}`; counts as a view
pub async fn get_artwork(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    let artwork = state.artworks.require(&id).await?;
    let artwork = record_view(&state.artworks, artwork).await?;
    Ok(ok(into_populated_one(&state, artwork).await?))
}

/// `GET /artworks/slug/{slug}`; counts as a view
pub async fn get_artwork_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AtelierResult<Response> {
    let artwork = state
        .artworks
        .find_one(&Filter::new().eq("slug", slug.as_str()))
        .await?
        .ok_or_else(|| EntityError::not_found(Artwork::LABEL, &slug))?;
    let artwork = record_view(&state.artworks, artwork).await?;
    Ok(ok(into_populated_one(&state, artwork).await?))
}

/// `POST /artworks`
pub async fn create_artwork(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    Ok(created(state.artworks.create(payload).await?))
}

/// `PUT /artworks/{id}`
pub async fn update_artwork(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Payload(payload): Payload,
) -> AtelierResult<Response> {
    Ok(ok(state.artworks.update(&id, payload).await?))
}

/// `DELETE /artworks/{id}`
pub async fn delete_artwork(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AtelierResult<Response> {
    state.artworks.delete(&id).await?;
    Ok(deleted())
}

/// `GET /artworks/stats`
pub async fn artwork_stats(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AtelierResult<Response> {
    let everything = Filter::new();
    let newest = SortSpec::default();
    let (artworks, categories) = futures::try_join!(
        state.artworks.list(&everything, &newest, None),
        state.categories.list(&everything, &newest, None),
    )?;
    Ok(ok(ArtworkStats::collect(&artworks, &categories)))
}

async fn record_view(artworks: &Repository<Artwork>, artwork: Artwork) -> AtelierResult<Artwork> {
    let mut patch = Document::new();
    patch.insert("views".to_string(), Value::from(artwork.views.saturating_add(1)));
    artworks.apply(&artwork.id, patch).await
}

/// Replace each `category` id with `{id, name, slug}`
///
/// Ids that no longer resolve become `null`.
async fn populate_categories(state: &AppState, documents: &mut [Document]) -> AtelierResult<()> {
    let ids: HashSet<&str> = documents
        .iter()
        .filter_map(|doc| doc.get(CATEGORY_FIELD).and_then(Value::as_str))
        .collect();
    if ids.is_empty() {
        return Ok(());
    }

    let filter = Filter::new().compare(
        ID_FIELD,
        CompareOp::In,
        Value::Array(ids.into_iter().map(Value::from).collect()),
    );
    let summaries: HashMap<String, Value> = state
        .store
        .find(Category::COLLECTION, &filter)
        .await?
        .into_iter()
        .filter_map(|category| {
            let id = category.get(ID_FIELD)?.as_str()?.to_string();
            let summary = json!({
                "id": id,
                "name": category.get("name"),
                "slug": category.get("slug"),
            });
            Some((id, summary))
        })
        .collect();

    for doc in documents.iter_mut() {
        let Some(id) = doc.get(CATEGORY_FIELD).and_then(Value::as_str) else {
            continue;
        };
        let summary = summaries.get(id).cloned().unwrap_or(Value::Null);
        doc.insert(CATEGORY_FIELD.to_string(), summary);
    }
    Ok(())
}

async fn into_populated(state: &AppState, artworks: Vec<Artwork>) -> AtelierResult<Vec<Document>> {
    let mut documents = artworks
        .iter()
        .map(Repository::<Artwork>::to_document)
        .collect::<Result<Vec<_>, _>>()?;
    populate_categories(state, &mut documents).await?;
    Ok(documents)
}

async fn into_populated_one(state: &AppState, artwork: Artwork) -> AtelierResult<Document> {
    let mut documents = into_populated(state, vec![artwork]).await?;
    Ok(documents.pop().unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkStats {
    pub total_artworks: u64,
    pub total_views: i64,
    pub for_sale: u64,
    pub sold: u64,
    pub featured: u64,
    pub by_medium: Vec<MediumCount>,
    pub by_category: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediumCount {
    pub medium: Medium,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: Option<Uuid>,
    pub name: Option<String>,
    pub count: u64,
}

impl ArtworkStats {
    /// Totals plus per-medium and per-category counts, largest group first
    pub fn collect(artworks: &[Artwork], categories: &[Category]) -> Self {
        let names: HashMap<Uuid, &str> = categories
            .iter()
            .map(|c| (c.id, c.name.as_str()))
            .collect();

        let mut by_medium: IndexMap<Medium, u64> = IndexMap::new();
        let mut by_category: IndexMap<Option<Uuid>, u64> = IndexMap::new();
        let mut stats = Self {
            total_artworks: artworks.len() as u64,
            total_views: 0,
            for_sale: 0,
            sold: 0,
            featured: 0,
            by_medium: Vec::new(),
            by_category: Vec::new(),
        };

        for artwork in artworks {
            stats.total_views += artwork.views;
            stats.for_sale += u64::from(artwork.is_for_sale);
            stats.sold += u64::from(artwork.is_sold);
            stats.featured += u64::from(artwork.featured);
            *by_medium.entry(artwork.medium).or_default() += 1;
            *by_category.entry(artwork.category).or_default() += 1;
        }

        stats.by_medium = by_medium
            .into_iter()
            .map(|(medium, count)| MediumCount { medium, count })
            .collect();
        stats.by_medium.sort_by(|a, b| b.count.cmp(&a.count));

        stats.by_category = by_category
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category,
                name: category
                    .and_then(|id| names.get(&id))
                    .map(|name| name.to_string()),
                count,
            })
            .collect();
        stats.by_category.sort_by(|a, b| b.count.cmp(&a.count));

        stats
    }
}
