//! Route table for the `/api` surface
//!
//! Fixed segments (`featured`, `stats`, `slug`, `reorder`, `latest`,
//! `categories`) are matched before the `{id}` capture by axum's router, so
//! registration order does not matter.

use crate::server::handlers::{
    artworks, awards, categories, health_check, hero_slides, messages, photography,
};
use crate::server::state::AppState;
use axum::Router;
use axum::routing::{get, put};

/// Build all API routes
///
/// - `/artworks`, `/categories`, `/photography`: CRUD plus read-only extras
/// - `/hero-slides`, `/awards`: CRUD plus bulk `reorder`
/// - `/messages`: public submission, admin inbox
pub fn build_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(artwork_routes())
        .merge(category_routes())
        .merge(hero_slide_routes())
        .merge(award_routes())
        .merge(photography_routes())
        .merge(message_routes())
        .with_state(state)
}

fn artwork_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/artworks",
            get(artworks::list_artworks).post(artworks::create_artwork),
        )
        .route("/artworks/featured", get(artworks::featured_artworks))
        .route("/artworks/stats", get(artworks::artwork_stats))
        .route("/artworks/slug/{slug}", get(artworks::get_artwork_by_slug))
        .route(
            "/artworks/{id}",
            get(artworks::get_artwork)
                .put(artworks::update_artwork)
                .delete(artworks::delete_artwork),
        )
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/slug/{slug}",
            get(categories::get_category_by_slug),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
}

fn hero_slide_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/hero-slides",
            get(hero_slides::list_hero_slides).post(hero_slides::create_hero_slide),
        )
        .route(
            "/hero-slides/reorder",
            put(hero_slides::reorder_hero_slides),
        )
        .route(
            "/hero-slides/{id}",
            get(hero_slides::get_hero_slide)
                .put(hero_slides::update_hero_slide)
                .delete(hero_slides::delete_hero_slide),
        )
}

fn award_routes() -> Router<AppState> {
    Router::new()
        .route("/awards", get(awards::list_awards).post(awards::create_award))
        .route("/awards/reorder", put(awards::reorder_awards))
        .route(
            "/awards/{id}",
            get(awards::get_award)
                .put(awards::update_award)
                .delete(awards::delete_award),
        )
}

fn photography_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/photography",
            get(photography::list_photography).post(photography::create_photography),
        )
        .route("/photography/latest", get(photography::latest_photography))
        .route(
            "/photography/categories",
            get(photography::photography_categories),
        )
        .route(
            "/photography/{id}",
            get(photography::get_photography)
                .put(photography::update_photography)
                .delete(photography::delete_photography),
        )
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/messages",
            get(messages::list_messages).post(messages::send_message),
        )
        .route(
            "/messages/{id}",
            get(messages::get_message)
                .put(messages::update_message_status)
                .delete(messages::delete_message),
        )
}
