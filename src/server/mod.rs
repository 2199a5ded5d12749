//! HTTP surface: state, extractors, handlers and the `ServerBuilder`
//!
//! Every resource lives under `/api`. Reads are public unless noted; writes
//! require an admin caller as recognized by the configured `AuthProvider`.

pub mod builder;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use extractors::{Caller, ListQuery, Payload, RecordId, RequireAdmin};
pub use handlers::artworks::ArtworkStats;
pub use router::build_api_routes;
pub use state::AppState;
