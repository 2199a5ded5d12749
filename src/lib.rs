//! # Atelier
//!
//! Content backend for an artist portfolio: artworks, categories, hero
//! slides, awards, photography and contact messages, served as a JSON API
//! over a document store.
//!
//! ## Features
//!
//! - **Query Builder**: list routes read filters, operators (`year[gte]=2020`),
//!   text search, field selection, sorting and pagination straight from the
//!   query string
//! - **Visibility**: anonymous callers only ever see published or active records
//! - **Ordered Lists**: hero slides and awards append at the end and can be
//!   reordered in bulk
//! - **Pluggable Storage**: in-memory store by default, MongoDB behind the
//!   `mongodb_backend` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use atelier::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_store(InMemoryStore::new())
//!     .with_auth(StaticTokenProvider::new(["secret"]))
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthContext, AuthProvider, NoAuthProvider, StaticTokenProvider},
        entity::{Ordered, Record, Visibility},
        error::{AtelierError, AtelierResult},
        query::{Filter, QueryPlan, QueryRequest, QueryResult, SortSpec},
        repository::Repository,
        store::{Document, RecordStore},
    };

    // === Records ===
    pub use crate::entities::{Artwork, Award, Category, HeroSlide, Message, Photography};

    // === Macros ===
    pub use crate::{impl_ordered, impl_record};

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde_json::Value;
    pub use uuid::Uuid;
}
