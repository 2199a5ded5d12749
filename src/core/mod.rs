//! Core module: records, the store abstraction, the query builder and ordering

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod ordering;
pub mod query;
pub mod repository;
pub mod store;

pub use auth::{AuthContext, AuthProvider, NoAuthProvider, StaticTokenProvider};
pub use entity::{IndexDefinition, IndexKey, Ordered, Record, Visibility};
pub use error::{AtelierError, AtelierResult};
pub use field::FieldValue;
pub use ordering::OrderAssignment;
pub use query::{Filter, QueryPlan, QueryRequest, QueryResult, SortSpec};
pub use repository::{Repository, parse_id};
pub use store::{Document, RecordStore};
