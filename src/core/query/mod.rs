//! List-query engine
//!
//! Turns raw URL parameters into a [`QueryPlan`] (filter, text search,
//! projection, sort and page window) and runs it against a
//! [`RecordStore`](crate::core::store::RecordStore).
//!
//! ```text
//! GET /api/artworks?medium=oil&year[gte]=2020&sort=-year&page=2&limit=5&select=title,year
//! ```

pub mod filter;
pub mod page;
pub mod plan;
pub mod request;
pub mod sort;

pub use filter::{CompareOp, Condition, Filter, TextSearch};
pub use page::{DEFAULT_LIMIT, DEFAULT_PAGE, PageRef, PageSpec, Pagination, parse_positive};
pub use plan::{ListResponse, QueryPlan, QueryResult, parse_projection};
pub use request::{QueryRequest, QueryValue, RESERVED_KEYS};
pub use sort::{SortDirection, SortKey, SortSpec};
