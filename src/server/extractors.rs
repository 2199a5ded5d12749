//! Request extractors for caller identity, list queries and JSON bodies

use crate::core::auth::AuthContext;
use crate::core::error::{AtelierError, AuthError, ValidationError};
use crate::core::query::QueryRequest;
use crate::core::repository::parse_id;
use crate::server::state::AppState;
use axum::extract::{FromRef, FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde_json::Value;
use uuid::Uuid;

/// Whoever is calling; anonymous unless the auth provider says otherwise
#[derive(Debug, Clone)]
pub struct Caller(pub AuthContext);

impl Caller {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_authenticated()
    }
}

impl<S> FromRequestParts<S> for Caller
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AtelierError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let context = match state.auth.extract_context(&parts.headers).await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, "auth provider failed, caller treated as anonymous");
                AuthContext::Anonymous
            }
        };
        Ok(Caller(context))
    }
}

/// Guard for admin-only routes; rejects anonymous callers with `401`
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthContext);

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AtelierError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Caller(context) = Caller::from_request_parts(parts, state).await?;
        if !context.is_authenticated() {
            return Err(AuthError::Unauthenticated.into());
        }
        Ok(RequireAdmin(context))
    }
}

/// Raw query string decoded into a [`QueryRequest`]
///
/// Never rejects: undecodable input becomes an empty request.
#[derive(Debug, Clone, Default)]
pub struct ListQuery(pub QueryRequest);

impl<S: Send + Sync> FromRequestParts<S> for ListQuery {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ListQuery(QueryRequest::from_query_str(
            parts.uri.query().unwrap_or_default(),
        )))
    }
}

/// Record id taken from the `{id}` path segment
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for RecordId {
    type Rejection = AtelierError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ValidationError::invalid_argument("id", e.body_text()))?;
        Ok(RecordId(parse_id(&raw)?))
    }
}

/// JSON request body; malformed input is reported in the error envelope
#[derive(Debug, Clone)]
pub struct Payload(pub Value);

impl<S: Send + Sync> FromRequest<S> for Payload {
    type Rejection = AtelierError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| ValidationError::InvalidJson {
                message: e.body_text(),
            })?;
        Ok(Payload(value))
    }
}
