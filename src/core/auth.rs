//! Caller authentication
//!
//! Only two kinds of caller exist: an administrator holding a valid bearer
//! token, and anonymous visitors. Token issuance happens elsewhere; providers
//! here only check what the request carries.

use anyhow::Result;
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use std::collections::HashSet;

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Administrator of the portfolio
    Admin { subject: String },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    /// Whether list queries may see non-public records
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::Admin { .. })
    }

    pub fn subject(&self) -> Option<&str> {
        match self {
            AuthContext::Admin { subject } => Some(subject),
            AuthContext::Anonymous => None,
        }
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract auth context from request headers
    ///
    /// Missing or unknown credentials yield [`AuthContext::Anonymous`]; an
    /// `Err` is reserved for provider failures.
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext>;
}

/// Default no-auth provider (for development)
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn extract_context(&self, _headers: &HeaderMap) -> Result<AuthContext> {
        Ok(AuthContext::Anonymous)
    }
}

/// Accepts a fixed set of bearer tokens from configuration
pub struct StaticTokenProvider {
    tokens: HashSet<String>,
}

impl StaticTokenProvider {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.is_empty())
                .collect(),
        }
    }
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext> {
        Ok(match bearer_token(headers) {
            Some(token) if self.tokens.contains(token) => AuthContext::Admin {
                subject: "admin".to_string(),
            },
            _ => AuthContext::Anonymous,
        })
    }
}
