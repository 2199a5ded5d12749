use super::{slugify, trimmed};
use crate::core::entity::{IndexDefinition, IndexKey, timestamp};
use crate::impl_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

/// Artwork grouping shown in the gallery navigation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50, message = "Name cannot be more than 50 characters"))]
    pub name: String,

    #[serde(default)]
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Description cannot be more than 500 characters"))]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<CoverImage>,

    #[serde(default)]
    pub order: i64,

    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl_record!(Category, "categories", "Category", {
    fn indexes() -> Vec<IndexDefinition> {
        vec![
            IndexDefinition::new(&[("name", IndexKey::Ascending)]).unique(),
            IndexDefinition::new(&[("slug", IndexKey::Ascending)]).unique(),
        ]
    }

    fn on_create(&mut self) {
        self.slug = slugify(&self.name);
    }
});
