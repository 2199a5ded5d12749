use super::{default_true, trimmed, trimmed_opt};
use crate::core::entity::{IndexDefinition, IndexKey, Visibility, timestamp};
use crate::impl_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Photography {
    pub id: Uuid,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 200, message = "Title cannot be more than 200 characters"))]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "trimmed_opt")]
    #[validate(length(max = 1000, message = "Description cannot be more than 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Please add an image URL"))]
    pub image_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_public_id: Option<String>,

    /// Free-form grouping label
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "trimmed_opt")]
    #[validate(length(max = 100, message = "Category cannot be more than 100 characters"))]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<DateTime<Utc>>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub order: i64,

    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl_record!(Photography, "photographies", "Photography work", {
    fn visibility() -> Option<Visibility> {
        Some(Visibility::flag("isActive", true))
    }

    fn indexes() -> Vec<IndexDefinition> {
        vec![
            IndexDefinition::new(&[
                ("isActive", IndexKey::Ascending),
                ("createdAt", IndexKey::Descending),
            ]),
            IndexDefinition::new(&[("category", IndexKey::Ascending)]),
        ]
    }
});
