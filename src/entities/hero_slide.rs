use super::{default_true, trimmed, trimmed_opt};
use crate::core::entity::{IndexDefinition, IndexKey, Visibility, timestamp};
use crate::{impl_ordered, impl_record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Full-width banner on the home page, shown in `order`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    pub id: Uuid,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 200, message = "Title cannot be more than 200 characters"))]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "trimmed_opt")]
    #[validate(length(max = 500, message = "Subtitle cannot be more than 500 characters"))]
    pub subtitle: Option<String>,

    #[validate(length(min = 1, message = "Please add an image URL"))]
    pub image_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_public_id: Option<String>,

    #[serde(default)]
    pub order: i64,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl_record!(HeroSlide, "heroslides", "Hero slide", {
    fn visibility() -> Option<Visibility> {
        Some(Visibility::flag("isActive", true))
    }

    fn indexes() -> Vec<IndexDefinition> {
        vec![IndexDefinition::new(&[
            ("isActive", IndexKey::Ascending),
            ("order", IndexKey::Ascending),
        ])]
    }
});

impl_ordered!(HeroSlide);
