use super::{trimmed, trimmed_list, unique_slug};
use crate::core::entity::{IndexDefinition, IndexKey, Visibility, timestamp};
use crate::impl_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Medium {
    #[default]
    Oil,
    Acrylic,
    Watercolor,
    Charcoal,
    Pencil,
    Pastel,
    MixedMedia,
    Digital,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    #[default]
    Canvas,
    Paper,
    Wood,
    Board,
    Digital,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkStatus {
    Draft,
    #[default]
    Published,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    #[default]
    Inches,
    Cm,
    Pixels,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub height: Option<f64>,
    #[serde(default)]
    pub unit: DimensionUnit,
}

/// Image or video hosted by the media service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[validate(length(min = 1, message = "Media url is required"))]
    pub url: String,
    #[validate(length(min = 1, message = "Media publicId is required"))]
    pub public_id: String,
    #[serde(default, rename = "type")]
    pub kind: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Competition entry details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub award: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: Uuid,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title cannot be more than 200 characters"
    ))]
    pub title: String,

    /// Assigned once at creation
    #[serde(default)]
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 5000, message = "Description cannot be more than 5000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub medium: Medium,

    #[serde(default)]
    pub surface: Surface,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub dimensions: Option<Dimensions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub is_for_sale: bool,

    #[serde(default)]
    pub is_sold: bool,

    /// Owning category id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Uuid>,

    #[serde(default, deserialize_with = "trimmed_list")]
    pub tags: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub media: Vec<Media>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub order: i64,

    #[serde(default)]
    pub views: i64,

    #[serde(default)]
    pub status: ArtworkStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition: Option<Competition>,

    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl_record!(Artwork, "artworks", "Artwork", {
    fn visibility() -> Option<Visibility> {
        Some(Visibility::text("status", "published"))
    }

    fn text_fields() -> &'static [&'static str] {
        &["title", "description", "tags"]
    }

    fn indexes() -> Vec<IndexDefinition> {
        vec![
            IndexDefinition::text(&["title", "description", "tags"]),
            IndexDefinition::new(&[("slug", IndexKey::Ascending)]).unique(),
            IndexDefinition::new(&[
                ("status", IndexKey::Ascending),
                ("createdAt", IndexKey::Descending),
            ]),
        ]
    }

    fn on_create(&mut self) {
        self.slug = unique_slug(&self.title, self.created_at);
    }
});
