use super::trimmed;
use crate::core::entity::timestamp;
use crate::impl_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Commission,
    Purchase,
    Collaboration,
    Exhibition,
    General,
}

/// Contact-form submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: String,

    #[validate(email(message = "Please add a valid email"))]
    pub email: String,

    pub subject: Subject,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Message cannot be more than 5000 characters"
    ))]
    pub message: String,

    #[serde(default)]
    pub is_read: bool,

    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl_record!(Message, "messages", "Message");
