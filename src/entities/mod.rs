//! Portfolio record types

pub mod macros;

mod artwork;
mod award;
mod category;
mod hero_slide;
mod message;
mod photography;

pub use artwork::{
    Artwork, ArtworkStatus, Competition, DimensionUnit, Dimensions, Media, MediaType, Medium,
    Surface,
};
pub use award::{Award, AwardKind};
pub use category::{Category, CoverImage};
pub use hero_slide::HeroSlide;
pub use message::{Message, Subject};
pub use photography::Photography;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// URL-safe slug: lowercase ASCII alphanumerics joined by single dashes
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Lowercase base-36 rendering of a non-negative integer
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Slug with a base-36 millisecond suffix so equal titles stay distinct
pub fn unique_slug(text: &str, at: DateTime<Utc>) -> String {
    let millis = u64::try_from(at.timestamp_millis()).unwrap_or_default();
    format!("{}-{}", slugify(text), to_base36(millis))
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

pub(crate) fn trimmed_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<String>::deserialize(deserializer).map(|s| s.map(|s| s.trim().to_string()))
}

pub(crate) fn trimmed_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    Vec::<String>::deserialize(deserializer)
        .map(|items| items.into_iter().map(|s| s.trim().to_string()).collect())
}
