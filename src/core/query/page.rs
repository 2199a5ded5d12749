//! Page selection and pagination metadata

use serde::{Deserialize, Serialize};

/// Page used when none (or an unusable one) is requested
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when none (or an unusable one) is requested
pub const DEFAULT_LIMIT: u64 = 12;

/// Requested page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageSpec {
    /// Read `page` / `limit` parameters
    ///
    /// Never fails: missing, non-numeric, zero or negative values fall back to
    /// the defaults. A leading integer is honoured (`"3abc"` reads as 3).
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Number of records to skip before the page starts
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Leading-integer parse; only values >= 1 are usable
pub fn parse_positive(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim_start();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u64>().ok().filter(|n| *n >= 1)
}

/// Reference to a neighbouring page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    pub page: u64,
    pub limit: u64,
}

/// Next / previous page descriptors, present only when such a page exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

impl Pagination {
    pub fn new(spec: &PageSpec, total: u64) -> Self {
        let skip = spec.skip();
        let next = (skip.saturating_add(spec.limit) < total).then(|| PageRef {
            page: spec.page.saturating_add(1),
            limit: spec.limit,
        });
        let prev = (skip > 0).then(|| PageRef {
            page: spec.page - 1,
            limit: spec.limit,
        });
        Self { next, prev }
    }
}
