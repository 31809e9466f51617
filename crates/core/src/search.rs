//! Studio listing filters.
//!
//! The listing page keeps its filters in the query string. Values arrive
//! here untrimmed and with `all` meaning "no filter"; [`StudioFilter`] is the
//! cleaned form the database layer turns into `WHERE` clauses.

use serde::{Deserialize, Serialize};

use crate::errors::{TimeError, TimeResult};

const ANY: &str = "all";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioSearchParams {
    pub q: Option<String>,
    pub style: Option<String>,
    pub city: Option<String>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudioFilter {
    /// `ILIKE` pattern matching the studio name anywhere.
    pub name_pattern: Option<String>,
    /// Style slug, e.g. `fine-line`.
    pub style: Option<String>,
    /// City slug, e.g. `new-york`.
    pub city: Option<String>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
}

impl StudioFilter {
    pub fn from_params(params: &StudioSearchParams) -> TimeResult<Self> {
        if let (Some(min), Some(max)) = (params.min_price, params.max_price) {
            if min > max {
                return Err(TimeError::Validation(format!(
                    "min_price ({}) must not exceed max_price ({})",
                    min, max
                )));
            }
        }

        Ok(Self {
            name_pattern: non_blank(params.q.as_deref())
                .map(|q| format!("%{}%", escape_like(q))),
            style: selected(params.style.as_deref()).map(filter_slug),
            city: selected(params.city.as_deref()).map(filter_slug),
            min_price: params.min_price,
            max_price: params.max_price,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Lowercases and joins words with `-`, the form used for style and city
/// options in the listing filters.
pub fn filter_slug(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn selected(value: Option<&str>) -> Option<&str> {
    non_blank(value).filter(|v| !v.eq_ignore_ascii_case(ANY))
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
