//! Book record model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use utoipa::{IntoParams, ToSchema};

/// Stored book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_page: Option<i64>,
    /// Derived from `readPage == pageCount`
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<bool>,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reduced view returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// Create / update request body.
///
/// Integer fields take either a JSON number or a numeric string.
/// A `finished` key is ignored, the flag is always derived.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub year: Option<i64>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub page_count: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub read_page: Option<i64>,
    #[serde(default)]
    pub reading: Option<bool>,
}

/// Business rule broken by a payload, in the order the rules are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadViolation {
    MissingName,
    ReadPageExceedsPageCount,
}

impl BookPayload {
    /// Check the name rule first, then the page rule.
    pub fn validate(&self) -> Result<(), PayloadViolation> {
        if self.name.as_deref().map_or(true, str::is_empty) {
            return Err(PayloadViolation::MissingName);
        }
        // Only comparable when both counts were supplied
        if let (Some(read_page), Some(page_count)) = (self.read_page, self.page_count) {
            if read_page > page_count {
                return Err(PayloadViolation::ReadPageExceedsPageCount);
            }
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.page_count == self.read_page
    }
}

impl Book {
    /// Build a new record from a validated payload
    pub fn from_payload(id: String, payload: BookPayload, now: DateTime<Utc>) -> Self {
        let finished = payload.is_finished();
        Self {
            id,
            name: payload.name.unwrap_or_default(),
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every field except `id` and `inserted_at`
    pub fn apply(&self, payload: BookPayload, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            inserted_at: self.inserted_at,
            ..Self::from_payload(String::new(), payload, now)
        }
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }

    pub fn is_reading(&self) -> bool {
        self.reading.unwrap_or(false)
    }
}

/// Raw query string of the list endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// Integer-ish flag: `0` selects books not being read, `1` books being read
    pub reading: Option<String>,
    /// Integer-ish flag: `0` selects unfinished books, `1` finished ones
    pub finished: Option<String>,
}

/// Parsed list filters, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl From<&BookQuery> for BookFilter {
    fn from(query: &BookQuery) -> Self {
        Self {
            name: query
                .name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(str::to_lowercase),
            reading: query.reading.as_deref().map(parse_flag),
            finished: query.finished.as_deref().map(parse_flag),
        }
    }
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(ref name) = self.name {
            if !book.name.to_lowercase().contains(name.as_str()) {
                return false;
            }
        }
        if let Some(reading) = self.reading {
            if book.is_reading() != reading {
                return false;
            }
        }
        if let Some(finished) = self.finished {
            if book.finished != finished {
                return false;
            }
        }
        true
    }
}

/// Truthiness of a base-10 integer prefix parse.
///
/// Leading whitespace and one sign are skipped, then the longest run of
/// ASCII digits is read. No digits, or digits worth zero, are falsy.
/// `"1abc"` is truthy, `"true"` and `"-0"` are falsy.
pub fn parse_flag(raw: &str) -> bool {
    let trimmed = raw.trim_start();
    let unsigned = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix('-'))
        .unwrap_or(trimmed);

    unsigned
        .chars()
        .take_while(char::is_ascii_digit)
        .any(|c| c != '0')
}
