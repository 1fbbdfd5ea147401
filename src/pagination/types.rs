//! Pagination types
//!
//! The wire envelope, the per-iterator state and the request that gets
//! re-issued with a fresh cursor for every page.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, StringMap};
use serde::de::DeserializeOwned;

/// Envelope field telling whether another page exists
pub const HAS_MORE_FIELD: &str = "has_more";

/// Preferred envelope field carrying the cursor
pub const PAGE_TOKEN_FIELD: &str = "page_token";

/// Fallback envelope field carrying the cursor
pub const NEXT_PAGE_TOKEN_FIELD: &str = "next_page_token";

/// Default query parameter the cursor is sent back in
pub const DEFAULT_CURSOR_PARAM: &str = "page_token";

// ============================================================================
// Page Request
// ============================================================================

/// Parameters for one page fetch
///
/// The cursor lives in `query` under the iterator's cursor parameter and is
/// replaced wholesale before every fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRequest {
    /// Path template parameters
    pub path: StringMap,
    /// Query parameters, cursor included
    pub query: StringMap,
    /// Extra request headers
    pub headers: StringMap,
    /// JSON body
    pub body: Option<JsonValue>,
}

impl PageRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path parameter
    #[must_use]
    pub fn path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Copy of this request carrying `cursor` in `param`
    ///
    /// A `None` cursor removes the parameter.
    pub fn with_cursor(&self, param: &str, cursor: Option<&str>) -> Self {
        let mut request = self.clone();
        match cursor {
            Some(cursor) => {
                request.query.insert(param.to_string(), cursor.to_string());
            }
            None => {
                request.query.remove(param);
            }
        }
        request
    }

    /// Current value of the cursor parameter
    pub fn cursor(&self, param: &str) -> Option<&str> {
        self.query.get(param).map(String::as_str)
    }
}

// ============================================================================
// Page Envelope
// ============================================================================

/// One page split into its pagination metadata and its payload
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope<T = JsonObject> {
    /// Whether the server reported another page
    pub has_more: bool,
    /// Cursor for the next page
    pub cursor: Option<String>,
    /// Business fields with the pagination fields removed
    pub payload: T,
}

impl PageEnvelope<JsonObject> {
    /// Split a response body `{ code, msg, data: {...} }` into an envelope
    ///
    /// Absent, null or non-object `data` gives an empty payload. `has_more`
    /// is coerced by truthiness: missing, `false`, `null`, `0` and `""`
    /// stop. The cursor prefers `page_token` and falls back to
    /// `next_page_token`; empty strings count as absent.
    pub fn from_body(body: &JsonValue) -> Self {
        let data = match body.get("data") {
            Some(JsonValue::Object(map)) => map.clone(),
            _ => JsonObject::new(),
        };
        Self::from_data(data)
    }

    /// Split an already extracted `data` object into an envelope
    pub fn from_data(mut data: JsonObject) -> Self {
        let has_more = data.remove(HAS_MORE_FIELD).is_some_and(|v| truthy(&v));
        let page_token = data.remove(PAGE_TOKEN_FIELD).and_then(token_string);
        let next_page_token = data.remove(NEXT_PAGE_TOKEN_FIELD).and_then(token_string);

        Self {
            has_more,
            cursor: page_token.or(next_page_token),
            payload: data,
        }
    }

    /// Deserialize the payload into a caller type
    pub fn decode<T: DeserializeOwned>(self) -> Result<PageEnvelope<T>> {
        let payload = serde_json::from_value(JsonValue::Object(self.payload))
            .map_err(|e| Error::decode(format!("Invalid page payload: {e}")))?;
        Ok(PageEnvelope {
            has_more: self.has_more,
            cursor: self.cursor,
            payload,
        })
    }
}

/// `false`, `null`, zero and `""` stop paging; any other value continues
fn truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

/// Cursor values are strings; anything else or an empty string is absent
fn token_string(value: JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

// ============================================================================
// Pagination State
// ============================================================================

/// Per-iterator bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Whether another page should be fetched
    pub has_more: bool,
    /// Cursor to send with the next fetch
    pub cursor: Option<String>,
    /// Pages fetched so far
    pub pages: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            has_more: true,
            cursor: None,
            pages: 0,
            done: false,
        }
    }
}

impl PaginationState {
    /// Create a fresh state: more pages expected, no cursor
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page; the cursor is replaced, never merged
    pub fn advance<T>(&mut self, envelope: &PageEnvelope<T>) {
        self.pages += 1;
        self.has_more = envelope.has_more;
        self.cursor.clone_from(&envelope.cursor);
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
        self.has_more = false;
    }

    /// Whether another fetch should be issued
    pub fn should_fetch(&self) -> bool {
        !self.done && self.has_more
    }
}

// ============================================================================
// Page Step
// ============================================================================

/// Outcome of asking an iterator for its next page
#[derive(Debug)]
pub enum PageStep<T> {
    /// A page payload
    Page(T),
    /// No more pages
    Done,
    /// The fetch failed; the iterator is finished
    Failed(Error),
}

impl<T> PageStep<T> {
    /// Check if this is a page
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }

    /// Check if iteration ended normally
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if iteration ended with an error
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Take the page payload, if any
    pub fn page(self) -> Option<T> {
        match self {
            Self::Page(page) => Some(page),
            _ => None,
        }
    }

    /// Transform the page payload
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PageStep<U> {
        match self {
            Self::Page(page) => PageStep::Page(f(page)),
            Self::Done => PageStep::Done,
            Self::Failed(err) => PageStep::Failed(err),
        }
    }
}
