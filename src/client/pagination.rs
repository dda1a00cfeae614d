//! Pagination helpers for listing endpoints
//!
//! TestRail 6.7 and later wrap listings in an envelope:
//!
//! ```text
//! {"offset": 0, "limit": 250, "size": 250, "_links": {"next": "...", "prev": null}, "tests": [...]}
//! ```
//!
//! Older installations return a bare JSON array. [`Page::from_value`] accepts
//! both. The client never follows `next` on its own; callers that need every
//! page ask again with a larger offset.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Largest page TestRail serves per request.
pub const MAX_PAGE_SIZE: usize = 250;

/// Offset/limit for a listing request.
///
/// # Example
/// ```ignore
/// let params = PageParams::new().limit(100).offset(200);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl PageParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Render as `&limit=..&offset=..`, appended to an endpoint path.
    pub fn to_query(&self) -> String {
        let mut query = String::new();
        if let Some(limit) = self.limit {
            query.push_str(&format!("&limit={}", limit));
        }
        if let Some(offset) = self.offset {
            query.push_str(&format!("&offset={}", offset));
        }
        query
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Offset of the first item in `items`
    pub offset: usize,
    /// Link to the next page, when the server reported one
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// A page holding everything, with nothing after it
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            offset: 0,
            next: None,
        }
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some() && !self.items.is_empty()
    }

    /// Offset to request for the page after this one
    pub fn next_offset(&self) -> usize {
        self.offset + self.items.len()
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode either listing shape; `key` names the array inside the envelope.
    pub fn from_value(value: Value, key: &str) -> Result<Self, ApiError> {
        match value {
            Value::Array(_) => {
                let items = serde_json::from_value(value).map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse {}: {}", key, e))
                })?;
                Ok(Self::complete(items))
            }
            Value::Object(mut envelope) => {
                let items = envelope.remove(key).ok_or_else(|| {
                    ApiError::InvalidResponse(format!("Missing '{}' in listing response", key))
                })?;
                let items = serde_json::from_value(items).map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse {}: {}", key, e))
                })?;
                let offset = envelope
                    .get("offset")
                    .and_then(Value::as_u64)
                    .unwrap_or(0) as usize;
                let next = envelope
                    .get("_links")
                    .and_then(|links| links.get("next"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Ok(Self {
                    items,
                    offset,
                    next,
                })
            }
            other => Err(ApiError::InvalidResponse(format!(
                "Expected a listing of {}, got: {}",
                key, other
            ))),
        }
    }
}
