//! Cursor pagination shared by every paginated call.
//!
//! A page is bounded by two opaque cursors. Asking for `Before` the oldest
//! cursor walks towards older items, asking for `After` the newest cursor
//! walks back towards newer ones.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::domain::filters::ParseFilterError;

/// Which edge of a cursor the requested page should extend from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Older than the cursor.
    Before,
    /// Newer than the cursor.
    After,
    /// Server default: first page, most recent first.
    #[default]
    Unspecified,
}

impl Direction {
    /// Value understood by the desktop API, `None` when the field must be omitted.
    pub fn api_value(self) -> Option<&'static str> {
        match self {
            Self::Before => Some("before"),
            Self::After => Some("after"),
            Self::Unspecified => None,
        }
    }

    pub fn is_unspecified(self) -> bool {
        self == Self::Unspecified
    }
}

impl FromStr for Direction {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "" => Ok(Self::Unspecified),
            other => Err(ParseFilterError::new("direction", other, "before|after")),
        }
    }
}

/// Opaque pagination token. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wraps a raw token, treating an empty string as "no cursor".
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pagination intent supplied by the caller and forwarded verbatim.
///
/// Direction and cursor are orthogonal: either may be present without the
/// other and no combination is rejected here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub cursor: Option<Cursor>,
    pub direction: Direction,
}

impl PageRequest {
    pub fn before(cursor: Cursor) -> Self {
        Self {
            cursor: Some(cursor),
            direction: Direction::Before,
        }
    }

    pub fn after(cursor: Cursor) -> Self {
        Self {
            cursor: Some(cursor),
            direction: Direction::After,
        }
    }

    /// True when the caller supplied any pagination control at all.
    pub fn is_specified(&self) -> bool {
        self.cursor.is_some() || !self.direction.is_unspecified()
    }
}

/// One page of results in server-defined order.
///
/// `has_more` and the cursors are independent of `items`: an empty page is
/// not assumed to end pagination, nor to lack cursors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_cursor: Option<Cursor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_cursor: Option<Cursor>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
            oldest_cursor: None,
            newest_cursor: None,
        }
    }
}

impl<T> Page<T> {
    /// Request for the page immediately older than this one.
    pub fn older(&self) -> Option<PageRequest> {
        self.oldest_cursor.clone().map(PageRequest::before)
    }

    /// Request for the page immediately newer than this one.
    pub fn newer(&self) -> Option<PageRequest> {
        self.newest_cursor.clone().map(PageRequest::after)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_more: self.has_more,
            oldest_cursor: self.oldest_cursor,
            newest_cursor: self.newest_cursor,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
