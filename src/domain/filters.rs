use std::str::FromStr;

use thiserror::Error;

/// A free-form filter string that does not belong to the API vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} {value:?} (expected {expected})")]
pub struct ParseFilterError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseFilterError {
    pub fn new(field: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            field,
            value: value.to_owned(),
            expected,
        }
    }
}

/// Server-side inbox bucket used to narrow a chat search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inbox {
    Primary,
    LowPriority,
    Archive,
    #[default]
    Unset,
}

impl Inbox {
    pub fn api_value(self) -> Option<&'static str> {
        match self {
            Self::Primary => Some("primary"),
            Self::LowPriority => Some("low-priority"),
            Self::Archive => Some("archive"),
            Self::Unset => None,
        }
    }
}

impl FromStr for Inbox {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "primary" => Ok(Self::Primary),
            "low-priority" => Ok(Self::LowPriority),
            "archive" => Ok(Self::Archive),
            "" => Ok(Self::Unset),
            other => Err(ParseFilterError::new(
                "inbox",
                other,
                "primary|low-priority|archive",
            )),
        }
    }
}

/// Chat kind filter. `Direct` is called `single` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatTypeFilter {
    Direct,
    Group,
    Any,
    #[default]
    Unset,
}

impl ChatTypeFilter {
    pub fn api_value(self) -> Option<&'static str> {
        match self {
            Self::Direct => Some("single"),
            Self::Group => Some("group"),
            Self::Any => Some("any"),
            Self::Unset => None,
        }
    }
}

impl FromStr for ChatTypeFilter {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "direct" => Ok(Self::Direct),
            "group" => Ok(Self::Group),
            "any" => Ok(Self::Any),
            "" => Ok(Self::Unset),
            other => Err(ParseFilterError::new("type", other, "direct|group|any")),
        }
    }
}

/// What a chat search query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    Titles,
    Participants,
    #[default]
    Unset,
}

impl SearchScope {
    pub fn api_value(self) -> Option<&'static str> {
        match self {
            Self::Titles => Some("titles"),
            Self::Participants => Some("participants"),
            Self::Unset => None,
        }
    }
}

impl FromStr for SearchScope {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "titles" => Ok(Self::Titles),
            "participants" => Ok(Self::Participants),
            "" => Ok(Self::Unset),
            other => Err(ParseFilterError::new("scope", other, "titles|participants")),
        }
    }
}
