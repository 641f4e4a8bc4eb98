//! Completion marker: what the user did with the tour last time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Persisted record of the user's interaction with the tour.
///
/// Stored as a string token under one well-known key. `Absent` is the
/// missing key, never a stored token.
///
/// Transitions:
/// - Absent -> Skipped (declined with "don't show again")
/// - Absent | Skipped -> Completed (full traversal)
/// - any -> Absent only through an explicit restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionMarker {
    #[default]
    Absent,
    Skipped,
    Completed,
}

/// A stored value that is not one of the known tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown completion token: {0:?}")]
pub struct UnknownToken(pub String);

impl CompletionMarker {
    /// Token written to storage, `None` for `Absent`.
    pub fn token(self) -> Option<&'static str> {
        match self {
            Self::Absent => None,
            Self::Skipped => Some("skipped"),
            Self::Completed => Some("completed"),
        }
    }

    /// Parse a raw storage value (`None` = key missing).
    pub fn from_token(raw: Option<&str>) -> Result<Self, UnknownToken> {
        match raw {
            None => Ok(Self::Absent),
            Some("skipped") => Ok(Self::Skipped),
            Some("completed") => Ok(Self::Completed),
            Some(other) => Err(UnknownToken(other.to_string())),
        }
    }

    /// Only a user who never interacted with the tour is offered it.
    pub fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for CompletionMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Absent => "absent",
            Self::Skipped => "skipped",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}
