//! Step model: one unit of the tour sequence.
//!
//! The serialized shape is what the presentation driver consumes:
//! `{"intro": "...", "element": "...", "position": "bottom"}` with
//! `element` / `position` omitted for floating (centered) steps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an element of the host document.
///
/// The host decides what the string means (a DOM node id, a test label, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where the tour bubble sits relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    Right,
    Bottom,
    Left,
}

/// One step of the tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDescriptor {
    /// Rich-text (HTML) body of the bubble.
    #[serde(rename = "intro")]
    pub body: String,

    /// Element the step is attached to. `None` renders centered.
    #[serde(rename = "element", default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<ElementRef>,

    #[serde(rename = "position", default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

impl StepDescriptor {
    /// A centered step with no anchor (intro / closing).
    pub fn floating(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            anchor: None,
            placement: None,
        }
    }

    pub fn anchored(body: impl Into<String>, anchor: ElementRef, placement: Placement) -> Self {
        Self {
            body: body.into(),
            anchor: Some(anchor),
            placement: Some(placement),
        }
    }

    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }
}
