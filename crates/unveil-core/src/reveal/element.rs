use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to an animated element on the page
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Visible state of a watched element. Only ever moves Hidden -> Revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// Notification that an element's visible fraction crossed a threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEvent {
    pub id: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the element, 0.0-1.0
    pub ratio: f64,
}

impl IntersectionEvent {
    /// Element is now intersecting with the given visible ratio
    pub fn entering(id: impl Into<ElementId>, ratio: f64) -> Self {
        Self {
            id: id.into(),
            is_intersecting: true,
            ratio,
        }
    }

    /// Element left the viewport
    pub fn leaving(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

/// Identifies one scheduled reveal; never reused within a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);
