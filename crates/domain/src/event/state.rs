//! Event status state machine.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, OperationResult};

/// The status of an event in its lifecycle.
///
/// State transitions:
/// ```text
/// Draft ◄──► Ready ──► Active
///   │          │          │
///   └──────────┴──────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventStatus {
    /// Event is being prepared; details can be edited.
    #[default]
    Draft,

    /// Event passed the readiness checks and can be activated.
    Ready,

    /// Event is open for guests; details are frozen.
    Active,

    /// Event was cancelled (terminal state).
    Cancelled,
}

impl EventStatus {
    /// Returns true if title, description and time range can be edited.
    pub fn can_edit_details(&self) -> bool {
        matches!(self, EventStatus::Draft | EventStatus::Ready)
    }

    /// Returns true if guests can be invited in this status.
    pub fn can_invite(&self) -> bool {
        matches!(self, EventStatus::Ready | EventStatus::Active)
    }

    /// Returns true if the event has not been activated yet.
    pub fn is_unstarted(&self) -> bool {
        matches!(self, EventStatus::Draft | EventStatus::Ready)
    }

    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "Draft",
            EventStatus::Ready => "Ready",
            EventStatus::Active => "Active",
            EventStatus::Cancelled => "Cancelled",
        }
    }

    /// Parses a status from its name, ignoring case.
    pub fn from_name(name: &str) -> OperationResult<Self> {
        [
            EventStatus::Draft,
            EventStatus::Ready,
            EventStatus::Active,
            EventStatus::Cancelled,
        ]
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| ErrorCode::UnknownStatus.into())
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
