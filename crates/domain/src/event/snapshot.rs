//! Plain snapshot of an event, used to persist and rebuild the aggregate.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use common::{EventId, GuestId, InvitationId};
use serde::{Deserialize, Serialize};

use crate::aggregate::Snapshot;
use crate::error::{ErrorCode, Violations};

use super::{EventStatus, EventVisibility, InvitationStatus, VeaEvent};

/// Every field of an event aggregate.
///
/// Optional fields are `None` when unset. Values are stored as given;
/// [`VeaEvent::restore`](crate::Snapshot::restore) validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub id: EventId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub time_range: Option<TimeRangeSnapshot>,
    pub visibility: Option<EventVisibility>,
    pub max_guests: u32,
    #[serde(default)]
    pub status: EventStatus,
    pub location_max_capacity: u32,
    pub guest_list: Vec<GuestId>,
    pub invitations: Vec<InvitationSnapshot>,
}

impl Default for EventSnapshot {
    /// Snapshot of a freshly created event.
    fn default() -> Self {
        VeaEvent::create().snapshot()
    }
}

/// Start and end of a stored time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeSnapshot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A stored invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationSnapshot {
    pub id: InvitationId,
    pub guest_id: GuestId,
    pub status: InvitationStatus,
}

impl EventSnapshot {
    /// Checks that every guest appears at most once across both lists.
    pub(super) fn check_membership(&self, violations: &mut Violations) {
        let mut joined = HashSet::with_capacity(self.guest_list.len());
        let mut duplicate_guest = false;
        for guest in &self.guest_list {
            duplicate_guest |= !joined.insert(*guest);
        }
        if duplicate_guest {
            violations.push(ErrorCode::GuestAlreadyJoined);
        }

        let mut invited = HashSet::with_capacity(self.invitations.len());
        let mut duplicate_invitation = false;
        for invitation in &self.invitations {
            duplicate_invitation |= !invited.insert(invitation.guest_id);
        }
        if duplicate_invitation {
            violations.push(ErrorCode::GuestAlreadyInvited);
        }

        if !joined.is_disjoint(&invited) {
            violations.push(ErrorCode::GuestInvitedAndJoined);
        }
    }
}
