//! Invitation entity.

use common::{GuestId, InvitationId};
use serde::{Deserialize, Serialize};

use crate::aggregate::Entity;
use crate::error::{ErrorCode, OperationResult};

/// The status of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InvitationStatus {
    /// Waiting for the guest's answer.
    #[default]
    Pending,

    /// The guest accepted.
    Approved,

    /// The guest declined.
    Rejected,
}

impl InvitationStatus {
    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "Pending",
            InvitationStatus::Approved => "Approved",
            InvitationStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One guest's invitation to an event.
///
/// Owned by the event aggregate; the status only changes through
/// [`Invitation::approve`] and [`Invitation::reject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    id: InvitationId,
    guest_id: GuestId,
    status: InvitationStatus,
}

impl Invitation {
    /// Creates a pending invitation for a guest.
    pub fn pending(guest_id: GuestId) -> Self {
        Self {
            id: InvitationId::new(),
            guest_id,
            status: InvitationStatus::Pending,
        }
    }

    /// Rebuilds an invitation from stored fields.
    pub(crate) fn restore(id: InvitationId, guest_id: GuestId, status: InvitationStatus) -> Self {
        Self {
            id,
            guest_id,
            status,
        }
    }

    /// Returns the invited guest.
    pub fn guest_id(&self) -> GuestId {
        self.guest_id
    }

    /// Returns the current status.
    pub fn status(&self) -> InvitationStatus {
        self.status
    }

    /// Returns true if the guest accepted.
    pub fn is_approved(&self) -> bool {
        self.status == InvitationStatus::Approved
    }

    /// Marks the invitation as accepted.
    pub fn approve(&mut self) -> OperationResult {
        if self.status == InvitationStatus::Approved {
            return Err(ErrorCode::InvitationAlreadyApproved.into());
        }
        self.status = InvitationStatus::Approved;
        Ok(())
    }

    /// Marks the invitation as declined.
    pub fn reject(&mut self) -> OperationResult {
        if self.status == InvitationStatus::Rejected {
            return Err(ErrorCode::InvitationAlreadyRejected.into());
        }
        self.status = InvitationStatus::Rejected;
        Ok(())
    }
}

impl Entity for Invitation {
    type Id = InvitationId;

    fn id(&self) -> InvitationId {
        self.id
    }
}
