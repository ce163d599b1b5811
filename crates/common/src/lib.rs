//! Shared identifier types for the event association domain.

mod types;

pub use types::{EventId, GuestId, InvitationId};
