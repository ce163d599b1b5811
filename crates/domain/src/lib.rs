//! Domain layer for the event association.
//!
//! This crate provides:
//! - Error codes and the [`OperationResult`] type used by every operation
//! - Entity, aggregate and snapshot traits
//! - The [`VeaEvent`] aggregate with its value objects, invitations and
//!   status state machine

pub mod aggregate;
pub mod config;
pub mod error;
pub mod event;

pub use aggregate::{AggregateRoot, Entity, Snapshot};
pub use config::EventConfig;
pub use error::{ErrorCode, Failure, OperationResult, Violations};
pub use event::{
    EventDescription, EventSnapshot, EventStatus, EventTimeRange, EventTitle, EventVisibility,
    Invitation, InvitationSnapshot, InvitationStatus, MaxGuests, TimeRangeSnapshot, VeaEvent,
};

pub use common::{EventId, GuestId, InvitationId};
