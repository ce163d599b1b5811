//! Event aggregate and related types.

mod aggregate;
mod invitation;
mod snapshot;
mod state;
mod value_objects;

pub use aggregate::VeaEvent;
pub use invitation::{Invitation, InvitationStatus};
pub use snapshot::{EventSnapshot, InvitationSnapshot, TimeRangeSnapshot};
pub use state::EventStatus;
pub use value_objects::{EventDescription, EventTimeRange, EventTitle, EventVisibility, MaxGuests};
