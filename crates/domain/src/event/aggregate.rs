//! Event aggregate implementation.

use chrono::{DateTime, Utc};
use common::{EventId, GuestId};

use crate::aggregate::{AggregateRoot, Entity, Snapshot};
use crate::config::EventConfig;
use crate::error::{ErrorCode, Failure, OperationResult, Violations};

use super::snapshot::{EventSnapshot, InvitationSnapshot, TimeRangeSnapshot};
use super::{
    EventDescription, EventStatus, EventTimeRange, EventTitle, EventVisibility, Invitation,
    InvitationStatus, MaxGuests,
};

/// Event aggregate root.
///
/// Owns the event details, its invitations and its direct participants.
/// Every change goes through the methods below. A failed operation leaves the
/// event untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VeaEvent {
    id: EventId,
    title: Option<EventTitle>,
    description: Option<EventDescription>,
    time_range: Option<EventTimeRange>,
    status: EventStatus,
    visibility: Option<EventVisibility>,
    max_guests: MaxGuests,
    location_max_capacity: u32,

    /// Invitations, at most one per guest, in invitation order.
    invitations: Vec<Invitation>,

    /// Guests who joined directly without an invitation, in join order.
    guest_list: Vec<GuestId>,
}

impl Entity for VeaEvent {
    type Id = EventId;

    fn id(&self) -> EventId {
        self.id
    }
}

impl AggregateRoot for VeaEvent {
    fn aggregate_type() -> &'static str {
        "VeaEvent"
    }
}

impl Snapshot for VeaEvent {
    type State = EventSnapshot;

    fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            id: self.id,
            title: self.title.as_ref().map(|t| t.as_str().to_string()),
            description: self.description.as_ref().map(|d| d.as_str().to_string()),
            time_range: self.time_range.map(|r| TimeRangeSnapshot {
                start: r.start(),
                end: r.end(),
            }),
            visibility: self.visibility,
            max_guests: self.max_guests.value(),
            status: self.status,
            location_max_capacity: self.location_max_capacity,
            guest_list: self.guest_list.clone(),
            invitations: self
                .invitations
                .iter()
                .map(|i| InvitationSnapshot {
                    id: i.id(),
                    guest_id: i.guest_id(),
                    status: i.status(),
                })
                .collect(),
        }
    }

    #[tracing::instrument(skip(state), fields(event_id = %state.id))]
    fn restore(state: EventSnapshot) -> OperationResult<Self> {
        let mut violations = Violations::new();

        let title = violations
            .absorb(state.title.clone().map(EventTitle::create).transpose())
            .flatten();
        let description = violations
            .absorb(
                state
                    .description
                    .clone()
                    .map(EventDescription::create)
                    .transpose(),
            )
            .flatten();
        let time_range = violations
            .absorb(
                state
                    .time_range
                    .map(|r| EventTimeRange::create(r.start, r.end))
                    .transpose(),
            )
            .flatten();
        state.check_membership(&mut violations);

        if let Err(failure) = violations.into_result() {
            tracing::debug!(errors = %failure, "snapshot rejected");
            return Err(failure);
        }

        Ok(Self {
            id: state.id,
            title,
            description,
            time_range,
            status: state.status,
            visibility: state.visibility,
            max_guests: MaxGuests::new(state.max_guests),
            location_max_capacity: state.location_max_capacity,
            invitations: state
                .invitations
                .into_iter()
                .map(|i| Invitation::restore(i.id, i.guest_id, i.status))
                .collect(),
            guest_list: state.guest_list,
        })
    }
}

// Query methods
impl VeaEvent {
    /// Returns the title, if set.
    pub fn title(&self) -> Option<&EventTitle> {
        self.title.as_ref()
    }

    /// Returns the description, if set.
    pub fn description(&self) -> Option<&EventDescription> {
        self.description.as_ref()
    }

    /// Returns the time range, if set.
    pub fn time_range(&self) -> Option<&EventTimeRange> {
        self.time_range.as_ref()
    }

    /// Returns the current status.
    pub fn status(&self) -> EventStatus {
        self.status
    }

    /// Returns the visibility, if set.
    pub fn visibility(&self) -> Option<EventVisibility> {
        self.visibility
    }

    /// Returns the maximum number of guests.
    pub fn max_guests(&self) -> MaxGuests {
        self.max_guests
    }

    /// Returns the capacity of the event location.
    pub fn location_max_capacity(&self) -> u32 {
        self.location_max_capacity
    }

    /// Returns all invitations in invitation order.
    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    /// Returns the directly joined guests in join order.
    pub fn guest_list(&self) -> &[GuestId] {
        &self.guest_list
    }

    /// Returns the invitation held by a guest.
    pub fn invitation_for(&self, guest_id: GuestId) -> Option<&Invitation> {
        self.invitations.iter().find(|i| i.guest_id() == guest_id)
    }

    /// Returns true if the guest holds an approved invitation.
    pub fn has_accepted_invitation(&self, guest_id: GuestId) -> bool {
        self.invitation_for(guest_id)
            .is_some_and(Invitation::is_approved)
    }

    /// Returns the number of places taken: direct participants plus approved
    /// invitations.
    pub fn participant_count(&self) -> usize {
        let approved = self.invitations.iter().filter(|i| i.is_approved()).count();
        self.guest_list.len() + approved
    }

    /// Returns true if no place is left.
    pub fn is_full(&self) -> bool {
        self.participant_count() >= self.max_guests.value() as usize
    }
}

// Command methods
impl VeaEvent {
    /// Creates a new draft event with default details.
    pub fn create() -> Self {
        Self::create_with(&EventConfig::default())
    }

    /// Creates a new draft event using the given configuration.
    pub fn create_with(config: &EventConfig) -> Self {
        let event = Self {
            id: EventId::new(),
            title: Some(EventTitle::default()),
            description: Some(EventDescription::default()),
            time_range: Some(EventTimeRange::default()),
            status: EventStatus::Draft,
            visibility: Some(EventVisibility::Private),
            max_guests: MaxGuests::default(),
            location_max_capacity: config.location_max_capacity,
            invitations: Vec::new(),
            guest_list: Vec::new(),
        };
        tracing::debug!(event_id = %event.id, "event created");
        event
    }

    /// Changes the title. The event goes back to draft.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn update_title(&mut self, title: EventTitle) -> OperationResult {
        if !self.status.can_edit_details() {
            return reject("update_title", ErrorCode::CannotModifyActiveOrCancelled.into());
        }
        self.title = Some(title);
        self.set_status(EventStatus::Draft);
        Ok(())
    }

    /// Changes the description. The event goes back to draft.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn update_description(&mut self, description: EventDescription) -> OperationResult {
        if !self.status.can_edit_details() {
            return reject(
                "update_description",
                ErrorCode::CannotModifyActiveOrCancelled.into(),
            );
        }
        self.description = Some(description);
        self.set_status(EventStatus::Draft);
        Ok(())
    }

    /// Changes the time range. The status is kept.
    ///
    /// The status guard and the range validation are both reported.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn update_time_range(&mut self, time_range: EventTimeRange) -> OperationResult {
        let mut violations = Violations::new();
        if !self.status.can_edit_details() {
            violations.push(ErrorCode::CannotModifyActiveOrCancelled);
        }
        violations.absorb(EventTimeRange::validate(Some(&time_range)));

        if let Err(failure) = violations.into_result() {
            return reject("update_time_range", failure);
        }

        self.time_range = Some(time_range);
        Ok(())
    }

    /// Changes the visibility.
    ///
    /// Making a public event private sends it back to draft.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn update_visibility(&mut self, visibility: EventVisibility) -> OperationResult {
        if self.status.is_terminal() {
            return reject(
                "update_visibility",
                Failure::new(ErrorCode::UpdateVisibilityImpossible)
                    .combine([ErrorCode::AlreadyCancelled]),
            );
        }

        if self.visibility == Some(EventVisibility::Public)
            && visibility == EventVisibility::Private
        {
            self.set_status(EventStatus::Draft);
        }
        self.visibility = Some(visibility);
        Ok(())
    }

    /// Changes the maximum number of guests.
    ///
    /// A ready event goes back to draft.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn update_max_guests(&mut self, max_guests: MaxGuests) -> OperationResult {
        if self.status == EventStatus::Active && max_guests < self.max_guests {
            return reject(
                "update_max_guests",
                Failure::new(ErrorCode::DecreaseMaxGuestsImpossible)
                    .combine([ErrorCode::AlreadyActive]),
            );
        }

        if self.status == EventStatus::Cancelled {
            return reject(
                "update_max_guests",
                Failure::new(ErrorCode::UpdateMaxGuestsImpossible)
                    .combine([ErrorCode::AlreadyCancelled]),
            );
        }

        if max_guests.value() > self.location_max_capacity {
            return reject(
                "update_max_guests",
                Failure::new(ErrorCode::UpdateMaxGuestsImpossible)
                    .combine([ErrorCode::MaxGuestsAboveLocationCapacity]),
            );
        }

        let mut violations = Violations::new();
        violations.absorb(MaxGuests::validate(max_guests.value()));
        if let Err(failure) = violations.into_result() {
            return reject("update_max_guests", failure);
        }

        self.max_guests = max_guests;
        if self.status == EventStatus::Ready {
            self.set_status(EventStatus::Draft);
        }
        Ok(())
    }

    /// Runs the readiness checks and marks the event ready.
    ///
    /// Active and cancelled events fail with a single error. Otherwise every
    /// failed check is reported.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn ready(&mut self) -> OperationResult {
        match self.status {
            EventStatus::Active => return reject("ready", ErrorCode::AlreadyActive.into()),
            EventStatus::Cancelled => return reject("ready", ErrorCode::AlreadyCancelled.into()),
            EventStatus::Draft | EventStatus::Ready => {}
        }

        let now = Utc::now();
        let mut violations = Violations::new();

        if self
            .title
            .as_ref()
            .is_none_or(EventTitle::is_default_or_empty)
        {
            violations.push(ErrorCode::TitleCannotBeDefaultOrEmpty);
        }
        if self
            .description
            .as_ref()
            .is_none_or(EventDescription::is_default)
        {
            violations.push(ErrorCode::DescriptionCannotBeDefault);
        }
        if self
            .time_range
            .as_ref()
            .is_some_and(EventTimeRange::is_default)
        {
            violations.push(ErrorCode::TimeRangeCannotBeDefault);
        }
        if self.time_range.is_none() {
            violations.push(ErrorCode::TimeRangeMissing);
        }
        if self.has_started(now) {
            violations.push(ErrorCode::CannotReadyPastEvent);
        }
        if self.visibility.is_none() {
            violations.push(ErrorCode::VisibilityMustBeSet);
        }
        violations.absorb(MaxGuests::validate(self.max_guests.value()));

        if let Err(failure) = violations.into_result() {
            return reject("ready", failure);
        }

        self.set_status(EventStatus::Ready);
        Ok(())
    }

    /// Activates the event, readying it first if needed.
    ///
    /// When readying fails, the error list starts with
    /// [`ErrorCode::ActivateFailure`] followed by every readiness error.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn activate(&mut self) -> OperationResult {
        if self.status == EventStatus::Active {
            return Ok(());
        }

        if self.status != EventStatus::Ready {
            if let Err(failure) = self.ready() {
                return reject("activate", failure.prepend(ErrorCode::ActivateFailure));
            }
        }

        self.set_status(EventStatus::Active);
        Ok(())
    }

    /// Cancels the event. Cancellation is final.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn cancel(&mut self) -> OperationResult {
        if self.status.is_terminal() {
            return reject("cancel", ErrorCode::AlreadyCancelled.into());
        }
        self.set_status(EventStatus::Cancelled);
        Ok(())
    }

    /// Invites a guest. The invitation starts pending.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn invite_guest(&mut self, guest_id: GuestId) -> OperationResult {
        if self.invitation_index(guest_id).is_some() {
            return reject("invite_guest", ErrorCode::GuestAlreadyInvited.into());
        }

        if self.guest_list.contains(&guest_id) {
            return reject("invite_guest", ErrorCode::GuestAlreadyJoined.into());
        }

        if self.is_full() {
            return reject("invite_guest", ErrorCode::NoMoreRoom.into());
        }

        // Capacity is checked before status: a full draft event reports NoMoreRoom.
        if !self.status.can_invite() {
            return reject(
                "invite_guest",
                ErrorCode::CanOnlyInviteToReadyOrActiveEvent.into(),
            );
        }

        self.invitations.push(Invitation::pending(guest_id));
        tracing::debug!(%guest_id, "guest invited");
        Ok(())
    }

    /// Accepts the guest's invitation, taking a place at the event.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn accept_invitation(&mut self, guest_id: GuestId) -> OperationResult {
        let Some(index) = self.invitation_index(guest_id) else {
            return reject("accept_invitation", ErrorCode::InvitationNotFound.into());
        };

        if self.status == EventStatus::Cancelled {
            return reject(
                "accept_invitation",
                ErrorCode::CancelledEventsCannotBeJoined.into(),
            );
        }

        if self.status.is_unstarted() {
            return reject(
                "accept_invitation",
                ErrorCode::JoinUnstartedEventImpossible.into(),
            );
        }

        if self.has_started(Utc::now()) {
            return reject("accept_invitation", ErrorCode::TooLate.into());
        }

        match self.invitations[index].status() {
            InvitationStatus::Approved => {
                return reject(
                    "accept_invitation",
                    ErrorCode::InvitationAlreadyApproved.into(),
                );
            }
            InvitationStatus::Rejected => {
                return reject(
                    "accept_invitation",
                    ErrorCode::InvitationAlreadyRejected.into(),
                );
            }
            InvitationStatus::Pending => {}
        }

        if self.is_full() {
            return reject("accept_invitation", ErrorCode::NoMoreRoom.into());
        }

        if let Err(failure) = self.invitations[index].approve() {
            return reject("accept_invitation", failure);
        }
        tracing::debug!(%guest_id, "invitation accepted");
        Ok(())
    }

    /// Declines the guest's invitation.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn decline_invitation(&mut self, guest_id: GuestId) -> OperationResult {
        let Some(index) = self.invitation_index(guest_id) else {
            return reject("decline_invitation", ErrorCode::InvitationNotFound.into());
        };

        if self.status == EventStatus::Cancelled {
            return reject(
                "decline_invitation",
                ErrorCode::DeclineImpossibleOnCancelledEvent.into(),
            );
        }

        if let Err(failure) = self.invitations[index].reject() {
            return reject("decline_invitation", failure);
        }
        tracing::debug!(%guest_id, "invitation declined");
        Ok(())
    }

    /// Joins a public, active event directly.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn participate(&mut self, guest_id: GuestId) -> OperationResult {
        if self.guest_list.contains(&guest_id) {
            return reject("participate", ErrorCode::GuestAlreadyJoined.into());
        }

        if self.visibility != Some(EventVisibility::Public) {
            return reject("participate", ErrorCode::EventIsNotPublic.into());
        }

        if self.status != EventStatus::Active {
            return reject("participate", ErrorCode::OnlyActiveEventsCanBeJoined.into());
        }

        if self.is_full() {
            return reject("participate", ErrorCode::NoMoreRoom.into());
        }

        if self.has_started(Utc::now()) {
            return reject("participate", ErrorCode::TooLate.into());
        }

        // Invited guests take their place through the invitation.
        if self.invitation_index(guest_id).is_some() {
            return reject("participate", ErrorCode::GuestAlreadyInvited.into());
        }

        self.guest_list.push(guest_id);
        tracing::debug!(%guest_id, "guest joined");
        Ok(())
    }

    /// Withdraws a guest's direct participation.
    ///
    /// Only the start time is checked; removing a guest who is not on the
    /// list succeeds without change.
    #[tracing::instrument(skip(self), fields(event_id = %self.id))]
    pub fn cancel_participation(&mut self, guest_id: GuestId) -> OperationResult {
        if self.has_started(Utc::now()) {
            return reject(
                "cancel_participation",
                ErrorCode::CannotModifyActiveOrCancelled.into(),
            );
        }

        self.guest_list.retain(|guest| *guest != guest_id);
        Ok(())
    }
}

// Internal helpers
impl VeaEvent {
    fn invitation_index(&self, guest_id: GuestId) -> Option<usize> {
        self.invitations
            .iter()
            .position(|i| i.guest_id() == guest_id)
    }

    fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.time_range
            .as_ref()
            .is_some_and(|range| range.has_started(now))
    }

    fn set_status(&mut self, status: EventStatus) {
        if self.status == status {
            return;
        }
        let from = self.status;
        self.status = status;
        metrics::counter!(
            "vea_event_status_transitions_total",
            "from" => from.as_str(),
            "to" => status.as_str()
        )
        .increment(1);
        tracing::debug!(%from, to = %status, "event status changed");
    }
}

/// Records a rejected operation and returns its failure.
fn reject(operation: &'static str, failure: Failure) -> OperationResult {
    metrics::counter!("vea_event_operation_rejections_total", "operation" => operation)
        .increment(1);
    tracing::debug!(
        operation,
        first = %failure.first(),
        count = failure.len(),
        errors = %failure,
        "operation rejected"
    );
    Err(failure)
}

impl std::fmt::Display for VeaEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let title = self.title.as_ref().map_or("", EventTitle::as_str);
        write!(f, "{} ({})", title, self.status)
    }
}
