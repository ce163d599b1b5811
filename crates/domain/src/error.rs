//! Domain error codes and the operation result type.
//!
//! Rule violations are reported as values. A failed operation carries a
//! [`Failure`], an ordered list holding at least one [`ErrorCode`]. The order is
//! the order in which the operation evaluated its guards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a domain operation.
pub type OperationResult<T = ()> = Result<T, Failure>;

/// A single violated domain rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum ErrorCode {
    // Status guards
    /// The event is active or cancelled and its details are frozen.
    #[error("Active or cancelled events cannot be modified")]
    CannotModifyActiveOrCancelled,

    /// The event is already active.
    #[error("The event is already active")]
    AlreadyActive,

    /// The event is already cancelled.
    #[error("The event is already cancelled")]
    AlreadyCancelled,

    /// The status name is not one of Draft, Ready, Active or Cancelled.
    #[error("Unknown event status")]
    UnknownStatus,

    // Title and description
    /// The title is unset or still the default working title.
    #[error("The title must be set and cannot be the default")]
    TitleCannotBeDefaultOrEmpty,

    /// The description is longer than 250 characters.
    #[error("The description cannot exceed 250 characters")]
    DescriptionTooLong,

    /// The description is unset or empty.
    #[error("The description must be set and cannot be empty")]
    DescriptionCannotBeDefault,

    // Time range
    /// No time range has been provided.
    #[error("The time range is missing")]
    TimeRangeMissing,

    /// The time range is still the default placeholder.
    #[error("The time range must be set and cannot be the default")]
    TimeRangeCannotBeDefault,

    /// The end of the time range is not after its start.
    #[error("The event must end after it starts")]
    TimeRangeEndBeforeStart,

    /// The event is shorter than the minimum duration.
    #[error("The event must last at least one hour")]
    TimeRangeTooShort,

    /// The event is longer than the maximum duration.
    #[error("The event cannot last more than ten hours")]
    TimeRangeTooLong,

    /// The event starts in the past.
    #[error("An event starting in the past cannot be readied")]
    CannotReadyPastEvent,

    // Visibility
    /// The visibility has not been chosen.
    #[error("The visibility must be set")]
    VisibilityMustBeSet,

    /// The visibility cannot be changed.
    #[error("The visibility cannot be updated")]
    UpdateVisibilityImpossible,

    // Guest capacity
    /// The maximum number of guests is below 2.
    #[error("The maximum number of guests cannot be less than 2")]
    MaxGuestsTooSmall,

    /// The maximum number of guests is above 50.
    #[error("The maximum number of guests cannot exceed 50")]
    MaxGuestsTooGreat,

    /// The maximum number of guests of an active event cannot shrink.
    #[error("The maximum number of guests cannot be decreased")]
    DecreaseMaxGuestsImpossible,

    /// The maximum number of guests cannot be changed.
    #[error("The maximum number of guests cannot be updated")]
    UpdateMaxGuestsImpossible,

    /// The maximum number of guests exceeds what the location holds.
    #[error("The maximum number of guests exceeds the location capacity")]
    MaxGuestsAboveLocationCapacity,

    // Lifecycle
    /// Activation failed because the event could not be readied.
    #[error("The event could not be activated")]
    ActivateFailure,

    // Membership
    /// The guest already holds an invitation.
    #[error("The guest has already been invited")]
    GuestAlreadyInvited,

    /// The guest already participates.
    #[error("The guest has already joined the event")]
    GuestAlreadyJoined,

    /// The guest is both invited and a direct participant.
    #[error("The guest cannot be both invited and a direct participant")]
    GuestInvitedAndJoined,

    /// The event has no free places left.
    #[error("There is no more room at the event")]
    NoMoreRoom,

    /// Invitations require a ready or active event.
    #[error("Guests can only be invited to ready or active events")]
    CanOnlyInviteToReadyOrActiveEvent,

    /// The guest holds no invitation.
    #[error("No invitation found for the guest")]
    InvitationNotFound,

    /// A cancelled event cannot be joined.
    #[error("Cancelled events cannot be joined")]
    CancelledEventsCannotBeJoined,

    /// The event has not been activated yet.
    #[error("An event that has not been activated cannot be joined")]
    JoinUnstartedEventImpossible,

    /// The event has already started.
    #[error("The event has already started")]
    TooLate,

    /// The invitation is already approved.
    #[error("The invitation has already been approved")]
    InvitationAlreadyApproved,

    /// The invitation is already rejected.
    #[error("The invitation has already been rejected")]
    InvitationAlreadyRejected,

    /// Invitations to a cancelled event cannot be declined.
    #[error("Invitations to a cancelled event cannot be declined")]
    DeclineImpossibleOnCancelledEvent,

    /// Direct participation requires a public event.
    #[error("The event is not public")]
    EventIsNotPublic,

    /// Direct participation requires an active event.
    #[error("Only active events can be joined")]
    OnlyActiveEventsCanBeJoined,
}

/// A failed operation: one or more violated rules, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ErrorCode>", into = "Vec<ErrorCode>")]
pub struct Failure {
    codes: Vec<ErrorCode>,
}

impl Failure {
    /// Creates a failure holding a single error code.
    pub fn new(code: ErrorCode) -> Self {
        Self { codes: vec![code] }
    }

    /// Creates a failure from a list of codes.
    ///
    /// Returns `None` when the list is empty, since a failure always carries
    /// at least one code.
    pub fn from_codes(codes: Vec<ErrorCode>) -> Option<Self> {
        if codes.is_empty() {
            None
        } else {
            Some(Self { codes })
        }
    }

    /// Returns the error codes in evaluation order.
    pub fn codes(&self) -> &[ErrorCode] {
        &self.codes
    }

    /// Returns the first error code.
    pub fn first(&self) -> ErrorCode {
        self.codes[0]
    }

    /// Returns true if the failure contains the given code.
    pub fn contains(&self, code: ErrorCode) -> bool {
        self.codes.contains(&code)
    }

    /// Returns the number of error codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Consumes the failure and returns its codes.
    pub fn into_codes(self) -> Vec<ErrorCode> {
        self.codes
    }

    /// Returns this failure with `code` inserted in front of the existing codes.
    pub fn prepend(mut self, code: ErrorCode) -> Self {
        self.codes.insert(0, code);
        self
    }

    /// Returns this failure with `codes` appended after the existing codes.
    pub fn combine(mut self, codes: impl IntoIterator<Item = ErrorCode>) -> Self {
        self.codes.extend(codes);
        self
    }
}

impl From<ErrorCode> for Failure {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

impl From<Failure> for Vec<ErrorCode> {
    fn from(failure: Failure) -> Self {
        failure.codes
    }
}

impl TryFrom<Vec<ErrorCode>> for Failure {
    type Error = &'static str;

    fn try_from(codes: Vec<ErrorCode>) -> Result<Self, Self::Error> {
        Self::from_codes(codes).ok_or("a failure must contain at least one error code")
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, code) in self.codes.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{code}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Failure {}

/// Collects every violated rule of an accumulating check.
#[derive(Debug, Default)]
pub struct Violations {
    codes: Vec<ErrorCode>,
}

impl Violations {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violated rule.
    pub fn push(&mut self, code: ErrorCode) {
        self.codes.push(code);
    }

    /// Records the codes of a failed result and returns the value of a
    /// successful one.
    pub fn absorb<T>(&mut self, result: OperationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(failure) => {
                self.codes.extend(failure.into_codes());
                None
            }
        }
    }

    /// Returns true if no rule was violated.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Converts the collected codes into a result.
    pub fn into_result(self) -> OperationResult {
        match Failure::from_codes(self.codes) {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_keeps_order() {
        let failure = Failure::new(ErrorCode::TooLate).combine([ErrorCode::NoMoreRoom]);
        assert_eq!(failure.codes(), &[ErrorCode::TooLate, ErrorCode::NoMoreRoom]);
        assert_eq!(failure.first(), ErrorCode::TooLate);
        assert_eq!(failure.len(), 2);
    }

    #[test]
    fn test_failure_from_empty_codes_is_none() {
        assert!(Failure::from_codes(vec![]).is_none());
        assert!(Failure::from_codes(vec![ErrorCode::AlreadyActive]).is_some());
    }

    #[test]
    fn test_prepend() {
        let failure = Failure::new(ErrorCode::TitleCannotBeDefaultOrEmpty)
            .prepend(ErrorCode::ActivateFailure);
        assert_eq!(
            failure.codes(),
            &[
                ErrorCode::ActivateFailure,
                ErrorCode::TitleCannotBeDefaultOrEmpty
            ]
        );
    }

    #[test]
    fn test_display_joins_messages() {
        let failure = Failure::new(ErrorCode::AlreadyCancelled).combine([ErrorCode::TooLate]);
        assert_eq!(
            failure.to_string(),
            "The event is already cancelled; The event has already started"
        );
    }

    #[test]
    fn test_violations_accumulate() {
        let mut violations = Violations::new();
        assert!(violations.is_empty());

        violations.push(ErrorCode::TimeRangeMissing);
        let rejected = violations.absorb::<u32>(Err(Failure::new(ErrorCode::MaxGuestsTooSmall)));
        let accepted = violations.absorb(Ok(7));
        assert_eq!(rejected, None);
        assert_eq!(accepted, Some(7));

        let failure = violations.into_result().unwrap_err();
        assert_eq!(
            failure.codes(),
            &[ErrorCode::TimeRangeMissing, ErrorCode::MaxGuestsTooSmall]
        );
    }

    #[test]
    fn test_empty_violations_are_success() {
        assert!(Violations::new().into_result().is_ok());
    }

    #[test]
    fn test_serialization() {
        let failure = Failure::new(ErrorCode::NoMoreRoom).combine([ErrorCode::TooLate]);
        let json = serde_json::to_string(&failure).unwrap();
        assert_eq!(json, r#"["NoMoreRoom","TooLate"]"#);

        let deserialized: Failure = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, failure);
    }

    #[test]
    fn test_empty_failure_does_not_deserialize() {
        let result: Result<Failure, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
