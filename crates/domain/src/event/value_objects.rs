//! Value objects for the event domain.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, OperationResult, Violations};

/// Title of an event.
///
/// Any string is accepted; the working-title placeholder and blank strings
/// are only rejected when the event is readied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTitle(String);

impl EventTitle {
    /// The placeholder title given to new events.
    pub const DEFAULT: &'static str = "Working title.";

    /// Creates a title. Never fails.
    pub fn create(value: impl Into<String>) -> OperationResult<Self> {
        Ok(Self(value.into()))
    }

    /// Returns the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the title is the placeholder or blank.
    pub fn is_default_or_empty(&self) -> bool {
        self.0 == Self::DEFAULT || self.0.trim().is_empty()
    }
}

impl Default for EventTitle {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl std::fmt::Display for EventTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Description of an event, at most 250 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventDescription(String);

impl EventDescription {
    /// Maximum number of characters.
    pub const MAX_LENGTH: usize = 250;

    /// Creates a description, failing if it is too long.
    pub fn create(value: impl Into<String>) -> OperationResult<Self> {
        let value = value.into();
        if value.chars().count() > Self::MAX_LENGTH {
            return Err(ErrorCode::DescriptionTooLong.into());
        }
        Ok(Self(value))
    }

    /// Returns the description as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the description is the empty default.
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for EventDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Start and end of an event.
///
/// The default range is a fixed placeholder at the Unix epoch. It is
/// structurally valid but never accepted as a real schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventTimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl EventTimeRange {
    /// Shortest allowed event.
    pub const MIN_DURATION: TimeDelta = TimeDelta::hours(1);

    /// Longest allowed event.
    pub const MAX_DURATION: TimeDelta = TimeDelta::hours(10);

    /// Creates a time range, reporting every structural violation.
    pub fn create(start: DateTime<Utc>, end: DateTime<Utc>) -> OperationResult<Self> {
        let range = Self { start, end };
        range.check_structure().into_result()?;
        Ok(range)
    }

    /// Validates a candidate range for use on an event.
    ///
    /// Distinguishes a missing range, the placeholder range and a structurally
    /// invalid range.
    pub fn validate(range: Option<&Self>) -> OperationResult {
        let Some(range) = range else {
            return Err(ErrorCode::TimeRangeMissing.into());
        };

        let mut violations = range.check_structure();
        if range.is_default() {
            violations.push(ErrorCode::TimeRangeCannotBeDefault);
        }
        violations.into_result()
    }

    fn check_structure(&self) -> Violations {
        let mut violations = Violations::new();
        if self.end <= self.start {
            violations.push(ErrorCode::TimeRangeEndBeforeStart);
        } else {
            let duration = self.duration();
            if duration < Self::MIN_DURATION {
                violations.push(ErrorCode::TimeRangeTooShort);
            }
            if duration > Self::MAX_DURATION {
                violations.push(ErrorCode::TimeRangeTooLong);
            }
        }
        violations
    }

    /// Returns the start time.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the end time.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the length of the event.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns true if this is the placeholder range.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if the event starts before `now`.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start < now
    }
}

impl Default for EventTimeRange {
    fn default() -> Self {
        Self {
            start: DateTime::<Utc>::UNIX_EPOCH,
            end: DateTime::<Utc>::UNIX_EPOCH + Self::MIN_DURATION,
        }
    }
}

impl std::fmt::Display for EventTimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Maximum number of guests of an event.
///
/// Stored values are not range checked; [`MaxGuests::validate`] enforces the
/// allowed range when it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaxGuests(u32);

impl MaxGuests {
    /// Smallest valid maximum.
    pub const MIN: u32 = 2;

    /// Largest valid maximum.
    pub const MAX: u32 = 50;

    /// Maximum given to new events.
    pub const DEFAULT: u32 = 5;

    /// Creates a validated maximum.
    pub fn create(value: u32) -> OperationResult<Self> {
        Self::validate(value)?;
        Ok(Self(value))
    }

    /// Wraps a value without range checking.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Checks that a value lies within the allowed range.
    pub fn validate(value: u32) -> OperationResult {
        if value < Self::MIN {
            return Err(ErrorCode::MaxGuestsTooSmall.into());
        }
        if value > Self::MAX {
            return Err(ErrorCode::MaxGuestsTooGreat.into());
        }
        Ok(())
    }

    /// Returns the raw value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for MaxGuests {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl std::fmt::Display for MaxGuests {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who can see and join an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventVisibility {
    /// Only invited guests can attend.
    #[default]
    Private,

    /// Anyone can join once the event is active.
    Public,
}

impl EventVisibility {
    /// Returns the visibility name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventVisibility::Private => "Private",
            EventVisibility::Public => "Public",
        }
    }
}

impl std::fmt::Display for EventVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
