//! Integration tests for the event aggregate.
//!
//! These tests drive events through their whole lifecycle using only the
//! public API: creation, editing, readiness, activation, invitations, direct
//! participation, cancellation and snapshot reconstruction.

use chrono::{TimeDelta, Utc};
use domain::{
    ErrorCode, EventDescription, EventSnapshot, EventStatus, EventTimeRange, EventTitle,
    EventVisibility, GuestId, InvitationStatus, MaxGuests, OperationResult, Snapshot,
    TimeRangeSnapshot, VeaEvent,
};

/// Installs a test log writer honouring `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A valid time range starting a week from now.
fn next_week() -> EventTimeRange {
    let start = Utc::now() + TimeDelta::days(7);
    EventTimeRange::create(start, start + TimeDelta::hours(4)).unwrap()
}

/// Creates an event and fills in every detail needed for readiness.
fn prepared_event() -> VeaEvent {
    let mut event = VeaEvent::create();
    event
        .update_title(EventTitle::create("Board game night").unwrap())
        .unwrap();
    event
        .update_description(EventDescription::create("Bring your favourite games.").unwrap())
        .unwrap();
    event.update_time_range(next_week()).unwrap();
    event.update_visibility(EventVisibility::Public).unwrap();
    event.update_max_guests(MaxGuests::create(10).unwrap()).unwrap();
    event
}

fn active_event() -> VeaEvent {
    let mut event = prepared_event();
    event.activate().unwrap();
    event
}

fn codes(result: OperationResult) -> Vec<ErrorCode> {
    result.unwrap_err().into_codes()
}

mod event_lifecycle {
    use super::*;

    #[test]
    fn complete_event_lifecycle() {
        init_tracing();
        let mut event = VeaEvent::create();
        assert_eq!(event.status(), EventStatus::Draft);

        // Readiness fails until the details are filled in
        assert!(event.ready().is_err());

        let mut event_prepared = prepared_event();
        assert_eq!(event_prepared.status(), EventStatus::Draft);

        event_prepared.ready().unwrap();
        assert_eq!(event_prepared.status(), EventStatus::Ready);

        event_prepared.activate().unwrap();
        assert_eq!(event_prepared.status(), EventStatus::Active);

        event_prepared.cancel().unwrap();
        assert_eq!(event_prepared.status(), EventStatus::Cancelled);
        assert!(event_prepared.status().is_terminal());

        event.cancel().unwrap();
        assert_eq!(event.status(), EventStatus::Cancelled);
    }

    #[test]
    fn new_event_has_defaults() {
        let event = VeaEvent::create();
        assert_eq!(event.title(), Some(&EventTitle::default()));
        assert_eq!(event.description(), Some(&EventDescription::default()));
        assert_eq!(event.time_range(), Some(&EventTimeRange::default()));
        assert_eq!(event.visibility(), Some(EventVisibility::Private));
        assert_eq!(event.max_guests(), MaxGuests::default());
        assert_eq!(event.location_max_capacity(), 500);
        assert!(event.invitations().is_empty());
        assert!(event.guest_list().is_empty());
    }

    #[test]
    fn editing_a_ready_event_requires_readying_again() {
        let mut event = prepared_event();
        event.ready().unwrap();

        event
            .update_title(EventTitle::create("Chess night").unwrap())
            .unwrap();
        assert_eq!(event.status(), EventStatus::Draft);

        event.ready().unwrap();
        event.update_max_guests(MaxGuests::new(12)).unwrap();
        assert_eq!(event.status(), EventStatus::Draft);

        event.ready().unwrap();
        event.update_visibility(EventVisibility::Private).unwrap();
        assert_eq!(event.status(), EventStatus::Draft);
    }

    #[test]
    fn moving_a_ready_event_keeps_it_ready() {
        let mut event = prepared_event();
        event.ready().unwrap();

        let start = Utc::now() + TimeDelta::days(14);
        let range = EventTimeRange::create(start, start + TimeDelta::hours(6)).unwrap();
        event.update_time_range(range).unwrap();

        assert_eq!(event.time_range(), Some(&range));
        assert_eq!(event.status(), EventStatus::Ready);
        event.activate().unwrap();
    }

    #[test]
    fn making_draft_event_public_keeps_status() {
        let mut event = VeaEvent::create();
        event.update_visibility(EventVisibility::Public).unwrap();
        assert_eq!(event.status(), EventStatus::Draft);
        assert_eq!(event.visibility(), Some(EventVisibility::Public));
    }

    #[test]
    fn activation_failure_lists_every_readiness_error() {
        let mut event = VeaEvent::create();
        let failure = event.activate().unwrap_err();

        assert_eq!(failure.first(), ErrorCode::ActivateFailure);
        assert_eq!(failure.len(), 5);
        assert!(!failure.is_empty());
        assert!(failure.contains(ErrorCode::TitleCannotBeDefaultOrEmpty));
        assert!(failure.contains(ErrorCode::DescriptionCannotBeDefault));
        assert!(failure.contains(ErrorCode::TimeRangeCannotBeDefault));
        assert!(!failure.contains(ErrorCode::VisibilityMustBeSet));
        assert_eq!(event.status(), EventStatus::Draft);
    }

    #[test]
    fn ready_rejects_past_start_even_when_otherwise_valid() {
        let start = Utc::now() - TimeDelta::days(1);
        let snapshot = EventSnapshot {
            title: Some("Retro party".to_string()),
            description: Some("Eighties music all night.".to_string()),
            time_range: Some(TimeRangeSnapshot {
                start,
                end: start + TimeDelta::hours(5),
            }),
            visibility: Some(EventVisibility::Public),
            max_guests: 20,
            ..EventSnapshot::default()
        };
        let mut event = VeaEvent::restore(snapshot).unwrap();

        assert_eq!(codes(event.ready()), vec![ErrorCode::CannotReadyPastEvent]);
    }
}

mod cancellation {
    use super::*;

    #[test]
    fn cancelling_twice_fails() {
        let mut event = active_event();
        assert!(event.cancel().is_ok());
        assert_eq!(codes(event.cancel()), vec![ErrorCode::AlreadyCancelled]);
    }

    #[test]
    fn cancelled_event_rejects_further_changes() {
        let mut event = prepared_event();
        event.cancel().unwrap();

        assert_eq!(codes(event.ready()), vec![ErrorCode::AlreadyCancelled]);
        assert_eq!(
            codes(event.invite_guest(GuestId::new())),
            vec![ErrorCode::CanOnlyInviteToReadyOrActiveEvent]
        );
        assert_eq!(
            codes(event.update_title(EventTitle::create("Too late").unwrap())),
            vec![ErrorCode::CannotModifyActiveOrCancelled]
        );
        assert_eq!(
            codes(event.update_visibility(EventVisibility::Private)),
            vec![
                ErrorCode::UpdateVisibilityImpossible,
                ErrorCode::AlreadyCancelled
            ]
        );
        assert_eq!(event.status(), EventStatus::Cancelled);
    }
}

mod invitations {
    use super::*;

    #[test]
    fn invited_guest_accepts_and_takes_a_place() {
        let mut event = active_event();
        let guest = GuestId::new();

        event.invite_guest(guest).unwrap();
        let invitation = event.invitation_for(guest).unwrap();
        assert_eq!(invitation.status(), InvitationStatus::Pending);
        assert_eq!(event.participant_count(), 0);

        event.accept_invitation(guest).unwrap();
        assert!(event.has_accepted_invitation(guest));
        assert_eq!(event.participant_count(), 1);
    }

    #[test]
    fn invitation_to_ready_event_can_only_be_accepted_once_active() {
        let mut event = prepared_event();
        event.ready().unwrap();
        let guest = GuestId::new();
        event.invite_guest(guest).unwrap();

        assert_eq!(
            codes(event.accept_invitation(guest)),
            vec![ErrorCode::JoinUnstartedEventImpossible]
        );

        event.activate().unwrap();
        event.accept_invitation(guest).unwrap();
    }

    #[test]
    fn duplicate_invitation_fails() {
        let mut event = active_event();
        let guest = GuestId::new();
        event.invite_guest(guest).unwrap();
        event.decline_invitation(guest).unwrap();

        assert_eq!(
            codes(event.invite_guest(guest)),
            vec![ErrorCode::GuestAlreadyInvited]
        );
        assert_eq!(event.invitations().len(), 1);
    }

    #[test]
    fn approved_invitations_fill_the_event() {
        let mut event = active_event();
        assert_eq!(event.max_guests().value(), 10);

        for _ in 0..10 {
            let guest = GuestId::new();
            event.invite_guest(guest).unwrap();
            event.accept_invitation(guest).unwrap();
        }

        assert!(event.is_full());
        assert_eq!(
            codes(event.invite_guest(GuestId::new())),
            vec![ErrorCode::NoMoreRoom]
        );
        assert_eq!(
            codes(event.participate(GuestId::new())),
            vec![ErrorCode::NoMoreRoom]
        );
    }

    #[test]
    fn full_event_with_one_place() {
        let mut snapshot = active_event().snapshot();
        snapshot.max_guests = 1;
        snapshot.guest_list = vec![GuestId::new()];
        let mut event = VeaEvent::restore(snapshot).unwrap();

        assert_eq!(
            codes(event.invite_guest(GuestId::new())),
            vec![ErrorCode::NoMoreRoom]
        );
    }

    #[test]
    fn declining_on_cancelled_event_fails() {
        let mut event = active_event();
        let guest = GuestId::new();
        event.invite_guest(guest).unwrap();
        event.cancel().unwrap();

        assert_eq!(
            codes(event.decline_invitation(guest)),
            vec![ErrorCode::DeclineImpossibleOnCancelledEvent]
        );
        assert_eq!(
            codes(event.accept_invitation(guest)),
            vec![ErrorCode::CancelledEventsCannotBeJoined]
        );
    }
}

mod participation {
    use super::*;

    #[test]
    fn guest_joins_and_leaves_public_event() {
        init_tracing();
        let mut event = active_event();
        let guest = GuestId::new();

        event.participate(guest).unwrap();
        assert_eq!(event.guest_list(), &[guest]);
        assert_eq!(
            codes(event.invite_guest(guest)),
            vec![ErrorCode::GuestAlreadyJoined]
        );

        event.cancel_participation(guest).unwrap();
        assert!(event.guest_list().is_empty());
    }

    #[test]
    fn private_event_cannot_be_joined_directly() {
        let mut event = prepared_event();
        event.update_visibility(EventVisibility::Private).unwrap();
        event.activate().unwrap();

        assert_eq!(
            codes(event.participate(GuestId::new())),
            vec![ErrorCode::EventIsNotPublic]
        );
    }

    #[test]
    fn invited_guest_on_private_event_is_told_it_is_not_public() {
        let mut event = prepared_event();
        event.update_visibility(EventVisibility::Private).unwrap();
        event.ready().unwrap();
        let guest = GuestId::new();
        event.invite_guest(guest).unwrap();

        assert_eq!(
            codes(event.participate(guest)),
            vec![ErrorCode::EventIsNotPublic]
        );
    }

    #[test]
    fn invited_guest_joins_through_the_invitation() {
        let mut event = active_event();
        let guest = GuestId::new();
        event.invite_guest(guest).unwrap();

        assert_eq!(
            codes(event.participate(guest)),
            vec![ErrorCode::GuestAlreadyInvited]
        );
        assert!(event.guest_list().is_empty());

        event.accept_invitation(guest).unwrap();
        assert_eq!(event.participant_count(), 1);
    }

    #[test]
    fn ready_event_cannot_be_joined_directly() {
        let mut event = prepared_event();
        event.ready().unwrap();

        assert_eq!(
            codes(event.participate(GuestId::new())),
            vec![ErrorCode::OnlyActiveEventsCanBeJoined]
        );
    }

    #[test]
    fn started_event_cannot_be_joined_or_left() {
        let guest = GuestId::new();
        let start = Utc::now() - TimeDelta::hours(1);
        let mut snapshot = active_event().snapshot();
        snapshot.time_range = Some(TimeRangeSnapshot {
            start,
            end: start + TimeDelta::hours(3),
        });
        snapshot.guest_list = vec![guest];
        let mut event = VeaEvent::restore(snapshot).unwrap();

        assert_eq!(
            codes(event.participate(GuestId::new())),
            vec![ErrorCode::TooLate]
        );
        assert_eq!(
            codes(event.cancel_participation(guest)),
            vec![ErrorCode::CannotModifyActiveOrCancelled]
        );
    }
}

mod reconstruction {
    use super::*;

    #[test]
    fn snapshot_round_trip_through_json() {
        let mut event = active_event();
        let invited = GuestId::new();
        event.invite_guest(invited).unwrap();
        event.accept_invitation(invited).unwrap();
        event.invite_guest(GuestId::new()).unwrap();
        event.participate(GuestId::new()).unwrap();

        let snapshot = event.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: EventSnapshot = serde_json::from_str(&json).unwrap();

        let restored = VeaEvent::restore(decoded).unwrap();
        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.participant_count(), 2);
        assert_eq!(restored.invitations().len(), 2);
    }

    #[test]
    fn restored_event_keeps_enforcing_rules() {
        let mut snapshot = active_event().snapshot();
        snapshot.status = EventStatus::Cancelled;
        let mut event = VeaEvent::restore(snapshot).unwrap();

        assert_eq!(codes(event.cancel()), vec![ErrorCode::AlreadyCancelled]);
    }

    #[test]
    fn restore_rejects_duplicate_members() {
        let guest = GuestId::new();
        let snapshot = EventSnapshot {
            guest_list: vec![guest, guest],
            ..EventSnapshot::default()
        };

        let err = VeaEvent::restore(snapshot).unwrap_err();
        assert_eq!(err.codes(), &[ErrorCode::GuestAlreadyJoined]);
    }
}
