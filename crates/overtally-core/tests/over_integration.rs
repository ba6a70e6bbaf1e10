//! Integration tests for the over-tally state machine.
//!
//! These tests drive the tracker through complete over lifecycles with
//! hand-constructed instants, so deferred-effect deadlines are exercised
//! deterministically.

use chrono::{DateTime, Duration, TimeZone, Utc};
use overtally_core::{Delivery, Event, OverPhase, OverTracker};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0).unwrap()
}

#[test]
fn six_dots_complete_a_maiden_over() {
    let mut tracker = OverTracker::new();
    for _ in 0..6 {
        assert!(tracker.record(Delivery::Dot, t0()).is_some());
    }
    assert_eq!(tracker.balls_bowled(), 6);
    assert_eq!(tracker.events(), &[Delivery::Dot; 6]);
    assert_eq!(tracker.phase(), OverPhase::Completed);
    assert!(tracker.is_maiden());
}

#[test]
fn deliveries_past_six_are_ignored() {
    let mut tracker = OverTracker::new();
    for _ in 0..10 {
        tracker.record(Delivery::Runs(1), t0());
    }
    assert_eq!(tracker.balls_bowled(), 6);
    assert_eq!(tracker.events().len(), 6);
}

#[test]
fn extras_are_rejected_once_the_over_closed() {
    let mut tracker = OverTracker::new();
    for _ in 0..6 {
        tracker.record(Delivery::Dot, t0());
    }
    assert!(tracker.record(Delivery::Wide, t0()).is_none());
    assert_eq!(tracker.events().len(), 6);
    assert_eq!(tracker.phase(), OverPhase::Completed);
}

#[test]
fn undo_reverts_an_extra_and_its_absent_ball_increment() {
    let mut tracker = OverTracker::new();
    tracker.record(Delivery::Runs(4), t0());
    tracker.record(Delivery::Wide, t0());
    assert_eq!(tracker.balls_bowled(), 1);
    assert_eq!(tracker.events().len(), 2);

    assert!(tracker.undo().is_some());
    assert_eq!(tracker.balls_bowled(), 1);
    assert_eq!(tracker.events(), &[Delivery::Runs(4)]);
}

#[test]
fn wicket_on_the_sixth_ball_closes_the_over() {
    let mut tracker = OverTracker::new();
    for _ in 0..5 {
        tracker.record(Delivery::Dot, t0());
    }
    assert_eq!(tracker.balls_bowled(), 5);

    let event = tracker.record(Delivery::Wicket, t0()).unwrap();
    assert!(matches!(
        event,
        Event::DeliveryRecorded {
            delivery: Delivery::Wicket,
            balls_bowled: 6,
            ..
        }
    ));
    assert_eq!(tracker.phase(), OverPhase::Completed);
    assert!(tracker.pending_confirmation().is_some());
    assert!(tracker.pending_auto_reset().is_some());
    assert!(!tracker.is_maiden());
}

#[test]
fn confirmation_then_auto_reset_fire_in_order() {
    let mut tracker = OverTracker::new();
    for _ in 0..6 {
        tracker.record(Delivery::Dot, t0());
    }

    // Not due yet.
    assert!(tracker.tick(t0() + Duration::milliseconds(999)).is_none());

    let confirmation = tracker.tick(t0() + Duration::milliseconds(1_000)).unwrap();
    assert!(matches!(confirmation, Event::OverCompleted { maiden: true, .. }));
    assert_eq!(tracker.phase(), OverPhase::AwaitingReset);

    // Confirmation is one-shot.
    assert!(tracker.tick(t0() + Duration::milliseconds(1_500)).is_none());

    let reset = tracker.tick(t0() + Duration::milliseconds(3_000)).unwrap();
    assert!(matches!(
        reset,
        Event::OverReset {
            completed_overs: 1,
            auto: true,
            ..
        }
    ));
    assert_eq!(tracker.balls_bowled(), 0);
    assert!(tracker.events().is_empty());
    assert_eq!(tracker.history_len(), 0);
    assert_eq!(tracker.completed_overs(), 1);
    assert_eq!(tracker.phase(), OverPhase::InProgress);
}

#[test]
fn slow_caller_still_sees_both_deadlines() {
    let mut tracker = OverTracker::new();
    for _ in 0..6 {
        tracker.record(Delivery::Dot, t0());
    }

    // First poll long after both deadlines: confirmation fires first,
    // the reset on the next poll.
    let late = t0() + Duration::seconds(30);
    assert!(matches!(
        tracker.tick(late),
        Some(Event::OverCompleted { .. })
    ));
    assert!(matches!(tracker.tick(late), Some(Event::OverReset { .. })));
    assert!(tracker.tick(late).is_none());
}

#[test]
fn undo_cancels_the_pending_auto_reset() {
    let mut tracker = OverTracker::new();
    for _ in 0..6 {
        tracker.record(Delivery::Runs(1), t0());
    }
    assert_eq!(tracker.phase(), OverPhase::Completed);

    assert!(tracker.undo().is_some());
    assert_eq!(tracker.phase(), OverPhase::InProgress);
    assert_eq!(tracker.balls_bowled(), 5);
    assert!(tracker.pending_confirmation().is_none());
    assert!(tracker.pending_auto_reset().is_none());

    // Well past both original deadlines: nothing fires.
    assert!(tracker.tick(t0() + Duration::seconds(60)).is_none());
    assert_eq!(tracker.completed_overs(), 0);
}

#[test]
fn undo_after_confirmation_reopens_the_over() {
    let mut tracker = OverTracker::new();
    for _ in 0..6 {
        tracker.record(Delivery::Dot, t0());
    }
    tracker.tick(t0() + Duration::milliseconds(1_000)).unwrap();
    assert_eq!(tracker.phase(), OverPhase::AwaitingReset);

    assert!(tracker.undo().is_some());
    assert_eq!(tracker.phase(), OverPhase::InProgress);
    assert_eq!(tracker.balls_bowled(), 5);
    assert!(tracker.tick(t0() + Duration::seconds(60)).is_none());
}

#[test]
fn new_over_increments_count_only_from_six_balls() {
    let mut tracker = OverTracker::new();
    tracker.record(Delivery::Dot, t0());
    tracker.record(Delivery::Dot, t0());
    tracker.new_over();
    assert_eq!(tracker.completed_overs(), 0);
    assert_eq!(tracker.balls_bowled(), 0);

    for _ in 0..6 {
        tracker.record(Delivery::Dot, t0());
    }
    tracker.new_over();
    assert_eq!(tracker.completed_overs(), 1);
    assert_eq!(tracker.balls_bowled(), 0);
    assert!(tracker.events().is_empty());
    assert_eq!(tracker.phase(), OverPhase::InProgress);
}

#[test]
fn manual_new_over_cancels_pending_deadlines() {
    let mut tracker = OverTracker::new();
    for _ in 0..6 {
        tracker.record(Delivery::Dot, t0());
    }
    tracker.new_over();
    assert!(tracker.pending_confirmation().is_none());
    assert!(tracker.pending_auto_reset().is_none());
    assert!(tracker.tick(t0() + Duration::seconds(60)).is_none());
    assert_eq!(tracker.completed_overs(), 1);
}

#[test]
fn undo_stack_tracks_mutations_since_over_boundary() {
    let mut tracker = OverTracker::new();
    tracker.record(Delivery::Dot, t0());
    tracker.record(Delivery::Wide, t0());
    tracker.record(Delivery::Runs(2), t0());
    assert_eq!(tracker.history_len(), 3);

    tracker.undo();
    assert_eq!(tracker.history_len(), 2);

    tracker.new_over();
    assert_eq!(tracker.history_len(), 0);
}

#[test]
fn maiden_label_uses_only_the_six_most_recent_events() {
    // An early wide followed by six dots: the six most recent events are
    // all scoreless, so the simplified tally calls this a maiden.
    let mut tracker = OverTracker::new();
    tracker.record(Delivery::Wide, t0());
    for _ in 0..6 {
        tracker.record(Delivery::Dot, t0());
    }
    assert!(tracker.is_maiden());

    let confirmation = tracker.tick(t0() + Duration::milliseconds(1_000)).unwrap();
    assert!(matches!(confirmation, Event::OverCompleted { maiden: true, .. }));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn delivery_strategy() -> impl Strategy<Value = Delivery> {
        prop_oneof![
            Just(Delivery::Dot),
            (1u8..=6).prop_map(Delivery::Runs),
            Just(Delivery::Wide),
            Just(Delivery::NoBall),
            Just(Delivery::Wicket),
            Just(Delivery::Bye),
        ]
    }

    proptest! {
        #[test]
        fn balls_bowled_never_exceeds_six(seq in prop::collection::vec(delivery_strategy(), 0..40)) {
            let mut tracker = OverTracker::new();
            for delivery in seq {
                tracker.record(delivery, t0());
                prop_assert!(tracker.balls_bowled() <= 6);
                prop_assert!(tracker.events().len() >= tracker.balls_bowled() as usize);
            }
        }

        #[test]
        fn record_then_undo_is_an_exact_round_trip(
            prefix in prop::collection::vec(delivery_strategy(), 0..12),
            delivery in delivery_strategy(),
        ) {
            let mut tracker = OverTracker::new();
            for d in prefix {
                tracker.record(d, t0());
            }
            let before = tracker.state();
            // The law applies only when the record was actually accepted.
            if tracker.record(delivery, t0()).is_some() {
                tracker.undo();
                prop_assert_eq!(tracker.state(), before);
                prop_assert_eq!(tracker.phase(), OverPhase::InProgress);
            }
        }
    }
}
