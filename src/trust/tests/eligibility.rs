use super::common::*;

use crate::trust::domain::{ParticipantRole, PolicyInputError, UserId, UserTrustProfile};
use crate::trust::eligibility::HostEligibilityGate;

fn gate() -> HostEligibilityGate {
    HostEligibilityGate::from_config(&trust_config())
}

#[test]
fn brand_new_member_is_not_eligible() {
    let result = gate().evaluate(0).expect("evaluates");

    assert!(!result.eligible);
    assert_eq!(result.progress, 0.0);
    assert_eq!(result.sessions_remaining, 2);
}

#[test]
fn one_session_is_halfway_there() {
    let result = gate().evaluate(1).expect("evaluates");

    assert!(!result.eligible);
    assert_eq!(result.progress, 0.5);
    assert_eq!(result.sessions_remaining, 1);
}

#[test]
fn meeting_the_requirement_unlocks_hosting() {
    let result = gate().evaluate(2).expect("evaluates");

    assert!(result.eligible);
    assert_eq!(result.progress, 1.0);
    assert_eq!(result.sessions_remaining, 0);
}

#[test]
fn progress_caps_at_one_past_the_requirement() {
    let result = gate().evaluate(9).expect("evaluates");

    assert!(result.eligible);
    assert_eq!(result.progress, 1.0);
    assert_eq!(result.sessions_remaining, 0);
}

#[test]
fn progress_never_decreases_as_sessions_accumulate() {
    let gate = gate();
    let mut previous = gate.evaluate(0).expect("evaluates");

    for joined in 1..=5 {
        let next = gate.evaluate(joined).expect("evaluates");

        assert!(next.progress >= previous.progress);
        assert!(next.sessions_remaining <= previous.sessions_remaining);
        assert_eq!(next.eligible, next.sessions_remaining == 0);
        previous = next;
    }
}

#[test]
fn negative_session_count_is_rejected() {
    let error = gate().evaluate(-1).expect_err("expected input error");

    match error {
        PolicyInputError::NegativeSessionCount { count } => assert_eq!(count, -1),
        other => panic!("expected negative session count, got {other:?}"),
    }
}

#[test]
fn zero_required_sessions_makes_everyone_eligible() {
    let gate = HostEligibilityGate::new(0);

    let result = gate.evaluate(0).expect("evaluates");

    assert!(result.eligible);
    assert_eq!(result.progress, 1.0);
    assert_eq!(result.sessions_remaining, 0);
}

#[test]
fn profile_evaluation_counts_joined_sessions_only() {
    let mut profile = UserTrustProfile::empty(UserId("gm-hollis".to_string()));
    profile.sessions_hosted = 5;
    profile.sessions_joined = 1;

    let result = gate().evaluate_profile(&profile).expect("evaluates");

    assert!(!result.eligible);
    assert_eq!(result.sessions_remaining, 1);
}

#[test]
fn service_eligibility_lookup_tracks_recorded_participation() {
    let (service, _) = build_service();
    let user = UserId("player-ines".to_string());

    let before = service.host_eligibility_for(&user).expect("evaluates");
    assert!(!before.eligible);
    assert_eq!(before.sessions_remaining, 2);

    for _ in 0..2 {
        service
            .record_participation(&user, ParticipantRole::Player)
            .expect("recorded");
    }

    let after = service.host_eligibility_for(&user).expect("evaluates");
    assert!(after.eligible);
    assert_eq!(after.progress, 1.0);
}
