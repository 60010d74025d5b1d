use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tabletop_trust::trust::{
    CancellationPolicyEvaluator, ChannelId, DuplicateFlag, ExperienceLevel, InMemoryReputationStore,
    MessageDraft, ParticipantRole, PenaltyKind, ReviewSubmission, ReviewValidationError, SessionId,
    SessionSnapshot, SessionStatus, TrustPolicyConfig, TrustPolicyService, TrustServiceError,
    UserId,
};

fn service() -> TrustPolicyService<InMemoryReputationStore> {
    let store = Arc::new(InMemoryReputationStore::default());
    TrustPolicyService::new(store, TrustPolicyConfig::default())
}

fn session_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 18, 19, 0, 0)
        .single()
        .expect("valid session start")
}

fn friday_session() -> SessionSnapshot {
    SessionSnapshot {
        session_id: SessionId("ses-000101".to_string()),
        host_id: UserId("gm-hollis".to_string()),
        start_time: Some(session_start()),
        end_time: Some(session_start() + Duration::hours(4)),
        min_players: 3,
        max_players: 6,
        experience_level: ExperienceLevel::Open,
        status: SessionStatus::Scheduled,
    }
}

fn draft(author: &str, channel: &str, content: &str) -> MessageDraft {
    MessageDraft {
        author_id: UserId(author.to_string()),
        channel_id: ChannelId(channel.to_string()),
        content: content.to_string(),
        sent_at: session_start(),
    }
}

#[test]
fn new_member_earns_hosting_rights_through_play() {
    let service = service();
    let member = UserId("player-ines".to_string());

    let before = service
        .host_eligibility_for(&member)
        .expect("able to evaluate a brand new member");
    assert!(!before.eligible);
    assert_eq!(before.sessions_remaining, 2);
    assert_eq!(before.progress, 0.0);

    service
        .record_participation(&member, ParticipantRole::Player)
        .expect("able to record the first session");
    let halfway = service
        .host_eligibility_for(&member)
        .expect("able to evaluate after one session");
    assert!(!halfway.eligible);
    assert_eq!(halfway.progress, 0.5);

    service
        .record_participation(&member, ParticipantRole::Player)
        .expect("able to record the second session");
    let unlocked = service
        .host_eligibility_for(&member)
        .expect("able to evaluate after two sessions");
    assert!(unlocked.eligible);
    assert_eq!(unlocked.progress, 1.0);
    assert_eq!(unlocked.sessions_remaining, 0);
}

#[test]
fn post_session_reviews_shape_the_host_profile() {
    let service = service();
    let host = UserId("gm-hollis".to_string());

    for (author, rating) in [("player-ines", 4u8), ("player-tomas", 5), ("player-ruth", 5)] {
        let submission = ReviewSubmission {
            session_id: SessionId("ses-000101".to_string()),
            author_id: UserId(author.to_string()),
            target_id: host.clone(),
            rating,
            content: "Great pacing and a fair ruling on the contested flank.".to_string(),
            is_host_review: true,
        };
        service.submit_review(submission).expect("review accepted");
    }

    let resubmission = ReviewSubmission {
        session_id: SessionId("ses-000101".to_string()),
        author_id: UserId("player-ines".to_string()),
        target_id: host.clone(),
        rating: 1,
        content: "Changed my mind, actually.".to_string(),
        is_host_review: true,
    };
    let error = service
        .submit_review(resubmission)
        .expect_err("second review for the same session rejected");
    match error {
        TrustServiceError::Validation(ReviewValidationError::DuplicateReview) => {}
        other => panic!("expected duplicate rejection, got {other:?}"),
    }

    let profile = service
        .profile(&host)
        .expect("profile fetch succeeds")
        .expect("host has history");
    assert_eq!(profile.host_review_count, 3);
    assert_eq!(profile.host_reputation, Some(14.0 / 3.0));
    assert_eq!(profile.display_host_reputation(), Some(4.7));
    assert_eq!(profile.player_review_count, 0);
}

#[test]
fn late_cancellations_are_penalized_by_role() {
    let evaluator = CancellationPolicyEvaluator::new(&TrustPolicyConfig::default());
    let session = friday_session();

    let early_player = evaluator
        .evaluate(&session, ParticipantRole::Player, session_start() - Duration::hours(90))
        .expect("evaluates");
    assert!(!early_player.has_penalty);

    let late_player = evaluator
        .evaluate(&session, ParticipantRole::Player, session_start() - Duration::hours(48))
        .expect("evaluates");
    assert_eq!(late_player.penalty_kind, Some(PenaltyKind::NoShow));

    let host_same_instant = evaluator
        .evaluate(&session, ParticipantRole::Host, session_start() - Duration::hours(48))
        .expect("evaluates");
    assert!(!host_same_instant.has_penalty);

    let late_host = evaluator
        .evaluate(&session, ParticipantRole::Host, session_start() - Duration::hours(6))
        .expect("evaluates");
    assert_eq!(late_host.penalty_kind, Some(PenaltyKind::HostReputationHit));
}

#[test]
fn crossposted_spoilers_raise_both_flags() {
    let service = service();
    let message = draft(
        "alice",
        "catan-lfg",
        "No spoilers please, the ending shocked our whole table",
    );
    let history = vec![draft(
        "alice",
        "general",
        "No spoilers please, the ending shocked our whole table",
    )];

    let flags = service.check_message(&message, &history);

    match flags.duplicate {
        Some(DuplicateFlag::Strong { score }) => assert_eq!(score, 1.0),
        other => panic!("expected strong duplicate, got {other:?}"),
    }
    assert!(flags.spoiler);
}
