use crate::error::AppError;
use crate::trust::{
    CancellationPolicyEvaluator, ChannelId, ContentIntegrityService, DuplicateFlag,
    ExperienceLevel, HostEligibilityGate, InMemoryReputationStore, IntegrityFlags, MessageDraft,
    MessageHistoryImporter, ParticipantRole, PolicyDecision, ReviewSubmission, SessionId,
    SessionSnapshot, SessionStatus, TrustPolicyConfig, TrustPolicyService, UserId,
};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Anchor instant for the demo timeline (RFC 3339 or YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = crate::infra::parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Optional chat-history CSV export for the content integrity portion
    #[arg(long)]
    pub(crate) history_csv: Option<PathBuf>,
    /// Skip the review and reputation portion of the demo
    #[arg(long)]
    pub(crate) skip_reviews: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CancellationArgs {
    /// Scheduled session start (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_instant)]
    pub(crate) start_time: DateTime<Utc>,
    /// Role of the cancelling participant
    #[arg(long, value_enum)]
    pub(crate) role: RoleArg,
    /// Evaluate as of this instant (defaults to now)
    #[arg(long, value_parser = crate::infra::parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub(crate) enum RoleArg {
    Host,
    Player,
}

impl From<RoleArg> for ParticipantRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Host => ParticipantRole::Host,
            RoleArg::Player => ParticipantRole::Player,
        }
    }
}

pub(crate) fn run_policy_cancellation(args: CancellationArgs) -> Result<(), AppError> {
    let CancellationArgs {
        start_time,
        role,
        now,
    } = args;

    let now = now.unwrap_or_else(Utc::now);
    let config = TrustPolicyConfig::default();
    let evaluator = CancellationPolicyEvaluator::new(&config);
    let session = demo_session(Some(start_time));
    let role = ParticipantRole::from(role);

    println!("Cancellation policy check");
    println!("Session start: {start_time} | evaluated {now}");
    match evaluator.evaluate(&session, role, now) {
        Ok(decision) => render_decision(role, &decision),
        Err(err) => println!("- Check unavailable: {err}"),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        now,
        history_csv,
        skip_reviews,
    } = args;

    let now = now.unwrap_or_else(Utc::now);
    let config = TrustPolicyConfig::default();

    println!("Community trust policy demo");

    let evaluator = CancellationPolicyEvaluator::new(&config);
    let start = now + Duration::hours(48);
    let session = demo_session(Some(start));
    println!("\nCancellation windows (session starts {start})");
    for (role, offset_hours) in [
        (ParticipantRole::Player, 96),
        (ParticipantRole::Player, 72),
        (ParticipantRole::Player, 12),
        (ParticipantRole::Host, 36),
        (ParticipantRole::Host, 24),
    ] {
        let at = start - Duration::hours(offset_hours);
        match evaluator.evaluate(&session, role, at) {
            Ok(decision) => {
                print!("- {} cancelling {}h before start: ", role.label(), offset_hours);
                render_decision_inline(&decision);
            }
            Err(err) => println!(
                "- {} cancelling {offset_hours}h before start: {err}",
                role.label()
            ),
        }
    }

    let gate = HostEligibilityGate::from_config(&config);
    println!(
        "\nHosting eligibility ladder (requires {} joined sessions)",
        gate.required_sessions()
    );
    for joined in 0..=2 {
        match gate.evaluate(joined) {
            Ok(result) => println!(
                "- {} joined: eligible {} | progress {:.0}% | {} to go",
                joined,
                result.eligible,
                result.progress * 100.0,
                result.sessions_remaining
            ),
            Err(err) => println!("- {joined} joined: {err}"),
        }
    }

    if !skip_reviews {
        println!("\nReview and reputation demo");
        let store = Arc::new(InMemoryReputationStore::default());
        let service = TrustPolicyService::new(store, config.clone());
        let host = UserId("gm-hollis".to_string());

        if let Err(err) = service.record_participation(&host, ParticipantRole::Host) {
            println!("  Reputation store unavailable: {err}");
            return Ok(());
        }

        let submissions = [
            ("player-ines", 4, "Great pacing and clear rulings all night."),
            ("player-tomas", 5, "Wonderful table, would join again."),
        ];
        for (author, rating, content) in submissions {
            let submission = ReviewSubmission {
                session_id: SessionId("ses-000101".to_string()),
                author_id: UserId(author.to_string()),
                target_id: host.clone(),
                rating,
                content: content.to_string(),
                is_host_review: true,
            };
            match service.submit_review(submission) {
                Ok(receipt) => println!(
                    "- Accepted review {} from {} (rating {})",
                    receipt.review.review_id.0, author, rating
                ),
                Err(err) => println!("- Review from {author} rejected: {err}"),
            }
        }

        let duplicate = ReviewSubmission {
            session_id: SessionId("ses-000101".to_string()),
            author_id: UserId("player-ines".to_string()),
            target_id: host.clone(),
            rating: 2,
            content: "Changed my mind, actually.".to_string(),
            is_host_review: true,
        };
        match service.submit_review(duplicate) {
            Ok(receipt) => println!(
                "- Unexpectedly accepted duplicate {}",
                receipt.review.review_id.0
            ),
            Err(err) => println!("- Duplicate review rejected: {err}"),
        }

        match service.profile(&host) {
            Ok(Some(profile)) => match serde_json::to_string_pretty(&profile) {
                Ok(json) => println!("  Host trust profile:\n{json}"),
                Err(err) => println!("  Host trust profile unavailable: {err}"),
            },
            Ok(None) => println!("  Host trust profile missing"),
            Err(err) => println!("  Reputation store unavailable: {err}"),
        }
    }

    println!("\nContent integrity checks");
    let integrity = ContentIntegrityService::new(&config);
    let mut history = vec![
        demo_draft(
            "alice",
            "general",
            "Looking for a fourth player tonight",
            now - Duration::minutes(30),
        ),
        demo_draft("bob", "general", "Game night recap", now - Duration::hours(3)),
    ];

    if let Some(path) = history_csv {
        match MessageHistoryImporter::from_path(&path) {
            Ok(imported) => {
                println!("- Loaded {} messages from {}", imported.len(), path.display());
                history.extend(imported);
            }
            Err(err) => {
                println!("- Could not load {}: {err}", path.display());
                return Ok(());
            }
        }
    }

    let repost = demo_draft("alice", "catan-lfg", "Looking for a fourth player tonight", now);
    render_flags("cross-channel repost", &integrity.evaluate(&repost, &history));

    let same_channel = demo_draft("alice", "general", "Looking for a fourth player tonight", now);
    render_flags("same-channel repeat", &integrity.evaluate(&same_channel, &history));

    let spoiler = demo_draft("alice", "mystery-club", "That twist at the table was unreal", now);
    render_flags("spoiler-prone message", &integrity.evaluate(&spoiler, &history));

    Ok(())
}

fn render_decision(role: ParticipantRole, decision: &PolicyDecision) {
    print!("- {} cancellation: ", role.label());
    render_decision_inline(decision);
}

fn render_decision_inline(decision: &PolicyDecision) {
    let penalty = match decision.penalty_kind {
        Some(kind) => kind.label(),
        None => "none",
    };
    println!("penalty {} ({})", penalty, decision.explanation.label());
}

fn render_flags(label: &str, flags: &IntegrityFlags) {
    let duplicate = match flags.duplicate {
        Some(DuplicateFlag::Strong { score }) => format!("strong duplicate (score {score:.2})"),
        Some(DuplicateFlag::Weak { score }) => format!("weak duplicate (score {score:.2})"),
        None => "no duplicate".to_string(),
    };
    let spoiler = if flags.spoiler {
        "spoiler detected"
    } else {
        "no spoiler"
    };
    println!("- {label}: {duplicate}, {spoiler}");
}

fn demo_session(start: Option<DateTime<Utc>>) -> SessionSnapshot {
    SessionSnapshot {
        session_id: SessionId("ses-000101".to_string()),
        host_id: UserId("gm-hollis".to_string()),
        start_time: start,
        end_time: start.map(|instant| instant + Duration::hours(4)),
        min_players: 3,
        max_players: 6,
        experience_level: ExperienceLevel::Open,
        status: SessionStatus::Scheduled,
    }
}

fn demo_draft(author: &str, channel: &str, content: &str, sent_at: DateTime<Utc>) -> MessageDraft {
    MessageDraft {
        author_id: UserId(author.to_string()),
        channel_id: ChannelId(channel.to_string()),
        content: content.to_string(),
        sent_at,
    }
}
