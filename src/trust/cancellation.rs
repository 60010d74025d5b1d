use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::config::TrustPolicyConfig;
use super::domain::{ParticipantRole, PolicyInputError, RsvpRecord, SessionSnapshot};

/// Penalty attached to a late cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyKind {
    NoShow,
    HostReputationHit,
}

impl PenaltyKind {
    pub const fn label(self) -> &'static str {
        match self {
            PenaltyKind::NoShow => "no_show",
            PenaltyKind::HostReputationHit => "host_reputation_hit",
        }
    }
}

/// Which rule produced the decision, so callers can show members why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyExplanation {
    OutsidePenaltyWindow,
    PlayerInsideNoShowWindow,
    HostInsideReputationWindow,
}

impl PolicyExplanation {
    pub const fn label(self) -> &'static str {
        match self {
            PolicyExplanation::OutsidePenaltyWindow => "outside_penalty_window",
            PolicyExplanation::PlayerInsideNoShowWindow => "player_inside_no_show_window",
            PolicyExplanation::HostInsideReputationWindow => "host_inside_reputation_window",
        }
    }
}

/// Outcome of a cancellation check. The engine only decides; applying the
/// penalty to RSVP records stays with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub has_penalty: bool,
    pub penalty_kind: Option<PenaltyKind>,
    pub explanation: PolicyExplanation,
}

/// Stateless evaluator applying the role-specific cancellation windows.
#[derive(Debug, Clone)]
pub struct CancellationPolicyEvaluator {
    player_window: Duration,
    host_window: Duration,
}

impl CancellationPolicyEvaluator {
    pub fn new(config: &TrustPolicyConfig) -> Self {
        Self {
            player_window: Duration::hours(config.player_cancellation_window_hours),
            host_window: Duration::hours(config.host_cancellation_window_hours),
        }
    }

    /// Decide whether cancelling `session` at `now` carries a penalty.
    ///
    /// A cancellation exactly at the window boundary is already penalized;
    /// one nanosecond earlier is free. Sessions without a start time cannot
    /// be judged and are rejected.
    pub fn evaluate(
        &self,
        session: &SessionSnapshot,
        role: ParticipantRole,
        now: DateTime<Utc>,
    ) -> Result<PolicyDecision, PolicyInputError> {
        let start = session.start_time.ok_or(PolicyInputError::MissingStartTime)?;

        let (window, penalty, explanation) = match role {
            ParticipantRole::Player => (
                self.player_window,
                PenaltyKind::NoShow,
                PolicyExplanation::PlayerInsideNoShowWindow,
            ),
            ParticipantRole::Host => (
                self.host_window,
                PenaltyKind::HostReputationHit,
                PolicyExplanation::HostInsideReputationWindow,
            ),
        };

        let deadline = start - window;
        if now >= deadline {
            Ok(PolicyDecision {
                has_penalty: true,
                penalty_kind: Some(penalty),
                explanation,
            })
        } else {
            Ok(PolicyDecision {
                has_penalty: false,
                penalty_kind: None,
                explanation: PolicyExplanation::OutsidePenaltyWindow,
            })
        }
    }

    /// Judge an existing commitment, taking the role from the RSVP record.
    pub fn evaluate_rsvp(
        &self,
        session: &SessionSnapshot,
        rsvp: &RsvpRecord,
        now: DateTime<Utc>,
    ) -> Result<PolicyDecision, PolicyInputError> {
        self.evaluate(session, rsvp.role, now)
    }
}
