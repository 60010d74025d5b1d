use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for platform members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for scheduled game sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Identifier wrapper for chat channels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

/// Identifier wrapper for accepted reviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub String);

/// Role a member holds for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    Host,
    Player,
}

impl ParticipantRole {
    pub const fn label(self) -> &'static str {
        match self {
            ParticipantRole::Host => "host",
            ParticipantRole::Player => "player",
        }
    }
}

/// Lifecycle states reported by the session scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Cancelled,
    Completed,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Completed => "completed",
        }
    }
}

/// Commitment states for a session RSVP. Cancellations flip the state instead
/// of deleting the record so penalty decisions stay auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpState {
    Confirmed,
    Cancelled,
    NoShow,
}

impl RsvpState {
    pub const fn label(self) -> &'static str {
        match self {
            RsvpState::Confirmed => "confirmed",
            RsvpState::Cancelled => "cancelled",
            RsvpState::NoShow => "no_show",
        }
    }
}

/// Advertised table difficulty so hosts can set expectations up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Expert,
    Open,
}

/// Read-only view of a scheduled session, owned by the scheduling collaborator.
/// Carries exactly the fields penalty decisions need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub host_id: UserId,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub min_players: u8,
    pub max_players: u8,
    pub experience_level: ExperienceLevel,
    pub status: SessionStatus,
}

/// A member's commitment record for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRecord {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub role: ParticipantRole,
    pub state: RsvpState,
    pub decided_at: DateTime<Utc>,
}

/// Inbound review payload before the engine assigns an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub session_id: SessionId,
    pub author_id: UserId,
    pub target_id: UserId,
    pub rating: u8,
    pub content: String,
    pub is_host_review: bool,
}

/// Accepted post-session feedback targeting a host or a fellow player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: ReviewId,
    pub session_id: SessionId,
    pub author_id: UserId,
    pub target_id: UserId,
    pub rating: u8,
    pub content: String,
    pub is_host_review: bool,
    pub created_at: DateTime<Utc>,
}

/// Which reputation bucket a review lands in on the target's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationBucket {
    Host,
    Player,
}

impl ReputationBucket {
    pub const fn for_review(is_host_review: bool) -> Self {
        if is_host_review {
            ReputationBucket::Host
        } else {
            ReputationBucket::Player
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ReputationBucket::Host => "host",
            ReputationBucket::Player => "player",
        }
    }
}

/// Running rating tally for one reputation bucket. Sum and count stay exact;
/// the mean is derived only when read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingAggregate {
    pub sum: u64,
    pub count: u32,
}

impl RatingAggregate {
    pub fn fold(&mut self, rating: u8) {
        self.sum += u64::from(rating);
        self.count += 1;
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / f64::from(self.count))
        }
    }

    /// Mean rounded to one decimal for outward display.
    pub fn display_mean(&self) -> Option<f64> {
        self.mean().map(round_to_tenth)
    }
}

/// Point-in-time view of a member's standing, derived from the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTrustProfile {
    pub user_id: UserId,
    #[serde(default)]
    pub sessions_joined: i64,
    #[serde(default)]
    pub sessions_hosted: i64,
    #[serde(default)]
    pub host_reputation: Option<f64>,
    #[serde(default)]
    pub player_reputation: Option<f64>,
    #[serde(default)]
    pub host_review_count: u32,
    #[serde(default)]
    pub player_review_count: u32,
}

impl UserTrustProfile {
    /// Profile for a member the engine has never seen.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            sessions_joined: 0,
            sessions_hosted: 0,
            host_reputation: None,
            player_reputation: None,
            host_review_count: 0,
            player_review_count: 0,
        }
    }

    pub fn display_host_reputation(&self) -> Option<f64> {
        self.host_reputation.map(round_to_tenth)
    }

    pub fn display_player_reputation(&self) -> Option<f64> {
        self.player_reputation.map(round_to_tenth)
    }
}

/// A chat message draft awaiting integrity checks before the caller posts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDraft {
    pub author_id: UserId,
    pub channel_id: ChannelId,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// Rejected inputs that make a policy question unanswerable.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PolicyInputError {
    #[error("session has no scheduled start time")]
    MissingStartTime,
    #[error("sessions joined must be non-negative, got {count}")]
    NegativeSessionCount { count: i64 },
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
