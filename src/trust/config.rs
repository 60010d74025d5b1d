use serde::{Deserialize, Serialize};

/// Hours before start inside which a player cancellation counts as a no-show.
pub const DEFAULT_PLAYER_CANCELLATION_WINDOW_HOURS: i64 = 72;
/// Hours before start inside which a host cancellation dings host reputation.
pub const DEFAULT_HOST_CANCELLATION_WINDOW_HOURS: i64 = 24;
/// Sessions a member must join before the hosting gate opens.
pub const DEFAULT_REQUIRED_SESSIONS_TO_HOST: u32 = 2;
/// Similarity above this marks a cross-channel repost as a strong duplicate.
pub const DEFAULT_STRONG_DUPLICATE_THRESHOLD: f64 = 0.7;
/// Similarity above this (up to the strong bound) marks a weak duplicate.
pub const DEFAULT_WEAK_DUPLICATE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_MIN_REVIEW_CHARS: usize = 3;
pub const DEFAULT_MAX_REVIEW_CHARS: usize = 500;

/// Review ratings are a fixed 1..=5 scale, not a tunable dial.
pub const MIN_REVIEW_RATING: u8 = 1;
pub const MAX_REVIEW_RATING: u8 = 5;

/// Tunable policy dials shared by every trust evaluator. Defaults carry the
/// platform's standing community rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustPolicyConfig {
    pub player_cancellation_window_hours: i64,
    pub host_cancellation_window_hours: i64,
    pub required_sessions_to_host: u32,
    pub strong_duplicate_threshold: f64,
    pub weak_duplicate_threshold: f64,
    pub min_review_chars: usize,
    pub max_review_chars: usize,
}

impl Default for TrustPolicyConfig {
    fn default() -> Self {
        Self {
            player_cancellation_window_hours: DEFAULT_PLAYER_CANCELLATION_WINDOW_HOURS,
            host_cancellation_window_hours: DEFAULT_HOST_CANCELLATION_WINDOW_HOURS,
            required_sessions_to_host: DEFAULT_REQUIRED_SESSIONS_TO_HOST,
            strong_duplicate_threshold: DEFAULT_STRONG_DUPLICATE_THRESHOLD,
            weak_duplicate_threshold: DEFAULT_WEAK_DUPLICATE_THRESHOLD,
            min_review_chars: DEFAULT_MIN_REVIEW_CHARS,
            max_review_chars: DEFAULT_MAX_REVIEW_CHARS,
        }
    }
}
