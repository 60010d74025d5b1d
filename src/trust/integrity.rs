use serde::{Deserialize, Serialize};

use super::config::TrustPolicyConfig;
use super::domain::MessageDraft;
use super::{similarity, spoiler};

/// Duplicate severity with the winning score against recent history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "severity", rename_all = "snake_case")]
pub enum DuplicateFlag {
    Weak { score: f64 },
    Strong { score: f64 },
}

impl DuplicateFlag {
    pub fn score(self) -> f64 {
        match self {
            DuplicateFlag::Weak { score } | DuplicateFlag::Strong { score } => score,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DuplicateFlag::Weak { .. } => "weak",
            DuplicateFlag::Strong { .. } => "strong",
        }
    }
}

/// Advisory outcome for a draft. Flags inform the author; they never block
/// the message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrityFlags {
    pub duplicate: Option<DuplicateFlag>,
    pub spoiler: bool,
}

/// Stateless checks applied to a draft before the caller posts it.
#[derive(Debug, Clone)]
pub struct ContentIntegrityService {
    strong_threshold: f64,
    weak_threshold: f64,
}

impl ContentIntegrityService {
    pub fn new(config: &TrustPolicyConfig) -> Self {
        Self {
            strong_threshold: config.strong_duplicate_threshold,
            weak_threshold: config.weak_duplicate_threshold,
        }
    }

    /// Score the draft against the caller's recent-history window and attach
    /// the spoiler flag.
    ///
    /// Only messages by the same author in a different channel count as
    /// duplicate candidates; reposting into the same channel is an edit or a
    /// bump, not crossposting. The highest candidate score decides the band:
    /// above the strong threshold is a strong duplicate, above the weak
    /// threshold (up to and including strong) is weak, anything else is
    /// unflagged.
    pub fn evaluate(
        &self,
        draft: &MessageDraft,
        recent_messages: &[MessageDraft],
    ) -> IntegrityFlags {
        let mut best: f64 = 0.0;
        for message in recent_messages {
            if message.author_id != draft.author_id || message.channel_id == draft.channel_id {
                continue;
            }
            let score = similarity::score(&draft.content, &message.content);
            if score > best {
                best = score;
            }
        }

        let duplicate = if best > self.strong_threshold {
            Some(DuplicateFlag::Strong { score: best })
        } else if best > self.weak_threshold {
            Some(DuplicateFlag::Weak { score: best })
        } else {
            None
        };

        IntegrityFlags {
            duplicate,
            spoiler: spoiler::classify(&draft.content),
        }
    }
}
