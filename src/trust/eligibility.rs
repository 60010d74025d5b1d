use serde::{Deserialize, Serialize};

use super::config::TrustPolicyConfig;
use super::domain::{PolicyInputError, UserTrustProfile};

/// Progress toward the hosting gate, always derived fresh from counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub progress: f64,
    pub sessions_remaining: u32,
}

/// Gate deciding who may host, based on sessions joined as a player.
#[derive(Debug, Clone)]
pub struct HostEligibilityGate {
    required_sessions: u32,
}

impl HostEligibilityGate {
    pub fn new(required_sessions: u32) -> Self {
        Self { required_sessions }
    }

    pub fn from_config(config: &TrustPolicyConfig) -> Self {
        Self::new(config.required_sessions_to_host)
    }

    pub fn required_sessions(&self) -> u32 {
        self.required_sessions
    }

    /// Evaluate the gate for a raw join counter.
    ///
    /// Progress is capped at `1.0` and `sessions_remaining` floors at zero,
    /// so extra sessions past the gate never distort either value. Negative
    /// counters are a caller bug and are rejected.
    pub fn evaluate(&self, sessions_joined: i64) -> Result<EligibilityResult, PolicyInputError> {
        if sessions_joined < 0 {
            return Err(PolicyInputError::NegativeSessionCount {
                count: sessions_joined,
            });
        }

        let joined = sessions_joined as u64;
        let required = u64::from(self.required_sessions);
        let progress = if required == 0 {
            1.0
        } else {
            (joined as f64 / required as f64).min(1.0)
        };

        Ok(EligibilityResult {
            eligible: joined >= required,
            progress,
            sessions_remaining: required.saturating_sub(joined) as u32,
        })
    }

    pub fn evaluate_profile(
        &self,
        profile: &UserTrustProfile,
    ) -> Result<EligibilityResult, PolicyInputError> {
        self.evaluate(profile.sessions_joined)
    }
}
