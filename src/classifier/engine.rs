use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::telemetry::FocusTelemetry;

/// Weighting of the attentiveness composite.
pub const ATTENTION_WEIGHT: f64 = 0.6;
pub const POSTURE_WEIGHT: f64 = 0.4;

/// Weighted score strictly above this classifies as attentive.
pub const ATTENTIVE_THRESHOLD: f64 = 0.65;
/// Weighted score strictly below this classifies as distracted.
pub const DISTRACTED_THRESHOLD: f64 = 0.4;
/// More than this many distracted seconds forces a distracted classification
/// regardless of the weighted score.
pub const DISTRACTION_OVERRIDE_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EngagementState {
    Attentive,
    Distracted,
    Unknown,
}

impl EngagementState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementState::Attentive => "Attentive",
            EngagementState::Distracted => "Distracted",
            EngagementState::Unknown => "Unknown",
        }
    }
}

/// One classification result, superseded wholesale by the next tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttentivenessReading {
    pub state: EngagementState,
    pub description: String,
    pub sampled_at: DateTime<Utc>,
}

/// The 0.6/0.4 attentiveness composite. Distinct from the raw
/// `attention_score` the presentation layer renders directly; the two signals
/// are intentionally not unified.
pub fn weighted_score(telemetry: &FocusTelemetry) -> f64 {
    ATTENTION_WEIGHT * telemetry.attention_score + POSTURE_WEIGHT * telemetry.posture
}

/// Threshold decision over an already-computed weighted score. Both bounds
/// are strict; the distraction-duration override wins over the mixed band.
pub fn state_for(weighted: f64, time_distracted_secs: u64) -> EngagementState {
    if time_distracted_secs > DISTRACTION_OVERRIDE_SECS {
        return EngagementState::Distracted;
    }
    if weighted > ATTENTIVE_THRESHOLD {
        EngagementState::Attentive
    } else if weighted < DISTRACTED_THRESHOLD {
        EngagementState::Distracted
    } else {
        EngagementState::Unknown
    }
}

/// Classify a single telemetry snapshot. Pure: same triple, same state.
pub fn classify(telemetry: &FocusTelemetry) -> EngagementState {
    state_for(weighted_score(telemetry), telemetry.time_distracted_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telemetry(attention_score: f64, posture: f64, time_distracted_secs: u64) -> FocusTelemetry {
        FocusTelemetry {
            attention_score,
            posture,
            time_distracted_secs,
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let t = telemetry(0.73, 0.41, 3);
        let first = classify(&t);
        for _ in 0..10 {
            assert_eq!(classify(&t), first);
        }
    }

    #[test]
    fn high_scores_classify_attentive() {
        let t = telemetry(0.9, 0.9, 0);
        assert!((weighted_score(&t) - 0.9).abs() < 1e-9);
        assert_eq!(classify(&t), EngagementState::Attentive);
    }

    #[test]
    fn low_scores_classify_distracted() {
        let t = telemetry(0.2, 0.2, 0);
        assert_eq!(classify(&t), EngagementState::Distracted);
    }

    #[test]
    fn mid_scores_classify_unknown() {
        let t = telemetry(0.5, 0.5, 0);
        assert_eq!(classify(&t), EngagementState::Unknown);
    }

    #[test]
    fn distraction_override_beats_strong_score() {
        // Weighted 0.9 would be attentive, but six distracted seconds win.
        let t = telemetry(0.9, 0.9, 6);
        assert_eq!(classify(&t), EngagementState::Distracted);
    }

    #[test]
    fn override_boundary_is_strict() {
        assert_eq!(state_for(0.9, 5), EngagementState::Attentive);
        assert_eq!(state_for(0.9, 6), EngagementState::Distracted);
    }

    #[test]
    fn attentive_threshold_is_strict() {
        // Exactly 0.65 is not attentive.
        assert_eq!(state_for(ATTENTIVE_THRESHOLD, 0), EngagementState::Unknown);
        assert_eq!(
            state_for(ATTENTIVE_THRESHOLD + 0.001, 0),
            EngagementState::Attentive
        );
    }

    #[test]
    fn distracted_threshold_is_strict() {
        // Exactly 0.4 sits in the mixed band, not forced distracted.
        assert_eq!(state_for(DISTRACTED_THRESHOLD, 0), EngagementState::Unknown);
        assert_eq!(
            state_for(DISTRACTED_THRESHOLD - 0.001, 0),
            EngagementState::Distracted
        );
        // The duration override still applies at the exact boundary.
        assert_eq!(state_for(DISTRACTED_THRESHOLD, 6), EngagementState::Distracted);
    }
}
