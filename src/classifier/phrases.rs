use rand::Rng;

use crate::telemetry::FocusTelemetry;

use super::engine::{EngagementState, DISTRACTION_OVERRIDE_SECS};

pub const STRONG_ENGAGEMENT: &str = "Strong engagement detected";
pub const OPTIMAL_POSTURE: &str = "Optimal listening posture";
pub const LIMITED_FOCUS: &str = "Limited screen focus detected";
pub const POOR_POSTURE: &str = "Posture indicates disengagement";
pub const PROCESSING: &str = "Processing attention patterns...";

pub const ENGAGEMENT_PHRASES: [&str; 4] = [
    "Focused and tracking the discussion",
    "Consistent eye contact maintained",
    "Engaged with the current speaker",
    "Attention holding steady",
];

pub const DISTRACTION_PHRASES: [&str; 4] = [
    "Focus appears to be drifting",
    "Gaze wandering from the screen",
    "Attention pulled away from the session",
    "Signs of divided attention",
];

/// Pick the illustrative description for an already-decided state. The random
/// draws are only reached when no signal stands out on its own; the caller
/// supplies the generator so tests can seed it. Nothing here feeds back into
/// classification.
pub fn describe<R: Rng + ?Sized>(
    state: EngagementState,
    telemetry: &FocusTelemetry,
    rng: &mut R,
) -> String {
    match state {
        EngagementState::Attentive => {
            if telemetry.attention_score > 0.8 {
                STRONG_ENGAGEMENT.to_string()
            } else if telemetry.posture > 0.8 {
                OPTIMAL_POSTURE.to_string()
            } else {
                ENGAGEMENT_PHRASES[rng.gen_range(0..ENGAGEMENT_PHRASES.len())].to_string()
            }
        }
        EngagementState::Distracted => {
            if telemetry.attention_score < 0.3 {
                LIMITED_FOCUS.to_string()
            } else if telemetry.posture < 0.3 {
                POOR_POSTURE.to_string()
            } else if telemetry.time_distracted_secs > DISTRACTION_OVERRIDE_SECS {
                format!(
                    "Attention elsewhere for {} seconds",
                    telemetry.time_distracted_secs
                )
            } else {
                DISTRACTION_PHRASES[rng.gen_range(0..DISTRACTION_PHRASES.len())].to_string()
            }
        }
        EngagementState::Unknown => PROCESSING.to_string(),
    }
}
