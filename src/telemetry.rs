use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Focus measurements produced by the external perception collaborator.
/// Scores are normalized to `[0, 1]`; `time_distracted_secs` is monotonically
/// non-decreasing within a recording span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusTelemetry {
    pub attention_score: f64,
    pub posture: f64,
    pub time_distracted_secs: u64,
}

impl Default for FocusTelemetry {
    fn default() -> Self {
        Self {
            attention_score: 0.0,
            posture: 0.0,
            time_distracted_secs: 0,
        }
    }
}

/// Webcam status as reported by the media collaborator. Classification is
/// suppressed unless the stream is ready AND the subject is facing the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    pub ready: bool,
    pub facing_camera: bool,
}

impl CameraState {
    pub fn is_live(&self) -> bool {
        self.ready && self.facing_camera
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            ready: false,
            facing_camera: false,
        }
    }
}

/// One consistent view of the feed, taken once per sampling tick so the two
/// values cannot tear between reads within the same tick.
#[derive(Debug, Clone, Copy)]
pub struct TelemetrySnapshot {
    pub telemetry: FocusTelemetry,
    pub camera: CameraState,
}

#[derive(Debug, Default)]
struct FeedInner {
    telemetry: FocusTelemetry,
    camera: CameraState,
}

/// Shared feed written by the perception collaborator and read by the
/// classifier and session controller. Writers replace whole values; readers
/// take snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedTelemetryFeed {
    inner: Arc<RwLock<FeedInner>>,
}

impl SharedTelemetryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish_telemetry(&self, telemetry: FocusTelemetry) {
        self.inner.write().unwrap().telemetry = telemetry;
    }

    pub fn publish_camera_state(&self, camera: CameraState) {
        self.inner.write().unwrap().camera = camera;
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        let guard = self.inner.read().unwrap();
        TelemetrySnapshot {
            telemetry: guard.telemetry,
            camera: guard.camera,
        }
    }

    pub fn telemetry(&self) -> FocusTelemetry {
        self.inner.read().unwrap().telemetry
    }

    pub fn camera_state(&self) -> CameraState {
        self.inner.read().unwrap().camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_live_requires_both_flags() {
        let mut camera = CameraState {
            ready: true,
            facing_camera: true,
        };
        assert!(camera.is_live());

        camera.facing_camera = false;
        assert!(!camera.is_live());

        camera.ready = false;
        camera.facing_camera = true;
        assert!(!camera.is_live());
    }

    #[test]
    fn snapshot_reflects_latest_published_values() {
        let feed = SharedTelemetryFeed::new();
        feed.publish_telemetry(FocusTelemetry {
            attention_score: 0.7,
            posture: 0.4,
            time_distracted_secs: 2,
        });
        feed.publish_camera_state(CameraState {
            ready: true,
            facing_camera: true,
        });

        let snapshot = feed.snapshot();
        assert_eq!(snapshot.telemetry.attention_score, 0.7);
        assert_eq!(snapshot.telemetry.time_distracted_secs, 2);
        assert!(snapshot.camera.is_live());
    }
}
