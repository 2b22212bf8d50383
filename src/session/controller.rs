use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::camera::CameraCapability;
use crate::classifier::engine::AttentivenessReading;
use crate::classifier::sampler::{ReadingSlot, SamplerController};
use crate::summary::{SummaryGenerator, SummaryRequest};
use crate::telemetry::{FocusTelemetry, SharedTelemetryFeed};

use super::state::{Session, SessionEvent, SessionStatus};

/// Owns the session lifecycle: consent, recording span, summary handoff, and
/// the sampling gate. Telemetry and camera state arrive through the shared
/// feed; the webcam and summary collaborators are injected.
pub struct SessionController<C, G> {
    session: Arc<Mutex<Session>>,
    sampler: Arc<Mutex<SamplerController>>,
    reading: ReadingSlot,
    feed: SharedTelemetryFeed,
    camera: C,
    generator: G,
    /// Set while an `end_session` is between its validity check and its
    /// commit, so an interleaved second call takes the no-op path instead of
    /// invoking the generator again.
    ending: AtomicBool,
    torn_down: AtomicBool,
}

impl<C, G> SessionController<C, G>
where
    C: CameraCapability,
    G: SummaryGenerator,
{
    pub fn new(feed: SharedTelemetryFeed, camera: C, generator: G) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            sampler: Arc::new(Mutex::new(SamplerController::new())),
            reading: ReadingSlot::new(),
            feed,
            camera,
            generator,
            ending: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
        }
    }

    pub async fn session(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn status(&self) -> SessionStatus {
        self.session.lock().await.status
    }

    /// Latest classification, or `None` while no recording is sampling.
    pub fn latest_reading(&self) -> Option<AttentivenessReading> {
        self.reading.latest()
    }

    pub fn latest_telemetry(&self) -> FocusTelemetry {
        self.feed.telemetry()
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Ask the webcam collaborator for a stream. Denial and acquisition
    /// failure both fold into `ConsentDeclined` and come back as `false`;
    /// nothing here is an error. A grant that resolves after teardown is
    /// discarded and the stream released rather than applied.
    ///
    /// Called while `Ready`, `Recording`, or `Complete` this is a no-op that
    /// returns `true`: consent is already held and the camera is not touched.
    pub async fn request_consent(&self) -> bool {
        {
            let session = self.session.lock().await;
            if session.status.apply(SessionEvent::Grant).is_none() {
                warn!(
                    "consent requested while {}, ignoring",
                    session.status.as_str()
                );
                return session.status == SessionStatus::Ready
                    || session.status == SessionStatus::Recording
                    || session.status == SessionStatus::Complete;
            }
        }

        let granted = self.camera.acquire().await;

        if self.torn_down.load(Ordering::SeqCst) {
            info!("consent resolved after teardown, discarding");
            if granted {
                self.camera.release();
            }
            return false;
        }

        let mut session = self.session.lock().await;
        let event = if granted {
            SessionEvent::Grant
        } else {
            SessionEvent::Decline
        };
        if let Some(next) = session.status.apply(event) {
            info!("consent {}: {} -> {}", if granted { "granted" } else { "declined" },
                session.status.as_str(), next.as_str());
            session.status = next;
        }
        granted
    }

    /// Begin a recording span. No-op unless the session is `Ready`.
    pub async fn start_session(&self) -> Result<Session> {
        {
            let mut session = self.session.lock().await;
            let Some(next) = session.status.apply(SessionEvent::Start) else {
                warn!("start_session while {}, ignoring", session.status.as_str());
                return Ok(session.clone());
            };

            let session_id = Uuid::new_v4().to_string();
            info!("starting recording session {session_id}");
            session.status = next;
            session.id = Some(session_id);
            session.started_at = Some(Utc::now());
            session.summary = None;
        }

        self.sync_sampling().await?;
        Ok(self.session().await)
    }

    /// Finish the recording span: stop sampling, hand the finalized metrics
    /// and transcript to the summary collaborator, store the result, and
    /// release the webcam. No-op unless currently `Recording`.
    pub async fn end_session(&self, transcript: impl Into<String>) -> Result<Session> {
        // Validity check and the in-flight guard happen under the same lock,
        // so a second end_session interleaved across the awaits below cannot
        // pass the check too.
        let started_at = {
            let session = self.session.lock().await;
            if session.status.apply(SessionEvent::End).is_none()
                || self.ending.swap(true, Ordering::SeqCst)
            {
                warn!("end_session while {}, ignoring", session.status.as_str());
                return Ok(session.clone());
            }
            session.started_at.unwrap_or_else(Utc::now)
        };

        // Stop sampling before anything else so no tick can publish a
        // reading for a session that is already over.
        if let Err(err) = self.sampler.lock().await.stop().await {
            self.ending.store(false, Ordering::SeqCst);
            return Err(err);
        }
        self.reading.clear();

        let snapshot = self.feed.snapshot();
        let request = SummaryRequest {
            duration_secs: (Utc::now() - started_at).num_seconds().max(0),
            average_focus: snapshot.telemetry.attention_score,
            time_distracted_secs: snapshot.telemetry.time_distracted_secs,
            transcript: transcript.into(),
        };
        let summary = self.generator.generate(request).await;

        {
            let mut session = self.session.lock().await;
            if let Some(next) = session.status.apply(SessionEvent::End) {
                session.status = next;
                session.started_at = None;
                session.summary = Some(summary);
                info!(
                    "session {} complete",
                    session.id.as_deref().unwrap_or("<unknown>")
                );
            }
            self.ending.store(false, Ordering::SeqCst);
        }

        self.camera.release();
        Ok(self.session().await)
    }

    /// Return to `Ready` for another recording without re-consent. No-op
    /// unless the session is `Complete`.
    pub async fn reset_session(&self) -> Session {
        let mut session = self.session.lock().await;
        match session.status.apply(SessionEvent::Reset) {
            Some(next) => {
                info!("session reset, ready to record again");
                session.status = next;
                session.id = None;
                session.started_at = None;
                session.summary = None;
            }
            None => warn!("reset_session while {}, ignoring", session.status.as_str()),
        }
        session.clone()
    }

    /// Recompute the derived sampling-enabled flag (recording x camera ready)
    /// and start or stop the sampler on the edge. The host calls this
    /// whenever the camera collaborator reports a state change; lifecycle
    /// operations call it themselves.
    pub async fn sync_sampling(&self) -> Result<()> {
        let enabled = {
            let session = self.session.lock().await;
            session.status == SessionStatus::Recording && self.feed.camera_state().ready
        };

        let mut sampler = self.sampler.lock().await;
        match (sampler.is_active(), enabled) {
            (false, true) => sampler.start(self.feed.clone(), self.reading.clone()),
            (true, false) => {
                sampler.stop().await?;
                self.reading.clear();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Host teardown. Stops sampling and releases the webcam no matter what
    /// state the session is in; safe when nothing was ever acquired.
    pub async fn shutdown(&self) -> Result<()> {
        self.torn_down.store(true, Ordering::SeqCst);
        self.sampler.lock().await.stop().await?;
        self.reading.clear();
        self.camera.release();
        info!("session controller shut down");
        Ok(())
    }
}
