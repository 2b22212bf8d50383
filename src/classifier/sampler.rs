use std::sync::{Arc, RwLock};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::telemetry::SharedTelemetryFeed;

use super::engine::{classify, AttentivenessReading};
use super::phrases::describe;

const SAMPLE_INTERVAL_MS: u64 = 500;

/// Latest published reading, polled by the presentation layer. Each tick
/// supersedes the previous value; `clear` takes it back to "no reading".
#[derive(Debug, Clone, Default)]
pub struct ReadingSlot {
    inner: Arc<RwLock<Option<AttentivenessReading>>>,
}

impl ReadingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, reading: AttentivenessReading) {
        *self.inner.write().unwrap() = Some(reading);
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap() = None;
    }

    pub fn latest(&self) -> Option<AttentivenessReading> {
        self.inner.read().unwrap().clone()
    }
}

/// Owns the 500 ms sampling task. `stop` cancels and then joins the task, so
/// once it returns no further tick can fire or publish.
pub struct SamplerController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl SamplerController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start(&mut self, feed: SharedTelemetryFeed, slot: ReadingSlot) -> Result<()> {
        if self.handle.is_some() {
            bail!("sampling already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(sampling_loop(feed, slot, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("sampling loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for SamplerController {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifier worker. Every tick takes one consistent snapshot of the feed;
/// when the camera is not live the tick is skipped and the previously
/// published reading is left in place. Stopping the loop is what clears it
/// (the session controller does so after the join).
pub async fn sampling_loop(
    feed: SharedTelemetryFeed,
    slot: ReadingSlot,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(Duration::from_millis(SAMPLE_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut rng = StdRng::from_entropy();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = feed.snapshot();
                if !snapshot.camera.is_live() {
                    debug!("camera not live, skipping classification tick");
                    continue;
                }

                let state = classify(&snapshot.telemetry);
                let description = describe(state, &snapshot.telemetry, &mut rng);
                debug!(
                    "tick: attention={:.2} posture={:.2} distracted={}s -> {}",
                    snapshot.telemetry.attention_score,
                    snapshot.telemetry.posture,
                    snapshot.telemetry.time_distracted_secs,
                    state.as_str(),
                );

                slot.publish(AttentivenessReading {
                    state,
                    description,
                    sampled_at: Utc::now(),
                });
            }
            _ = cancel_token.cancelled() => {
                info!("sampling loop shutting down");
                break;
            }
        }
    }
}
