//! Simulates a collaborator feed driving one consent-to-summary cycle.
//!
//! Run with `RUST_LOG=debug cargo run --example dashboard_demo` to see the
//! per-tick classification log.

use std::time::Duration;

use attentive::{
    CameraState, FocusTelemetry, SessionController, SharedTelemetryFeed, StubCamera,
    TemplateSummaryGenerator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let feed = SharedTelemetryFeed::new();
    let controller = SessionController::new(
        feed.clone(),
        StubCamera::granting(),
        TemplateSummaryGenerator,
    );

    if !controller.request_consent().await {
        println!("camera consent declined, nothing to record");
        return Ok(());
    }

    feed.publish_camera_state(CameraState {
        ready: true,
        facing_camera: true,
    });

    controller.start_session().await?;
    println!("recording...");

    // Scripted telemetry: engaged, then drifting, then outright distracted.
    let script = [
        (0.92, 0.85, 0),
        (0.88, 0.90, 0),
        (0.55, 0.50, 2),
        (0.45, 0.40, 4),
        (0.25, 0.30, 7),
        (0.20, 0.25, 9),
    ];

    for (attention_score, posture, time_distracted_secs) in script {
        feed.publish_telemetry(FocusTelemetry {
            attention_score,
            posture,
            time_distracted_secs,
        });
        tokio::time::sleep(Duration::from_millis(700)).await;

        if let Some(reading) = controller.latest_reading() {
            println!(
                "  [{}] {}: {}",
                reading.sampled_at.format("%H:%M:%S%.3f"),
                reading.state.as_str(),
                reading.description,
            );
        }
    }

    let session = controller
        .end_session("so today we covered ownership and borrowing")
        .await?;
    println!("session: {}", serde_json::to_string_pretty(&session)?);

    controller.shutdown().await?;
    Ok(())
}
