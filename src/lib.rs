pub mod camera;
pub mod classifier;
pub mod session;
pub mod summary;
pub mod telemetry;

pub use camera::{CameraCapability, StubCamera};
pub use classifier::{AttentivenessReading, EngagementState, ReadingSlot, SamplerController};
pub use session::{Session, SessionController, SessionStatus};
pub use summary::{SessionSummary, SummaryGenerator, SummaryRequest, TemplateSummaryGenerator};
pub use telemetry::{CameraState, FocusTelemetry, SharedTelemetryFeed, TelemetrySnapshot};
