pub mod engine;
pub mod phrases;
pub mod sampler;

pub use engine::{classify, weighted_score, AttentivenessReading, EngagementState};
pub use sampler::{ReadingSlot, SamplerController};
