use std::future::Future;

use serde::{Deserialize, Serialize};

/// Finalized session metrics handed to the summary collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub duration_secs: i64,
    pub average_focus: f64,
    pub time_distracted_secs: u64,
    pub transcript: String,
}

/// Whatever the generator produced; stored on the session unmodified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub text: String,
}

/// Summary-generation collaborator contract.
pub trait SummaryGenerator: Send + Sync {
    fn generate(&self, request: SummaryRequest) -> impl Future<Output = SessionSummary> + Send;
}

/// Template-based generator for the demo and tests.
#[derive(Debug, Default)]
pub struct TemplateSummaryGenerator;

impl SummaryGenerator for TemplateSummaryGenerator {
    async fn generate(&self, request: SummaryRequest) -> SessionSummary {
        SessionSummary {
            text: format!(
                "Recorded {}s, final focus {:.0}%, {}s distracted. Transcript: {} words.",
                request.duration_secs,
                request.average_focus * 100.0,
                request.time_distracted_secs,
                request.transcript.split_whitespace().count(),
            ),
        }
    }
}
