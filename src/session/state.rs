use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::summary::SessionSummary;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    AwaitingConsent,
    ConsentDeclined,
    Ready,
    Recording,
    Complete,
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::AwaitingConsent
    }
}

/// Lifecycle events driving the session machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Grant,
    Decline,
    Start,
    End,
    Reset,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::AwaitingConsent => "AwaitingConsent",
            SessionStatus::ConsentDeclined => "ConsentDeclined",
            SessionStatus::Ready => "Ready",
            SessionStatus::Recording => "Recording",
            SessionStatus::Complete => "Complete",
        }
    }

    /// Transition table: current status x event -> next status.
    /// `None` means the transition is disallowed and callers must no-op.
    pub fn apply(self, event: SessionEvent) -> Option<SessionStatus> {
        use SessionEvent::*;
        use SessionStatus::*;

        match (self, event) {
            (AwaitingConsent, Grant) => Some(Ready),
            (AwaitingConsent, Decline) => Some(ConsentDeclined),
            // The host may re-offer consent after a decline.
            (ConsentDeclined, Grant) => Some(Ready),
            (ConsentDeclined, Decline) => Some(ConsentDeclined),
            (Ready, Start) => Some(Recording),
            (Recording, End) => Some(Complete),
            (Complete, Reset) => Some(Ready),
            _ => None,
        }
    }
}

/// One consent-to-summary cycle. `summary` is populated exactly while the
/// status is `Complete`; `id` and `started_at` cover one recording span.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub status: SessionStatus,
    pub id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub summary: Option<SessionSummary>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            status: SessionStatus::AwaitingConsent,
            id: None,
            started_at: None,
            summary: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::SessionEvent::*;
    use super::SessionStatus::*;

    #[test]
    fn linear_path_is_allowed() {
        assert_eq!(AwaitingConsent.apply(Grant), Some(Ready));
        assert_eq!(Ready.apply(Start), Some(Recording));
        assert_eq!(Recording.apply(End), Some(Complete));
        assert_eq!(Complete.apply(Reset), Some(Ready));
    }

    #[test]
    fn decline_is_terminal_for_lifecycle_events() {
        assert_eq!(AwaitingConsent.apply(Decline), Some(ConsentDeclined));
        assert_eq!(ConsentDeclined.apply(Start), None);
        assert_eq!(ConsentDeclined.apply(End), None);
        assert_eq!(ConsentDeclined.apply(Reset), None);
        // Re-offered consent can still recover.
        assert_eq!(ConsentDeclined.apply(Grant), Some(Ready));
    }

    #[test]
    fn out_of_order_events_are_rejected() {
        assert_eq!(AwaitingConsent.apply(Start), None);
        assert_eq!(AwaitingConsent.apply(End), None);
        assert_eq!(Ready.apply(End), None);
        assert_eq!(Ready.apply(Reset), None);
        assert_eq!(Recording.apply(Start), None);
        assert_eq!(Recording.apply(Reset), None);
        assert_eq!(Complete.apply(End), None);
        assert_eq!(Complete.apply(Start), None);
    }
}
