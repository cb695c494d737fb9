//! # Flow Events
//!
//! Timestamped record of what the flow did, collected into the run summary
//! and optionally forwarded to an observer channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stage::Stage;

/// Kind of flow event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowEventKind {
    /// Timers scheduled, flow running
    FlowStarted,
    /// A stage's visuals flipped to complete
    StageCompleted { stage: Stage },
    /// Terminal stage observed, latch acquired, finalize request started
    FinalizeStarted,
    /// Finalize succeeded; packet download locations are live
    PacketReady { json_url: String, csv_url: String },
    /// Finalize was declined or failed; UI left untouched
    FinalizeFailed { error: String },
    /// All scheduled work drained, flow is done
    FlowIdle,
}

/// An event in the progress flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEvent {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Kind of event
    pub kind: FlowEventKind,
}

impl FlowEvent {
    pub fn new(kind: FlowEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_serializes_tagged() {
        let event = FlowEvent::new(FlowEventKind::StageCompleted { stage: Stage::Kyc });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"stage_completed\""));
        assert!(json.contains("\"stage\":\"kyc\""));
    }

    #[test]
    fn test_finalize_failed_carries_error_text() {
        let event = FlowEvent::new(FlowEventKind::FinalizeFailed {
            error: "finalize endpoint returned status 502".to_string(),
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("502"));
    }
}
