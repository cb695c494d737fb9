//! # Simulated Review Timeline
//!
//! Ordered (delay, stage) entries that drive the progress animation. Every
//! entry is scheduled independently from flow start; nothing here depends on
//! the delays being monotonic, that is just how the reference schedule reads.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::stage::Stage;

/// One scheduled stage completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Offset from flow start after which the stage completes
    pub delay: Duration,
    /// Stage that completes at that offset
    pub stage: Stage,
}

impl TimelineEntry {
    pub fn new(delay: Duration, stage: Stage) -> Self {
        Self { delay, stage }
    }
}

/// The reference schedule used by the demo flow (milliseconds)
pub fn reference_timeline() -> Vec<TimelineEntry> {
    vec![
        TimelineEntry::new(Duration::from_millis(1500), Stage::Kyc),
        TimelineEntry::new(Duration::from_millis(3000), Stage::Aml),
        TimelineEntry::new(Duration::from_millis(4500), Stage::Ownership),
        TimelineEntry::new(Duration::from_millis(6000), Stage::Governance),
    ]
}
