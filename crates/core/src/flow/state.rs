//! # Flow State
//!
//! Per-stage completion flags and the one-shot finalization latch, held in a
//! single explicit state object rather than ambient globals. Completion is
//! monotonic: a stage never regresses from complete to pending, and the latch
//! is never unset once acquired.

use std::collections::BTreeSet;

use super::stage::Stage;

/// Completion state for the review flow
#[derive(Debug, Clone, Default)]
pub struct FlowState {
    completed: BTreeSet<Stage>,
    finalized: bool,
}

impl FlowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a stage complete. Returns `true` only on the first call for that
    /// stage; repeats are no-ops.
    pub fn mark_complete(&mut self, stage: Stage) -> bool {
        self.completed.insert(stage)
    }

    /// Whether a stage has completed
    pub fn is_complete(&self, stage: Stage) -> bool {
        self.completed.contains(&stage)
    }

    /// Whether every stage in the fixed set has completed
    pub fn all_complete(&self) -> bool {
        Stage::ALL.iter().all(|s| self.completed.contains(s))
    }

    /// Stages completed so far
    pub fn completed(&self) -> &BTreeSet<Stage> {
        &self.completed
    }

    /// One-shot finalization latch. The first caller observes `false`, sets
    /// the flag, and is permitted to start finalization; every later caller
    /// gets `false` back. The check and set are a single synchronous step --
    /// callers must not await between deciding to finalize and calling this.
    pub fn try_acquire_finalize(&mut self) -> bool {
        if self.finalized {
            return false;
        }
        self.finalized = true;
        true
    }

    /// Whether finalization has been triggered
    pub fn finalize_acquired(&self) -> bool {
        self.finalized
    }
}
