//! # Flow Controller
//!
//! Runs the staged progress flow: binds the page once, schedules every
//! timeline entry independently, and processes all completion signals in a
//! single event loop so state and UI mutation never interleave. The
//! finalization latch is acquired synchronously inside that loop (no await
//! between check and set); the network leg runs as a spawned task whose
//! tagged outcome re-enters the loop and is reduced onto the UI there.
//!
//! Correctness never leans on the schedule's delay ordering. The latch is
//! what makes finalization exactly-once, even if the terminal stage is
//! scheduled several times or fires before its siblings.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::finalize::{FinalizeError, FinalizeOutcome, FinalizeTransport};
use crate::ui::{ProgressBindings, Surface};

use super::events::{FlowEvent, FlowEventKind};
use super::stage::Stage;
use super::state::FlowState;
use super::timeline::{reference_timeline, TimelineEntry};

/// Configuration for the flow controller
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Schedule of simulated stage completions
    pub timeline: Vec<TimelineEntry>,
    /// Capacity of the internal signal channel
    pub signal_buffer: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            timeline: reference_timeline(),
            signal_buffer: 32,
        }
    }
}

/// Signals processed by the controller's event loop
#[derive(Debug)]
enum FlowSignal {
    /// A timeline entry's delay elapsed
    StageElapsed(Stage),
    /// The spawned finalize task settled
    FinalizeSettled(FinalizeOutcome),
}

/// Result of running the flow to completion
#[derive(Debug, Clone, Default)]
pub struct FlowSummary {
    /// Stages marked complete
    pub completed: BTreeSet<Stage>,
    /// Outcome of the single finalize attempt, if one was made
    pub finalize_outcome: Option<FinalizeOutcome>,
    /// Everything that happened, in order
    pub events: Vec<FlowEvent>,
}

/// The progress flow controller
pub struct FlowController<S: Surface, T: FinalizeTransport> {
    config: FlowConfig,
    surface: S,
    transport: Arc<T>,
    state: FlowState,
    events: Vec<FlowEvent>,
    event_tx: Option<mpsc::Sender<FlowEvent>>,
}

impl<S: Surface, T: FinalizeTransport> FlowController<S, T> {
    /// Create a controller over a page surface and a finalize transport
    pub fn new(surface: S, transport: T, config: FlowConfig) -> Self {
        Self {
            config,
            surface,
            transport: Arc::new(transport),
            state: FlowState::new(),
            events: Vec::new(),
            event_tx: None,
        }
    }

    /// Forward flow events to an observer channel as they happen
    pub fn with_event_sink(mut self, tx: mpsc::Sender<FlowEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// The page surface (for inspection after a run)
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run the flow to completion and summarize what happened.
    ///
    /// Inert when the progress root is absent from the surface: no timers
    /// are scheduled, no request is ever issued, and the summary is empty.
    pub async fn run(&mut self) -> FlowSummary {
        let Some(bindings) = ProgressBindings::bind(&self.surface) else {
            tracing::debug!("progress root not found; flow is inert");
            return FlowSummary::default();
        };

        let (tx, mut rx) = mpsc::channel::<FlowSignal>(self.config.signal_buffer);

        for entry in &self.config.timeline {
            let tx = tx.clone();
            let TimelineEntry { delay, stage } = *entry;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(FlowSignal::StageElapsed(stage)).await;
            });
        }
        self.emit(FlowEventKind::FlowStarted).await;
        tracing::info!(entries = self.config.timeline.len(), "review flow started");

        let mut pending_timers = self.config.timeline.len();
        let mut finalize_outcome: Option<FinalizeOutcome> = None;
        let mut finalize_in_flight = false;

        while pending_timers > 0 || finalize_in_flight {
            let Some(signal) = rx.recv().await else {
                break;
            };
            match signal {
                FlowSignal::StageElapsed(stage) => {
                    pending_timers -= 1;

                    let newly_complete = self.state.mark_complete(stage);
                    bindings.mark_stage_complete(&mut self.surface, stage);
                    if newly_complete {
                        tracing::info!(stage = %stage, "stage complete");
                        self.emit(FlowEventKind::StageCompleted { stage }).await;
                    }

                    // Latch check-and-set happens here, synchronously, before
                    // anything in this arm can yield.
                    if stage.is_terminal() && self.state.try_acquire_finalize() {
                        self.emit(FlowEventKind::FinalizeStarted).await;
                        match bindings.finalize_url.clone() {
                            Some(url) => {
                                finalize_in_flight = true;
                                let transport = Arc::clone(&self.transport);
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    let outcome = transport.finalize(&url).await;
                                    let _ = tx.send(FlowSignal::FinalizeSettled(outcome)).await;
                                });
                            }
                            None => {
                                let outcome =
                                    FinalizeOutcome::Failed(FinalizeError::MissingEndpoint);
                                self.reduce_finalize(&bindings, &outcome).await;
                                finalize_outcome = Some(outcome);
                            }
                        }
                    }
                }
                FlowSignal::FinalizeSettled(outcome) => {
                    finalize_in_flight = false;
                    self.reduce_finalize(&bindings, &outcome).await;
                    finalize_outcome = Some(outcome);
                }
            }
        }

        self.emit(FlowEventKind::FlowIdle).await;

        FlowSummary {
            completed: self.state.completed().clone(),
            finalize_outcome,
            events: std::mem::take(&mut self.events),
        }
    }

    /// Reduce a finalize outcome onto the UI. Only a ready packet mutates
    /// the page; declines and failures are logged and leave the surface in
    /// its awaiting-result appearance.
    async fn reduce_finalize(&mut self, bindings: &ProgressBindings, outcome: &FinalizeOutcome) {
        match outcome {
            FinalizeOutcome::Ready(locations) => {
                bindings.present_packet(&mut self.surface, locations);
                tracing::info!(
                    json_url = %locations.json_url,
                    csv_url = %locations.csv_url,
                    "compliance packet ready"
                );
                self.emit(FlowEventKind::PacketReady {
                    json_url: locations.json_url.clone(),
                    csv_url: locations.csv_url.clone(),
                })
                .await;
            }
            FinalizeOutcome::Declined => {
                tracing::warn!("finalize declined by server (ok=false); leaving UI unchanged");
                self.emit(FlowEventKind::FinalizeFailed {
                    error: "declined by server".to_string(),
                })
                .await;
            }
            FinalizeOutcome::Failed(error) => {
                tracing::warn!(%error, "finalize failed; leaving UI unchanged");
                self.emit(FlowEventKind::FinalizeFailed {
                    error: error.to_string(),
                })
                .await;
            }
        }
    }

    async fn emit(&mut self, kind: FlowEventKind) {
        let event = FlowEvent::new(kind);
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event.clone()).await;
        }
        self.events.push(event);
    }
}
