//! # Progress Flow
//!
//! The staged-completion state machine and its controller.
//!
//! ## Flow
//!
//! ```text
//! Timeline entries ──(independent timers)──▶ event loop
//!     event loop: mark stage complete ─▶ update page
//!                 terminal stage ─▶ latch ─▶ finalize task ──▶ tagged outcome
//!                 tagged outcome ─▶ reduce onto page (or log and leave it)
//! ```

pub mod controller;
pub mod events;
pub mod stage;
pub mod state;
pub mod timeline;

pub use controller::{FlowConfig, FlowController, FlowSummary};
pub use events::{FlowEvent, FlowEventKind};
pub use stage::Stage;
pub use state::FlowState;
pub use timeline::{reference_timeline, TimelineEntry};
