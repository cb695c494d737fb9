//! # Packetflow Core
//!
//! Client-side progress flow for a multi-stage compliance review, plus the
//! exactly-once finalization protocol that requests the downloadable
//! compliance packet when the review completes.
//!
//! ## Architecture
//!
//! - `flow/` - stages, simulated timeline, completion state + finalize latch,
//!   the controller event loop, and flow events
//! - `finalize/` - the one-shot finalize request, its transport seam, and the
//!   tagged outcome the flow reduces over
//! - `ui/` - the addressable page surface, the one-shot element registry, and
//!   an in-memory surface for tests and demos
//!
//! ## Usage
//!
//! ```rust,ignore
//! use packetflow_core::flow::{FlowConfig, FlowController};
//! use packetflow_core::finalize::HttpFinalizeTransport;
//! use packetflow_core::ui::InMemorySurface;
//!
//! let surface = InMemorySurface::compliance_page(Some("http://localhost:5000/finalize/ORD-1"));
//! let mut controller =
//!     FlowController::new(surface, HttpFinalizeTransport::new(), FlowConfig::default());
//! let summary = controller.run().await;
//! ```

pub mod finalize;
pub mod flow;
pub mod ui;
