//! # UI Surface & Bindings
//!
//! The page the flow animates, behind an addressable-surface trait, plus the
//! one-shot element registry and the reducers that mutate it.

pub mod memory;
pub mod registry;
pub mod surface;

pub use memory::InMemorySurface;
pub use registry::{ProgressBindings, StageElements, CHECK_GLYPH, PACKET_READY_HEADLINE};
pub use surface::{ElementHandle, Surface};
