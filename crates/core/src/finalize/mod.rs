//! # Packet Finalization
//!
//! One-shot request to the server that assembles the downloadable compliance
//! packet, plus the tagged outcome the flow reduces over.

pub mod client;

pub use client::{
    interpret_response, FinalizeError, FinalizeOutcome, FinalizeTransport, HttpFinalizeTransport,
    PacketLocations, ASYNC_ORIGIN_HEADER, ASYNC_ORIGIN_VALUE,
};
