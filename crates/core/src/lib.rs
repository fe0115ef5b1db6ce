//! Domain logic for the specforge generation service.
//!
//! Everything HTTP-agnostic lives here: job workspace allocation,
//! generator subprocess invocation, output tree previews, and archiving.
//! The `specforge-api` crate wires these pieces into HTTP handlers.

pub mod archive;
pub mod error;
pub mod generator;
pub mod job;
pub mod preview;
