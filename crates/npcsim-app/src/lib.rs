//! The host-facing command surface for the NPC decision engine.
//!
//! `npcsim-app` is the only crate in the workspace allowed an opinion
//! about how a host talks to the simulation: name-based agent lookup,
//! wire-integer enum mapping, and the one place a malformed request is
//! rejected with a `Result` instead of degrading quietly. It never
//! installs a global `tracing` subscriber — that's the embedding host's
//! call.

pub mod error;
pub mod surface;

pub use error::CommandError;
pub use surface::Surface;
