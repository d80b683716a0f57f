//! Dependency resolution layer
//!
//! This module owns the process-wide table of resolved dependency locations
//! and the boundary component that turns intercepted module-fetch requests
//! into redirects.
//!
//! # Modules
//!
//! - [`registry`]: append-only table of resolved targets, atomic
//!   reuse-or-register resolution per dependency key
//! - [`request`]: extracts resolution parameters from intercepted requests
//!   and emits redirect-or-pass-through decisions

pub mod registry;
pub mod request;
