//! Version negotiation layer
//!
//! This module provides the core machinery for deciding whether an already
//! resolved dependency can be reused for a new request: parsing version and
//! range strings into typed values, ordering versions by precedence, and
//! evaluating range satisfaction.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │   semver    │────▶│    range     │◀────│  resolver   │
//! │ (parse/cmp) │     │ (satisfies)  │     │ (registry)  │
//! └─────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`semver`]: version grammar parser and precedence comparator
//! - [`range`]: range expressions, operators, and satisfaction checking
//! - [`error`]: parse error types

pub mod error;
pub mod range;
pub mod semver;
