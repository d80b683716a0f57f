//! Shared-dependency deduplication for federated module loading.
//!
//! Independently deployed bundles often ship overlapping copies of the same
//! shared dependency. This crate implements the version negotiation core that
//! lets an interception host collapse those copies: intercepted module-fetch
//! requests are matched against already-resolved dependency locations and
//! redirected to a compatible one, registering a new location only when no
//! existing entry satisfies the demanded version range.
//!
//! # Modules
//!
//! - [`version`]: semver grammar parser, precedence comparator, range
//!   satisfaction
//! - [`resolver`]: dependency registry and the request-handling boundary
//! - [`config`]: resolver configuration

pub mod config;
pub mod resolver;
pub mod version;
