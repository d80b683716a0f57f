//! Append-only registry of resolved dependency targets

use indexmap::IndexMap;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

use crate::version::error::ParseError;
use crate::version::range::RangeExpression;
use crate::version::semver::ParsedVersion;

/// A resolved dependency location. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub version: ParsedVersion,
    pub target: Url,
}

/// Process-wide table of resolved dependency locations.
///
/// Keys map to entry sequences in insertion order; sequences are append-only.
/// Resolution is first-match: the earliest-registered entry satisfying the
/// demanded range wins, even when a later entry carries a higher version.
/// That keeps already-loaded code stable instead of chasing the newest
/// compatible version.
///
/// The table lives for the process lifetime and is never persisted; every
/// entry is re-derivable from a fresh request, so a restart loses nothing.
#[derive(Debug, Default)]
pub struct DependencyRegistry {
    deps: Mutex<IndexMap<String, Vec<DependencyEntry>>>,
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a dependency key to a target: reuse the first registered entry
    /// whose version satisfies `demanded`, or register `candidate` under
    /// `provided` and return it.
    ///
    /// Both strings are parsed before the table lock is taken, so a malformed
    /// request can never leave partial state behind. The scan and the
    /// conditional append happen under one lock; two concurrent first-time
    /// requests for the same key cannot both register.
    pub async fn resolve(
        &self,
        key: &str,
        provided: &str,
        demanded: &str,
        candidate: Url,
    ) -> Result<Url, ParseError> {
        let range: RangeExpression = demanded.parse()?;
        let provided: ParsedVersion = provided.parse()?;

        let mut deps = self.deps.lock().await;
        let entries = deps.entry(key.to_string()).or_default();

        if let Some(entry) = entries.iter().find(|e| range.satisfies(&e.version)) {
            debug!(
                key,
                version = %entry.version,
                target = %entry.target,
                "reusing registered dependency"
            );
            return Ok(entry.target.clone());
        }

        info!(key, version = %provided, target = %candidate, "registering dependency");
        entries.push(DependencyEntry {
            version: provided,
            target: candidate.clone(),
        });
        Ok(candidate)
    }

    /// Number of registered entries for a key
    pub async fn entry_count(&self, key: &str) -> usize {
        self.deps
            .lock()
            .await
            .get(key)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }
}
