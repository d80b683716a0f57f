use serde::Deserialize;

/// Default path prefix marking a request as a dependency indirection
pub const DEFAULT_DEPS_PREFIX: &str = "/deps:";

/// Resolver configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Path prefix that dependency-indirection requests must carry.
    /// Everything after the prefix is the dependency key.
    pub deps_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            deps_prefix: DEFAULT_DEPS_PREFIX.to_string(),
        }
    }
}
