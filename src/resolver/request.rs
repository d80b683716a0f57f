//! Request-handling boundary
//!
//! The interception host hands every fetch-like request to
//! [`RequestResolver::handle`]. Requests whose path carries the configured
//! dependency-indirection prefix are resolved through the registry and
//! answered with a redirect target; everything else passes through to default
//! network handling untouched. A malformed indirection request also passes
//! through: the host must never crash on bad input, and registry state must
//! stay untouched.

use std::sync::Arc;

use tracing::warn;
use url::Url;

use crate::config::ResolverConfig;
use crate::resolver::registry::DependencyRegistry;

/// An intercepted fetch-like request as delivered by the host
#[derive(Debug, Clone)]
pub struct InterceptedRequest {
    /// Full request URL, including query parameters
    pub url: Url,
    /// URL of the referring document, when the host supplies one
    pub referrer: Option<Url>,
}

/// Outcome of handling an intercepted request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverAction {
    /// Answer with an HTTP 3xx redirect to this location
    Redirect { location: Url },
    /// Hand the request back to default network handling
    PassThrough,
}

/// Resolution parameters extracted from a dependency-indirection request
struct ResolutionParams {
    path: String,
    provided: String,
    demanded: String,
}

impl ResolutionParams {
    fn from_url(url: &Url) -> Option<Self> {
        let mut path = None;
        let mut provided = None;
        let mut version = None;
        let mut demanded = None;

        for (name, value) in url.query_pairs() {
            match name.as_ref() {
                "path" => path = Some(value.into_owned()),
                "provided" => provided = Some(value.into_owned()),
                "version" => version = Some(value.into_owned()),
                "demanded" => demanded = Some(value.into_owned()),
                _ => {}
            }
        }

        let provided = provided.or(version)?;
        let demanded = demanded.unwrap_or_else(|| provided.clone());
        Some(Self {
            path: path?,
            provided,
            demanded,
        })
    }
}

/// Boundary component turning intercepted requests into redirect decisions.
///
/// Holds the registry by `Arc` so the host can share one table across all
/// concurrently delivered interceptions while tests inject isolated
/// instances.
pub struct RequestResolver {
    config: ResolverConfig,
    registry: Arc<DependencyRegistry>,
}

impl RequestResolver {
    pub fn new(config: ResolverConfig, registry: Arc<DependencyRegistry>) -> Self {
        Self { config, registry }
    }

    pub fn registry(&self) -> &Arc<DependencyRegistry> {
        &self.registry
    }

    /// Handle one intercepted request.
    ///
    /// The redirect is only produced after resolution completes; callers can
    /// rely on the returned location already being registered.
    pub async fn handle(&self, request: &InterceptedRequest) -> ResolverAction {
        let Some(key) = request.url.path().strip_prefix(&self.config.deps_prefix) else {
            return ResolverAction::PassThrough;
        };
        if key.is_empty() {
            warn!(url = %request.url, "dependency indirection without a key");
            return ResolverAction::PassThrough;
        }

        let Some(params) = ResolutionParams::from_url(&request.url) else {
            warn!(key, url = %request.url, "missing path or provided version");
            return ResolverAction::PassThrough;
        };

        // Relative references resolve against the referring document, the
        // same way the import statement itself would have.
        let base = request.referrer.as_ref().unwrap_or(&request.url);
        let candidate = match base.join(&params.path) {
            Ok(url) => url,
            Err(e) => {
                warn!(key, path = %params.path, error = %e, "unresolvable dependency path");
                return ResolverAction::PassThrough;
            }
        };

        match self
            .registry
            .resolve(key, &params.provided, &params.demanded, candidate)
            .await
        {
            Ok(location) => ResolverAction::Redirect { location },
            Err(e) => {
                warn!(key, error = %e, "unresolvable dependency request");
                ResolverAction::PassThrough
            }
        }
    }
}
