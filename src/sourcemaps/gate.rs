//! Preconditions for an upload pass.

use crate::config::{non_empty, UploaderOptions};
use crate::types::{BuildManifest, BuildResult, Result, SnagmapError};
use std::fmt;
use tracing::warn;

/// Why a pass was skipped without uploading anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The build reported this many errors.
    BuildFailed(usize),
    /// The build result carries no metafile to enumerate.
    NoMetafile,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BuildFailed(n) => write!(f, "build failed with {} error(s)", n),
            SkipReason::NoMetafile => write!(
                f,
                "build result has no metafile (enable `metafile: true` in the bundler options)"
            ),
        }
    }
}

/// Validated inputs of a pass that is allowed to run.
#[derive(Debug, PartialEq)]
pub struct Pass<'a> {
    pub manifest: &'a BuildManifest,
    pub api_key: &'a str,
    pub app_version: &'a str,
}

#[derive(Debug, PartialEq)]
pub enum GateDecision<'a> {
    Proceed(Pass<'a>),
    Skip(SkipReason),
}

/// Decide whether an upload pass should run for this build.
///
/// Missing credentials are a hard error and are checked before anything
/// else. A failed build or a missing metafile skips the pass.
pub fn proceed<'a>(
    result: &'a BuildResult,
    options: &'a UploaderOptions,
) -> Result<GateDecision<'a>> {
    let api_key = non_empty(&options.api_key)
        .ok_or_else(|| SnagmapError::ConfigError("\"apiKey\" is required".to_string()))?;
    let app_version = non_empty(&options.app_version)
        .ok_or_else(|| SnagmapError::ConfigError("\"appVersion\" is required".to_string()))?;

    if !result.errors.is_empty() {
        return Ok(GateDecision::Skip(SkipReason::BuildFailed(result.errors.len())));
    }

    let Some(manifest) = &result.metafile else {
        return Ok(GateDecision::Skip(SkipReason::NoMetafile));
    };

    if !options.has_url_override() {
        warn!(
            "`publicPath`/`bundle` is not set. Source maps must be uploaded with the URL that \
             appears in stack traces; bundles will be uploaded under their output paths. \
             This is safe to ignore for Node deployments."
        );
    }

    Ok(GateDecision::Proceed(Pass {
        manifest,
        api_key,
        app_version,
    }))
}
