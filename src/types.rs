//! Core types and errors for the build hooks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while running a build hook.
#[derive(Error, Debug)]
pub enum SnagmapError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing required configuration: {0}")]
    ConfigError(String),

    #[error("Request rejected with HTTP {status}: {body}")]
    RemoteRejected { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, SnagmapError>;

/// A diagnostic emitted by the bundler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMessage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub plugin_name: Option<String>,
}

/// Result of a finished build, as reported by the bundler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildResult {
    #[serde(default)]
    pub errors: Vec<BuildMessage>,
    #[serde(default)]
    pub warnings: Vec<BuildMessage>,
    #[serde(default)]
    pub metafile: Option<BuildManifest>,
}

impl BuildResult {
    /// A successful build that emitted the given manifest.
    pub fn succeeded(manifest: BuildManifest) -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            metafile: Some(manifest),
        }
    }

    /// Parse a build result, or a bare metafile which is taken to be a
    /// successful build.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let is_bare_metafile = value.get("outputs").is_some()
            && value.get("errors").is_none()
            && value.get("metafile").is_none();

        if is_bare_metafile {
            let manifest: BuildManifest = serde_json::from_value(value)?;
            Ok(Self::succeeded(manifest))
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    /// Load a build result from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Every file emitted by one build, keyed by output path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildManifest {
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputInfo>,
}

impl BuildManifest {
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outputs: paths
                .into_iter()
                .map(|p| (p.into(), OutputInfo::default()))
                .collect(),
        }
    }
}

/// Metadata the bundler records for one output file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputInfo {
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub entry_point: Option<String>,
    #[serde(default)]
    pub inputs: BTreeMap<String, OutputInput>,
    #[serde(default)]
    pub exports: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputInput {
    #[serde(default)]
    pub bytes_in_output: u64,
}

/// A bundle paired with the source map expected next to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ArtifactCandidate {
    pub bundle_path: String,
    pub source_map_path: String,
}

/// A fully resolved upload, ready to hand to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadTarget {
    pub bundle_path: String,
    pub source_map_path: String,
    pub resolved_url: String,
    pub app_version: String,
    pub api_key: String,
    pub overwrite: bool,
}

/// Result of uploading one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UploadOutcome {
    Succeeded,
    SkippedNoSourceMap,
    Failed { reason: String },
}

/// Outcome of one artifact within a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    pub bundle_path: String,
    pub resolved_url: String,
    pub outcome: UploadOutcome,
}

/// Everything one upload pass did. Only used for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub skipped: Option<String>,
    pub artifacts: Vec<ArtifactReport>,
}

impl PassSummary {
    pub fn count(&self, pred: impl Fn(&UploadOutcome) -> bool) -> usize {
        self.artifacts.iter().filter(|a| pred(&a.outcome)).count()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, UploadOutcome::Succeeded))
    }

    pub fn missing_maps(&self) -> usize {
        self.count(|o| matches!(o, UploadOutcome::SkippedNoSourceMap))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, UploadOutcome::Failed { .. }))
    }
}
