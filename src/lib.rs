//! snagmap - Post-build hooks for Bugsnag.
//!
//! This library provides two hooks that run once a bundler has finished:
//! - A build reporter that records the app version and source revision
//! - A source map uploader that pairs each emitted script with its `.map`
//!   file and uploads it under the URL the script is served from
//!
//! # Example
//!
//! ```no_run
//! use snagmap::config::{HttpConfig, UploaderOptions, DEFAULT_UPLOAD_ENDPOINT};
//! use snagmap::{BuildHooks, BuildResult, SourceMapUploaderPlugin};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let options = UploaderOptions {
//!         api_key: Some("YOUR_API_KEY".to_string()),
//!         app_version: Some("1.0.0".to_string()),
//!         public_path: Some("https://cdn.example.com/assets/".to_string()),
//!         ..Default::default()
//!     };
//!     let http = HttpConfig::new(DEFAULT_UPLOAD_ENDPOINT, None).unwrap();
//!     let hooks = BuildHooks::new()
//!         .register(SourceMapUploaderPlugin::bugsnag(options, &http).unwrap());
//!
//!     let result = BuildResult::load(Path::new("meta.json")).unwrap();
//!     let failures = hooks.finish(&result).await;
//!     println!("{} hook(s) failed", failures.len());
//! }
//! ```

pub mod bugsnag;
pub mod config;
pub mod hooks;
pub mod notify;
pub mod reporter;
pub mod sourcemaps;
pub mod types;
pub mod uploader;

#[cfg(test)]
mod test_support;

pub use config::{Commands, Config, ReporterOptions, UploaderOptions};
pub use hooks::{BuildHooks, BuildPlugin, HookFailure};
pub use reporter::BuildReporterPlugin;
pub use types::{
    ArtifactCandidate, BuildManifest, BuildResult, PassSummary, Result, SnagmapError,
    UploadOutcome, UploadTarget,
};
pub use uploader::SourceMapUploaderPlugin;
