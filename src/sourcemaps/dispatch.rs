//! Per-artifact upload with failure isolation.

use crate::bugsnag::{SourceMapUploader, UploadRequest};
use crate::types::{UploadOutcome, UploadTarget};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The overwrite option as configured: unset, or explicitly on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    #[default]
    Unset,
    Explicit(bool),
}

impl From<Option<bool>> for OverwritePolicy {
    fn from(value: Option<bool>) -> Self {
        value.map_or(OverwritePolicy::Unset, OverwritePolicy::Explicit)
    }
}

impl OverwritePolicy {
    /// Flag sent with every upload.
    pub fn effective(self) -> bool {
        match self {
            OverwritePolicy::Unset | OverwritePolicy::Explicit(true) => true,
            // TODO: honor an explicit `false` once the intended default is confirmed.
            OverwritePolicy::Explicit(false) => true,
        }
    }

    /// True when the configured value is not what gets sent.
    pub fn is_overridden(self) -> bool {
        self == OverwritePolicy::Explicit(false)
    }
}

/// Uploads one resolved artifact at a time.
pub struct Dispatcher {
    uploader: Arc<dyn SourceMapUploader>,
    working_dir: Option<PathBuf>,
}

impl Dispatcher {
    pub fn new(uploader: Arc<dyn SourceMapUploader>, working_dir: Option<PathBuf>) -> Self {
        Self {
            uploader,
            working_dir,
        }
    }

    /// Where a manifest path lives on disk.
    pub fn on_disk(&self, manifest_path: &str) -> PathBuf {
        match self.working_dir {
            Some(ref dir) => dir.join(manifest_path),
            None => Path::new(manifest_path).to_path_buf(),
        }
    }

    /// Upload one artifact. Never fails: every error becomes an outcome.
    pub async fn dispatch(&self, target: &UploadTarget) -> UploadOutcome {
        let source_map = self.on_disk(&target.source_map_path);
        debug!("Checking for source map at {}...", source_map.display());

        // Checked once here; the file may still vanish before the upload reads it.
        // Directories and other non-regular files count as missing.
        if !source_map.is_file() {
            warn!(
                "Source map not found for {} ({} is missing or not a regular file). \
                 Skipping upload.",
                target.bundle_path,
                source_map.display()
            );
            return UploadOutcome::SkippedNoSourceMap;
        }

        info!(
            "Uploading source map for {} as {}...",
            target.bundle_path, target.resolved_url
        );

        let request = UploadRequest {
            api_key: target.api_key.clone(),
            bundle: target.resolved_url.clone(),
            source_map,
            minified_file: Some(self.on_disk(&target.bundle_path)),
            app_version: target.app_version.clone(),
            overwrite: target.overwrite,
        };

        match self.uploader.upload_one(&request).await {
            Ok(()) => {
                info!("Uploaded source map for {}.", target.bundle_path);
                UploadOutcome::Succeeded
            }
            Err(e) => {
                error!(
                    "Failed to upload source map for {}: {}",
                    target.bundle_path, e
                );
                UploadOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingUploader;
    use tempfile::TempDir;

    fn target(bundle: &str) -> UploadTarget {
        UploadTarget {
            bundle_path: bundle.to_string(),
            source_map_path: format!("{}.map", bundle),
            resolved_url: format!("https://cdn.example.com/{}", bundle),
            app_version: "1.0.0".to_string(),
            api_key: "KEY".to_string(),
            overwrite: true,
        }
    }

    #[test]
    fn test_overwrite_policy() {
        assert_eq!(OverwritePolicy::from(None), OverwritePolicy::Unset);
        assert!(OverwritePolicy::Unset.effective());
        assert!(OverwritePolicy::Explicit(true).effective());
        assert!(!OverwritePolicy::Unset.is_overridden());

        let explicit_false = OverwritePolicy::from(Some(false));
        assert!(explicit_false.effective());
        assert!(explicit_false.is_overridden());
    }

    #[tokio::test]
    async fn test_missing_map_skips_without_upload() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("app.js"), "x").unwrap();

        let uploader = Arc::new(RecordingUploader::default());
        let dispatcher = Dispatcher::new(uploader.clone(), Some(dir.path().to_path_buf()));

        let outcome = dispatcher.dispatch(&target("app.js")).await;
        assert_eq!(outcome, UploadOutcome::SkippedNoSourceMap);
        assert!(uploader.requests().is_empty());
    }

    #[tokio::test]
    async fn test_directory_in_place_of_map_is_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("app.js"), "x").unwrap();
        std::fs::create_dir(dir.path().join("app.js.map")).unwrap();

        let uploader = Arc::new(RecordingUploader::default());
        let dispatcher = Dispatcher::new(uploader.clone(), Some(dir.path().to_path_buf()));

        let outcome = dispatcher.dispatch(&target("app.js")).await;
        assert_eq!(outcome, UploadOutcome::SkippedNoSourceMap);
        assert!(uploader.requests().is_empty());
    }

    #[tokio::test]
    async fn test_existing_map_is_uploaded() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("app.js"), "x").unwrap();
        std::fs::write(dir.path().join("app.js.map"), "{}").unwrap();

        let uploader = Arc::new(RecordingUploader::default());
        let dispatcher = Dispatcher::new(uploader.clone(), Some(dir.path().to_path_buf()));

        let outcome = dispatcher.dispatch(&target("app.js")).await;
        assert_eq!(outcome, UploadOutcome::Succeeded);

        let requests = uploader.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].bundle, "https://cdn.example.com/app.js");
        assert_eq!(requests[0].source_map, dir.path().join("app.js.map"));
        assert_eq!(requests[0].minified_file, Some(dir.path().join("app.js")));
        assert_eq!(requests[0].app_version, "1.0.0");
        assert!(requests[0].overwrite);
    }

    #[tokio::test]
    async fn test_upload_failure_becomes_outcome() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("app.js.map"), "{}").unwrap();

        let uploader = Arc::new(RecordingUploader::failing(["https://cdn.example.com/app.js"]));
        let dispatcher = Dispatcher::new(uploader.clone(), Some(dir.path().to_path_buf()));

        match dispatcher.dispatch(&target("app.js")).await {
            UploadOutcome::Failed { reason } => assert!(reason.contains("500")),
            other => panic!("Expected Failed, got {:?}", other),
        }
        assert_eq!(uploader.requests().len(), 1);
    }

    #[test]
    fn test_on_disk_paths() {
        let uploader = Arc::new(RecordingUploader::default());

        let dispatcher = Dispatcher::new(uploader.clone(), None);
        assert_eq!(dispatcher.on_disk("out/app.js"), PathBuf::from("out/app.js"));

        let dispatcher = Dispatcher::new(uploader, Some(PathBuf::from("/work")));
        assert_eq!(dispatcher.on_disk("out/app.js"), PathBuf::from("/work/out/app.js"));
    }
}
