//! Source map uploader plugin orchestrating one upload pass.

use crate::bugsnag::{BugsnagUploadClient, SourceMapUploader};
use crate::config::{HttpConfig, UploaderOptions};
use crate::hooks::BuildPlugin;
use crate::notify::ConsoleOutput;
use crate::sourcemaps::{
    enumerate, proceed, resolve_url, Dispatcher, GateDecision, OverwritePolicy,
};
use crate::types::{ArtifactReport, BuildResult, PassSummary, Result, UploadTarget};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

/// Uploads the source maps of every script a finished build emitted.
pub struct SourceMapUploaderPlugin {
    options: UploaderOptions,
    dispatcher: Dispatcher,
    console: ConsoleOutput,
}

impl SourceMapUploaderPlugin {
    /// Create a plugin uploading through the given client.
    pub fn new(options: UploaderOptions, uploader: Arc<dyn SourceMapUploader>) -> Self {
        let dispatcher = Dispatcher::new(uploader, options.working_dir.clone());

        Self {
            options,
            dispatcher,
            console: ConsoleOutput::default(),
        }
    }

    /// Create a plugin uploading to the Bugsnag source map API.
    pub fn bugsnag(options: UploaderOptions, http: &HttpConfig) -> Result<Self> {
        let client = BugsnagUploadClient::new(http)?;
        Ok(Self::new(options, Arc::new(client)))
    }

    pub fn with_console(mut self, console: ConsoleOutput) -> Self {
        self.console = console;
        self
    }

    /// Run one upload pass over a finished build.
    ///
    /// Configuration errors abort before the manifest is looked at. Each
    /// artifact is uploaded in turn and its failure never stops the rest.
    pub async fn run_pass(&self, result: &BuildResult) -> Result<PassSummary> {
        let pass = match proceed(result, &self.options)? {
            GateDecision::Proceed(pass) => pass,
            GateDecision::Skip(reason) => {
                warn!("Skipping source map upload: {}", reason);
                let summary = PassSummary {
                    skipped: Some(reason.to_string()),
                    artifacts: Vec::new(),
                };
                self.console.print_summary(&summary);
                return Ok(summary);
            }
        };

        info!("Build finished. Uploading source maps to Bugsnag...");

        let overwrite = OverwritePolicy::from(self.options.overwrite);
        if overwrite.is_overridden() {
            warn!(
                "`overwrite` is set to false but uploads still replace existing source maps \
                 for version {}",
                pass.app_version
            );
        }

        let targets: Vec<UploadTarget> = enumerate(pass.manifest)
            .map(|candidate| UploadTarget {
                resolved_url: resolve_url(&candidate.bundle_path, &self.options),
                bundle_path: candidate.bundle_path,
                source_map_path: candidate.source_map_path,
                app_version: pass.app_version.to_string(),
                api_key: pass.api_key.to_string(),
                overwrite: overwrite.effective(),
            })
            .collect();

        let artifacts: Vec<ArtifactReport> = stream::iter(targets)
            .then(|target| async move {
                let outcome = self.dispatcher.dispatch(&target).await;
                ArtifactReport {
                    bundle_path: target.bundle_path,
                    resolved_url: target.resolved_url,
                    outcome,
                }
            })
            .collect()
            .await;

        let summary = PassSummary {
            skipped: None,
            artifacts,
        };
        info!(
            "Source map upload finished: {} uploaded, {} without map, {} failed",
            summary.succeeded(),
            summary.missing_maps(),
            summary.failed()
        );
        self.console.print_summary(&summary);

        Ok(summary)
    }
}

#[async_trait]
impl BuildPlugin for SourceMapUploaderPlugin {
    fn name(&self) -> &'static str {
        "bugsnag-sourcemap-uploader"
    }

    async fn on_end(&self, result: &BuildResult) -> Result<()> {
        self.run_pass(result).await.map(|_| ())
    }
}
