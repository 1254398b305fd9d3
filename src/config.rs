//! Configuration handling for the build hooks.

use crate::types::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default Bugsnag source map upload endpoint.
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "https://upload.bugsnag.com/sourcemap";

/// Default Bugsnag build API endpoint.
pub const DEFAULT_BUILD_ENDPOINT: &str = "https://build.bugsnag.com/";

/// Post-build hooks that report builds and upload source maps to Bugsnag.
#[derive(Parser, Debug, Clone)]
#[command(name = "snagmap")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Upload the source maps of a finished build
    Upload(UploadCommand),
    /// Report the app version and revision of a finished build
    Report(ReportCommand),
    /// Run both hooks, reporter first
    All(AllCommand),
}

#[derive(Args, Debug, Clone)]
pub struct UploadCommand {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub upload: UploadArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ReportCommand {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AllCommand {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub upload: UploadArgs,
    #[command(flatten)]
    pub report: ReportArgs,
}

/// Arguments shared by every hook.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Build result or metafile JSON written by the bundler
    #[arg(short, long)]
    pub result: PathBuf,

    /// Bugsnag project API key
    #[arg(long, env = "BUGSNAG_API_KEY")]
    pub api_key: Option<String>,

    /// Version of the app being built
    #[arg(long, env = "BUGSNAG_APP_VERSION")]
    pub app_version: Option<String>,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the source map uploader.
#[derive(Args, Debug, Clone, Default)]
pub struct UploadArgs {
    /// URL prefix the bundles are served from; joined with each bundle's file name
    #[arg(long)]
    pub public_path: Option<String>,

    /// Complete bundle URL, used verbatim for every upload
    #[arg(long)]
    pub bundle: Option<String>,

    /// Replace source maps already uploaded for this version
    #[arg(long)]
    pub overwrite: Option<bool>,

    /// Directory the manifest paths are relative to
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Source map upload endpoint
    #[arg(long, default_value = DEFAULT_UPLOAD_ENDPOINT)]
    pub upload_endpoint: String,
}

/// Arguments for the build reporter.
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Source control repository URL
    #[arg(long)]
    pub repository: Option<String>,

    /// Source control provider
    #[arg(long, default_value = "github")]
    pub provider: String,

    /// Name of the person or machine running the build
    #[arg(long)]
    pub builder_name: Option<String>,

    /// Release stage of the build (e.g. production)
    #[arg(long)]
    pub release_stage: Option<String>,

    /// Build API endpoint
    #[arg(long, default_value = DEFAULT_BUILD_ENDPOINT)]
    pub build_endpoint: String,
}

/// Options of the source map uploader, fixed for the lifetime of a pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploaderOptions {
    pub api_key: Option<String>,
    pub app_version: Option<String>,
    pub public_path: Option<String>,
    pub bundle: Option<String>,
    pub overwrite: Option<bool>,
    pub working_dir: Option<PathBuf>,
}

impl UploaderOptions {
    pub fn new(common: &CommonArgs, upload: &UploadArgs) -> Self {
        Self {
            api_key: common.api_key.clone(),
            app_version: common.app_version.clone(),
            public_path: upload.public_path.clone(),
            bundle: upload.bundle.clone(),
            overwrite: upload.overwrite,
            working_dir: upload.cwd.clone(),
        }
    }

    /// The public path override, if set to something non-empty.
    pub fn public_path(&self) -> Option<&str> {
        non_empty(&self.public_path)
    }

    /// The verbatim bundle override, if set to something non-empty.
    pub fn bundle(&self) -> Option<&str> {
        non_empty(&self.bundle)
    }

    pub fn has_url_override(&self) -> bool {
        self.public_path().is_some() || self.bundle().is_some()
    }
}

/// Options of the build reporter.
#[derive(Debug, Clone, PartialEq)]
pub struct ReporterOptions {
    pub api_key: Option<String>,
    pub app_version: Option<String>,
    pub repository: Option<String>,
    pub provider: String,
    pub builder_name: Option<String>,
    pub release_stage: Option<String>,
}

impl ReporterOptions {
    pub fn new(common: &CommonArgs, report: &ReportArgs) -> Self {
        Self {
            api_key: common.api_key.clone(),
            app_version: common.app_version.clone(),
            repository: report.repository.clone(),
            provider: report.provider.clone(),
            builder_name: report.builder_name.clone(),
            release_stage: report.release_stage.clone(),
        }
    }
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            app_version: None,
            repository: None,
            provider: "github".to_string(),
            builder_name: None,
            release_stage: None,
        }
    }
}

/// Configuration for one HTTP client.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub endpoint: Url,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl HttpConfig {
    pub fn new(endpoint: &str, timeout_secs: Option<u64>) -> Result<Self> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            timeout: timeout_secs.map(Duration::from_secs),
            user_agent: format!("snagmap/{}", env!("CARGO_PKG_VERSION")),
        })
    }
}

/// Returns the string only when it is set and not blank.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&Some("  ".to_string())), None);
        assert_eq!(non_empty(&Some("abc".to_string())), Some("abc"));
    }

    #[test]
    fn test_parse_upload_command() {
        let config = Config::parse_from([
            "snagmap",
            "upload",
            "--result",
            "meta.json",
            "--api-key",
            "KEY",
            "--app-version",
            "1.2.3",
            "--public-path",
            "https://cdn.example.com/assets/",
            "--overwrite",
            "false",
        ]);

        let Commands::Upload(cmd) = config.command else {
            panic!("Expected upload command");
        };
        let options = UploaderOptions::new(&cmd.common, &cmd.upload);
        assert_eq!(options.api_key.as_deref(), Some("KEY"));
        assert_eq!(options.public_path(), Some("https://cdn.example.com/assets/"));
        assert_eq!(options.overwrite, Some(false));
        assert_eq!(cmd.upload.upload_endpoint, DEFAULT_UPLOAD_ENDPOINT);
    }

    #[test]
    fn test_overwrite_unset_when_omitted() {
        let config = Config::parse_from(["snagmap", "upload", "-r", "meta.json"]);
        let Commands::Upload(cmd) = config.command else {
            panic!("Expected upload command");
        };
        assert_eq!(cmd.upload.overwrite, None);
        assert!(!UploaderOptions::new(&cmd.common, &cmd.upload).has_url_override());
    }

    #[test]
    fn test_parse_all_command() {
        let config = Config::parse_from([
            "snagmap",
            "all",
            "-r",
            "meta.json",
            "--repository",
            "https://github.com/acme/web",
            "--bundle",
            "https://cdn.example.com/app.js",
        ]);

        let Commands::All(cmd) = config.command else {
            panic!("Expected all command");
        };
        assert_eq!(cmd.report.provider, "github");
        assert_eq!(
            cmd.report.repository.as_deref(),
            Some("https://github.com/acme/web")
        );
        assert_eq!(cmd.upload.bundle.as_deref(), Some("https://cdn.example.com/app.js"));
    }

    #[test]
    fn test_http_config_rejects_bad_endpoint() {
        assert!(HttpConfig::new("not a url", None).is_err());

        let config = HttpConfig::new(DEFAULT_BUILD_ENDPOINT, Some(5)).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
