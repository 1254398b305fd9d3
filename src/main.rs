//! snagmap - Post-build hooks for Bugsnag.
//!
//! CLI entry point.

use clap::Parser;
use snagmap::config::{CommonArgs, HttpConfig, ReportArgs, UploadArgs};
use snagmap::notify::ConsoleOutput;
use snagmap::{
    BuildHooks, BuildReporterPlugin, BuildResult, Commands, Config, ReporterOptions,
    SourceMapUploaderPlugin, UploaderOptions,
};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("snagmap=debug,info")
    } else if config.quiet {
        EnvFilter::new("snagmap=warn,warn")
    } else {
        EnvFilter::new("snagmap=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let console = ConsoleOutput::new(config.verbose, config.quiet);

    let (common, hooks) = match build_hooks(&config.command, &console) {
        Ok(parts) => parts,
        Err(e) => {
            error!("Failed to configure hooks: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match BuildResult::load(&common.result) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to load build result {:?}: {}", common.result, e);
            return ExitCode::FAILURE;
        }
    };

    let failures = hooks.finish(&result).await;
    if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_hooks<'a>(
    command: &'a Commands,
    console: &ConsoleOutput,
) -> snagmap::Result<(&'a CommonArgs, BuildHooks)> {
    let hooks = BuildHooks::new();

    match command {
        Commands::Upload(cmd) => {
            let hooks = hooks.register(uploader(&cmd.common, &cmd.upload, console)?);
            Ok((&cmd.common, hooks))
        }
        Commands::Report(cmd) => {
            let hooks = hooks.register(reporter(&cmd.common, &cmd.report, console)?);
            Ok((&cmd.common, hooks))
        }
        Commands::All(cmd) => {
            let hooks = hooks
                .register(reporter(&cmd.common, &cmd.report, console)?)
                .register(uploader(&cmd.common, &cmd.upload, console)?);
            Ok((&cmd.common, hooks))
        }
    }
}

fn uploader(
    common: &CommonArgs,
    upload: &UploadArgs,
    console: &ConsoleOutput,
) -> snagmap::Result<SourceMapUploaderPlugin> {
    let http = HttpConfig::new(&upload.upload_endpoint, common.timeout)?;
    let plugin = SourceMapUploaderPlugin::bugsnag(UploaderOptions::new(common, upload), &http)?;
    Ok(plugin.with_console(console.clone()))
}

fn reporter(
    common: &CommonArgs,
    report: &ReportArgs,
    console: &ConsoleOutput,
) -> snagmap::Result<BuildReporterPlugin> {
    let http = HttpConfig::new(&report.build_endpoint, common.timeout)?;
    let plugin = BuildReporterPlugin::new(ReporterOptions::new(common, report), &http)?;
    Ok(plugin.with_console(console.clone()))
}
