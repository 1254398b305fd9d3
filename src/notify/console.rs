//! Colored console output for hook results.

use crate::types::{ArtifactReport, PassSummary, UploadOutcome};
use colored::Colorize;

/// Console output handler with colors and formatting.
#[derive(Debug, Clone)]
pub struct ConsoleOutput {
    verbose: bool,
    quiet: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print one artifact's result.
    pub fn print_artifact(&self, report: &ArtifactReport) {
        let is_failure = matches!(report.outcome, UploadOutcome::Failed { .. });
        if self.quiet && !is_failure {
            return;
        }

        match &report.outcome {
            UploadOutcome::Succeeded => {
                println!("{} {}", "[+]".green(), report.bundle_path.bright_white());
                if self.verbose {
                    println!("    +-- URL: {}", report.resolved_url.dimmed());
                }
            }
            UploadOutcome::SkippedNoSourceMap => {
                println!(
                    "{} {} {}",
                    "[-]".yellow(),
                    report.bundle_path,
                    "(no source map)".dimmed()
                );
            }
            UploadOutcome::Failed { reason } => {
                println!("{} {}", "[!]".red().bold(), report.bundle_path.bright_white());
                println!("    +-- {}", reason.red());
            }
        }
    }

    /// Print the totals of an upload pass.
    pub fn print_summary(&self, summary: &PassSummary) {
        if let Some(ref reason) = summary.skipped {
            if !self.quiet {
                println!("{} Source map upload skipped: {}", "[*]".bright_blue(), reason);
            }
            return;
        }

        for report in &summary.artifacts {
            self.print_artifact(report);
        }

        if self.quiet && summary.failed() == 0 {
            return;
        }

        println!();
        println!("{}", "=== Source Map Upload ===".bright_cyan());
        println!("  Bundles:   {}", summary.artifacts.len());
        println!("  Uploaded:  {}", summary.succeeded().to_string().green());
        println!("  No map:    {}", summary.missing_maps().to_string().yellow());

        let failed = summary.failed();
        if failed > 0 {
            println!("  {}", format!("Failed:    {}", failed).red().bold());
        } else {
            println!("  Failed:    0");
        }
        println!();
    }

    /// Print the result of a build report.
    pub fn print_build_reported(&self, app_version: &str, accepted: bool) {
        if accepted {
            if !self.quiet {
                println!(
                    "{} Build {} reported to Bugsnag",
                    "[+]".green(),
                    app_version.bright_white()
                );
            }
        } else {
            println!(
                "{} Build {} could not be reported",
                "[!]".red().bold(),
                app_version.bright_white()
            );
        }
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_output_creation() {
        let output = ConsoleOutput::new(true, false);
        assert!(output.verbose);
        assert!(!output.quiet);
    }

    #[test]
    fn test_print_summary() {
        // Just test that it doesn't panic
        let output = ConsoleOutput::new(true, false);
        output.print_summary(&PassSummary {
            skipped: None,
            artifacts: vec![
                ArtifactReport {
                    bundle_path: "out/app.js".to_string(),
                    resolved_url: "https://cdn.example.com/app.js".to_string(),
                    outcome: UploadOutcome::Succeeded,
                },
                ArtifactReport {
                    bundle_path: "out/vendor.js".to_string(),
                    resolved_url: "out/vendor.js".to_string(),
                    outcome: UploadOutcome::Failed {
                        reason: "HTTP 500".to_string(),
                    },
                },
            ],
        });
        output.print_summary(&PassSummary {
            skipped: Some("build failed with 1 error(s)".to_string()),
            artifacts: vec![],
        });
    }
}
