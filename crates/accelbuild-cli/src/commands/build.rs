//! Build command implementation
//!
//! Runs the resilient build phase over the extension set. The command exits
//! zero whenever the orchestrator completes, including runs where every
//! module failed gracefully; only unrecognized failures produce a non-zero
//! exit.

use std::process::ExitCode;

use accelbuild_spec::outcome::BuildOutcome;
use accelbuild_spec::platform::PlatformClassification;
use accelbuild_toolchain::{BuildOptions, Orchestrator, OrchestratorConfig};
use anyhow::{Context, Result};
use colored::Colorize;

use super::input::load_extensions;

#[allow(clippy::too_many_arguments)]
pub fn run(
    manifest: Option<&str>,
    out_root: Option<&str>,
    compiler: Option<&str>,
    cflags: &[String],
    no_ext: bool,
    json: bool,
    report_path: Option<&str>,
) -> Result<ExitCode> {
    let extensions = load_extensions(manifest)?;
    let platform = PlatformClassification::detect();

    let mut config = OrchestratorConfig::with_out_root(out_root.unwrap_or("build"))
        .cflags(cflags.iter().cloned());
    if let Some(path) = compiler {
        config = config.compiler_path(path);
    }

    let options = BuildOptions {
        disable_native: no_ext,
    };

    // Diagnostics go to stderr so --json output on stdout stays parseable.
    let mut sink = std::io::stderr();
    let report = Orchestrator::with_config(config)
        .run(&extensions, &platform, options, &mut sink)
        .context("native extension build aborted")?;

    if let Some(path) = report_path {
        let pretty = report.to_json_pretty()?;
        std::fs::write(path, pretty)
            .with_context(|| format!("failed to write build report: {path}"))?;
    }

    if json {
        println!("{}", report.to_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    for module in &report.modules {
        match module.outcome {
            BuildOutcome::Succeeded => {
                let artifact = module
                    .artifact
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                println!("  {} {} -> {}", "ok".green(), module.name, artifact);
            }
            BuildOutcome::SkippedByPlatform => {
                println!("  {} {} (skipped)", "--".dimmed(), module.name);
            }
            BuildOutcome::FailedGracefully => {
                println!("  {} {} (not built)", "!!".yellow(), module.name);
            }
        }
    }

    let built = report.count(BuildOutcome::Succeeded);
    let summary = format!(
        "{} of {} accelerator modules built in {}ms",
        built,
        report.modules.len(),
        report.duration_ms
    );
    if report.any_succeeded() || report.modules.is_empty() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }

    Ok(ExitCode::SUCCESS)
}
