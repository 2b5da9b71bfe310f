//! accelbuild CLI - resilient builds for optional native accelerator modules
//!
//! This binary compiles the optional C accelerator modules of a package,
//! downgrading recognized build failures to warnings so installation can
//! always proceed.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use accelbuild_cli::commands;

/// accelbuild - Optional Native Accelerator Builds
#[derive(Parser)]
#[command(name = "accelbuild")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the native accelerator modules
    Build {
        /// Path to an extension manifest (JSON); defaults to the built-in set
        #[arg(short, long)]
        manifest: Option<String>,

        /// Output root directory for built modules (default: build)
        #[arg(short, long)]
        out_root: Option<String>,

        /// Explicit compiler path (overrides discovery; must exist)
        #[arg(long)]
        compiler: Option<String>,

        /// Extra compiler flag (can be repeated)
        #[arg(long = "cflag", value_name = "FLAG", allow_hyphen_values = true)]
        cflags: Vec<String>,

        /// Skip building native extensions entirely
        #[arg(long = "no-ext", alias = "no_ext")]
        no_ext: bool,

        /// Output the machine-readable JSON report on stdout
        #[arg(long)]
        json: bool,

        /// Also write the pretty-printed JSON report to this path
        #[arg(long)]
        report: Option<String>,
    },

    /// Show what a build would do without compiling anything
    Plan {
        /// Path to an extension manifest (JSON); defaults to the built-in set
        #[arg(short, long)]
        manifest: Option<String>,

        /// Plan as if native extensions were disabled
        #[arg(long = "no-ext", alias = "no_ext")]
        no_ext: bool,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the build environment and configuration
    Doctor,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            manifest,
            out_root,
            compiler,
            cflags,
            no_ext,
            json,
            report,
        } => commands::build::run(
            manifest.as_deref(),
            out_root.as_deref(),
            compiler.as_deref(),
            &cflags,
            no_ext,
            json,
            report.as_deref(),
        ),
        Commands::Plan {
            manifest,
            no_ext,
            json,
        } => commands::plan::run(manifest.as_deref(), no_ext, json),
        Commands::Doctor => commands::doctor::run(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
