//! Doctor command implementation
//!
//! Checks the build environment without compiling anything: compiler
//! discovery, interpreter classification, and output directory permissions.

use std::env;
use std::process::ExitCode;

use accelbuild_spec::platform::PlatformClassification;
use accelbuild_toolchain::{resolve, ToolchainError};
use anyhow::Result;
use colored::Colorize;

/// Run the doctor command
///
/// Exit code: 0 if a native build could proceed, 1 otherwise. A missing
/// compiler is reported but is not a hard failure; the build phase would
/// fall back gracefully.
pub fn run() -> Result<ExitCode> {
    println!("{}", "accelbuild Doctor".cyan().bold());
    println!("{}", "=================".cyan());
    println!();

    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!(
        "  {} accelbuild-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    let platform = PlatformClassification::detect();
    println!("{}", "Platform:".bold());
    println!("  {} os: {}", "->".green(), platform.os);
    println!(
        "  {} interpreter: {} {}",
        "->".green(),
        platform.interpreter.implementation,
        platform.interpreter.version
    );
    if !platform.supports_native_extensions() {
        println!(
            "     {}",
            "This interpreter cannot load native extensions; builds will be skipped.".dimmed()
        );
    }
    println!();

    println!("{}", "Toolchain:".bold());
    match resolve(None) {
        Ok(compiler) => {
            println!(
                "  {} {} ({})",
                "ok".green(),
                compiler.identity(),
                compiler.path.display()
            );
        }
        Err(ToolchainError::CompilerNotFound) => {
            println!("  {} no C compiler found", "!!".yellow());
            println!(
                "     {}",
                "Builds will fall back gracefully; accelerators will not be compiled.".dimmed()
            );
        }
        Err(e) => {
            println!("  {} compiler check failed: {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    println!("{}", "Permissions:".bold());
    match env::current_dir() {
        Ok(dir) => {
            let test_file = dir.join(".accelbuild_write_test");
            match std::fs::write(&test_file, "test") {
                Ok(_) => {
                    let _ = std::fs::remove_file(&test_file);
                    println!(
                        "  {} Current directory is writable ({})",
                        "ok".green(),
                        dir.display()
                    );
                }
                Err(e) => {
                    println!("  {} Cannot write to current directory: {}", "!!".red(), e);
                    all_ok = false;
                }
            }
        }
        Err(e) => {
            println!("  {} Cannot determine current directory: {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    if all_ok {
        println!("{}", "All checks passed.".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", "Some checks failed.".red().bold());
        Ok(ExitCode::from(1))
    }
}
