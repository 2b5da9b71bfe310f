//! Plan command implementation
//!
//! Shows what a build invocation would do without running the compiler:
//! the selection decision, the resolved extras for this platform, and the
//! module set with source lists and canonical hashes.

use std::process::ExitCode;

use accelbuild_spec::extras::resolve_extras;
use accelbuild_spec::hash::canonical_descriptor_hash;
use accelbuild_spec::outcome::PhaseDecision;
use accelbuild_spec::platform::PlatformClassification;
use anyhow::Result;
use colored::Colorize;

use super::input::load_extensions;

pub fn run(manifest: Option<&str>, no_ext: bool, json: bool) -> Result<ExitCode> {
    let extensions = load_extensions(manifest)?;
    let platform = PlatformClassification::detect();

    let decision = if no_ext {
        PhaseDecision::Disabled
    } else if !platform.supports_native_extensions() {
        PhaseDecision::UnsupportedInterpreter
    } else {
        PhaseDecision::Proceed
    };
    let extras = resolve_extras(&platform);

    if json {
        let mut modules = Vec::with_capacity(extensions.len());
        for ext in &extensions {
            modules.push(serde_json::json!({
                "name": ext.name,
                "sources": ext.sources,
                "include_dirs": ext.include_dirs,
                "descriptor_hash": canonical_descriptor_hash(ext)?,
            }));
        }
        let plan = serde_json::json!({
            "decision": decision,
            "os": platform.os,
            "interpreter": platform.interpreter,
            "extras": extras,
            "modules": modules,
        });
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Decision:".bold(), decision);
    println!(
        "{} {} / {} {}",
        "Platform:".bold(),
        platform.os,
        platform.interpreter.implementation,
        platform.interpreter.version
    );

    println!("{}", "Modules:".bold());
    for ext in &extensions {
        let hash = canonical_descriptor_hash(ext)?;
        println!("  {} {} [{}]", "->".green(), ext.name, &hash[..12]);
        for source in &ext.sources {
            println!("       {}", source.display().to_string().dimmed());
        }
    }

    if !extras.is_empty() {
        println!("{}", "Extras:".bold());
        for extra in &extras {
            if extra.requirements.is_empty() {
                println!("  {} {} (no extra requirements)", "->".green(), extra.name);
            } else {
                println!(
                    "  {} {}: {}",
                    "->".green(),
                    extra.name,
                    extra.requirements.join(", ")
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
