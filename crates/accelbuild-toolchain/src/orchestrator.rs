//! The resilient build orchestrator.
//!
//! Attempts compilation of zero or more optional native accelerator
//! modules, isolates failures per module, and guarantees that no recognized
//! failure aborts the overall install. Descriptors are visited sequentially
//! in declaration order, exactly once per invocation.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use accelbuild_spec::extension::ExtensionDescriptor;
use accelbuild_spec::failure::{Classified, FailureKind, RecognizedFailures};
use accelbuild_spec::hash::canonical_descriptor_hash;
use accelbuild_spec::outcome::{ModuleOutcome, PhaseDecision};
use accelbuild_spec::platform::{sanitize_cflags, PlatformClassification};
use accelbuild_spec::remedy;
use accelbuild_spec::report::{BuildReport, ReportNotice, ReportWarning, WarningCode};

use crate::compiler::{self, ResolvedCompiler};
use crate::error::{ToolchainError, ToolchainResult};
use crate::invoke;

/// Explicit invocation options.
///
/// The disable switch is a plain value handed to the orchestrator; no
/// ambient process-wide state is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Skip the entire native-build phase. User-requested; never fails.
    pub disable_native: bool,
}

/// Configuration for the build orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Explicit compiler path. Authoritative when set.
    pub compiler_path: Option<PathBuf>,
    /// Scratch directory for object files; a temp dir is used when unset.
    pub build_dir: Option<PathBuf>,
    /// Root directory built modules are placed under.
    pub out_root: PathBuf,
    /// Inherited compiler flags, sanitized per platform before use.
    pub cflags: Vec<String>,
    /// Override for the recognized-failure set; derived from the platform
    /// classification when unset.
    pub recognized: Option<RecognizedFailures>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            compiler_path: None,
            build_dir: None,
            out_root: PathBuf::from("build"),
            cflags: Vec::new(),
            recognized: None,
        }
    }
}

impl OrchestratorConfig {
    /// Creates a config with the given output root.
    pub fn with_out_root(out_root: impl Into<PathBuf>) -> Self {
        Self {
            out_root: out_root.into(),
            ..Default::default()
        }
    }

    /// Sets the compiler path.
    pub fn compiler_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.compiler_path = Some(path.into());
        self
    }

    /// Sets the scratch build directory.
    pub fn build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = Some(dir.into());
        self
    }

    /// Sets the inherited compiler flags.
    pub fn cflags(mut self, flags: impl IntoIterator<Item = String>) -> Self {
        self.cflags = flags.into_iter().collect();
        self
    }

    /// Overrides the recognized-failure set.
    pub fn recognized(mut self, set: RecognizedFailures) -> Self {
        self.recognized = Some(set);
        self
    }
}

/// The build orchestrator.
pub struct Orchestrator {
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Creates an orchestrator with default configuration.
    pub fn new() -> Self {
        Self {
            config: OrchestratorConfig::default(),
        }
    }

    /// Creates an orchestrator with the given configuration.
    pub fn with_config(config: OrchestratorConfig) -> Self {
        Self { config }
    }

    /// Runs the build phase over the given descriptors.
    ///
    /// Raw toolchain error text and fallback warnings are written to `sink`
    /// in that order, per module. The returned report records one outcome
    /// per descriptor. An `Err` here means an unrecognized failure: the
    /// overall install must abort.
    pub fn run(
        &self,
        descriptors: &[ExtensionDescriptor],
        platform: &PlatformClassification,
        options: BuildOptions,
        sink: &mut dyn Write,
    ) -> ToolchainResult<BuildReport> {
        let start = Instant::now();

        // Selection phase.
        if options.disable_native {
            let mut report = BuildReport::new(PhaseDecision::Disabled);
            report.modules = skip_all(descriptors)?;
            report.duration_ms = start.elapsed().as_millis() as u64;
            return Ok(report);
        }
        if !platform.supports_native_extensions() {
            let notice = remedy::interpreter_skip_notice();
            let _ = writeln!(sink, "{notice}");
            let mut report = BuildReport::new(PhaseDecision::UnsupportedInterpreter);
            report.notices.push(ReportNotice::new(notice));
            report.modules = skip_all(descriptors)?;
            report.duration_ms = start.elapsed().as_millis() as u64;
            return Ok(report);
        }

        let mut report = BuildReport::new(PhaseDecision::Proceed);
        let recognized = self
            .config
            .recognized
            .clone()
            .unwrap_or_else(|| RecognizedFailures::for_classification(platform));

        // Compiler resolution. A missing compiler is a per-descriptor
        // build-class failure: each module below still gets its own named
        // warning. Only a platform-configuration error fails the whole
        // phase with a single warning.
        let compiler = match compiler::resolve(self.config.compiler_path.as_deref()) {
            Ok(compiler) => Ok(compiler),
            Err(err) => {
                let classified = err.classify();
                if !recognized.permits(classified) {
                    return Err(err);
                }
                if classified == Classified::Recognized(FailureKind::PlatformBuild) {
                    let _ = writeln!(sink, "{err}");
                    let warning = remedy::phase_fallback_warning();
                    let _ = writeln!(sink, "{warning}");
                    report
                        .warnings
                        .push(ReportWarning::new(WarningCode::PhaseFallback, warning));
                    for descriptor in descriptors {
                        report.modules.push(ModuleOutcome::failed_gracefully(
                            &descriptor.name,
                            descriptor_hash(descriptor)?,
                            Some(err.to_string()),
                        ));
                    }
                    report.duration_ms = start.elapsed().as_millis() as u64;
                    return Ok(report);
                }
                Err(err)
            }
        };

        let cflags = match &compiler {
            Ok(compiler) => {
                report.compiler = Some(compiler.identity());
                self.sanitized_cflags(platform, compiler)
            }
            Err(_) => Vec::new(),
        };

        // Compilation phase: each descriptor independently.
        for descriptor in descriptors {
            descriptor.validate().map_err(|source| {
                ToolchainError::InvalidDescriptor {
                    name: descriptor.name.clone(),
                    source,
                }
            })?;
            let hash = descriptor_hash(descriptor)?;

            match &compiler {
                Err(err) => {
                    // Resolution already failed with a recognized kind;
                    // every module fails the same way, raw error first.
                    let _ = writeln!(sink, "{err}");
                    let warning = remedy::module_fallback_warning(&descriptor.name);
                    let _ = writeln!(sink, "{warning}");
                    report.warnings.push(ReportWarning::for_module(
                        WarningCode::ModuleFallback,
                        warning,
                        &descriptor.name,
                    ));
                    report.modules.push(ModuleOutcome::failed_gracefully(
                        &descriptor.name,
                        hash,
                        Some(err.to_string()),
                    ));
                }
                Ok(compiler) => match self.build_extension(descriptor, platform, compiler, &cflags)
                {
                    Ok(artifact) => {
                        report
                            .modules
                            .push(ModuleOutcome::succeeded(&descriptor.name, hash, artifact));
                    }
                    Err(err) if recognized.permits(err.classify()) => {
                        // Raw error first, then the structured warning.
                        let _ = writeln!(sink, "{err}");
                        let warning = remedy::module_fallback_warning(&descriptor.name);
                        let _ = writeln!(sink, "{warning}");
                        report.warnings.push(ReportWarning::for_module(
                            WarningCode::ModuleFallback,
                            warning,
                            &descriptor.name,
                        ));
                        report.modules.push(ModuleOutcome::failed_gracefully(
                            &descriptor.name,
                            hash,
                            Some(err.to_string()),
                        ));
                    }
                    Err(err) => return Err(err),
                },
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        Ok(report)
    }

    // Compiles and links one descriptor, returning the artifact path.
    fn build_extension(
        &self,
        descriptor: &ExtensionDescriptor,
        platform: &PlatformClassification,
        compiler: &ResolvedCompiler,
        cflags: &[String],
    ) -> ToolchainResult<PathBuf> {
        // The temp dir must outlive the link step, so it is bound here even
        // though only its path is read.
        let _scratch;
        let build_dir = match &self.config.build_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                dir.clone()
            }
            None => {
                let scratch = tempfile::Builder::new().prefix("accelbuild_").tempdir()?;
                let path = scratch.path().to_path_buf();
                _scratch = scratch;
                path
            }
        };

        let mut objects = Vec::with_capacity(descriptor.sources.len());
        for (index, source) in descriptor.sources.iter().enumerate() {
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| index.to_string());
            let out_obj = build_dir.join(format!("{}_{}_{}.o", descriptor.name, index, stem));
            invoke::compile_object(compiler, source, &descriptor.include_dirs, cflags, &out_obj)?;
            objects.push(out_obj);
        }

        let artifact = self
            .config
            .out_root
            .join(descriptor.module_relative_path(&platform.os));
        invoke::link_module(compiler, &descriptor.name, &objects, &artifact)?;
        Ok(artifact)
    }

    // Applies the platform scrub to the inherited flags, using the probed
    // compiler family rather than the (possibly Unknown) classified one.
    fn sanitized_cflags(
        &self,
        platform: &PlatformClassification,
        compiler: &ResolvedCompiler,
    ) -> Vec<String> {
        let joined = self.config.cflags.join(" ");
        sanitize_cflags(&platform.os, compiler.family, &joined)
            .split_whitespace()
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn skip_all(descriptors: &[ExtensionDescriptor]) -> ToolchainResult<Vec<ModuleOutcome>> {
    descriptors
        .iter()
        .map(|d| Ok(ModuleOutcome::skipped(&d.name, descriptor_hash(d)?)))
        .collect()
}

fn descriptor_hash(descriptor: &ExtensionDescriptor) -> ToolchainResult<String> {
    canonical_descriptor_hash(descriptor).map_err(|source| ToolchainError::InvalidDescriptor {
        name: descriptor.name.clone(),
        source,
    })
}
