//! Build outcomes: the per-descriptor state and the phase-level selection
//! decision.
//!
//! Each descriptor moves `Pending -> {Succeeded | SkippedByPlatform |
//! FailedGracefully}` exactly once per invocation. Nothing is persisted
//! between invocations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Terminal state of one descriptor after a build invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildOutcome {
    /// Compiled and linked; the accelerator is available.
    Succeeded,
    /// Never attempted: user opt-out or incompatible interpreter.
    SkippedByPlatform,
    /// A recognized build-class failure was downgraded to a warning.
    FailedGracefully,
}

impl BuildOutcome {
    /// Returns the string identifier for this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildOutcome::Succeeded => "succeeded",
            BuildOutcome::SkippedByPlatform => "skipped_by_platform",
            BuildOutcome::FailedGracefully => "failed_gracefully",
        }
    }
}

impl std::fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of the selection phase, before any compilation is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseDecision {
    /// The disable switch was set; nothing is attempted, nothing can fail.
    Disabled,
    /// The interpreter implementation cannot load native extensions.
    UnsupportedInterpreter,
    /// All descriptors are eligible for compilation.
    Proceed,
}

impl PhaseDecision {
    /// Returns the string identifier for this decision.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseDecision::Disabled => "disabled",
            PhaseDecision::UnsupportedInterpreter => "unsupported_interpreter",
            PhaseDecision::Proceed => "proceed",
        }
    }
}

impl std::fmt::Display for PhaseDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-module record in a build report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleOutcome {
    /// Dotted module name from the descriptor.
    pub name: String,
    /// Canonical BLAKE3 hash of the descriptor.
    pub descriptor_hash: String,
    /// Terminal outcome for this invocation.
    pub outcome: BuildOutcome,
    /// Raw toolchain error text, present only for graceful failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_error: Option<String>,
    /// Path of the built module, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
}

impl ModuleOutcome {
    /// Records a successful build.
    pub fn succeeded(
        name: impl Into<String>,
        descriptor_hash: impl Into<String>,
        artifact: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            descriptor_hash: descriptor_hash.into(),
            outcome: BuildOutcome::Succeeded,
            raw_error: None,
            artifact: Some(artifact.into()),
        }
    }

    /// Records a skipped descriptor.
    pub fn skipped(name: impl Into<String>, descriptor_hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor_hash: descriptor_hash.into(),
            outcome: BuildOutcome::SkippedByPlatform,
            raw_error: None,
            artifact: None,
        }
    }

    /// Records a graceful failure with the raw toolchain error text.
    pub fn failed_gracefully(
        name: impl Into<String>,
        descriptor_hash: impl Into<String>,
        raw_error: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            descriptor_hash: descriptor_hash.into(),
            outcome: BuildOutcome::FailedGracefully,
            raw_error,
            artifact: None,
        }
    }
}
