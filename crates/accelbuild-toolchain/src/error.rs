//! Error types for the C toolchain backend.

use std::path::PathBuf;

use accelbuild_spec::error::{BuildError, SpecError};
use accelbuild_spec::failure::{Classified, FailureKind};
use thiserror::Error;

/// Result type for toolchain operations.
pub type ToolchainResult<T> = Result<T, ToolchainError>;

/// Errors that can occur while discovering or invoking the C toolchain.
#[derive(Debug, Error)]
pub enum ToolchainError {
    /// No usable C compiler found anywhere.
    #[error("C compiler not found. Install a C toolchain (gcc, clang, or MSVC) or set the CC environment variable")]
    CompilerNotFound,

    /// An explicitly configured compiler path does not exist.
    #[error("configured compiler does not exist: {path}")]
    ConfiguredCompilerMissing { path: PathBuf },

    /// Failed to spawn the compiler process.
    #[error("failed to spawn compiler process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// The compiler exited with a non-zero status.
    #[error("compiler exited with status {exit_code} while compiling {source_file}: {stderr}")]
    CompileFailed {
        source_file: PathBuf,
        exit_code: i32,
        stderr: String,
    },

    /// The linker exited with a non-zero status.
    #[error("linker exited with status {exit_code} while linking {module}: {stderr}")]
    LinkFailed {
        module: String,
        exit_code: i32,
        stderr: String,
    },

    /// The toolchain rejected the target platform configuration.
    #[error("target platform is not supported by the {family} toolchain: {detail}")]
    UnsupportedTarget { family: String, detail: String },

    /// Malformed extension descriptor. Deliberately not a build-class
    /// failure; this aborts the build.
    #[error("invalid extension descriptor '{name}': {source}")]
    InvalidDescriptor {
        name: String,
        #[source]
        source: SpecError,
    },

    /// Raw I/O error from file operations around the toolchain.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolchainError {
    /// Creates a new compile failure.
    pub fn compile_failed(
        source_file: impl Into<PathBuf>,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CompileFailed {
            source_file: source_file.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Creates a new link failure.
    pub fn link_failed(module: impl Into<String>, exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::LinkFailed {
            module: module.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Classifies this error against the closed failure taxonomy.
    ///
    /// This is the explicit tagging step that precedes the catch/continue
    /// decision: the orchestrator downgrades the error only when the
    /// resulting kind is in the recognized set.
    pub fn classify(&self) -> Classified {
        match self {
            ToolchainError::CompilerNotFound | ToolchainError::ConfiguredCompilerMissing { .. } => {
                Classified::Recognized(FailureKind::CompilerNotFound)
            }
            ToolchainError::SpawnFailed(_)
            | ToolchainError::CompileFailed { .. }
            | ToolchainError::LinkFailed { .. } => {
                Classified::Recognized(FailureKind::CompilerInvocation)
            }
            ToolchainError::UnsupportedTarget { .. } => {
                Classified::Recognized(FailureKind::PlatformBuild)
            }
            ToolchainError::Io(_) => Classified::Recognized(FailureKind::ToolchainIo),
            ToolchainError::InvalidDescriptor { .. } => Classified::Unrecognized,
        }
    }
}

impl BuildError for ToolchainError {
    fn code(&self) -> &'static str {
        match self {
            ToolchainError::CompilerNotFound => "TOOLCHAIN_001",
            ToolchainError::ConfiguredCompilerMissing { .. } => "TOOLCHAIN_002",
            ToolchainError::SpawnFailed(_) => "TOOLCHAIN_003",
            ToolchainError::CompileFailed { .. } => "TOOLCHAIN_004",
            ToolchainError::LinkFailed { .. } => "TOOLCHAIN_005",
            ToolchainError::UnsupportedTarget { .. } => "TOOLCHAIN_006",
            ToolchainError::InvalidDescriptor { .. } => "TOOLCHAIN_007",
            ToolchainError::Io(_) => "TOOLCHAIN_008",
        }
    }

    fn category(&self) -> &'static str {
        "toolchain"
    }
}
