//! accelbuild canonical types.
//!
//! This crate provides the data model for the resilient native-extension
//! build orchestrator: extension descriptors, the platform classification
//! computed at build start, per-descriptor build outcomes, the closed
//! failure taxonomy with its recognized-set policy, remediation text, and
//! build reports.
//!
//! # Overview
//!
//! A build invocation consumes an ordered sequence of
//! [`ExtensionDescriptor`]s and a [`PlatformClassification`], and produces
//! one [`BuildOutcome`] per descriptor plus a [`BuildReport`]. The
//! orchestrator itself lives in `accelbuild-toolchain`; this crate only
//! defines what flows through it.
//!
//! # Example
//!
//! ```
//! use accelbuild_spec::{builtin_extensions, canonical_descriptor_hash};
//!
//! let extensions = builtin_extensions();
//! assert_eq!(extensions[0].name, "bson._cbson");
//!
//! let hash = canonical_descriptor_hash(&extensions[0]).unwrap();
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`error`]: error types and the `BuildError` trait
//! - [`extension`]: descriptors, validation, the builtin set
//! - [`platform`]: platform classification and CFLAGS sanitization
//! - [`outcome`]: build outcomes and the selection decision
//! - [`failure`]: failure taxonomy and the recognized-failure policy
//! - [`remedy`]: warning and notice text
//! - [`extras`]: platform-conditional optional feature sets
//! - [`report`]: build report types
//! - [`hash`]: canonical descriptor hashing

pub mod error;
pub mod extension;
pub mod extras;
pub mod failure;
pub mod hash;
pub mod outcome;
pub mod platform;
pub mod remedy;
pub mod report;

// Re-export commonly used types at the crate root
pub use error::{BuildError, SpecError};
pub use extension::{
    builtin_extensions, is_safe_project_path, is_valid_module_name, shared_module_extension,
    ExtensionDescriptor, ExtensionManifest,
};
pub use extras::{resolve_extras, ExtraFeature};
pub use failure::{Classified, FailureKind, RecognizedFailures};
pub use hash::{canonical_descriptor_hash, canonical_value_hash};
pub use outcome::{BuildOutcome, ModuleOutcome, PhaseDecision};
pub use platform::{
    sanitize_cflags, CompilerFamily, Interpreter, InterpreterImpl, InterpreterVersion, Os,
    PlatformClassification,
};
pub use remedy::{
    interpreter_skip_notice, module_fallback_warning, phase_fallback_warning, REMEDIATION_HINTS,
};
pub use report::{
    host_target, BuildReport, ReportNotice, ReportWarning, WarningCode, REPORT_VERSION,
};
