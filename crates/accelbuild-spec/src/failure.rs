//! The closed failure taxonomy and the recognized-failure policy.
//!
//! "Recognized vs. unrecognized" is represented as data: an enumerated set
//! of [`FailureKind`]s checked after an explicit classification step, not a
//! runtime type check buried in a catch clause. Only failures whose kind is
//! in the recognized set may be downgraded to a warning; everything else
//! propagates and aborts the build.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::platform::PlatformClassification;

/// A recognized build-class failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No usable C compiler could be located.
    CompilerNotFound,
    /// The compiler or linker ran and reported failure.
    CompilerInvocation,
    /// The toolchain rejected the target platform configuration.
    PlatformBuild,
    /// Raw I/O error surfaced by the toolchain wrapper (legacy shim).
    ToolchainIo,
}

impl FailureKind {
    /// Returns the string identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::CompilerNotFound => "compiler_not_found",
            FailureKind::CompilerInvocation => "compiler_invocation",
            FailureKind::PlatformBuild => "platform_build",
            FailureKind::ToolchainIo => "toolchain_io",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying an arbitrary build error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    /// The error maps onto a known build-class failure kind.
    Recognized(FailureKind),
    /// Anything else: programming errors, malformed descriptors. Never
    /// downgraded.
    Unrecognized,
}

/// The set of failure kinds the orchestrator is allowed to downgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedFailures {
    kinds: BTreeSet<FailureKind>,
}

impl RecognizedFailures {
    /// The baseline set: compiler missing, compiler invocation errors, and
    /// platform-specific build errors.
    pub fn base() -> Self {
        let mut kinds = BTreeSet::new();
        kinds.insert(FailureKind::CompilerNotFound);
        kinds.insert(FailureKind::CompilerInvocation);
        kinds.insert(FailureKind::PlatformBuild);
        Self { kinds }
    }

    /// Builds the recognized set for a platform classification.
    ///
    /// Adds the legacy toolchain I/O shim only for the historical
    /// platform/runtime combination (see
    /// [`PlatformClassification::legacy_io_shim`]).
    pub fn for_classification(platform: &PlatformClassification) -> Self {
        let mut set = Self::base();
        if platform.legacy_io_shim() {
            set.kinds.insert(FailureKind::ToolchainIo);
        }
        set
    }

    /// Adds a kind to the set.
    pub fn with(mut self, kind: FailureKind) -> Self {
        self.kinds.insert(kind);
        self
    }

    /// Removes a kind from the set.
    pub fn without(mut self, kind: FailureKind) -> Self {
        self.kinds.remove(&kind);
        self
    }

    /// Whether the given kind may be downgraded to a warning.
    pub fn contains(&self, kind: FailureKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Applies the catch/continue policy to a classification result.
    pub fn permits(&self, classified: Classified) -> bool {
        match classified {
            Classified::Recognized(kind) => self.contains(kind),
            Classified::Unrecognized => false,
        }
    }

    /// Iterates the kinds in the set.
    pub fn kinds(&self) -> impl Iterator<Item = FailureKind> + '_ {
        self.kinds.iter().copied()
    }
}
