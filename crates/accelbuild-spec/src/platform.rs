//! Platform classification: the read-only environment snapshot the
//! orchestrator consults before attempting native builds.
//!
//! The classification is computed once per invocation and never mutated. It
//! is the tuple of (operating system, compiler family, interpreter
//! implementation + version).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Operating system family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Os {
    Linux,
    MacOs,
    Windows,
    Other(String),
}

impl Os {
    /// Returns the string identifier for this OS family.
    pub fn as_str(&self) -> &str {
        match self {
            Os::Linux => "linux",
            Os::MacOs => "macos",
            Os::Windows => "windows",
            Os::Other(name) => name,
        }
    }

    /// Detects the OS family of the running process.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "linux" => Os::Linux,
            "macos" => Os::MacOs,
            "windows" => Os::Windows,
            other => Os::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compiler family, as identified from a `--version` banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilerFamily {
    Gcc,
    Clang,
    Msvc,
    Unknown,
}

impl CompilerFamily {
    /// Returns the string identifier for this compiler family.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::Unknown => "unknown",
        }
    }

    /// Identifies the family from a version banner.
    pub fn from_version_banner(banner: &str) -> Self {
        let lower = banner.to_lowercase();
        if lower.contains("clang") {
            CompilerFamily::Clang
        } else if lower.contains("gcc") || lower.contains("free software foundation") {
            CompilerFamily::Gcc
        } else if lower.contains("microsoft") {
            CompilerFamily::Msvc
        } else {
            CompilerFamily::Unknown
        }
    }
}

impl std::fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interpreter implementation embedding the accelerator modules.
///
/// Alternate runtimes cannot load natively compiled modules, so the
/// orchestrator skips the whole phase for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpreterImpl {
    /// The reference implementation; native extensions are supported.
    Reference,
    /// PyPy-style tracing JIT runtime.
    PyPy,
    /// JVM-hosted runtime.
    Jvm,
    /// CLI (.NET)-hosted runtime.
    Cli,
    Other(String),
}

impl InterpreterImpl {
    /// Returns the string identifier for this implementation.
    pub fn as_str(&self) -> &str {
        match self {
            InterpreterImpl::Reference => "reference",
            InterpreterImpl::PyPy => "pypy",
            InterpreterImpl::Jvm => "jvm",
            InterpreterImpl::Cli => "cli",
            InterpreterImpl::Other(name) => name,
        }
    }

    /// Parses an implementation name as reported by the environment.
    pub fn from_reported(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        match lower.as_str() {
            "" | "cpython" | "reference" => InterpreterImpl::Reference,
            "pypy" => InterpreterImpl::PyPy,
            "cli" | "ironpython" => InterpreterImpl::Cli,
            _ if lower.starts_with("java") || lower == "jython" => InterpreterImpl::Jvm,
            _ => InterpreterImpl::Other(lower),
        }
    }

    /// Whether this implementation can load natively compiled extensions.
    pub fn supports_native_extensions(&self) -> bool {
        matches!(self, InterpreterImpl::Reference)
    }
}

impl std::fmt::Display for InterpreterImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interpreter version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterpreterVersion {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
}

impl InterpreterVersion {
    /// Creates a version triple.
    pub fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
        }
    }

    /// Parses a dotted version string like "3.12.1". Missing components
    /// default to zero.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next().unwrap_or("0").parse().ok()?;
        let micro = parts.next().unwrap_or("0").parse().ok()?;
        Some(Self::new(major, minor, micro))
    }
}

impl std::fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

/// The interpreter half of the classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpreter {
    pub implementation: InterpreterImpl,
    pub version: InterpreterVersion,
}

impl Interpreter {
    /// Creates an interpreter description.
    pub fn new(implementation: InterpreterImpl, version: InterpreterVersion) -> Self {
        Self {
            implementation,
            version,
        }
    }

    /// The reference implementation at the given version.
    pub fn reference(major: u32, minor: u32, micro: u32) -> Self {
        Self::new(
            InterpreterImpl::Reference,
            InterpreterVersion::new(major, minor, micro),
        )
    }
}

/// The full platform classification consumed by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformClassification {
    pub os: Os,
    /// Compiler family, when already known. Discovery happens in the
    /// toolchain backend; `Unknown` here means "probe at build time".
    pub compiler: CompilerFamily,
    pub interpreter: Interpreter,
}

impl PlatformClassification {
    /// Creates an explicit classification. Preferred in tests and anywhere
    /// ambient process state must not leak in.
    pub fn new(os: Os, compiler: CompilerFamily, interpreter: Interpreter) -> Self {
        Self {
            os,
            compiler,
            interpreter,
        }
    }

    /// Detects the classification from the execution environment.
    ///
    /// The interpreter half is read from `ACCELBUILD_INTERPRETER_IMPL` and
    /// `ACCELBUILD_INTERPRETER_VERSION` when set; otherwise the reference
    /// implementation at 3.12.0 is assumed.
    pub fn detect() -> Self {
        let implementation = std::env::var("ACCELBUILD_INTERPRETER_IMPL")
            .map(|s| InterpreterImpl::from_reported(&s))
            .unwrap_or(InterpreterImpl::Reference);
        let version = std::env::var("ACCELBUILD_INTERPRETER_VERSION")
            .ok()
            .and_then(|s| InterpreterVersion::parse(&s))
            .unwrap_or_else(|| InterpreterVersion::new(3, 12, 0));

        Self {
            os: Os::detect(),
            compiler: CompilerFamily::Unknown,
            interpreter: Interpreter::new(implementation, version),
        }
    }

    /// Whether the whole native-build phase should be skipped for this
    /// environment.
    pub fn supports_native_extensions(&self) -> bool {
        self.interpreter.implementation.supports_native_extensions()
    }

    /// Whether the legacy toolchain-wrapper I/O shim applies.
    ///
    /// Historical: on Windows with a 2.x interpreter newer than 2.6, the
    /// toolchain wrapper could surface a raw I/O error when failing to find
    /// the compiler. Treated as a recognized build failure only for that
    /// combination.
    pub fn legacy_io_shim(&self) -> bool {
        let v = self.interpreter.version;
        self.os == Os::Windows && v.major == 2 && v > InterpreterVersion::new(2, 6, 0)
    }
}

/// Strips compiler flags the host toolchain inherits but a modern clang
/// rejects.
///
/// Apple-shipped interpreters were historically built with
/// `-mno-fused-madd`, which clang 3.4+ errors out on. The flag is removed on
/// macOS when the compiler is clang; all other inputs pass through
/// unchanged.
pub fn sanitize_cflags(os: &Os, compiler: CompilerFamily, flags: &str) -> String {
    if *os != Os::MacOs || compiler != CompilerFamily::Clang {
        return flags.to_string();
    }
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(^|\s)-mno-fused-madd\b").expect("valid cflags regex"));
    let stripped = re.replace_all(flags, "$1");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
