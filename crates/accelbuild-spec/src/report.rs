//! Report types for a build invocation.
//!
//! A [`BuildReport`] documents one run of the orchestrator: the selection
//! decision, per-module outcomes, warnings and notices, and provenance.
//! Reports are not persisted between invocations by the orchestrator; the
//! CLI may write one to disk for inspection.

use serde::{Deserialize, Serialize};

use crate::outcome::{BuildOutcome, ModuleOutcome, PhaseDecision};

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Warning codes emitted by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: a single module failed to compile and was downgraded.
    ModuleFallback,
    /// W002: the whole phase failed on platform configuration.
    PhaseFallback,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::ModuleFallback => "W001",
            WarningCode::PhaseFallback => "W002",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning entry in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportWarning {
    /// Warning code (e.g., "W001").
    pub code: String,
    /// Human-readable warning text.
    pub message: String,
    /// Module the warning refers to; absent for phase-level warnings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl ReportWarning {
    /// Creates a phase-level warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code().to_string(),
            message: message.into(),
            module: None,
        }
    }

    /// Creates a warning tied to a module.
    pub fn for_module(
        code: WarningCode,
        message: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            code: code.code().to_string(),
            message: message.into(),
            module: Some(module.into()),
        }
    }
}

/// Informational notice entry in a report. Notices are not failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportNotice {
    /// Human-readable notice text.
    pub message: String,
}

impl ReportNotice {
    /// Creates a notice.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A complete report for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Report schema version.
    pub report_version: u32,
    /// Whether the invocation completed (graceful failures included).
    pub ok: bool,
    /// Selection-phase decision.
    pub decision: PhaseDecision,
    /// Per-module outcomes, in declaration order.
    pub modules: Vec<ModuleOutcome>,
    /// Warnings emitted during the invocation.
    pub warnings: Vec<ReportWarning>,
    /// Informational notices.
    pub notices: Vec<ReportNotice>,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
    /// Host target, e.g. "x86_64-linux".
    pub target: String,
    /// Resolved compiler identity, when discovery ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,
}

impl BuildReport {
    /// Creates an empty report for the given decision.
    pub fn new(decision: PhaseDecision) -> Self {
        Self {
            report_version: REPORT_VERSION,
            ok: true,
            decision,
            modules: Vec::new(),
            warnings: Vec::new(),
            notices: Vec::new(),
            duration_ms: 0,
            target: host_target(),
            compiler: None,
        }
    }

    /// Number of modules with the given outcome.
    pub fn count(&self, outcome: BuildOutcome) -> usize {
        self.modules.iter().filter(|m| m.outcome == outcome).count()
    }

    /// Whether any accelerator was actually built.
    pub fn any_succeeded(&self) -> bool {
        self.count(BuildOutcome::Succeeded) > 0
    }

    /// Serializes the report to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Host target string recorded in reports.
pub fn host_target() -> String {
    format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ModuleOutcome;

    #[test]
    fn test_warning_codes() {
        assert_eq!(WarningCode::ModuleFallback.code(), "W001");
        assert_eq!(WarningCode::PhaseFallback.code(), "W002");
    }

    #[test]
    fn test_report_counts() {
        let mut report = BuildReport::new(PhaseDecision::Proceed);
        report
            .modules
            .push(ModuleOutcome::succeeded("a.b", "h1", "a/b.so"));
        report
            .modules
            .push(ModuleOutcome::failed_gracefully("c.d", "h2", None));

        assert_eq!(report.count(BuildOutcome::Succeeded), 1);
        assert_eq!(report.count(BuildOutcome::FailedGracefully), 1);
        assert_eq!(report.count(BuildOutcome::SkippedByPlatform), 0);
        assert!(report.any_succeeded());
    }

    #[test]
    fn test_report_json_round_trip() {
        let mut report = BuildReport::new(PhaseDecision::Proceed);
        report.warnings.push(ReportWarning::for_module(
            WarningCode::ModuleFallback,
            "could not be compiled",
            "bson._cbson",
        ));
        report.notices.push(ReportNotice::new("note"));
        report.duration_ms = 12;

        let json = report.to_json_pretty().unwrap();
        let parsed = BuildReport::from_json(&json).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.warnings[0].code, "W001");
        assert_eq!(parsed.warnings[0].module.as_deref(), Some("bson._cbson"));
    }
}
