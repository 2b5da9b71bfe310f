//! End-to-end build flow: selection decisions and successful compilation.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p accelbuild-tests --test e2e_build
//! ```

use accelbuild_spec::extension::builtin_extensions;
use accelbuild_spec::outcome::{BuildOutcome, PhaseDecision};
use accelbuild_toolchain::{BuildOptions, Orchestrator, OrchestratorConfig};
use accelbuild_tests::{alternate_runtime_platform, reference_platform};

#[test]
fn disable_switch_skips_everything() {
    let descriptors = builtin_extensions();
    let mut sink = Vec::new();

    let report = Orchestrator::new()
        .run(
            &descriptors,
            &reference_platform(),
            BuildOptions {
                disable_native: true,
            },
            &mut sink,
        )
        .unwrap();

    assert!(report.ok);
    assert_eq!(report.decision, PhaseDecision::Disabled);
    assert_eq!(report.modules.len(), descriptors.len());
    for module in &report.modules {
        assert_eq!(module.outcome, BuildOutcome::SkippedByPlatform);
        assert!(module.raw_error.is_none());
        assert!(module.artifact.is_none());
    }
    assert!(report.warnings.is_empty());
    assert!(report.notices.is_empty());
    assert!(sink.is_empty(), "disable is silent, not a warning");
}

#[test]
fn alternate_runtime_skips_with_notice() {
    let descriptors = builtin_extensions();
    let mut sink = Vec::new();

    let report = Orchestrator::new()
        .run(
            &descriptors,
            &alternate_runtime_platform(),
            BuildOptions::default(),
            &mut sink,
        )
        .unwrap();

    assert!(report.ok);
    assert_eq!(report.decision, PhaseDecision::UnsupportedInterpreter);
    assert!(report
        .modules
        .iter()
        .all(|m| m.outcome == BuildOutcome::SkippedByPlatform));
    // A notice is informational; it must not be a warning.
    assert_eq!(report.notices.len(), 1);
    assert!(report.warnings.is_empty());
    let output = String::from_utf8(sink).unwrap();
    assert!(output.contains("not supported"));
    assert!(!output.contains("WARNING"));
}

#[cfg(unix)]
#[test]
fn successful_build_places_modules_under_out_root() {
    let tmp = tempfile::tempdir().unwrap();
    let compiler = accelbuild_tests::succeeding_compiler(tmp.path());
    let out_root = tmp.path().join("out");

    let descriptors = builtin_extensions();
    let orchestrator = Orchestrator::with_config(
        OrchestratorConfig::with_out_root(&out_root).compiler_path(&compiler),
    );
    let mut sink = Vec::new();

    let report = orchestrator
        .run(
            &descriptors,
            &reference_platform(),
            BuildOptions::default(),
            &mut sink,
        )
        .unwrap();

    assert!(report.ok);
    assert_eq!(report.decision, PhaseDecision::Proceed);
    assert!(report.warnings.is_empty());
    assert_eq!(report.count(BuildOutcome::Succeeded), descriptors.len());

    let cbson = &report.modules[0];
    assert_eq!(cbson.name, "bson._cbson");
    let artifact = cbson.artifact.as_ref().unwrap();
    assert_eq!(artifact, &out_root.join("bson/_cbson.so"));
    assert!(artifact.exists());

    let cmessage = &report.modules[1];
    assert_eq!(cmessage.name, "driver._cmessage");
    assert!(cmessage.artifact.as_ref().unwrap().exists());

    assert!(report.compiler.as_deref().unwrap().contains("gcc"));
    assert!(sink.is_empty());
}

#[cfg(unix)]
#[test]
fn repeated_runs_are_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let compiler = accelbuild_tests::succeeding_compiler(tmp.path());
    let descriptors = builtin_extensions();
    let orchestrator = Orchestrator::with_config(
        OrchestratorConfig::with_out_root(tmp.path().join("out")).compiler_path(&compiler),
    );

    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut sink = Vec::new();
        let report = orchestrator
            .run(
                &descriptors,
                &reference_platform(),
                BuildOptions::default(),
                &mut sink,
            )
            .unwrap();
        runs.push(
            report
                .modules
                .iter()
                .map(|m| (m.name.clone(), m.outcome, m.descriptor_hash.clone()))
                .collect::<Vec<_>>(),
        );
    }
    assert_eq!(runs[0], runs[1]);
}
