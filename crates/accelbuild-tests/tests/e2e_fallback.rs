//! End-to-end graceful fallback: recognized failures become warnings and
//! the invocation still succeeds; unrecognized failures abort.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p accelbuild-tests --test e2e_fallback
//! ```

use accelbuild_spec::extension::{builtin_extensions, ExtensionDescriptor};
use accelbuild_spec::failure::{FailureKind, RecognizedFailures};
use accelbuild_spec::outcome::BuildOutcome;
use accelbuild_toolchain::{BuildOptions, Orchestrator, OrchestratorConfig, ToolchainError};
use accelbuild_tests::reference_platform;

#[test]
fn missing_compiler_downgrades_each_module_by_name() {
    let descriptors = builtin_extensions();
    let orchestrator = Orchestrator::with_config(
        OrchestratorConfig::default().compiler_path("/does/not/exist/cc"),
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

    // A compiler-less platform is a build-class failure per module; the
    // install still succeeds.
    assert!(report.ok);
    assert!(report
        .modules
        .iter()
        .all(|m| m.outcome == BuildOutcome::FailedGracefully));
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(report.warnings[0].module.as_deref(), Some("bson._cbson"));
    assert_eq!(
        report.warnings[1].module.as_deref(),
        Some("driver._cmessage")
    );

    // The reference scenario: the warning names the failing module and
    // carries one remediation hint per distro family.
    let output = String::from_utf8(sink).unwrap();
    assert!(output.contains("bson._cbson"));
    assert!(output.contains("optional"));
    assert!(output.contains("build-essential"));
    assert!(output.contains("python-devel"));
    // Raw resolution error precedes the first warning.
    let raw_pos = output.find("does not exist").unwrap();
    let warn_pos = output.find("WARNING").unwrap();
    assert!(raw_pos < warn_pos);
}

#[cfg(unix)]
#[test]
fn compile_failure_warns_per_module_with_remediation_hints() {
    let tmp = tempfile::tempdir().unwrap();
    let compiler = accelbuild_tests::failing_compiler(tmp.path());

    let descriptors = builtin_extensions();
    let orchestrator = Orchestrator::with_config(
        OrchestratorConfig::with_out_root(tmp.path().join("out")).compiler_path(&compiler),
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

    assert!(report.ok, "graceful failure must not abort the invocation");
    assert_eq!(report.count(BuildOutcome::FailedGracefully), 2);
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(report.warnings[0].module.as_deref(), Some("bson._cbson"));
    assert_eq!(
        report.warnings[1].module.as_deref(),
        Some("driver._cmessage")
    );

    let output = String::from_utf8(sink).unwrap();
    // The warning names the module and carries the documented hints.
    assert!(output.contains("bson._cbson"));
    assert!(output.contains("build-essential"));
    assert!(output.contains("python-devel"));
    // Raw compiler output is printed before the structured warning.
    let raw_pos = output.find("limits.h").unwrap();
    let warn_pos = output.find("WARNING").unwrap();
    assert!(raw_pos < warn_pos);
}

#[cfg(unix)]
#[test]
fn one_failing_module_does_not_poison_the_rest() {
    let tmp = tempfile::tempdir().unwrap();
    // Fails only when compiling sources under bad/, succeeds otherwise.
    let compiler = accelbuild_tests::write_script(
        tmp.path(),
        "picky-cc",
        "if [ \"$1\" = \"--version\" ]; then echo 'gcc (fake) 12.0.0'; exit 0; fi\n\
         case \"$*\" in *bad/*) echo 'bad/broken.c: error' >&2; exit 1;; esac\n\
         out=\"\"\n\
         while [ $# -gt 0 ]; do\n\
           if [ \"$1\" = \"-o\" ]; then out=\"$2\"; shift; fi\n\
           shift\n\
         done\n\
         if [ -n \"$out\" ]; then : > \"$out\"; fi\n\
         exit 0",
    );

    let descriptors = vec![
        ExtensionDescriptor::new("bad._ext").source("bad/broken.c"),
        ExtensionDescriptor::new("good._ext").source("good/fine.c"),
    ];
    let orchestrator = Orchestrator::with_config(
        OrchestratorConfig::with_out_root(tmp.path().join("out")).compiler_path(&compiler),
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
    assert_eq!(report.modules[0].outcome, BuildOutcome::FailedGracefully);
    assert_eq!(report.modules[1].outcome, BuildOutcome::Succeeded);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].module.as_deref(), Some("bad._ext"));
}

#[cfg(unix)]
#[test]
fn invalid_descriptor_aborts_the_build() {
    let tmp = tempfile::tempdir().unwrap();
    let compiler = accelbuild_tests::succeeding_compiler(tmp.path());

    let descriptors = vec![ExtensionDescriptor::new("escape._ext").source("../outside.c")];
    let orchestrator = Orchestrator::with_config(
        OrchestratorConfig::with_out_root(tmp.path().join("out")).compiler_path(&compiler),
    );
    let mut sink = Vec::new();

    let err = orchestrator
        .run(
            &descriptors,
            &reference_platform(),
            BuildOptions::default(),
            &mut sink,
        )
        .unwrap_err();

    assert!(matches!(err, ToolchainError::InvalidDescriptor { .. }));
    assert!(sink.is_empty(), "aborts must not emit fallback warnings");
}

#[test]
fn narrowed_recognized_set_propagates_the_failure() {
    let descriptors = builtin_extensions();
    let orchestrator = Orchestrator::with_config(
        OrchestratorConfig::default()
            .compiler_path("/does/not/exist/cc")
            .recognized(RecognizedFailures::base().without(FailureKind::CompilerNotFound)),
    );
    let mut sink = Vec::new();

    let err = orchestrator
        .run(
            &descriptors,
            &reference_platform(),
            BuildOptions::default(),
            &mut sink,
        )
        .unwrap_err();

    assert!(matches!(
        err,
        ToolchainError::ConfiguredCompilerMissing { .. }
    ));
    assert!(sink.is_empty());
}
