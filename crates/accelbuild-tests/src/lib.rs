//! Shared helpers for the end-to-end build tests.
//!
//! The integration tests exercise the orchestrator against fake compiler
//! executables written into temp dirs, so no real toolchain is needed on
//! the test machine.

use std::path::{Path, PathBuf};

use accelbuild_spec::platform::{Interpreter, InterpreterImpl, Os, PlatformClassification};

/// A reference-implementation Linux platform at 3.12.0.
pub fn reference_platform() -> PlatformClassification {
    PlatformClassification::new(
        Os::Linux,
        accelbuild_spec::platform::CompilerFamily::Unknown,
        Interpreter::reference(3, 12, 0),
    )
}

/// A platform whose interpreter cannot load native extensions.
pub fn alternate_runtime_platform() -> PlatformClassification {
    PlatformClassification::new(
        Os::Linux,
        accelbuild_spec::platform::CompilerFamily::Unknown,
        Interpreter::new(
            InterpreterImpl::PyPy,
            accelbuild_spec::platform::InterpreterVersion::new(3, 10, 0),
        ),
    )
}

/// Writes an executable shell script into `dir` and returns its path.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create script");
    writeln!(file, "#!/bin/sh\n{body}").expect("write script");
    drop(file);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
    path
}

/// A fake compiler that answers `--version` with a gcc banner and fails
/// every other invocation with a diagnostic on stderr.
#[cfg(unix)]
pub fn failing_compiler(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "failing-cc",
        "if [ \"$1\" = \"--version\" ]; then echo 'gcc (fake) 12.0.0'; exit 0; fi\n\
         echo 'fatal error: limits.h: No such file or directory' >&2\n\
         exit 1",
    )
}

/// A fake compiler that answers `--version` and creates whatever file the
/// `-o` argument names, succeeding on every invocation.
#[cfg(unix)]
pub fn succeeding_compiler(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "ok-cc",
        "if [ \"$1\" = \"--version\" ]; then echo 'gcc (fake) 12.0.0'; exit 0; fi\n\
         out=\"\"\n\
         while [ $# -gt 0 ]; do\n\
           if [ \"$1\" = \"-o\" ]; then out=\"$2\"; shift; fi\n\
           shift\n\
         done\n\
         if [ -n \"$out\" ]; then : > \"$out\"; fi\n\
         exit 0",
    )
}
