//! Diagnostic text for graceful build failures.
//!
//! The wording is documented behavior: tests assert on the module name, the
//! word "optional", and the presence of at least one remediation hint per
//! platform family.

/// Remediation hints, one block per platform family.
///
/// Always emitted as a whole so a user reading the warning on any platform
/// finds their own family listed.
pub const REMEDIATION_HINTS: &str = "\
Here are some hints for popular operating systems:

If you are seeing this message on Linux you probably need to install a C
compiler and the interpreter development headers for your interpreter
version.

Debian and Ubuntu users should issue the following command:

    $ sudo apt-get install build-essential python-dev

Users of Red Hat based distributions (RHEL, CentOS, Amazon Linux, Oracle
Linux, Fedora, etc.) should issue the following command:

    $ sudo yum install gcc python-devel

If you are seeing this message on Microsoft Windows, install the package
using the prebuilt installer for your interpreter version instead of
building from source.

If you are seeing this message on macOS, consult the installation
documentation for instructions on setting up the Xcode command line tools.";

/// Builds the structured warning for a module that could not be compiled.
///
/// `subject` names what failed ("The bson._cbson extension module" or
/// "Extension modules" for the whole phase); `detail` points at the cause.
pub fn fallback_warning(subject: &str, detail: &str) -> String {
    format!(
        "WARNING: {subject} could not be compiled. Native accelerator modules \
are optional: no functionality depends on them, although they do result in \
significant performance improvements. {detail}\n\n\
Please see the installation docs for solutions to build issues.\n\n\
{REMEDIATION_HINTS}"
    )
}

/// Warning for a single module whose compilation failed.
pub fn module_fallback_warning(module_name: &str) -> String {
    fallback_warning(
        &format!("The {module_name} extension module"),
        "The output above this warning shows how the compilation failed.",
    )
}

/// Warning for a phase-level platform configuration failure, emitted once
/// for the whole phase.
pub fn phase_fallback_warning() -> String {
    fallback_warning(
        "Extension modules",
        "There was an issue with your platform configuration - see above.",
    )
}

/// Informational notice for an environment-mandated skip.
pub fn interpreter_skip_notice() -> String {
    "The optional native accelerator modules are not supported by this \
interpreter implementation; continuing without them."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_warning_names_module_and_optionality() {
        let warning = module_fallback_warning("bson._cbson");
        assert!(warning.contains("bson._cbson"));
        assert!(warning.contains("optional"));
        assert!(warning.contains("performance"));
    }

    #[test]
    fn test_warning_carries_hint_per_platform_family() {
        let warning = module_fallback_warning("bson._cbson");
        // One hint per distro family, plus the two desktop platforms.
        assert!(warning.contains("build-essential"));
        assert!(warning.contains("python-devel"));
        assert!(warning.contains("Windows"));
        assert!(warning.contains("macOS"));
    }

    #[test]
    fn test_phase_warning_mentions_platform_configuration() {
        let warning = phase_fallback_warning();
        assert!(warning.contains("Extension modules"));
        assert!(warning.contains("platform configuration"));
    }

    #[test]
    fn test_skip_notice_is_informational() {
        let notice = interpreter_skip_notice();
        assert!(notice.contains("not supported"));
        assert!(!notice.contains("WARNING"));
    }
}
