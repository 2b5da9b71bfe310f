//! Platform-conditional optional feature sets.
//!
//! The package declares optional extras whose concrete requirements depend
//! on the platform classification: Kerberos support needs a different
//! provider on Windows, and old 2.x interpreters need TLS backports. Pure
//! data derivation; nothing here is installed or compiled.

use serde::{Deserialize, Serialize};

use crate::platform::{InterpreterVersion, Os, PlatformClassification};

/// One optional feature and its platform-resolved requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraFeature {
    /// Feature name, e.g. "tls" or "gssapi".
    pub name: String,
    /// Requirement strings, e.g. "winkerberos>=0.3.0".
    pub requirements: Vec<String>,
}

impl ExtraFeature {
    fn new(name: &str, requirements: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            requirements,
        }
    }
}

/// Resolves the optional extras for a platform classification.
pub fn resolve_extras(platform: &PlatformClassification) -> Vec<ExtraFeature> {
    let version = platform.interpreter.version;
    let mut tls: Vec<String> = Vec::new();

    if version.major == 2 {
        tls.push("ipaddress".to_string());
    }

    let gssapi = if platform.os == Os::Windows {
        if needs_tls_backport(version) {
            tls.push("wincertstore>=0.2".to_string());
        }
        vec!["winkerberos>=0.3.0".to_string()]
    } else {
        if version.major == 2 && version < InterpreterVersion::new(2, 7, 9) {
            tls.push("certifi".to_string());
        }
        vec!["pykerberos".to_string()]
    };

    vec![
        ExtraFeature::new("tls", tls),
        ExtraFeature::new("gssapi", gssapi),
    ]
}

// TLS backports are needed on Windows below 2.7.9 (2.x) or 3.4 (3.x).
fn needs_tls_backport(version: InterpreterVersion) -> bool {
    (version.major == 2 && version < InterpreterVersion::new(2, 7, 9))
        || (version.major == 3 && version < InterpreterVersion::new(3, 4, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{CompilerFamily, Interpreter};
    use pretty_assertions::assert_eq;

    fn classification(os: Os, major: u32, minor: u32, micro: u32) -> PlatformClassification {
        PlatformClassification::new(
            os,
            CompilerFamily::Unknown,
            Interpreter::reference(major, minor, micro),
        )
    }

    fn feature<'a>(extras: &'a [ExtraFeature], name: &str) -> &'a ExtraFeature {
        extras.iter().find(|e| e.name == name).expect("feature present")
    }

    #[test]
    fn test_modern_linux_extras() {
        let extras = resolve_extras(&classification(Os::Linux, 3, 12, 0));
        assert_eq!(feature(&extras, "tls").requirements, Vec::<String>::new());
        assert_eq!(
            feature(&extras, "gssapi").requirements,
            vec!["pykerberos".to_string()]
        );
    }

    #[test]
    fn test_windows_gssapi_provider() {
        let extras = resolve_extras(&classification(Os::Windows, 3, 12, 0));
        assert_eq!(
            feature(&extras, "gssapi").requirements,
            vec!["winkerberos>=0.3.0".to_string()]
        );
    }

    #[test]
    fn test_old_windows_tls_backport() {
        let extras = resolve_extras(&classification(Os::Windows, 3, 3, 5));
        assert_eq!(
            feature(&extras, "tls").requirements,
            vec!["wincertstore>=0.2".to_string()]
        );

        let extras = resolve_extras(&classification(Os::Windows, 3, 4, 0));
        assert!(feature(&extras, "tls").requirements.is_empty());
    }

    #[test]
    fn test_old_2x_extras() {
        let extras = resolve_extras(&classification(Os::Linux, 2, 7, 3));
        assert_eq!(
            feature(&extras, "tls").requirements,
            vec!["ipaddress".to_string(), "certifi".to_string()]
        );

        let extras = resolve_extras(&classification(Os::Windows, 2, 7, 3));
        assert_eq!(
            feature(&extras, "tls").requirements,
            vec!["ipaddress".to_string(), "wincertstore>=0.2".to_string()]
        );
    }
}
