//! C compiler discovery and probing.

use std::path::{Path, PathBuf};
use std::process::Command;

use accelbuild_spec::platform::CompilerFamily;

use crate::error::{ToolchainError, ToolchainResult};

/// A discovered and probed compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCompiler {
    /// Path to the compiler executable.
    pub path: PathBuf,
    /// Identified family.
    pub family: CompilerFamily,
    /// Version string from the banner, when parseable.
    pub version: Option<String>,
}

impl ResolvedCompiler {
    /// Short identity string for reports, e.g. "clang 15.0.0".
    pub fn identity(&self) -> String {
        match &self.version {
            Some(version) => format!("{} {}", self.family, version),
            None => self.family.to_string(),
        }
    }
}

/// Locates the C compiler executable.
///
/// Search order: the explicit override (authoritative - a configured path
/// that does not exist is an error, never a silent fallthrough), the `CC`
/// environment variable, candidate names on `PATH`, then common install
/// paths.
pub fn find_compiler(override_path: Option<&Path>) -> ToolchainResult<PathBuf> {
    if let Some(path) = override_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(ToolchainError::ConfiguredCompilerMissing {
            path: path.to_path_buf(),
        });
    }

    if let Ok(cc) = std::env::var("CC") {
        if !cc.is_empty() {
            let path = PathBuf::from(&cc);
            if path.exists() {
                return Ok(path);
            }
            if let Ok(found) = which::which(&cc) {
                return Ok(found);
            }
        }
    }

    let candidates: &[&str] = if cfg!(windows) {
        &["cl.exe", "cl", "gcc.exe", "clang.exe"]
    } else {
        &["cc", "gcc", "clang"]
    };
    for name in candidates {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }

    let common_paths: &[&str] = if cfg!(target_os = "macos") {
        &["/usr/bin/cc", "/usr/bin/clang"]
    } else if cfg!(windows) {
        &[]
    } else {
        &["/usr/bin/cc", "/usr/bin/gcc", "/usr/local/bin/gcc"]
    };
    for path_str in common_paths {
        let path = PathBuf::from(path_str);
        if path.exists() {
            return Ok(path);
        }
    }

    Err(ToolchainError::CompilerNotFound)
}

/// Probes a compiler executable for its family and version.
///
/// Runs `--version` and parses the banner. MSVC's `cl` rejects `--version`
/// but prints its banner anyway, so a non-zero exit with a parseable banner
/// is still accepted.
pub fn probe(path: &Path) -> ToolchainResult<ResolvedCompiler> {
    let output = Command::new(path)
        .arg("--version")
        .output()
        .map_err(ToolchainError::SpawnFailed)?;

    let banner = if output.stdout.is_empty() {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::from_utf8_lossy(&output.stdout).to_string()
    };

    Ok(ResolvedCompiler {
        path: path.to_path_buf(),
        family: CompilerFamily::from_version_banner(&banner),
        version: parse_version(&banner),
    })
}

/// Finds and probes the compiler in one step.
pub fn resolve(override_path: Option<&Path>) -> ToolchainResult<ResolvedCompiler> {
    let path = find_compiler(override_path)?;
    probe(&path)
}

// First dotted number in the banner, e.g. "12.2.0" out of
// "gcc (Debian 12.2.0-14) 12.2.0".
fn parse_version(banner: &str) -> Option<String> {
    banner
        .lines()
        .next()?
        .split_whitespace()
        .find(|token| {
            token.contains('.')
                && token
                    .chars()
                    .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
        })
        .map(|token| token.split('-').next().unwrap_or(token).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_version() {
        assert_eq!(
            parse_version("gcc (Debian 12.2.0-14) 12.2.0\nCopyright ..."),
            Some("12.2.0".to_string())
        );
        assert_eq!(
            parse_version("Apple clang version 15.0.0 (clang-1500.1.0.2.5)"),
            Some("15.0.0".to_string())
        );
        assert_eq!(parse_version("no version here"), None);
    }

    #[test]
    fn test_missing_override_is_an_error() {
        let err = find_compiler(Some(Path::new("/does/not/exist/cc-custom"))).unwrap_err();
        assert!(matches!(
            err,
            ToolchainError::ConfiguredCompilerMissing { .. }
        ));
    }

    #[test]
    fn test_identity_formatting() {
        let compiler = ResolvedCompiler {
            path: PathBuf::from("/usr/bin/cc"),
            family: CompilerFamily::Gcc,
            version: Some("12.2.0".to_string()),
        };
        assert_eq!(compiler.identity(), "gcc 12.2.0");

        let unversioned = ResolvedCompiler {
            version: None,
            ..compiler
        };
        assert_eq!(unversioned.identity(), "gcc");
    }
}
