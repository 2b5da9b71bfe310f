//! Shared input loading for CLI commands.

use std::path::Path;

use accelbuild_spec::extension::{builtin_extensions, ExtensionDescriptor, ExtensionManifest};
use anyhow::{Context, Result};

/// Loads the extension set: a manifest file when given, otherwise the
/// built-in descriptors.
pub(crate) fn load_extensions(manifest: Option<&str>) -> Result<Vec<ExtensionDescriptor>> {
    match manifest {
        Some(path) => {
            let manifest = ExtensionManifest::from_file(Path::new(path))
                .with_context(|| format!("failed to load extension manifest: {path}"))?;
            Ok(manifest.extensions)
        }
        None => Ok(builtin_extensions()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_to_builtin_set() {
        let extensions = load_extensions(None).unwrap();
        assert_eq!(extensions.len(), 2);
        assert_eq!(extensions[0].name, "bson._cbson");
    }

    #[test]
    fn test_loads_manifest_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"extensions": [{{"name": "pkg._fast", "sources": ["pkg/_fast.c"]}}]}}"#
        )
        .unwrap();
        let extensions = load_extensions(file.path().to_str()).unwrap();
        assert_eq!(extensions.len(), 1);
        assert_eq!(extensions[0].name, "pkg._fast");
    }

    #[test]
    fn test_missing_manifest_is_an_error() {
        let err = load_extensions(Some("/does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("manifest"));
    }
}
