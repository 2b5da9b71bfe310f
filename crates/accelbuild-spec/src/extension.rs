//! Extension descriptors: the static declaration of each optional native
//! accelerator module.
//!
//! Descriptors are immutable once declared and are consumed once per build
//! invocation. The reference set is returned by [`builtin_extensions`].

use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::platform::Os;

/// Identifies a native accelerator module by name, include search paths, and
/// source files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionDescriptor {
    /// Dotted module name, e.g. `bson._cbson`.
    pub name: String,
    /// Include search paths, relative to the project root.
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
    /// C source files, relative to the project root.
    pub sources: Vec<PathBuf>,
}

impl ExtensionDescriptor {
    /// Creates a new descriptor with no include dirs or sources.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            include_dirs: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Adds an include search path.
    pub fn include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    /// Adds a source file.
    pub fn source(mut self, source: impl Into<PathBuf>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Validates the descriptor.
    ///
    /// A failed validation is a programming error in the declaration, not an
    /// environment problem; callers must not downgrade it to a warning.
    pub fn validate(&self) -> Result<(), SpecError> {
        if !is_valid_module_name(&self.name) {
            return Err(SpecError::InvalidModuleName {
                name: self.name.clone(),
            });
        }
        if self.sources.is_empty() {
            return Err(SpecError::NoSources {
                name: self.name.clone(),
            });
        }
        for path in self.sources.iter().chain(self.include_dirs.iter()) {
            if !is_safe_project_path(path) {
                return Err(SpecError::UnsafePath {
                    name: self.name.clone(),
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    /// Relative path of the built loadable module for the given OS.
    ///
    /// `bson._cbson` becomes `bson/_cbson.so` (or `.pyd` on Windows).
    pub fn module_relative_path(&self, os: &Os) -> PathBuf {
        let mut path = PathBuf::new();
        let mut segments = self.name.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{}.{}", segment, shared_module_extension(os)));
            }
        }
        path
    }
}

/// File extension used for loadable modules on the given OS.
pub fn shared_module_extension(os: &Os) -> &'static str {
    match os {
        Os::Windows => "pyd",
        _ => "so",
    }
}

/// Checks whether a module name is a valid dotted lowercase identifier.
pub fn is_valid_module_name(name: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[a-z_][a-z0-9_]*(\.[a-z_][a-z0-9_]*)*$").expect("valid module name regex")
    });
    re.is_match(name)
}

/// Checks whether a descriptor path stays inside the project root.
pub fn is_safe_project_path(path: &Path) -> bool {
    if path.as_os_str().is_empty() || path.is_absolute() {
        return false;
    }
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// The reference extension set: two accelerator modules with fixed source
/// lists and include paths.
pub fn builtin_extensions() -> Vec<ExtensionDescriptor> {
    vec![
        ExtensionDescriptor::new("bson._cbson")
            .include_dir("bson")
            .source("bson/_cbsonmodule.c")
            .source("bson/time64.c")
            .source("bson/buffer.c")
            .source("bson/encoding_helpers.c"),
        ExtensionDescriptor::new("driver._cmessage")
            .include_dir("bson")
            .source("driver/_cmessagemodule.c")
            .source("bson/buffer.c"),
    ]
}

/// A manifest file declaring a custom extension set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionManifest {
    /// Descriptors in declaration order.
    pub extensions: Vec<ExtensionDescriptor>,
}

impl ExtensionManifest {
    /// Parses a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a manifest file.
    pub fn from_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
