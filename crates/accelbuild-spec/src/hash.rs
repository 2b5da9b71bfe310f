//! Canonical descriptor hashing.
//!
//! Descriptor hashes appear in reports so two invocations over identical
//! inputs can be compared byte-for-byte. The hash is
//! `hex(BLAKE3(canonical_json(descriptor)))`; canonical form has object keys
//! sorted, which `serde_json`'s default `BTreeMap`-backed objects already
//! guarantee.

use crate::error::SpecError;
use crate::extension::ExtensionDescriptor;

/// Computes the canonical BLAKE3 hash of a descriptor.
///
/// Returns a 64-character lowercase hexadecimal string.
pub fn canonical_descriptor_hash(descriptor: &ExtensionDescriptor) -> Result<String, SpecError> {
    let value = serde_json::to_value(descriptor)?;
    canonical_value_hash(&value)
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> Result<String, SpecError> {
    let canonical = serde_json::to_string(value)?;
    let hash = blake3::hash(canonical.as_bytes());
    Ok(hash.to_hex().to_string())
}
