// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compact descriptor fingerprints.
//!
//! A `DescriptorHash` is the MD5 digest of a descriptor's canonical key,
//! truncated to 14 bytes. Structurally equal descriptors always hash equal;
//! it is meant for logs and tooling, while the registry keys on the full
//! canonical text.

use crate::descriptor::TypeDescriptor;
use md5::{Digest, Md5};
use std::fmt;

/// Truncated MD5 of a descriptor's canonical key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DescriptorHash([u8; 14]);

impl DescriptorHash {
    /// Create from raw 14-byte array
    pub const fn from_bytes(bytes: [u8; 14]) -> Self {
        Self(bytes)
    }

    /// Get the raw 14-byte array
    pub const fn as_bytes(&self) -> &[u8; 14] {
        &self.0
    }

    /// Compute the fingerprint of a descriptor.
    pub fn of(desc: &TypeDescriptor) -> Self {
        Self::compute(desc.canonical_key().as_bytes())
    }

    /// MD5 over raw bytes, truncated to 14 bytes.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Md5::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut bytes = [0u8; 14];
        bytes.copy_from_slice(&result[..14]);
        Self(bytes)
    }
}

impl fmt::Debug for DescriptorHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DescriptorHash({})", self)
    }
}

impl fmt::Display for DescriptorHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl AsRef<[u8]> for DescriptorHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
