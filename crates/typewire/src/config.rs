// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! typewire configuration.
//!
//! - **Static**: wire contract constants (version byte, frame tags).
//! - **Runtime**: [`WireLimits`], the decoding limits applied to untrusted
//!   input. Defaults come from the constants below and can be overridden
//!   from the environment with [`WireLimits::from_env`].

// =======================================================================
// Wire contract
// =======================================================================

/// Version byte leading every call and result envelope.
pub const WIRE_VERSION: u8 = 0x01;

/// Tag byte leading a descriptor frame.
///
/// Value frames are tagged with their kind code (0..=25), so the two never
/// collide.
pub const DESCRIPTOR_TAG: u8 = 0xD0;

// =======================================================================
// Decoding limits
// =======================================================================

/// Default maximum nesting depth of a decoded value or descriptor.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum element count of a decoded collection (array, slice,
/// map, struct field list, descriptor map).
pub const DEFAULT_MAX_COLLECTION_LEN: usize = 1 << 20;

/// Environment variable overriding [`DEFAULT_MAX_DEPTH`].
pub const ENV_MAX_DEPTH: &str = "TYPEWIRE_MAX_DEPTH";

/// Environment variable overriding [`DEFAULT_MAX_COLLECTION_LEN`].
pub const ENV_MAX_COLLECTION_LEN: &str = "TYPEWIRE_MAX_COLLECTION_LEN";

/// Limits enforced while decoding wire frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireLimits {
    /// Maximum nesting depth.
    pub max_depth: usize,

    /// Maximum number of elements in one collection.
    pub max_collection_len: usize,
}

impl Default for WireLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
        }
    }
}

impl WireLimits {
    /// Defaults, overridden by `TYPEWIRE_MAX_DEPTH` and
    /// `TYPEWIRE_MAX_COLLECTION_LEN` when set to a valid number.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse = |key: &str, default: usize| {
            match lookup(key) {
                Some(raw) => match raw.trim().parse() {
                    Ok(value) => value,
                    Err(_) => {
                        log::warn!("[typewire] ignoring {}={:?}: not a number", key, raw);
                        default
                    }
                },
                None => default,
            }
        };
        Self {
            max_depth: parse(ENV_MAX_DEPTH, DEFAULT_MAX_DEPTH),
            max_collection_len: parse(ENV_MAX_COLLECTION_LEN, DEFAULT_MAX_COLLECTION_LEN),
        }
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum collection length.
    pub fn with_max_collection_len(mut self, max_collection_len: usize) -> Self {
        self.max_collection_len = max_collection_len;
        self
    }
}
