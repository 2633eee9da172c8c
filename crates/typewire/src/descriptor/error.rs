// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Errors raised while parsing or reconstructing descriptors.

use crate::descriptor::Kind;
use std::fmt;

/// Errors for descriptor parsing and reconstruction.
#[derive(Debug)]
pub enum DescriptorError {
    /// Kind name with no corresponding kind.
    UnknownKind(String),
    /// Kind with no native construct (interface, invalid).
    UnsupportedKind(Kind),
    /// A composite descriptor lacks a required component.
    MissingComponent { kind: Kind, key: String },
    /// A composite descriptor lacks a required metadata entry.
    MissingMetadata { kind: Kind, key: String },
    /// A metadata entry has the wrong scalar type or an out-of-range value.
    InvalidMetadata { key: String, reason: String },
    /// Struct field names in metadata and components disagree.
    FieldMismatch(String),
    /// Malformed descriptor text.
    Json(serde_json::Error),
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(name) => write!(f, "Unknown kind: {}", name),
            Self::UnsupportedKind(kind) => write!(f, "Unsupported kind: {}", kind),
            Self::MissingComponent { kind, key } => {
                write!(f, "Missing component '{}' for {} descriptor", key, kind)
            }
            Self::MissingMetadata { kind, key } => {
                write!(f, "Missing metadata '{}' for {} descriptor", key, kind)
            }
            Self::InvalidMetadata { key, reason } => {
                write!(f, "Invalid metadata '{}': {}", key, reason)
            }
            Self::FieldMismatch(name) => {
                write!(
                    f,
                    "Struct field '{}' differs between metadata and components",
                    name
                )
            }
            Self::Json(e) => write!(f, "Descriptor JSON error: {}", e),
        }
    }
}

impl std::error::Error for DescriptorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DescriptorError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
