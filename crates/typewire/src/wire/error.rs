// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for wire encoding and decoding.

use crate::descriptor::{DescriptorError, Kind};
use std::fmt;

/// Result type for wire operations
pub type WireResult<T> = Result<T, WireError>;

/// Errors that can occur while encoding or decoding wire frames
#[derive(Debug)]
pub enum WireError {
    /// Input ended before the frame did
    UnexpectedEof { need: usize, have: usize },

    /// Frame or value kind differs from the expected type
    TypeMismatch { expected: Kind, found: Kind },

    /// Collection length differs from the expected type
    LengthMismatch { expected: usize, found: usize },

    /// Malformed frame
    InvalidData(String),

    /// String payload is not UTF-8
    Utf8(std::string::FromUtf8Error),

    /// A decoding limit was hit
    LimitExceeded {
        what: &'static str,
        limit: usize,
        found: usize,
    },

    /// Envelope version byte not understood
    UnsupportedVersion(u8),

    /// Bytes left after the last expected frame
    TrailingBytes(usize),

    /// Type with no value form (channel, function)
    NotEncodable(Kind),

    /// Descriptor frame decoded but is not well formed
    Descriptor(DescriptorError),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof { need, have } => {
                write!(f, "Unexpected end of input: need {} bytes, have {}", need, have)
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
            Self::LengthMismatch { expected, found } => {
                write!(f, "Length mismatch: expected {}, found {}", expected, found)
            }
            Self::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            Self::Utf8(e) => write!(f, "UTF-8 error: {}", e),
            Self::LimitExceeded { what, limit, found } => {
                write!(f, "{} limit exceeded: {} > {}", what, found, limit)
            }
            Self::UnsupportedVersion(v) => write!(f, "Unsupported wire version: {:#04x}", v),
            Self::TrailingBytes(n) => write!(f, "{} trailing bytes after frame", n),
            Self::NotEncodable(kind) => write!(f, "Kind {} has no wire form", kind),
            Self::Descriptor(e) => write!(f, "Descriptor error: {}", e),
        }
    }
}

impl std::error::Error for WireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Utf8(e) => Some(e),
            Self::Descriptor(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::string::FromUtf8Error> for WireError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::Utf8(e)
    }
}

impl From<DescriptorError> for WireError {
    fn from(e: DescriptorError) -> Self {
        Self::Descriptor(e)
    }
}
