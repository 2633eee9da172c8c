// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for dynamic invocation.

use crate::descriptor::{DescriptorError, Kind};
use crate::native::ValueError;
use crate::wire::WireError;
use std::fmt;

/// Result type for call operations
pub type CallResult<T> = Result<T, CallError>;

/// Errors that can occur while encoding, dispatching or decoding a call
#[derive(Debug)]
pub enum CallError {
    /// Malformed call envelope (version, descriptor frame, count, trailing bytes)
    Envelope(WireError),

    /// Descriptor could not be turned into a signature
    Descriptor(DescriptorError),

    /// Signature is not a function type
    NotAFunction(Kind),

    /// No callable registered under this canonical key
    NotRegistered(String),

    /// Argument count differs from the callable's arity
    ArityMismatch { expected: usize, found: usize },

    /// Argument could not be encoded against its parameter type
    ArgumentEncode { index: usize, source: WireError },

    /// Argument frame does not match the registered parameter type
    ArgumentDecode { index: usize, source: WireError },

    /// Decoded argument could not be converted to the parameter's Rust type
    ArgumentValue { index: usize, source: ValueError },

    /// The callable itself reported an error
    Callee(String),

    /// The callable produced no output
    NoResult,

    /// First output could not be encoded
    ResultEncode(WireError),

    /// Result envelope could not be decoded against the expected type
    ResultDecode(WireError),

    /// Decoded result could not be converted to the requested Rust type
    ResultValue(ValueError),
}

impl CallError {
    /// Create a callee error from any displayable error
    pub fn callee(err: impl fmt::Display) -> Self {
        Self::Callee(err.to_string())
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Envelope(e) => write!(f, "Malformed call envelope: {}", e),
            Self::Descriptor(e) => write!(f, "Invalid signature descriptor: {}", e),
            Self::NotAFunction(kind) => write!(f, "Signature is a {}, not a func", kind),
            Self::NotRegistered(key) => write!(f, "No function registered for {}", key),
            Self::ArityMismatch { expected, found } => {
                write!(f, "Arity mismatch: expected {} arguments, found {}", expected, found)
            }
            Self::ArgumentEncode { index, source } => {
                write!(f, "Cannot encode argument {}: {}", index, source)
            }
            Self::ArgumentDecode { index, source } => {
                write!(f, "Cannot decode argument {}: {}", index, source)
            }
            Self::ArgumentValue { index, source } => {
                write!(f, "Cannot convert argument {}: {}", index, source)
            }
            Self::Callee(msg) => write!(f, "Callee failed: {}", msg),
            Self::NoResult => write!(f, "Callee produced no result"),
            Self::ResultEncode(e) => write!(f, "Cannot encode result: {}", e),
            Self::ResultDecode(e) => write!(f, "Cannot decode result: {}", e),
            Self::ResultValue(e) => write!(f, "Cannot convert result: {}", e),
        }
    }
}

impl std::error::Error for CallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Envelope(e)
            | Self::ResultEncode(e)
            | Self::ResultDecode(e)
            | Self::ArgumentEncode { source: e, .. }
            | Self::ArgumentDecode { source: e, .. } => Some(e),
            Self::ArgumentValue { source, .. } => Some(source),
            Self::ResultValue(e) => Some(e),
            Self::Descriptor(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DescriptorError> for CallError {
    fn from(e: DescriptorError) -> Self {
        Self::Descriptor(e)
    }
}
