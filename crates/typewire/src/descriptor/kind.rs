// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Kind enumeration for type descriptors.
//!
//! A kind names the structural category of a type. Each kind has a textual
//! name (used by the canonical JSON form) and a one-byte code (used as the
//! value tag of the binary wire format).

use crate::descriptor::DescriptorError;
use std::fmt;

/// Structural category of a described type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Kind {
    /// No type. Never reconstructible.
    Invalid = 0,
    Bool = 1,
    /// Machine-word signed integer (64 bits on the wire).
    Int = 2,
    Int8 = 3,
    Int16 = 4,
    Int32 = 5,
    Int64 = 6,
    /// Machine-word unsigned integer (64 bits on the wire).
    Uint = 7,
    Uint8 = 8,
    Uint16 = 9,
    Uint32 = 10,
    Uint64 = 11,
    /// Unsigned integer wide enough to hold an address (64 bits on the wire).
    Uintptr = 12,
    Float32 = 13,
    Float64 = 14,
    /// Complex number with `f32` parts.
    Complex64 = 15,
    /// Complex number with `f64` parts.
    Complex128 = 16,
    /// Fixed-length array.
    Array = 17,
    /// Channel endpoint.
    Chan = 18,
    /// Function signature.
    Func = 19,
    /// Open-polymorphic type. Not supported.
    Interface = 20,
    /// Ordered key/value mapping.
    Map = 21,
    /// Indirection.
    Ptr = 22,
    /// Resizable sequence.
    Slice = 23,
    String = 24,
    /// Record with named fields.
    Struct = 25,
}

const ALL_KINDS: [Kind; 26] = [
    Kind::Invalid,
    Kind::Bool,
    Kind::Int,
    Kind::Int8,
    Kind::Int16,
    Kind::Int32,
    Kind::Int64,
    Kind::Uint,
    Kind::Uint8,
    Kind::Uint16,
    Kind::Uint32,
    Kind::Uint64,
    Kind::Uintptr,
    Kind::Float32,
    Kind::Float64,
    Kind::Complex64,
    Kind::Complex128,
    Kind::Array,
    Kind::Chan,
    Kind::Func,
    Kind::Interface,
    Kind::Map,
    Kind::Ptr,
    Kind::Slice,
    Kind::String,
    Kind::Struct,
];

impl Kind {
    /// Canonical textual name.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Invalid => "invalid",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Uintptr => "uintptr",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Complex64 => "complex64",
            Kind::Complex128 => "complex128",
            Kind::Array => "array",
            Kind::Chan => "chan",
            Kind::Func => "func",
            Kind::Interface => "interface",
            Kind::Map => "map",
            Kind::Ptr => "ptr",
            Kind::Slice => "slice",
            Kind::String => "string",
            Kind::Struct => "struct",
        }
    }

    /// Parse a canonical kind name.
    pub fn from_name(name: &str) -> Result<Self, DescriptorError> {
        ALL_KINDS
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| DescriptorError::UnknownKind(name.to_string()))
    }

    /// One-byte wire code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Convert from a wire code.
    pub fn from_code(code: u8) -> Option<Self> {
        ALL_KINDS.iter().copied().find(|kind| kind.code() == code)
    }

    /// Kinds with no nested structure.
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Kind::Bool
                | Kind::Int
                | Kind::Int8
                | Kind::Int16
                | Kind::Int32
                | Kind::Int64
                | Kind::Uint
                | Kind::Uint8
                | Kind::Uint16
                | Kind::Uint32
                | Kind::Uint64
                | Kind::Uintptr
                | Kind::Float32
                | Kind::Float64
                | Kind::Complex64
                | Kind::Complex128
                | Kind::String
        )
    }

    /// Kinds that carry components and/or metadata.
    pub const fn is_composite(self) -> bool {
        matches!(
            self,
            Kind::Array
                | Kind::Chan
                | Kind::Func
                | Kind::Map
                | Kind::Ptr
                | Kind::Slice
                | Kind::Struct
        )
    }

    /// Kinds with no native construct (`interface`, `invalid`).
    pub const fn is_supported(self) -> bool {
        !matches!(self, Kind::Invalid | Kind::Interface)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
