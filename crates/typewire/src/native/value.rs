// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic value types.

use crate::descriptor::Kind;

/// A dynamic value of any type that has a value form.
///
/// Pointers have no variant of their own: a pointer value is its pointee.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    // Scalars
    Bool(bool),
    Int(i64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(u64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Uintptr(u64),
    Float32(f32),
    Float64(f64),
    Complex64(Complex<f32>),
    Complex128(Complex<f64>),
    String(String),

    // Composites
    Array(Vec<DynamicValue>),
    Slice(Vec<DynamicValue>),
    Map(Vec<(DynamicValue, DynamicValue)>),
    /// Fields in declaration order.
    Struct(Vec<(String, DynamicValue)>),
}

impl DynamicValue {
    /// Kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Int8(_) => Kind::Int8,
            Self::Int16(_) => Kind::Int16,
            Self::Int32(_) => Kind::Int32,
            Self::Int64(_) => Kind::Int64,
            Self::Uint(_) => Kind::Uint,
            Self::Uint8(_) => Kind::Uint8,
            Self::Uint16(_) => Kind::Uint16,
            Self::Uint32(_) => Kind::Uint32,
            Self::Uint64(_) => Kind::Uint64,
            Self::Uintptr(_) => Kind::Uintptr,
            Self::Float32(_) => Kind::Float32,
            Self::Float64(_) => Kind::Float64,
            Self::Complex64(_) => Kind::Complex64,
            Self::Complex128(_) => Kind::Complex128,
            Self::String(_) => Kind::String,
            Self::Array(_) => Kind::Array,
            Self::Slice(_) => Kind::Slice,
            Self::Map(_) => Kind::Map,
            Self::Struct(_) => Kind::Struct,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as a signed integer of any width.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) | Self::Int64(v) => Some(*v),
            Self::Int8(v) => Some(i64::from(*v)),
            Self::Int16(v) => Some(i64::from(*v)),
            Self::Int32(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Try to get as an unsigned integer of any width.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint(v) | Self::Uint64(v) | Self::Uintptr(v) => Some(*v),
            Self::Uint8(v) => Some(u64::from(*v)),
            Self::Uint16(v) => Some(u64::from(*v)),
            Self::Uint32(v) => Some(u64::from(*v)),
            _ => None,
        }
    }

    /// Try to get as a float of any width.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float32(v) => Some(f64::from(*v)),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get array or slice elements.
    pub fn as_elements(&self) -> Option<&[DynamicValue]> {
        match self {
            Self::Array(v) | Self::Slice(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get map entries.
    pub fn as_entries(&self) -> Option<&[(DynamicValue, DynamicValue)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a map entry by key.
    pub fn get_entry(&self, key: &DynamicValue) -> Option<&DynamicValue> {
        self.as_entries()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Try to get struct field.
    pub fn get_field(&self, name: &str) -> Option<&DynamicValue> {
        match self {
            Self::Struct(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Set struct field, appending it when absent.
    pub fn set_field(&mut self, name: impl Into<String>, value: DynamicValue) -> bool {
        match self {
            Self::Struct(fields) => {
                let name = name.into();
                match fields.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, slot)) => *slot = value,
                    None => fields.push((name, value)),
                }
                true
            }
            _ => false,
        }
    }
}

/// Complex number as a pair of floats.
///
/// `Complex<f32>` has kind `complex64`, `Complex<f64>` has kind `complex128`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// Address-sized unsigned integer with kind `uintptr`.
///
/// `usize` already maps to `uint`; this wrapper selects the other kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uintptr(pub usize);

// Conversion traits
impl From<bool> for DynamicValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for DynamicValue {
    fn from(v: i8) -> Self {
        Self::Int8(v)
    }
}

impl From<i16> for DynamicValue {
    fn from(v: i16) -> Self {
        Self::Int16(v)
    }
}

impl From<i32> for DynamicValue {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for DynamicValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<u8> for DynamicValue {
    fn from(v: u8) -> Self {
        Self::Uint8(v)
    }
}

impl From<u16> for DynamicValue {
    fn from(v: u16) -> Self {
        Self::Uint16(v)
    }
}

impl From<u32> for DynamicValue {
    fn from(v: u32) -> Self {
        Self::Uint32(v)
    }
}

impl From<u64> for DynamicValue {
    fn from(v: u64) -> Self {
        Self::Uint64(v)
    }
}

impl From<f32> for DynamicValue {
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}

impl From<f64> for DynamicValue {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<Complex<f32>> for DynamicValue {
    fn from(v: Complex<f32>) -> Self {
        Self::Complex64(v)
    }
}

impl From<Complex<f64>> for DynamicValue {
    fn from(v: Complex<f64>) -> Self {
        Self::Complex128(v)
    }
}

impl From<String> for DynamicValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
    fn from(v: Vec<T>) -> Self {
        Self::Slice(v.into_iter().map(Into::into).collect())
    }
}
