// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversion between Rust values and [`DynamicValue`].

use crate::descriptor::Kind;
use crate::native::{Complex, Describe, DynamicValue, Uintptr};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

/// Errors converting a dynamic value into a Rust value.
#[derive(Debug)]
pub enum ValueError {
    TypeMismatch { expected: Kind, found: Kind },
    LengthMismatch { expected: usize, found: usize },
    OutOfRange { kind: Kind, value: String },
    MissingField(String),
    /// Map entry whose key repeats an earlier entry.
    DuplicateKey { index: usize },
    Field { name: String, source: Box<ValueError> },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
            Self::LengthMismatch { expected, found } => {
                write!(f, "Length mismatch: expected {}, found {}", expected, found)
            }
            Self::OutOfRange { kind, value } => {
                write!(f, "Value {} out of range for {}", value, kind)
            }
            Self::MissingField(name) => write!(f, "Missing field: {}", name),
            Self::DuplicateKey { index } => write!(f, "Duplicate map key at entry {}", index),
            Self::Field { name, source } => write!(f, "Field '{}': {}", name, source),
        }
    }
}

impl std::error::Error for ValueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Field { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

fn mismatch(expected: Kind, found: &DynamicValue) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

/// Types that convert to and from dynamic values.
///
/// Conversions are strict: an `i64` only accepts `DynamicValue::Int64`, a
/// `Vec<T>` only accepts `DynamicValue::Slice`, and so on.
pub trait Marshal: Describe + Sized {
    /// Convert to a dynamic value.
    fn to_value(&self) -> DynamicValue;

    /// Convert from a dynamic value.
    fn from_value(value: DynamicValue) -> Result<Self, ValueError>;
}

macro_rules! impl_marshal_scalar {
    ($ty:ty, $variant:ident) => {
        impl Marshal for $ty {
            fn to_value(&self) -> DynamicValue {
                DynamicValue::$variant(self.clone())
            }

            fn from_value(value: DynamicValue) -> Result<Self, ValueError> {
                match value {
                    DynamicValue::$variant(v) => Ok(v),
                    other => Err(mismatch(Kind::$variant, &other)),
                }
            }
        }
    };
}

impl_marshal_scalar!(bool, Bool);
impl_marshal_scalar!(i8, Int8);
impl_marshal_scalar!(i16, Int16);
impl_marshal_scalar!(i32, Int32);
impl_marshal_scalar!(i64, Int64);
impl_marshal_scalar!(u8, Uint8);
impl_marshal_scalar!(u16, Uint16);
impl_marshal_scalar!(u32, Uint32);
impl_marshal_scalar!(u64, Uint64);
impl_marshal_scalar!(f32, Float32);
impl_marshal_scalar!(f64, Float64);
impl_marshal_scalar!(Complex<f32>, Complex64);
impl_marshal_scalar!(Complex<f64>, Complex128);
impl_marshal_scalar!(String, String);

impl Marshal for isize {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Int(*self as i64)
    }

    fn from_value(value: DynamicValue) -> Result<Self, ValueError> {
        match value {
            DynamicValue::Int(v) => isize::try_from(v).map_err(|_| ValueError::OutOfRange {
                kind: Kind::Int,
                value: v.to_string(),
            }),
            other => Err(mismatch(Kind::Int, &other)),
        }
    }
}

impl Marshal for usize {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Uint(*self as u64)
    }

    fn from_value(value: DynamicValue) -> Result<Self, ValueError> {
        match value {
            DynamicValue::Uint(v) => usize::try_from(v).map_err(|_| ValueError::OutOfRange {
                kind: Kind::Uint,
                value: v.to_string(),
            }),
            other => Err(mismatch(Kind::Uint, &other)),
        }
    }
}

impl Marshal for Uintptr {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Uintptr(self.0 as u64)
    }

    fn from_value(value: DynamicValue) -> Result<Self, ValueError> {
        match value {
            DynamicValue::Uintptr(v) => usize::try_from(v).map(Uintptr).map_err(|_| {
                ValueError::OutOfRange {
                    kind: Kind::Uintptr,
                    value: v.to_string(),
                }
            }),
            other => Err(mismatch(Kind::Uintptr, &other)),
        }
    }
}

impl<T: Marshal, const N: usize> Marshal for [T; N] {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Array(self.iter().map(Marshal::to_value).collect())
    }

    fn from_value(value: DynamicValue) -> Result<Self, ValueError> {
        match value {
            DynamicValue::Array(items) => {
                if items.len() != N {
                    return Err(ValueError::LengthMismatch {
                        expected: N,
                        found: items.len(),
                    });
                }
                let converted = items
                    .into_iter()
                    .map(T::from_value)
                    .collect::<Result<Vec<T>, _>>()?;
                converted
                    .try_into()
                    .map_err(|rest: Vec<T>| ValueError::LengthMismatch {
                        expected: N,
                        found: rest.len(),
                    })
            }
            other => Err(mismatch(Kind::Array, &other)),
        }
    }
}

impl<T: Marshal> Marshal for Vec<T> {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Slice(self.iter().map(Marshal::to_value).collect())
    }

    fn from_value(value: DynamicValue) -> Result<Self, ValueError> {
        match value {
            DynamicValue::Slice(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch(Kind::Slice, &other)),
        }
    }
}

impl<T: Marshal> Marshal for Box<T> {
    fn to_value(&self) -> DynamicValue {
        self.as_ref().to_value()
    }

    fn from_value(value: DynamicValue) -> Result<Self, ValueError> {
        T::from_value(value).map(Box::new)
    }
}

impl<T: Marshal> Marshal for Arc<T> {
    fn to_value(&self) -> DynamicValue {
        self.as_ref().to_value()
    }

    fn from_value(value: DynamicValue) -> Result<Self, ValueError> {
        T::from_value(value).map(Arc::new)
    }
}

impl<K: Marshal + Ord, V: Marshal> Marshal for BTreeMap<K, V> {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }

    fn from_value(value: DynamicValue) -> Result<Self, ValueError> {
        match value {
            DynamicValue::Map(entries) => {
                let mut map = Self::new();
                for (index, (k, v)) in entries.into_iter().enumerate() {
                    if map.insert(K::from_value(k)?, V::from_value(v)?).is_some() {
                        return Err(ValueError::DuplicateKey { index });
                    }
                }
                Ok(map)
            }
            other => Err(mismatch(Kind::Map, &other)),
        }
    }
}

impl<K, V, S> Marshal for HashMap<K, V, S>
where
    K: Marshal + Eq + Hash,
    V: Marshal,
    S: BuildHasher + Default,
{
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }

    fn from_value(value: DynamicValue) -> Result<Self, ValueError> {
        match value {
            DynamicValue::Map(entries) => {
                let mut map = Self::default();
                for (index, (k, v)) in entries.into_iter().enumerate() {
                    if map.insert(K::from_value(k)?, V::from_value(v)?).is_some() {
                        return Err(ValueError::DuplicateKey { index });
                    }
                }
                Ok(map)
            }
            other => Err(mismatch(Kind::Map, &other)),
        }
    }
}

/// Field extraction helper used by [`impl_record!`](crate::impl_record).
#[doc(hidden)]
pub struct StructFields {
    fields: Vec<(String, DynamicValue)>,
}

impl StructFields {
    pub fn new(value: DynamicValue) -> Result<Self, ValueError> {
        match value {
            DynamicValue::Struct(fields) => Ok(Self { fields }),
            other => Err(mismatch(Kind::Struct, &other)),
        }
    }

    pub fn take<T: Marshal>(&mut self, name: &str) -> Result<T, ValueError> {
        let pos = self
            .fields
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| ValueError::MissingField(name.to_string()))?;
        let (_, value) = self.fields.swap_remove(pos);
        T::from_value(value).map_err(|e| ValueError::Field {
            name: name.to_string(),
            source: Box::new(e),
        })
    }
}
