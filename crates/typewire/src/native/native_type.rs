// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native type handles.
//!
//! A [`NativeType`] is the runtime shape reconstructed from a descriptor. It
//! is what the wire decoder decodes against and what the invoker checks
//! arguments with.

use crate::descriptor::Kind;
use crate::native::{Complex, DynamicValue};
use std::fmt;

/// Channel direction. The numeric codes are part of the descriptor contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// Receive-only endpoint.
    Recv = 1,
    /// Send-only endpoint.
    Send = 2,
    /// Bidirectional endpoint.
    Both = 3,
}

impl ChanDir {
    pub const fn code(self) -> i64 {
        self as i64
    }

    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Recv),
            2 => Some(Self::Send),
            3 => Some(Self::Both),
            _ => None,
        }
    }
}

/// Named struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: NativeType,
}

impl FieldType {
    /// Create a new field.
    pub fn new(name: impl Into<String>, ty: NativeType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Runtime type handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeType {
    Bool,
    /// Machine-word signed integer.
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Machine-word unsigned integer.
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    /// Address-sized unsigned integer.
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    /// Fixed-length array.
    Array {
        element: Box<NativeType>,
        length: usize,
    },
    /// Channel endpoint (no value form).
    Chan {
        element: Box<NativeType>,
        dir: ChanDir,
    },
    /// Function signature (no value form).
    Func {
        inputs: Vec<NativeType>,
        outputs: Vec<NativeType>,
        variadic: bool,
    },
    /// Key/value mapping.
    Map {
        key: Box<NativeType>,
        value: Box<NativeType>,
    },
    /// Indirection. Transparent on the wire.
    Pointer(Box<NativeType>),
    /// Resizable sequence.
    Slice(Box<NativeType>),
    /// Record with fields in declaration order.
    Struct(Vec<FieldType>),
}

impl NativeType {
    /// Descriptor kind of this type.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Bool => Kind::Bool,
            Self::Int => Kind::Int,
            Self::Int8 => Kind::Int8,
            Self::Int16 => Kind::Int16,
            Self::Int32 => Kind::Int32,
            Self::Int64 => Kind::Int64,
            Self::Uint => Kind::Uint,
            Self::Uint8 => Kind::Uint8,
            Self::Uint16 => Kind::Uint16,
            Self::Uint32 => Kind::Uint32,
            Self::Uint64 => Kind::Uint64,
            Self::Uintptr => Kind::Uintptr,
            Self::Float32 => Kind::Float32,
            Self::Float64 => Kind::Float64,
            Self::Complex64 => Kind::Complex64,
            Self::Complex128 => Kind::Complex128,
            Self::String => Kind::String,
            Self::Array { .. } => Kind::Array,
            Self::Chan { .. } => Kind::Chan,
            Self::Func { .. } => Kind::Func,
            Self::Map { .. } => Kind::Map,
            Self::Pointer(_) => Kind::Ptr,
            Self::Slice(_) => Kind::Slice,
            Self::Struct(_) => Kind::Struct,
        }
    }

    /// Scalar type for a scalar kind.
    pub fn scalar(kind: Kind) -> Option<Self> {
        let ty = match kind {
            Kind::Bool => Self::Bool,
            Kind::Int => Self::Int,
            Kind::Int8 => Self::Int8,
            Kind::Int16 => Self::Int16,
            Kind::Int32 => Self::Int32,
            Kind::Int64 => Self::Int64,
            Kind::Uint => Self::Uint,
            Kind::Uint8 => Self::Uint8,
            Kind::Uint16 => Self::Uint16,
            Kind::Uint32 => Self::Uint32,
            Kind::Uint64 => Self::Uint64,
            Kind::Uintptr => Self::Uintptr,
            Kind::Float32 => Self::Float32,
            Kind::Float64 => Self::Float64,
            Kind::Complex64 => Self::Complex64,
            Kind::Complex128 => Self::Complex128,
            Kind::String => Self::String,
            _ => return None,
        };
        Some(ty)
    }

    /// Build a function signature.
    pub fn func(inputs: Vec<NativeType>, outputs: Vec<NativeType>) -> Self {
        Self::Func {
            inputs,
            outputs,
            variadic: false,
        }
    }

    /// Get struct fields.
    pub fn fields(&self) -> Option<&[FieldType]> {
        match self {
            Self::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get a struct field by name.
    pub fn field(&self, name: &str) -> Option<&FieldType> {
        self.fields()?.iter().find(|f| f.name == name)
    }

    /// Parameter types of a function signature.
    pub fn inputs(&self) -> Option<&[NativeType]> {
        match self {
            Self::Func { inputs, .. } => Some(inputs),
            _ => None,
        }
    }

    /// Result types of a function signature.
    pub fn outputs(&self) -> Option<&[NativeType]> {
        match self {
            Self::Func { outputs, .. } => Some(outputs),
            _ => None,
        }
    }

    /// Whether values of this type can be encoded on the wire.
    pub fn has_value_form(&self) -> bool {
        match self {
            Self::Chan { .. } | Self::Func { .. } => false,
            Self::Array { element, .. } | Self::Pointer(element) | Self::Slice(element) => {
                element.has_value_form()
            }
            Self::Map { key, value } => key.has_value_form() && value.has_value_form(),
            Self::Struct(fields) => fields.iter().all(|f| f.ty.has_value_form()),
            _ => true,
        }
    }

    /// Allocate the zero value of this type.
    ///
    /// Returns `None` for types with no value form (channels, functions).
    pub fn default_value(&self) -> Option<DynamicValue> {
        let value = match self {
            Self::Bool => DynamicValue::Bool(false),
            Self::Int => DynamicValue::Int(0),
            Self::Int8 => DynamicValue::Int8(0),
            Self::Int16 => DynamicValue::Int16(0),
            Self::Int32 => DynamicValue::Int32(0),
            Self::Int64 => DynamicValue::Int64(0),
            Self::Uint => DynamicValue::Uint(0),
            Self::Uint8 => DynamicValue::Uint8(0),
            Self::Uint16 => DynamicValue::Uint16(0),
            Self::Uint32 => DynamicValue::Uint32(0),
            Self::Uint64 => DynamicValue::Uint64(0),
            Self::Uintptr => DynamicValue::Uintptr(0),
            Self::Float32 => DynamicValue::Float32(0.0),
            Self::Float64 => DynamicValue::Float64(0.0),
            Self::Complex64 => DynamicValue::Complex64(Complex::default()),
            Self::Complex128 => DynamicValue::Complex128(Complex::default()),
            Self::String => DynamicValue::String(String::new()),
            Self::Array { element, length } => {
                let elem_default = element.default_value()?;
                DynamicValue::Array(vec![elem_default; *length])
            }
            Self::Chan { .. } | Self::Func { .. } => return None,
            Self::Map { key, value } => {
                key.default_value()?;
                value.default_value()?;
                DynamicValue::Map(Vec::new())
            }
            Self::Pointer(inner) => inner.default_value()?,
            Self::Slice(element) => {
                element.default_value()?;
                DynamicValue::Slice(Vec::new())
            }
            Self::Struct(fields) => {
                let mut values = Vec::with_capacity(fields.len());
                for field in fields {
                    values.push((field.name.clone(), field.ty.default_value()?));
                }
                DynamicValue::Struct(values)
            }
        };
        Some(value)
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("isize"),
            Self::Int8 => f.write_str("i8"),
            Self::Int16 => f.write_str("i16"),
            Self::Int32 => f.write_str("i32"),
            Self::Int64 => f.write_str("i64"),
            Self::Uint => f.write_str("usize"),
            Self::Uint8 => f.write_str("u8"),
            Self::Uint16 => f.write_str("u16"),
            Self::Uint32 => f.write_str("u32"),
            Self::Uint64 => f.write_str("u64"),
            Self::Uintptr => f.write_str("Uintptr"),
            Self::Float32 => f.write_str("f32"),
            Self::Float64 => f.write_str("f64"),
            Self::Complex64 => f.write_str("Complex<f32>"),
            Self::Complex128 => f.write_str("Complex<f64>"),
            Self::String => f.write_str("String"),
            Self::Array { element, length } => write!(f, "[{}; {}]", element, length),
            Self::Chan { element, dir } => match dir {
                ChanDir::Recv => write!(f, "Receiver<{}>", element),
                ChanDir::Send => write!(f, "Sender<{}>", element),
                ChanDir::Both => write!(f, "Channel<{}>", element),
            },
            Self::Func {
                inputs,
                outputs,
                variadic,
            } => {
                f.write_str("fn(")?;
                for (i, input) in inputs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if *variadic && i + 1 == inputs.len() {
                        f.write_str("...")?;
                    }
                    write!(f, "{}", input)?;
                }
                f.write_str(")")?;
                match outputs.as_slice() {
                    [] => Ok(()),
                    [single] => write!(f, " -> {}", single),
                    many => {
                        f.write_str(" -> (")?;
                        for (i, output) in many.iter().enumerate() {
                            if i > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "{}", output)?;
                        }
                        f.write_str(")")
                    }
                }
            }
            Self::Map { key, value } => write!(f, "Map<{}, {}>", key, value),
            Self::Pointer(inner) => write!(f, "Box<{}>", inner),
            Self::Slice(element) => write!(f, "Vec<{}>", element),
            Self::Struct(fields) => {
                f.write_str("struct {")?;
                for (i, field) in fields.iter().enumerate() {
                    f.write_str(if i > 0 { ", " } else { " " })?;
                    write!(f, "{}: {}", field.name, field.ty)?;
                }
                f.write_str(if fields.is_empty() { "}" } else { " }" })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> NativeType {
        NativeType::Struct(vec![
            FieldType::new("name", NativeType::String),
            FieldType::new("age", NativeType::Int64),
        ])
    }

    #[test]
    fn test_default_struct_value() {
        let value = person().default_value().expect("value form");
        assert_eq!(value.get_field("name").and_then(|v| v.as_str()), Some(""));
        assert_eq!(value.get_field("age").and_then(|v| v.as_i64()), Some(0));
    }

    #[test]
    fn test_default_array_value() {
        let ty = NativeType::Array {
            element: Box::new(NativeType::Int),
            length: 16,
        };
        let value = ty.default_value().expect("value form");
        assert_eq!(value.as_elements().map(|e| e.len()), Some(16));
    }

    #[test]
    fn test_no_value_form() {
        let chan = NativeType::Chan {
            element: Box::new(NativeType::Int),
            dir: ChanDir::Both,
        };
        assert!(chan.default_value().is_none());
        assert!(!chan.has_value_form());

        let slice_of_funcs = NativeType::Slice(Box::new(NativeType::func(vec![], vec![])));
        assert!(slice_of_funcs.default_value().is_none());
        assert!(!slice_of_funcs.has_value_form());
    }

    #[test]
    fn test_chan_dir_codes() {
        assert_eq!(ChanDir::from_code(1), Some(ChanDir::Recv));
        assert_eq!(ChanDir::from_code(2), Some(ChanDir::Send));
        assert_eq!(ChanDir::from_code(3), Some(ChanDir::Both));
        assert_eq!(ChanDir::from_code(0), None);
        assert_eq!(ChanDir::Both.code(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(person().to_string(), "struct { name: String, age: i64 }");
        let func = NativeType::Func {
            inputs: vec![NativeType::String, NativeType::Slice(Box::new(NativeType::Int))],
            outputs: vec![NativeType::Bool, NativeType::Struct(vec![])],
            variadic: true,
        };
        assert_eq!(func.to_string(), "fn(String, ...Vec<isize>) -> (bool, struct {})");
        let map = NativeType::Map {
            key: Box::new(NativeType::String),
            value: Box::new(NativeType::Pointer(Box::new(NativeType::Uint8))),
        };
        assert_eq!(map.to_string(), "Map<String, Box<u8>>");
    }
}
