// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire decoder.

use crate::config::{WireLimits, DESCRIPTOR_TAG};
use crate::descriptor::{Kind, MetaValue, TypeDescriptor};
use crate::native::{Complex, DynamicValue, NativeType};
use crate::wire::{WireError, WireResult};
use std::collections::BTreeMap;

/// Generate little-endian read methods for fixed-size primitives.
macro_rules! impl_get_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> WireResult<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Bounds-checked wire reader.
///
/// Values are decoded against an expected [`NativeType`]; the decoder never
/// trusts a frame's own tag beyond checking it against that type.
pub struct WireDecoder<'a> {
    buffer: &'a [u8],
    offset: usize,
    limits: WireLimits,
}

impl<'a> WireDecoder<'a> {
    /// Decoder with default limits.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_limits(buffer, WireLimits::default())
    }

    pub fn with_limits(buffer: &'a [u8], limits: WireLimits) -> Self {
        Self {
            buffer,
            offset: 0,
            limits,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn limits(&self) -> &WireLimits {
        &self.limits
    }

    fn read_bytes(&mut self, count: usize) -> WireResult<&'a [u8]> {
        if count > self.remaining() {
            return Err(WireError::UnexpectedEof {
                need: count,
                have: self.remaining(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    pub fn get_u8(&mut self) -> WireResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    impl_get_le!(get_u16, u16, 2);
    impl_get_le!(get_u32, u32, 4);
    impl_get_le!(get_u64, u64, 8);
    impl_get_le!(get_i8, i8, 1);
    impl_get_le!(get_i16, i16, 2);
    impl_get_le!(get_i32, i32, 4);
    impl_get_le!(get_i64, i64, 8);
    impl_get_le!(get_f32, f32, 4);
    impl_get_le!(get_f64, f64, 8);

    fn get_bool(&mut self) -> WireResult<bool> {
        match self.get_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(WireError::InvalidData(format!("bool byte {:#04x}", other))),
        }
    }

    /// Collection length, checked against the configured limit.
    fn get_len(&mut self) -> WireResult<usize> {
        let len = self.get_u32()? as usize;
        if len > self.limits.max_collection_len {
            return Err(WireError::LimitExceeded {
                what: "collection length",
                limit: self.limits.max_collection_len,
                found: len,
            });
        }
        Ok(len)
    }

    fn get_string(&mut self) -> WireResult<String> {
        let len = self.get_u32()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    fn check_depth(&self, depth: usize) -> WireResult<()> {
        if depth > self.limits.max_depth {
            return Err(WireError::LimitExceeded {
                what: "nesting depth",
                limit: self.limits.max_depth,
                found: depth,
            });
        }
        Ok(())
    }

    /// Every element takes at least one byte, so a claimed length never
    /// reserves more than what is left.
    fn capacity_for(&self, len: usize) -> usize {
        len.min(self.remaining())
    }

    /// Decode one value frame of type `ty`.
    pub fn value(&mut self, ty: &NativeType) -> WireResult<DynamicValue> {
        self.value_at(ty, 0)
    }

    fn value_at(&mut self, ty: &NativeType, depth: usize) -> WireResult<DynamicValue> {
        self.check_depth(depth)?;

        let expected = match ty {
            NativeType::Pointer(inner) => return self.value_at(inner, depth + 1),
            NativeType::Chan { .. } | NativeType::Func { .. } => {
                return Err(WireError::NotEncodable(ty.kind()))
            }
            other => other.kind(),
        };

        let tag = self.get_u8()?;
        let found = Kind::from_code(tag)
            .ok_or_else(|| WireError::InvalidData(format!("unknown value tag {:#04x}", tag)))?;
        if found != expected {
            return Err(WireError::TypeMismatch { expected, found });
        }

        let value = match ty {
            NativeType::Bool => DynamicValue::Bool(self.get_bool()?),
            NativeType::Int => DynamicValue::Int(self.get_i64()?),
            NativeType::Int8 => DynamicValue::Int8(self.get_i8()?),
            NativeType::Int16 => DynamicValue::Int16(self.get_i16()?),
            NativeType::Int32 => DynamicValue::Int32(self.get_i32()?),
            NativeType::Int64 => DynamicValue::Int64(self.get_i64()?),
            NativeType::Uint => DynamicValue::Uint(self.get_u64()?),
            NativeType::Uint8 => DynamicValue::Uint8(self.get_u8()?),
            NativeType::Uint16 => DynamicValue::Uint16(self.get_u16()?),
            NativeType::Uint32 => DynamicValue::Uint32(self.get_u32()?),
            NativeType::Uint64 => DynamicValue::Uint64(self.get_u64()?),
            NativeType::Uintptr => DynamicValue::Uintptr(self.get_u64()?),
            NativeType::Float32 => DynamicValue::Float32(self.get_f32()?),
            NativeType::Float64 => DynamicValue::Float64(self.get_f64()?),
            NativeType::Complex64 => {
                DynamicValue::Complex64(Complex::new(self.get_f32()?, self.get_f32()?))
            }
            NativeType::Complex128 => {
                DynamicValue::Complex128(Complex::new(self.get_f64()?, self.get_f64()?))
            }
            NativeType::String => DynamicValue::String(self.get_string()?),
            NativeType::Array { element, length } => {
                let len = self.get_len()?;
                if len != *length {
                    return Err(WireError::LengthMismatch {
                        expected: *length,
                        found: len,
                    });
                }
                DynamicValue::Array(self.elements(element, len, depth)?)
            }
            NativeType::Slice(element) => {
                let len = self.get_len()?;
                DynamicValue::Slice(self.elements(element, len, depth)?)
            }
            NativeType::Map { key, value } => {
                let len = self.get_len()?;
                let mut entries = Vec::with_capacity(self.capacity_for(len));
                for _ in 0..len {
                    let k = self.value_at(key, depth + 1)?;
                    let v = self.value_at(value, depth + 1)?;
                    entries.push((k, v));
                }
                DynamicValue::Map(entries)
            }
            NativeType::Struct(fields) => {
                let count = self.get_len()?;
                if count != fields.len() {
                    return Err(WireError::LengthMismatch {
                        expected: fields.len(),
                        found: count,
                    });
                }
                let mut values = Vec::with_capacity(fields.len());
                for field in fields {
                    let name = self.get_string()?;
                    if name != field.name {
                        return Err(WireError::InvalidData(format!(
                            "expected field '{}', found '{}'",
                            field.name, name
                        )));
                    }
                    values.push((name, self.value_at(&field.ty, depth + 1)?));
                }
                DynamicValue::Struct(values)
            }
            NativeType::Pointer(_) | NativeType::Chan { .. } | NativeType::Func { .. } => {
                return Err(WireError::NotEncodable(ty.kind()))
            }
        };
        Ok(value)
    }

    fn elements(
        &mut self,
        element: &NativeType,
        len: usize,
        depth: usize,
    ) -> WireResult<Vec<DynamicValue>> {
        let mut items = Vec::with_capacity(self.capacity_for(len));
        for _ in 0..len {
            items.push(self.value_at(element, depth + 1)?);
        }
        Ok(items)
    }

    /// Decode one descriptor frame.
    pub fn descriptor(&mut self) -> WireResult<TypeDescriptor> {
        self.descriptor_at(0)
    }

    fn descriptor_at(&mut self, depth: usize) -> WireResult<TypeDescriptor> {
        self.check_depth(depth)?;

        let tag = self.get_u8()?;
        if tag != DESCRIPTOR_TAG {
            return Err(WireError::InvalidData(format!(
                "expected descriptor tag {:#04x}, found {:#04x}",
                DESCRIPTOR_TAG, tag
            )));
        }
        let code = self.get_u8()?;
        let kind = Kind::from_code(code)
            .ok_or_else(|| WireError::InvalidData(format!("unknown kind code {}", code)))?;

        let mut components = BTreeMap::new();
        if self.presence()? {
            let len = self.get_len()?;
            for _ in 0..len {
                let name = self.get_string()?;
                let nested = self.descriptor_at(depth + 1)?;
                if components.insert(name.clone(), nested).is_some() {
                    return Err(WireError::InvalidData(format!(
                        "duplicate component '{}'",
                        name
                    )));
                }
            }
        }

        let mut metadata = BTreeMap::new();
        if self.presence()? {
            let len = self.get_len()?;
            for _ in 0..len {
                let key = self.get_string()?;
                let value = self.meta_value()?;
                if metadata.insert(key.clone(), value).is_some() {
                    return Err(WireError::InvalidData(format!(
                        "duplicate metadata key '{}'",
                        key
                    )));
                }
            }
        }

        Ok(TypeDescriptor::from_parts(kind, components, metadata))
    }

    fn presence(&mut self) -> WireResult<bool> {
        match self.get_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(WireError::InvalidData(format!(
                "presence byte {:#04x}",
                other
            ))),
        }
    }

    fn meta_value(&mut self) -> WireResult<MetaValue> {
        let tag = self.get_u8()?;
        match Kind::from_code(tag) {
            Some(Kind::Bool) => Ok(MetaValue::Bool(self.get_bool()?)),
            Some(Kind::Int64) => Ok(MetaValue::Int(self.get_i64()?)),
            Some(Kind::Uint64) => Ok(MetaValue::from(self.get_u64()?)),
            Some(Kind::String) => Ok(MetaValue::Str(self.get_string()?)),
            _ => Err(WireError::InvalidData(format!(
                "unknown metadata tag {:#04x}",
                tag
            ))),
        }
    }

    /// Fail if any bytes remain.
    pub fn finish(&self) -> WireResult<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(WireError::TrailingBytes(n)),
        }
    }
}
