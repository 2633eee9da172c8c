// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire encoder.

use crate::config::DESCRIPTOR_TAG;
use crate::descriptor::{Kind, MetaValue, TypeDescriptor};
use crate::native::{DynamicValue, NativeType};
use crate::wire::{WireError, WireResult};

/// Append-only wire writer.
///
/// Every value frame starts with the value's kind code, so a decoder can
/// detect a shape mismatch before reading the payload.
#[derive(Debug, Default, Clone)]
pub struct WireEncoder {
    buffer: Vec<u8>,
}

impl WireEncoder {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    fn put_len(&mut self, len: usize) -> WireResult<()> {
        let len = u32::try_from(len).map_err(|_| WireError::LimitExceeded {
            what: "collection length",
            limit: u32::MAX as usize,
            found: len,
        })?;
        self.put_u32(len);
        Ok(())
    }

    fn put_str(&mut self, s: &str) -> WireResult<()> {
        self.put_len(s.len())?;
        self.buffer.extend_from_slice(s.as_bytes());
        Ok(())
    }

    /// Write a value frame.
    pub fn put_value(&mut self, value: &DynamicValue) -> WireResult<()> {
        self.put_u8(value.kind().code());
        match value {
            DynamicValue::Bool(v) => self.put_u8(u8::from(*v)),
            DynamicValue::Int(v) | DynamicValue::Int64(v) => {
                self.buffer.extend_from_slice(&v.to_le_bytes())
            }
            DynamicValue::Int8(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            DynamicValue::Int16(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            DynamicValue::Int32(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            DynamicValue::Uint(v) | DynamicValue::Uint64(v) | DynamicValue::Uintptr(v) => {
                self.put_u64(*v)
            }
            DynamicValue::Uint8(v) => self.put_u8(*v),
            DynamicValue::Uint16(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            DynamicValue::Uint32(v) => self.put_u32(*v),
            DynamicValue::Float32(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            DynamicValue::Float64(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            DynamicValue::Complex64(c) => {
                self.buffer.extend_from_slice(&c.re.to_le_bytes());
                self.buffer.extend_from_slice(&c.im.to_le_bytes());
            }
            DynamicValue::Complex128(c) => {
                self.buffer.extend_from_slice(&c.re.to_le_bytes());
                self.buffer.extend_from_slice(&c.im.to_le_bytes());
            }
            DynamicValue::String(s) => self.put_str(s)?,
            DynamicValue::Array(items) | DynamicValue::Slice(items) => {
                self.put_len(items.len())?;
                for item in items {
                    self.put_value(item)?;
                }
            }
            DynamicValue::Map(entries) => {
                self.put_len(entries.len())?;
                for (k, v) in entries {
                    self.put_value(k)?;
                    self.put_value(v)?;
                }
            }
            DynamicValue::Struct(fields) => {
                self.put_len(fields.len())?;
                for (name, v) in fields {
                    self.put_str(name)?;
                    self.put_value(v)?;
                }
            }
        }
        Ok(())
    }

    /// Write a value frame after checking it against `ty`.
    ///
    /// Pointers are transparent; struct fields must appear in declaration
    /// order. Nothing is written when the check fails.
    pub fn put_typed(&mut self, value: &DynamicValue, ty: &NativeType) -> WireResult<()> {
        check_value(value, ty)?;
        self.put_value(value)
    }

    /// Write a descriptor frame.
    ///
    /// Layout: tag, kind code, then the component map and the metadata map,
    /// each preceded by a presence byte so absent and empty stay distinct.
    /// Fails only when a map or string is longer than `u32::MAX`.
    pub fn put_descriptor(&mut self, desc: &TypeDescriptor) -> WireResult<()> {
        self.put_u8(DESCRIPTOR_TAG);
        self.put_u8(desc.kind().code());

        match desc.components() {
            None => self.put_u8(0),
            Some(components) => {
                self.put_u8(1);
                self.put_len(components.len())?;
                for (name, nested) in components {
                    self.put_str(name)?;
                    self.put_descriptor(nested)?;
                }
            }
        }

        match desc.metadata() {
            None => self.put_u8(0),
            Some(metadata) => {
                self.put_u8(1);
                self.put_len(metadata.len())?;
                for (key, value) in metadata {
                    self.put_str(key)?;
                    self.put_meta(value)?;
                }
            }
        }
        Ok(())
    }

    fn put_meta(&mut self, value: &MetaValue) -> WireResult<()> {
        match value {
            MetaValue::Bool(v) => {
                self.put_u8(Kind::Bool.code());
                self.put_u8(u8::from(*v));
            }
            MetaValue::Int(v) => {
                self.put_u8(Kind::Int64.code());
                self.buffer.extend_from_slice(&v.to_le_bytes());
            }
            MetaValue::Uint(v) => {
                self.put_u8(Kind::Uint64.code());
                self.put_u64(*v);
            }
            MetaValue::Str(s) => {
                self.put_u8(Kind::String.code());
                self.put_str(s)?;
            }
        }
        Ok(())
    }
}

fn mismatch(expected: &NativeType, value: &DynamicValue) -> WireError {
    WireError::TypeMismatch {
        expected: expected.kind(),
        found: value.kind(),
    }
}

/// Check that `value` is a well-formed instance of `ty`.
fn check_value(value: &DynamicValue, ty: &NativeType) -> WireResult<()> {
    match (ty, value) {
        (NativeType::Pointer(inner), _) => check_value(value, inner),
        (NativeType::Chan { .. } | NativeType::Func { .. }, _) => {
            Err(WireError::NotEncodable(ty.kind()))
        }
        (NativeType::Array { element, length }, DynamicValue::Array(items)) => {
            if items.len() != *length {
                return Err(WireError::LengthMismatch {
                    expected: *length,
                    found: items.len(),
                });
            }
            items.iter().try_for_each(|item| check_value(item, element))
        }
        (NativeType::Slice(element), DynamicValue::Slice(items)) => {
            items.iter().try_for_each(|item| check_value(item, element))
        }
        (NativeType::Map { key, value: val }, DynamicValue::Map(entries)) => {
            entries.iter().try_for_each(|(k, v)| {
                check_value(k, key)?;
                check_value(v, val)
            })
        }
        (NativeType::Struct(fields), DynamicValue::Struct(values)) => {
            if fields.len() != values.len() {
                return Err(WireError::LengthMismatch {
                    expected: fields.len(),
                    found: values.len(),
                });
            }
            for (field, (name, v)) in fields.iter().zip(values) {
                if field.name != *name {
                    return Err(WireError::InvalidData(format!(
                        "expected field '{}', found '{}'",
                        field.name, name
                    )));
                }
                check_value(v, &field.ty)?;
            }
            Ok(())
        }
        (scalar, v) if scalar.kind() == v.kind() && scalar.kind().is_scalar() => Ok(()),
        (expected, v) => Err(mismatch(expected, v)),
    }
}
