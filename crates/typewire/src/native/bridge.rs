// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bridge between native type handles and portable descriptors.
//!
//! [`TypeDescriptor::from_native`] flattens a [`NativeType`] into kind,
//! components and metadata; [`TypeDescriptor::to_native`] rebuilds the
//! handle. Both dispatch on the kind, and every positional element
//! (parameter, result, field) is addressed by its explicit index key.

use crate::descriptor::{
    field_key, in_key, out_key, DescriptorBuilder, DescriptorError, Kind, TypeDescriptor,
    ARRAY_LENGTH, CHAN_DIR, ELEMENT_TYPE, FIELDS_NUMBER, IN_NUMBER, KEY_TYPE, OUT_NUMBER,
    VALUE_TYPE, VARIADIC,
};
use crate::native::{ChanDir, Describe, FieldType, NativeType};
use std::collections::BTreeSet;

/// Descriptor of a Rust type.
pub fn describe<T: Describe + ?Sized>() -> TypeDescriptor {
    TypeDescriptor::from_native(&T::native_type())
}

/// Descriptor of the type of a value.
pub fn type_of<T: Describe>(_value: &T) -> TypeDescriptor {
    describe::<T>()
}

impl TypeDescriptor {
    /// Describe a native type.
    pub fn from_native(ty: &NativeType) -> Self {
        match ty {
            NativeType::Array { element, length } => DescriptorBuilder::new(Kind::Array)
                .component(ELEMENT_TYPE, Self::from_native(element))
                .meta(ARRAY_LENGTH, *length)
                .build(),
            NativeType::Chan { element, dir } => DescriptorBuilder::new(Kind::Chan)
                .component(ELEMENT_TYPE, Self::from_native(element))
                .meta(CHAN_DIR, dir.code())
                .build(),
            NativeType::Func {
                inputs,
                outputs,
                variadic,
            } => {
                let mut builder = DescriptorBuilder::new(Kind::Func)
                    .meta(IN_NUMBER, inputs.len())
                    .meta(OUT_NUMBER, outputs.len())
                    .meta(VARIADIC, *variadic);
                for (i, input) in inputs.iter().enumerate() {
                    builder = builder.component(in_key(i), Self::from_native(input));
                }
                for (i, output) in outputs.iter().enumerate() {
                    builder = builder.component(out_key(i), Self::from_native(output));
                }
                builder.build()
            }
            NativeType::Map { key, value } => DescriptorBuilder::new(Kind::Map)
                .component(KEY_TYPE, Self::from_native(key))
                .component(VALUE_TYPE, Self::from_native(value))
                .build(),
            NativeType::Pointer(element) | NativeType::Slice(element) => {
                DescriptorBuilder::new(ty.kind())
                    .component(ELEMENT_TYPE, Self::from_native(element))
                    .build()
            }
            NativeType::Struct(fields) => {
                let mut builder =
                    DescriptorBuilder::new(Kind::Struct).meta(FIELDS_NUMBER, fields.len());
                for (i, field) in fields.iter().enumerate() {
                    builder = builder
                        .meta(field_key(i), field.name.as_str())
                        .component(field.name.as_str(), Self::from_native(&field.ty));
                }
                builder.build()
            }
            scalar => Self::scalar(scalar.kind()),
        }
    }

    /// Rebuild the native type this descriptor describes.
    pub fn to_native(&self) -> Result<NativeType, DescriptorError> {
        let kind = self.kind();
        if !kind.is_supported() {
            return Err(DescriptorError::UnsupportedKind(kind));
        }
        if let Some(scalar) = NativeType::scalar(kind) {
            return Ok(scalar);
        }

        let ty = match kind {
            Kind::Array => NativeType::Array {
                element: Box::new(self.require_component(ELEMENT_TYPE)?.to_native()?),
                length: self.require_usize(ARRAY_LENGTH)?,
            },
            Kind::Chan => {
                let code = self.require_usize(CHAN_DIR)?;
                let dir = i64::try_from(code)
                    .ok()
                    .and_then(ChanDir::from_code)
                    .ok_or_else(|| DescriptorError::InvalidMetadata {
                        key: CHAN_DIR.to_string(),
                        reason: format!("unknown direction {}", code),
                    })?;
                NativeType::Chan {
                    element: Box::new(self.require_component(ELEMENT_TYPE)?.to_native()?),
                    dir,
                }
            }
            Kind::Func => {
                let num_in = self.require_usize(IN_NUMBER)?;
                let num_out = self.require_usize(OUT_NUMBER)?;
                let inputs = (0..num_in)
                    .map(|i| self.require_component(&in_key(i))?.to_native())
                    .collect::<Result<Vec<_>, _>>()?;
                let outputs = (0..num_out)
                    .map(|i| self.require_component(&out_key(i))?.to_native())
                    .collect::<Result<Vec<_>, _>>()?;
                NativeType::Func {
                    inputs,
                    outputs,
                    variadic: self.flag(VARIADIC)?,
                }
            }
            Kind::Map => NativeType::Map {
                key: Box::new(self.require_component(KEY_TYPE)?.to_native()?),
                value: Box::new(self.require_component(VALUE_TYPE)?.to_native()?),
            },
            Kind::Ptr => {
                NativeType::Pointer(Box::new(self.require_component(ELEMENT_TYPE)?.to_native()?))
            }
            Kind::Slice => {
                NativeType::Slice(Box::new(self.require_component(ELEMENT_TYPE)?.to_native()?))
            }
            Kind::Struct => NativeType::Struct(self.struct_fields()?),
            other => return Err(DescriptorError::UnsupportedKind(other)),
        };
        Ok(ty)
    }

    /// Fields in `field_<i>` order; metadata and components must name the
    /// same set of fields.
    fn struct_fields(&self) -> Result<Vec<FieldType>, DescriptorError> {
        let count = self.require_usize(FIELDS_NUMBER)?;
        let mut seen = BTreeSet::new();
        let mut fields = Vec::with_capacity(count);
        for i in 0..count {
            let name = self.require_str(&field_key(i))?;
            if !seen.insert(name) {
                return Err(DescriptorError::FieldMismatch(name.to_string()));
            }
            let field_desc = self
                .component(name)
                .ok_or_else(|| DescriptorError::FieldMismatch(name.to_string()))?;
            fields.push(FieldType::new(name, field_desc.to_native()?));
        }
        if let Some(components) = self.components() {
            if let Some(extra) = components.keys().find(|k| !seen.contains(k.as_str())) {
                return Err(DescriptorError::FieldMismatch(extra.clone()));
            }
        }
        Ok(fields)
    }
}
