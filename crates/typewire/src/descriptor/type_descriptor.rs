// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Portable type descriptors.

use crate::descriptor::{DescriptorError, Kind};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Scalar metadata value attached to a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    /// Unsigned value above `i64::MAX`; smaller values are always `Int`.
    Uint(u64),
    Str(String),
}

impl MetaValue {
    /// Try to get as integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as an unsigned integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(v) => u64::try_from(*v).ok(),
            Self::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::Uint(_) => "integer",
            Self::Str(_) => "string",
        }
    }
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for MetaValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(int) => Self::Int(int),
            Err(_) => Self::Uint(v),
        }
    }
}

impl From<usize> for MetaValue {
    fn from(v: usize) -> Self {
        Self::from(v as u64)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Structural description of a type, independent of any type system.
///
/// `components` holds nested descriptors (element, key, parameters, fields),
/// `metadata` holds scalar facts (lengths, counts, field order). Both are
/// `None` for scalar kinds; composite kinds never store an empty map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    #[serde(serialize_with = "serialize_kind", deserialize_with = "deserialize_kind")]
    kind: Kind,
    #[serde(
        rename = "struct",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    components: Option<BTreeMap<String, TypeDescriptor>>,
    #[serde(
        rename = "extra",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    metadata: Option<BTreeMap<String, MetaValue>>,
}

impl TypeDescriptor {
    /// Descriptor made of a kind alone.
    pub fn scalar(kind: Kind) -> Self {
        Self {
            kind,
            components: None,
            metadata: None,
        }
    }

    pub(crate) fn from_parts(
        kind: Kind,
        components: BTreeMap<String, TypeDescriptor>,
        metadata: BTreeMap<String, MetaValue>,
    ) -> Self {
        Self {
            kind,
            components: Some(components).filter(|m| !m.is_empty()),
            metadata: Some(metadata).filter(|m| !m.is_empty()),
        }
    }

    /// Get the kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Nested descriptors, if any.
    pub fn components(&self) -> Option<&BTreeMap<String, TypeDescriptor>> {
        self.components.as_ref()
    }

    /// Scalar metadata, if any.
    pub fn metadata(&self) -> Option<&BTreeMap<String, MetaValue>> {
        self.metadata.as_ref()
    }

    /// Get a nested descriptor by component name.
    pub fn component(&self, name: &str) -> Option<&TypeDescriptor> {
        self.components.as_ref()?.get(name)
    }

    /// Get a metadata entry by key.
    pub fn meta(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.as_ref()?.get(key)
    }

    pub(crate) fn require_component(&self, key: &str) -> Result<&TypeDescriptor, DescriptorError> {
        self.component(key)
            .ok_or_else(|| DescriptorError::MissingComponent {
                kind: self.kind,
                key: key.to_string(),
            })
    }

    fn require_meta(&self, key: &str) -> Result<&MetaValue, DescriptorError> {
        self.meta(key).ok_or_else(|| DescriptorError::MissingMetadata {
            kind: self.kind,
            key: key.to_string(),
        })
    }

    pub(crate) fn require_usize(&self, key: &str) -> Result<usize, DescriptorError> {
        let value = self.require_meta(key)?;
        let unsigned = match value {
            MetaValue::Int(int) => u64::try_from(*int).map_err(|_| {
                DescriptorError::InvalidMetadata {
                    key: key.to_string(),
                    reason: format!("negative value {}", int),
                }
            })?,
            MetaValue::Uint(v) => *v,
            other => {
                return Err(DescriptorError::InvalidMetadata {
                    key: key.to_string(),
                    reason: format!("expected integer, found {}", other.type_name()),
                })
            }
        };
        usize::try_from(unsigned).map_err(|_| DescriptorError::InvalidMetadata {
            key: key.to_string(),
            reason: format!("value {} exceeds usize", unsigned),
        })
    }

    pub(crate) fn require_str(&self, key: &str) -> Result<&str, DescriptorError> {
        let value = self.require_meta(key)?;
        value
            .as_str()
            .ok_or_else(|| DescriptorError::InvalidMetadata {
                key: key.to_string(),
                reason: format!("expected string, found {}", value.type_name()),
            })
    }

    /// Missing flags read as `false`.
    pub(crate) fn flag(&self, key: &str) -> Result<bool, DescriptorError> {
        match self.meta(key) {
            None => Ok(false),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| DescriptorError::InvalidMetadata {
                    key: key.to_string(),
                    reason: format!("expected bool, found {}", value.type_name()),
                }),
        }
    }

    /// Canonical text form, used as the registry lookup key.
    ///
    /// Keys are emitted in sorted order and absent maps are omitted, so the
    /// same tree always yields the same string.
    pub fn canonical_key(&self) -> String {
        self.to_string()
    }

    /// Indented text form, for humans.
    pub fn to_json_pretty(&self) -> Result<String, DescriptorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse the text form.
    pub fn from_json(text: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn serialize_kind<S: Serializer>(kind: &Kind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.name())
}

fn deserialize_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Kind, D::Error> {
    let name = String::deserialize(deserializer)?;
    Kind::from_name(&name).map_err(de::Error::custom)
}

fn empty_as_none<'de, D, V>(deserializer: D) -> Result<Option<BTreeMap<String, V>>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let map = Option::<BTreeMap<String, V>>::deserialize(deserializer)?;
    Ok(map.filter(|m| !m.is_empty()))
}
