// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for TypeDescriptor.

use crate::descriptor::{Kind, MetaValue, TypeDescriptor};
use std::collections::BTreeMap;

/// Builder for creating TypeDescriptor instances.
///
/// Empty component or metadata maps are dropped on `build`, so a composite
/// kind with nothing recorded encodes the same as one built without maps.
#[derive(Debug)]
pub struct DescriptorBuilder {
    kind: Kind,
    components: BTreeMap<String, TypeDescriptor>,
    metadata: BTreeMap<String, MetaValue>,
}

impl DescriptorBuilder {
    /// Create a new builder for the given kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            components: BTreeMap::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add a nested descriptor.
    pub fn component(mut self, name: impl Into<String>, desc: TypeDescriptor) -> Self {
        self.components.insert(name.into(), desc);
        self
    }

    /// Add a metadata entry.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::from_parts(self.kind, self.components, self.metadata)
    }
}
