// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors.
//!
//! A [`TypeDescriptor`] is a recursive, serializable description of a type:
//! a [`Kind`], nested descriptors keyed by component name, and scalar
//! metadata. Ordering (parameters, struct fields) is always carried by
//! explicit `in_<i>` / `out_<i>` / `field_<i>` keys, never by map order.
//!
//! # Text form
//!
//! ```text
//! {"kind":"struct","struct":{"age":{"kind":"int64"},"name":{"kind":"string"}},
//!  "extra":{"field_0":"name","field_1":"age","fields_number":2}}
//! ```
//!
//! # Example
//!
//! ```rust
//! use typewire::descriptor::{DescriptorBuilder, Kind, TypeDescriptor, ARRAY_LENGTH, ELEMENT_TYPE};
//!
//! let desc = DescriptorBuilder::new(Kind::Array)
//!     .component(ELEMENT_TYPE, TypeDescriptor::scalar(Kind::Int))
//!     .meta(ARRAY_LENGTH, 16usize)
//!     .build();
//!
//! assert_eq!(
//!     desc.canonical_key(),
//!     r#"{"kind":"array","struct":{"element_type":{"kind":"int"}},"extra":{"array_length":16}}"#
//! );
//! ```

mod builder;
mod error;
mod hash;
mod kind;
mod type_descriptor;

pub use builder::DescriptorBuilder;
pub use error::DescriptorError;
pub use hash::DescriptorHash;
pub use kind::Kind;
pub use type_descriptor::{MetaValue, TypeDescriptor};

/// Element type of array, chan, ptr and slice.
pub const ELEMENT_TYPE: &str = "element_type";
/// Length of an array.
pub const ARRAY_LENGTH: &str = "array_length";
/// Key type of a map.
pub const KEY_TYPE: &str = "key_type";
/// Value type of a map.
pub const VALUE_TYPE: &str = "value_type";
/// Parameter count of a func.
pub const IN_NUMBER: &str = "in_number";
/// Result count of a func.
pub const OUT_NUMBER: &str = "out_number";
/// Prefix of positional parameter components (`in_0`, `in_1`, ...).
pub const IN_PREFIX: &str = "in_";
/// Prefix of positional result components (`out_0`, ...).
pub const OUT_PREFIX: &str = "out_";
/// Field count of a struct.
pub const FIELDS_NUMBER: &str = "fields_number";
/// Prefix of positional field-name metadata (`field_0`, ...).
pub const FIELD_PREFIX: &str = "field_";
/// Direction of a chan.
pub const CHAN_DIR: &str = "chan_dir";
/// Whether the last parameter of a func is variadic.
pub const VARIADIC: &str = "variadic";

/// Component key of the i-th parameter.
pub fn in_key(index: usize) -> String {
    format!("{}{}", IN_PREFIX, index)
}

/// Component key of the i-th result.
pub fn out_key(index: usize) -> String {
    format!("{}{}", OUT_PREFIX, index)
}

/// Metadata key holding the name of the i-th field.
pub fn field_key(index: usize) -> String {
    format!("{}{}", FIELD_PREFIX, index)
}

#[cfg(test)]
mod tests;
