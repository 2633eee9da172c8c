// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native types and dynamic values.
//!
//! Rust has no runtime reflection, so the shape of a type is captured
//! statically through the [`Describe`] trait and carried at runtime as a
//! [`NativeType`]. Values travel as [`DynamicValue`]s and convert back to Rust
//! values through [`Marshal`].
//!
//! # Example
//!
//! ```rust
//! use typewire::native::{describe, Describe};
//! use typewire::descriptor::Kind;
//!
//! let desc = describe::<Vec<String>>();
//! assert_eq!(desc.kind(), Kind::Slice);
//! assert_eq!(desc.to_native().unwrap(), Vec::<String>::native_type());
//! ```

mod bridge;
mod describe;
mod marshal;
mod native_type;
mod record;
mod value;

pub use bridge::{describe, type_of};
pub use describe::{Describe, Outputs};
#[doc(hidden)]
pub use marshal::StructFields;
pub use marshal::{Marshal, ValueError};
pub use native_type::{ChanDir, FieldType, NativeType};
pub use value::{Complex, DynamicValue, Uintptr};
