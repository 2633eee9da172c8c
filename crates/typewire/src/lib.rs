// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # typewire - structural type descriptors and descriptor-keyed calls
//!
//! typewire describes Rust types as portable, serializable descriptor
//! trees, rebuilds runtime type handles from those trees, and dispatches
//! function calls whose target is chosen by the descriptor of its
//! signature.
//!
//! ## Quick Start
//!
//! ```rust
//! use typewire::invoke::{call, FunctionRegistry};
//! use typewire::native::DynamicValue;
//!
//! let registry = FunctionRegistry::new();
//! registry.register(|a: isize, b: isize| a + b);
//!
//! let sum: isize = call::<isize, fn(isize, isize) -> isize>(
//!     &registry,
//!     &[DynamicValue::Int(1), DynamicValue::Int(2)],
//! )
//! .unwrap();
//! assert_eq!(sum, 3);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |  invoke     FunctionRegistry | CallEnvelope | Callable              |
//! +---------------------------------------------------------------------+
//! |  wire       WireEncoder / WireDecoder (tagged value frames)        |
//! +---------------------------------------------------------------------+
//! |  native     Describe | NativeType | DynamicValue | Marshal          |
//! +---------------------------------------------------------------------+
//! |  descriptor Kind | TypeDescriptor | canonical key | DescriptorHash  |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeDescriptor`] | Portable description of a type (kind, components, metadata) |
//! | [`NativeType`] | Runtime type handle rebuilt from a descriptor |
//! | [`DynamicValue`] | Value of any type with a value form |
//! | [`FunctionRegistry`] | Signature-keyed callable store and dispatcher |
//!
//! ## Modules Overview
//!
//! - [`descriptor`] - Descriptor data model and text form
//! - [`native`] - Describe / reconstruct, dynamic values
//! - [`wire`] - Binary wire format
//! - [`invoke`] - Registry, envelopes, dispatch
//! - [`config`] - Wire constants and decoding limits

/// Wire constants and decoding limits.
pub mod config;
/// Type descriptors: kinds, descriptor trees, canonical keys.
pub mod descriptor;
/// Descriptor-keyed dynamic invocation.
pub mod invoke;
/// Native type handles, dynamic values and conversions.
pub mod native;
/// Binary wire format for values and descriptors.
pub mod wire;

pub use config::WireLimits;
pub use descriptor::{DescriptorError, DescriptorHash, Kind, TypeDescriptor};
pub use invoke::{CallEnvelope, CallError, Callable, FunctionRegistry};
pub use native::{describe, type_of, Describe, DynamicValue, Marshal, NativeType};
pub use wire::{WireError, WireResult};
