// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor-keyed dynamic invocation.
//!
//! A [`FunctionRegistry`] maps function signatures to callables. A caller
//! encodes a [`CallEnvelope`] naming the signature it wants and carrying the
//! arguments; [`FunctionRegistry::dispatch`] finds the callable, decodes the
//! arguments against its parameter types, runs it and encodes the first
//! result.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use typewire::impl_record;
//! use typewire::invoke::{decode_result, CallEnvelope, FunctionRegistry};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: isize,
//! }
//! impl_record!(Person { name: String, age: isize });
//!
//! fn count_ages(people: Vec<Person>) -> BTreeMap<isize, isize> {
//!     let mut counts = BTreeMap::new();
//!     for p in people {
//!         *counts.entry(p.age).or_insert(0) += 1;
//!     }
//!     counts
//! }
//!
//! let registry = FunctionRegistry::new();
//! registry.register(count_ages);
//!
//! let people = vec![Person { name: "Bob".into(), age: 20 }];
//! let request = CallEnvelope::of::<fn(Vec<Person>) -> BTreeMap<isize, isize>>()
//!     .unwrap()
//!     .arg(&people)
//!     .encode()
//!     .unwrap();
//! let response = registry.dispatch(&request).unwrap();
//! let counts: BTreeMap<isize, isize> = decode_result(&response).unwrap();
//! assert_eq!(counts.get(&20), Some(&1));
//! ```

mod callable;
mod envelope;
mod error;
mod registry;

pub use callable::{Callable, DynamicArgs, DynamicCallable, IntoCallable, ReturnValue};
pub use envelope::{call, decode_result, decode_result_value, encode_call, CallEnvelope};
pub use error::{CallError, CallResult};
pub use registry::FunctionRegistry;

#[cfg(test)]
mod tests;
