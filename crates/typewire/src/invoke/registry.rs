// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Function registry keyed by signature descriptor.
//!
//! Callables are stored under the canonical key of their signature's
//! descriptor. Lookup is purely structural: two functions with the same
//! signature share a key and the later registration replaces the earlier.

use crate::config::{WireLimits, WIRE_VERSION};
use crate::descriptor::{DescriptorHash, TypeDescriptor};
use crate::invoke::{CallError, CallResult, Callable, IntoCallable};
use crate::native::{DynamicValue, NativeType};
use crate::wire::{WireDecoder, WireEncoder, WireError};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

struct RegistryEntry {
    descriptor: TypeDescriptor,
    callable: Arc<dyn Callable>,
}

/// Thread-safe registry of callables.
///
/// Writers are serialized per shard and readers proceed concurrently. A
/// lookup clones the callable's `Arc` out of the map, so no lock is held
/// while a function runs.
///
/// # Example
///
/// ```rust
/// use typewire::invoke::{call, FunctionRegistry};
/// use typewire::native::DynamicValue;
///
/// let registry = FunctionRegistry::new();
/// registry.register(|a: isize, b: isize| a + b);
///
/// let sum: isize = call::<isize, fn(isize, isize) -> isize>(
///     &registry,
///     &[DynamicValue::Int(1), DynamicValue::Int(2)],
/// )
/// .unwrap();
/// assert_eq!(sum, 3);
/// ```
pub struct FunctionRegistry {
    entries: DashMap<String, RegistryEntry>,
    limits: WireLimits,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Empty registry with default decoding limits.
    pub fn new() -> Self {
        Self::with_limits(WireLimits::default())
    }

    /// Empty registry applying `limits` to every dispatched envelope.
    pub fn with_limits(limits: WireLimits) -> Self {
        Self {
            entries: DashMap::new(),
            limits,
        }
    }

    pub fn limits(&self) -> &WireLimits {
        &self.limits
    }

    /// Register a Rust closure or `fn`; returns its signature descriptor.
    pub fn register<F, Args>(&self, func: F) -> TypeDescriptor
    where
        F: IntoCallable<Args>,
    {
        self.register_callable(func.into_callable())
    }

    /// Register a callable; returns its signature descriptor.
    pub fn register_callable(&self, callable: Arc<dyn Callable>) -> TypeDescriptor {
        let descriptor = TypeDescriptor::from_native(callable.signature());
        let key = descriptor.canonical_key();
        let entry = RegistryEntry {
            descriptor: descriptor.clone(),
            callable,
        };

        if let Some(previous) = self.entries.insert(key, entry) {
            log::warn!(
                "[typewire] replaced function {} ({})",
                previous.callable.signature(),
                DescriptorHash::of(&previous.descriptor)
            );
        } else {
            log::debug!(
                "[typewire] registered function {} ({})",
                descriptor
                    .to_native()
                    .map(|ty| ty.to_string())
                    .unwrap_or_else(|_| descriptor.canonical_key()),
                DescriptorHash::of(&descriptor)
            );
        }
        descriptor
    }

    /// Remove the callable registered for a signature.
    pub fn unregister(&self, signature: &TypeDescriptor) -> bool {
        let removed = self.entries.remove(&signature.canonical_key()).is_some();
        if removed {
            log::debug!(
                "[typewire] unregistered function ({})",
                DescriptorHash::of(signature)
            );
        }
        removed
    }

    /// Callable registered for a signature descriptor.
    pub fn lookup(&self, signature: &TypeDescriptor) -> Option<Arc<dyn Callable>> {
        self.lookup_key(&signature.canonical_key())
    }

    /// Callable registered under a canonical key.
    pub fn lookup_key(&self, key: &str) -> Option<Arc<dyn Callable>> {
        self.entries
            .get(key)
            .map(|entry| Arc::clone(&entry.callable))
    }

    pub fn contains(&self, signature: &TypeDescriptor) -> bool {
        self.entries.contains_key(&signature.canonical_key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical keys of all registered signatures, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Serve one call envelope and return the result envelope.
    ///
    /// Arguments are decoded against the registered callable's parameter
    /// types, never against anything the caller claims. Only the first
    /// output is returned. A panic inside the callable unwinds through
    /// this method.
    pub fn dispatch(&self, request: &[u8]) -> CallResult<Vec<u8>> {
        log::trace!("[typewire] dispatch: {} byte envelope", request.len());

        let mut decoder = WireDecoder::with_limits(request, self.limits);
        let version = decoder.get_u8().map_err(CallError::Envelope)?;
        if version != WIRE_VERSION {
            return Err(CallError::Envelope(WireError::UnsupportedVersion(version)));
        }
        let descriptor = decoder.descriptor().map_err(CallError::Envelope)?;
        let count = decode_count(&mut decoder)?;

        let key = descriptor.canonical_key();
        let callable = match self.lookup_key(&key) {
            Some(callable) => callable,
            None => {
                log::debug!(
                    "[typewire] dispatch miss ({})",
                    DescriptorHash::of(&descriptor)
                );
                return Err(CallError::NotRegistered(key));
            }
        };

        let signature = callable.signature();
        let inputs = signature.inputs().unwrap_or(&[]);
        if count != inputs.len() {
            return Err(CallError::ArityMismatch {
                expected: inputs.len(),
                found: count,
            });
        }

        let mut args = Vec::with_capacity(inputs.len());
        for (index, ty) in inputs.iter().enumerate() {
            let value = decoder
                .value(ty)
                .map_err(|source| CallError::ArgumentDecode { index, source })?;
            args.push(value);
        }
        decoder.finish().map_err(CallError::Envelope)?;

        log::debug!("[typewire] dispatch {}", signature);
        let outputs = callable.invoke(args)?;
        let result = outputs.into_iter().next().ok_or(CallError::NoResult)?;
        let result_ty = signature
            .outputs()
            .and_then(|outputs| outputs.first())
            .ok_or(CallError::NoResult)?;

        let response = encode_result(&result, result_ty)?;
        log::trace!("[typewire] dispatch: {} byte result", response.len());
        Ok(response)
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.entries.len())
            .field("limits", &self.limits)
            .finish()
    }
}

fn decode_count(decoder: &mut WireDecoder<'_>) -> CallResult<usize> {
    let count = decoder
        .value(&NativeType::Uint)
        .map_err(CallError::Envelope)?;
    let raw = count.as_u64().unwrap_or_default();
    usize::try_from(raw).map_err(|_| {
        CallError::Envelope(WireError::InvalidData(format!(
            "parameter count {} out of range",
            raw
        )))
    })
}

fn encode_result(value: &DynamicValue, ty: &NativeType) -> CallResult<Vec<u8>> {
    let mut encoder = WireEncoder::new();
    encoder.put_u8(WIRE_VERSION);
    encoder
        .put_typed(value, ty)
        .map_err(CallError::ResultEncode)?;
    Ok(encoder.into_bytes())
}
