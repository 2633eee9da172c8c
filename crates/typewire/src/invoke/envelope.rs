// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Call and result envelopes.
//!
//! ```text
//! call:   [version][func descriptor frame][uint count frame][arg frame]...
//! result: [version][value frame]
//! ```

use crate::config::{WireLimits, WIRE_VERSION};
use crate::descriptor::TypeDescriptor;
use crate::invoke::{CallError, CallResult, FunctionRegistry};
use crate::native::{Describe, DynamicValue, Marshal, NativeType};
use crate::wire::{WireDecoder, WireEncoder, WireError};

/// Builder for a call envelope.
#[derive(Debug, Clone)]
pub struct CallEnvelope {
    signature: NativeType,
    descriptor: TypeDescriptor,
    args: Vec<DynamicValue>,
}

impl CallEnvelope {
    /// Start a call to a function with this signature.
    pub fn new(signature: NativeType) -> CallResult<Self> {
        if !matches!(signature, NativeType::Func { .. }) {
            return Err(CallError::NotAFunction(signature.kind()));
        }
        let descriptor = TypeDescriptor::from_native(&signature);
        Ok(Self {
            signature,
            descriptor,
            args: Vec::new(),
        })
    }

    /// Start a call to a function of Rust type `F` (an `fn` pointer type).
    pub fn of<F: Describe + ?Sized>() -> CallResult<Self> {
        Self::new(F::native_type())
    }

    /// Append a Rust argument.
    pub fn arg<T: Marshal>(self, value: &T) -> Self {
        self.arg_value(value.to_value())
    }

    /// Append a dynamic argument.
    pub fn arg_value(mut self, value: DynamicValue) -> Self {
        self.args.push(value);
        self
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn signature(&self) -> &NativeType {
        &self.signature
    }

    /// Encode the envelope, checking each argument against its parameter.
    pub fn encode(&self) -> CallResult<Vec<u8>> {
        let inputs = self.signature.inputs().unwrap_or(&[]);
        if self.args.len() != inputs.len() {
            return Err(CallError::ArityMismatch {
                expected: inputs.len(),
                found: self.args.len(),
            });
        }

        let mut encoder = WireEncoder::with_capacity(64);
        encoder.put_u8(WIRE_VERSION);
        encoder
            .put_descriptor(&self.descriptor)
            .map_err(CallError::Envelope)?;
        encoder
            .put_value(&DynamicValue::Uint(self.args.len() as u64))
            .map_err(CallError::Envelope)?;
        for (index, (arg, ty)) in self.args.iter().zip(inputs).enumerate() {
            encoder
                .put_typed(arg, ty)
                .map_err(|source| CallError::ArgumentEncode { index, source })?;
        }

        log::trace!(
            "[typewire] encoded call {} ({} bytes)",
            self.signature,
            encoder.len()
        );
        Ok(encoder.into_bytes())
    }
}

/// Encode a call to a function of Rust type `F`.
pub fn encode_call<F: Describe + ?Sized>(args: &[DynamicValue]) -> CallResult<Vec<u8>> {
    args.iter()
        .cloned()
        .fold(CallEnvelope::of::<F>()?, CallEnvelope::arg_value)
        .encode()
}

/// Decode a result envelope into a Rust value.
pub fn decode_result<R: Marshal>(response: &[u8]) -> CallResult<R> {
    let value = decode_result_value(response, &R::native_type(), WireLimits::default())?;
    R::from_value(value).map_err(CallError::ResultValue)
}

/// Decode a result envelope against an explicit type.
pub fn decode_result_value(
    response: &[u8],
    ty: &NativeType,
    limits: WireLimits,
) -> CallResult<DynamicValue> {
    let mut decoder = WireDecoder::with_limits(response, limits);
    let version = decoder.get_u8().map_err(CallError::ResultDecode)?;
    if version != WIRE_VERSION {
        return Err(CallError::ResultDecode(WireError::UnsupportedVersion(
            version,
        )));
    }
    let value = decoder.value(ty).map_err(CallError::ResultDecode)?;
    decoder.finish().map_err(CallError::ResultDecode)?;
    Ok(value)
}

/// Encode, dispatch and decode in one step.
pub fn call<R: Marshal, F: Describe + ?Sized>(
    registry: &FunctionRegistry,
    args: &[DynamicValue],
) -> CallResult<R> {
    let request = encode_call::<F>(args)?;
    let response = registry.dispatch(&request)?;
    decode_result(&response)
}
