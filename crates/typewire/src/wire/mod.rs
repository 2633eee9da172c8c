// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary wire format.
//!
//! # Value frames
//!
//! | Kind            | Payload                                         |
//! |-----------------|-------------------------------------------------|
//! | bool            | 1 byte, 0 or 1                                  |
//! | int / uint      | 8 bytes LE                                      |
//! | uintptr         | 8 bytes LE                                      |
//! | intN / uintN    | N/8 bytes LE                                    |
//! | floatN          | N/8 bytes LE (IEEE 754)                         |
//! | complexN        | real then imaginary part, N/16 bytes LE each    |
//! | string          | u32 byte length + UTF-8                         |
//! | array / slice   | u32 length + element frames                     |
//! | map             | u32 length + (key frame, value frame) pairs     |
//! | struct          | u32 field count + (u32 name length, name, frame)|
//! | ptr             | the pointee's frame                             |
//!
//! Every frame starts with one tag byte, the kind code. Descriptor frames
//! start with [`DESCRIPTOR_TAG`](crate::config::DESCRIPTOR_TAG).

mod decoder;
mod encoder;
mod error;

pub use decoder::WireDecoder;
pub use encoder::WireEncoder;
pub use error::{WireError, WireResult};

use crate::config::WireLimits;
use crate::native::{DynamicValue, NativeType};

/// Encode a single value of type `ty`.
pub fn encode_value(value: &DynamicValue, ty: &NativeType) -> WireResult<Vec<u8>> {
    let mut encoder = WireEncoder::new();
    encoder.put_typed(value, ty)?;
    Ok(encoder.into_bytes())
}

/// Decode a single value of type `ty`; the input must hold exactly one frame.
pub fn decode_value(bytes: &[u8], ty: &NativeType) -> WireResult<DynamicValue> {
    decode_value_with_limits(bytes, ty, WireLimits::default())
}

/// [`decode_value`] with explicit limits.
pub fn decode_value_with_limits(
    bytes: &[u8],
    ty: &NativeType,
    limits: WireLimits,
) -> WireResult<DynamicValue> {
    let mut decoder = WireDecoder::with_limits(bytes, limits);
    let value = decoder.value(ty)?;
    decoder.finish()?;
    Ok(value)
}
