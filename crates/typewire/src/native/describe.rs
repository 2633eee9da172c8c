// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compile-time type introspection.
//!
//! [`Describe`] gives a Rust type its [`NativeType`]. It is implemented for
//! the scalar types (plus [`Uintptr`] and [`Complex`]), strings, arrays, `Vec`, `Box`/`Arc`, `BTreeMap`/`HashMap`,
//! crossbeam channel endpoints and `fn` pointers up to six parameters. User
//! structs get it through [`impl_record!`](crate::impl_record).

use crate::native::{ChanDir, Complex, NativeType, Uintptr};
use crossbeam::channel::{Receiver, Sender};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Types with a static native type handle.
pub trait Describe {
    /// The native type of `Self`.
    fn native_type() -> NativeType;
}

/// Result shape of a function: `()` has no outputs, anything else has one.
pub trait Outputs {
    fn output_types() -> Vec<NativeType>;
}

impl Outputs for () {
    fn output_types() -> Vec<NativeType> {
        Vec::new()
    }
}

impl<T: Describe> Outputs for T {
    fn output_types() -> Vec<NativeType> {
        vec![T::native_type()]
    }
}

/// A fallible function has the output of its success type.
impl<T: Describe, E> Outputs for Result<T, E> {
    fn output_types() -> Vec<NativeType> {
        vec![T::native_type()]
    }
}

macro_rules! impl_describe_scalar {
    ($ty:ty, $variant:ident) => {
        impl Describe for $ty {
            fn native_type() -> NativeType {
                NativeType::$variant
            }
        }
    };
}

impl_describe_scalar!(bool, Bool);
impl_describe_scalar!(isize, Int);
impl_describe_scalar!(i8, Int8);
impl_describe_scalar!(i16, Int16);
impl_describe_scalar!(i32, Int32);
impl_describe_scalar!(i64, Int64);
impl_describe_scalar!(usize, Uint);
impl_describe_scalar!(u8, Uint8);
impl_describe_scalar!(u16, Uint16);
impl_describe_scalar!(u32, Uint32);
impl_describe_scalar!(u64, Uint64);
impl_describe_scalar!(f32, Float32);
impl_describe_scalar!(f64, Float64);
impl_describe_scalar!(Uintptr, Uintptr);
impl_describe_scalar!(Complex<f32>, Complex64);
impl_describe_scalar!(Complex<f64>, Complex128);
impl_describe_scalar!(String, String);

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn native_type() -> NativeType {
        NativeType::Array {
            element: Box::new(T::native_type()),
            length: N,
        }
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn native_type() -> NativeType {
        NativeType::Slice(Box::new(T::native_type()))
    }
}

impl<T: Describe> Describe for Box<T> {
    fn native_type() -> NativeType {
        NativeType::Pointer(Box::new(T::native_type()))
    }
}

impl<T: Describe> Describe for Arc<T> {
    fn native_type() -> NativeType {
        NativeType::Pointer(Box::new(T::native_type()))
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn native_type() -> NativeType {
        NativeType::Map {
            key: Box::new(K::native_type()),
            value: Box::new(V::native_type()),
        }
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn native_type() -> NativeType {
        NativeType::Map {
            key: Box::new(K::native_type()),
            value: Box::new(V::native_type()),
        }
    }
}

impl<T: Describe> Describe for Sender<T> {
    fn native_type() -> NativeType {
        NativeType::Chan {
            element: Box::new(T::native_type()),
            dir: ChanDir::Send,
        }
    }
}

impl<T: Describe> Describe for Receiver<T> {
    fn native_type() -> NativeType {
        NativeType::Chan {
            element: Box::new(T::native_type()),
            dir: ChanDir::Recv,
        }
    }
}

macro_rules! impl_describe_fn {
    ($($arg:ident),*) => {
        impl<R: Outputs, $($arg: Describe),*> Describe for fn($($arg),*) -> R {
            fn native_type() -> NativeType {
                NativeType::func(vec![$($arg::native_type()),*], R::output_types())
            }
        }
    };
}

impl_describe_fn!();
impl_describe_fn!(A);
impl_describe_fn!(A, B);
impl_describe_fn!(A, B, C);
impl_describe_fn!(A, B, C, D);
impl_describe_fn!(A, B, C, D, E);
impl_describe_fn!(A, B, C, D, E, F);
