// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Callables: functions invocable with dynamic values.

use crate::descriptor::TypeDescriptor;
use crate::invoke::{CallError, CallResult};
use crate::native::{Describe, DynamicValue, Marshal, NativeType, Outputs};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A function with a known signature, invocable with dynamic values.
pub trait Callable: Send + Sync {
    /// Function signature (always [`NativeType::Func`]).
    fn signature(&self) -> &NativeType;

    /// Invoke with one value per parameter; returns one value per result.
    fn invoke(&self, args: Vec<DynamicValue>) -> CallResult<Vec<DynamicValue>>;
}

/// Conversion of a Rust return value into dynamic outputs.
///
/// `()` yields no output, any [`Marshal`] type one, and `Result<T, E>` the
/// output of `T` or a [`CallError::Callee`].
pub trait ReturnValue: Outputs {
    fn into_outputs(self) -> CallResult<Vec<DynamicValue>>;
}

impl ReturnValue for () {
    fn into_outputs(self) -> CallResult<Vec<DynamicValue>> {
        Ok(Vec::new())
    }
}

impl<T: Marshal> ReturnValue for T {
    fn into_outputs(self) -> CallResult<Vec<DynamicValue>> {
        Ok(vec![self.to_value()])
    }
}

impl<T: Marshal, E: fmt::Display> ReturnValue for Result<T, E> {
    fn into_outputs(self) -> CallResult<Vec<DynamicValue>> {
        match self {
            Ok(value) => Ok(vec![value.to_value()]),
            Err(e) => Err(CallError::callee(e)),
        }
    }
}

/// Conversion of a Rust closure or `fn` into a shared [`Callable`].
///
/// `Args` is the parameter tuple; it only exists to tell the arities apart.
pub trait IntoCallable<Args>: Send + Sync + 'static {
    fn into_callable(self) -> Arc<dyn Callable>;
}

/// Argument marker of [`DynamicCallable`]'s [`IntoCallable`] impl.
#[doc(hidden)]
pub struct DynamicArgs;

/// Typed Rust function adapted to the [`Callable`] interface.
struct FnCallable<Func, Args> {
    func: Func,
    signature: NativeType,
    _args: PhantomData<fn() -> Args>,
}

fn arity(signature: &NativeType) -> usize {
    signature.inputs().map_or(0, |inputs| inputs.len())
}

macro_rules! impl_fn_callable {
    ($($arg:ident $val:ident),*) => {
        impl<Func, R, $($arg),*> IntoCallable<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> R + Send + Sync + 'static,
            R: ReturnValue + 'static,
            $($arg: Marshal + 'static,)*
        {
            fn into_callable(self) -> Arc<dyn Callable> {
                Arc::new(FnCallable::<Func, ($($arg,)*)> {
                    func: self,
                    signature: NativeType::func(
                        vec![$(<$arg as Describe>::native_type()),*],
                        R::output_types(),
                    ),
                    _args: PhantomData,
                })
            }
        }

        impl<Func, R, $($arg),*> Callable for FnCallable<Func, ($($arg,)*)>
        where
            Func: Fn($($arg),*) -> R + Send + Sync,
            R: ReturnValue,
            $($arg: Marshal,)*
        {
            fn signature(&self) -> &NativeType {
                &self.signature
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn invoke(&self, args: Vec<DynamicValue>) -> CallResult<Vec<DynamicValue>> {
                let expected = arity(&self.signature);
                if args.len() != expected {
                    return Err(CallError::ArityMismatch {
                        expected,
                        found: args.len(),
                    });
                }
                let found = args.len();
                let mut args = args.into_iter();
                let mut index = 0usize;
                $(
                    let value = args
                        .next()
                        .ok_or(CallError::ArityMismatch { expected, found })?;
                    let $val = <$arg as Marshal>::from_value(value)
                        .map_err(|source| CallError::ArgumentValue { index, source })?;
                    index += 1;
                )*
                (self.func)($($val),*).into_outputs()
            }
        }
    };
}

impl_fn_callable!();
impl_fn_callable!(A a);
impl_fn_callable!(A a, B b);
impl_fn_callable!(A a, B b, C c);
impl_fn_callable!(A a, B b, C c, D d);
impl_fn_callable!(A a, B b, C c, D d, E e);
impl_fn_callable!(A a, B b, C c, D d, E e, F f);

type DynamicFn = dyn Fn(Vec<DynamicValue>) -> CallResult<Vec<DynamicValue>> + Send + Sync;

/// Callable built from an explicit signature and a closure over dynamic
/// values.
///
/// Unlike typed closures it may declare several results or a variadic
/// last parameter. Arguments are checked against the arity before the
/// closure runs; their shapes are already guaranteed by the wire decoder.
pub struct DynamicCallable {
    signature: NativeType,
    func: Box<DynamicFn>,
}

impl DynamicCallable {
    /// Create from a function signature.
    pub fn new<F>(signature: NativeType, func: F) -> CallResult<Self>
    where
        F: Fn(Vec<DynamicValue>) -> CallResult<Vec<DynamicValue>> + Send + Sync + 'static,
    {
        if !matches!(signature, NativeType::Func { .. }) {
            return Err(CallError::NotAFunction(signature.kind()));
        }
        Ok(Self {
            signature,
            func: Box::new(func),
        })
    }

    /// Create from a function descriptor.
    pub fn from_descriptor<F>(desc: &TypeDescriptor, func: F) -> CallResult<Self>
    where
        F: Fn(Vec<DynamicValue>) -> CallResult<Vec<DynamicValue>> + Send + Sync + 'static,
    {
        Self::new(desc.to_native()?, func)
    }
}

impl Callable for DynamicCallable {
    fn signature(&self) -> &NativeType {
        &self.signature
    }

    fn invoke(&self, args: Vec<DynamicValue>) -> CallResult<Vec<DynamicValue>> {
        let expected = arity(&self.signature);
        if args.len() != expected {
            return Err(CallError::ArityMismatch {
                expected,
                found: args.len(),
            });
        }
        (self.func)(args)
    }
}

impl IntoCallable<DynamicArgs> for DynamicCallable {
    fn into_callable(self) -> Arc<dyn Callable> {
        Arc::new(self)
    }
}

impl fmt::Debug for DynamicCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicCallable")
            .field("signature", &format_args!("{}", self.signature))
            .finish_non_exhaustive()
    }
}
