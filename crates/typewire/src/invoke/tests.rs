// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registry, envelope and dispatch tests.

use super::*;
use crate::config::WIRE_VERSION;
use crate::descriptor::{DescriptorBuilder, DescriptorError, Kind, TypeDescriptor};
use crate::native::{describe, DynamicValue, Marshal, NativeType, ValueError};
use crate::wire::{WireEncoder, WireError};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: String,
    age: isize,
}

crate::impl_record!(Person { name: String, age: isize });

fn person(name: &str, age: isize) -> Person {
    Person {
        name: name.to_string(),
        age,
    }
}

fn count_ages(people: Vec<Person>) -> BTreeMap<isize, isize> {
    let mut counts = BTreeMap::new();
    for p in people {
        *counts.entry(p.age).or_insert(0) += 1;
    }
    counts
}

type SumFn = fn(isize, isize) -> isize;

/// Envelope bytes written by hand, without any client-side checks.
fn raw_envelope(signature: &TypeDescriptor, count: u64, args: &[DynamicValue]) -> Vec<u8> {
    let mut encoder = WireEncoder::new();
    encoder.put_u8(WIRE_VERSION);
    encoder.put_descriptor(signature).unwrap();
    encoder.put_value(&DynamicValue::Uint(count)).unwrap();
    for arg in args {
        encoder.put_value(arg).unwrap();
    }
    encoder.into_bytes()
}

#[test]
fn test_sum_round_trip() {
    let registry = FunctionRegistry::new();
    registry.register(|a: isize, b: isize| a + b);

    let sum: isize =
        call::<isize, SumFn>(&registry, &[DynamicValue::Int(1), DynamicValue::Int(2)]).unwrap();
    assert_eq!(sum, 3);
}

#[test]
fn test_record_sequence_call() {
    let registry = FunctionRegistry::new();
    registry.register(count_ages);

    let people = vec![
        person("Bob", 20),
        person("Alice", 20),
        person("Carol", 22),
        person("Dave", 22),
        person("Erin", 20),
        person("Frank", 20),
    ];
    let request = CallEnvelope::of::<fn(Vec<Person>) -> BTreeMap<isize, isize>>()
        .unwrap()
        .arg(&people)
        .encode()
        .unwrap();
    let response = registry.dispatch(&request).unwrap();
    let counts: BTreeMap<isize, isize> = decode_result(&response).unwrap();

    let expected: BTreeMap<isize, isize> = [(20, 4), (22, 2)].into_iter().collect();
    assert_eq!(counts, expected);
}

#[test]
fn test_dispatch_miss() {
    let registry = FunctionRegistry::new();
    registry.register(|a: isize, b: isize| a + b);

    // Same parameters, different result type: a different signature.
    let err = call::<i64, fn(isize, isize) -> i64>(
        &registry,
        &[DynamicValue::Int(1), DynamicValue::Int(2)],
    )
    .unwrap_err();
    match err {
        CallError::NotRegistered(key) => {
            assert_eq!(key, describe::<fn(isize, isize) -> i64>().canonical_key())
        }
        other => panic!("expected NotRegistered, got {}", other),
    }
}

#[test]
fn test_argument_shape_mismatch() {
    let registry = FunctionRegistry::new();
    registry.register(|x: isize| x * 2);

    let request = raw_envelope(
        &describe::<fn(isize) -> isize>(),
        1,
        &[DynamicValue::from("text")],
    );
    let err = registry.dispatch(&request).unwrap_err();
    assert!(matches!(
        err,
        CallError::ArgumentDecode {
            index: 0,
            source: WireError::TypeMismatch {
                expected: Kind::Int,
                found: Kind::String
            }
        }
    ));
}

#[test]
fn test_duplicate_map_keys_fail_dispatch() {
    let registry = FunctionRegistry::new();
    registry.register(|m: BTreeMap<isize, isize>| m.len());

    let repeated = DynamicValue::Map(vec![
        (DynamicValue::Int(1), DynamicValue::Int(10)),
        (DynamicValue::Int(1), DynamicValue::Int(20)),
    ]);
    let request = raw_envelope(
        &describe::<fn(BTreeMap<isize, isize>) -> usize>(),
        1,
        &[repeated],
    );
    let err = registry.dispatch(&request).unwrap_err();
    assert!(matches!(
        err,
        CallError::ArgumentValue {
            index: 0,
            source: ValueError::DuplicateKey { index: 1 }
        }
    ));
}

#[test]
fn test_arity_mismatch_on_dispatch() {
    let registry = FunctionRegistry::new();
    registry.register(|x: isize| x * 2);

    let request = raw_envelope(
        &describe::<fn(isize) -> isize>(),
        2,
        &[DynamicValue::Int(1), DynamicValue::Int(2)],
    );
    assert!(matches!(
        registry.dispatch(&request),
        Err(CallError::ArityMismatch {
            expected: 1,
            found: 2
        })
    ));
}

#[test]
fn test_malformed_envelopes() {
    let registry = FunctionRegistry::new();
    registry.register(|x: isize| x * 2);
    let signature = describe::<fn(isize) -> isize>();

    let mut trailing = raw_envelope(&signature, 1, &[DynamicValue::Int(1)]);
    trailing.push(0);
    assert!(matches!(
        registry.dispatch(&trailing),
        Err(CallError::Envelope(WireError::TrailingBytes(1)))
    ));

    let mut wrong_version = raw_envelope(&signature, 1, &[DynamicValue::Int(1)]);
    wrong_version[0] = 0x7F;
    assert!(matches!(
        registry.dispatch(&wrong_version),
        Err(CallError::Envelope(WireError::UnsupportedVersion(0x7F)))
    ));

    assert!(matches!(
        registry.dispatch(&[]),
        Err(CallError::Envelope(WireError::UnexpectedEof { .. }))
    ));
    assert!(matches!(
        registry.dispatch(&[WIRE_VERSION, Kind::Int.code()]),
        Err(CallError::Envelope(WireError::InvalidData(_)))
    ));
}

#[test]
fn test_callee_error_propagates() {
    let registry = FunctionRegistry::new();
    registry.register(|x: isize| -> Result<isize, String> {
        if x < 0 {
            Err(format!("negative input {}", x))
        } else {
            Ok(x)
        }
    });

    let ok: isize = call::<isize, fn(isize) -> isize>(&registry, &[DynamicValue::Int(4)]).unwrap();
    assert_eq!(ok, 4);

    let err = call::<isize, fn(isize) -> isize>(&registry, &[DynamicValue::Int(-1)]).unwrap_err();
    assert!(matches!(err, CallError::Callee(ref msg) if msg == "negative input -1"));
}

#[test]
#[should_panic(expected = "kaboom")]
fn test_callee_panic_propagates() {
    let registry = FunctionRegistry::new();
    registry.register(|_x: isize| -> isize { panic!("kaboom") });
    let _ = call::<isize, fn(isize) -> isize>(&registry, &[DynamicValue::Int(0)]);
}

#[test]
fn test_only_first_output_returned() {
    let signature = NativeType::func(
        vec![NativeType::Int],
        vec![NativeType::String, NativeType::Int],
    );
    let callable = DynamicCallable::new(signature.clone(), |args| {
        let n = args[0].as_i64().unwrap_or_default();
        Ok(vec![DynamicValue::from(format!("n={}", n)), DynamicValue::Int(n)])
    })
    .unwrap();

    let registry = FunctionRegistry::new();
    registry.register(callable);

    let request = CallEnvelope::new(signature)
        .unwrap()
        .arg(&7isize)
        .encode()
        .unwrap();
    let response = registry.dispatch(&request).unwrap();
    let first: String = decode_result(&response).unwrap();
    assert_eq!(first, "n=7");
}

#[test]
fn test_no_output_is_a_failure() {
    let registry = FunctionRegistry::new();
    registry.register(|_x: isize| {});

    let request = encode_call::<fn(isize)>(&[DynamicValue::Int(1)]).unwrap();
    assert!(matches!(
        registry.dispatch(&request),
        Err(CallError::NoResult)
    ));
}

#[test]
fn test_variadic_signature() {
    let signature = NativeType::Func {
        inputs: vec![
            NativeType::String,
            NativeType::Slice(Box::new(NativeType::Int)),
        ],
        outputs: vec![NativeType::Int],
        variadic: true,
    };
    let callable = DynamicCallable::new(signature.clone(), |args| {
        let total: i64 = args[1]
            .as_elements()
            .unwrap_or_default()
            .iter()
            .filter_map(DynamicValue::as_i64)
            .sum();
        Ok(vec![DynamicValue::Int(total)])
    })
    .unwrap();

    let registry = FunctionRegistry::new();
    let descriptor = registry.register(callable);
    assert_eq!(
        descriptor.meta("variadic").and_then(|v| v.as_bool()),
        Some(true)
    );

    let request = CallEnvelope::new(signature)
        .unwrap()
        .arg(&"sum".to_string())
        .arg(&vec![1isize, 2, 3])
        .encode()
        .unwrap();
    let total: isize = decode_result(&registry.dispatch(&request).unwrap()).unwrap();
    assert_eq!(total, 6);

    // The non-variadic twin is a different key.
    assert!(registry
        .lookup(&describe::<fn(String, Vec<isize>) -> isize>())
        .is_none());
}

#[test]
fn test_replacement_keeps_one_entry() {
    let registry = FunctionRegistry::new();
    registry.register(|a: isize, b: isize| a + b);
    registry.register(|a: isize, b: isize| a * b);
    assert_eq!(registry.len(), 1);

    let product: isize =
        call::<isize, SumFn>(&registry, &[DynamicValue::Int(3), DynamicValue::Int(4)]).unwrap();
    assert_eq!(product, 12);
}

#[test]
fn test_registry_bookkeeping() {
    let registry = FunctionRegistry::default();
    assert!(registry.is_empty());

    let sum = registry.register(|a: isize, b: isize| a + b);
    let echo = registry.register(|s: String| s);
    assert_eq!(registry.len(), 2);
    assert!(registry.contains(&sum));
    assert!(registry.lookup(&echo).is_some());

    let keys = registry.keys();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(keys.contains(&sum.canonical_key()));

    assert!(registry.unregister(&sum));
    assert!(!registry.unregister(&sum));
    assert!(!registry.contains(&sum));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_typed_callable_argument_conversion() {
    let callable = IntoCallable::<(i32,)>::into_callable(|x: i32| x + 1);
    assert_eq!(
        callable.signature(),
        &NativeType::func(vec![NativeType::Int32], vec![NativeType::Int32])
    );
    assert_eq!(
        callable.invoke(vec![DynamicValue::Int32(1)]).unwrap(),
        vec![DynamicValue::Int32(2)]
    );
    assert!(matches!(
        callable.invoke(vec![DynamicValue::Int64(1)]),
        Err(CallError::ArgumentValue { index: 0, .. })
    ));
    assert!(matches!(
        callable.invoke(vec![]),
        Err(CallError::ArityMismatch {
            expected: 1,
            found: 0
        })
    ));
}

#[test]
fn test_envelope_client_checks() {
    let err = CallEnvelope::new(NativeType::Int).unwrap_err();
    assert!(matches!(err, CallError::NotAFunction(Kind::Int)));

    let err = encode_call::<SumFn>(&[DynamicValue::Int(1)]).unwrap_err();
    assert!(matches!(
        err,
        CallError::ArityMismatch {
            expected: 2,
            found: 1
        }
    ));

    let err = encode_call::<SumFn>(&[DynamicValue::Int(1), DynamicValue::from("two")]).unwrap_err();
    assert!(matches!(err, CallError::ArgumentEncode { index: 1, .. }));
}

#[test]
fn test_result_decode_errors() {
    let registry = FunctionRegistry::new();
    registry.register(|s: String| s.len());
    let request = encode_call::<fn(String) -> usize>(&["abc".to_string().to_value()]).unwrap();
    let response = registry.dispatch(&request).unwrap();

    assert_eq!(decode_result::<usize>(&response).unwrap(), 3);
    assert!(matches!(
        decode_result::<String>(&response),
        Err(CallError::ResultDecode(WireError::TypeMismatch { .. }))
    ));
    assert!(matches!(
        decode_result::<usize>(&response[..3]),
        Err(CallError::ResultDecode(WireError::UnexpectedEof { .. }))
    ));
}

#[test]
fn test_dynamic_callable_from_descriptor() {
    let interface_param = DescriptorBuilder::new(Kind::Func)
        .meta("in_number", 1usize)
        .meta("out_number", 0usize)
        .component("in_0", TypeDescriptor::scalar(Kind::Interface))
        .build();
    let err = DynamicCallable::from_descriptor(&interface_param, |_| Ok(vec![])).unwrap_err();
    assert!(matches!(
        err,
        CallError::Descriptor(DescriptorError::UnsupportedKind(Kind::Interface))
    ));

    let ok = DynamicCallable::from_descriptor(&describe::<SumFn>(), |args| {
        Ok(vec![DynamicValue::Int(args.len() as i64)])
    })
    .unwrap();
    assert_eq!(ok.signature(), &<SumFn as crate::native::Describe>::native_type());
}

#[test]
fn test_concurrent_register_and_dispatch() {
    let registry = Arc::new(FunctionRegistry::new());
    registry.register(|a: isize, b: isize| a + b);

    std::thread::scope(|scope| {
        for t in 0..8isize {
            let registry = Arc::clone(&registry);
            scope.spawn(move || {
                for i in 0..200isize {
                    if i % 50 == 0 {
                        registry.register(|s: String| s);
                    }
                    let sum: isize = call::<isize, SumFn>(
                        &registry,
                        &[DynamicValue::Int(t as i64), DynamicValue::Int(i as i64)],
                    )
                    .unwrap();
                    assert_eq!(sum, t + i);
                }
            });
        }
    });

    assert_eq!(registry.len(), 2);
}
