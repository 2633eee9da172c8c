// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end calls through the public API.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use typewire::impl_record;
use typewire::invoke::{
    call, decode_result, decode_result_value, CallEnvelope, CallError, FunctionRegistry,
};
use typewire::native::{describe, Describe, DynamicValue, Marshal, NativeType};
use typewire::{DescriptorHash, TypeDescriptor, WireLimits};

#[derive(Debug, Clone, PartialEq)]
struct Address {
    city: String,
    zip: u32,
}

impl_record!(Address { city: String, zip: u32 });

#[derive(Debug, Clone, PartialEq)]
struct Customer {
    name: String,
    address: Box<Address>,
    tags: Vec<String>,
    scores: [u8; 4],
}

impl_record!(Customer {
    name: String,
    address: Box<Address>,
    tags: Vec<String>,
    scores: [u8; 4],
});

fn customer(name: &str, city: &str) -> Customer {
    Customer {
        name: name.to_string(),
        address: Box::new(Address {
            city: city.to_string(),
            zip: 75001,
        }),
        tags: vec!["gold".to_string()],
        scores: [1, 2, 3, 4],
    }
}

fn by_city(customers: Vec<Customer>) -> HashMap<String, Vec<String>> {
    let mut out: HashMap<String, Vec<String>> = HashMap::new();
    for c in customers {
        out.entry(c.address.city.clone()).or_default().push(c.name);
    }
    out
}

type ByCityFn = fn(Vec<Customer>) -> HashMap<String, Vec<String>>;

#[test]
fn nested_records_round_trip() {
    let registry = FunctionRegistry::new();
    registry.register(by_city);

    let customers = vec![
        customer("Ann", "Paris"),
        customer("Bob", "Lyon"),
        customer("Cid", "Paris"),
    ];
    let request = CallEnvelope::of::<ByCityFn>()
        .unwrap()
        .arg(&customers)
        .encode()
        .unwrap();
    let response = registry.dispatch(&request).unwrap();
    let grouped: HashMap<String, Vec<String>> = decode_result(&response).unwrap();

    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped["Paris"], ["Ann", "Cid"]);
    assert_eq!(grouped["Lyon"], ["Bob"]);
}

#[test]
fn caller_with_only_descriptor_text() {
    let registry = FunctionRegistry::new();
    let registered = registry.register(by_city);

    // The caller knows the signature only through its published text form.
    let published = registered.to_json_pretty().unwrap();
    let signature = TypeDescriptor::from_json(&published)
        .unwrap()
        .to_native()
        .unwrap();

    let customers = vec![customer("Dee", "Nice")];
    let request = CallEnvelope::new(signature.clone())
        .unwrap()
        .arg_value(customers.to_value())
        .encode()
        .unwrap();
    let response = registry.dispatch(&request).unwrap();

    let result_ty = signature.outputs().unwrap()[0].clone();
    let value = decode_result_value(&response, &result_ty, WireLimits::default()).unwrap();
    let names = value
        .get_entry(&DynamicValue::from("Nice"))
        .and_then(DynamicValue::as_elements)
        .unwrap();
    assert_eq!(names, [DynamicValue::from("Dee")]);
}

#[test]
fn descriptor_identity_is_structural() {
    // Box and Arc are both pointers; BTreeMap and HashMap are both maps.
    assert_eq!(
        describe::<fn(Box<Address>) -> BTreeMap<String, u32>>(),
        describe::<fn(Arc<Address>) -> HashMap<String, u32>>()
    );
    assert_eq!(
        DescriptorHash::of(&describe::<Vec<Address>>()),
        DescriptorHash::of(&describe::<Vec<Address>>())
    );
    assert_ne!(
        DescriptorHash::of(&describe::<Vec<Address>>()),
        DescriptorHash::of(&describe::<[Address; 1]>())
    );
}

#[test]
fn pointer_and_map_flavours_dispatch_to_same_callable() {
    let registry = FunctionRegistry::new();
    registry.register(|a: Box<Address>| -> BTreeMap<String, u32> {
        [(a.city.clone(), a.zip)].into_iter().collect()
    });

    let address = Address {
        city: "Lille".to_string(),
        zip: 59000,
    };
    type ZipFn = fn(Arc<Address>) -> HashMap<String, u32>;
    let zips: HashMap<String, u32> =
        call::<HashMap<String, u32>, ZipFn>(&registry, &[address.to_value()]).unwrap();
    assert_eq!(zips.get("Lille"), Some(&59000));
}

#[test]
fn limits_are_applied_on_dispatch() {
    let limits = WireLimits::default().with_max_collection_len(2);
    let registry = FunctionRegistry::with_limits(limits);
    registry.register(|v: Vec<u8>| v.len());

    let ok = call::<usize, fn(Vec<u8>) -> usize>(&registry, &[vec![1u8, 2].to_value()]).unwrap();
    assert_eq!(ok, 2);

    let err = call::<usize, fn(Vec<u8>) -> usize>(&registry, &[vec![1u8, 2, 3].to_value()])
        .unwrap_err();
    assert!(matches!(err, CallError::ArgumentDecode { index: 0, .. }));
}

#[test]
fn channel_signatures_describe_but_do_not_encode() {
    use crossbeam::channel::Sender;

    let desc = describe::<fn(Sender<String>)>();
    let rebuilt = desc.to_native().unwrap();
    assert_eq!(rebuilt, <fn(Sender<String>) as Describe>::native_type());
    assert!(!rebuilt.inputs().unwrap()[0].has_value_form());

    let err = CallEnvelope::new(rebuilt)
        .unwrap()
        .arg_value(DynamicValue::from("x"))
        .encode()
        .unwrap_err();
    assert!(matches!(err, CallError::ArgumentEncode { index: 0, .. }));
}

#[test]
fn six_argument_function() {
    let registry = FunctionRegistry::new();
    registry.register(|a: i8, b: i16, c: i32, d: i64, e: f32, f: f64| {
        f64::from(a) + f64::from(b) + f64::from(c) + d as f64 + f64::from(e) + f
    });

    let total = call::<f64, fn(i8, i16, i32, i64, f32, f64) -> f64>(
        &registry,
        &[
            DynamicValue::Int8(1),
            DynamicValue::Int16(2),
            DynamicValue::Int32(3),
            DynamicValue::Int64(4),
            DynamicValue::Float32(0.5),
            DynamicValue::Float64(0.25),
        ],
    )
    .unwrap();
    assert!((total - 10.75).abs() < f64::EPSILON);
    assert_eq!(
        describe::<fn(i8, i16, i32, i64, f32, f64) -> f64>()
            .to_native()
            .unwrap()
            .inputs()
            .map(|i| i.len()),
        Some(6)
    );
    assert_eq!(NativeType::Float64, f64::native_type());
}
