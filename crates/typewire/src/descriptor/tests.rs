// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonical key determinism and collision tests.

use super::*;
use std::collections::HashSet;

fn person(age_kind: Kind) -> TypeDescriptor {
    DescriptorBuilder::new(Kind::Struct)
        .meta(FIELDS_NUMBER, 2usize)
        .meta(field_key(0), "name")
        .meta(field_key(1), "age")
        .component("name", TypeDescriptor::scalar(Kind::String))
        .component("age", TypeDescriptor::scalar(age_kind))
        .build()
}

#[test]
fn test_key_independent_of_insertion_order() {
    let forward = person(Kind::Int);
    let backward = DescriptorBuilder::new(Kind::Struct)
        .component("age", TypeDescriptor::scalar(Kind::Int))
        .component("name", TypeDescriptor::scalar(Kind::String))
        .meta(field_key(1), "age")
        .meta(field_key(0), "name")
        .meta(FIELDS_NUMBER, 2usize)
        .build();
    assert_eq!(forward, backward);
    assert_eq!(forward.canonical_key(), backward.canonical_key());
    assert_eq!(DescriptorHash::of(&forward), DescriptorHash::of(&backward));
}

#[test]
fn test_key_is_stable_across_calls() {
    let desc = person(Kind::Int64);
    let first = desc.canonical_key();
    for _ in 0..16 {
        assert_eq!(desc.clone().canonical_key(), first);
    }
}

#[test]
fn test_distinct_descriptors_distinct_keys() {
    let int_slice = DescriptorBuilder::new(Kind::Slice)
        .component(ELEMENT_TYPE, TypeDescriptor::scalar(Kind::Int))
        .build();
    let array = |len: usize| {
        DescriptorBuilder::new(Kind::Array)
            .component(ELEMENT_TYPE, TypeDescriptor::scalar(Kind::Int))
            .meta(ARRAY_LENGTH, len)
            .build()
    };
    let func = |inputs: &[Kind], outputs: &[Kind]| {
        let mut builder = DescriptorBuilder::new(Kind::Func)
            .meta(IN_NUMBER, inputs.len())
            .meta(OUT_NUMBER, outputs.len())
            .meta(VARIADIC, false);
        for (i, k) in inputs.iter().enumerate() {
            builder = builder.component(in_key(i), TypeDescriptor::scalar(*k));
        }
        for (i, k) in outputs.iter().enumerate() {
            builder = builder.component(out_key(i), TypeDescriptor::scalar(*k));
        }
        builder.build()
    };

    let all = vec![
        TypeDescriptor::scalar(Kind::Int),
        TypeDescriptor::scalar(Kind::Int64),
        TypeDescriptor::scalar(Kind::Uint),
        int_slice,
        array(15),
        array(16),
        person(Kind::Int),
        person(Kind::Int64),
        func(&[Kind::Int, Kind::Int], &[Kind::Int]),
        func(&[Kind::Int, Kind::Int], &[]),
        func(&[Kind::Int, Kind::String], &[Kind::Int]),
        func(&[Kind::String, Kind::Int], &[Kind::Int]),
        func(&[], &[]),
    ];

    let keys: HashSet<_> = all.iter().map(TypeDescriptor::canonical_key).collect();
    assert_eq!(keys.len(), all.len());

    let hashes: HashSet<_> = all.iter().map(DescriptorHash::of).collect();
    assert_eq!(hashes.len(), all.len());
}

#[test]
fn test_field_order_is_part_of_identity() {
    let swapped = DescriptorBuilder::new(Kind::Struct)
        .meta(FIELDS_NUMBER, 2usize)
        .meta(field_key(0), "age")
        .meta(field_key(1), "name")
        .component("name", TypeDescriptor::scalar(Kind::String))
        .component("age", TypeDescriptor::scalar(Kind::Int))
        .build();
    assert_ne!(swapped.canonical_key(), person(Kind::Int).canonical_key());
}

#[test]
fn test_text_round_trip_preserves_key() {
    let desc = person(Kind::Uint16);
    let reparsed = TypeDescriptor::from_json(&desc.canonical_key()).expect("parse");
    assert_eq!(reparsed.canonical_key(), desc.canonical_key());

    let pretty = desc.to_json_pretty().expect("pretty");
    assert!(pretty.contains('\n'));
    let reparsed = TypeDescriptor::from_json(&pretty).expect("parse");
    assert_eq!(reparsed.canonical_key(), desc.canonical_key());
}

#[test]
fn test_position_keys() {
    assert_eq!(in_key(0), "in_0");
    assert_eq!(out_key(3), "out_3");
    assert_eq!(field_key(12), "field_12");
}
