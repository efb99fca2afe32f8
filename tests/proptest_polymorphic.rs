//! Property-based tests for discriminated model decoding
//!
//! These tests verify decoding is total over JSON objects, that unknown
//! discriminators survive a decode/encode cycle unchanged, and that known
//! discriminators are re-emitted with their canonical casing.

use azrm::polymorphic::{
    decode_polymorphic, decode_value, encode_polymorphic, ComputeProperties, Polymorphic,
    ReplicationProviderSettings,
};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Generate an arbitrary JSON value
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Generate a JSON object, sometimes carrying a discriminator
fn arb_object(field: &'static str, tags: &'static [&'static str]) -> impl Strategy<Value = Map<String, Value>> {
    let tag = prop_oneof![
        Just(None),
        prop::sample::select(tags.to_vec()).prop_map(|t| Some(Value::String(t.to_string()))),
        "[A-Za-z]{0,12}".prop_map(|t| Some(Value::String(t))),
        arb_json().prop_map(Some),
    ];
    (prop::collection::btree_map("[a-zA-Z]{1,12}", arb_json(), 0..6), tag).prop_map(move |(fields, tag)| {
        let mut object: Map<String, Value> = fields.into_iter().collect();
        if let Some(tag) = tag {
            object.insert(field.to_string(), tag);
        }
        object
    })
}

const REPLICATION_TAGS: &[&str] = &["A2A", "a2a", "HyperVReplicaAzure", "INMAGERCM", "InMageRcm", "VMwareCbt"];
const COMPUTE_TAGS: &[&str] = &["AKS", "aks", "AmlCompute", "virtualmachine", "Databricks"];

fn is_known<T: Polymorphic>(tag: &str) -> bool {
    T::variants().iter().any(|v| v.tag.eq_ignore_ascii_case(tag))
}

proptest! {
    /// Every JSON object decodes, whatever its discriminator
    #[test]
    fn test_decoding_is_total(object in arb_object("instanceType", REPLICATION_TAGS)) {
        let bytes = serde_json::to_vec(&object).unwrap();
        prop_assert!(decode_polymorphic::<ReplicationProviderSettings>(&bytes, "instanceType").is_ok());
        prop_assert!(decode_value::<ComputeProperties>(Value::Object(object), "computeType").is_ok());
    }

    /// Unrecognised discriminators re-encode to the original object
    #[test]
    fn test_unknown_fallback_is_lossless(object in arb_object("instanceType", REPLICATION_TAGS)) {
        let tag = object.get("instanceType").and_then(Value::as_str).unwrap_or("");
        prop_assume!(!is_known::<ReplicationProviderSettings>(tag));

        let decoded: ReplicationProviderSettings =
            decode_value(Value::Object(object.clone()), "instanceType").unwrap();
        let is_unknown = matches!(decoded, ReplicationProviderSettings::Unknown { .. });
        prop_assert!(is_unknown);

        let encoded: Value = serde_json::from_slice(&encode_polymorphic(&decoded).unwrap()).unwrap();
        prop_assert_eq!(encoded, Value::Object(object));
    }

    /// The fallback re-encodes verbatim whichever field carried the discriminator
    #[test]
    fn test_fallback_is_lossless_for_any_field(
        field in "[a-zA-Z]{1,12}",
        tag in prop::option::of("[A-Za-z]{0,12}"),
        fields in prop::collection::btree_map("[a-zA-Z]{1,12}", arb_json(), 0..6),
    ) {
        prop_assume!(!tag.as_deref().is_some_and(is_known::<ReplicationProviderSettings>));

        let mut object: Map<String, Value> = fields.into_iter().collect();
        match tag {
            Some(tag) => {
                object.insert(field.clone(), Value::String(tag));
            },
            None => {
                object.remove(&field);
            },
        }

        let bytes = serde_json::to_vec(&object).unwrap();
        let decoded: ReplicationProviderSettings = decode_polymorphic(&bytes, &field).unwrap();
        let encoded: Value = serde_json::from_slice(&encode_polymorphic(&decoded).unwrap()).unwrap();
        prop_assert_eq!(encoded, Value::Object(object));
    }

    /// Any decoded value that fell back re-encodes verbatim; typed ones carry the canonical tag
    #[test]
    fn test_tags_self_heal(object in arb_object("computeType", COMPUTE_TAGS)) {
        let decoded: ComputeProperties = decode_value(Value::Object(object.clone()), "computeType").unwrap();
        let encoded: Value = serde_json::to_value(&decoded).unwrap();

        match decoded {
            ComputeProperties::Unknown { .. } => prop_assert_eq!(encoded, Value::Object(object)),
            ComputeProperties::Aks(_) => prop_assert_eq!(&encoded["computeType"], "AKS"),
            ComputeProperties::AmlCompute(_) => prop_assert_eq!(&encoded["computeType"], "AmlCompute"),
            ComputeProperties::VirtualMachine(_) => prop_assert_eq!(&encoded["computeType"], "VirtualMachine"),
        }
    }

    /// Re-decoding an encoded value is a fixed point
    #[test]
    fn test_decode_encode_is_stable(object in arb_object("instanceType", REPLICATION_TAGS)) {
        let first: ReplicationProviderSettings = decode_value(Value::Object(object), "instanceType").unwrap();
        let bytes = encode_polymorphic(&first).unwrap();
        let second: ReplicationProviderSettings = decode_polymorphic(&bytes, "instanceType").unwrap();
        prop_assert_eq!(second, first);
    }
}
