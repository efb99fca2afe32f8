//! Discriminated polymorphic models
//!
//! Several ARM payloads pick their concrete shape from a string field, e.g.
//! `instanceType` on Site Recovery provider details. Each such family is a
//! closed Rust enum with one arm per known shape plus an `Unknown` arm that
//! keeps the original fields, so decoding never fails because the service
//! introduced a new discriminator value.
//!
//! - [`replication`] - Site Recovery provider specific settings (`instanceType`)
//! - [`compute`] - Machine Learning compute properties (`computeType`)

pub mod compute;
pub mod replication;

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

pub use compute::ComputeProperties;
pub use replication::ReplicationProviderSettings;

/// Failures decoding or encoding a polymorphic payload.
///
/// An unrecognised discriminator is never an error.
#[derive(Debug, Error)]
pub enum PolymorphicError {
    #[error("malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),
}

/// One known shape of a polymorphic family
pub struct Variant<T: 'static> {
    /// Canonical discriminator value
    pub tag: &'static str,
    pub decode: fn(Value) -> Result<T, serde_json::Error>,
}

/// A closed family of shapes selected by a discriminator field
pub trait Polymorphic: Sized + 'static {
    /// Field carrying the discriminator on the wire
    const DISCRIMINATOR: &'static str;

    /// Known shapes
    fn variants() -> &'static [Variant<Self>];

    /// Fallback for an unrecognised discriminator read from `field`
    fn unknown(field: String, tag: String, fields: Map<String, Value>) -> Self;
}

/// Resolve `fields` into a member of `T`, reading the discriminator from
/// `field`.
///
/// A missing or non-string discriminator reads as `""`. Tags match the known
/// variants case-insensitively; anything unmatched, or a known tag whose
/// payload does not fit the typed shape, becomes `T::unknown`.
pub fn resolve<T: Polymorphic>(fields: Map<String, Value>, field: &str) -> T {
    let tag = match fields.get(field) {
        Some(Value::String(tag)) => tag.clone(),
        _ => String::new(),
    };

    let Some(variant) = T::variants()
        .iter()
        .find(|variant| variant.tag.eq_ignore_ascii_case(&tag))
    else {
        tracing::debug!("unrecognised {} {:?}, keeping raw fields", field, tag);
        return T::unknown(field.to_string(), tag, fields);
    };

    match (variant.decode)(Value::Object(fields.clone())) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!(
                "{} {:?} did not match its typed shape, keeping raw fields: {}",
                field,
                variant.tag,
                e
            );
            T::unknown(field.to_string(), tag, fields)
        },
    }
}

/// Decode an already parsed JSON value
pub fn decode_value<T: Polymorphic>(value: Value, field: &str) -> Result<T, PolymorphicError> {
    match value {
        Value::Object(fields) => Ok(resolve(fields, field)),
        other => Err(PolymorphicError::NotAnObject {
            found: json_kind(&other),
        }),
    }
}

/// Decode raw bytes, discriminating on `field`
pub fn decode_polymorphic<T: Polymorphic>(bytes: &[u8], field: &str) -> Result<T, PolymorphicError> {
    let value: Value = serde_json::from_slice(bytes).map_err(PolymorphicError::MalformedJson)?;
    decode_value(value, field)
}

/// Encode a value; known variants always carry their canonical tag
pub fn encode_polymorphic<T: Serialize>(value: &T) -> Result<Vec<u8>, PolymorphicError> {
    serde_json::to_vec(value).map_err(PolymorphicError::Encode)
}

/// `Deserialize` body shared by every family, using `T::DISCRIMINATOR`
pub fn deserialize_polymorphic<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Polymorphic,
{
    let fields = Map::<String, Value>::deserialize(deserializer)?;
    Ok(resolve(fields, T::DISCRIMINATOR))
}

/// Serialize the fields of an `Unknown` arm.
///
/// The map is written verbatim; a non-empty `tag` overrides whatever the
/// map holds under `field`, which is the field the value was decoded on.
pub fn serialize_unknown<S: Serializer>(
    serializer: S,
    field: &str,
    tag: &str,
    fields: &Map<String, Value>,
) -> Result<S::Ok, S::Error> {
    let inject = !tag.is_empty() && !fields.contains_key(field);
    let len = fields.len() + usize::from(inject);

    let mut map = serializer.serialize_map(Some(len))?;
    if inject {
        map.serialize_entry(field, tag)?;
    }
    for (key, value) in fields {
        if key == field && !tag.is_empty() {
            map.serialize_entry(key, tag)?;
        } else {
            map.serialize_entry(key, value)?;
        }
    }
    map.end()
}

/// Build a [`Variant`] decoder from a typed payload and its wrapping arm
pub fn decode_as<P, T>(value: Value, wrap: fn(P) -> T) -> Result<T, serde_json::Error>
where
    P: DeserializeOwned,
{
    serde_json::from_value(value).map(wrap)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_rejects_non_objects() {
        let err = decode_polymorphic::<ReplicationProviderSettings>(b"[1, 2]", "instanceType")
            .unwrap_err();
        assert!(matches!(err, PolymorphicError::NotAnObject { found: "an array" }));

        let err = decode_polymorphic::<ReplicationProviderSettings>(b"{\"instanceType\":", "instanceType")
            .unwrap_err();
        assert!(matches!(err, PolymorphicError::MalformedJson(_)));
    }

    #[test]
    fn test_missing_or_non_string_tag_is_empty() {
        let decoded: ReplicationProviderSettings =
            decode_value(json!({"instanceType": 7, "a": 1}), "instanceType").unwrap();
        match decoded {
            ReplicationProviderSettings::Unknown { field, tag, fields } => {
                assert_eq!(field, "instanceType");
                assert_eq!(tag, "");
                assert_eq!(fields.get("instanceType"), Some(&json!(7)));
            },
            other => panic!("expected Unknown, got {:?}", other),
        }

        let decoded: ReplicationProviderSettings = decode_value(json!({}), "instanceType").unwrap();
        assert!(matches!(decoded, ReplicationProviderSettings::Unknown { ref tag, .. } if tag.is_empty()));
    }

    #[test]
    fn test_discriminator_field_is_a_parameter() {
        let value = json!({"kind": "A2A", "instanceType": "InMageRcm"});
        let decoded: ReplicationProviderSettings = decode_value(value, "kind").unwrap();
        assert!(matches!(decoded, ReplicationProviderSettings::A2a(_)));
    }

    #[test]
    fn test_unknown_keeps_its_discriminator_field() {
        let decoded: ReplicationProviderSettings =
            decode_polymorphic(br#"{"kind":"Future","x":1}"#, "kind").unwrap();
        assert!(matches!(
            decoded,
            ReplicationProviderSettings::Unknown { ref field, ref tag, .. } if field == "kind" && tag == "Future"
        ));

        let encoded: Value = serde_json::from_slice(&encode_polymorphic(&decoded).unwrap()).unwrap();
        assert_eq!(encoded, json!({"kind": "Future", "x": 1}));
    }

    #[test]
    fn test_serialize_unknown_overrides_stale_tag() {
        let mut fields = Map::new();
        fields.insert("instanceType".to_string(), json!("Stale"));
        fields.insert("x".to_string(), json!(1));

        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::new(&mut out);
        serialize_unknown(&mut serializer, "instanceType", "Fresh", &fields).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, json!({"instanceType": "Fresh", "x": 1}));

        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::new(&mut out);
        serialize_unknown(&mut serializer, "instanceType", "", &fields).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, json!({"instanceType": "Stale", "x": 1}));
    }
}
