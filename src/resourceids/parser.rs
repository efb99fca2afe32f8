//! Resource ID parser and formatter

use super::error::IdError;
use super::schema::IdentifierSchema;
use super::segment::Segment;
use std::collections::BTreeMap;
use std::fmt;

/// Field values of a resource ID, keyed by segment key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIdentifier {
    schema: &'static IdentifierSchema,
    fields: BTreeMap<&'static str, String>,
}

impl ParsedIdentifier {
    /// Build a parsed identifier from field values.
    ///
    /// Enforces the same invariants as [`parse`]: every value segment has a
    /// non-empty value without `/`, constants are members of their set, and
    /// no unknown keys are present.
    pub fn new<I, K, V>(schema: &'static IdentifierSchema, values: I) -> Result<Self, IdError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut supplied: BTreeMap<String, String> = values
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.into()))
            .collect();

        let mut fields = BTreeMap::new();
        for (position, segment) in schema.segments().iter().enumerate() {
            if !segment.carries_value() {
                continue;
            }
            let key = segment.key();
            let Some(value) = supplied.remove(key) else {
                return Err(not_specified(schema, position, segment, schema.resource_type()));
            };
            let value = validate_value(segment, value, schema.resource_type(), false)?;
            fields.insert(key, value);
        }

        if let Some(unknown) = supplied.keys().next() {
            return Err(IdError::MalformedInput {
                input: schema.resource_type().to_string(),
                reason: format!("unknown segment key {:?}", unknown),
            });
        }

        Ok(Self { schema, fields })
    }

    pub fn schema(&self) -> &'static IdentifierSchema {
        self.schema
    }

    /// Value for a segment key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value for a segment key, as an error if the schema has no such field
    pub fn require(&self, key: &'static str) -> Result<&str, IdError> {
        self.get(key).ok_or_else(|| {
            let position = self
                .schema
                .segments()
                .iter()
                .position(|segment| segment.key() == key)
                .unwrap_or(self.schema.segments().len());
            IdError::SegmentNotSpecified {
                key,
                position,
                expected: format!("a value for {:?}", key),
                input: self.format(),
            }
        })
    }

    pub fn fields(&self) -> &BTreeMap<&'static str, String> {
        &self.fields
    }

    /// Canonical path, with literal segments in schema casing
    pub fn format(&self) -> String {
        self.schema
            .format_with(|key| self.fields.get(key).map(String::as_str).unwrap_or_default())
    }
}

impl fmt::Display for ParsedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Parse `input` against `schema`.
///
/// In `insensitive` mode literal segments and constants are compared
/// ignoring ASCII case; parsed values always keep the casing they arrived in,
/// except constants which are rewritten to their canonical member.
pub fn parse(
    input: &str,
    schema: &'static IdentifierSchema,
    insensitive: bool,
) -> Result<ParsedIdentifier, IdError> {
    if input.is_empty() {
        return Err(IdError::Empty);
    }
    let Some(path) = input.strip_prefix('/') else {
        return Err(IdError::MalformedInput {
            input: input.to_string(),
            reason: "a resource ID must start with '/'".to_string(),
        });
    };
    if path.is_empty() {
        return Err(IdError::MalformedInput {
            input: input.to_string(),
            reason: "the resource ID contains no segments".to_string(),
        });
    }

    let mut tokens = path.split('/');
    let mut fields = BTreeMap::new();

    for (position, segment) in schema.segments().iter().enumerate() {
        let Some(token) = tokens.next() else {
            return Err(not_specified(schema, position, segment, input));
        };

        if !segment.carries_value() {
            if !segment.matches_literal(token, insensitive) {
                return Err(not_specified(schema, position, segment, input));
            }
            continue;
        }

        let value = validate_value(segment, token.to_string(), input, insensitive)?;
        fields.insert(segment.key(), value);
    }

    let remaining: Vec<&str> = tokens.collect();
    if !remaining.is_empty() {
        return Err(IdError::TrailingData {
            input: input.to_string(),
            remaining: remaining.join("/"),
        });
    }

    Ok(ParsedIdentifier { schema, fields })
}

fn validate_value(
    segment: &Segment,
    value: String,
    input: &str,
    insensitive: bool,
) -> Result<String, IdError> {
    let key = segment.key();
    if value.is_empty() {
        return Err(IdError::EmptySegmentValue {
            key,
            input: input.to_string(),
        });
    }
    if value.contains('/') {
        return Err(IdError::MalformedInput {
            input: input.to_string(),
            reason: format!("the value for {:?} contains '/'", key),
        });
    }
    if let Segment::Constant { values, .. } = segment {
        return match segment.canonical_constant(&value, insensitive) {
            Some(canonical) => Ok(canonical.to_string()),
            None => Err(IdError::UnexpectedConstant {
                key,
                value,
                allowed: *values,
            }),
        };
    }
    Ok(value)
}

fn not_specified(
    schema: &IdentifierSchema,
    position: usize,
    segment: &Segment,
    input: &str,
) -> IdError {
    IdError::SegmentNotSpecified {
        key: segment.key(),
        position,
        expected: format!("{} (e.g. {:?})", segment.describe(), schema.example()),
        input: input.to_string(),
    }
}
