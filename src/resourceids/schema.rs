//! Identifier schemas
//!
//! A schema is the ordered segment list describing one resource type's ID.
//! Schemas are declared as `static` items and never change afterwards.

use super::error::IdError;
use super::parser::{self, ParsedIdentifier};
use super::segment::Segment;

/// Ordered segment list for one resource type
#[derive(Debug, PartialEq, Eq)]
pub struct IdentifierSchema {
    resource_type: &'static str,
    segments: &'static [Segment],
}

impl IdentifierSchema {
    pub const fn new(resource_type: &'static str, segments: &'static [Segment]) -> Self {
        Self {
            resource_type,
            segments,
        }
    }

    /// Display name of the resource type, e.g. `Event Hub`
    pub fn resource_type(&self) -> &'static str {
        self.resource_type
    }

    pub fn segments(&self) -> &'static [Segment] {
        self.segments
    }

    /// Keys of every segment that produces a parsed field, in order
    pub fn value_keys(&self) -> impl Iterator<Item = &'static str> {
        self.segments
            .iter()
            .filter(|segment| segment.carries_value())
            .map(|segment| segment.key())
    }

    /// Segment with the given key
    pub fn segment(&self, key: &str) -> Option<&'static Segment> {
        self.segments.iter().find(|segment| segment.key() == key)
    }

    /// Parse `input` against this schema
    pub fn parse(&'static self, input: &str) -> Result<ParsedIdentifier, IdError> {
        parser::parse(input, self, false)
    }

    /// Parse `input`, matching literal segments case-insensitively.
    ///
    /// Only for IDs echoed back by the service, never for user input.
    pub fn parse_insensitively(&'static self, input: &str) -> Result<ParsedIdentifier, IdError> {
        parser::parse(input, self, true)
    }

    /// Build the path using `lookup` for every value segment
    pub fn format_with<'a, F>(&self, lookup: F) -> String
    where
        F: Fn(&'static str) -> &'a str,
    {
        let mut out = String::new();
        for segment in self.segments {
            out.push('/');
            match segment.literal() {
                Some(literal) => out.push_str(literal),
                None => out.push_str(lookup(segment.key())),
            }
        }
        out
    }

    /// Example ID built from each segment's example value
    pub fn example(&self) -> String {
        self.format_with(|key| self.segment(key).map(Segment::example).unwrap_or_default())
    }

    /// Case-folded shape of the schema, ignoring value segment keys.
    ///
    /// Two schemas with the same shape accept exactly the same inputs when
    /// parsed insensitively.
    pub(crate) fn folded_shape(&self) -> Vec<String> {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Constant { values, .. } => format!(
                    "{{{}}}",
                    values
                        .iter()
                        .map(|v| v.to_ascii_lowercase())
                        .collect::<Vec<_>>()
                        .join("|")
                ),
                other => match other.literal() {
                    Some(literal) => literal.to_ascii_lowercase(),
                    None => "{}".to_string(),
                },
            })
            .collect()
    }
}
