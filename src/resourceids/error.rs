//! Resource ID errors

use thiserror::Error;

/// Errors produced while parsing, constructing or recasing a resource ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("resource ID was empty")]
    Empty,

    #[error("parsing {input:?}: {reason}")]
    MalformedInput { input: String, reason: String },

    #[error(
        "parsing {input:?}: the segment at position {position} should be {expected} but it was not specified"
    )]
    SegmentNotSpecified {
        key: &'static str,
        position: usize,
        expected: String,
        input: String,
    },

    #[error("parsing {input:?}: the segment {key:?} has an empty value")]
    EmptySegmentValue { key: &'static str, input: String },

    #[error("segment {key:?} has value {value:?}, expected one of {allowed:?}")]
    UnexpectedConstant {
        key: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("parsing {input:?}: unexpected trailing data {remaining:?}")]
    TrailingData { input: String, remaining: String },

    #[error("{input:?} does not match any registered resource ID")]
    NoMatchingSchema { input: String },
}

impl IdError {
    /// Segment key the error refers to, if any
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::SegmentNotSpecified { key, .. }
            | Self::EmptySegmentValue { key, .. }
            | Self::UnexpectedConstant { key, .. } => Some(*key),
            _ => None,
        }
    }
}
