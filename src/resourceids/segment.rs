//! Segment grammar
//!
//! A segment is one `/`-delimited component of a resource ID. Literal
//! segments (static labels and provider namespaces) carry no value of their
//! own; every other kind produces exactly one parsed field.

/// Example used for subscription id segments in errors and generated examples
pub const EXAMPLE_SUBSCRIPTION_ID: &str = "12345678-1234-9876-4563-123456789012";

/// Example used for resource group segments
pub const EXAMPLE_RESOURCE_GROUP: &str = "example-resource-group";

/// One component of an identifier schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Literal label such as `subscriptions` or `namespaces`
    Static {
        key: &'static str,
        value: &'static str,
    },
    /// Subscription GUID
    SubscriptionId { key: &'static str },
    /// Resource group name
    ResourceGroup { key: &'static str },
    /// Literal resource provider namespace, e.g. `Microsoft.Network`
    ResourceProvider {
        key: &'static str,
        namespace: &'static str,
    },
    /// Arbitrary name chosen by the caller
    UserSpecified {
        key: &'static str,
        example: &'static str,
    },
    /// Value from a closed set, e.g. a DNS record type
    Constant {
        key: &'static str,
        values: &'static [&'static str],
    },
}

impl Segment {
    pub const fn static_segment(key: &'static str, value: &'static str) -> Self {
        Self::Static { key, value }
    }

    pub const fn subscription_id(key: &'static str) -> Self {
        Self::SubscriptionId { key }
    }

    pub const fn resource_group(key: &'static str) -> Self {
        Self::ResourceGroup { key }
    }

    pub const fn resource_provider(key: &'static str, namespace: &'static str) -> Self {
        Self::ResourceProvider { key, namespace }
    }

    pub const fn user_specified(key: &'static str, example: &'static str) -> Self {
        Self::UserSpecified { key, example }
    }

    pub const fn constant(key: &'static str, values: &'static [&'static str]) -> Self {
        Self::Constant { key, values }
    }

    /// Name of the segment, used as the field key for value segments
    pub fn key(&self) -> &'static str {
        match *self {
            Self::Static { key, .. }
            | Self::SubscriptionId { key }
            | Self::ResourceGroup { key }
            | Self::ResourceProvider { key, .. }
            | Self::UserSpecified { key, .. }
            | Self::Constant { key, .. } => key,
        }
    }

    /// Canonical literal for static and provider segments
    pub fn literal(&self) -> Option<&'static str> {
        match *self {
            Self::Static { value, .. } => Some(value),
            Self::ResourceProvider { namespace, .. } => Some(namespace),
            _ => None,
        }
    }

    /// Whether this segment produces a parsed field
    pub fn carries_value(&self) -> bool {
        self.literal().is_none()
    }

    /// Example value for this segment
    pub fn example(&self) -> &'static str {
        match *self {
            Self::Static { value, .. } => value,
            Self::ResourceProvider { namespace, .. } => namespace,
            Self::SubscriptionId { .. } => EXAMPLE_SUBSCRIPTION_ID,
            Self::ResourceGroup { .. } => EXAMPLE_RESOURCE_GROUP,
            Self::UserSpecified { example, .. } => example,
            Self::Constant { values, .. } => values.first().copied().unwrap_or_default(),
        }
    }

    /// Human readable description used in parse errors
    pub fn describe(&self) -> String {
        match *self {
            Self::Static { value, .. } => format!("the literal {:?}", value),
            Self::ResourceProvider { namespace, .. } => {
                format!("the resource provider namespace {:?}", namespace)
            },
            Self::SubscriptionId { .. } => "the Subscription ID".to_string(),
            Self::ResourceGroup { .. } => "the Resource Group name".to_string(),
            Self::UserSpecified { key, .. } => format!("the user specified value for {:?}", key),
            Self::Constant { key, values } => {
                format!("one of [{}] for {:?}", values.join(", "), key)
            },
        }
    }

    /// Compare a path token against this segment's literal.
    ///
    /// Always `true` for value segments.
    pub(crate) fn matches_literal(&self, token: &str, insensitive: bool) -> bool {
        match self.literal() {
            Some(literal) if insensitive => literal.eq_ignore_ascii_case(token),
            Some(literal) => literal == token,
            None => true,
        }
    }

    /// Resolve a constant token to its canonical member
    pub(crate) fn canonical_constant(&self, token: &str, insensitive: bool) -> Option<&'static str> {
        let Self::Constant { values, .. } = *self else {
            return None;
        };
        values.iter().copied().find(|candidate| {
            if insensitive {
                candidate.eq_ignore_ascii_case(token)
            } else {
                *candidate == token
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_segments_have_no_value() {
        assert!(!Segment::static_segment("staticProviders", "providers").carries_value());
        assert!(!Segment::resource_provider("staticMicrosoftEventHub", "Microsoft.EventHub").carries_value());
        assert!(Segment::subscription_id("subscriptionId").carries_value());
        assert!(Segment::user_specified("namespaceName", "namespaceValue").carries_value());
    }

    #[test]
    fn test_literal_match_respects_mode() {
        let segment = Segment::static_segment("staticNamespaces", "namespaces");
        assert!(segment.matches_literal("namespaces", false));
        assert!(!segment.matches_literal("NAMESPACES", false));
        assert!(segment.matches_literal("NAMESPACES", true));
        assert!(!segment.matches_literal("namespace", true));
    }

    #[test]
    fn test_constant_resolves_to_canonical_casing() {
        let segment = Segment::constant("recordType", &["A", "AAAA", "CNAME"]);
        assert_eq!(segment.canonical_constant("CNAME", false), Some("CNAME"));
        assert_eq!(segment.canonical_constant("cname", false), None);
        assert_eq!(segment.canonical_constant("cname", true), Some("CNAME"));
        assert_eq!(segment.canonical_constant("MX", true), None);
    }

    #[test]
    fn test_examples() {
        assert_eq!(Segment::subscription_id("subscriptionId").example(), EXAMPLE_SUBSCRIPTION_ID);
        assert_eq!(Segment::constant("recordType", &["A", "AAAA"]).example(), "A");
    }
}
