//! Recaser Registry
//!
//! Holds the identifier schemas known to the process, in registration order,
//! and re-derives the canonical casing of IDs echoed back by the service.

use crate::resourceids::{parser, IdError, IdentifierSchema, ParsedIdentifier, BUILTIN_SCHEMAS};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};
use thiserror::Error;

/// ARM labels re-cased even when no registered schema matches
const WELL_KNOWN_LABELS: &[&str] = &["subscriptions", "resourceGroups", "providers"];

/// Registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecaseError {
    /// Another schema already accepts exactly the same inputs
    #[error("{candidate} has the same shape as the registered {existing} ID")]
    AmbiguousRecase {
        existing: &'static str,
        candidate: &'static str,
    },

    #[error("the registry is sealed, {candidate} cannot be registered")]
    Sealed { candidate: &'static str },
}

/// Ordered catalogue of identifier schemas
#[derive(Debug, Default)]
pub struct Registry {
    schemas: RwLock<Vec<&'static IdentifierSchema>>,
    sealed: AtomicBool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `schemas` in order, sealed
    pub fn with_schemas<'a, I>(schemas: I) -> Result<Self, RecaseError>
    where
        I: IntoIterator<Item = &'a &'static IdentifierSchema>,
    {
        let registry = Self::new();
        for schema in schemas {
            registry.register(*schema)?;
        }
        registry.seal();
        Ok(registry)
    }

    /// Add a schema. Earlier registrations win when recasing.
    pub fn register(&self, schema: &'static IdentifierSchema) -> Result<(), RecaseError> {
        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        if self.sealed.load(Ordering::Acquire) {
            return Err(RecaseError::Sealed {
                candidate: schema.resource_type(),
            });
        }

        let shape = schema.folded_shape();
        if let Some(existing) = schemas.iter().find(|s| s.folded_shape() == shape) {
            return Err(RecaseError::AmbiguousRecase {
                existing: existing.resource_type(),
                candidate: schema.resource_type(),
            });
        }

        tracing::debug!("registered resource ID: {}", schema.resource_type());
        schemas.push(schema);
        Ok(())
    }

    /// Refuse any further registration
    pub fn seal(&self) {
        let _guard = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        self.sealed.store(true, Ordering::Release);
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First registered schema that accepts `input` insensitively
    pub fn find(&self, input: &str) -> Option<ParsedIdentifier> {
        let schemas = self.schemas.read().unwrap_or_else(PoisonError::into_inner);
        schemas
            .iter()
            .find_map(|schema| parser::parse(input, *schema, true).ok())
    }

    /// Canonically cased form of `input`
    pub fn recase(&self, input: &str) -> Result<String, IdError> {
        if input.is_empty() {
            return Err(IdError::Empty);
        }
        match self.find(input) {
            Some(parsed) => {
                tracing::debug!(
                    "recased {} as {}",
                    input,
                    parsed.schema().resource_type()
                );
                Ok(parsed.format())
            },
            None => Err(IdError::NoMatchingSchema {
                input: input.to_string(),
            }),
        }
    }

    /// Like [`Registry::recase`], but for unknown IDs only the well-known
    /// ARM labels are re-cased and everything else is kept as is.
    pub fn recase_or_fallback(&self, input: &str) -> String {
        match self.recase(input) {
            Ok(recased) => recased,
            Err(_) => {
                tracing::debug!("no resource ID matched {}, recasing known labels only", input);
                recase_known_labels(input)
            },
        }
    }
}

/// Re-case `subscriptions`, `resourceGroups` and `providers` where they sit
/// in label position (every other token, starting with the first).
fn recase_known_labels(input: &str) -> String {
    let Some(path) = input.strip_prefix('/') else {
        return input.to_string();
    };
    let tokens: Vec<&str> = path
        .split('/')
        .enumerate()
        .map(|(index, token)| {
            if index % 2 != 0 {
                return token;
            }
            WELL_KNOWN_LABELS
                .iter()
                .copied()
                .find(|label| label.eq_ignore_ascii_case(token))
                .unwrap_or(token)
        })
        .collect();
    format!("/{}", tokens.join("/"))
}

static DEFAULT_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Sealed registry of every built-in schema (built on first access)
pub fn default_registry() -> &'static Registry {
    DEFAULT_REGISTRY.get_or_init(|| {
        let registry = Registry::new();
        for schema in BUILTIN_SCHEMAS {
            if let Err(e) = registry.register(*schema) {
                tracing::error!("failed to register built-in resource ID: {}", e);
            }
        }
        registry.seal();
        registry
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resourceids::{
        Segment, EVENT_HUB_NAMESPACE_SCHEMA, EVENT_HUB_SCHEMA, RESOURCE_GROUP_SCHEMA,
    };

    #[test]
    fn test_default_registry_loads_successfully() {
        let registry = default_registry();
        assert_eq!(registry.len(), BUILTIN_SCHEMAS.len());
        assert!(registry.is_sealed());
    }

    #[test]
    fn test_recase_event_hub() {
        let input =
            "/SUBSCRIPTIONS/abc/RESOURCEGROUPS/rg1/providers/MICROSOFT.EVENTHUB/NAMESPACES/ns1/EVENTHUBS/eh1";
        assert_eq!(
            default_registry().recase(input).unwrap(),
            "/subscriptions/abc/resourceGroups/rg1/providers/Microsoft.EventHub/namespaces/ns1/eventhubs/eh1"
        );
    }

    #[test]
    fn test_recase_keeps_value_casing() {
        let input = "/subscriptions/ABC/resourcegroups/My-RG";
        assert_eq!(
            default_registry().recase(input).unwrap(),
            "/subscriptions/ABC/resourceGroups/My-RG"
        );
    }

    #[test]
    fn test_recase_unknown() {
        let registry = default_registry();
        assert_eq!(registry.recase(""), Err(IdError::Empty));
        assert!(matches!(
            registry.recase("/subscriptions/abc/resourcegroups/rg1/providers/Microsoft.Web/sites/app1"),
            Err(IdError::NoMatchingSchema { .. })
        ));
    }

    #[test]
    fn test_recase_or_fallback() {
        let registry = default_registry();
        assert_eq!(
            registry.recase_or_fallback(
                "/SUBSCRIPTIONS/abc/RESOURCEGROUPS/rg1/PROVIDERS/Microsoft.Web/sites/providers"
            ),
            "/subscriptions/abc/resourceGroups/rg1/providers/Microsoft.Web/sites/providers"
        );
        assert_eq!(registry.recase_or_fallback("not-an-id"), "not-an-id");
    }

    #[test]
    fn test_first_registrant_wins() {
        static WIDE: IdentifierSchema = IdentifierSchema::new(
            "Wide",
            &[
                Segment::static_segment("staticSubscriptions", "subscriptions"),
                Segment::subscription_id("subscriptionId"),
                Segment::static_segment("staticResourceGroups", "resourceGroups"),
                Segment::constant("resourceGroupName", &["Fixed"]),
            ],
        );

        let registry = Registry::new();
        registry.register(&WIDE).unwrap();
        registry.register(&RESOURCE_GROUP_SCHEMA).unwrap();

        let parsed = registry.find("/subscriptions/abc/resourcegroups/fixed").unwrap();
        assert_eq!(parsed.schema().resource_type(), "Wide");
        assert_eq!(parsed.format(), "/subscriptions/abc/resourceGroups/Fixed");

        let parsed = registry.find("/subscriptions/abc/resourcegroups/other").unwrap();
        assert_eq!(parsed.schema().resource_type(), "Resource Group");
    }

    #[test]
    fn test_same_shape_is_rejected() {
        static SHADOW: IdentifierSchema = IdentifierSchema::new(
            "Shadow",
            &[
                Segment::static_segment("staticSubscriptions", "Subscriptions"),
                Segment::subscription_id("sub"),
                Segment::static_segment("staticResourceGroups", "ResourceGroups"),
                Segment::user_specified("name", "nameValue"),
            ],
        );

        let registry = Registry::new();
        registry.register(&RESOURCE_GROUP_SCHEMA).unwrap();
        assert_eq!(
            registry.register(&SHADOW),
            Err(RecaseError::AmbiguousRecase {
                existing: "Resource Group",
                candidate: "Shadow",
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sealed_registry_rejects_registration() {
        let registry = Registry::with_schemas(&[&EVENT_HUB_NAMESPACE_SCHEMA]).unwrap();
        assert!(matches!(
            registry.register(&EVENT_HUB_SCHEMA),
            Err(RecaseError::Sealed { .. })
        ));
    }

    #[test]
    fn test_concurrent_recase() {
        let registry = default_registry();
        let input = "/subscriptions/abc/resourcegroups/rg1";
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    assert_eq!(
                        registry.recase(input).unwrap(),
                        "/subscriptions/abc/resourceGroups/rg1"
                    );
                });
            }
        });
    }
}
