//! Typed resource IDs
//!
//! Each ID type pairs a `static` [`IdentifierSchema`] with a plain struct of
//! its value segments. The structs are generated by [`resource_id!`] so every
//! type exposes the same `parse` / `parse_insensitively` / `id` surface.

use super::error::IdError;
use super::parser::{self, ParsedIdentifier};
use super::schema::IdentifierSchema;
use super::segment::Segment;

/// Common surface of every typed resource ID
pub trait ResourceId: Sized {
    /// Schema this ID type is parsed and formatted with
    fn schema() -> &'static IdentifierSchema;

    /// Build the typed ID from a parse result
    fn from_parsed(parsed: &ParsedIdentifier) -> Result<Self, IdError>;

    /// Value of a value segment, by key
    fn value_for(&self, key: &str) -> Option<&str>;

    /// Parse a user supplied ID; literal segments must match exactly
    fn parse(input: &str) -> Result<Self, IdError> {
        Self::from_parsed(&parser::parse(input, Self::schema(), false)?)
    }

    /// Parse an ID echoed back by the service, ignoring the casing of
    /// literal segments
    fn parse_insensitively(input: &str) -> Result<Self, IdError> {
        Self::from_parsed(&parser::parse(input, Self::schema(), true)?)
    }

    /// Canonical string form
    fn id(&self) -> String {
        Self::schema().format_with(|key| self.value_for(key).unwrap_or_default())
    }

    /// Validated, untyped form of this ID
    fn to_parsed(&self) -> Result<ParsedIdentifier, IdError> {
        let schema = Self::schema();
        ParsedIdentifier::new(
            schema,
            schema
                .value_keys()
                .map(|key| (key, self.value_for(key).unwrap_or_default().to_string())),
        )
    }
}

fn check_schema(parsed: &ParsedIdentifier, expected: &'static IdentifierSchema) -> Result<(), IdError> {
    if std::ptr::eq(parsed.schema(), expected) {
        return Ok(());
    }
    Err(IdError::MalformedInput {
        input: parsed.format(),
        reason: format!(
            "parsed as a {} ID, expected a {} ID",
            parsed.schema().resource_type(),
            expected.resource_type()
        ),
    })
}

macro_rules! resource_id {
    (
        $(#[$meta:meta])*
        $name:ident => $schema:ident { $( $field:ident : $key:literal ),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            $( pub $field: String, )*
        }

        impl $name {
            #[allow(clippy::too_many_arguments)]
            pub fn new($( $field: impl Into<String> ),*) -> Self {
                Self { $( $field: $field.into(), )* }
            }
        }

        impl ResourceId for $name {
            fn schema() -> &'static IdentifierSchema {
                &$schema
            }

            fn from_parsed(parsed: &ParsedIdentifier) -> Result<Self, IdError> {
                check_schema(parsed, &$schema)?;
                Ok(Self {
                    $( $field: parsed.require($key)?.to_string(), )*
                })
            }

            fn value_for(&self, key: &str) -> Option<&str> {
                match key {
                    $( $key => Some(self.$field.as_str()), )*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.id())
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as ResourceId>::parse(s)
            }
        }
    };
}

// =============================================================================
// Schemas
// =============================================================================

const STATIC_SUBSCRIPTIONS: Segment = Segment::static_segment("staticSubscriptions", "subscriptions");
const SUBSCRIPTION: Segment = Segment::subscription_id("subscriptionId");
const STATIC_RESOURCE_GROUPS: Segment =
    Segment::static_segment("staticResourceGroups", "resourceGroups");
const RESOURCE_GROUP: Segment = Segment::resource_group("resourceGroupName");
const STATIC_PROVIDERS: Segment = Segment::static_segment("staticProviders", "providers");

pub static SUBSCRIPTION_SCHEMA: IdentifierSchema =
    IdentifierSchema::new("Subscription", &[STATIC_SUBSCRIPTIONS, SUBSCRIPTION]);

pub static RESOURCE_GROUP_SCHEMA: IdentifierSchema = IdentifierSchema::new(
    "Resource Group",
    &[STATIC_SUBSCRIPTIONS, SUBSCRIPTION, STATIC_RESOURCE_GROUPS, RESOURCE_GROUP],
);

pub static EVENT_HUB_NAMESPACE_SCHEMA: IdentifierSchema = IdentifierSchema::new(
    "Event Hub Namespace",
    &[
        STATIC_SUBSCRIPTIONS,
        SUBSCRIPTION,
        STATIC_RESOURCE_GROUPS,
        RESOURCE_GROUP,
        STATIC_PROVIDERS,
        Segment::resource_provider("staticMicrosoftEventHub", "Microsoft.EventHub"),
        Segment::static_segment("staticNamespaces", "namespaces"),
        Segment::user_specified("namespaceName", "namespaceValue"),
    ],
);

pub static EVENT_HUB_SCHEMA: IdentifierSchema = IdentifierSchema::new(
    "Event Hub",
    &[
        STATIC_SUBSCRIPTIONS,
        SUBSCRIPTION,
        STATIC_RESOURCE_GROUPS,
        RESOURCE_GROUP,
        STATIC_PROVIDERS,
        Segment::resource_provider("staticMicrosoftEventHub", "Microsoft.EventHub"),
        Segment::static_segment("staticNamespaces", "namespaces"),
        Segment::user_specified("namespaceName", "namespaceValue"),
        Segment::static_segment("staticEventhubs", "eventhubs"),
        Segment::user_specified("eventHubName", "eventHubValue"),
    ],
);

pub static VIRTUAL_MACHINE_SCHEMA: IdentifierSchema = IdentifierSchema::new(
    "Virtual Machine",
    &[
        STATIC_SUBSCRIPTIONS,
        SUBSCRIPTION,
        STATIC_RESOURCE_GROUPS,
        RESOURCE_GROUP,
        STATIC_PROVIDERS,
        Segment::resource_provider("staticMicrosoftCompute", "Microsoft.Compute"),
        Segment::static_segment("staticVirtualMachines", "virtualMachines"),
        Segment::user_specified("virtualMachineName", "virtualMachineValue"),
    ],
);

const STATIC_RECOVERY_SERVICES: Segment =
    Segment::resource_provider("staticMicrosoftRecoveryServices", "Microsoft.RecoveryServices");
const STATIC_VAULTS: Segment = Segment::static_segment("staticVaults", "vaults");
const VAULT: Segment = Segment::user_specified("vaultName", "vaultValue");
const STATIC_REPLICATION_FABRICS: Segment =
    Segment::static_segment("staticReplicationFabrics", "replicationFabrics");
const REPLICATION_FABRIC: Segment =
    Segment::user_specified("replicationFabricName", "replicationFabricValue");
const STATIC_REPLICATION_PROTECTION_CONTAINERS: Segment = Segment::static_segment(
    "staticReplicationProtectionContainers",
    "replicationProtectionContainers",
);
const REPLICATION_PROTECTION_CONTAINER: Segment = Segment::user_specified(
    "replicationProtectionContainerName",
    "replicationProtectionContainerValue",
);

pub static VAULT_SCHEMA: IdentifierSchema = IdentifierSchema::new(
    "Recovery Services Vault",
    &[
        STATIC_SUBSCRIPTIONS,
        SUBSCRIPTION,
        STATIC_RESOURCE_GROUPS,
        RESOURCE_GROUP,
        STATIC_PROVIDERS,
        STATIC_RECOVERY_SERVICES,
        STATIC_VAULTS,
        VAULT,
    ],
);

pub static REPLICATION_POLICY_SCHEMA: IdentifierSchema = IdentifierSchema::new(
    "Replication Policy",
    &[
        STATIC_SUBSCRIPTIONS,
        SUBSCRIPTION,
        STATIC_RESOURCE_GROUPS,
        RESOURCE_GROUP,
        STATIC_PROVIDERS,
        STATIC_RECOVERY_SERVICES,
        STATIC_VAULTS,
        VAULT,
        Segment::static_segment("staticReplicationPolicies", "replicationPolicies"),
        Segment::user_specified("replicationPolicyName", "replicationPolicyValue"),
    ],
);

pub static REPLICATION_FABRIC_SCHEMA: IdentifierSchema = IdentifierSchema::new(
    "Replication Fabric",
    &[
        STATIC_SUBSCRIPTIONS,
        SUBSCRIPTION,
        STATIC_RESOURCE_GROUPS,
        RESOURCE_GROUP,
        STATIC_PROVIDERS,
        STATIC_RECOVERY_SERVICES,
        STATIC_VAULTS,
        VAULT,
        STATIC_REPLICATION_FABRICS,
        REPLICATION_FABRIC,
    ],
);

pub static REPLICATION_PROTECTION_CONTAINER_SCHEMA: IdentifierSchema = IdentifierSchema::new(
    "Replication Protection Container",
    &[
        STATIC_SUBSCRIPTIONS,
        SUBSCRIPTION,
        STATIC_RESOURCE_GROUPS,
        RESOURCE_GROUP,
        STATIC_PROVIDERS,
        STATIC_RECOVERY_SERVICES,
        STATIC_VAULTS,
        VAULT,
        STATIC_REPLICATION_FABRICS,
        REPLICATION_FABRIC,
        STATIC_REPLICATION_PROTECTION_CONTAINERS,
        REPLICATION_PROTECTION_CONTAINER,
    ],
);

pub static REPLICATION_PROTECTED_ITEM_SCHEMA: IdentifierSchema = IdentifierSchema::new(
    "Replication Protected Item",
    &[
        STATIC_SUBSCRIPTIONS,
        SUBSCRIPTION,
        STATIC_RESOURCE_GROUPS,
        RESOURCE_GROUP,
        STATIC_PROVIDERS,
        STATIC_RECOVERY_SERVICES,
        STATIC_VAULTS,
        VAULT,
        STATIC_REPLICATION_FABRICS,
        REPLICATION_FABRIC,
        STATIC_REPLICATION_PROTECTION_CONTAINERS,
        REPLICATION_PROTECTION_CONTAINER,
        Segment::static_segment("staticReplicationProtectedItems", "replicationProtectedItems"),
        Segment::user_specified("replicationProtectedItemName", "replicationProtectedItemValue"),
    ],
);

pub static MACHINE_LEARNING_COMPUTE_SCHEMA: IdentifierSchema = IdentifierSchema::new(
    "Machine Learning Compute",
    &[
        STATIC_SUBSCRIPTIONS,
        SUBSCRIPTION,
        STATIC_RESOURCE_GROUPS,
        RESOURCE_GROUP,
        STATIC_PROVIDERS,
        Segment::resource_provider(
            "staticMicrosoftMachineLearningServices",
            "Microsoft.MachineLearningServices",
        ),
        Segment::static_segment("staticWorkspaces", "workspaces"),
        Segment::user_specified("workspaceName", "workspaceValue"),
        Segment::static_segment("staticComputes", "computes"),
        Segment::user_specified("computeName", "computeValue"),
    ],
);

/// DNS record types accepted by the record set ID
pub const DNS_RECORD_TYPES: &[&str] = &[
    "A", "AAAA", "CAA", "CNAME", "MX", "NS", "PTR", "SOA", "SRV", "TXT",
];

pub static DNS_RECORD_SET_SCHEMA: IdentifierSchema = IdentifierSchema::new(
    "DNS Record Set",
    &[
        STATIC_SUBSCRIPTIONS,
        SUBSCRIPTION,
        STATIC_RESOURCE_GROUPS,
        RESOURCE_GROUP,
        STATIC_PROVIDERS,
        Segment::resource_provider("staticMicrosoftNetwork", "Microsoft.Network"),
        Segment::static_segment("staticDnsZones", "dnsZones"),
        Segment::user_specified("dnsZoneName", "dnsZoneValue"),
        Segment::constant("recordType", DNS_RECORD_TYPES),
        Segment::user_specified("relativeRecordSetName", "relativeRecordSetValue"),
    ],
);

/// Every built-in schema, in registration order
pub static BUILTIN_SCHEMAS: &[&IdentifierSchema] = &[
    &SUBSCRIPTION_SCHEMA,
    &RESOURCE_GROUP_SCHEMA,
    &EVENT_HUB_NAMESPACE_SCHEMA,
    &EVENT_HUB_SCHEMA,
    &VIRTUAL_MACHINE_SCHEMA,
    &VAULT_SCHEMA,
    &REPLICATION_POLICY_SCHEMA,
    &REPLICATION_FABRIC_SCHEMA,
    &REPLICATION_PROTECTION_CONTAINER_SCHEMA,
    &REPLICATION_PROTECTED_ITEM_SCHEMA,
    &MACHINE_LEARNING_COMPUTE_SCHEMA,
    &DNS_RECORD_SET_SCHEMA,
];

// =============================================================================
// Typed IDs
// =============================================================================

resource_id! {
    /// `/subscriptions/{subscriptionId}`
    SubscriptionId => SUBSCRIPTION_SCHEMA {
        subscription_id: "subscriptionId",
    }
}

resource_id! {
    /// `/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}`
    ResourceGroupId => RESOURCE_GROUP_SCHEMA {
        subscription_id: "subscriptionId",
        resource_group_name: "resourceGroupName",
    }
}

resource_id! {
    EventHubNamespaceId => EVENT_HUB_NAMESPACE_SCHEMA {
        subscription_id: "subscriptionId",
        resource_group_name: "resourceGroupName",
        namespace_name: "namespaceName",
    }
}

resource_id! {
    EventHubId => EVENT_HUB_SCHEMA {
        subscription_id: "subscriptionId",
        resource_group_name: "resourceGroupName",
        namespace_name: "namespaceName",
        event_hub_name: "eventHubName",
    }
}

resource_id! {
    VirtualMachineId => VIRTUAL_MACHINE_SCHEMA {
        subscription_id: "subscriptionId",
        resource_group_name: "resourceGroupName",
        virtual_machine_name: "virtualMachineName",
    }
}

resource_id! {
    VaultId => VAULT_SCHEMA {
        subscription_id: "subscriptionId",
        resource_group_name: "resourceGroupName",
        vault_name: "vaultName",
    }
}

resource_id! {
    ReplicationPolicyId => REPLICATION_POLICY_SCHEMA {
        subscription_id: "subscriptionId",
        resource_group_name: "resourceGroupName",
        vault_name: "vaultName",
        replication_policy_name: "replicationPolicyName",
    }
}

resource_id! {
    ReplicationFabricId => REPLICATION_FABRIC_SCHEMA {
        subscription_id: "subscriptionId",
        resource_group_name: "resourceGroupName",
        vault_name: "vaultName",
        replication_fabric_name: "replicationFabricName",
    }
}

resource_id! {
    ReplicationProtectionContainerId => REPLICATION_PROTECTION_CONTAINER_SCHEMA {
        subscription_id: "subscriptionId",
        resource_group_name: "resourceGroupName",
        vault_name: "vaultName",
        replication_fabric_name: "replicationFabricName",
        replication_protection_container_name: "replicationProtectionContainerName",
    }
}

resource_id! {
    /// Protected item inside a Site Recovery protection container
    ReplicationProtectedItemId => REPLICATION_PROTECTED_ITEM_SCHEMA {
        subscription_id: "subscriptionId",
        resource_group_name: "resourceGroupName",
        vault_name: "vaultName",
        replication_fabric_name: "replicationFabricName",
        replication_protection_container_name: "replicationProtectionContainerName",
        replication_protected_item_name: "replicationProtectedItemName",
    }
}

resource_id! {
    MachineLearningComputeId => MACHINE_LEARNING_COMPUTE_SCHEMA {
        subscription_id: "subscriptionId",
        resource_group_name: "resourceGroupName",
        workspace_name: "workspaceName",
        compute_name: "computeName",
    }
}

resource_id! {
    /// Record set in a public DNS zone; `record_type` is one of [`DNS_RECORD_TYPES`]
    DnsRecordSetId => DNS_RECORD_SET_SCHEMA {
        subscription_id: "subscriptionId",
        resource_group_name: "resourceGroupName",
        dns_zone_name: "dnsZoneName",
        record_type: "recordType",
        relative_record_set_name: "relativeRecordSetName",
    }
}

impl ReplicationProtectedItemId {
    /// Vault the protected item belongs to
    pub fn vault_id(&self) -> VaultId {
        VaultId::new(&self.subscription_id, &self.resource_group_name, &self.vault_name)
    }

    /// Protection container holding the item
    pub fn container_id(&self) -> ReplicationProtectionContainerId {
        ReplicationProtectionContainerId::new(
            &self.subscription_id,
            &self.resource_group_name,
            &self.vault_name,
            &self.replication_fabric_name,
            &self.replication_protection_container_name,
        )
    }
}

impl EventHubId {
    pub fn namespace_id(&self) -> EventHubNamespaceId {
        EventHubNamespaceId::new(&self.subscription_id, &self.resource_group_name, &self.namespace_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_hub_id_round_trip() {
        let input =
            "/subscriptions/abc/resourceGroups/rg1/providers/Microsoft.EventHub/namespaces/ns1/eventhubs/eh1";
        let id = EventHubId::parse(input).unwrap();
        assert_eq!(id, EventHubId::new("abc", "rg1", "ns1", "eh1"));
        assert_eq!(id.id(), input);
        assert_eq!(id.to_string(), input);
        assert_eq!(input.parse::<EventHubId>().unwrap(), id);
    }

    #[test]
    fn test_parse_insensitively() {
        let input =
            "/SUBSCRIPTIONS/abc/RESOURCEGROUPS/rg1/providers/MICROSOFT.EVENTHUB/NAMESPACES/ns1/EVENTHUBS/eh1";
        assert!(EventHubId::parse(input).is_err());
        let id = EventHubId::parse_insensitively(input).unwrap();
        assert_eq!(id, EventHubId::new("abc", "rg1", "ns1", "eh1"));
    }

    #[test]
    fn test_from_parsed_rejects_other_schema() {
        let parsed = VAULT_SCHEMA
            .parse("/subscriptions/abc/resourceGroups/rg1/providers/Microsoft.RecoveryServices/vaults/v1")
            .unwrap();
        assert!(VaultId::from_parsed(&parsed).is_ok());
        assert!(matches!(
            VirtualMachineId::from_parsed(&parsed),
            Err(IdError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_to_parsed_validates_fields() {
        let id = VirtualMachineId::new("abc", "rg1", "vm1");
        assert_eq!(id.to_parsed().unwrap().format(), id.id());

        let invalid = VirtualMachineId::new("abc", "", "vm1");
        assert!(matches!(
            invalid.to_parsed(),
            Err(IdError::EmptySegmentValue { key: "resourceGroupName", .. })
        ));
    }

    #[test]
    fn test_parent_ids() {
        let item = ReplicationProtectedItemId::new("abc", "rg1", "vault1", "fabric1", "container1", "item1");
        assert_eq!(
            item.container_id().id(),
            "/subscriptions/abc/resourceGroups/rg1/providers/Microsoft.RecoveryServices/vaults/vault1/replicationFabrics/fabric1/replicationProtectionContainers/container1"
        );
        assert_eq!(item.vault_id(), VaultId::new("abc", "rg1", "vault1"));

        let hub = EventHubId::new("abc", "rg1", "ns1", "eh1");
        assert_eq!(hub.namespace_id().namespace_name, "ns1");
    }

    #[test]
    fn test_dns_record_set_constant() {
        let id = DnsRecordSetId::parse_insensitively(
            "/subscriptions/abc/resourcegroups/rg1/providers/microsoft.network/dnszones/example.com/cname/www",
        )
        .unwrap();
        assert_eq!(id.record_type, "CNAME");
        assert_eq!(
            id.id(),
            "/subscriptions/abc/resourceGroups/rg1/providers/Microsoft.Network/dnsZones/example.com/CNAME/www"
        );
    }

    #[test]
    fn test_builtin_examples_have_arm_shape() {
        for schema in BUILTIN_SCHEMAS {
            let example = schema.example();
            assert!(example.starts_with("/subscriptions/"), "{}", example);
            if schema.segments().len() > 4 {
                assert!(example.contains("/providers/"), "{}", example);
            }
            assert!(schema.parse(&example).is_ok(), "{}", example);
        }
    }
}
