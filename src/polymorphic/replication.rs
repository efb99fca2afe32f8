//! Site Recovery provider specific settings
//!
//! `ReplicationProtectedItem.properties.providerSpecificDetails` is selected
//! by `instanceType`.

use super::{decode_as, deserialize_polymorphic, serialize_unknown, Polymorphic, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Provider specific details of a replication protected item
#[derive(Debug, Clone, PartialEq)]
pub enum ReplicationProviderSettings {
    /// Azure to Azure
    A2a(A2aReplicationDetails),
    /// Hyper-V to Azure
    HyperVReplicaAzure(HyperVReplicaAzureReplicationDetails),
    /// VMware / physical to Azure through the replication appliance
    InMageRcm(InMageRcmReplicationDetails),
    /// Any other `instanceType`, fields kept verbatim
    Unknown {
        /// Field the discriminator was read from
        field: String,
        tag: String,
        fields: Map<String, Value>,
    },
}

impl ReplicationProviderSettings {
    /// Discriminator value this settings object encodes with
    pub fn instance_type(&self) -> &str {
        match self {
            Self::A2a(_) => "A2A",
            Self::HyperVReplicaAzure(_) => "HyperVReplicaAzure",
            Self::InMageRcm(_) => "InMageRcm",
            Self::Unknown { tag, .. } => tag,
        }
    }
}

impl Polymorphic for ReplicationProviderSettings {
    const DISCRIMINATOR: &'static str = "instanceType";

    fn variants() -> &'static [Variant<Self>] {
        static VARIANTS: &[Variant<ReplicationProviderSettings>] = &[
            Variant {
                tag: "A2A",
                decode: |value| decode_as(value, ReplicationProviderSettings::A2a),
            },
            Variant {
                tag: "HyperVReplicaAzure",
                decode: |value| decode_as(value, ReplicationProviderSettings::HyperVReplicaAzure),
            },
            Variant {
                tag: "InMageRcm",
                decode: |value| decode_as(value, ReplicationProviderSettings::InMageRcm),
            },
        ];
        VARIANTS
    }

    fn unknown(field: String, tag: String, fields: Map<String, Value>) -> Self {
        Self::Unknown { field, tag, fields }
    }
}

impl<'de> Deserialize<'de> for ReplicationProviderSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_polymorphic(deserializer)
    }
}

impl Serialize for ReplicationProviderSettings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        #[serde(tag = "instanceType")]
        enum Tagged<'a> {
            #[serde(rename = "A2A")]
            A2a(&'a A2aReplicationDetails),
            HyperVReplicaAzure(&'a HyperVReplicaAzureReplicationDetails),
            InMageRcm(&'a InMageRcmReplicationDetails),
        }

        match self {
            Self::A2a(details) => Tagged::A2a(details).serialize(serializer),
            Self::HyperVReplicaAzure(details) => Tagged::HyperVReplicaAzure(details).serialize(serializer),
            Self::InMageRcm(details) => Tagged::InMageRcm(details).serialize(serializer),
            Self::Unknown { field, tag, fields } => serialize_unknown(serializer, field, tag, fields),
        }
    }
}

/// NIC of a replicated VM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmNicDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_nic_arm_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_nic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_vm_network_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A2aProtectedManagedDiskDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_replica_disk_account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_target_disk_account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_resource_group_id: Option<String>,
}

/// `instanceType: A2A`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A2aReplicationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_fabric_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_fabric_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_azure_resource_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_availability_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_recovery_azure_network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_tfo_azure_network_id: Option<String>,
    #[serde(
        rename = "recoveryAzureVMName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub recovery_azure_vm_name: Option<String>,
    #[serde(
        rename = "recoveryAzureVMSize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub recovery_azure_vm_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_vm_group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_nics: Option<Vec<VmNicDetails>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected_managed_disks: Option<Vec<A2aProtectedManagedDiskDetails>>,
}

/// `instanceType: HyperVReplicaAzure`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HyperVReplicaAzureReplicationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_azure_vm_name: Option<String>,
    #[serde(
        rename = "recoveryAzureVMSize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub recovery_azure_vm_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_azure_storage_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_azure_resource_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_recovery_azure_network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_availability_set_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_proximity_placement_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_nics: Option<Vec<VmNicDetails>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InMageRcmProtectedDiskDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_encryption_set_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_os_disk: Option<String>,
}

/// `instanceType: InMageRcm`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InMageRcmReplicationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_server_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_vm_group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_resource_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_vm_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_vm_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_availability_set_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_availability_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_proximity_placement_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_boot_diagnostics_storage_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected_disks: Option<Vec<InMageRcmProtectedDiskDetails>>,
}
