//! ARM response models
//!
//! Only the parts callers act on are typed; the provider or compute specific
//! section is a polymorphic family so new service shapes still decode.

use crate::polymorphic::{ComputeProperties, ReplicationProviderSettings};
use crate::recaser::Registry;
use serde::{Deserialize, Serialize};

/// Envelope of an ARM list response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(default)]
    pub next_link: Option<String>,
}

/// `Microsoft.RecoveryServices/vaults/replicationFabrics/replicationProtectionContainers/replicationProtectedItems`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationProtectedItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ReplicationProtectedItemProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationProtectedItemProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_fabric_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_container_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_specific_details: Option<ReplicationProviderSettings>,
}

impl ReplicationProtectedItem {
    /// Re-case every resource ID the service echoed back
    pub fn normalize_ids(&mut self, registry: &Registry) {
        recase_in_place(registry, &mut self.id);

        let Some(properties) = self.properties.as_mut() else {
            return;
        };
        recase_in_place(registry, &mut properties.policy_id);
        recase_in_place(registry, &mut properties.recovery_fabric_id);
        recase_in_place(registry, &mut properties.recovery_container_id);

        match properties.provider_specific_details.as_mut() {
            Some(ReplicationProviderSettings::A2a(details)) => {
                recase_in_place(registry, &mut details.fabric_object_id);
                recase_in_place(registry, &mut details.recovery_azure_resource_group_id);
            },
            Some(ReplicationProviderSettings::HyperVReplicaAzure(details)) => {
                recase_in_place(registry, &mut details.recovery_azure_resource_group_id);
            },
            Some(ReplicationProviderSettings::InMageRcm(details)) => {
                recase_in_place(registry, &mut details.target_resource_group_id);
            },
            Some(ReplicationProviderSettings::Unknown { .. }) | None => {},
        }
    }
}

/// `Microsoft.MachineLearningServices/workspaces/computes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineLearningCompute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ComputeProperties>,
}

impl MachineLearningCompute {
    pub fn normalize_ids(&mut self, registry: &Registry) {
        recase_in_place(registry, &mut self.id);

        match self.properties.as_mut() {
            Some(ComputeProperties::Aks(compute)) => {
                recase_in_place(registry, &mut compute.resource_id);
            },
            Some(ComputeProperties::VirtualMachine(compute)) => {
                recase_in_place(registry, &mut compute.resource_id);
            },
            _ => {},
        }
    }
}

fn recase_in_place(registry: &Registry, id: &mut Option<String>) {
    if let Some(value) = id.as_mut() {
        if !value.is_empty() {
            *value = registry.recase_or_fallback(value);
        }
    }
}
