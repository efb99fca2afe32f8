//! Machine Learning compute properties, selected by `computeType`

use super::{decode_as, deserialize_polymorphic, serialize_unknown, Polymorphic, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum ComputeProperties {
    Aks(AksCompute),
    AmlCompute(AmlCompute),
    VirtualMachine(VirtualMachineCompute),
    Unknown {
        /// Field the discriminator was read from
        field: String,
        tag: String,
        fields: Map<String, Value>,
    },
}

impl Polymorphic for ComputeProperties {
    const DISCRIMINATOR: &'static str = "computeType";

    fn variants() -> &'static [Variant<Self>] {
        static VARIANTS: &[Variant<ComputeProperties>] = &[
            Variant {
                tag: "AKS",
                decode: |value| decode_as(value, ComputeProperties::Aks),
            },
            Variant {
                tag: "AmlCompute",
                decode: |value| decode_as(value, ComputeProperties::AmlCompute),
            },
            Variant {
                tag: "VirtualMachine",
                decode: |value| decode_as(value, ComputeProperties::VirtualMachine),
            },
        ];
        VARIANTS
    }

    fn unknown(field: String, tag: String, fields: Map<String, Value>) -> Self {
        Self::Unknown { field, tag, fields }
    }
}

impl<'de> Deserialize<'de> for ComputeProperties {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_polymorphic(deserializer)
    }
}

impl Serialize for ComputeProperties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        #[serde(tag = "computeType")]
        enum Tagged<'a> {
            #[serde(rename = "AKS")]
            Aks(&'a AksCompute),
            AmlCompute(&'a AmlCompute),
            VirtualMachine(&'a VirtualMachineCompute),
        }

        match self {
            Self::Aks(compute) => Tagged::Aks(compute).serialize(serializer),
            Self::AmlCompute(compute) => Tagged::AmlCompute(compute).serialize(serializer),
            Self::VirtualMachine(compute) => Tagged::VirtualMachine(compute).serialize(serializer),
            Self::Unknown { field, tag, fields } => serialize_unknown(serializer, field, tag, fields),
        }
    }
}

/// `computeType: AKS`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AksCompute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<AksProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AksProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_fqdn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_vm_size: Option<String>,
}

/// `computeType: AmlCompute`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmlCompute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<AmlComputeProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmlComputeProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_settings: Option<ScaleSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleSettings {
    pub max_node_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_node_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_idle_time_before_scale_down: Option<String>,
}

/// `computeType: VirtualMachine`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineCompute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<VirtualMachineProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_machine_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_port: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
