use serde::{Deserialize, Serialize};

use super::serde_helpers::lenient_i64;

/// Reply of `hostInfo`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostInfo {
    #[serde(default)]
    pub system: HostSystem,
    #[serde(default)]
    pub os: HostOs,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSystem {
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub cpu_arch: String,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub num_cores: i64,
    #[serde(default, rename = "memSizeMB", deserialize_with = "lenient_i64::deserialize")]
    pub mem_size_mb: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostOs {
    #[serde(default, rename = "type")]
    pub os_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}
