use serde::{Deserialize, Serialize};

use super::serde_helpers::lenient_i64;

/// Reply of `serverStatus`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub process: String,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub pid: i64,
    #[serde(default)]
    pub uptime: f64,
    #[serde(default)]
    pub opcounters: OpCounterValues,
    #[serde(default)]
    pub repl: Option<ReplInfo>,
    #[serde(default)]
    pub storage_engine: Option<StorageEngine>,
    #[serde(default)]
    pub connections: Option<Connections>,
}

/// Cumulative operation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpCounterValues {
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub insert: i64,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub query: i64,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub update: i64,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub delete: i64,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub getmore: i64,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub command: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplInfo {
    #[serde(default)]
    pub set_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageEngine {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Connections {
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub current: i64,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub available: i64,
}
