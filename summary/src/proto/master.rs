use serde::{Deserialize, Serialize};

use super::serde_helpers::lenient_i64;

/// Reply of `isMaster`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterDoc {
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub hosts: Option<Vec<String>>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub ismaster: bool,
    #[serde(default)]
    pub secondary: bool,
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub me: Option<String>,
}

/// Reply of `buildInfo`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub git_version: String,
    #[serde(default)]
    pub version_array: Vec<i32>,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub bits: i64,
    #[serde(default)]
    pub debug: bool,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub max_bson_object_size: i64,
}
