use serde::{Deserialize, Serialize};

use super::serde_helpers::{encoded_timestamp, lenient_i64};

/// Catalog entry of a collection, as returned by a namespace lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceEntry {
    pub name: String,
    #[serde(default)]
    pub options: NamespaceOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceOptions {
    #[serde(default)]
    pub capped: bool,
    /// Configured capacity in bytes
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub size: i64,
}

/// Reply of `collStats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    #[serde(default)]
    pub ns: String,
    /// Used bytes
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub size: i64,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub count: i64,
    #[serde(default)]
    pub capped: bool,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub max_size: i64,
}

/// One oplog entry; only the timestamp is read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OplogRow {
    #[serde(deserialize_with = "encoded_timestamp::deserialize")]
    pub ts: u64,
    #[serde(default)]
    pub op: String,
}
