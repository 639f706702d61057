use serde::{Deserialize, Serialize};

use super::serde_helpers::{encoded_timestamp, lenient_i64};

/// Reply of `replSetGetStatus`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSetStatus {
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub my_state: i32,
    #[serde(default)]
    pub members: Vec<ReplicaMember>,
}

/// One replica set member as seen by the answering host.
///
/// `set` is not part of the per-member document; the membership aggregator
/// fills it from the enclosing reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaMember {
    #[serde(rename = "_id", deserialize_with = "lenient_i64::deserialize")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub health: f64,
    #[serde(default)]
    pub state: i32,
    #[serde(default)]
    pub state_str: String,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub uptime: i64,
    #[serde(default, rename = "self")]
    pub is_self: bool,
    /// Encoded BSON timestamp, seconds in the high 32 bits
    #[serde(default, deserialize_with = "encoded_timestamp::deserialize")]
    pub election_time: u64,
    #[serde(default)]
    pub set: String,
}
