use serde::{Deserialize, Serialize};

/// Reply of `listShards`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShardList {
    #[serde(default)]
    pub shards: Vec<Shard>,
}

/// One shard as registered on the router.
/// `host` is `setName/host1,host2,...` for replicated shards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shard {
    #[serde(rename = "_id")]
    pub id: String,
    pub host: String,
}
