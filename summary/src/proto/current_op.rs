use bson::Bson;
use serde::{Deserialize, Serialize};

use super::serde_helpers::lenient_opt_i64;

/// Reply of `currentOp`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentOp {
    #[serde(default)]
    pub inprog: Vec<InProgressOp>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InProgressOp {
    /// A number on mongod, `"shard:opid"` on a router
    #[serde(default)]
    pub opid: Option<Bson>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub op: String,
    #[serde(default)]
    pub ns: String,
    #[serde(default, deserialize_with = "lenient_opt_i64::deserialize")]
    pub secs_running: Option<i64>,
}

impl CurrentOp {
    pub fn active_count(&self) -> usize {
        self.inprog.iter().filter(|op| op.active).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_router_opids_decode() {
        let reply = doc! {
            "inprog": [
                { "opid": "r1:12345", "active": true, "op": "query" },
                { "opid": "r2:7", "active": false, "op": "getmore" },
            ]
        };

        let current: CurrentOp = bson::from_document(reply).unwrap();

        assert_eq!(current.inprog.len(), 2);
        assert_eq!(current.active_count(), 1);
        assert_eq!(
            current.inprog[0].opid,
            Some(Bson::String("r1:12345".to_string()))
        );
    }

    #[test]
    fn test_mongod_opids_decode() {
        let reply = doc! {
            "inprog": [
                { "opid": 42_i32, "active": true, "secs_running": 3_i64 },
                { "opid": 43_i64, "active": true },
            ]
        };

        let current: CurrentOp = bson::from_document(reply).unwrap();

        assert_eq!(current.active_count(), 2);
        assert_eq!(current.inprog[0].secs_running, Some(3));
    }
}
