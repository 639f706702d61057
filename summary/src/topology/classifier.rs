use serde::Serialize;
use std::fmt;

use crate::constants::topology::ROUTER_SENTINEL;
use crate::proto::MasterDoc;

/// Role of a node, derived from its `isMaster` reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeRole {
    Standalone,
    ReplicaSetMember,
    RouterGateway,
}

impl NodeRole {
    /// Process type label used in the report
    pub fn label(&self) -> &'static str {
        match self {
            NodeRole::Standalone => "mongod",
            NodeRole::ReplicaSetMember => "replset",
            NodeRole::RouterGateway => "mongos",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Replica set indicators win over the router sentinel.
pub fn classify(doc: &MasterDoc) -> NodeRole {
    let has_set_name = doc.set_name.as_deref().is_some_and(|name| !name.is_empty());
    let has_hosts = doc.hosts.as_ref().is_some_and(|hosts| !hosts.is_empty());

    if has_set_name || has_hosts {
        NodeRole::ReplicaSetMember
    } else if doc.msg.as_deref() == Some(ROUTER_SENTINEL) {
        NodeRole::RouterGateway
    } else {
        NodeRole::Standalone
    }
}
