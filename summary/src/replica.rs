//! Replica membership aggregation
//!
//! Every host in the set reports its own view of its replica set. The views
//! are concatenated in host-set order, each member tagged with the name of the
//! set that reported it.

use tracing::{debug, warn};

use crate::db::ConnectionFactory;
use crate::errors::{ConnectError, QueryError};
use crate::fanout::fan_out;
use crate::proto::{ReplicaMember, ReplicaSetStatus};
use crate::topology::HostSet;

enum HostMembers {
    Members(Vec<ReplicaMember>),
    UnnamedSet,
    Unreachable(ConnectError),
    NoReplicaStatus(QueryError),
}

/// Merge the replica set members reported by every host. Never fails: hosts
/// that cannot be reached or carry no replica status (routers, standalones)
/// contribute nothing.
pub async fn aggregate_members(
    factory: &dyn ConnectionFactory,
    hosts: &HostSet,
    concurrency: usize,
) -> Vec<ReplicaMember> {
    let results = fan_out(hosts.as_slice(), concurrency, |host| async move {
        let conn = match factory.connect(&host).await {
            Ok(conn) => conn,
            Err(e) => return HostMembers::Unreachable(e),
        };
        match conn.replica_set_status().await {
            Ok(status) if status.set.is_empty() => HostMembers::UnnamedSet,
            Ok(status) => HostMembers::Members(tag_members(status)),
            Err(e) => HostMembers::NoReplicaStatus(e),
        }
    })
    .await;

    let mut members = Vec::new();
    for (host, result) in results {
        match result {
            HostMembers::Members(found) => {
                debug!("{} reported {} replica set members", host, found.len());
                members.extend(found);
            }
            HostMembers::UnnamedSet => {
                warn!("Ignoring replica status of {}: reply carries no set name", host)
            }
            HostMembers::Unreachable(e) => warn!("Skipping replica status of {}: {}", host, e),
            // Routers and standalones have no replica status.
            HostMembers::NoReplicaStatus(e) => debug!("No replica status on {}: {}", host, e),
        }
    }
    members
}

/// Stamp each member with the set name carried by the enclosing reply.
fn tag_members(status: ReplicaSetStatus) -> Vec<ReplicaMember> {
    let set = status.set;
    status
        .members
        .into_iter()
        .map(|mut member| {
            member.set = set.clone();
            member
        })
        .collect()
}
