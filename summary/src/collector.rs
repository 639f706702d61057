// File: summary/src/collector.rs
//! Gathers everything the report needs in one pass.
//!
//! ```text
//! seed ─► resolve_hosts ─► host set ─┬─► aggregate_members
//!   │                                ├─► collect_oplog_windows
//!   │                                └─► count_catalog
//!   ├─► spawn_sampler (own task, awaited last)
//!   └─► buildInfo / isMaster / serverStatus / hostInfo / security
//! ```

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::catalog::{count_catalog, CatalogCounts};
use crate::config::RunConfig;
use crate::db::ConnectionFactory;
use crate::errors::{QueryError, SummaryError};
use crate::oplog::{collect_oplog_windows, OplogWindow};
use crate::process::{ProcessInfo, ProcessInspector};
use crate::proto::{BuildInfo, HostInfo, ReplicaMember, ServerStatus};
use crate::replica::aggregate_members;
use crate::sampler::{spawn_sampler, OpCounters};
use crate::security::{inspect_security, SecurityPosture};
use crate::topology::{classify, resolve_hosts, HostSet, NodeRole};

/// Everything gathered in one run, consumed by the report
#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummary {
    pub seed_host: String,
    pub hosts: HostSet,
    pub build_info: Option<BuildInfo>,
    pub node_role: Option<NodeRole>,
    pub server_status: Option<ServerStatus>,
    pub host_info: Option<HostInfo>,
    pub process_info: Option<ProcessInfo>,
    pub catalog: CatalogCounts,
    pub active_operations: Option<usize>,
    /// `myState` of the seed, when it belongs to a replica set
    pub replica_state: Option<i32>,
    pub security: SecurityPosture,
    pub replica_members: Vec<ReplicaMember>,
    pub oplog_windows: Vec<OplogWindow>,
    pub running_ops: OpCounters,
    pub sampling_window: Duration,
}

/// Collect the summary for the deployment behind `config.seed_host`.
///
/// Only an unreachable seed or a failed security inspection aborts; any other
/// read that fails is logged and left out of the result.
pub async fn collect_summary(
    factory: &dyn ConnectionFactory,
    processes: &dyn ProcessInspector,
    config: &RunConfig,
) -> Result<ClusterSummary, SummaryError> {
    let seed_host = config.seed_host.as_str();

    let hosts = resolve_hosts(factory, seed_host).await?;
    info!("Querying {} host(s): {}", hosts.len(), hosts.as_slice().join(", "));

    let seed = factory.connect(seed_host).await?;

    let sampler = spawn_sampler(
        seed.clone(),
        config.sample_count,
        config.sample_interval(),
        config.average_mode,
    );

    let build_info = optional(seed_host, "buildInfo", seed.build_info().await);
    let node_role = optional(seed_host, "isMaster", seed.is_master().await).map(|doc| classify(&doc));
    let server_status = optional(seed_host, "serverStatus", seed.server_status().await);
    let host_info = optional(seed_host, "hostInfo", seed.host_info().await);
    let active_operations =
        optional(seed_host, "currentOp", seed.current_op().await).map(|op| op.active_count());

    let replica_state = match seed.replica_set_status().await {
        Ok(status) => Some(status.my_state),
        Err(e) => {
            debug!("No replica status on seed {}: {}", seed_host, e);
            None
        }
    };

    if config.debug {
        dump("buildInfo", &build_info);
        dump("serverStatus", &server_status);
        dump("hostInfo", &host_info);
    }

    let security = match inspect_security(seed.as_ref()).await {
        Ok(security) => security,
        Err(e) => {
            sampler.abort();
            return Err(e.into());
        }
    };

    let concurrency = config.max_concurrent_hosts;
    let (replica_members, oplog_windows, catalog) = tokio::join!(
        aggregate_members(factory, &hosts, concurrency),
        collect_oplog_windows(factory, &hosts, concurrency),
        count_catalog(factory, &hosts, concurrency),
    );

    let process_info = server_status
        .as_ref()
        .and_then(|status| u32::try_from(status.pid).ok())
        .and_then(|pid| {
            let info = processes.resolve(pid);
            if info.is_none() {
                debug!("Process {} of {} is not visible locally", pid, seed_host);
            }
            info
        });

    let running_ops = match sampler.await {
        Ok(counters) => counters,
        Err(e) => {
            warn!("Operation sampler did not finish: {}", e);
            OpCounters::default()
        }
    };

    Ok(ClusterSummary {
        seed_host: seed_host.to_string(),
        hosts,
        build_info,
        node_role,
        server_status,
        host_info,
        process_info,
        catalog,
        active_operations,
        replica_state,
        security,
        replica_members,
        oplog_windows,
        running_ops,
        sampling_window: config.sampling_window(),
    })
}

fn optional<T>(host: &str, command: &str, result: Result<T, QueryError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{} failed on {}: {}", command, host, e);
            None
        }
    }
}

fn dump<T: Serialize>(title: &str, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => debug!("{}\n{}", title, json),
        Err(e) => debug!("Cannot serialize {}: {}", title, e),
    }
}
