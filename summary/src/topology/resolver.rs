use serde::Serialize;
use tracing::{debug, info, warn};

use crate::db::ConnectionFactory;
use crate::errors::TopologyError;
use crate::proto::Shard;

/// Ordered, duplicate-free list of hosts to query individually
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostSet {
    hosts: Vec<String>,
}

impl HostSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(host: &str) -> Self {
        Self {
            hosts: vec![host.to_string()],
        }
    }

    /// Appends `host` unless already present; returns whether it was added
    pub fn insert(&mut self, host: impl Into<String>) -> bool {
        let host = host.into();
        if self.hosts.contains(&host) {
            return false;
        }
        self.hosts.push(host);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn contains(&self, host: &str) -> bool {
        self.hosts.iter().any(|h| h == host)
    }
}

impl<S: Into<String>> FromIterator<S> for HostSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = HostSet::new();
        for host in iter {
            set.insert(host);
        }
        set
    }
}

/// First host of a shard connection string.
///
/// `r1/h1:27017,h2:27017` yields `h1:27017`; a shard registered without a
/// replica set name (`h1:27017`) yields itself.
pub fn representative_host(descriptor: &str) -> Option<&str> {
    let hosts = match descriptor.split_once('/') {
        Some((_set_name, hosts)) => hosts,
        None => descriptor,
    };

    hosts
        .split(',')
        .next()
        .map(str::trim)
        .filter(|host| !host.is_empty())
}

/// Determine the hosts to query for the deployment reachable through `seed`.
///
/// A router answers `listShards` and is replaced by one host per shard. Any
/// other node rejects it, which is expected, and is returned on its own.
pub async fn resolve_hosts(
    factory: &dyn ConnectionFactory,
    seed: &str,
) -> Result<HostSet, TopologyError> {
    let conn = factory
        .connect(seed)
        .await
        .map_err(TopologyError::SeedUnreachable)?;

    let shards = match conn.list_shards().await {
        Ok(list) => list.shards,
        Err(e) => {
            debug!("{} does not list shards, treating it as a single node: {}", seed, e);
            return Ok(HostSet::single(seed));
        }
    };

    if shards.is_empty() {
        debug!("{} reports no shards, treating it as a single node", seed);
        return Ok(HostSet::single(seed));
    }

    let hosts = shard_hosts(&shards);
    if hosts.is_empty() {
        warn!("None of the {} shards on {} has a usable host", shards.len(), seed);
        return Ok(HostSet::single(seed));
    }

    info!(
        "{} is a router for {} shards, querying {} hosts",
        seed,
        shards.len(),
        hosts.len()
    );
    Ok(hosts)
}

fn shard_hosts(shards: &[Shard]) -> HostSet {
    let mut hosts = HostSet::new();
    for shard in shards {
        match representative_host(&shard.host) {
            Some(host) => {
                hosts.insert(host);
            }
            None => warn!("Shard {} has no host in '{}'", shard.id, shard.host),
        }
    }
    hosts
}
