//! In-memory deployment
//!
//! Each host is a [`FakeNode`] holding the replies it gives. Hosts that were
//! never added are unreachable.

use async_trait::async_trait;
use bson::{doc, Document, Timestamp};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mongodb_summary::db::{AdminConnection, ConnectionFactory};
use mongodb_summary::errors::{ConnectError, QueryError};
use mongodb_summary::process::{ProcessInfo, ProcessInspector};
use mongodb_summary::proto::{
    BuildInfo, CollectionStats, CommandLineOptions, CurrentOp, HostInfo, MasterDoc,
    NamespaceEntry, NamespaceOptions, OpCounterValues, ReplicaSetStatus, ServerStatus, Shard,
    ShardList,
};

#[derive(Debug, Clone)]
pub struct FakeOplog {
    pub collection: String,
    pub size_bytes: i64,
    pub used_bytes: i64,
    pub first: Option<Timestamp>,
    pub last: Option<Timestamp>,
}

impl FakeOplog {
    pub fn new(collection: &str, size_mb: i64, used_mb: i64, first: Timestamp, last: Timestamp) -> Self {
        Self {
            collection: collection.to_string(),
            size_bytes: size_mb * 1024 * 1024,
            used_bytes: used_mb * 1024 * 1024,
            first: Some(first),
            last: Some(last),
        }
    }

    /// Oplog collection that exists but has no entries
    pub fn empty(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            size_bytes: 0,
            used_bytes: 0,
            first: None,
            last: None,
        }
    }
}

/// Replies of one host
#[derive(Debug, Default)]
pub struct FakeNode {
    pub shards: Option<Vec<Shard>>,
    pub master: Option<MasterDoc>,
    pub replica_status: Option<ReplicaSetStatus>,
    pub server_status: Option<ServerStatus>,
    /// Consecutive opcounter readings; `None` is a failed read. Once used up
    /// the last entry repeats.
    pub readings: Vec<Option<i64>>,
    pub cmd_line: Option<CommandLineOptions>,
    pub users: Option<u64>,
    pub roles: Option<u64>,
    pub databases: BTreeMap<String, Vec<String>>,
    pub oplog: Option<FakeOplog>,
    pub build_info: Option<BuildInfo>,
    pub host_info: Option<HostInfo>,
    status_calls: AtomicUsize,
}

impl FakeNode {
    pub fn new() -> Self {
        Self {
            users: Some(0),
            roles: Some(0),
            cmd_line: Some(CommandLineOptions::default()),
            ..Default::default()
        }
    }

    pub fn with_shards(mut self, shards: Vec<Shard>) -> Self {
        self.shards = Some(shards);
        self
    }

    pub fn with_master(mut self, master: MasterDoc) -> Self {
        self.master = Some(master);
        self
    }

    pub fn with_replica_status(mut self, status: ReplicaSetStatus) -> Self {
        self.replica_status = Some(status);
        self
    }

    pub fn with_server_status(mut self, status: ServerStatus) -> Self {
        self.server_status = Some(status);
        self
    }

    pub fn with_readings(mut self, readings: Vec<Option<i64>>) -> Self {
        self.readings = readings;
        self
    }

    pub fn with_cmd_line(mut self, opts: Option<CommandLineOptions>) -> Self {
        self.cmd_line = opts;
        self
    }

    pub fn with_accounts(mut self, users: Option<u64>, roles: Option<u64>) -> Self {
        self.users = users;
        self.roles = roles;
        self
    }

    pub fn with_database(mut self, name: &str, collections: &[&str]) -> Self {
        self.databases.insert(
            name.to_string(),
            collections.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn with_oplog(mut self, oplog: FakeOplog) -> Self {
        self.oplog = Some(oplog);
        self
    }

    pub fn with_build_info(mut self, version: &str) -> Self {
        self.build_info = Some(BuildInfo {
            version: version.to_string(),
            ..Default::default()
        });
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    fn next_reading(&self) -> Option<Option<i64>> {
        let call = self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.readings
            .get(call)
            .or(self.readings.last())
            .copied()
    }
}

/// Hosts by name
#[derive(Default)]
pub struct FakeCluster {
    nodes: HashMap<String, Arc<FakeNode>>,
    connects: Mutex<Vec<String>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, host: &str, node: FakeNode) -> Self {
        self.nodes.insert(host.to_string(), Arc::new(node));
        self
    }

    pub fn node(&self, host: &str) -> Arc<FakeNode> {
        self.nodes[host].clone()
    }

    /// Direct handle on one host, bypassing the factory
    pub fn connection(&self, host: &str) -> FakeConnection {
        FakeConnection {
            host: host.to_string(),
            node: self.node(host),
        }
    }

    /// Every host a connection was requested for, in request order
    pub fn connect_log(&self) -> Vec<String> {
        self.connects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConnectionFactory for FakeCluster {
    async fn connect(&self, host: &str) -> Result<Arc<dyn AdminConnection>, ConnectError> {
        self.connects.lock().unwrap().push(host.to_string());
        match self.nodes.get(host) {
            Some(node) => Ok(Arc::new(FakeConnection {
                host: host.to_string(),
                node: node.clone(),
            })),
            None => Err(ConnectError::Unreachable {
                host: host.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

pub struct FakeConnection {
    host: String,
    node: Arc<FakeNode>,
}

impl FakeConnection {
    fn unavailable(&self, command: &str) -> QueryError {
        QueryError::Unavailable {
            host: self.host.clone(),
            command: command.to_string(),
            reason: "not supported by this node".to_string(),
        }
    }

    fn oplog_named(&self, db: &str, collection: &str) -> Option<&FakeOplog> {
        self.node
            .oplog
            .as_ref()
            .filter(|oplog| db == "local" && oplog.collection == collection)
    }
}

#[async_trait]
impl AdminConnection for FakeConnection {
    fn host(&self) -> &str {
        &self.host
    }

    async fn list_shards(&self) -> Result<ShardList, QueryError> {
        match &self.node.shards {
            Some(shards) => Ok(ShardList {
                shards: shards.clone(),
            }),
            None => Err(QueryError::NotARouter {
                host: self.host.clone(),
                reason: "no such command: 'listShards'".to_string(),
            }),
        }
    }

    async fn is_master(&self) -> Result<MasterDoc, QueryError> {
        self.node
            .master
            .clone()
            .ok_or_else(|| self.unavailable("isMaster"))
    }

    async fn replica_set_status(&self) -> Result<ReplicaSetStatus, QueryError> {
        self.node
            .replica_status
            .clone()
            .ok_or_else(|| self.unavailable("replSetGetStatus"))
    }

    async fn server_status(&self) -> Result<ServerStatus, QueryError> {
        let mut status = self.node.server_status.clone().unwrap_or_default();
        if self.node.readings.is_empty() {
            return Ok(status);
        }
        match self.node.next_reading().flatten() {
            Some(v) => {
                status.opcounters = OpCounterValues {
                    insert: v,
                    query: v,
                    update: v,
                    delete: v,
                    getmore: v,
                    command: v,
                };
                Ok(status)
            }
            None => Err(self.unavailable("serverStatus")),
        }
    }

    async fn build_info(&self) -> Result<BuildInfo, QueryError> {
        self.node
            .build_info
            .clone()
            .ok_or_else(|| self.unavailable("buildInfo"))
    }

    async fn command_line_options(&self) -> Result<CommandLineOptions, QueryError> {
        self.node
            .cmd_line
            .clone()
            .ok_or_else(|| self.unavailable("getCmdLineOpts"))
    }

    async fn host_info(&self) -> Result<HostInfo, QueryError> {
        self.node
            .host_info
            .clone()
            .ok_or_else(|| self.unavailable("hostInfo"))
    }

    async fn current_op(&self) -> Result<CurrentOp, QueryError> {
        Ok(CurrentOp::default())
    }

    async fn database_names(&self) -> Result<Vec<String>, QueryError> {
        Ok(self.node.databases.keys().cloned().collect())
    }

    async fn collection_names(&self, db: &str) -> Result<Vec<String>, QueryError> {
        self.node
            .databases
            .get(db)
            .cloned()
            .ok_or_else(|| self.unavailable("listCollections"))
    }

    async fn count_collection(&self, db: &str, collection: &str) -> Result<u64, QueryError> {
        let count = match (db, collection) {
            ("admin", "system.users") => self.node.users,
            ("admin", "system.roles") => self.node.roles,
            _ => Some(0),
        };
        count.ok_or_else(|| self.unavailable("count"))
    }

    async fn namespace_lookup(
        &self,
        db: &str,
        collection: &str,
    ) -> Result<Option<NamespaceEntry>, QueryError> {
        Ok(self.oplog_named(db, collection).map(|oplog| NamespaceEntry {
            name: oplog.collection.clone(),
            options: NamespaceOptions {
                capped: true,
                size: oplog.size_bytes,
            },
        }))
    }

    async fn collection_stats(
        &self,
        db: &str,
        collection: &str,
    ) -> Result<CollectionStats, QueryError> {
        self.oplog_named(db, collection)
            .map(|oplog| CollectionStats {
                ns: format!("{}.{}", db, collection),
                size: oplog.used_bytes,
                capped: true,
                max_size: oplog.size_bytes,
                ..Default::default()
            })
            .ok_or_else(|| self.unavailable("collStats"))
    }

    async fn find_one(
        &self,
        db: &str,
        collection: &str,
        _filter: Document,
        sort: Document,
    ) -> Result<Option<Document>, QueryError> {
        let oplog = self
            .oplog_named(db, collection)
            .ok_or_else(|| self.unavailable("find"))?;
        let ts = match sort.get_i32("$natural") {
            Ok(-1) => oplog.last,
            _ => oplog.first,
        };
        Ok(ts.map(|ts| doc! { "ts": ts, "op": "n" }))
    }
}

/// Process table with a fixed set of entries
#[derive(Default)]
pub struct FakeProcesses {
    processes: HashMap<u32, ProcessInfo>,
}

impl FakeProcesses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_process(mut self, pid: u32, executable: &str, owner: &str) -> Self {
        self.processes.insert(
            pid,
            ProcessInfo {
                pid,
                start_time: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
                executable: executable.to_string(),
                owner: owner.to_string(),
            },
        );
        self
    }
}

impl ProcessInspector for FakeProcesses {
    fn resolve(&self, pid: u32) -> Option<ProcessInfo> {
        self.processes.get(&pid).cloned()
    }
}
