//! Database access layer
//!
//! The collectors only see the [`AdminConnection`] capability set and obtain
//! handles through a [`ConnectionFactory`], so every component can run against
//! an in-memory deployment in tests.
//!
//! # Architecture
//!
//! ```text
//! Collector → ConnectionFactory::connect(host) → Arc<dyn AdminConnection>
//!                                                    ↓
//!                                         typed replies (crate::proto)
//! ```

pub mod mongo;

use async_trait::async_trait;
use bson::Document;
use std::sync::Arc;

use crate::errors::{ConnectError, QueryError};
use crate::proto::{
    BuildInfo, CollectionStats, CommandLineOptions, CurrentOp, HostInfo, MasterDoc,
    NamespaceEntry, ReplicaSetStatus, ServerStatus, ShardList,
};

pub use mongo::MongoConnectionFactory;

/// Read-only administrative queries against one host
#[async_trait]
pub trait AdminConnection: Send + Sync {
    /// host:port this handle talks to
    fn host(&self) -> &str;

    /// `listShards`; fails with [`QueryError::NotARouter`] on anything but a router
    async fn list_shards(&self) -> Result<ShardList, QueryError>;

    async fn is_master(&self) -> Result<MasterDoc, QueryError>;

    /// `replSetGetStatus`; fails with [`QueryError::Unavailable`] outside a replica set
    async fn replica_set_status(&self) -> Result<ReplicaSetStatus, QueryError>;

    async fn server_status(&self) -> Result<ServerStatus, QueryError>;

    async fn build_info(&self) -> Result<BuildInfo, QueryError>;

    async fn command_line_options(&self) -> Result<CommandLineOptions, QueryError>;

    async fn host_info(&self) -> Result<HostInfo, QueryError>;

    async fn current_op(&self) -> Result<CurrentOp, QueryError>;

    async fn database_names(&self) -> Result<Vec<String>, QueryError>;

    async fn collection_names(&self, db: &str) -> Result<Vec<String>, QueryError>;

    async fn count_collection(&self, db: &str, collection: &str) -> Result<u64, QueryError>;

    /// Catalog entry of `db.collection`, `None` when it does not exist
    async fn namespace_lookup(
        &self,
        db: &str,
        collection: &str,
    ) -> Result<Option<NamespaceEntry>, QueryError>;

    async fn collection_stats(&self, db: &str, collection: &str)
        -> Result<CollectionStats, QueryError>;

    /// First document matching `filter` in `sort` order, `None` on an empty result
    async fn find_one(
        &self,
        db: &str,
        collection: &str,
        filter: Document,
        sort: Document,
    ) -> Result<Option<Document>, QueryError>;
}

/// Opens connections by host name
#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    async fn connect(&self, host: &str) -> Result<Arc<dyn AdminConnection>, ConnectError>;
}
