// File: summary/src/db/mongo.rs
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, FindOneOptions},
    Client,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::{AdminConnection, ConnectionFactory};
use crate::config::RunConfig;
use crate::constants::{defaults, topology::ADMIN_DB};
use crate::errors::{ConnectError, QueryError};
use crate::proto::{
    BuildInfo, CollectionStats, CommandLineOptions, CurrentOp, HostInfo, MasterDoc,
    NamespaceEntry, NamespaceOptions, ReplicaSetStatus, ServerStatus, ShardList,
};

/// Opens one direct (non-discovering) driver client per host.
pub struct MongoConnectionFactory {
    connect_timeout: Duration,
    server_selection_timeout: Duration,
}

impl MongoConnectionFactory {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(config.connect_timeout_seconds),
            server_selection_timeout: Duration::from_secs(config.server_selection_timeout_seconds),
        }
    }

    fn connection_uri(host: &str) -> String {
        if host.starts_with("mongodb://") || host.starts_with("mongodb+srv://") {
            host.to_string()
        } else {
            format!("mongodb://{}/?directConnection=true", host)
        }
    }
}

#[async_trait]
impl ConnectionFactory for MongoConnectionFactory {
    async fn connect(&self, host: &str) -> Result<Arc<dyn AdminConnection>, ConnectError> {
        let uri = Self::connection_uri(host);
        let mut options = ClientOptions::parse(&uri)
            .await
            .map_err(|e| ConnectError::InvalidHost {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        options.app_name = Some(defaults::APP_NAME.to_string());
        options.connect_timeout = Some(self.connect_timeout);
        options.server_selection_timeout = Some(self.server_selection_timeout);

        let client = Client::with_options(options).map_err(|e| ConnectError::InvalidHost {
            host: host.to_string(),
            reason: e.to_string(),
        })?;

        // The driver connects lazily; ping so an unreachable host fails here
        // and not on the first real query.
        client
            .database(ADMIN_DB)
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| ConnectError::Unreachable {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        debug!("Connected to {}", host);

        Ok(Arc::new(MongoConnection {
            host: host.to_string(),
            client,
        }))
    }
}

pub struct MongoConnection {
    host: String,
    client: Client,
}

impl MongoConnection {
    async fn run<T: DeserializeOwned>(
        &self,
        db: &str,
        command: Document,
        name: &str,
    ) -> Result<T, QueryError> {
        let reply = self
            .client
            .database(db)
            .run_command(command, None)
            .await
            .map_err(|e| self.unavailable(name, e))?;

        bson::from_document(reply).map_err(|e| QueryError::Decode {
            host: self.host.clone(),
            command: name.to_string(),
            reason: e.to_string(),
        })
    }

    fn unavailable(&self, command: &str, err: impl std::fmt::Display) -> QueryError {
        QueryError::Unavailable {
            host: self.host.clone(),
            command: command.to_string(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl AdminConnection for MongoConnection {
    fn host(&self) -> &str {
        &self.host
    }

    async fn list_shards(&self) -> Result<ShardList, QueryError> {
        self.run(ADMIN_DB, doc! { "listShards": 1 }, "listShards")
            .await
            .map_err(|e| match e {
                QueryError::Unavailable { host, reason, .. } => {
                    QueryError::NotARouter { host, reason }
                }
                other => other,
            })
    }

    async fn is_master(&self) -> Result<MasterDoc, QueryError> {
        self.run(ADMIN_DB, doc! { "isMaster": 1 }, "isMaster").await
    }

    async fn replica_set_status(&self) -> Result<ReplicaSetStatus, QueryError> {
        self.run(ADMIN_DB, doc! { "replSetGetStatus": 1 }, "replSetGetStatus")
            .await
    }

    async fn server_status(&self) -> Result<ServerStatus, QueryError> {
        self.run(
            ADMIN_DB,
            doc! { "serverStatus": 1, "recordStats": 1 },
            "serverStatus",
        )
        .await
    }

    async fn build_info(&self) -> Result<BuildInfo, QueryError> {
        self.run(ADMIN_DB, doc! { "buildInfo": 1 }, "buildInfo").await
    }

    async fn command_line_options(&self) -> Result<CommandLineOptions, QueryError> {
        self.run(ADMIN_DB, doc! { "getCmdLineOpts": 1 }, "getCmdLineOpts")
            .await
    }

    async fn host_info(&self) -> Result<HostInfo, QueryError> {
        self.run(ADMIN_DB, doc! { "hostInfo": 1 }, "hostInfo").await
    }

    async fn current_op(&self) -> Result<CurrentOp, QueryError> {
        self.run(ADMIN_DB, doc! { "currentOp": 1 }, "currentOp").await
    }

    async fn database_names(&self) -> Result<Vec<String>, QueryError> {
        self.client
            .list_database_names(None, None)
            .await
            .map_err(|e| self.unavailable("listDatabases", e))
    }

    async fn collection_names(&self, db: &str) -> Result<Vec<String>, QueryError> {
        self.client
            .database(db)
            .list_collection_names(None)
            .await
            .map_err(|e| self.unavailable("listCollections", e))
    }

    async fn count_collection(&self, db: &str, collection: &str) -> Result<u64, QueryError> {
        self.client
            .database(db)
            .collection::<Document>(collection)
            .count_documents(None, None)
            .await
            .map_err(|e| self.unavailable("count", e))
    }

    async fn namespace_lookup(
        &self,
        db: &str,
        collection: &str,
    ) -> Result<Option<NamespaceEntry>, QueryError> {
        let mut cursor = self
            .client
            .database(db)
            .list_collections(doc! { "name": collection }, None)
            .await
            .map_err(|e| self.unavailable("listCollections", e))?;

        let spec = cursor
            .try_next()
            .await
            .map_err(|e| self.unavailable("listCollections", e))?;

        Ok(spec.map(|spec| NamespaceEntry {
            name: spec.name,
            options: NamespaceOptions {
                capped: spec.options.capped.unwrap_or(false),
                size: spec
                    .options
                    .size
                    .and_then(|size| i64::try_from(size).ok())
                    .unwrap_or(0),
            },
        }))
    }

    async fn collection_stats(
        &self,
        db: &str,
        collection: &str,
    ) -> Result<CollectionStats, QueryError> {
        self.run(db, doc! { "collStats": collection }, "collStats")
            .await
    }

    async fn find_one(
        &self,
        db: &str,
        collection: &str,
        filter: Document,
        sort: Document,
    ) -> Result<Option<Document>, QueryError> {
        let options = FindOneOptions::builder().sort(sort).build();
        self.client
            .database(db)
            .collection::<Document>(collection)
            .find_one(filter, options)
            .await
            .map_err(|e| self.unavailable("find", e))
    }
}
