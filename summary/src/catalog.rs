//! Database and collection counts across the host set

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

use crate::db::ConnectionFactory;
use crate::fanout::fan_out;
use crate::topology::HostSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub databases: usize,
    pub collections: usize,
}

/// Count distinct database names and `db.collection` namespaces over every
/// reachable host. A database whose collections cannot be listed still counts.
pub async fn count_catalog(
    factory: &dyn ConnectionFactory,
    hosts: &HostSet,
    concurrency: usize,
) -> CatalogCounts {
    let results = fan_out(hosts.as_slice(), concurrency, |host| async move {
        let conn = factory.connect(&host).await.map_err(|e| e.to_string())?;
        let databases = conn.database_names().await.map_err(|e| e.to_string())?;

        let mut namespaces = Vec::new();
        for db in &databases {
            match conn.collection_names(db).await {
                Ok(names) => namespaces.extend(names.into_iter().map(|c| format!("{}.{}", db, c))),
                Err(e) => warn!("Cannot list collections of {} on {}: {}", db, host, e),
            }
        }
        Ok::<_, String>((databases, namespaces))
    })
    .await;

    let mut databases = BTreeSet::new();
    let mut collections = BTreeSet::new();
    for (host, result) in results {
        match result {
            Ok((dbs, namespaces)) => {
                databases.extend(dbs);
                collections.extend(namespaces);
            }
            Err(e) => warn!("Skipping catalog of {}: {}", host, e),
        }
    }

    CatalogCounts {
        databases: databases.len(),
        collections: collections.len(),
    }
}
