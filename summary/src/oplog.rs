//! Oplog replication window
//!
//! For each host: where the oplog lives, how big it may grow, how much of it is
//! used and the time span between its oldest and newest entries. The span is
//! how far a secondary can fall behind before it needs a full resync.

use bson::doc;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::oplog::{
    BYTES_PER_MB, COLLECTION_CANDIDATES, DATABASE, DAY_FORMAT_THRESHOLD_HOURS, PRIMARY_STATE,
    SECONDS_PER_HOUR,
};
use crate::db::{AdminConnection, ConnectionFactory};
use crate::errors::{OplogError, QueryError};
use crate::fanout::fan_out;
use crate::proto::{NamespaceEntry, OplogRow};
use crate::topology::HostSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OplogWindow {
    pub host: String,
    pub collection: String,
    /// Configured capacity
    pub size_mb: i64,
    pub used_mb: i64,
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
    pub elapsed_seconds: i64,
    pub elapsed_hours: f64,
    /// `elapsed_hours` in human readable form
    pub running: String,
    pub captured_at: DateTime<Utc>,
    /// When the current primary was elected, if the host knows one
    pub election_time: Option<DateTime<Utc>>,
}

/// Seconds part of an encoded BSON timestamp; the low 32 bits are an
/// ordinal within the second and carry no time.
pub fn timestamp_seconds(encoded: u64) -> i64 {
    (encoded >> 32) as i64
}

pub fn timestamp_to_datetime(encoded: u64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp_seconds(encoded), 0).unwrap_or_default()
}

/// `"N days"` (truncated) from 24 hours on, `"H.HH hours"` below.
pub fn format_running(hours: f64) -> String {
    if hours >= DAY_FORMAT_THRESHOLD_HOURS {
        format!("{} days", (hours / 24.0).trunc() as i64)
    } else {
        format!("{:.2} hours", hours)
    }
}

/// Compute the oplog window of the host behind `conn`.
pub async fn compute_oplog_window(conn: &dyn AdminConnection) -> Result<OplogWindow, OplogError> {
    let host = conn.host().to_string();

    let entry = find_oplog_collection(conn).await?;
    let collection = entry.name.clone();

    let stats = conn.collection_stats(DATABASE, &collection).await?;

    let first = read_edge_row(conn, &collection, 1).await?;
    let last = read_edge_row(conn, &collection, -1).await?;

    let first_seconds = timestamp_seconds(first.ts);
    let last_seconds = timestamp_seconds(last.ts);
    if first_seconds > last_seconds {
        return Err(OplogError::Inconsistent {
            host,
            first: first_seconds,
            last: last_seconds,
        });
    }

    let elapsed_seconds = last_seconds - first_seconds;
    let elapsed_hours = elapsed_seconds as f64 / SECONDS_PER_HOUR;

    let election_time = primary_election_time(conn).await;

    Ok(OplogWindow {
        host,
        collection,
        size_mb: entry.options.size / BYTES_PER_MB,
        used_mb: stats.size / BYTES_PER_MB,
        first: timestamp_to_datetime(first.ts),
        last: timestamp_to_datetime(last.ts),
        elapsed_seconds,
        elapsed_hours,
        running: format_running(elapsed_hours),
        captured_at: Utc::now(),
        election_time,
    })
}

/// Probe the known oplog names in order; the first one present wins.
async fn find_oplog_collection(conn: &dyn AdminConnection) -> Result<NamespaceEntry, OplogError> {
    for name in COLLECTION_CANDIDATES {
        if let Some(entry) = conn.namespace_lookup(DATABASE, name).await? {
            debug!("Found oplog {}.{} on {}", DATABASE, name, conn.host());
            return Ok(entry);
        }
    }
    Err(OplogError::Unavailable {
        host: conn.host().to_string(),
    })
}

/// Oldest (`order = 1`) or newest (`order = -1`) entry in natural order
async fn read_edge_row(
    conn: &dyn AdminConnection,
    collection: &str,
    order: i32,
) -> Result<OplogRow, OplogError> {
    let row = conn
        .find_one(DATABASE, collection, doc! {}, doc! { "$natural": order })
        .await?
        .ok_or_else(|| OplogError::Empty {
            host: conn.host().to_string(),
            collection: collection.to_string(),
        })?;

    bson::from_document(row).map_err(|e| {
        OplogError::Query(QueryError::Decode {
            host: conn.host().to_string(),
            command: "find".to_string(),
            reason: e.to_string(),
        })
    })
}

async fn primary_election_time(conn: &dyn AdminConnection) -> Option<DateTime<Utc>> {
    match conn.replica_set_status().await {
        Ok(status) => status
            .members
            .iter()
            .find(|member| member.state == PRIMARY_STATE)
            .map(|primary| timestamp_to_datetime(primary.election_time)),
        Err(e) => {
            debug!("No election time for {}: {}", conn.host(), e);
            None
        }
    }
}

/// Oplog windows of every host that has one, smallest window first.
/// Hosts without a usable oplog are left out.
pub async fn collect_oplog_windows(
    factory: &dyn ConnectionFactory,
    hosts: &HostSet,
    concurrency: usize,
) -> Vec<OplogWindow> {
    let results = fan_out(hosts.as_slice(), concurrency, |host| async move {
        let conn = factory.connect(&host).await?;
        compute_oplog_window(conn.as_ref()).await
    })
    .await;

    let mut windows = Vec::new();
    for (host, result) in results {
        match result {
            Ok(window) => windows.push(window),
            Err(OplogError::Unavailable { .. }) => debug!("{} has no oplog", host),
            Err(e) => warn!("Cannot compute oplog window for {}: {}", host, e),
        }
    }

    windows.sort_by(|a, b| a.elapsed_hours.total_cmp(&b.elapsed_hours));
    windows
}
