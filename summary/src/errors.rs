//! Error types for topology discovery and per-host collection
//!
//! Each component owns a small error enum so callers can tell apart the
//! failures that abort a run (seed unreachable, security inspection) from the
//! ones that only remove a single host's contribution.

use thiserror::Error;

/// A host could not be reached at all.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The host string could not be turned into a connection target
    #[error("invalid host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    /// The host did not answer
    #[error("cannot connect to {host}: {reason}")]
    Unreachable { host: String, reason: String },
}

/// A single administrative read failed on a reachable host.
#[derive(Debug, Error)]
pub enum QueryError {
    /// `listShards` was rejected; the host is not a router
    #[error("{host} is not a router: {reason}")]
    NotARouter { host: String, reason: String },

    /// The command does not apply to this host (e.g. replica status on a standalone)
    #[error("'{command}' is not available on {host}: {reason}")]
    Unavailable {
        host: String,
        command: String,
        reason: String,
    },

    /// The response arrived but did not match the expected document shape
    #[error("cannot decode '{command}' response from {host}: {reason}")]
    Decode {
        host: String,
        command: String,
        reason: String,
    },
}

/// Host discovery failed.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("seed host is unreachable")]
    SeedUnreachable(#[source] ConnectError),
}

/// The oplog window of one host could not be computed.
#[derive(Debug, Error)]
pub enum OplogError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Neither oplog naming convention exists on the host
    #[error("no oplog on {host}: neither master/slave nor replica set replication detected")]
    Unavailable { host: String },

    #[error(transparent)]
    Query(#[from] QueryError),

    /// The oplog collection exists but holds no entries
    #[error("oplog collection local.{collection} on {host} is empty")]
    Empty { host: String, collection: String },

    /// The first entry is newer than the last one
    #[error("oplog on {host} reports first entry at {first} after last entry at {last}")]
    Inconsistent { host: String, first: i64, last: i64 },
}

/// Security posture could not be established.
#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("cannot get command line options")]
    CommandLineOptions(#[source] QueryError),

    #[error("cannot get users count")]
    UsersCount(#[source] QueryError),

    #[error("cannot get roles count")]
    RolesCount(#[source] QueryError),
}

/// Failures that abort the whole summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("cannot resolve deployment topology")]
    Topology(#[from] TopologyError),

    #[error("cannot open seed connection")]
    Connect(#[from] ConnectError),

    #[error("cannot inspect security settings")]
    Security(#[from] SecurityError),
}
