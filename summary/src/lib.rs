// File: summary/src/lib.rs
//! Diagnostic summary of a MongoDB deployment
//!
//! Starting from one seed host, discovers the hosts behind it, reads
//! membership, oplog, operation-rate and security information from them and
//! renders a single text report.

pub mod catalog;
pub mod collector;
pub mod config;
pub mod constants;
pub mod db;
pub mod errors;
pub mod fanout;
pub mod oplog;
pub mod process;
pub mod proto;
pub mod replica;
pub mod report;
pub mod sampler;
pub mod security;
pub mod topology;

pub use collector::{collect_summary, ClusterSummary};
pub use config::{AverageMode, ConfigManager, RunConfig};
pub use db::{AdminConnection, ConnectionFactory, MongoConnectionFactory};
pub use errors::{ConnectError, OplogError, QueryError, SecurityError, SummaryError, TopologyError};
pub use process::{ProcessInspector, SystemProcessInspector};
