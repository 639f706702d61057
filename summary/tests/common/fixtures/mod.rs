//! Reusable test utilities:
//! - In-memory deployment answering the administrative commands
//! - Builders for replies and common test data

// Each test binary only uses part of the fixtures
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fake_cluster;
pub mod test_data;

pub use fake_cluster::{FakeCluster, FakeNode, FakeOplog, FakeProcesses};
pub use test_data::*;
