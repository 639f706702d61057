//! Topology discovery
//!
//! Classifies the seed host and works out which hosts must be queried one by
//! one to describe the whole deployment.

mod classifier;
mod resolver;

pub use classifier::{classify, NodeRole};
pub use resolver::{representative_host, resolve_hosts, HostSet};
