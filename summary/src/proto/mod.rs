//! Typed shapes of the administrative command replies
//!
//! Only the fields the summary consumes are modeled. Numeric fields that the
//! server may send as int32, int64 or double go through [`serde_helpers`].

mod cmd_line;
mod current_op;
mod host_info;
mod master;
mod oplog;
mod replica;
mod server_status;
pub mod serde_helpers;
mod shards;

pub use cmd_line::{CommandLineOptions, NetOptions, ParsedOptions, SecurityOptions, TlsOptions};
pub use current_op::{CurrentOp, InProgressOp};
pub use host_info::{HostInfo, HostOs, HostSystem};
pub use master::{BuildInfo, MasterDoc};
pub use oplog::{CollectionStats, NamespaceEntry, NamespaceOptions, OplogRow};
pub use replica::{ReplicaMember, ReplicaSetStatus};
pub use server_status::{Connections, OpCounterValues, ReplInfo, ServerStatus, StorageEngine};
pub use shards::{Shard, ShardList};
