//! Central repository for names, sentinels and defaults
//!
//! Organized by category so the collectors and the configuration layer share
//! one source of truth.

/// Values reported by the server that drive classification
pub mod topology {
    /// `msg` field of an `isMaster` reply sent by a router
    pub const ROUTER_SENTINEL: &str = "isdbgrid";

    /// Database that accepts cluster-level administrative commands
    pub const ADMIN_DB: &str = "admin";
}

/// Oplog layout
pub mod oplog {
    /// Database holding the oplog
    pub const DATABASE: &str = "local";

    /// Collection names probed in order; the first one present wins.
    /// `oplog.rs` is used by replica sets, `oplog.$main` by legacy master/slave.
    pub const COLLECTION_CANDIDATES: [&str; 2] = ["oplog.rs", "oplog.$main"];

    /// Replica member state code of a primary
    pub const PRIMARY_STATE: i32 = 1;

    /// Bytes per reported megabyte
    pub const BYTES_PER_MB: i64 = 1024 * 1024;

    pub const SECONDS_PER_HOUR: f64 = 3600.0;

    /// Windows at or above this many hours are reported in days
    pub const DAY_FORMAT_THRESHOLD_HOURS: f64 = 24.0;
}

/// Security collections and labels
pub mod security {
    pub const USERS_COLLECTION: &str = "system.users";
    pub const ROLES_COLLECTION: &str = "system.roles";

    pub const ENABLED: &str = "enabled";
    pub const DISABLED: &str = "disabled";
}

/// Default configuration values
pub mod defaults {
    pub const SEED_HOST: &str = "localhost:27017";

    /// Number of serverStatus readings taken by the sampler
    pub const SAMPLE_COUNT: u32 = 5;

    pub const SAMPLE_INTERVAL_SECONDS: u64 = 1;

    /// Largest accepted gap between two readings
    pub const MAX_SAMPLE_INTERVAL_SECONDS: u64 = 3600;

    /// Hosts queried at the same time during fan-out
    pub const MAX_CONCURRENT_HOSTS: usize = 8;

    pub const CONNECT_TIMEOUT_SECONDS: u64 = 10;

    pub const SERVER_SELECTION_TIMEOUT_SECONDS: u64 = 10;

    /// Driver application name reported to the server
    pub const APP_NAME: &str = "mongodb-summary";
}
