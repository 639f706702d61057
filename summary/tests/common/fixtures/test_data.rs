//! Common test data and reply builders

use bson::Timestamp;
use mongodb_summary::config::{AverageMode, RunConfig};
use mongodb_summary::proto::{
    CommandLineOptions, MasterDoc, NetOptions, ParsedOptions, ReplicaMember, ReplicaSetStatus,
    SecurityOptions, Shard, TlsOptions,
};

/// Common test hosts
pub mod hosts {
    pub const ROUTER: &str = "localhost:27017";
    pub const STANDALONE: &str = "localhost:27018";
    pub const A1: &str = "localhost:17001";
    pub const A2: &str = "localhost:17002";
    pub const A3: &str = "localhost:17003";
    pub const B1: &str = "localhost:18001";
    pub const B2: &str = "localhost:18002";
    pub const B3: &str = "localhost:18003";
}

/// BSON timestamp at `seconds` with the given ordinal
pub fn ts(seconds: u32, ordinal: u32) -> Timestamp {
    Timestamp {
        time: seconds,
        increment: ordinal,
    }
}

pub fn shard(id: &str, host: &str) -> Shard {
    Shard {
        id: id.to_string(),
        host: host.to_string(),
    }
}

pub fn router_master() -> MasterDoc {
    MasterDoc {
        msg: Some("isdbgrid".to_string()),
        ismaster: true,
        ..Default::default()
    }
}

pub fn replset_master(set: &str, hosts: &[&str]) -> MasterDoc {
    MasterDoc {
        set_name: Some(set.to_string()),
        hosts: Some(hosts.iter().map(|h| h.to_string()).collect()),
        ismaster: true,
        ..Default::default()
    }
}

pub fn member(id: i64, name: &str, state: i32, state_str: &str) -> ReplicaMember {
    ReplicaMember {
        id,
        name: name.to_string(),
        health: 1.0,
        state,
        state_str: state_str.to_string(),
        ..Default::default()
    }
}

/// Three-member set; the first host is primary, elected at `election_secs`
pub fn replica_status(set: &str, hosts: [&str; 3], election_secs: u32) -> ReplicaSetStatus {
    let mut primary = member(0, hosts[0], 1, "PRIMARY");
    primary.election_time = u64::from(election_secs) << 32;
    ReplicaSetStatus {
        set: set.to_string(),
        my_state: 1,
        members: vec![
            primary,
            member(1, hosts[1], 2, "SECONDARY"),
            member(2, hosts[2], 2, "SECONDARY"),
        ],
    }
}

pub fn cmd_line(authorization: &str, key_file: &str, tls_mode: Option<&str>) -> CommandLineOptions {
    CommandLineOptions {
        argv: vec!["mongod".to_string()],
        parsed: ParsedOptions {
            net: NetOptions {
                bind_ip: None,
                tls: tls_mode.map(|mode| TlsOptions {
                    mode: mode.to_string(),
                }),
                ssl: None,
            },
            security: SecurityOptions {
                authorization: authorization.to_string(),
                key_file: key_file.to_string(),
            },
        },
    }
}

/// Configuration with a zero sample interval so runs finish at once
pub fn fast_config(seed: &str) -> RunConfig {
    RunConfig {
        seed_host: seed.to_string(),
        sample_count: 3,
        sample_interval_seconds: 0,
        max_concurrent_hosts: 4,
        average_mode: AverageMode::Configured,
        ..Default::default()
    }
}
