//! Security posture of the seed host

use serde::Serialize;
use tracing::debug;

use crate::constants::security::{DISABLED, ENABLED, ROLES_COLLECTION, USERS_COLLECTION};
use crate::constants::topology::ADMIN_DB;
use crate::db::AdminConnection;
use crate::errors::SecurityError;
use crate::proto::CommandLineOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityPosture {
    /// `enabled` or `disabled`
    pub auth: String,
    /// Configured TLS mode, or `disabled`
    pub tls: String,
    pub users: u64,
    pub roles: u64,
}

/// Authorization and TLS labels from the startup options.
pub fn posture_labels(opts: &CommandLineOptions) -> (String, String) {
    let security = &opts.parsed.security;
    let auth = if !security.authorization.is_empty() || !security.key_file.is_empty() {
        ENABLED
    } else {
        DISABLED
    };

    let mode = opts.parsed.net.tls_mode();
    let tls = if mode.is_empty() || mode == DISABLED {
        DISABLED
    } else {
        mode
    };

    (auth.to_string(), tls.to_string())
}

/// Inspect authorization, TLS and account counts. Every failure is fatal.
pub async fn inspect_security(conn: &dyn AdminConnection) -> Result<SecurityPosture, SecurityError> {
    let opts = conn
        .command_line_options()
        .await
        .map_err(SecurityError::CommandLineOptions)?;
    let (auth, tls) = posture_labels(&opts);

    let users = conn
        .count_collection(ADMIN_DB, USERS_COLLECTION)
        .await
        .map_err(SecurityError::UsersCount)?;
    let roles = conn
        .count_collection(ADMIN_DB, ROLES_COLLECTION)
        .await
        .map_err(SecurityError::RolesCount)?;

    debug!("Security on {}: auth {}, tls {}", conn.host(), auth, tls);

    Ok(SecurityPosture {
        auth,
        tls,
        users,
        roles,
    })
}
