//! Local process-table lookups for the server process
//!
//! Only meaningful when the seed host runs on this machine; a PID that does
//! not resolve simply leaves the process fields out of the report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sysinfo::{Pid, System, Users};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub start_time: DateTime<Utc>,
    pub executable: String,
    pub owner: String,
}

pub trait ProcessInspector: Send + Sync {
    fn resolve(&self, pid: u32) -> Option<ProcessInfo>;
}

/// Reads the process table of the local machine
#[derive(Debug, Default)]
pub struct SystemProcessInspector;

impl ProcessInspector for SystemProcessInspector {
    fn resolve(&self, pid: u32) -> Option<ProcessInfo> {
        let pid_handle = Pid::from_u32(pid);
        let mut sys = System::new();
        if !sys.refresh_process(pid_handle) {
            return None;
        }
        let process = sys.process(pid_handle)?;

        let users = Users::new_with_refreshed_list();
        let owner = process
            .user_id()
            .and_then(|uid| users.get_user_by_id(uid))
            .map(|user| user.name().to_string())
            .unwrap_or_default();

        let executable = process
            .exe()
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        let start_time = i64::try_from(process.start_time())
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_default();

        Some(ProcessInfo {
            pid,
            start_time,
            executable,
            owner,
        })
    }
}
