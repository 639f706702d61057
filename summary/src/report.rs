//! Fixed-width text report

use chrono::{DateTime, Utc};
use std::fmt;

use crate::collector::ClusterSummary;
use crate::oplog::OplogWindow;
use crate::sampler::TimedStats;

const RULE_WIDTH: usize = 94;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Render the whole report
pub fn render(summary: &ClusterSummary) -> String {
    Report(summary).to_string()
}

struct Report<'a>(&'a ClusterSummary);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        write_instances(f, summary)?;
        write_this_host(f, summary)?;
        write_running_ops(f, summary)?;
        write_security(f, summary)?;
        write_oplog(f, &summary.oplog_windows)
    }
}

fn header(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let label = format!("# {} ", title);
    let fill = RULE_WIDTH.saturating_sub(label.len());
    writeln!(f, "{}{}", label, "#".repeat(fill))
}

fn field(f: &mut fmt::Formatter<'_>, name: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "{:>25} | {}", name, value)
}

fn time_or_blank(time: Option<&DateTime<Utc>>) -> String {
    time.map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn write_instances(f: &mut fmt::Formatter<'_>, summary: &ClusterSummary) -> fmt::Result {
    writeln!(f)?;
    header(f, "Instances")?;
    writeln!(f, "{:<5} {:<30} {:<30} {:>10}", "ID", "Host", "Type", "ReplSet")?;
    if summary.replica_members.is_empty() {
        writeln!(f, "{:>62}", "No replica sets found")?;
    } else {
        for member in &summary.replica_members {
            writeln!(
                f,
                "{:>3}   {:<30} {:<30} {:>10}",
                member.id, member.name, member.state_str, member.set
            )?;
        }
    }
    writeln!(f)
}

fn write_this_host(f: &mut fmt::Formatter<'_>, summary: &ClusterSummary) -> fmt::Result {
    let process = summary.process_info.as_ref();
    let status = summary.server_status.as_ref();
    let host = summary.host_info.as_ref();

    header(f, "This host")?;
    header(f, "Mongo Executable")?;
    field(
        f,
        "Path to executable",
        process.map(|p| p.executable.as_str()).unwrap_or(""),
    )?;
    header(f, &format!("Report On {}", summary.seed_host))?;
    field(f, "User", process.map(|p| p.owner.as_str()).unwrap_or(""))?;
    field(
        f,
        "PID",
        status.map(|s| s.pid.to_string()).unwrap_or_default(),
    )?;
    field(f, "Time", Utc::now().format(TIME_FORMAT))?;
    field(
        f,
        "Hostname",
        host.map(|h| h.system.hostname.as_str()).unwrap_or(""),
    )?;
    field(
        f,
        "Version",
        summary
            .build_info
            .as_ref()
            .map(|b| b.version.as_str())
            .or(status.map(|s| s.version.as_str()))
            .unwrap_or(""),
    )?;
    field(
        f,
        "Built On",
        host.map(|h| format!("{} {}", h.os.os_type, h.system.cpu_arch))
            .unwrap_or_default(),
    )?;
    field(f, "Started", time_or_blank(process.map(|p| &p.start_time)))?;
    field(f, "Databases", summary.catalog.databases)?;
    field(f, "Collections", summary.catalog.collections)?;
    field(
        f,
        "Processes",
        summary
            .active_operations
            .map(|n| n.to_string())
            .unwrap_or_default(),
    )?;
    field(
        f,
        "ReplSet",
        status
            .and_then(|s| s.repl.as_ref())
            .map(|r| r.set_name.as_str())
            .unwrap_or(""),
    )?;
    field(
        f,
        "Repl Status",
        summary
            .replica_state
            .map(|state| state.to_string())
            .unwrap_or_default(),
    )?;
    field(
        f,
        "Storage Engine",
        status
            .and_then(|s| s.storage_engine.as_ref())
            .map(|e| e.name.as_str())
            .unwrap_or(""),
    )?;
    field(
        f,
        "Process Type",
        summary.node_role.map(|r| r.label()).unwrap_or(""),
    )?;
    field(f, "Hosts Queried", summary.hosts.as_slice().join(", "))
}

fn stats_row(f: &mut fmt::Formatter<'_>, name: &str, stats: &TimedStats) -> fmt::Result {
    writeln!(
        f,
        "{:<9} {:>8}   {:>8}   {:>8}",
        name, stats.min, stats.max, stats.avg
    )
}

fn write_running_ops(f: &mut fmt::Formatter<'_>, summary: &ClusterSummary) -> fmt::Result {
    let ops = &summary.running_ops;
    writeln!(f)?;
    header(f, "Running Ops")?;
    writeln!(f)?;
    writeln!(
        f,
        "Sampled over {} seconds",
        summary.sampling_window.as_secs()
    )?;
    writeln!(f, "{:<9} {:>8}   {:>8}   {:>8}", "Type", "Min", "Max", "Avg")?;
    stats_row(f, "Insert", &ops.insert)?;
    stats_row(f, "Query", &ops.query)?;
    stats_row(f, "Update", &ops.update)?;
    stats_row(f, "Delete", &ops.delete)?;
    stats_row(f, "GetMore", &ops.getmore)?;
    stats_row(f, "Command", &ops.command)
}

fn write_security(f: &mut fmt::Formatter<'_>, summary: &ClusterSummary) -> fmt::Result {
    let security = &summary.security;
    writeln!(f)?;
    header(f, "Security")?;
    field(f, "Users", security.users)?;
    field(f, "Roles", security.roles)?;
    field(f, "Auth", &security.auth)?;
    field(f, "SSL", &security.tls)
}

fn write_oplog(f: &mut fmt::Formatter<'_>, windows: &[OplogWindow]) -> fmt::Result {
    writeln!(f)?;
    header(f, "Oplog")?;
    if windows.is_empty() {
        return writeln!(f, "{:>62}", "Oplog not available");
    }
    for window in windows {
        field(f, "Host", &window.host)?;
        field(f, "Oplog Size", format!("{} Mb", window.size_mb))?;
        field(f, "Oplog Used", format!("{} Mb", window.used_mb))?;
        field(f, "Oplog Length", &window.running)?;
        field(f, "First Entry", window.first.format(TIME_FORMAT))?;
        field(f, "Last Entry", window.last.format(TIME_FORMAT))?;
        field(
            f,
            "Last Election",
            time_or_blank(window.election_time.as_ref()),
        )?;
        writeln!(f)?;
    }
    Ok(())
}
