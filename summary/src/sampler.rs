//! Operation-rate sampling
//!
//! Reads the serverStatus operation counters a fixed number of times at a
//! fixed interval and reduces them to min/max/total/average per category.
//! Runs as its own task so host discovery is not held up by the interval.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::config::AverageMode;
use crate::db::AdminConnection;
use crate::proto::OpCounterValues;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimedStats {
    pub min: i64,
    pub max: i64,
    pub total: i64,
    pub avg: i64,
}

impl TimedStats {
    fn seed(value: i64) -> Self {
        Self {
            min: value,
            max: value,
            total: value,
            avg: 0,
        }
    }

    fn record(&mut self, value: i64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.total += value;
    }

    fn finish(&mut self, divisor: i64) {
        self.avg = if divisor > 0 { self.total / divisor } else { 0 };
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OpCounters {
    pub insert: TimedStats,
    pub query: TimedStats,
    pub update: TimedStats,
    pub delete: TimedStats,
    pub getmore: TimedStats,
    pub command: TimedStats,
}

impl OpCounters {
    fn seed(values: &OpCounterValues) -> Self {
        Self {
            insert: TimedStats::seed(values.insert),
            query: TimedStats::seed(values.query),
            update: TimedStats::seed(values.update),
            delete: TimedStats::seed(values.delete),
            getmore: TimedStats::seed(values.getmore),
            command: TimedStats::seed(values.command),
        }
    }

    fn record(&mut self, values: &OpCounterValues) {
        self.insert.record(values.insert);
        self.query.record(values.query);
        self.update.record(values.update);
        self.delete.record(values.delete);
        self.getmore.record(values.getmore);
        self.command.record(values.command);
    }

    fn finish(&mut self, divisor: i64) {
        for stats in [
            &mut self.insert,
            &mut self.query,
            &mut self.update,
            &mut self.delete,
            &mut self.getmore,
            &mut self.command,
        ] {
            stats.finish(divisor);
        }
    }
}

/// Accumulates readings; the first successful reading seeds min and max.
#[derive(Debug, Default)]
struct Accumulator {
    counters: Option<OpCounters>,
    successful: i64,
}

impl Accumulator {
    fn add(&mut self, values: &OpCounterValues) {
        match self.counters.as_mut() {
            Some(counters) => counters.record(values),
            None => self.counters = Some(OpCounters::seed(values)),
        }
        self.successful += 1;
    }

    fn finish(self, sample_count: u32, mode: AverageMode) -> OpCounters {
        let divisor = match mode {
            AverageMode::Configured => i64::from(sample_count),
            AverageMode::Successful => self.successful,
        };
        let mut counters = self.counters.unwrap_or_default();
        counters.finish(divisor);
        counters
    }
}

/// Take `sample_count` readings, the first immediately and the rest one
/// `interval` apart. Failed readings are skipped; in [`AverageMode::Configured`]
/// they still count towards the divisor.
pub async fn sample_op_counters(
    conn: &dyn AdminConnection,
    sample_count: u32,
    every: Duration,
    mode: AverageMode,
) -> OpCounters {
    let mut acc = Accumulator::default();

    read_into(conn, &mut acc).await;

    if sample_count > 1 {
        // A zero period would make the ticker panic.
        let mut ticker = interval(every.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        for _ in 1..sample_count {
            ticker.tick().await;
            read_into(conn, &mut acc).await;
        }
    }

    debug!(
        "Sampled {} of {} opcounter readings on {}",
        acc.successful,
        sample_count,
        conn.host()
    );
    acc.finish(sample_count, mode)
}

async fn read_into(conn: &dyn AdminConnection, acc: &mut Accumulator) {
    match conn.server_status().await {
        Ok(status) => acc.add(&status.opcounters),
        Err(e) => warn!("Skipping opcounter reading on {}: {}", conn.host(), e),
    }
}

/// Run the sampler on its own task; await the handle when assembling results.
pub fn spawn_sampler(
    conn: Arc<dyn AdminConnection>,
    sample_count: u32,
    every: Duration,
    mode: AverageMode,
) -> JoinHandle<OpCounters> {
    tokio::spawn(async move { sample_op_counters(conn.as_ref(), sample_count, every, mode).await })
}
