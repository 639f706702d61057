//! Bounded-concurrency map over a host set
//!
//! Used by every per-host collector. At most `concurrency` hosts are queried
//! at once and results come back in host-set order, so callers never need a
//! shared collection or a lock.

use futures::stream::{self, StreamExt};
use std::future::Future;

pub async fn fan_out<T, F, Fut>(hosts: &[String], concurrency: usize, f: F) -> Vec<(String, T)>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = T>,
{
    stream::iter(hosts.iter().cloned())
        .map(|host| {
            let fut = f(host.clone());
            async move { (host, fut.await) }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}
