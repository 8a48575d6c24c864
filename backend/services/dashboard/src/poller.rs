//! Fixed-interval polling with request sequencing.
//!
//! Every fetch is tagged with an increasing sequence number and runs in its
//! own task, so a slow response never blocks the next tick. A result is only
//! forwarded when it is newer than the last one forwarded. Turning the live
//! flag off aborts whatever is still in flight; turning it on fetches at once.
//! The loop ends when the update receiver or the live-flag sender is dropped.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

/// Hands out sequence numbers and remembers the newest one applied.
#[derive(Debug, Default)]
pub struct Sequencer {
    issued: u64,
    applied: Option<u64>,
}

impl Sequencer {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// `true` if `seq` is newer than anything accepted so far.
    pub fn accept(&mut self, seq: u64) -> bool {
        match self.applied {
            Some(last) if seq <= last => false,
            _ => {
                self.applied = Some(seq);
                true
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollUpdate<T> {
    pub seq: u64,
    pub result: Result<T, String>,
}

pub async fn run_poller<T, E, F, Fut>(
    fetch: F,
    interval: Duration,
    mut live: watch::Receiver<bool>,
    updates: mpsc::Sender<PollUpdate<T>>,
) where
    T: Send + 'static,
    E: Display + Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut sequencer = Sequencer::default();
    let mut in_flight: JoinSet<(u64, Result<T, String>)> = JoinSet::new();

    loop {
        let is_live = *live.borrow();

        tokio::select! {
            _ = ticker.tick(), if is_live => {
                let seq = sequencer.issue();
                let request = fetch();
                in_flight.spawn(async move {
                    (seq, request.await.map_err(|e| e.to_string()))
                });
            }
            changed = live.changed() => {
                if changed.is_err() {
                    break;
                }
                if *live.borrow_and_update() {
                    tracing::debug!("polling resumed");
                    ticker.reset_immediately();
                } else {
                    tracing::debug!(aborted = in_flight.len(), "polling paused");
                    in_flight.abort_all();
                }
            }
            Some(joined) = in_flight.join_next() => {
                let (seq, result) = match joined {
                    Ok(done) => done,
                    Err(e) if e.is_cancelled() => continue,
                    Err(e) => {
                        tracing::warn!(error = %e, "poll task failed");
                        continue;
                    }
                };

                if !sequencer.accept(seq) {
                    tracing::debug!(seq, "discarding stale response");
                    continue;
                }
                if updates.send(PollUpdate { seq, result }).await.is_err() {
                    break;
                }
            }
            _ = updates.closed() => break,
        }
    }

    in_flight.abort_all();
}
