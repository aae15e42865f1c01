//! Background filing monitor: polls the registry on a fixed interval for
//! every watchlist symbol and ingests new filings into the shared store.
//!
//! The loop ticks with [`MissedTickBehavior::Skip`], so a poll cycle that
//! outlasts the interval delays the next tick instead of queueing a burst.
//! `stop` signals the loop through a watch channel; an in-flight cycle is
//! allowed to finish.

mod model;

pub use model::{MonitorConfig, MonitorState};

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::{EdgarClient, FilingStore};
use crate::feed;

struct MonitorInner {
    started_at: Option<chrono::DateTime<chrono::Utc>>,
    last_poll_at: Option<chrono::DateTime<chrono::Utc>>,
    polls_completed: u64,
    filings_ingested: u64,
    errors: u64,
    loop_handle: Option<JoinHandle<()>>,
    shutdown: Option<watch::Sender<bool>>,
}

/// Polls the registry for new filings from a set of watched companies.
///
/// Cloning is cheap; clones share the same loop and counters. `start` and
/// `stop` are idempotent.
#[derive(Clone)]
pub struct FilingMonitor {
    client: EdgarClient,
    store: FilingStore,
    config: Arc<MonitorConfig>,
    inner: Arc<Mutex<MonitorInner>>,
}

impl FilingMonitor {
    pub fn new(client: &EdgarClient, store: &FilingStore, mut config: MonitorConfig) -> Self {
        for symbol in &mut config.watchlist {
            *symbol = symbol.trim().to_uppercase();
        }
        Self {
            client: client.clone(),
            store: store.clone(),
            config: Arc::new(config),
            inner: Arc::new(Mutex::new(MonitorInner {
                started_at: None,
                last_poll_at: None,
                polls_completed: 0,
                filings_ingested: 0,
                errors: 0,
                loop_handle: None,
                shutdown: None,
            })),
        }
    }

    /// Starts the poll loop. The first cycle runs immediately. Calling
    /// `start` on a running monitor is a no-op.
    pub async fn start(&self) {
        let mut guard = self.inner.lock().await;
        if guard.loop_handle.is_some() {
            tracing::debug!("monitor already running");
            return;
        }

        let (tx, mut rx) = watch::channel(false);
        let monitor = self.clone();
        let interval = self.config.poll_interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        monitor.poll_cycle().await;
                    }
                    changed = rx.changed() => {
                        if changed.is_err() || *rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("monitor loop stopped");
        });

        guard.loop_handle = Some(handle);
        guard.shutdown = Some(tx);
        guard.started_at = Some(Utc::now());
        tracing::info!(
            symbols = self.config.watchlist.len(),
            interval_secs = interval.as_secs(),
            "monitor started"
        );
    }

    /// Signals the loop to stop and waits for it to wind down. An in-flight
    /// poll cycle finishes first. Calling `stop` on a stopped monitor is a
    /// no-op.
    pub async fn stop(&self) {
        let (handle, shutdown) = {
            let mut guard = self.inner.lock().await;
            (guard.loop_handle.take(), guard.shutdown.take())
        };
        let Some(handle) = handle else {
            return;
        };
        if let Some(tx) = shutdown {
            let _ = tx.send(true);
        }
        if let Err(err) = handle.await {
            tracing::warn!(error = %err, "monitor loop panicked");
        }
        tracing::info!("monitor stopped");
    }

    /// Stops the loop if running, then starts it again.
    pub async fn restart(&self) {
        self.stop().await;
        self.start().await;
    }

    /// The configuration the monitor was built with.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Snapshot of the monitor's progress.
    pub async fn status(&self) -> MonitorState {
        let guard = self.inner.lock().await;
        MonitorState {
            running: guard.loop_handle.is_some(),
            watchlist: self.config.watchlist.clone(),
            started_at: guard.started_at,
            last_poll_at: guard.last_poll_at,
            polls_completed: guard.polls_completed,
            filings_ingested: guard.filings_ingested,
            errors: guard.errors,
        }
    }

    /// One poll cycle over the whole watchlist. A symbol that fails outright
    /// is counted and skipped; the cycle always completes and stamps
    /// `last_poll_at`.
    async fn poll_cycle(&self) {
        let mut ingested = 0u64;
        let mut errors = 0u64;
        for symbol in &self.config.watchlist {
            match feed::ingest_recent(
                &self.client,
                &self.store,
                symbol,
                &self.config.watched_forms,
                self.config.max_filings_per_poll,
            )
            .await
            {
                Ok((processed, failed)) => {
                    ingested += processed;
                    errors += failed;
                    if processed > 0 {
                        tracing::info!(symbol = symbol.as_str(), processed, "ingested new filings");
                    }
                }
                Err(err) => {
                    errors += 1;
                    tracing::warn!(symbol = symbol.as_str(), error = %err, "poll failed for symbol");
                }
            }
        }

        let mut guard = self.inner.lock().await;
        guard.last_poll_at = Some(Utc::now());
        guard.polls_completed += 1;
        guard.filings_ingested += ingested;
        guard.errors += errors;
    }
}
