// SPDX-License-Identifier: MPL-2.0

//! Background revalidation: a periodic sweep that force-refreshes the
//! most overdue rows, sequentially to bound upstream request rate.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::MissedTickBehavior;

use crate::engine::CacheEngine;
use crate::mojang::IdentityService;
use crate::store::ProfileStore;

/// Outcome of one sweep pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Rows refreshed successfully.
    pub refreshed: usize,
    /// Rows whose refresh failed and was skipped.
    pub failed: usize,
    /// True when another sweep was already running and this one did nothing.
    pub skipped: bool,
}

/// Drives periodic revalidation of the stalest cache rows.
pub struct Sweeper<S, C> {
    engine: Arc<CacheEngine<S, C>>,
    running: AtomicBool,
}

impl<S, C> Sweeper<S, C>
where
    S: ProfileStore + 'static,
    C: IdentityService + 'static,
{
    pub fn new(engine: Arc<CacheEngine<S, C>>) -> Self {
        Self {
            engine,
            running: AtomicBool::new(false),
        }
    }

    /// Run sweeps forever on the configured interval. The first sweep
    /// happens one full interval after startup.
    pub fn spawn(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let sweeper = Arc::clone(self);
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(sweeper.engine.config().sweep_interval);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            tick.tick().await; // interval fires immediately; skip that one
            loop {
                tick.tick().await;
                let report = sweeper.sweep_once().await;
                tracing::info!(
                    refreshed = report.refreshed,
                    failed = report.failed,
                    skipped = report.skipped,
                    "revalidation sweep finished"
                );
            }
        })
    }

    /// One sweep pass: force-refresh up to the configured batch of rows,
    /// most overdue first, continuing past per-row failures. Overlapping
    /// passes are suppressed, not queued.
    pub async fn sweep_once(&self) -> SweepReport {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("revalidation sweep already running");
            return SweepReport {
                skipped: true,
                ..SweepReport::default()
            };
        }
        let report = self.run_batch().await;
        self.running.store(false, Ordering::Release);
        report
    }

    async fn run_batch(&self) -> SweepReport {
        let mut report = SweepReport::default();
        let rows = match self.engine.store.stalest(self.engine.config().sweep_batch) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "could not read sweep batch");
                return report;
            }
        };

        for row in rows {
            match self.engine.get_or_refresh(&row.id, true).await {
                Ok(_) => report.refreshed += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(id = %row.id, error = %e, "sweep refresh failed, skipping");
                }
            }
        }
        report
    }
}
