//! Drives the poller on a fixed period until the target is found.

use std::time::Duration;

use chrono::Local;
use shared::Topping;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, MissedTickBehavior};

use crate::catalog::CatalogSource;
use crate::notifier::Notifier;
use crate::poller::{AvailabilityPoller, CycleOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    /// Terminal: the timer has been dropped and no further cycles run
    Stopped,
}

/// Returned once the scheduler stops.
#[derive(Debug, Clone)]
pub struct WatchSummary {
    /// Number of poll cycles executed, including the successful one
    pub cycles: u64,
    pub found: Topping,
}

pub struct WatchScheduler<C, N> {
    poller: AvailabilityPoller<C, N>,
    interval: Duration,
    state: watch::Sender<SchedulerState>,
}

impl<C, N> WatchScheduler<C, N>
where
    C: CatalogSource + 'static,
    N: Notifier + 'static,
{
    pub fn new(poller: AvailabilityPoller<C, N>, interval: Duration) -> Self {
        let (state, _) = watch::channel(SchedulerState::Running);
        Self {
            poller,
            interval,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
        self.state.subscribe()
    }

    /// Poll immediately, then once per interval, until a cycle finds the
    /// target.
    ///
    /// Cycles run one after another on this task, so they never overlap. If a
    /// cycle overruns the period the missed ticks are skipped rather than
    /// fired back to back.
    pub async fn run(mut self) -> WatchSummary {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!("Scheduler started (interval: {:?})", self.interval);

        let mut cycles = 0;
        loop {
            ticker.tick().await;
            cycles += 1;
            tracing::debug!("Running poll cycle {}", cycles);

            if let CycleOutcome::Found(found) = self.poller.poll_once().await {
                self.state.send_replace(SchedulerState::Stopped);
                tracing::info!("Target found after {} checks, scheduler stopped", cycles);
                return WatchSummary { cycles, found };
            }

            tracing::info!("Next check at {}", next_check(self.interval));
        }
    }

    /// Run the scheduler as a background task.
    pub fn spawn(self) -> SchedulerHandle {
        let state = self.subscribe();
        let task = tokio::spawn(self.run());
        SchedulerHandle { state, task }
    }
}

fn next_check(interval: Duration) -> String {
    chrono::Duration::from_std(interval)
        .ok()
        .and_then(|delta| Local::now().checked_add_signed(delta))
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| format!("{:?} from now", interval))
}

/// Handle to a spawned [`WatchScheduler`].
pub struct SchedulerHandle {
    state: watch::Receiver<SchedulerState>,
    task: JoinHandle<WatchSummary>,
}

impl SchedulerHandle {
    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    /// Cancel the scheduler from outside; used on process shutdown.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait until the scheduler stops on its own (or is aborted).
    pub async fn stopped(&mut self) -> Result<WatchSummary, JoinError> {
        (&mut self.task).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WatchTarget;
    use crate::poller::tests::{
        in_stock, sold_out, unauthorized, RecordingNotifier, ScriptedCatalog,
    };
    use tokio::time::Instant;

    const INTERVAL: Duration = Duration::from_secs(15 * 60);

    fn scheduler(
        catalog: &ScriptedCatalog,
        notifier: &RecordingNotifier,
    ) -> WatchScheduler<ScriptedCatalog, RecordingNotifier> {
        let poller =
            AvailabilityPoller::new(catalog.clone(), notifier.clone(), WatchTarget::default());
        WatchScheduler::new(poller, INTERVAL)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_cycle_runs_immediately() {
        let catalog = ScriptedCatalog::replying(in_stock);
        let notifier = RecordingNotifier::new();
        let start = Instant::now();

        let summary = scheduler(&catalog, &notifier).run().await;

        assert_eq!(summary.cycles, 1);
        assert_eq!(summary.found.description, "Auto Piloto");
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keeps_ticking_through_errors() {
        let catalog = ScriptedCatalog::replying(unauthorized)
            .then(sold_out)
            .then(unauthorized)
            .then(in_stock);
        let notifier = RecordingNotifier::new();
        let start = Instant::now();

        let summary = scheduler(&catalog, &notifier).run().await;

        assert_eq!(summary.cycles, 4);
        assert_eq!(catalog.calls(), 4);
        assert_eq!(start.elapsed(), INTERVAL * 3);

        // two error reports and one "found"
        let sent = notifier.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent[0].contains("401"));
        assert!(sent[2].contains("Auto Piloto"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_after_found() {
        let catalog = ScriptedCatalog::replying(sold_out).then(in_stock);
        let notifier = RecordingNotifier::new();

        let mut handle = scheduler(&catalog, &notifier).spawn();
        assert_eq!(handle.state(), SchedulerState::Running);

        let summary = handle.stopped().await.expect("scheduler task completes");
        assert_eq!(summary.cycles, 2);
        assert_eq!(handle.state(), SchedulerState::Stopped);

        time::sleep(INTERVAL * 10).await;
        assert_eq!(catalog.calls(), 2);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_cancels_running_scheduler() {
        let catalog = ScriptedCatalog::replying(sold_out);
        let notifier = RecordingNotifier::new();

        let mut handle = scheduler(&catalog, &notifier).spawn();
        time::sleep(INTERVAL * 2 + Duration::from_secs(1)).await;
        assert_eq!(catalog.calls(), 3);

        handle.abort();
        let err = handle.stopped().await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(handle.state(), SchedulerState::Running);

        time::sleep(INTERVAL * 5).await;
        assert_eq!(catalog.calls(), 3);
        assert!(notifier.sent().is_empty());
    }
}
