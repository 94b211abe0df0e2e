//! Fixed-cadence polling loop.

use tokio::time::{self, MissedTickBehavior};

use crate::config::Config;
use crate::runner::{CheckinNotifier, EventSource, NotificationSink};

pub struct Scheduler<S, N> {
    notifier: CheckinNotifier<S, N>,
    config: Config,
}

impl<S, N> Scheduler<S, N>
where
    S: EventSource,
    N: NotificationSink,
{
    pub fn new(notifier: CheckinNotifier<S, N>, config: Config) -> Self {
        Self { notifier, config }
    }

    /// Poll forever at the configured cadence.
    ///
    /// The first cycle runs immediately with the widened startup window to
    /// cover check-ins that happened while the process was down. Cycles run
    /// strictly one at a time: the timer is only consulted again once the
    /// previous cycle has finished or been abandoned.
    pub async fn run(&self) {
        let steady = self.config.steady_window();
        let mut window = self.config.startup_window();

        tracing::info!(
            "Scheduler started (interval: {}s, window: {}s, startup window: {}s)",
            self.config.poll_interval_secs,
            steady.num_seconds(),
            window.num_seconds()
        );

        let mut ticker = time::interval(self.config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // The first tick completes immediately: that is the startup run.
            ticker.tick().await;
            self.tick(window).await;
            window = steady;
        }
    }

    /// One scheduled invocation, bounded by the configured ceiling.
    ///
    /// An overrunning cycle is abandoned where it stands; in-flight requests
    /// are dropped rather than cancelled. The next cycle is unaffected.
    async fn tick(&self, window: chrono::Duration) {
        match time::timeout(self.config.tick_ceiling(), self.notifier.run_tick(window)).await {
            Ok(summary) => {
                tracing::info!(
                    "Cycle done: {} guests, {} new check-ins, {} notified, {} failed sends",
                    summary.guests_seen,
                    summary.selected,
                    summary.notified,
                    summary.send_failures
                );
            }
            Err(_) => {
                tracing::error!(
                    "Cycle overran its {}s ceiling and was abandoned",
                    self.config.tick_timeout_secs
                );
            }
        }
    }
}
