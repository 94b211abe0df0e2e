//! One poll cycle: fetch the live event, pick out fresh check-ins, notify.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use shared::{Event, Guest};

use crate::config::Config;
use crate::error::TransportError;
use crate::filter::{select_recent, RecencyWindow};
use crate::message;

/// Read side of a poll cycle.
#[async_trait]
pub trait EventSource {
    /// Events currently flagged live upstream. Empty is a normal result.
    async fn live_events(&self) -> Result<Vec<Event>, TransportError>;

    /// All guests registered to the event, check-in state embedded.
    async fn event_guests(&self, event_api_id: &str) -> Result<Vec<Guest>, TransportError>;
}

/// Write side of a poll cycle: delivers one formatted notification.
#[async_trait]
pub trait NotificationSink {
    /// Single delivery attempt, no retry.
    async fn send(&self, text: &str) -> Result<(), TransportError>;
}

/// Outcome counters for a single cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub guests_seen: usize,
    pub selected: usize,
    pub notified: usize,
    pub send_failures: usize,
}

pub struct CheckinNotifier<S, N> {
    source: S,
    sink: N,
    config: Config,
}

impl<S, N> CheckinNotifier<S, N>
where
    S: EventSource,
    N: NotificationSink,
{
    pub fn new(source: S, sink: N, config: Config) -> Self {
        Self {
            source,
            sink,
            config,
        }
    }

    /// Run one fetch → filter → notify cycle against the current clock.
    ///
    /// Holds no state across calls; the caller supplies the window for this
    /// cycle. Collaborator failures are logged and absorbed here so a bad
    /// cycle never escapes into the scheduling loop.
    pub async fn run_tick(&self, window: Duration) -> TickSummary {
        self.run_tick_at(Utc::now(), window).await
    }

    pub(crate) async fn run_tick_at(&self, reference: DateTime<Utc>, window: Duration) -> TickSummary {
        let mut summary = TickSummary::default();

        let events = match self.source.live_events().await {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Failed to fetch live events: {}", e);
                return summary;
            }
        };

        let Some(event) = events.first() else {
            tracing::info!("No live event at the moment");
            return summary;
        };
        if events.len() > 1 {
            // Single-event policy: one live event per cycle.
            tracing::debug!(
                "{} concurrently live events; processing only {:?}",
                events.len(),
                event.name
            );
        }

        tracing::info!("Live event: {} ({})", event.name, event.api_id);

        let guests = match self.source.event_guests(&event.api_id).await {
            Ok(guests) => guests,
            Err(e) => {
                tracing::error!("Failed to fetch guests for {}: {}", event.api_id, e);
                return summary;
            }
        };
        summary.guests_seen = guests.len();
        tracing::info!("Fetched {} guests", guests.len());

        let window = RecencyWindow::ending_at(reference, window);
        let fresh = select_recent(&guests, &window);
        summary.selected = fresh.len();

        if fresh.is_empty() {
            tracing::info!("No new check-ins inside the window");
            return summary;
        }

        tracing::info!("{} new check-ins", fresh.len());

        for guest in fresh {
            let text = message::format_checkin(guest, &event.name, &self.config);
            match self.sink.send(&text).await {
                Ok(()) => {
                    summary.notified += 1;
                    tracing::info!("Notified check-in for {}", guest.name);
                }
                Err(e) => {
                    // One failed delivery must not suppress the rest.
                    summary.send_failures += 1;
                    tracing::error!("Failed to notify check-in for {}: {}", guest.name, e);
                }
            }
        }

        summary
    }
}
