//! Live board watcher
//!
//! Recomputes the board after every order event and on a refresh tick, and
//! publishes the latest view through a `watch` channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::BoardView;
use crate::orders::OrdersManager;
use shared::order::{OrderEvent, Station};

/// Background task keeping a [`BoardView`] current
pub struct BoardWatcher {
    manager: OrdersManager,
    station: Option<Station>,
    refresh: Duration,
    events: broadcast::Receiver<OrderEvent>,
    tx: watch::Sender<Arc<BoardView>>,
}

impl BoardWatcher {
    pub fn new(
        manager: OrdersManager,
        station: Option<Station>,
        refresh: Duration,
    ) -> (Self, watch::Receiver<Arc<BoardView>>) {
        // Subscribe before the first projection so no event is missed
        let events = manager.subscribe();
        let initial = manager
            .project_board(station)
            .unwrap_or_else(|_| BoardView::empty(manager.now()));
        let (tx, rx) = watch::channel(Arc::new(initial));
        (
            Self {
                manager,
                station,
                refresh,
                events,
                tx,
            },
            rx,
        )
    }

    /// Spawn the watcher on the current runtime
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Run until `shutdown` is cancelled or the event channel closes
    pub async fn run(mut self, shutdown: CancellationToken) {
        tracing::info!(station = ?self.station, "Board watcher started");

        let mut refresh = tokio::time::interval(self.refresh);
        refresh.tick().await; // skip immediate tick

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Board watcher received shutdown signal");
                    break;
                }

                _ = refresh.tick() => self.publish(),

                result = self.events.recv() => {
                    match result {
                        Ok(event) => {
                            tracing::debug!(order_id = %event.order_id, event_type = %event.event_type, "Board refresh on event");
                            self.publish();
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!("Board watcher lagged {n} events, rebuilding");
                            self.publish();
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("Event channel closed, board watcher stopping");
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!("Board watcher stopped");
    }

    fn publish(&self) {
        match self.manager.project_board(self.station) {
            Ok(view) => {
                self.tx.send_replace(Arc::new(view));
            }
            Err(e) => tracing::error!(error = %e, "Failed to project board"),
        }
    }
}
