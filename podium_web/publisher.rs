//! Live leaderboard updates.
//!
//! Every subscriber gets its own task pushing a fresh top-N snapshot on each
//! tick until the client goes away, the server shuts down or a push fails.
//! Pushes are best-effort: there's no acknowledgement, and a slow client only
//! slows down its own loop.

use axum::response::sse::Event;
use std::{
    convert::Infallible,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use thiserror::Error;
use tokio::{
    sync::mpsc,
    time::{MissedTickBehavior, interval},
};
use tokio_stream::{Stream, StreamExt, wrappers::ReceiverStream};
use tokio_util::sync::CancellationToken;

use podium_app::{
    app::AppBus, cqrs::queries::GetLeaderboard, queries_handlers::GetLeaderboardHandler,
};
use podium_types::errors::ApplicationError;

use crate::payloads::LeaderboardResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberState {
    Open,
    Pushing,
    Waiting,
    Closed,
}

#[derive(Debug, Error)]
enum PushError {
    #[error("unable to fetch leaderboard: {0}")]
    Fetch(#[from] ApplicationError),

    #[error("unable to serialize leaderboard: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("subscriber is gone")]
    Disconnected,
}

#[derive(Clone)]
pub struct LeaderboardPublisher {
    app_bus: Arc<AppBus>,
    interval: Duration,
    limit: usize,
    shutdown: CancellationToken,
    next_subscriber: Arc<AtomicU64>,
}

impl LeaderboardPublisher {
    pub fn new(app_bus: Arc<AppBus>, shutdown: CancellationToken) -> Self {
        let config = app_bus.config().clone();

        Self {
            app_bus,
            interval: config.stream_interval,
            limit: config.stream_limit,
            shutdown,
            next_subscriber: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Starts the push loop for a new subscriber and returns its events.
    /// Dropping the stream is what tells the loop the client disconnected.
    pub fn subscribe(
        &self,
    ) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static + use<> {
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(self.clone().run(tx));

        ReceiverStream::new(rx).map(|snapshot| Ok(Event::default().data(snapshot)))
    }

    /// Pushes serialized snapshots into `tx` until the receiver is dropped,
    /// shutdown is requested or a push fails. Always ends `Closed`.
    pub async fn run(self, tx: mpsc::Sender<String>) -> SubscriberState {
        let subscriber = self.next_subscriber.fetch_add(1, Ordering::Relaxed);
        let mut state = SubscriberState::Open;
        tracing::debug!(subscriber, "Live subscriber connected");

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // The first tick completes right away: new subscribers don't wait
            // a whole interval for their first snapshot.
            tokio::select! {
                biased;
                _ = tx.closed() => {
                    tracing::debug!(subscriber, "Live subscriber disconnected");
                    break;
                }
                _ = self.shutdown.cancelled() => {
                    tracing::debug!(subscriber, "Shutting down live subscriber");
                    break;
                }
                _ = ticker.tick() => {}
            }

            state = transition(subscriber, state, SubscriberState::Pushing);
            let pushed = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                pushed = self.push(&tx) => pushed,
            };

            if let Err(e) = pushed {
                tracing::debug!(subscriber, "Stopping live updates: {e}");
                break;
            }
            state = transition(subscriber, state, SubscriberState::Waiting);
        }

        transition(subscriber, state, SubscriberState::Closed)
    }

    async fn push(&self, tx: &mpsc::Sender<String>) -> Result<(), PushError> {
        let players = self
            .app_bus
            .query(
                GetLeaderboard::with_limit(self.limit),
                GetLeaderboardHandler::new(),
            )
            .await?;

        let snapshot = serde_json::to_string(&LeaderboardResponse::new(players))?;

        tx.send(snapshot)
            .await
            .map_err(|_| PushError::Disconnected)
    }
}

fn transition(subscriber: u64, from: SubscriberState, to: SubscriberState) -> SubscriberState {
    tracing::debug!(subscriber, ?from, ?to, "Live subscriber transition");
    to
}
