//! Shared polling pipeline with replay and change detection.
//!
//! `PollingPipeline` polls a `QuoteSource` on a fixed cadence and broadcasts each
//! *changed* `QuoteSeries` to every subscriber using `crossbeam_channel`. New
//! subscribers register by calling `subscribe`, which hands back a `Subscription`
//! wrapping the subscriber's receiving end.
//!
//! Event model:
//! - `FeedEvent::Snapshot(series)`: a new snapshot, published only when it differs
//!   from the previous one.
//! - `FeedEvent::Failed(err)`: terminal fetch failure; the channel closes after it.
//!
//! Lifecycle:
//! - The first subscriber starts a worker thread. It fetches immediately and then on
//!   every tick of a timer started together with the worker.
//! - Later subscribers share that worker and get the cached snapshot replayed on join.
//! - Dropping the last `Subscription` stops the worker and clears the cache; the
//!   next `subscribe` starts a fresh run.
//! - Each fetch runs on its own thread tagged with a sequence number, and at most
//!   one fetch is outstanding. A tick that fires mid-fetch supersedes the running
//!   fetch: its response is dropped and the next fetch starts as soon as it returns.
//! - Every run has a generation number; a worker from an older run never publishes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{
    Receiver, RecvError, RecvTimeoutError, Sender, TryRecvError, select, tick, unbounded,
};
use log::{debug, error, info, warn};
use rate_common::defaults::POLL_INTERVAL;
use rate_common::{FeedError, QuoteSeries, Result};

use crate::source::QuoteSource;

/// Message delivered to subscribers.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A complete snapshot from a single poll.
    Snapshot(Arc<QuoteSeries>),
    /// The fetch failed; no further events follow on this subscription.
    Failed(Arc<FeedError>),
}

/// State shared by the pipeline handle, its subscriptions and the worker.
#[derive(Default)]
struct State {
    subscribers: HashMap<u64, Sender<FeedEvent>>,
    next_id: u64,
    latest: Option<Arc<QuoteSeries>>,
    generation: u64,
    /// Present while a worker runs; dropping it stops the worker.
    stop_tx: Option<Sender<()>>,
}

impl State {
    fn teardown(&mut self) {
        self.stop_tx = None;
        self.latest = None;
    }
}

/// Polls a quote source and shares de-duplicated snapshots among subscribers.
///
/// Clones share the same state, timer and cache.
pub struct PollingPipeline<S: QuoteSource> {
    source: Arc<S>,
    interval: Duration,
    state: Arc<Mutex<State>>,
}

impl<S: QuoteSource> Clone for PollingPipeline<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            interval: self.interval,
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: QuoteSource> PollingPipeline<S> {
    /// Pipeline polling `source` every 60 seconds.
    pub fn new(source: S) -> Self {
        Self::build(source, POLL_INTERVAL)
    }

    /// Pipeline polling `source` every `interval`. A zero interval is rejected.
    pub fn with_interval(source: S, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(FeedError::Config("polling interval must be positive".to_string()));
        }
        Ok(Self::build(source, interval))
    }

    fn build(source: S, interval: Duration) -> Self {
        Self {
            source: Arc::new(source),
            interval,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Polling cadence.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Registers a subscriber, starting the poll cycle if none is running.
    ///
    /// If a snapshot has already been published in the current run, it is queued
    /// on the new subscription before this call returns.
    pub fn subscribe(&self) -> Result<Subscription> {
        let mut state = self.state.lock()?;
        if state.stop_tx.is_none() {
            self.start(&mut state)?;
        }

        let (tx, rx) = unbounded::<FeedEvent>();
        if let Some(latest) = &state.latest {
            tx.send(FeedEvent::Snapshot(Arc::clone(latest)))
                .map_err(|e| FeedError::ChannelSend(e.to_string()))?;
        }
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.insert(id, tx);
        debug!("Subscriber #{} joined. Total subscribers: {}", id, state.subscribers.len());

        Ok(Subscription {
            id,
            rx,
            state: Arc::clone(&self.state),
        })
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> Result<usize> {
        Ok(self.state.lock()?.subscribers.len())
    }

    /// `true` while a worker is polling.
    pub fn is_running(&self) -> Result<bool> {
        Ok(self.state.lock()?.stop_tx.is_some())
    }

    /// Last published snapshot of the current run.
    pub fn latest(&self) -> Result<Option<Arc<QuoteSeries>>> {
        Ok(self.state.lock()?.latest.clone())
    }

    fn start(&self, state: &mut State) -> Result<()> {
        state.generation += 1;
        state.latest = None;
        let (stop_tx, stop_rx) = unbounded::<()>();
        let worker = PollWorker {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            interval: self.interval,
            generation: state.generation,
        };
        thread::Builder::new()
            .name(format!("rate-poller-{}", state.generation))
            .spawn(move || worker.run(stop_rx))?;
        state.stop_tx = Some(stop_tx);
        info!("Polling started (run {}, every {:?})", state.generation, self.interval);
        Ok(())
    }
}

/// Receiving end of one subscriber. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    rx: Receiver<FeedEvent>,
    state: Arc<Mutex<State>>,
}

impl Subscription {
    /// Blocks until the next event. Errors once the stream has ended.
    pub fn recv(&self) -> std::result::Result<FeedEvent, RecvError> {
        self.rx.recv()
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> std::result::Result<FeedEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Returns a queued event without blocking.
    pub fn try_recv(&self) -> std::result::Result<FeedEvent, TryRecvError> {
        self.rx.try_recv()
    }

    /// Underlying channel, e.g. for use in `select!`.
    pub fn receiver(&self) -> &Receiver<FeedEvent> {
        &self.rx
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(e) => {
                error!("Failed to unsubscribe #{}: {}", self.id, e);
                return;
            }
        };
        if state.subscribers.remove(&self.id).is_some() {
            debug!("Subscriber #{} left. Total subscribers: {}", self.id, state.subscribers.len());
            if state.subscribers.is_empty() && state.stop_tx.is_some() {
                state.teardown();
                info!("Polling stopped: no subscribers left");
            }
        }
    }
}

/// Background loop owning the timer for one run.
struct PollWorker<S: QuoteSource> {
    source: Arc<S>,
    state: Arc<Mutex<State>>,
    interval: Duration,
    generation: u64,
}

impl<S: QuoteSource> PollWorker<S> {
    fn run(self, stop_rx: Receiver<()>) {
        let ticker = tick(self.interval);
        let (result_tx, result_rx) = unbounded::<(u64, Result<QuoteSeries>)>();
        let mut seq = 0u64;
        let mut in_flight = true;
        // A tick arrived while a fetch was outstanding.
        let mut pending = false;
        self.spawn_fetch(seq, &result_tx);

        loop {
            select! {
                recv(stop_rx) -> _ => break,
                recv(ticker) -> _ => {
                    seq += 1;
                    if in_flight {
                        debug!("Tick while fetching; fetch #{} deferred", seq);
                        pending = true;
                    } else {
                        in_flight = true;
                        self.spawn_fetch(seq, &result_tx);
                    }
                },
                recv(result_rx) -> msg => match msg {
                    Ok((id, result)) => {
                        in_flight = false;
                        if id == seq {
                            if !self.publish(result) {
                                break;
                            }
                        } else {
                            debug!("Dropping response of superseded fetch #{}", id);
                        }
                        if pending {
                            pending = false;
                            in_flight = true;
                            self.spawn_fetch(seq, &result_tx);
                        }
                    }
                    Err(e) => {
                        error!("Fetch result channel closed: {}", e);
                        break;
                    }
                },
            }
        }
        debug!("Poll worker for run {} exiting", self.generation);
    }

    fn spawn_fetch(&self, seq: u64, result_tx: &Sender<(u64, Result<QuoteSeries>)>) {
        let source = Arc::clone(&self.source);
        let tx = result_tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("rate-fetch-{}-{}", self.generation, seq))
            .spawn(move || {
                let result = source.fetch();
                if tx.send((seq, result)).is_err() {
                    debug!("Fetch #{} finished after its run ended", seq);
                }
            });
        if let Err(e) = spawned {
            error!("Failed to spawn fetch #{}: {}", seq, e);
            let _ = result_tx.send((seq, Err(FeedError::Io(e))));
        }
    }

    /// Applies one fetch result. Returns `false` when the run is over.
    fn publish(&self, result: Result<QuoteSeries>) -> bool {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(e) => {
                error!("Poll worker cannot lock state: {}", e);
                return false;
            }
        };
        if state.generation != self.generation || state.stop_tx.is_none() {
            return false;
        }

        match result {
            Ok(series) => {
                if state.latest.as_deref() == Some(&series) {
                    debug!("Quote series unchanged ({} quotes)", series.len());
                    return true;
                }
                let snapshot = Arc::new(series);
                state.latest = Some(Arc::clone(&snapshot));
                state
                    .subscribers
                    .retain(|_, tx| tx.send(FeedEvent::Snapshot(Arc::clone(&snapshot))).is_ok());
                info!(
                    "Published snapshot with {} quotes to {} subscribers",
                    snapshot.len(),
                    state.subscribers.len()
                );
                if state.subscribers.is_empty() {
                    state.teardown();
                    return false;
                }
                true
            }
            Err(err) => {
                warn!("Quote fetch failed: {}", err);
                let err = Arc::new(err);
                for (_, tx) in state.subscribers.drain() {
                    let _ = tx.send(FeedEvent::Failed(Arc::clone(&err)));
                }
                state.teardown();
                false
            }
        }
    }
}
