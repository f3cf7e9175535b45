//! Stats service - the running worker set
//!
//! Owns the ingest, fan-out, and sweeper tasks plus the shutdown signal.
//! Shutdown is cooperative: workers stop accepting new work on the signal
//! and in-flight event processing runs to completion.

use crate::bootstrap::ServiceBootstrap;
use crate::config::ServiceConfig;
use std::sync::Arc;
use std::time::Duration;
use swapstats_engine::{QueryService, SwapPipeline};
use swapstats_fanout::SubscriberHub;
use swapstats_gateway::{EventSubscriber, decode_swap_event};
use swapstats_store::MemoryCounterStore;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Handle to the running service
pub struct StatsService {
    /// Read path for the external API surface
    pub query: Arc<QueryService>,
    /// Fan-out hub; the subscriber endpoint registers connections here
    pub hub: Arc<SubscriberHub>,
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl StatsService {
    /// Spawn the worker set over a bootstrapped component graph.
    ///
    /// `subscriber` is the event transport's consuming side; the ingest
    /// worker pulls from it until shutdown or until the transport closes.
    pub fn start(
        config: &ServiceConfig,
        bootstrap: ServiceBootstrap,
        subscriber: impl EventSubscriber + 'static,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let ServiceBootstrap {
            store,
            engine: _,
            query,
            hub,
            pipeline,
            updates_rx,
        } = bootstrap;

        let mut handles = Vec::new();
        handles.push(tokio::spawn(run_ingest(
            subscriber,
            pipeline,
            shutdown_rx.clone(),
        )));
        handles.push(tokio::spawn(run_fanout(
            updates_rx,
            hub.clone(),
            shutdown_rx.clone(),
        )));
        handles.push(tokio::spawn(run_sweeper(
            store,
            config.sweep_interval,
            shutdown_rx,
        )));

        Self {
            query,
            hub,
            shutdown_tx,
            handles,
        }
    }

    /// A receiver other tasks (listener, simulator) can watch for shutdown
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Signal shutdown and wait for every worker to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        for handle in self.handles {
            let _ = handle.await;
        }
        log::info!("stats service stopped");
    }
}

/// Pull, decode, and process events strictly one at a time.
///
/// Event N+1 is not touched until event N's increments and publishes have
/// completed or failed: ingestion throughput is bounded by aggregation
/// write latency by design.
async fn run_ingest(
    mut subscriber: impl EventSubscriber,
    pipeline: SwapPipeline,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                // A dropped sender counts as shutdown too
                if changed.is_err() || *shutdown.borrow() {
                    log::info!("ingest worker stopping on shutdown signal");
                    return;
                }
            }
            payload = subscriber.next() => {
                let payload = match payload {
                    Ok(payload) => payload,
                    Err(err) => {
                        log::info!("event transport closed ({}); ingest worker stopping", err);
                        return;
                    }
                };

                // Malformed payloads are reported and skipped; the loop
                // keeps consuming.
                let event = match decode_swap_event(&payload) {
                    Ok(event) => event,
                    Err(err) => {
                        log::error!("skipping undecodable event payload: {}", err);
                        continue;
                    }
                };

                // A failed event is the transport's to redeliver; partial
                // increments stay applied.
                if let Err(err) = pipeline.process(&event).await {
                    log::error!(
                        "failed to process swap event with tx hash {}: {}",
                        event.tx_hash,
                        err
                    );
                }
            }
        }
    }
}

/// Drain the internal update queue into the fan-out hub
async fn run_fanout(
    mut updates_rx: mpsc::Receiver<String>,
    hub: Arc<SubscriberHub>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    log::info!("fan-out worker stopping on shutdown signal");
                    return;
                }
            }
            update = updates_rx.recv() => {
                match update {
                    Some(payload) => {
                        hub.publish(&payload);
                    }
                    None => {
                        log::info!("update queue closed; fan-out worker stopping");
                        return;
                    }
                }
            }
        }
    }
}

/// Periodically remove expired buckets; reads stay correct without this,
/// the sweep only bounds memory
async fn run_sweeper(
    store: Arc<MemoryCounterStore>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick fires immediately; skip it
    ticker.tick().await;
    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    return;
                }
            }
            _ = ticker.tick() => {
                store.purge_expired();
            }
        }
    }
}
