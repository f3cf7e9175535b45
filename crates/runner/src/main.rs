//! Swap stats service binary
//!
//! Runs the full single-process service: simulated event source, ingest
//! pipeline, aggregation engine, and the TCP subscriber endpoint. Stops
//! gracefully on ctrl-c.

use swapstats_gateway::{SwapSimulator, event_channel};
use swapstats_runner::{RunnerConfig, ServiceBootstrap, StatsService, serve_subscribers};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = RunnerConfig::default();

    // Event transport (single-process mode: channel-backed)
    let (publisher, subscriber) = event_channel(config.event_queue_capacity);

    // Wire and start the service workers
    let bootstrap = ServiceBootstrap::new(&config.service);
    let service = StatsService::start(&config.service, bootstrap, subscriber);

    // Subscriber endpoint; failing to bind is fatal at bootstrap
    let listener = TcpListener::bind(config.listen_addr).await?;
    log::info!("subscriber endpoint listening on {}", config.listen_addr);
    tokio::spawn(serve_subscribers(
        listener,
        service.hub.clone(),
        config.service.subscriber_queue_capacity,
        service.shutdown_signal(),
    ));

    // Simulated event source
    let simulator = SwapSimulator::new(config.simulator);
    tokio::spawn(simulator.run(publisher, service.shutdown_signal()));

    tokio::signal::ctrl_c().await?;
    log::info!("received shutdown signal, stopping...");
    service.shutdown().await;

    Ok(())
}
