//! Subscriber endpoint - duplex byte-stream connections for live updates
//!
//! Each accepted connection is registered with the fan-out hub behind a
//! bounded channel sink. Two tasks serve the connection: a writer draining
//! that channel onto the socket as newline-delimited JSON, and a reader
//! whose only job is detecting that the peer went away.

use std::net::SocketAddr;
use std::sync::Arc;
use swapstats_fanout::{ChannelSink, SubscriberHub};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;

/// Accept subscriber connections until shutdown.
///
/// Accepting stops on the shutdown signal; connections already established
/// keep draining whatever the fan-out delivers until their own tasks end.
pub async fn serve_subscribers(
    listener: TcpListener,
    hub: Arc<SubscriberHub>,
    queue_capacity: usize,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    log::info!("subscriber listener stopping on shutdown signal");
                    return;
                }
            }
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, addr)) => {
                        handle_subscriber(stream, addr, hub.clone(), queue_capacity);
                    }
                    Err(err) => {
                        // A single failed accept must not bring the
                        // endpoint down.
                        log::error!("failed to accept subscriber connection: {}", err);
                    }
                }
            }
        }
    }
}

fn handle_subscriber(
    stream: TcpStream,
    addr: SocketAddr,
    hub: Arc<SubscriberHub>,
    queue_capacity: usize,
) {
    let (sink, mut updates_rx) = ChannelSink::pair(queue_capacity);
    let id = hub.register(Box::new(sink));
    log::debug!("subscriber {} connected from {}", id, addr);

    let (mut read_half, mut write_half) = stream.into_split();

    // Writer: drain this connection's queue onto the socket. Ends when the
    // hub drops the sink (eviction) or the socket write fails.
    tokio::spawn(async move {
        while let Some(payload) = updates_rx.recv().await {
            if write_half.write_all(payload.as_bytes()).await.is_err()
                || write_half.write_all(b"\n").await.is_err()
            {
                break;
            }
        }
    });

    // Reader: inbound data is ignored; reading only detects disconnect.
    tokio::spawn(async move {
        let mut buf = [0u8; 1024];
        loop {
            match read_half.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
        }
        hub.unregister(id);
        log::debug!("subscriber connection from {} closed", addr);
    });
}
