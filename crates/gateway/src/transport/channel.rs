//! Tokio channel-based transport for single-process mode
//!
//! Uses a bounded mpsc channel for ordered point-to-point delivery within a
//! single process. No serialization beyond the wire codec - payloads are
//! passed through as bytes.

use crate::error::TransportError;
use crate::transport::{EventPublisher, EventSubscriber};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Create a connected publisher/subscriber pair with the given capacity
pub fn event_channel(capacity: usize) -> (ChannelEventPublisher, ChannelEventSubscriber) {
    let (tx, rx) = mpsc::channel(capacity);
    (
        ChannelEventPublisher { tx },
        ChannelEventSubscriber { rx },
    )
}

/// Channel-based event publisher
#[derive(Clone)]
pub struct ChannelEventPublisher {
    tx: mpsc::Sender<Vec<u8>>,
}

#[async_trait]
impl EventPublisher for ChannelEventPublisher {
    async fn publish(&self, payload: Vec<u8>) -> Result<(), TransportError> {
        self.tx
            .send(payload)
            .await
            .map_err(|_| TransportError::ChannelClosed)
    }
}

/// Channel-based event subscriber
pub struct ChannelEventSubscriber {
    rx: mpsc::Receiver<Vec<u8>>,
}

#[async_trait]
impl EventSubscriber for ChannelEventSubscriber {
    async fn next(&mut self) -> Result<Vec<u8>, TransportError> {
        self.rx.recv().await.ok_or(TransportError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_payloads_arrive_in_publish_order() {
        let (publisher, mut subscriber) = event_channel(10);

        publisher.publish(b"first".to_vec()).await.unwrap();
        publisher.publish(b"second".to_vec()).await.unwrap();

        assert_eq!(subscriber.next().await.unwrap(), b"first");
        assert_eq!(subscriber.next().await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_closed_channel_surfaces_as_transport_error() {
        let (publisher, subscriber) = event_channel(1);
        drop(subscriber);

        let err = publisher.publish(b"late".to_vec()).await.unwrap_err();
        assert!(matches!(err, TransportError::ChannelClosed));
    }

    #[tokio::test]
    async fn test_subscriber_sees_close_after_drain() {
        let (publisher, mut subscriber) = event_channel(1);
        publisher.publish(b"only".to_vec()).await.unwrap();
        drop(publisher);

        assert_eq!(subscriber.next().await.unwrap(), b"only");
        assert!(matches!(
            subscriber.next().await.unwrap_err(),
            TransportError::ChannelClosed
        ));
    }
}
