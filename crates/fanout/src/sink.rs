use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Why a delivery attempt failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("subscriber queue is full")]
    Full,

    #[error("subscriber connection closed")]
    Closed,
}

/// One subscriber connection's write side.
///
/// `deliver` is a single non-blocking attempt: no retry, no waiting. The
/// fan-out treats any failure as the subscriber being slow or gone and
/// evicts it.
pub trait SubscriberSink: Send {
    fn deliver(&self, payload: &str) -> Result<(), DeliveryError>;
}

/// Sink backed by a bounded channel drained by the connection's writer task.
///
/// The channel is the connection's only outbound buffering; a full channel
/// means the subscriber is not keeping up and counts as a failed delivery.
pub struct ChannelSink {
    tx: mpsc::Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }

    /// Create a sink plus the receiver its writer task drains
    pub fn pair(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl SubscriberSink for ChannelSink {
    fn deliver(&self, payload: &str) -> Result<(), DeliveryError> {
        self.tx
            .try_send(payload.to_string())
            .map_err(|err| match err {
                TrySendError::Full(_) => DeliveryError::Full,
                TrySendError::Closed(_) => DeliveryError::Closed,
            })
    }
}
