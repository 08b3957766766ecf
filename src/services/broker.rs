use crate::error::SdkError;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use tokio::sync::RwLock;

/// Transport for off-chain proposal broadcast. One channel per recipient
/// address; payloads are JSON strings.
#[async_trait]
pub trait MessageBroker: Send + Sync {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), SdkError>;

    async fn subscribe(&self, channel: &str) -> Result<BoxStream<'static, String>, SdkError>;
}

pub struct RedisBroker {
    client: redis::Client,
    publisher: redis::aio::ConnectionManager,
}

impl RedisBroker {
    pub async fn connect(url: &str) -> Result<Self, SdkError> {
        let client = redis::Client::open(url)?;
        let publisher = client.get_connection_manager().await?;
        tracing::info!("Broker connected");
        Ok(Self { client, publisher })
    }
}

#[async_trait]
impl MessageBroker for RedisBroker {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), SdkError> {
        let mut conn = self.publisher.clone();
        redis::cmd("PUBLISH")
            .arg(channel)
            .arg(payload)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<BoxStream<'static, String>, SdkError> {
        // Pub/sub needs a dedicated connection
        let conn = self.client.get_async_connection().await?;
        let mut pubsub = conn.into_pubsub();
        pubsub.subscribe(channel).await?;
        let stream = pubsub
            .into_on_message()
            .filter_map(|msg| async move { msg.get_payload::<String>().ok() });
        Ok(Box::pin(stream))
    }
}

type Listener<T> = Box<dyn Fn(T) + Send + Sync>;

/// Holds at most one listener per event type. Setting a new listener
/// replaces the previous one; notifications are never queued.
pub struct ListenerSlot<T> {
    slot: RwLock<Option<Listener<T>>>,
}

impl<T> ListenerSlot<T> {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    pub async fn set(&self, listener: impl Fn(T) + Send + Sync + 'static) {
        *self.slot.write().await = Some(Box::new(listener));
    }

    pub async fn notify(&self, value: T) {
        if let Some(listener) = self.slot.read().await.as_ref() {
            listener(value);
        }
    }
}

impl<T> Default for ListenerSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Broadcast-channel broker used by tests in place of redis.
#[cfg(test)]
pub struct MemoryBroker {
    channels: std::sync::Mutex<std::collections::HashMap<String, tokio::sync::broadcast::Sender<String>>>,
}

#[cfg(test)]
impl MemoryBroker {
    pub fn new() -> Self {
        Self {
            channels: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    fn sender(&self, channel: &str) -> tokio::sync::broadcast::Sender<String> {
        self.channels
            .lock()
            .unwrap()
            .entry(channel.to_string())
            .or_insert_with(|| tokio::sync::broadcast::channel(16).0)
            .clone()
    }
}

#[cfg(test)]
#[async_trait]
impl MessageBroker for MemoryBroker {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), SdkError> {
        let _ = self.sender(channel).send(payload.to_string());
        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<BoxStream<'static, String>, SdkError> {
        let rx = self.sender(channel).subscribe();
        let stream = futures::stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(msg) => return Some((msg, rx)),
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => return None,
                }
            }
        });
        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_slot_is_empty_by_default() {
        tokio_test::block_on(async {
            let slot: ListenerSlot<u32> = ListenerSlot::new();
            // No listener set; notify is a no-op
            slot.notify(1).await;
        });
    }

    #[tokio::test]
    async fn setting_a_listener_replaces_the_previous_one() {
        let slot: ListenerSlot<u32> = ListenerSlot::new();
        let (tx_first, mut rx_first) = tokio::sync::mpsc::unbounded_channel();
        let (tx_second, mut rx_second) = tokio::sync::mpsc::unbounded_channel();

        slot.set(move |v| {
            let _ = tx_first.send(v);
        })
        .await;
        slot.set(move |v| {
            let _ = tx_second.send(v);
        })
        .await;

        slot.notify(7).await;

        assert_eq!(rx_second.recv().await, Some(7));
        assert!(rx_first.try_recv().is_err());
    }

    #[tokio::test]
    async fn memory_broker_delivers_to_subscribers() {
        let broker = MemoryBroker::new();
        let mut stream = broker.subscribe("topic:0xabc").await.unwrap();

        broker.publish("topic:0xabc", "hello").await.unwrap();
        broker.publish("topic:other", "ignored").await.unwrap();
        broker.publish("topic:0xabc", "world").await.unwrap();

        assert_eq!(stream.next().await.as_deref(), Some("hello"));
        assert_eq!(stream.next().await.as_deref(), Some("world"));
    }
}
