//! Delivery transport over Kafka.
//!
//! [`DeliveryTransport`] is the seam between the dispatch layer and the
//! broker client: an asynchronous publish that settles with either a broker
//! acknowledgment or an error. [`KafkaTransport`] is the production
//! implementation; tests substitute their own.

use crate::error::{Error, Result};
use async_trait::async_trait;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;
use std::time::Duration;
use tracing::info;

/// Broker acknowledgment for one delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAck {
    /// Topic the client delivered to, which may differ from the requested
    /// name under client-side topic aliasing
    pub topic: String,
    /// Partition the message landed on
    pub partition: i32,
    /// Offset assigned by the broker, monotonic within the partition
    pub offset: i64,
}

/// Asynchronous at-most-once publish primitive.
///
/// Retries, if any, happen beneath this interface; a timeout or rejection
/// surfaces as an `Err` settlement.
#[async_trait]
pub trait DeliveryTransport: Send + Sync {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        payload: &serde_json::Value,
    ) -> Result<DeliveryAck>;
}

/// Kafka-backed delivery transport.
pub struct KafkaTransport {
    producer: FutureProducer,
}

impl KafkaTransport {
    /// Create a transport connected to the given brokers.
    pub fn new(brokers: &str) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()?;

        Ok(Self { producer })
    }
}

#[async_trait]
impl DeliveryTransport for KafkaTransport {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        payload: &serde_json::Value,
    ) -> Result<DeliveryAck> {
        let bytes = serde_json::to_vec(payload)?;
        let record = FutureRecord::to(topic).key(key).payload(&bytes);

        let (partition, offset) = self
            .producer
            .send(record, Duration::from_secs(5))
            .await
            .map_err(|(err, _)| err)?;

        Ok(DeliveryAck {
            topic: topic.to_string(),
            partition,
            offset,
        })
    }
}

/// Create a Kafka topic if it doesn't exist.
pub async fn ensure_topic(
    brokers: &str,
    topic: &str,
    partitions: i32,
    replication: i32,
) -> Result<()> {
    let admin_client: AdminClient<DefaultClientContext> = ClientConfig::new()
        .set("bootstrap.servers", brokers)
        .create()?;

    let new_topic = NewTopic::new(topic, partitions, TopicReplication::Fixed(replication));
    let opts = AdminOptions::new().operation_timeout(Some(Duration::from_secs(5)));

    let results = admin_client.create_topics(&[new_topic], &opts).await?;
    for result in results {
        match result {
            Ok(topic_name) => info!("Topic '{topic_name}' created successfully"),
            Err((topic_name, err)) => {
                // Topic already exists is not an error
                if err.to_string().contains("already exists") {
                    info!("Topic '{topic_name}' already exists");
                } else {
                    return Err(Error::Admin(format!(
                        "Failed to create topic '{topic_name}': {err}"
                    )));
                }
            }
        }
    }

    Ok(())
}
