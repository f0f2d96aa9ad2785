//! Topic subscription fan-in.
//!
//! One ingest task per subscribed topic, all feeding the same shared
//! [`RecentBuffer`]. Topics are added by registration in the config, not by
//! writing another handler.

use crate::buffer::RecentBuffer;
use crate::error::Result;
use kafka_bench_types::ConsumedRecord;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer as RdkafkaConsumer, StreamConsumer as RdkafkaStreamConsumer};
use rdkafka::message::Message as RdkafkaMessage;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Configuration for the subscription side.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Kafka brokers (comma-separated list)
    pub brokers: String,
    /// Consumer group ID shared by all ingest tasks
    pub group_id: String,
    /// Topics to subscribe to, one ingest task each
    pub topics: Vec<String>,
    /// Auto offset reset strategy ("earliest" or "latest")
    pub auto_offset_reset: String,
    /// Session timeout in milliseconds
    pub session_timeout_ms: String,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            group_id: "kafka-bench-consumer".to_string(),
            topics: Vec::new(),
            auto_offset_reset: "earliest".to_string(),
            session_timeout_ms: "6000".to_string(),
        }
    }
}

/// Spawns and owns the per-topic ingest tasks.
pub struct IngestWorkers {
    config: ConsumerConfig,
    buffer: Arc<RecentBuffer>,
}

impl IngestWorkers {
    pub fn new(config: ConsumerConfig, buffer: Arc<RecentBuffer>) -> Self {
        Self { config, buffer }
    }

    fn create_consumer(&self, topic: &str) -> Result<RdkafkaStreamConsumer> {
        let consumer: RdkafkaStreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &self.config.brokers)
            .set("group.id", &self.config.group_id)
            .set("enable.auto.commit", "true")
            .set("auto.offset.reset", &self.config.auto_offset_reset)
            .set("session.timeout.ms", &self.config.session_timeout_ms)
            .set("enable.partition.eof", "false")
            .create()?;

        consumer.subscribe(&[topic])?;

        Ok(consumer)
    }

    /// Spawn one ingest task for every configured topic.
    pub fn spawn(&self) -> Result<Vec<JoinHandle<Result<()>>>> {
        self.config
            .topics
            .iter()
            .map(|topic| self.spawn_topic(topic.clone()))
            .collect()
    }

    /// Spawn an ingest task for a single topic.
    ///
    /// The task receives records, normalizes them, and hands ownership to
    /// the shared buffer. It runs until the consumer returns an error.
    pub fn spawn_topic(&self, topic: String) -> Result<JoinHandle<Result<()>>> {
        let consumer = self.create_consumer(&topic)?;
        let buffer = Arc::clone(&self.buffer);

        Ok(tokio::spawn(async move {
            loop {
                let msg = consumer.recv().await?;
                let record = ConsumedRecord::from_raw(
                    msg.topic(),
                    msg.key(),
                    msg.payload(),
                    msg.partition(),
                    msg.offset(),
                    msg.timestamp().to_millis(),
                );

                info!(
                    "Consumed message from topic: {}, partition: {}, offset: {}, key: {:?}",
                    record.topic, record.partition, record.offset, record.key
                );

                buffer.ingest(record);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_topics() {
        let config = ConsumerConfig::default();

        assert_eq!(config.brokers, "localhost:9092");
        assert_eq!(config.group_id, "kafka-bench-consumer");
        assert!(config.topics.is_empty());
        assert_eq!(config.auto_offset_reset, "earliest");
    }
}
