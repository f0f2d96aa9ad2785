//! kafka-bench service library.
//!
//! A benchmark demo service around a Kafka broker, in two halves that never
//! call each other:
//!
//! - Publishing: [`MessagingService::send_message`] submits a message and
//!   resolves to a per-message outcome carrying the broker-assigned
//!   partition and offset, or a failure status
//! - Consuming: per-topic subscription tasks feed one bounded buffer of
//!   recently consumed records, read via
//!   [`MessagingService::recent_messages`]
//!
//! The HTTP transport that drives these operations in the benchmark
//! deployment is external to this crate; the binary exposes them over a CLI
//! instead.
//!
//! # CLI Usage
//!
//! ```bash
//! # Provision topics and run the consumer fan-in
//! kafka-bench serve --bootstrap-servers localhost:9092
//!
//! # Publish one message and print its outcome
//! kafka-bench publish --topic orders --key k1 --payload '{"amt":5}'
//! ```

use clap::Parser;
use kafka_bench_consumer::{ConsumerConfig, RecentBuffer};
use kafka_bench_producer::{DeliveryTransport, Dispatcher};
use kafka_bench_types::{ConsumedRecord, PublishOutcome, PublishRequest};
use std::sync::Arc;

// Re-export component crates for convenience
pub use kafka_bench_consumer as consumer;
pub use kafka_bench_producer as producer;
pub use kafka_bench_types as types;

/// Broker connection and topic options.
#[derive(Parser, Clone, Debug)]
pub struct BrokerOpts {
    /// Kafka brokers (comma-separated list)
    #[arg(
        long,
        default_value = "localhost:9092",
        env = "KAFKA_BOOTSTRAP_SERVERS"
    )]
    pub bootstrap_servers: String,

    /// Consumer group ID
    #[arg(long, default_value = "kafka-bench-consumer", env = "KAFKA_GROUP_ID")]
    pub group_id: String,

    /// Orders topic name
    #[arg(long, default_value = "orders", env = "KAFKA_TOPIC_ORDERS")]
    pub orders_topic: String,

    /// Events topic name
    #[arg(long, default_value = "events", env = "KAFKA_TOPIC_EVENTS")]
    pub events_topic: String,

    /// Partitions per provisioned topic
    #[arg(long, default_value_t = 3)]
    pub partitions: i32,

    /// Replication factor for provisioned topics
    #[arg(long, default_value_t = 2)]
    pub replication_factor: i32,
}

impl BrokerOpts {
    /// The topics the service subscribes to and provisions.
    pub fn topics(&self) -> Vec<String> {
        vec![self.orders_topic.clone(), self.events_topic.clone()]
    }

    pub fn consumer_config(&self) -> ConsumerConfig {
        ConsumerConfig {
            brokers: self.bootstrap_servers.clone(),
            group_id: self.group_id.clone(),
            topics: self.topics(),
            ..ConsumerConfig::default()
        }
    }
}

/// Wires the publish dispatcher and the consumption buffer together behind
/// the operations an external transport consumes.
pub struct MessagingService {
    dispatcher: Dispatcher,
    buffer: Arc<RecentBuffer>,
}

impl MessagingService {
    pub fn new(transport: Arc<dyn DeliveryTransport>) -> Self {
        Self {
            dispatcher: Dispatcher::new(transport),
            buffer: Arc::new(RecentBuffer::new()),
        }
    }

    /// Handle to the shared buffer, for wiring up ingest workers.
    pub fn buffer(&self) -> Arc<RecentBuffer> {
        Arc::clone(&self.buffer)
    }

    /// Submit a message for publishing.
    pub async fn send_message(&self, request: PublishRequest) -> PublishOutcome {
        self.dispatcher.submit(request).await
    }

    /// Submit a message to an explicitly named topic.
    pub async fn send_message_to_topic(
        &self,
        topic: impl Into<String>,
        key: impl Into<String>,
        payload: serde_json::Value,
    ) -> PublishOutcome {
        self.dispatcher.submit_to_topic(topic, key, payload).await
    }

    /// The most recently consumed records, newest first (default 10).
    pub fn recent_messages(&self, limit: Option<usize>) -> Vec<ConsumedRecord> {
        self.buffer.snapshot(limit, true)
    }

    /// Drop all retained consumed records.
    pub fn clear_messages(&self) {
        self.buffer.clear();
    }
}
