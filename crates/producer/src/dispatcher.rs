//! Publish dispatch with per-message outcome correlation.

use crate::transport::DeliveryTransport;
use kafka_bench_types::{PublishOutcome, PublishRequest};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Correlates each publish request with the settlement of its delivery.
///
/// Each [`submit`](Dispatcher::submit) call is independent; the dispatcher
/// holds no mutable state, so it can be shared freely and called
/// concurrently. Settlement order is not related to submission order.
pub struct Dispatcher {
    transport: Arc<dyn DeliveryTransport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn DeliveryTransport>) -> Self {
        Self { transport }
    }

    /// Submit a message for publishing.
    ///
    /// The message id is assigned before this returns; the returned future
    /// resolves exactly once, to a success outcome carrying the broker's
    /// partition and offset, or to a failure outcome with both absent.
    /// Delivery errors are absorbed into the failure outcome rather than
    /// surfaced as errors, so callers inspect the status field.
    pub fn submit(
        &self,
        request: PublishRequest,
    ) -> impl Future<Output = PublishOutcome> + Send + 'static {
        let message_id = Uuid::new_v4().to_string();
        let transport = Arc::clone(&self.transport);

        async move {
            info!("Sending message {message_id} to topic: {}", request.topic);

            match transport
                .publish(&request.topic, &request.key, &request.payload)
                .await
            {
                Ok(ack) => {
                    info!(
                        "Message {message_id} sent successfully to topic {} partition {} offset {}",
                        ack.topic, ack.partition, ack.offset
                    );
                    PublishOutcome::success(
                        message_id,
                        ack.topic,
                        request.key,
                        ack.partition,
                        ack.offset,
                    )
                }
                Err(err) => {
                    error!(
                        "Failed to send message {message_id} to topic {}: {err}",
                        request.topic
                    );
                    PublishOutcome::failed(message_id, request.topic, request.key)
                }
            }
        }
    }

    /// Submit a message to an explicitly named topic.
    pub fn submit_to_topic(
        &self,
        topic: impl Into<String>,
        key: impl Into<String>,
        payload: serde_json::Value,
    ) -> impl Future<Output = PublishOutcome> + Send + 'static {
        self.submit(PublishRequest::new(topic, key, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::transport::DeliveryAck;
    use async_trait::async_trait;
    use kafka_bench_types::PublishStatus;
    use rdkafka::error::KafkaError;
    use rdkafka::types::RDKafkaErrorCode;
    use serde_json::json;

    /// Broker stand-in that acknowledges every delivery with a fixed
    /// partition and offset.
    struct StaticAckTransport {
        partition: i32,
        offset: i64,
    }

    #[async_trait]
    impl DeliveryTransport for StaticAckTransport {
        async fn publish(
            &self,
            topic: &str,
            _key: &str,
            _payload: &serde_json::Value,
        ) -> Result<DeliveryAck> {
            Ok(DeliveryAck {
                topic: topic.to_string(),
                partition: self.partition,
                offset: self.offset,
            })
        }
    }

    /// Broker stand-in that rejects every delivery.
    struct RejectingTransport;

    #[async_trait]
    impl DeliveryTransport for RejectingTransport {
        async fn publish(
            &self,
            _topic: &str,
            _key: &str,
            _payload: &serde_json::Value,
        ) -> Result<DeliveryAck> {
            Err(Error::Kafka(KafkaError::MessageProduction(
                RDKafkaErrorCode::BrokerTransportFailure,
            )))
        }
    }

    /// Broker stand-in that reports a different topic than requested, as a
    /// client layer with topic aliasing would.
    struct AliasingTransport;

    #[async_trait]
    impl DeliveryTransport for AliasingTransport {
        async fn publish(
            &self,
            topic: &str,
            _key: &str,
            _payload: &serde_json::Value,
        ) -> Result<DeliveryAck> {
            Ok(DeliveryAck {
                topic: format!("{topic}-v2"),
                partition: 0,
                offset: 0,
            })
        }
    }

    fn dispatcher(transport: impl DeliveryTransport + 'static) -> Dispatcher {
        Dispatcher::new(Arc::new(transport))
    }

    #[tokio::test]
    async fn acknowledged_delivery_yields_success_outcome() {
        tracing_subscriber::fmt().with_env_filter("debug").try_init().ok();

        let dispatcher = dispatcher(StaticAckTransport {
            partition: 0,
            offset: 42,
        });

        let outcome = dispatcher
            .submit(PublishRequest::new("orders", "k1", json!({"amt": 5})))
            .await;

        assert_eq!(outcome.topic, "orders");
        assert_eq!(outcome.key, "k1");
        assert_eq!(outcome.partition, Some(0));
        assert_eq!(outcome.offset, Some(42));
        assert_eq!(outcome.status, PublishStatus::Success);
        assert!(!outcome.message_id.is_empty());
    }

    #[tokio::test]
    async fn rejected_delivery_yields_failed_outcome() {
        let dispatcher = dispatcher(RejectingTransport);

        let outcome = dispatcher
            .submit(PublishRequest::new("orders", "k1", json!({"amt": 5})))
            .await;

        assert_eq!(outcome.topic, "orders");
        assert_eq!(outcome.key, "k1");
        assert_eq!(outcome.partition, None);
        assert_eq!(outcome.offset, None);
        assert_eq!(outcome.status, PublishStatus::Failed);
    }

    #[tokio::test]
    async fn each_submission_gets_a_fresh_message_id() {
        let dispatcher = dispatcher(StaticAckTransport {
            partition: 0,
            offset: 1,
        });

        let first = dispatcher
            .submit(PublishRequest::new("orders", "k1", json!(1)))
            .await;
        let second = dispatcher
            .submit(PublishRequest::new("orders", "k1", json!(1)))
            .await;

        assert_ne!(first.message_id, second.message_id);
    }

    #[tokio::test]
    async fn success_outcome_reports_the_broker_topic() {
        let dispatcher = dispatcher(AliasingTransport);

        let outcome = dispatcher
            .submit(PublishRequest::new("orders", "k1", json!({})))
            .await;

        assert_eq!(outcome.topic, "orders-v2");
    }

    #[tokio::test]
    async fn submit_to_topic_builds_the_request() {
        let dispatcher = dispatcher(StaticAckTransport {
            partition: 2,
            offset: 9,
        });

        let outcome = dispatcher
            .submit_to_topic("events", "k2", json!({"kind": "signup"}))
            .await;

        assert_eq!(outcome.topic, "events");
        assert_eq!(outcome.key, "k2");
        assert_eq!(outcome.partition, Some(2));
        assert_eq!(outcome.offset, Some(9));
        assert_eq!(outcome.status, PublishStatus::Success);
    }
}
