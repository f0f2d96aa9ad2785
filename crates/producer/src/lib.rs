//! Kafka publish dispatch for kafka-bench.
//!
//! Features:
//!
//! - Outcome Correlation: every submitted message gets a fresh id and an
//!   eventually-resolved outcome carrying the broker-assigned partition and
//!   offset, or a failure status, never an error
//! - Pluggable Transport: the broker client sits behind the
//!   [`DeliveryTransport`] trait, so tests can simulate acknowledgments and
//!   rejections without a running broker
//! - Topic Provisioning: idempotent create-if-absent via the Kafka admin API

/// Correlates publish requests with their delivery settlements
pub mod dispatcher;
pub mod error;

/// Broker client seam and its rdkafka implementation
pub mod transport;

pub use dispatcher::Dispatcher;
pub use error::{Error, Result};
pub use transport::{ensure_topic, DeliveryAck, DeliveryTransport, KafkaTransport};
