//! Publish requests and their settlement outcomes.
//!
//! A [`PublishRequest`] describes one message to send; a [`PublishOutcome`]
//! is the uniform result handed back once the broker acknowledges or rejects
//! the delivery. The outcome is immutable after construction and the
//! dispatcher keeps no reference to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message submitted for publishing.
///
/// `topic` and `key` are expected to be non-empty and `payload` non-null;
/// enforcing that is the job of the transport boundary that accepts the
/// request, not of the dispatch layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Destination topic
    pub topic: String,
    /// Message key, used by the broker for partition assignment
    pub key: String,
    /// Opaque JSON payload
    pub payload: serde_json::Value,
    /// When the request was constructed (informational only)
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl PublishRequest {
    pub fn new(
        topic: impl Into<String>,
        key: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            topic: topic.into(),
            key: key.into(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

/// Settlement status of a publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishStatus {
    Success,
    Failed,
}

/// Result of one publish attempt.
///
/// `partition` and `offset` are both `Some` exactly when `status` is
/// [`PublishStatus::Success`]. The two constructors are the only way to
/// build an outcome, so the invariant cannot be violated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishOutcome {
    /// Unique token assigned when the request was submitted, never reused
    pub message_id: String,
    /// Topic as reported by the broker on success, echoed from the
    /// request on failure
    pub topic: String,
    /// Key echoed from the request
    pub key: String,
    /// Broker-assigned partition, absent on failure
    pub partition: Option<i32>,
    /// Broker-assigned offset within the partition, absent on failure
    pub offset: Option<i64>,
    /// When the delivery settled, not when it was submitted
    pub timestamp: DateTime<Utc>,
    pub status: PublishStatus,
}

impl PublishOutcome {
    /// Outcome of a delivery the broker acknowledged.
    pub fn success(
        message_id: String,
        topic: String,
        key: String,
        partition: i32,
        offset: i64,
    ) -> Self {
        Self {
            message_id,
            topic,
            key,
            partition: Some(partition),
            offset: Some(offset),
            timestamp: Utc::now(),
            status: PublishStatus::Success,
        }
    }

    /// Outcome of a delivery that settled with an error.
    pub fn failed(message_id: String, topic: String, key: String) -> Self {
        Self {
            message_id,
            topic,
            key,
            partition: None,
            offset: None,
            timestamp: Utc::now(),
            status: PublishStatus::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PublishStatus::Success
    }
}
