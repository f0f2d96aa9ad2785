//! Records captured from topic subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One message captured from a subscribed topic, normalized into the
/// uniform shape the rest of the service works with.
///
/// Immutable once built; ownership moves into the retention buffer on
/// ingest and the subscription loop keeps no reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumedRecord {
    /// Topic the record was consumed from
    pub topic: String,
    /// Message key, if the producer set one
    pub key: Option<String>,
    /// Payload, parsed as JSON when possible
    pub payload: serde_json::Value,
    /// Partition the record was read from
    pub partition: i32,
    /// Offset within the partition
    pub offset: i64,
    /// Broker-assigned receipt time; falls back to the local clock when
    /// the broker did not attach one
    pub timestamp: DateTime<Utc>,
}

impl ConsumedRecord {
    /// Normalize the raw parts of a delivered message.
    ///
    /// Payload bytes that parse as JSON become a JSON value; anything else
    /// is kept as a lossy UTF-8 string so no delivery is dropped over its
    /// encoding. A missing payload becomes JSON null.
    pub fn from_raw(
        topic: &str,
        key: Option<&[u8]>,
        payload: Option<&[u8]>,
        partition: i32,
        offset: i64,
        timestamp_ms: Option<i64>,
    ) -> Self {
        let payload = match payload {
            Some(bytes) => serde_json::from_slice(bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
            }),
            None => serde_json::Value::Null,
        };

        Self {
            topic: topic.to_string(),
            key: key.map(|k| String::from_utf8_lossy(k).into_owned()),
            payload,
            partition,
            offset,
            timestamp: timestamp_ms
                .and_then(DateTime::from_timestamp_millis)
                .unwrap_or_else(Utc::now),
        }
    }
}
