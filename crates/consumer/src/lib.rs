//! Kafka consumption for kafka-bench.
//!
//! Features:
//!
//! - Subscription Fan-In: one ingest task per registered topic, all feeding
//!   a single shared buffer
//! - Bounded Retention: the buffer holds the 100 most recently consumed
//!   records, evicting oldest first under one serialization point
//! - Consistent Reads: snapshots and clears are atomic with respect to
//!   concurrent ingests

/// Bounded retention buffer shared by all ingest tasks
pub mod buffer;
pub mod error;

/// Per-topic subscription tasks feeding the buffer
pub mod worker;

pub use buffer::{RecentBuffer, BUFFER_CAPACITY, DEFAULT_SNAPSHOT_LIMIT};
pub use error::{Error, Result};
pub use worker::{ConsumerConfig, IngestWorkers};
