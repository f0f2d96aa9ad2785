//! Bounded retention buffer for consumed records.

use kafka_bench_types::ConsumedRecord;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Maximum number of records retained at any time.
pub const BUFFER_CAPACITY: usize = 100;

/// Number of records a snapshot returns when no limit is given.
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 10;

/// Fixed-capacity, insertion-ordered buffer of recently consumed records.
///
/// Any number of subscription tasks ingest into one shared instance while
/// readers snapshot or clear it. A single mutex serializes all three
/// operations, so `len() <= capacity` holds at every observable point and a
/// snapshot never sees a half-applied ingest or clear. When the capacity is
/// exceeded the oldest record is evicted first, regardless of which
/// subscription produced it.
///
/// All operations are total: there is no error path, and none of them
/// performs I/O or blocks beyond the lock itself.
pub struct RecentBuffer {
    records: Mutex<VecDeque<ConsumedRecord>>,
    capacity: usize,
}

impl RecentBuffer {
    pub fn new() -> Self {
        Self::with_capacity(BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<ConsumedRecord>> {
        // A panic while holding the lock leaves the deque in a valid state,
        // so a poisoned lock is still safe to reuse.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a record, evicting the oldest while over capacity.
    pub fn ingest(&self, record: ConsumedRecord) {
        let mut records = self.lock();
        records.push_back(record);
        while records.len() > self.capacity {
            records.pop_front();
        }
    }

    /// Copy out up to `limit` records (default
    /// [`DEFAULT_SNAPSHOT_LIMIT`]), newest first when requested, in
    /// insertion order otherwise.
    ///
    /// The returned vector is independent of the buffer and reflects one
    /// consistent point in time.
    pub fn snapshot(&self, limit: Option<usize>, newest_first: bool) -> Vec<ConsumedRecord> {
        let records = self.lock();
        let limit = limit.unwrap_or(DEFAULT_SNAPSHOT_LIMIT);
        if newest_first {
            records.iter().rev().take(limit).cloned().collect()
        } else {
            records.iter().take(limit).cloned().collect()
        }
    }

    /// Drop all retained records.
    pub fn clear(&self) {
        self.lock().clear();
        info!("Cleared all consumed records");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for RecentBuffer {
    fn default() -> Self {
        Self::new()
    }
}
