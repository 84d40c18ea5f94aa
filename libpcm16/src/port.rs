//! one-way block hand-off between the render thread and a listener
//!
//! The sending half lives inside a processor on the render thread. Posting
//! never blocks: a full queue or a vanished listener drops the block and bumps
//! a counter. Both halves share the counters through atomics only.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use serde::Serialize;

use crate::core::{ConvertedBlock, DEFAULT_PORT_CAPACITY};

#[derive(Debug, Default)]
struct PortCounters {
    posted: AtomicU64,
    dropped: AtomicU64,
}

/// snapshot of a port's delivery counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PortStats {
    /// Blocks accepted into the queue
    pub posted: u64,
    /// Blocks discarded because the queue was full or the listener was gone
    pub dropped: u64,
}

impl PortCounters {
    fn snapshot(&self) -> PortStats {
        PortStats {
            posted: self.posted.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Create a port holding at most `capacity` blocks in flight
///
/// A capacity of zero is raised to one.
pub fn channel(capacity: usize) -> (BlockSender, BlockReceiver) {
    let capacity = capacity.max(1);
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    let counters = Arc::new(PortCounters::default());
    log::debug!("opened block port with capacity {}", capacity);
    (
        BlockSender {
            tx,
            counters: Arc::clone(&counters),
        },
        BlockReceiver { rx, counters },
    )
}

/// Port with the default capacity
pub fn default_channel() -> (BlockSender, BlockReceiver) {
    channel(DEFAULT_PORT_CAPACITY)
}

/// sending half, owned by a processor
pub struct BlockSender {
    tx: Sender<ConvertedBlock>,
    counters: Arc<PortCounters>,
}

impl BlockSender {
    /// Move a block to the listener
    ///
    /// Returns false when the block was dropped. Safe to call on the render
    /// thread: no locks, no waiting, no logging.
    pub fn post(&self, block: ConvertedBlock) -> bool {
        match self.tx.try_send(block) {
            Ok(()) => {
                self.counters.posted.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    pub fn stats(&self) -> PortStats {
        self.counters.snapshot()
    }

    pub fn capacity(&self) -> usize {
        self.tx.capacity().unwrap_or(usize::MAX)
    }
}

/// receiving half, owned by the listener
pub struct BlockReceiver {
    rx: Receiver<ConvertedBlock>,
    counters: Arc<PortCounters>,
}

impl BlockReceiver {
    /// Wait for the next block; None once every sender is gone and the queue is empty
    pub fn recv(&self) -> Option<ConvertedBlock> {
        self.rx.recv().ok()
    }

    /// Next block if one is queued
    pub fn try_recv(&self) -> Option<ConvertedBlock> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout`; None on timeout or disconnect
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ConvertedBlock> {
        match self.rx.recv_timeout(timeout) {
            Ok(block) => Some(block),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Blocks until the senders hang up
    pub fn iter(&self) -> impl Iterator<Item = ConvertedBlock> + '_ {
        self.rx.iter()
    }

    /// Everything queued right now
    pub fn drain(&self) -> Vec<ConvertedBlock> {
        self.rx.try_iter().collect()
    }

    /// blocks waiting in the queue
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    pub fn stats(&self) -> PortStats {
        self.counters.snapshot()
    }
}
