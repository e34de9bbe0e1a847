//! Merging partition counts into the corpus-wide counts
use parking_lot::Mutex;

use crate::counts::WordCounts;

/// Counts merged so far and how many partitions they came from
#[derive(Debug, Default)]
struct Merged {
    counts: WordCounts,
    partitions: usize,
}

/// Owner of the global counts while partitions are still completing
///
/// Workers count their partition without holding anything and only take the lock to fold the
/// finished map in, so the lock is held for the size of one partition map, never for a scan.
#[derive(Debug, Default)]
pub struct Aggregator {
    merged: Mutex<Merged>,
}

impl Aggregator {
    pub fn new() -> Self {
        Default::default()
    }

    /// Fold one finished partition in. Call exactly once per partition, in any order.
    pub fn merge(&self, partial: WordCounts) {
        let entries = partial.len();
        let partitions = {
            let mut merged = self.merged.lock();
            merged.counts.merge(partial);
            merged.partitions += 1;
            merged.partitions
        };
        debug!("Merged partition #{} ({} entries)", partitions, entries);
    }

    /// How many partitions have been merged so far
    pub fn partitions(&self) -> usize {
        self.merged.lock().partitions
    }

    pub fn into_counts(self) -> WordCounts {
        self.merged.into_inner().counts
    }
}
