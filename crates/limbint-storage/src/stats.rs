//! Thread-local storage statistics.
//!
//! Shared limb buffers are single-threaded, so the counters are kept per
//! thread. Tests running on separate threads never see each other's counts.

use std::cell::Cell;

/// Snapshot of storage transitions on the current thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Inline sequences that grew past the inline capacity onto the heap.
    pub promotions: u64,
    /// Heap sequences that shrank back into inline form.
    pub demotions: u64,
    /// Private copies taken because a shared buffer was about to be written.
    pub detaches: u64,
}

thread_local! {
    static PROMOTIONS: Cell<u64> = const { Cell::new(0) };
    static DEMOTIONS: Cell<u64> = const { Cell::new(0) };
    static DETACHES: Cell<u64> = const { Cell::new(0) };
}

fn bump(counter: &'static std::thread::LocalKey<Cell<u64>>) {
    counter.with(|c| c.set(c.get() + 1));
}

/// Take a snapshot of the current thread's counters.
#[must_use]
pub fn snapshot() -> StorageStats {
    StorageStats {
        promotions: PROMOTIONS.with(Cell::get),
        demotions: DEMOTIONS.with(Cell::get),
        detaches: DETACHES.with(Cell::get),
    }
}

/// Reset the current thread's counters.
pub fn reset() {
    PROMOTIONS.with(|c| c.set(0));
    DEMOTIONS.with(|c| c.set(0));
    DETACHES.with(|c| c.set(0));
}

pub(crate) fn record_promotion() {
    bump(&PROMOTIONS);
}

pub(crate) fn record_demotion() {
    bump(&DEMOTIONS);
}

pub(crate) fn record_detach() {
    bump(&DETACHES);
}

impl StorageStats {
    /// Counters accumulated since `earlier` was taken.
    #[must_use]
    pub fn since(&self, earlier: &StorageStats) -> StorageStats {
        StorageStats {
            promotions: self.promotions - earlier.promotions,
            demotions: self.demotions - earlier.demotions,
            detaches: self.detaches - earlier.detaches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_thread_starts_zeroed() {
        let snap = std::thread::spawn(snapshot).join().unwrap();
        assert_eq!(snap, StorageStats::default());
    }

    #[test]
    fn record_and_snapshot() {
        reset();
        record_promotion();
        record_promotion();
        record_demotion();
        record_detach();
        record_detach();
        record_detach();
        let snap = snapshot();
        assert_eq!(snap.promotions, 2);
        assert_eq!(snap.demotions, 1);
        assert_eq!(snap.detaches, 3);
    }

    #[test]
    fn reset_clears_counters() {
        record_promotion();
        record_detach();
        reset();
        assert_eq!(snapshot(), StorageStats::default());
    }

    #[test]
    fn since_subtracts() {
        reset();
        record_detach();
        let before = snapshot();
        record_detach();
        record_promotion();
        let delta = snapshot().since(&before);
        assert_eq!(delta.detaches, 1);
        assert_eq!(delta.promotions, 1);
        assert_eq!(delta.demotions, 0);
    }
}
