// crates/uiqvga-core/src/search/topn.rs
//
// Bounded best-N keeper. Keys are (score, ordinal): lower score wins, and on
// equal scores the earlier ordinal wins, so merging per-worker keepers gives
// the same result as one sequential pass.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<T> {
    score: f64,
    ordinal: u64,
    item: T,
}

impl<T> Entry<T> {
    #[inline]
    fn key_cmp(&self, score: f64, ordinal: u64) -> Ordering {
        self.score.total_cmp(&score).then(self.ordinal.cmp(&ordinal))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other.score, other.ordinal)
    }
}

/// Max-heap on the key, so the current worst retained entry sits on top.
pub struct TopN<T> {
    cap: usize,
    heap: BinaryHeap<Entry<T>>,
}

impl<T> TopN<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            heap: BinaryHeap::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Would an entry with this key be retained?
    #[inline]
    pub fn admits(&self, score: f64, ordinal: u64) -> bool {
        if self.cap == 0 {
            return false;
        }
        match self.heap.peek() {
            Some(worst) if self.heap.len() >= self.cap => worst.key_cmp(score, ordinal) == Ordering::Greater,
            _ => true,
        }
    }

    /// Offer an item; returns false when it was dropped.
    pub fn offer(&mut self, score: f64, ordinal: u64, item: T) -> bool {
        if !self.admits(score, ordinal) {
            return false;
        }
        self.heap.push(Entry { score, ordinal, item });
        if self.heap.len() > self.cap {
            self.heap.pop();
        }
        true
    }

    pub fn merge(mut self, other: TopN<T>) -> TopN<T> {
        for e in other.heap {
            self.offer(e.score, e.ordinal, e.item);
        }
        self
    }

    /// Best first.
    pub fn into_sorted(self) -> Vec<(f64, u64, T)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|e| (e.score, e.ordinal, e.item))
            .collect()
    }
}
