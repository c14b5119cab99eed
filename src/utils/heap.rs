use std::{cmp::Ordering, collections::BinaryHeap};

/// Min-priority-queue of `(key, item)` pairs.
///
/// Keys only need a partial order so that floating point distances work; incomparable
/// keys (NaN) are treated as equal. Among equal keys, items leave the queue in the
/// order they were pushed, which keeps every algorithm built on top deterministic.
///
/// # Examples
/// ```
/// use pgraphs::utils::MinHeap;
///
/// let mut heap = MinHeap::new();
/// heap.push(2.5, 'b');
/// heap.push(1.0, 'a');
/// heap.push(2.5, 'c');
///
/// assert_eq!(heap.peek_min(), Some((&1.0, &'a')));
/// assert_eq!(heap.pop_min(), Some((1.0, 'a')));
/// assert_eq!(heap.pop_min(), Some((2.5, 'b')));
/// assert_eq!(heap.pop_min(), Some((2.5, 'c')));
/// assert!(heap.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct MinHeap<K, T> {
    heap: BinaryHeap<HeapEntry<K, T>>,
    pushed: u64,
}

#[derive(Debug, Clone)]
struct HeapEntry<K, T> {
    key: K,
    seq: u64,
    item: T,
}

impl<K: PartialOrd, T> PartialEq for HeapEntry<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd, T> Eq for HeapEntry<K, T> {}

impl<K: PartialOrd, T> PartialOrd for HeapEntry<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd, T> Ord for HeapEntry<K, T> {
    // `BinaryHeap` is a max-heap: smaller keys and earlier pushes compare greater
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .partial_cmp(&self.key)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<K: PartialOrd, T> Default for MinHeap<K, T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pushed: 0,
        }
    }
}

impl<K: PartialOrd, T> MinHeap<K, T> {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `item` with priority `key`
    pub fn push(&mut self, key: K, item: T) {
        self.heap.push(HeapEntry {
            key,
            seq: self.pushed,
            item,
        });
        self.pushed += 1;
    }

    /// Returns the entry with smallest key without removing it
    pub fn peek_min(&self) -> Option<(&K, &T)> {
        self.heap.peek().map(|e| (&e.key, &e.item))
    }

    /// Removes and returns the entry with smallest key
    pub fn pop_min(&mut self) -> Option<(K, T)> {
        self.heap.pop().map(|e| (e.key, e.item))
    }

    /// Returns the number of queued entries
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns *true* if no entries are queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<K: PartialOrd, T> Extend<(K, T)> for MinHeap<K, T> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, item) in iter {
            self.push(key, item);
        }
    }
}

impl<K: PartialOrd, T> FromIterator<(K, T)> for MinHeap<K, T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn pops_in_sorted_order() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);
        let mut keys: Vec<i32> = (0..200).map(|_| rng.random_range(-50..50)).collect();

        let mut heap: MinHeap<i32, ()> = keys.iter().map(|&k| (k, ())).collect();
        assert_eq!(heap.len(), keys.len());

        keys.sort_unstable();
        for k in keys {
            assert_eq!(heap.pop_min(), Some((k, ())));
        }
        assert_eq!(heap.pop_min(), None);
    }

    #[test]
    fn ties_are_fifo() {
        let mut heap = MinHeap::new();
        for i in 0..10 {
            heap.push(i % 2, i);
        }

        let order: Vec<_> = std::iter::from_fn(|| heap.pop_min().map(|(_, i)| i)).collect();
        assert_eq!(order, vec![0, 2, 4, 6, 8, 1, 3, 5, 7, 9]);
    }

    #[test]
    fn float_keys() {
        let mut heap = MinHeap::new();
        heap.push(0.5f64, "half");
        heap.push(-1.25, "neg");
        heap.push(3.0, "three");

        assert_eq!(heap.peek_min(), Some((&-1.25, &"neg")));
        assert_eq!(heap.pop_min().map(|(_, x)| x), Some("neg"));
        assert_eq!(heap.pop_min().map(|(_, x)| x), Some("half"));
    }
}
