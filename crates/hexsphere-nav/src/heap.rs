//! Indexed binary min-heap with in-place priority updates.
//!
//! Items are dense `usize` ids. A side table maps each id to its current
//! heap slot, so membership tests are O(1) and a changed priority can be
//! re-sifted without a linear search.

use std::cmp::Ordering;

/// A* priority: total cost first, then heuristic.
#[derive(Clone, Copy, Debug)]
pub struct NavCost {
    /// Cost from start plus heuristic to goal.
    pub f: f32,
    /// Heuristic to goal. Breaks ties in `f`.
    pub h: f32,
}

impl NavCost {
    /// Creates a priority from the cost so far and the heuristic.
    #[must_use]
    pub fn new(g: f32, h: f32) -> Self {
        Self { f: g + h, h }
    }
}

impl PartialEq for NavCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NavCost {}

impl PartialOrd for NavCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NavCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.h.total_cmp(&other.h))
    }
}

/// Min-heap over item ids with a slot side table.
#[derive(Clone, Debug)]
pub struct IndexedHeap<P> {
    items: Vec<(usize, P)>,
    slots: Vec<Option<usize>>,
}

impl<P: Ord> Default for IndexedHeap<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ord> IndexedHeap<P> {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Creates an empty heap sized for ids below `ids`.
    #[must_use]
    pub fn with_capacity(ids: usize) -> Self {
        Self {
            items: Vec::with_capacity(ids),
            slots: vec![None; ids],
        }
    }

    /// Number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `id` is currently queued.
    #[must_use]
    pub fn contains(&self, id: usize) -> bool {
        matches!(self.slots.get(id), Some(Some(_)))
    }

    /// Current priority of `id`, if queued.
    #[must_use]
    pub fn priority(&self, id: usize) -> Option<&P> {
        let slot = (*self.slots.get(id)?)?;
        Some(&self.items[slot].1)
    }

    /// Queues `id` with `priority`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already queued. Check [`contains`](Self::contains)
    /// first and use [`update_item`](Self::update_item) instead.
    pub fn add(&mut self, id: usize, priority: P) {
        assert!(!self.contains(id), "item {id} is already in the heap");
        if id >= self.slots.len() {
            self.slots.resize(id + 1, None);
        }
        let slot = self.items.len();
        self.items.push((id, priority));
        self.slots[id] = Some(slot);
        self.sift_up(slot);
    }

    /// Removes and returns the item with the smallest priority.
    pub fn remove_first(&mut self) -> Option<(usize, P)> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.swap(0, last);
        let (id, priority) = self.items.pop()?;
        self.slots[id] = None;
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Some((id, priority))
    }

    /// Replaces the priority of a queued item and restores heap order.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not queued.
    pub fn update_item(&mut self, id: usize, priority: P) {
        let Some(Some(slot)) = self.slots.get(id).copied() else {
            panic!("item {id} is not in the heap");
        };
        self.items[slot].1 = priority;
        let slot = self.sift_up(slot);
        self.sift_down(slot);
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        for (id, _) in self.items.drain(..) {
            self.slots[id] = None;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
        self.slots[self.items[a].0] = Some(a);
        self.slots[self.items[b].0] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.items[slot].1 >= self.items[parent].1 {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.items[left].1 < self.items[smallest].1 {
                smallest = left;
            }
            if right < len && self.items[right].1 < self.items[smallest].1 {
                smallest = right;
            }
            if smallest == slot {
                return;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}
