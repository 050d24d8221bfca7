//! Binary min-heap of grid cells keyed on f-score, with a side table from
//! cell index to heap slot so a queued cell's key can be lowered in place.
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenEntry {
    /// Row-major cell index.
    pub node: usize,
    pub f: f64,
    pub h: f64,
}

impl OpenEntry {
    /// Lower f first, then lower h (closer to the goal), then lower index,
    /// so equal inputs always pop in the same order.
    fn precedes(&self, other: &OpenEntry) -> bool {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.h.total_cmp(&other.h))
            .then_with(|| self.node.cmp(&other.node))
            == Ordering::Less
    }
}

pub struct OpenSet {
    heap: Vec<OpenEntry>,
    /// `slot[node]` is the heap position of `node`, if queued.
    slot: Vec<Option<usize>>,
}

impl OpenSet {
    /// Open set for a grid of `capacity` cells.
    pub fn new(capacity: usize) -> Self {
        Self { heap: Vec::new(), slot: vec![None; capacity] }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, node: usize) -> bool {
        self.slot[node].is_some()
    }

    /// Queue `node`, or lower its key if it is already queued with a worse one.
    /// A key that is not an improvement leaves the entry untouched.
    pub fn push_or_decrease(&mut self, node: usize, f: f64, h: f64) {
        let entry = OpenEntry { node, f, h };
        match self.slot[node] {
            Some(pos) => {
                if entry.precedes(&self.heap[pos]) {
                    self.heap[pos] = entry;
                    self.sift_up(pos);
                }
            }
            None => {
                self.heap.push(entry);
                let pos = self.heap.len() - 1;
                self.slot[node] = Some(pos);
                self.sift_up(pos);
            }
        }
    }

    /// Remove and return the entry with the smallest key.
    pub fn pop(&mut self) -> Option<OpenEntry> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let top = self.heap.pop()?;
        self.slot[top.node] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slot[self.heap[a].node] = Some(a);
        self.slot[self.heap[b].node] = Some(b);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.heap[pos].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut best = pos;
            if left < len && self.heap[left].precedes(&self.heap[best]) {
                best = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[best]) {
                best = right;
            }
            if best == pos {
                break;
            }
            self.swap(pos, best);
            pos = best;
        }
    }
}
