//! Range-sum segment tree
//!
//! A fixed-length sequence supporting O(log n) point updates and O(log n)
//! inclusive range sums. The implicit binary tree lives in a flat array of
//! `4n` slots: node `i` covers `[start, end]`, its children are `2i + 1`
//! (covering `[start, mid]`) and `2i + 2` (covering `[mid + 1, end]`).
//!
//! Bounds are checked up front. A query whose range is inverted or reaches
//! past the end, or an update past the end, is rejected rather than
//! clamped. An empty tree answers every query with zero and ignores updates.

use crate::{Error, Result};
use std::ops::Add;

#[derive(Debug, Clone)]
pub struct RangeSumStructure<T = i64> {
    len: usize,
    tree: Vec<T>,
}

impl<T> RangeSumStructure<T>
where
    T: Copy + Default + Add<Output = T>,
{
    /// Build the tree over `values` in O(n)
    pub fn new(values: &[T]) -> Self {
        let len = values.len();
        let mut structure = Self {
            len,
            tree: vec![T::default(); 4 * len],
        };

        if len > 0 {
            structure.build(values, 0, 0, len - 1);
        }
        structure
    }

    fn build(&mut self, values: &[T], node: usize, start: usize, end: usize) {
        if start == end {
            self.tree[node] = values[start];
            return;
        }

        let mid = start + (end - start) / 2;
        self.build(values, 2 * node + 1, start, mid);
        self.build(values, 2 * node + 2, mid + 1, end);
        self.tree[node] = self.tree[2 * node + 1] + self.tree[2 * node + 2];
    }

    /// Logical length fixed at construction
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of the values at indices `left..=right`
    pub fn query(&self, left: usize, right: usize) -> Result<T> {
        if self.len == 0 {
            return Ok(T::default());
        }
        if left > right || right >= self.len {
            return Err(Error::invalid_range(left, right, self.len));
        }

        Ok(self.query_node(0, 0, self.len - 1, left, right))
    }

    fn query_node(&self, node: usize, start: usize, end: usize, left: usize, right: usize) -> T {
        if right < start || left > end {
            return T::default();
        }
        if left <= start && end <= right {
            return self.tree[node];
        }

        let mid = start + (end - start) / 2;
        self.query_node(2 * node + 1, start, mid, left, right)
            + self.query_node(2 * node + 2, mid + 1, end, left, right)
    }

    /// Current value at `index`
    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        Some(self.query_node(0, 0, self.len - 1, index, index))
    }

    /// Set the value at `index` and recompute every ancestor sum
    pub fn update(&mut self, index: usize, value: T) -> Result<()> {
        if self.len == 0 {
            return Ok(());
        }
        if index >= self.len {
            return Err(Error::index_out_of_bounds(index, self.len));
        }

        self.update_node(0, 0, self.len - 1, index, value);
        Ok(())
    }

    fn update_node(&mut self, node: usize, start: usize, end: usize, index: usize, value: T) {
        if start == end {
            self.tree[node] = value;
            return;
        }

        let mid = start + (end - start) / 2;
        if index <= mid {
            self.update_node(2 * node + 1, start, mid, index, value);
        } else {
            self.update_node(2 * node + 2, mid + 1, end, index, value);
        }
        self.tree[node] = self.tree[2 * node + 1] + self.tree[2 * node + 2];
    }
}
