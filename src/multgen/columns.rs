// SPDX-License-Identifier: Apache-2.0

//! Weighted columns of not-yet-combined partial sums, and the worklist of
//! columns that still need reduction.

use bitvec::vec::BitVec;

use crate::aig::gate::AigOperand;

/// One multiset of literals per bit weight; column `i` has weight `2^i`.
#[derive(Debug, Clone)]
pub struct Columns {
    columns: Vec<Vec<AigOperand>>,
}

impl Columns {
    pub fn new(count: usize) -> Self {
        Self {
            columns: vec![Vec::new(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> &[AigOperand] {
        &self.columns[index]
    }

    pub fn entry_count(&self, index: usize) -> usize {
        self.columns[index].len()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.columns.iter().map(Vec::len).collect()
    }

    pub fn total_entries(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn push(&mut self, index: usize, entry: AigOperand) {
        self.columns[index].push(entry);
    }

    /// Removes the entry at `position`, keeping the order of the others.
    pub fn take_at(&mut self, index: usize, position: usize) -> AigOperand {
        self.columns[index].remove(position)
    }

    /// Removes every entry of the column, returning them in column order.
    pub fn drain(&mut self, index: usize) -> Vec<AigOperand> {
        std::mem::take(&mut self.columns[index])
    }
}

/// Columns queued for reduction, in enqueue order, with O(1) membership.
///
/// Selection is by position in the queue, so removal keeps the remaining
/// order stable: the random draws made against it must replay identically
/// for a given seed.
#[derive(Debug, Clone)]
pub struct ActiveColumns {
    order: Vec<usize>,
    queued: BitVec,
}

impl ActiveColumns {
    pub fn new(column_count: usize) -> Self {
        Self {
            order: Vec::new(),
            queued: BitVec::repeat(false, column_count),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, column: usize) -> bool {
        self.queued[column]
    }

    /// Column at `position` in the queue.
    pub fn get(&self, position: usize) -> usize {
        self.order[position]
    }

    /// Enqueues `column`; returns false if it was already queued.
    pub fn insert(&mut self, column: usize) -> bool {
        if self.queued[column] {
            return false;
        }
        self.queued.set(column, true);
        self.order.push(column);
        true
    }

    pub fn remove_at(&mut self, position: usize) -> usize {
        let column = self.order.remove(position);
        self.queued.set(column, false);
        column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aig::gate::AigRef;

    fn op(id: usize) -> AigOperand {
        AigRef { id }.into()
    }

    #[test]
    fn test_take_at_preserves_order() {
        let mut columns = Columns::new(2);
        for id in 1..=4 {
            columns.push(0, op(id));
        }
        assert_eq!(columns.take_at(0, 1), op(2));
        assert_eq!(columns.column(0), &[op(1), op(3), op(4)]);
        assert_eq!(columns.sizes(), vec![3, 0]);
        assert_eq!(columns.drain(0), vec![op(1), op(3), op(4)]);
        assert_eq!(columns.total_entries(), 0);
    }

    #[test]
    fn test_active_columns_membership() {
        let mut active = ActiveColumns::new(4);
        assert!(active.insert(2));
        assert!(active.insert(0));
        assert!(!active.insert(2));
        assert_eq!(active.len(), 2);
        assert_eq!(active.get(1), 0);
        assert_eq!(active.remove_at(0), 2);
        assert!(!active.contains(2));
        assert!(active.contains(0));
        assert!(active.insert(2));
        assert_eq!(active.get(1), 2);
    }
}
