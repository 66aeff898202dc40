// SPDX-License-Identifier: Apache-2.0

use crate::multgen::MultGen;
use crate::multgen::columns::ActiveColumns;
use crate::multgen::realize::AdderInputs;
use crate::multgen::sampler::RandomSource;

/// Columns with at least this many entries still need reduction.
const REDUCTION_THRESHOLD: usize = 3;

impl<R: RandomSource + ?Sized> MultGen<'_, R> {
    /// Combines entries of over-full columns with random half and full adders
    /// until every column holds fewer than three entries.
    ///
    /// Every step removes at least one entry from the columns overall, so the
    /// loop terminates.
    pub fn reduce_columns(&mut self) {
        let last = self.last_column();
        let mut active = ActiveColumns::new(self.columns.len());
        for column in 0..self.columns.len() {
            if self.columns.entry_count(column) >= REDUCTION_THRESHOLD {
                active.insert(column);
            }
        }

        while !active.is_empty() {
            let position = self.rng.sample_below(active.len());
            let column = active.get(position);
            let inputs = self.take_reduction_inputs(column);
            let sum = self.combine(inputs, column);
            self.columns.push(column, sum);
            self.stats.reduction_steps += 1;

            if self.columns.entry_count(column) < REDUCTION_THRESHOLD {
                active.remove_at(position);
            }
            if column < last && self.columns.entry_count(column + 1) >= REDUCTION_THRESHOLD {
                active.insert(column + 1);
            }
        }
        log::debug!(
            "reduction done after {} steps; {} entries left",
            self.stats.reduction_steps,
            self.columns.total_entries()
        );
    }

    /// Removes two random entries from `column`, plus a third one unless a
    /// half adder was drawn (probability 1/3).
    fn take_reduction_inputs(&mut self, column: usize) -> AdderInputs {
        let mut remaining = self.columns.entry_count(column);
        let a_index = self.rng.sample_below(remaining);
        let a = self.columns.take_at(column, a_index);
        remaining -= 1;
        let b_index = self.rng.sample_below(remaining);
        let b = self.columns.take_at(column, b_index);
        remaining -= 1;
        if self.rng.sample_below(3) == 0 {
            return AdderInputs::Half(a, b);
        }
        let c_index = self.rng.sample_below(remaining);
        let c = self.columns.take_at(column, c_index);
        AdderInputs::Full(a, b, c)
    }
}
