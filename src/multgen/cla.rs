// SPDX-License-Identifier: Apache-2.0

use crate::aig::gate::AigOperand;
use crate::multgen::MultGen;
use crate::multgen::realize::{CarryStrategy, realize_lookahead_carry};
use crate::multgen::sampler::RandomSource;

/// How the carries of one lookahead block are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarryPolicy {
    /// Each position draws its own strategy.
    Mixed,
    AllIterative,
    AllRecursive,
}

impl CarryPolicy {
    fn choose<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        match rng.sample_below(3) {
            0 => CarryPolicy::Mixed,
            1 => CarryPolicy::AllIterative,
            _ => CarryPolicy::AllRecursive,
        }
    }

    fn strategy_for_position<R: RandomSource + ?Sized>(self, rng: &mut R) -> CarryStrategy {
        match self {
            CarryPolicy::Mixed => {
                if rng.sample_below(2) == 0 {
                    CarryStrategy::Iterative
                } else {
                    CarryStrategy::Recursive
                }
            }
            CarryPolicy::AllIterative => CarryStrategy::Iterative,
            CarryPolicy::AllRecursive => CarryStrategy::Recursive,
        }
    }
}

impl<R: RandomSource + ?Sized> MultGen<'_, R> {
    /// Adds a run of columns starting at `start` with one carry-lookahead
    /// block, writing an output bit per covered column.
    ///
    /// `start` must hold three entries; one of them becomes the block's carry
    /// in. Returns the number of columns covered, or 0 if no block could be
    /// placed, in which case nothing was consumed.
    pub(crate) fn carry_lookahead(&mut self, start: usize) -> usize {
        debug_assert_eq!(self.columns.entry_count(start), 3);
        let last = self.last_column();
        // The block's carry out must land in a column that still exists.
        let run = (start..last)
            .take_while(|column| self.columns.entry_count(*column) >= 2)
            .count();
        if run == 0 {
            log::debug!("column {}: no room for a lookahead block", start);
            return 0;
        }
        let size = self.rng.sample_below(run) + 1;
        log::trace!(
            "column {}: lookahead block of {} columns (run {})",
            start,
            size,
            run
        );

        let carry_index = self.rng.sample_below(3);
        let carry_in = self.columns.take_at(start, carry_index);

        let mut propagate: Vec<AigOperand> = Vec::with_capacity(size);
        let mut generate: Vec<AigOperand> = Vec::with_capacity(size);
        for column in start..start + size {
            let entries = self.columns.drain(column);
            debug_assert_eq!(entries.len(), 2, "column {}", column);
            propagate.push(self.gb.add_xor_binary(entries[0], entries[1]));
            generate.push(self.gb.add_and_binary(entries[0], entries[1]));
        }

        let policy = CarryPolicy::choose(&mut *self.rng);
        log::trace!("column {}: {:?} carry policy", start, policy);

        let mut carry = carry_in;
        for position in 0..size {
            let sum = self.gb.add_xor_binary(carry, propagate[position]);
            let strategy = policy.strategy_for_position(&mut *self.rng);
            carry = realize_lookahead_carry(
                &mut self.gb,
                strategy,
                position,
                carry_in,
                carry,
                &propagate,
                &generate,
            );
            self.stats.record_carry(strategy);
            log::trace!(
                "column {}: {:?} lookahead carry {}",
                start + position,
                strategy,
                carry.to_literal()
            );
            self.set_output(start + position, sum);
        }

        self.columns.push(start + size, carry);
        self.stats.cla_blocks += 1;
        self.stats.cla_columns += size;
        size
    }
}
