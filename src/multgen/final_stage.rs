// SPDX-License-Identifier: Apache-2.0

use crate::error::MultGenError;
use crate::multgen::MultGen;
use crate::multgen::realize::AdderInputs;
use crate::multgen::sampler::RandomSource;

impl<R: RandomSource + ?Sized> MultGen<'_, R> {
    /// Turns every column, lowest weight first, into one output bit.
    ///
    /// A column's entries plus the carry from the column below are added with
    /// a half adder, a full adder, or (for three entries below the top
    /// column, when enabled) a carry-lookahead block spanning several
    /// columns.
    pub fn assemble_final_stage(&mut self, use_cla: bool) -> Result<(), MultGenError> {
        let last = self.last_column();
        let mut column = 0;
        while column <= last {
            match self.columns.entry_count(column) {
                0 => return Err(MultGenError::EmptyColumn { column }),
                1 => {
                    let entries = self.columns.drain(column);
                    self.set_output(column, entries[0]);
                }
                2 => {
                    let entries = self.columns.drain(column);
                    let sum = self.combine(AdderInputs::Half(entries[0], entries[1]), column);
                    self.set_output(column, sum);
                }
                3 => {
                    // Two out of three columns eligible for a block get one.
                    if use_cla && column < last && self.rng.sample_below(3) != 0 {
                        let covered = self.carry_lookahead(column);
                        if covered > 0 {
                            column += covered;
                            continue;
                        }
                    }
                    let entries = self.columns.drain(column);
                    let sum = self.combine(
                        AdderInputs::Full(entries[0], entries[1], entries[2]),
                        column,
                    );
                    self.set_output(column, sum);
                }
                entries => return Err(MultGenError::OverfullColumn { column, entries }),
            }
            column += 1;
        }
        Ok(())
    }
}
