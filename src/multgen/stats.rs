// SPDX-License-Identifier: Apache-2.0

use crate::multgen::realize::{AdderInputs, AdderRealization, CarryStrategy};

/// Counts of the structural decisions made while generating one multiplier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub and_gates: usize,
    /// Indexed by realization: `[A, B]`.
    pub half_adders: [usize; 2],
    pub full_adders: [usize; 2],
    pub reduction_steps: usize,
    pub cla_blocks: usize,
    pub cla_columns: usize,
    pub recursive_carries: usize,
    pub iterative_carries: usize,
}

fn realization_index(realization: AdderRealization) -> usize {
    match realization {
        AdderRealization::A => 0,
        AdderRealization::B => 1,
    }
}

impl GenerationStats {
    pub fn record_adder(&mut self, inputs: &AdderInputs, realization: AdderRealization) {
        let counts = match inputs {
            AdderInputs::Half(..) => &mut self.half_adders,
            AdderInputs::Full(..) => &mut self.full_adders,
        };
        counts[realization_index(realization)] += 1;
    }

    pub fn record_carry(&mut self, strategy: CarryStrategy) {
        match strategy {
            CarryStrategy::Recursive => self.recursive_carries += 1,
            CarryStrategy::Iterative => self.iterative_carries += 1,
        }
    }

    pub fn log_summary(&self) {
        log::info!("Statistics");
        log::info!("==========================================================");
        log::info!("  AND gates:            {}", self.and_gates);
        log::info!(
            "  half adders (A/B):    {}/{}",
            self.half_adders[0],
            self.half_adders[1]
        );
        log::info!(
            "  full adders (A/B):    {}/{}",
            self.full_adders[0],
            self.full_adders[1]
        );
        log::info!("  reduction steps:      {}", self.reduction_steps);
        log::info!(
            "  CLA blocks/columns:   {}/{}",
            self.cla_blocks,
            self.cla_columns
        );
        log::info!(
            "  CLA carries (rec/it): {}/{}",
            self.recursive_carries,
            self.iterative_carries
        );
    }
}
