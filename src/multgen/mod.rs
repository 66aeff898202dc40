// SPDX-License-Identifier: Apache-2.0

//! Randomized generation of unsigned array multipliers as AIGs.
//!
//! Generation runs in three sequential phases over one `MultGen` context:
//! partial-product layout, randomized column reduction, and final-stage
//! addition (optionally with carry-lookahead blocks). Every structural choice
//! is drawn from the injected `RandomSource`, so the same seed always
//! reproduces the same circuit.
//!
//! ```
//! use xlsynth_multfuzz::multgen::{generate_multiplier, MultGenOptions};
//! use xlsynth_multfuzz::multgen::sampler::SeededSampler;
//!
//! let mut rng = SeededSampler::from_seed(7);
//! let result = generate_multiplier(&MultGenOptions::new(4), &mut rng).unwrap();
//! assert_eq!(result.gate_fn.output_bit_count(), 8);
//! ```

mod cla;
pub mod columns;
mod final_stage;
mod layout;
pub mod realize;
mod reduce;
pub mod sampler;
pub mod stats;
pub mod verify;

use crate::aig::gate::{AigBitVector, AigOperand, GateFn};
use crate::aig::gate_builder::GateBuilder;
use crate::error::MultGenError;
use crate::multgen::columns::Columns;
use crate::multgen::realize::{AdderInputs, AdderRealization, CarryMode, realize_adder};
use crate::multgen::sampler::RandomSource;
use crate::multgen::stats::GenerationStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultGenOptions {
    /// Bit width of each operand; the product has twice as many bits.
    pub width: usize,
    /// Whether the final stage may instantiate carry-lookahead blocks.
    pub use_cla: bool,
}

impl MultGenOptions {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            use_cla: true,
        }
    }
}

#[derive(Debug)]
pub struct MultGenResult {
    pub gate_fn: GateFn,
    pub stats: GenerationStats,
}

/// Per-run synthesis state: the graph under construction, the weighted
/// columns, the output slots and the random source driving every decision.
pub struct MultGen<'r, R: RandomSource + ?Sized> {
    width: usize,
    gb: GateBuilder,
    a: AigBitVector,
    b: AigBitVector,
    columns: Columns,
    outputs: Vec<Option<AigOperand>>,
    rng: &'r mut R,
    stats: GenerationStats,
}

impl<'r, R: RandomSource + ?Sized> MultGen<'r, R> {
    pub fn new(width: usize, rng: &'r mut R) -> Result<Self, MultGenError> {
        if width == 0 {
            return Err(MultGenError::InvalidWidth(width));
        }
        let mut gb = GateBuilder::new(format!("mult_{}", width));
        let a = gb.add_input("a".to_string(), width);
        let b = gb.add_input("b".to_string(), width);
        Ok(Self {
            width,
            gb,
            a,
            b,
            columns: Columns::new(2 * width),
            outputs: vec![None; 2 * width],
            rng,
            stats: GenerationStats::default(),
        })
    }

    pub fn column_sizes(&self) -> Vec<usize> {
        self.columns.sizes()
    }

    fn last_column(&self) -> usize {
        2 * self.width - 1
    }

    /// Realizes an adder over `inputs` at weight `column` with a randomly
    /// chosen realization, queueing its carry into the next column.
    ///
    /// Returns the sum literal; the caller decides where it goes.
    fn combine(&mut self, inputs: AdderInputs, column: usize) -> AigOperand {
        let realization = AdderRealization::choose(&mut *self.rng);
        let mode = if column == self.last_column() {
            CarryMode::Final
        } else {
            CarryMode::Propagate
        };
        let output = realize_adder(&mut self.gb, inputs, realization, mode);
        self.stats.record_adder(&inputs, realization);
        log::trace!(
            "column {}: {:?} {}-input adder {:?} -> sum {} carry {:?}",
            column,
            realization,
            inputs.arity(),
            inputs,
            output.sum.to_literal(),
            output.carry.map(|c| c.to_literal())
        );
        if let Some(carry) = output.carry {
            self.columns.push(column + 1, carry);
        }
        output.sum
    }

    fn set_output(&mut self, column: usize, bit: AigOperand) {
        log::trace!("output o{} = {}", column, bit.to_literal());
        debug_assert!(
            self.outputs[column].is_none(),
            "output {} assigned twice",
            column
        );
        self.outputs[column] = Some(bit);
    }

    /// Publishes the product as output `o` and hands back the built graph.
    pub fn finish(mut self) -> Result<MultGenResult, MultGenError> {
        let mut bits = Vec::with_capacity(self.outputs.len());
        for (column, bit) in self.outputs.iter().enumerate() {
            match bit {
                Some(bit) => bits.push(*bit),
                None => return Err(MultGenError::EmptyColumn { column }),
            }
        }
        self.gb
            .add_output("o".to_string(), AigBitVector::from_lsb_is_index_0(&bits));
        let gate_fn = self.gb.build();
        self.stats.and_gates = gate_fn.and_count();
        Ok(MultGenResult {
            gate_fn,
            stats: self.stats,
        })
    }
}

/// Generates one multiplier circuit, running all phases in order.
pub fn generate_multiplier<R: RandomSource + ?Sized>(
    options: &MultGenOptions,
    rng: &mut R,
) -> Result<MultGenResult, MultGenError> {
    let mut mg = MultGen::new(options.width, rng)?;

    log::debug!("Generating partial products");
    mg.layout_partial_products();
    log::debug!("column sizes after layout: {:?}", mg.column_sizes());

    log::debug!("Reducing partial product columns");
    mg.reduce_columns();
    log::debug!("column sizes after reduction: {:?}", mg.column_sizes());

    log::debug!("Assembling final stage (cla: {})", options.use_cla);
    mg.assemble_final_stage(options.use_cla)?;

    mg.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multgen::sampler::SeededSampler;
    use crate::multgen::sampler::testing::ScriptedSource;
    use crate::multgen::verify::check_product_exhaustive;

    #[test]
    fn test_zero_width_is_rejected() {
        let mut rng = ScriptedSource::new(&[]);
        let err = generate_multiplier(&MultGenOptions::new(0), &mut rng).unwrap_err();
        assert!(matches!(err, MultGenError::InvalidWidth(0)));
        assert!(rng.requests.is_empty());
    }

    #[test]
    fn test_unfinished_outputs_are_reported() {
        let mut rng = ScriptedSource::new(&[]);
        let mg = MultGen::new(2, &mut rng).unwrap();
        let err = mg.finish().unwrap_err();
        assert!(matches!(err, MultGenError::EmptyColumn { column: 0 }));
    }

    #[test]
    fn test_width_one_is_single_and() {
        let mut rng = ScriptedSource::new(&[]);
        let result = generate_multiplier(&MultGenOptions::new(1), &mut rng).unwrap();
        let gate_fn = &result.gate_fn;
        assert_eq!(gate_fn.and_count(), 1);
        assert_eq!(gate_fn.output_bit_count(), 2);
        // Nothing to reduce and nothing to add: no decision is drawn.
        assert!(rng.requests.is_empty());
        assert_eq!(
            gate_fn.to_string(),
            "fn mult_1(a: bits[1] = [%1], b: bits[1] = [%2]) -> (o: bits[2] = [%3, %0]) {\n  %3 = and(a[0], b[0])\n  o[0] = %3\n  o[1] = %0\n}"
        );
        check_product_exhaustive(gate_fn, 1).unwrap();
    }

    #[test]
    fn test_without_cla_records_no_blocks() {
        for seed in 0..16 {
            let mut rng = SeededSampler::from_seed(seed);
            let options = MultGenOptions {
                width: 5,
                use_cla: false,
            };
            let result = generate_multiplier(&options, &mut rng).unwrap();
            assert_eq!(result.stats.cla_blocks, 0);
            assert_eq!(
                result.stats.recursive_carries + result.stats.iterative_carries,
                0
            );
        }
    }

    #[test]
    fn test_stats_gate_count_matches_graph() {
        let mut rng = SeededSampler::from_seed(3);
        let result = generate_multiplier(&MultGenOptions::new(6), &mut rng).unwrap();
        assert_eq!(result.stats.and_gates, result.gate_fn.and_count());
        assert!(result.stats.reduction_steps > 0);
    }
}
