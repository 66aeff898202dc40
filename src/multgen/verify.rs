// SPDX-License-Identifier: Apache-2.0

//! Functional checks of generated multipliers by exhaustive simulation.

use crate::aig::gate::GateFn;
use crate::aig_sim::gate_sim::{self, bits_from_u64, u64_from_bits};
use crate::error::MultGenError;

/// Widest operand for which the exhaustive check stays practical.
pub const MAX_EXHAUSTIVE_CHECK_WIDTH: usize = 8;

/// Evaluates the multiplier `gate_fn` (inputs `a` and `b`, each `width`
/// bits) on one operand pair.
pub fn evaluate_product(gate_fn: &GateFn, width: usize, a: u64, b: u64) -> u64 {
    let result = gate_sim::eval(
        gate_fn,
        &[bits_from_u64(a, width), bits_from_u64(b, width)],
    );
    u64_from_bits(&result.outputs[0])
}

/// Checks `gate_fn` against `a * b` for every pair of `width`-bit operands.
pub fn check_product_exhaustive(gate_fn: &GateFn, width: usize) -> Result<(), MultGenError> {
    assert!(
        width <= MAX_EXHAUSTIVE_CHECK_WIDTH,
        "exhaustive check of width {} is too expensive",
        width
    );
    assert_eq!(gate_fn.input_bit_count(), 2 * width);
    assert_eq!(gate_fn.output_bit_count(), 2 * width);
    for a in 0..(1u64 << width) {
        for b in 0..(1u64 << width) {
            let got = evaluate_product(gate_fn, width, a, b);
            if got != a * b {
                return Err(MultGenError::SelfCheck { a, b, got });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aig::gate::AigBitVector;
    use crate::aig::gate_builder::GateBuilder;

    #[test]
    fn test_detects_wrong_product() {
        // o = {a & b, a}: correct for a=0 or b=1 only.
        let mut gb = GateBuilder::new("broken".to_string());
        let a = *gb.add_input("a".to_string(), 1).get_lsb(0);
        let b = *gb.add_input("b".to_string(), 1).get_lsb(0);
        let ab = gb.add_and_binary(a, b);
        gb.add_output("o".to_string(), AigBitVector::from_lsb_is_index_0(&[ab, a]));
        let gate_fn = gb.build();
        let err = check_product_exhaustive(&gate_fn, 1).unwrap_err();
        assert!(matches!(err, MultGenError::SelfCheck { a: 1, b: 0, got: 2 }));
        assert_eq!(err.exit_code(), 41);
    }
}
