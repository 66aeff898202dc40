// SPDX-License-Identifier: Apache-2.0

use std::iter::zip;

use bitvec::vec::BitVec;

use crate::aig::gate::{AigNode, AigOperand, GateFn};

pub struct GateSimResult {
    /// One bit vector per `GateFn` output, index 0 is the LSb.
    pub outputs: Vec<BitVec>,
    /// Value of every node (non-negated), indexed by node id.
    pub all_values: BitVec,
}

/// Evaluates `gate_fn` on one input assignment.
///
/// Nodes are visited in index order; the builder only ever references
/// already-allocated nodes, so that order is topological.
pub fn eval(gate_fn: &GateFn, inputs: &[BitVec]) -> GateSimResult {
    assert_eq!(inputs.len(), gate_fn.inputs.len());

    let mut values: BitVec = BitVec::repeat(false, gate_fn.gates.len());

    for (input, gate_fn_input) in zip(inputs, gate_fn.inputs.iter()) {
        assert_eq!(
            input.len(),
            gate_fn_input.get_bit_count(),
            "input '{}' width mismatch",
            gate_fn_input.name
        );
        for (bit_index, operand) in gate_fn_input.bit_vector.iter_lsb_to_msb().enumerate() {
            values.set(operand.node.id, input[bit_index] ^ operand.negated);
        }
    }

    let operand_value =
        |values: &BitVec, operand: &AigOperand| -> bool { values[operand.node.id] ^ operand.negated };

    for (id, node) in gate_fn.gates.iter().enumerate() {
        match node {
            AigNode::Input { .. } => {}
            AigNode::Literal(value) => values.set(id, *value),
            AigNode::And2 { a, b } => {
                debug_assert!(a.node.id < id && b.node.id < id);
                let result = operand_value(&values, a) && operand_value(&values, b);
                values.set(id, result);
            }
        }
    }

    let outputs = gate_fn
        .outputs
        .iter()
        .map(|output| {
            output
                .bit_vector
                .iter_lsb_to_msb()
                .map(|bit| operand_value(&values, bit))
                .collect::<BitVec>()
        })
        .collect();
    GateSimResult {
        outputs,
        all_values: values,
    }
}

/// Packs the low `bit_count` bits of `value` into a bit vector (LSb first).
pub fn bits_from_u64(value: u64, bit_count: usize) -> BitVec {
    (0..bit_count).map(|i| (value >> i) & 1 == 1).collect()
}

/// Inverse of `bits_from_u64`; `bits` must not be wider than 64.
pub fn u64_from_bits(bits: &BitVec) -> u64 {
    assert!(bits.len() <= 64, "bit vector too wide: {}", bits.len());
    bits.iter()
        .enumerate()
        .fold(0u64, |acc, (i, bit)| acc | ((*bit as u64) << i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aig::gate::AigBitVector;
    use crate::aig::gate_builder::GateBuilder;

    #[test]
    fn test_simple_bitwise_and() {
        let mut gb = GateBuilder::new("simple_bitwise_and".to_string());
        let input_a = gb.add_input("a".to_string(), 4);
        let input_b = gb.add_input("b".to_string(), 4);
        let bits: Vec<AigOperand> = (0..4)
            .map(|i| gb.add_and_binary(*input_a.get_lsb(i), *input_b.get_lsb(i)))
            .collect();
        gb.add_output("o".to_string(), AigBitVector::from_lsb_is_index_0(&bits));
        let gate_fn = gb.build();

        let result = eval(&gate_fn, &[bits_from_u64(0b1100, 4), bits_from_u64(0b1010, 4)]);
        assert_eq!(u64_from_bits(&result.outputs[0]), 0b1000);
    }

    #[test]
    fn test_negated_output_of_constant() {
        let mut gb = GateBuilder::new("const_true".to_string());
        gb.add_input("a".to_string(), 1);
        let t = gb.get_true();
        gb.add_output("o".to_string(), t.into());
        let gate_fn = gb.build();
        let result = eval(&gate_fn, &[bits_from_u64(0, 1)]);
        assert!(result.outputs[0][0]);
        assert!(!result.all_values[0]);
    }

    #[test]
    fn test_bits_round_trip() {
        let bits = bits_from_u64(0b1011, 6);
        assert_eq!(bits.len(), 6);
        assert_eq!(u64_from_bits(&bits), 0b1011);
    }
}
