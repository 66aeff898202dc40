// SPDX-License-Identifier: Apache-2.0

//! The `GateBuilder` is a builder for a `GateFn` -- it builds up the underlying
//! (AIG) data structure as operations are added.
//!
//! It tracks `Input` and `Output` nodes which are bundles of "primary input" /
//! "primary output" values.
//!
//! The builder never folds constants or structurally hashes: every call to
//! `add_and_binary` appends exactly one fresh node.
//!
//! Basic example usage:
//! ```
//! use xlsynth_multfuzz::aig::gate_builder::GateBuilder;
//! use xlsynth_multfuzz::aig::gate::{AigBitVector, AigOperand, GateFn};
//!
//! let mut builder = GateBuilder::new("my_and_gate".to_string());
//! let a: AigBitVector = builder.add_input("a".to_string(), 1);
//! let b: AigBitVector = builder.add_input("b".to_string(), 1);
//! let o0: AigOperand = builder.add_and_binary(*a.get_lsb(0), *b.get_lsb(0));
//! builder.add_output("o".to_string(), o0.into());
//! let gate_fn: GateFn = builder.build();
//! assert_eq!(gate_fn.and_count(), 1);
//! ```

use crate::aig::gate::{AigBitVector, AigNode, AigOperand, AigRef, GateFn, Input, Output};

pub struct GateBuilder {
    pub name: String,
    pub gates: Vec<AigNode>,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
}

impl GateBuilder {
    pub fn new(name: String) -> Self {
        Self {
            name,
            gates: vec![AigNode::Literal(false)],
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn build(self) -> GateFn {
        debug_assert!(
            !self.outputs.is_empty(),
            "GateBuilder::build: graph must have at least one output (degenerate/empty graph)"
        );
        let gate_fn = GateFn {
            name: self.name,
            inputs: self.inputs,
            outputs: self.outputs,
            gates: self.gates,
        };
        gate_fn.check_invariants_with_debug_assert();
        gate_fn
    }

    pub fn get_false(&self) -> AigOperand {
        AigOperand {
            node: AigRef { id: 0 },
            negated: false,
        }
    }

    pub fn get_true(&self) -> AigOperand {
        AigOperand {
            node: AigRef { id: 0 },
            negated: true,
        }
    }

    /// Index the next `add_and_binary` call will allocate.
    pub fn next_node_id(&self) -> usize {
        self.gates.len()
    }

    pub fn add_input(&mut self, name: String, bit_count: usize) -> AigBitVector {
        let mut bits: Vec<AigOperand> = Vec::new();
        for lsb_i in 0..bit_count {
            let gate_ref = AigRef {
                id: self.gates.len(),
            };
            self.gates.push(AigNode::Input {
                name: name.clone(),
                lsb_index: lsb_i,
            });
            bits.push(gate_ref.into());
        }
        let bit_vector = AigBitVector::from_lsb_is_index_0(&bits);
        self.inputs.push(Input {
            name,
            bit_vector: bit_vector.clone(),
        });
        bit_vector
    }

    pub fn add_output(&mut self, name: String, bit_vector: AigBitVector) {
        for bit in bit_vector.iter_lsb_to_msb() {
            debug_assert!(
                bit.node.id < self.gates.len(),
                "add_output: Output node index out of bounds: {} (gates.len() = {})",
                bit.node.id,
                self.gates.len()
            );
        }
        self.outputs.push(Output { name, bit_vector });
    }

    pub fn add_and_binary(&mut self, lhs: AigOperand, rhs: AigOperand) -> AigOperand {
        debug_assert!(self.is_valid_operand(lhs), "lhs out of bounds: {:?}", lhs);
        debug_assert!(self.is_valid_operand(rhs), "rhs out of bounds: {:?}", rhs);
        let gate_ref = AigRef {
            id: self.gates.len(),
        };
        self.gates.push(AigNode::And2 { a: lhs, b: rhs });
        gate_ref.into()
    }

    pub fn add_not(&mut self, arg: AigOperand) -> AigOperand {
        arg.negate()
    }

    /// `~lhs & ~rhs`, i.e. a NOR in a single gate.
    pub fn add_and_binary_nn(&mut self, lhs: AigOperand, rhs: AigOperand) -> AigOperand {
        let lhs_n = self.add_not(lhs);
        let rhs_n = self.add_not(rhs);
        self.add_and_binary(lhs_n, rhs_n)
    }

    pub fn add_xor_binary(&mut self, lhs: AigOperand, rhs: AigOperand) -> AigOperand {
        // the formula for xor is (~a & b) | (a & ~b)
        // so in terms of only and gates it's:
        // ~(~(~a & b) & ~(a & ~b))
        let a = lhs;
        let b = rhs;
        let not_a = self.add_not(a);
        let not_b = self.add_not(b);
        let and_lhs = self.add_and_binary(not_a, b);
        let and_rhs = self.add_and_binary(a, not_b);
        let outer_and = self.add_and_binary_nn(and_lhs, and_rhs);
        self.add_not(outer_and)
    }

    pub fn add_or_binary(&mut self, lhs: AigOperand, rhs: AigOperand) -> AigOperand {
        let and = self.add_and_binary_nn(lhs, rhs);
        self.add_not(and)
    }

    pub fn is_valid_ref(&self, aig_ref: AigRef) -> bool {
        aig_ref.id < self.gates.len()
    }

    pub fn is_valid_operand(&self, operand: AigOperand) -> bool {
        self.is_valid_ref(operand.node)
    }
}
