// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct AigRef {
    pub id: usize,
}

/// A reference to a node along with an (optional) inversion on the edge.
///
/// This is the "literal" of the AIGER world: `2 * node + negated`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct AigOperand {
    pub node: AigRef,
    pub negated: bool,
}

impl AigOperand {
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            node: self.node,
            negated: !self.negated,
        }
    }

    /// Returns the AIGER literal encoding for this operand using the node
    /// index as the variable index.
    pub fn to_literal(&self) -> u32 {
        ((self.node.id as u32) << 1) | (self.negated as u32)
    }

    pub fn from_literal(literal: u32) -> Self {
        Self {
            node: AigRef {
                id: (literal >> 1) as usize,
            },
            negated: literal & 1 == 1,
        }
    }
}

impl From<AigRef> for AigOperand {
    fn from(node: AigRef) -> Self {
        AigOperand {
            node,
            negated: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AigNode {
    Input {
        name: String,
        /// Index where 0 is the least significant bit of the input.
        lsb_index: usize,
    },
    Literal(bool),
    And2 {
        a: AigOperand,
        b: AigOperand,
    },
}

impl AigNode {
    pub fn get_operands(&self) -> Vec<AigOperand> {
        match self {
            AigNode::Input { .. } => vec![],
            AigNode::Literal(_) => vec![],
            AigNode::And2 { a, b } => vec![*a, *b],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AigBitVector {
    /// In this representation index 0 is the LSb, the last index is the MSb.
    operands: Vec<AigOperand>,
}

impl From<AigOperand> for AigBitVector {
    fn from(operand: AigOperand) -> Self {
        AigBitVector {
            operands: vec![operand],
        }
    }
}

impl AigBitVector {
    pub fn from_bit(bit: AigOperand) -> Self {
        Self {
            operands: vec![bit],
        }
    }

    /// Creates a bit vector from a slice where index 0 of the slice is the
    /// least significant bit.
    pub fn from_lsb_is_index_0(operands: &[AigOperand]) -> Self {
        Self {
            operands: operands.to_vec(),
        }
    }

    pub fn iter_lsb_to_msb(&self) -> impl DoubleEndedIterator<Item = &AigOperand> {
        self.operands.iter()
    }

    pub fn get_lsb(&self, index: usize) -> &AigOperand {
        assert!(
            index < self.operands.len(),
            "index {} is out of bounds for bit vector of length {}",
            index,
            self.operands.len()
        );
        &self.operands[index]
    }

    pub fn get_bit_count(&self) -> usize {
        self.operands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }
}

fn io_to_string(name: &str, bit_vector: &AigBitVector) -> String {
    let array_str = bit_vector
        .iter_lsb_to_msb()
        .map(|bit| {
            if bit.negated {
                format!("not(%{})", bit.node.id)
            } else {
                format!("%{}", bit.node.id)
            }
        })
        .collect::<Vec<String>>()
        .join(", ");
    format!(
        "{}: bits[{}] = [{}]",
        name,
        bit_vector.get_bit_count(),
        array_str
    )
}

/// An input has a name (which should be unique among inputs/outputs) and a
/// vector of gate references that make up this named entity.
#[derive(Debug, Clone)]
pub struct Input {
    pub name: String,
    pub bit_vector: AigBitVector,
}

impl Input {
    pub fn get_bit_count(&self) -> usize {
        self.bit_vector.get_bit_count()
    }
}

/// Similar to inputs, but references from the AIG can be negated.
#[derive(Debug, Clone)]
pub struct Output {
    pub name: String,
    pub bit_vector: AigBitVector,
}

impl Output {
    pub fn get_bit_count(&self) -> usize {
        self.bit_vector.get_bit_count()
    }
}

#[derive(Debug, Clone)]
pub struct GateFn {
    pub name: String,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub gates: Vec<AigNode>,
}

impl GateFn {
    pub fn get(&self, aig_ref: AigRef) -> &AigNode {
        &self.gates[aig_ref.id]
    }

    pub fn and_count(&self) -> usize {
        self.gates
            .iter()
            .filter(|node| matches!(node, AigNode::And2 { .. }))
            .count()
    }

    pub fn input_bit_count(&self) -> usize {
        self.inputs.iter().map(Input::get_bit_count).sum()
    }

    pub fn output_bit_count(&self) -> usize {
        self.outputs.iter().map(Output::get_bit_count).sum()
    }

    pub fn output_operands(&self) -> Vec<AigOperand> {
        self.outputs
            .iter()
            .flat_map(|output| output.bit_vector.iter_lsb_to_msb().copied())
            .collect()
    }

    /// Renders the gate function in allocation order, one `and` per line.
    ///
    /// Unlike AIGER emission this does not renumber anything, so it is handy
    /// for eyeballing exactly what the builder produced.
    pub fn to_string(&self) -> String {
        let operand_str = |op: &AigOperand| -> String {
            let base = match &self.gates[op.node.id] {
                AigNode::Input { name, lsb_index } => format!("{}[{}]", name, lsb_index),
                _ => format!("%{}", op.node.id),
            };
            if op.negated {
                format!("not({})", base)
            } else {
                base
            }
        };
        let input_str = self
            .inputs
            .iter()
            .map(|input| io_to_string(&input.name, &input.bit_vector))
            .collect::<Vec<String>>()
            .join(", ");
        let output_str = self
            .outputs
            .iter()
            .map(|output| io_to_string(&output.name, &output.bit_vector))
            .collect::<Vec<String>>()
            .join(", ");

        let mut s = format!("fn {}({}) -> ({}) {{\n", self.name, input_str, output_str);
        for (id, node) in self.gates.iter().enumerate() {
            match node {
                AigNode::And2 { a, b } => {
                    s.push_str(&format!(
                        "  %{} = and({}, {})\n",
                        id,
                        operand_str(a),
                        operand_str(b)
                    ));
                }
                AigNode::Literal(value) if id != 0 => {
                    s.push_str(&format!("  %{} = literal({})\n", id, value));
                }
                AigNode::Literal(_) | AigNode::Input { .. } => {}
            }
        }
        for output in &self.outputs {
            for (i, bit) in output.bit_vector.iter_lsb_to_msb().enumerate() {
                s.push_str(&format!("  {}[{}] = {}\n", output.name, i, operand_str(bit)));
            }
        }
        s.push('}');
        s
    }

    /// Checks internal invariants of the GateFn, panicking if any are violated.
    /// - All AigRef indices must be in-bounds for self.gates.
    /// - And2 operands must refer to strictly earlier nodes.
    pub fn check_invariants_with_debug_assert(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        let gate_count = self.gates.len();
        for bit in self.output_operands() {
            assert!(
                bit.node.id < gate_count,
                "Output AigRef out of bounds: {:?} (gates.len() = {})",
                bit.node,
                gate_count
            );
        }
        for (i, node) in self.gates.iter().enumerate() {
            if let AigNode::And2 { a, b } = node {
                assert!(
                    a.node.id < i && b.node.id < i,
                    "Gate %{}: operands must precede the gate; got {:?} and {:?}",
                    i,
                    a.node,
                    b.node
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_encoding() {
        let op = AigOperand {
            node: AigRef { id: 5 },
            negated: true,
        };
        assert_eq!(op.to_literal(), 11);
        assert_eq!(op.negate().to_literal(), 10);
        assert_eq!(AigOperand::from_literal(11), op);
        assert_eq!(op.to_literal() ^ 1, op.negate().to_literal());
    }
}
