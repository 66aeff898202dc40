// SPDX-License-Identifier: Apache-2.0
//
// --- AIGER (binary) emitter.
//
// Emits a `GateFn` into the compact binary AIGER "aig" format, the
// interchange format multiplier verification tools consume.
//
// Notes:
// - We only support purely combinational designs (L == 0).
// - var 0 is constant-false and vars 1..=I are the input bits in the same
//   stable order as the GateFn input bit-vectors (lsb->msb, in input list
//   order).
// - AND vars follow one of two orders:
//   - allocation order (the default): every AND node is written, in the order
//     the builder created it;
//   - re-encoded: a post-order traversal from the outputs, which drops nodes
//     no output depends on and renumbers the rest.
// - We emit outputs and (optional) symbol table as ASCII, with the binary
//   delta-encoded AND section in between, as the AIGER format requires.

use crate::aig::gate::{AigNode, AigOperand, GateFn};
use crate::aig::topo::postorder_node_only;
use std::collections::HashMap;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Renumber AND nodes in a post-order walk from the outputs.
    pub reencode: bool,
    pub include_symbols: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            reencode: false,
            include_symbols: true,
        }
    }
}

fn encode_u32_as_aiger_varint(mut x: u32, out: &mut Vec<u8>) {
    while x & !0x7f != 0 {
        out.push(((x & 0x7f) as u8) | 0x80);
        x >>= 7;
    }
    out.push((x & 0x7f) as u8);
}

fn is_const_literal(gf: &GateFn, op: AigOperand) -> Option<bool> {
    match gf.get(op.node) {
        AigNode::Literal(v) => Some(*v),
        _ => None,
    }
}

fn operand_to_literal_with_var_map(
    gf: &GateFn,
    var_map: &HashMap<usize, u32>,
    op: AigOperand,
) -> Result<u32, String> {
    if let Some(val) = is_const_literal(gf, op) {
        let base = if val { 1u32 } else { 0u32 };
        return Ok(base ^ (op.negated as u32));
    }
    let var = *var_map
        .get(&op.node.id)
        .ok_or_else(|| format!("missing var mapping for node id {}", op.node.id))?;
    Ok((var << 1) ^ (op.negated as u32))
}

fn select_and_node_ids(gate_fn: &GateFn, reencode: bool) -> Vec<usize> {
    let is_and = |id: usize| matches!(gate_fn.gates[id], AigNode::And2 { .. });
    if reencode {
        postorder_node_only(&gate_fn.output_operands(), &gate_fn.gates)
            .into_iter()
            .map(|aig_ref| aig_ref.id)
            .filter(|id| is_and(*id))
            .collect()
    } else {
        (0..gate_fn.gates.len()).filter(|id| is_and(*id)).collect()
    }
}

/// Emits the supplied `GateFn` into binary AIGER ("aig") format.
///
/// Returns the serialized bytes on success.
pub fn emit_aiger_binary(gate_fn: &GateFn, options: EmitOptions) -> Result<Vec<u8>, String> {
    let latch_count = 0u32;

    let mut input_node_ids: Vec<usize> = Vec::new();
    for input in &gate_fn.inputs {
        for bit in input.bit_vector.iter_lsb_to_msb() {
            input_node_ids.push(bit.node.id);
        }
    }
    let input_count = input_node_ids.len() as u32;

    let and_node_ids = select_and_node_ids(gate_fn, options.reencode);
    let and_count = and_node_ids.len() as u32;

    // Constant false is var 0; inputs are 1..=I; AND nodes are then
    // I+1..=I+A in the order selected above.
    let mut var_map: HashMap<usize, u32> = HashMap::new();
    for (i, node_id) in input_node_ids.iter().enumerate() {
        var_map.insert(*node_id, (i as u32) + 1);
    }
    for (i, node_id) in and_node_ids.iter().enumerate() {
        var_map.insert(*node_id, input_count + (i as u32) + 1);
    }

    let max_var_index = input_count + and_count;
    let output_count = gate_fn.output_bit_count() as u32;

    let mut bytes: Vec<u8> = Vec::new();
    let header = format!(
        "aig {} {} {} {} {}\n",
        max_var_index, input_count, latch_count, output_count, and_count
    );
    bytes.extend_from_slice(header.as_bytes());

    // Outputs are ASCII literal lines, even in the binary variant.
    for bit in gate_fn.output_operands() {
        let lit = operand_to_literal_with_var_map(gate_fn, &var_map, bit)?;
        bytes.extend_from_slice(format!("{lit}\n").as_bytes());
    }

    // AND section: binary delta encoding. Each AND is encoded as two varints:
    //   delta0 = lhs - rhs0
    //   delta1 = rhs0 - rhs1
    // with rhs0 >= rhs1 and both < lhs.
    for node_id in &and_node_ids {
        let lhs_var = *var_map
            .get(node_id)
            .ok_or_else(|| format!("missing var mapping for AND node id {}", node_id))?;
        let lhs_lit = lhs_var << 1;
        let (mut rhs0, mut rhs1) = match &gate_fn.gates[*node_id] {
            AigNode::And2 { a, b } => (
                operand_to_literal_with_var_map(gate_fn, &var_map, *a)?,
                operand_to_literal_with_var_map(gate_fn, &var_map, *b)?,
            ),
            _ => return Err("internal error: and_node_ids contained non-AND node".to_string()),
        };
        if rhs1 > rhs0 {
            std::mem::swap(&mut rhs0, &mut rhs1);
        }
        let delta0 = lhs_lit
            .checked_sub(rhs0)
            .filter(|d| *d > 0)
            .ok_or_else(|| format!("invalid AIGER encoding: lhs {lhs_lit} <= rhs0 {rhs0}"))?;
        let delta1 = rhs0 - rhs1;
        encode_u32_as_aiger_varint(delta0, &mut bytes);
        encode_u32_as_aiger_varint(delta1, &mut bytes);
    }

    if options.include_symbols {
        let mut sym = String::new();
        let mut inp_idx = 0usize;
        for input in &gate_fn.inputs {
            for bit_i in 0..input.get_bit_count() {
                writeln!(&mut sym, "i{} {}{}", inp_idx, input.name, bit_i)
                    .map_err(|e| e.to_string())?;
                inp_idx += 1;
            }
        }
        let mut out_idx = 0usize;
        for output in &gate_fn.outputs {
            for bit_i in 0..output.get_bit_count() {
                writeln!(&mut sym, "o{} {}{}", out_idx, output.name, bit_i)
                    .map_err(|e| e.to_string())?;
                out_idx += 1;
            }
        }
        bytes.extend_from_slice(sym.as_bytes());
    }

    bytes.extend_from_slice(b"c\n");
    bytes.extend_from_slice(b"generated by xlsynth-multfuzz emit_aiger_binary\n");

    Ok(bytes)
}
