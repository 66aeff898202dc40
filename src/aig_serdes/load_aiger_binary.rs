// SPDX-License-Identifier: Apache-2.0

//! Loads a binary AIGER ("aig") file into a `GateFn`.
//!
//! Only purely combinational files (L == 0) are supported; this exists so we
//! can read back what `emit_aiger_binary` wrote and check it by simulation.
//!
//! The parser is strict: any structural inconsistency is an error.
//!
//! Every input becomes its own single-bit `Input`, and every output its own
//! single-bit `Output`, named from the symbol table when one is present.

use crate::aig::gate::{AigBitVector, AigOperand};
use crate::aig::gate_builder::GateBuilder;
use crate::aig::GateFn;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Parses a binary-AIGER file from disk.
pub fn load_aiger_binary_from_path(path: &Path) -> Result<GateFn, String> {
    let contents =
        fs::read(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    load_aiger_binary(&contents)
}

/// Parses the provided binary-AIGER bytes into a `GateFn`.
pub fn load_aiger_binary(src: &[u8]) -> Result<GateFn, String> {
    let (header_line, mut cursor) = read_ascii_line(src, 0)?;
    let header_tokens: Vec<&str> = header_line.split_whitespace().collect();
    if header_tokens.len() != 6 {
        return Err(format!(
            "expected 6 tokens in AIGER header, got {} (\"{}\")",
            header_tokens.len(),
            header_line
        ));
    }
    if header_tokens[0] != "aig" {
        return Err(format!(
            "only binary-AIGER (aig) is supported; got '{}'",
            header_tokens[0]
        ));
    }

    let parse_u32 = |s: &str, field: &str| -> Result<u32, String> {
        s.parse::<u32>()
            .map_err(|e| format!("invalid {} value '{}': {}", field, s, e))
    };

    let m = parse_u32(header_tokens[1], "M")?;
    let i = parse_u32(header_tokens[2], "I")?;
    let l = parse_u32(header_tokens[3], "L")?;
    let o = parse_u32(header_tokens[4], "O")?;
    let a = parse_u32(header_tokens[5], "A")?;

    if l != 0 {
        return Err("latch count (L) must be zero; sequential AIGER is not supported".to_string());
    }
    if m != i + a {
        return Err(format!("header M={} does not equal I+A={}", m, i + a));
    }

    let mut output_literals: Vec<u32> = Vec::with_capacity(o as usize);
    for _ in 0..o {
        let (line, next_cursor) = read_ascii_line(src, cursor)?;
        cursor = next_cursor;
        let lit_val: u32 = line
            .trim()
            .parse()
            .map_err(|e| format!("invalid output literal '{}': {}", line, e))?;
        output_literals.push(lit_val);
    }

    let mut deltas: Vec<(u32, u32)> = Vec::with_capacity(a as usize);
    for _ in 0..a {
        let delta0 = decode_u32_varint(src, &mut cursor)?;
        let delta1 = decode_u32_varint(src, &mut cursor)?;
        deltas.push((delta0, delta1));
    }

    let tail = std::str::from_utf8(&src[cursor..])
        .map_err(|e| format!("invalid UTF-8 in symbol/comment tail: {}", e))?;
    let (input_names, output_names) = parse_symbol_table(tail, i as usize, o as usize)?;

    let mut gb = GateBuilder::new("loaded_aiger".to_string());
    let mut var_to_operand: HashMap<u32, AigOperand> = HashMap::new();
    var_to_operand.insert(0, gb.get_false());
    for (idx, name) in input_names.into_iter().enumerate() {
        let bv = gb.add_input(name, 1);
        var_to_operand.insert(idx as u32 + 1, *bv.get_lsb(0));
    }

    let lit_to_operand = |lit: u32, var_map: &HashMap<u32, AigOperand>| -> Result<AigOperand, String> {
        let base_op = var_map
            .get(&(lit >> 1))
            .copied()
            .ok_or_else(|| format!("referenced undefined variable {} (literal {})", lit >> 1, lit))?;
        Ok(if lit & 1 == 1 { base_op.negate() } else { base_op })
    };

    for (and_idx, (delta0, delta1)) in deltas.into_iter().enumerate() {
        let lhs_var = i + and_idx as u32 + 1;
        let lhs_lit = lhs_var << 1;
        let rhs0 = lhs_lit
            .checked_sub(delta0)
            .ok_or_else(|| format!("invalid AIGER delta0 {} for lhs {}", delta0, lhs_lit))?;
        let rhs1 = rhs0
            .checked_sub(delta1)
            .ok_or_else(|| format!("invalid AIGER delta1 {} for rhs0 {}", delta1, rhs0))?;
        let rhs0_op = lit_to_operand(rhs0, &var_to_operand)?;
        let rhs1_op = lit_to_operand(rhs1, &var_to_operand)?;
        let and_op = gb.add_and_binary(rhs0_op, rhs1_op);
        var_to_operand.insert(lhs_var, and_op);
    }

    for (lit, name) in output_literals.into_iter().zip(output_names) {
        let op = lit_to_operand(lit, &var_to_operand)?;
        gb.add_output(name, AigBitVector::from_bit(op));
    }

    Ok(gb.build())
}

fn read_ascii_line(src: &[u8], start: usize) -> Result<(String, usize), String> {
    if start >= src.len() {
        return Err("unexpected EOF while reading ASCII line".to_string());
    }
    let end = src[start..]
        .iter()
        .position(|b| *b == b'\n')
        .ok_or_else(|| "unterminated ASCII line in AIGER input".to_string())?;
    let line = std::str::from_utf8(&src[start..start + end])
        .map_err(|e| format!("invalid UTF-8 in AIGER line: {}", e))?;
    Ok((line.to_string(), start + end + 1))
}

fn decode_u32_varint(src: &[u8], cursor: &mut usize) -> Result<u32, String> {
    let mut shift = 0u32;
    let mut acc = 0u32;
    loop {
        if *cursor >= src.len() {
            return Err("unexpected EOF while reading AIGER varint".to_string());
        }
        let byte = src[*cursor];
        *cursor += 1;
        acc |= ((byte & 0x7f) as u32) << shift;
        if byte & 0x80 == 0 {
            return Ok(acc);
        }
        shift += 7;
        if shift >= 32 {
            return Err("AIGER varint overflow".to_string());
        }
    }
}

/// Returns (input names, output names), defaulting to `i<k>` / `o<k>` for
/// entries missing from the symbol table.
fn parse_symbol_table(
    tail: &str,
    input_count: usize,
    output_count: usize,
) -> Result<(Vec<String>, Vec<String>), String> {
    let mut inputs: Vec<String> = (0..input_count).map(|k| format!("i{}", k)).collect();
    let mut outputs: Vec<String> = (0..output_count).map(|k| format!("o{}", k)).collect();
    for line in tail.lines() {
        if line.starts_with('c') {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let (kind, rest) = line.split_at(1);
        let (names, limit) = match kind {
            "i" => (&mut inputs, input_count),
            "o" => (&mut outputs, output_count),
            _ => return Err(format!("unsupported symbol table entry: '{}'", line)),
        };
        let (idx_str, name) = rest
            .split_once(' ')
            .ok_or_else(|| format!("malformed symbol table entry: '{}'", line))?;
        let idx: usize = idx_str
            .parse()
            .map_err(|e| format!("invalid symbol index in '{}': {}", line, e))?;
        if idx >= limit {
            return Err(format!("symbol index {} out of range in '{}'", idx, line));
        }
        names[idx] = name.to_string();
    }
    Ok((inputs, outputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aig_serdes::emit_aiger_binary::{EmitOptions, emit_aiger_binary};

    #[test]
    fn test_load_simple_and_with_symbols() {
        let mut gb = GateBuilder::new("and_fn".to_string());
        let a = gb.add_input("a".to_string(), 1);
        let b = gb.add_input("b".to_string(), 1);
        let o = gb.add_and_binary(*a.get_lsb(0), b.get_lsb(0).negate());
        gb.add_output("o".to_string(), o.negate().into());
        let bytes = emit_aiger_binary(&gb.build(), EmitOptions::default()).unwrap();

        let loaded = load_aiger_binary(&bytes).unwrap();
        assert_eq!(loaded.inputs.len(), 2);
        assert_eq!(loaded.inputs[0].name, "a0");
        assert_eq!(loaded.inputs[1].name, "b0");
        assert_eq!(loaded.outputs.len(), 1);
        assert_eq!(loaded.outputs[0].name, "o0");
        assert_eq!(loaded.and_count(), 1);
        let out = *loaded.outputs[0].bit_vector.get_lsb(0);
        assert!(out.negated);
    }

    #[test]
    fn test_rejects_ascii_header() {
        let err = load_aiger_binary(b"aag 0 0 0 0 0\n").unwrap_err();
        assert!(err.contains("only binary-AIGER"), "{}", err);
    }

    #[test]
    fn test_rejects_latches() {
        let err = load_aiger_binary(b"aig 1 0 1 0 0\n").unwrap_err();
        assert!(err.contains("latch count"), "{}", err);
    }

    #[test]
    fn test_rejects_truncated_and_section() {
        let err = load_aiger_binary(b"aig 3 2 0 1 1\n6\n\x02").unwrap_err();
        assert!(err.contains("EOF"), "{}", err);
    }
}
