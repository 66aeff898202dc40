// SPDX-License-Identifier: Apache-2.0

//! Gate-level realizations of the arithmetic primitives the multiplier is
//! assembled from.
//!
//! Each primitive comes in functionally identical but structurally distinct
//! flavors; which one gets instantiated is decided per use by the caller.
//! All realizations allocate their gates through `GateBuilder::add_and_binary`
//! in a fixed order, so the emitted graph is a pure function of the
//! decisions taken.

use crate::aig::gate::AigOperand;
use crate::aig::gate_builder::GateBuilder;
use crate::multgen::sampler::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdderRealization {
    A,
    B,
}

impl AdderRealization {
    pub fn choose<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        if rng.sample_below(2) != 0 {
            AdderRealization::A
        } else {
            AdderRealization::B
        }
    }
}

/// Whether the adder's carry has a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarryMode {
    Propagate,
    /// The adder sits in the most significant column: the carry is dropped
    /// and gates private to it are not allocated.
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdderInputs {
    Half(AigOperand, AigOperand),
    Full(AigOperand, AigOperand, AigOperand),
}

impl AdderInputs {
    pub fn arity(&self) -> usize {
        match self {
            AdderInputs::Half(..) => 2,
            AdderInputs::Full(..) => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdderOutput {
    pub sum: AigOperand,
    /// `None` exactly when the adder was realized in `CarryMode::Final`.
    pub carry: Option<AigOperand>,
}

/// Instantiates a half or full adder with the requested realization.
pub fn realize_adder(
    gb: &mut GateBuilder,
    inputs: AdderInputs,
    realization: AdderRealization,
    mode: CarryMode,
) -> AdderOutput {
    match (inputs, realization) {
        (AdderInputs::Half(a, b), AdderRealization::A) => half_adder_a(gb, a, b, mode),
        (AdderInputs::Half(a, b), AdderRealization::B) => half_adder_b(gb, a, b, mode),
        (AdderInputs::Full(a, b, c), AdderRealization::A) => full_adder_a(gb, a, b, c, mode),
        (AdderInputs::Full(a, b, c), AdderRealization::B) => full_adder_b(gb, a, b, c, mode),
    }
}

// sum = ~(~(~a & b) & ~(a & ~b)), carry = a & b
fn half_adder_a(gb: &mut GateBuilder, a: AigOperand, b: AigOperand, mode: CarryMode) -> AdderOutput {
    let g1 = gb.add_and_binary(a.negate(), b);
    let g2 = gb.add_and_binary(a, b.negate());
    let g3 = gb.add_and_binary(g1.negate(), g2.negate());
    let carry = match mode {
        CarryMode::Propagate => Some(gb.add_and_binary(a, b)),
        CarryMode::Final => None,
    };
    AdderOutput {
        sum: g3.negate(),
        carry,
    }
}

// The carry gate doubles as a term of the sum, so final mode saves nothing.
fn half_adder_b(gb: &mut GateBuilder, a: AigOperand, b: AigOperand, mode: CarryMode) -> AdderOutput {
    let nor = gb.add_and_binary(a.negate(), b.negate());
    let and = gb.add_and_binary(a, b);
    let sum = gb.add_and_binary(nor.negate(), and.negate());
    AdderOutput {
        sum,
        carry: match mode {
            CarryMode::Propagate => Some(and),
            CarryMode::Final => None,
        },
    }
}

// sum via xnor(a, b) then xor with c; carry = ab | ac | bc.
fn full_adder_a(
    gb: &mut GateBuilder,
    a: AigOperand,
    b: AigOperand,
    c: AigOperand,
    mode: CarryMode,
) -> AdderOutput {
    let g1 = gb.add_and_binary(a, b.negate());
    let g2 = gb.add_and_binary(b, a.negate());
    let xnor_ab = gb.add_and_binary(g1.negate(), g2.negate());
    let g4 = gb.add_and_binary(xnor_ab.negate(), c.negate());
    let g5 = gb.add_and_binary(xnor_ab, c);
    let g6 = gb.add_and_binary(g4.negate(), g5.negate());
    let carry = match mode {
        CarryMode::Propagate => {
            let ab = gb.add_and_binary(a, b);
            let ac = gb.add_and_binary(a, c);
            let bc = gb.add_and_binary(b, c);
            let nor_ab_ac = gb.add_and_binary(ab.negate(), ac.negate());
            let none = gb.add_and_binary(nor_ab_ac, bc.negate());
            Some(none.negate())
        }
        CarryMode::Final => None,
    };
    AdderOutput {
        sum: g6.negate(),
        carry,
    }
}

// sum via xor(a, b) then xor with c; carry = ab | (c & (a ^ b)).
fn full_adder_b(
    gb: &mut GateBuilder,
    a: AigOperand,
    b: AigOperand,
    c: AigOperand,
    mode: CarryMode,
) -> AdderOutput {
    let nor_ab = gb.add_and_binary(a.negate(), b.negate());
    let ab = gb.add_and_binary(a, b);
    let xor_ab = gb.add_and_binary(nor_ab.negate(), ab.negate());
    let neither = gb.add_and_binary(c.negate(), xor_ab.negate());
    let both = gb.add_and_binary(c, xor_ab);
    let sum = gb.add_and_binary(neither.negate(), both.negate());
    let carry = match mode {
        CarryMode::Propagate => Some(gb.add_and_binary(ab.negate(), both.negate()).negate()),
        CarryMode::Final => None,
    };
    AdderOutput { sum, carry }
}

/// How one carry of a carry-lookahead block is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarryStrategy {
    /// `c_j = g_j | (p_j & c_{j-1})` from the previous carry, in two gates.
    Recursive,
    /// Flattened prefix form against the block carry-in and all lower
    /// generate signals.
    Iterative,
}

/// Computes carry-out of `position` within a lookahead block.
///
/// `carry_prev` is the carry into `position`, `carry_in` the carry into the
/// whole block; `propagate` and `generate` hold one signal per block column.
pub fn realize_lookahead_carry(
    gb: &mut GateBuilder,
    strategy: CarryStrategy,
    position: usize,
    carry_in: AigOperand,
    carry_prev: AigOperand,
    propagate: &[AigOperand],
    generate: &[AigOperand],
) -> AigOperand {
    match strategy {
        CarryStrategy::Recursive => {
            lookahead_carry_recursive(gb, carry_prev, propagate[position], generate[position])
        }
        CarryStrategy::Iterative => {
            lookahead_carry_iterative(gb, position, carry_in, propagate, generate)
        }
    }
}

fn lookahead_carry_recursive(
    gb: &mut GateBuilder,
    carry: AigOperand,
    propagate: AigOperand,
    generate: AigOperand,
) -> AigOperand {
    let propagated = gb.add_and_binary(carry, propagate);
    let killed = gb.add_and_binary(propagated.negate(), generate.negate());
    killed.negate()
}

// c_j = g_j | OR_{k=1..j} (p_j & .. & p_k & g_{k-1}) | (p_j & .. & p_0 & c_in)
fn lookahead_carry_iterative(
    gb: &mut GateBuilder,
    position: usize,
    carry_in: AigOperand,
    propagate: &[AigOperand],
    generate: &[AigOperand],
) -> AigOperand {
    let mut carry = generate[position];
    for low in 0..=position {
        let mut term = propagate[position];
        for k in (low..position).rev() {
            term = gb.add_and_binary(term, propagate[k]);
        }
        term = if low == 0 {
            gb.add_and_binary(term, carry_in)
        } else {
            gb.add_and_binary(term, generate[low - 1])
        };
        carry = gb.add_or_binary(carry, term);
    }
    carry
}
