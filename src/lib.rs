// SPDX-License-Identifier: Apache-2.0

//! Generator of randomized, functionally correct multiplier circuits as
//! and-inverter graphs, for stress-testing multiplier verification and
//! equivalence-checking tools.

pub mod aig;
pub mod aig_serdes;
pub mod aig_sim;
pub mod error;
pub mod multgen;
