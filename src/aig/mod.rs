// SPDX-License-Identifier: Apache-2.0

pub mod gate;
pub mod gate_builder;
pub mod topo;

pub use gate::{AigBitVector, AigNode, AigOperand, AigRef, GateFn};
