// SPDX-License-Identifier: Apache-2.0

pub mod emit_aiger_binary;
pub mod load_aiger_binary;
