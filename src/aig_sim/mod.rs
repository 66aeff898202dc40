// SPDX-License-Identifier: Apache-2.0

pub mod gate_sim;
