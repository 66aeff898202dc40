// SPDX-License-Identifier: Apache-2.0

use crate::aig::gate::{AigNode, AigOperand, AigRef};
use std::collections::HashSet;

/// Returns a postorder traversal of the nodes reachable from `starts`,
/// deduplicating by node (operand negation is ignored).
///
/// Operands of each node are visited in (a, b) order, so the result is a
/// deterministic function of the graph and the start order.
pub fn postorder_node_only(starts: &[AigOperand], nodes: &[AigNode]) -> Vec<AigRef> {
    let mut worklist: Vec<AigRef> = Vec::new();
    let mut visited: HashSet<AigRef> = HashSet::new();
    let mut postorder = Vec::new();
    // Reverse so the first output is explored first when popping.
    for start in starts.iter().rev() {
        debug_assert!(
            start.node.id < nodes.len(),
            "postorder_node_only: start operand node index out of bounds: {} (nodes.len() = {})",
            start.node.id,
            nodes.len()
        );
        worklist.push(start.node);
    }
    while let Some(current) = worklist.pop() {
        if visited.contains(&current) {
            continue;
        }
        let node = &nodes[current.id];
        let mut all_deps_visited = true;
        for dep in node.get_operands() {
            if !visited.contains(&dep.node) {
                worklist.push(current); // Revisit after dependencies
                worklist.push(dep.node);
                all_deps_visited = false;
                break;
            }
        }
        if all_deps_visited {
            visited.insert(current);
            postorder.push(current);
        }
    }
    postorder
}
