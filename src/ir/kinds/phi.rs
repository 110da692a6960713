// src/ir/kinds/phi.rs
//! `Phi`: merges values across the control edges of a `Region`. Input 0 is
//! the owning `Region`; inputs 1.. are one value per incoming edge, in the
//! same order as the region's own control inputs.
//! Grounded on `examples/original_source/chapter05/ir/phi.go`.
use crate::error::CompileError;
use crate::ir::node::{Graph, NodeId};
use crate::types::Type;

fn values(graph: &Graph, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    graph.inputs(id)[1..].iter().filter_map(|i| *i)
}

pub(crate) fn compute_phi(graph: &Graph, id: NodeId) -> Result<Type, CompileError> {
    let mut acc = Type::Top;
    for v in values(graph, id) {
        let ty = graph.ty(v).cloned().unwrap_or(Type::Bottom);
        acc = acc.meet(&ty);
    }
    Ok(acc)
}

/// A `Phi` whose branch values are all literally the same node (no real
/// divergence happened) is replaced by that shared value.
pub(crate) fn idealize_phi(graph: &mut Graph, id: NodeId) -> Result<Option<NodeId>, CompileError> {
    let mut vs = values(graph, id);
    let Some(first) = vs.next() else { return Ok(None) };
    if vs.all(|v| v == first) { Ok(Some(first)) } else { Ok(None) }
}
