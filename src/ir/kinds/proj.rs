// src/ir/kinds/proj.rs
//! `Proj`: selects one component out of a multi-output (tuple-typed) node.
//! Grounded on `examples/original_source/chapter05/ir/proj.go`.
use crate::error::CompileError;
use crate::ir::node::{Graph, NodeId};
use crate::types::Type;

fn parent(graph: &Graph, id: NodeId) -> NodeId {
    graph.input(id, 0).expect("Proj always projects out of a parent")
}

pub(crate) fn compute_proj(graph: &Graph, id: NodeId, index: usize) -> Result<Type, CompileError> {
    let parent_ty = graph.ty(parent(graph, id)).cloned().unwrap_or(Type::Bottom);
    Ok(parent_ty.tuple_at(index).cloned().unwrap_or(Type::Bottom))
}

pub(crate) fn idealize_proj(_graph: &mut Graph, _id: NodeId, _index: usize) -> Result<Option<NodeId>, CompileError> {
    Ok(None)
}
