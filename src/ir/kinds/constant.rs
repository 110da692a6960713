// src/ir/kinds/constant.rs
//! `Constant`: a folded value, carried directly in the node's own type.
//! Grounded on `examples/original_source/chapter02/ir/constant.go`.
use crate::error::CompileError;
use crate::ir::node::{Graph, NodeId};
use crate::types::Type;

pub(crate) fn compute_constant(graph: &Graph, id: NodeId) -> Result<Type, CompileError> {
    Ok(graph.ty(id).cloned().expect("Constant always carries its own type"))
}

pub(crate) fn idealize_constant(_graph: &mut Graph, _id: NodeId) -> Result<Option<NodeId>, CompileError> {
    Ok(None)
}
