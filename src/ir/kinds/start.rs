// src/ir/kinds/start.rs
//! `Start`: the single root of the graph. Its type is fixed at construction
//! (`Tuple(Control, arg_ty)`) and never recomputed.
//! Grounded on `examples/original_source/chapter04/ir/start.go`.
use crate::error::CompileError;
use crate::ir::node::{Graph, NodeId};
use crate::types::Type;

pub(crate) fn compute_start(graph: &Graph, id: NodeId) -> Result<Type, CompileError> {
    Ok(graph.ty(id).cloned().expect("Start always carries its tuple type"))
}

pub(crate) fn idealize_start(_graph: &mut Graph, _id: NodeId) -> Result<Option<NodeId>, CompileError> {
    Ok(None)
}
