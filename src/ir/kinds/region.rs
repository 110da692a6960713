// src/ir/kinds/region.rs
//! `Region`: merges two or more incoming control edges; always typed
//! `Control`. Grounded on `examples/original_source/chapter05/ir/region.go`.
use crate::error::CompileError;
use crate::ir::node::{Graph, NodeId};
use crate::types::Type;

pub(crate) fn compute_region(_graph: &Graph, _id: NodeId) -> Result<Type, CompileError> {
    Ok(Type::Control)
}

pub(crate) fn idealize_region(_graph: &mut Graph, _id: NodeId) -> Result<Option<NodeId>, CompileError> {
    Ok(None)
}
