// src/ir/kinds/return_node.rs
//! `Return`: terminates the graph, carrying a control input and a value
//! input. Grounded on `examples/original_source/chapter01/ir/return.go`
//! through `chapter03/ir/return.go` (the latest shape: control + value, no
//! further widening needed for this language's single-return-per-path
//! structure).
use crate::error::CompileError;
use crate::ir::node::{Graph, NodeId};
use crate::types::Type;

pub(crate) fn compute_return(_graph: &Graph, _id: NodeId) -> Result<Type, CompileError> {
    Ok(Type::Bottom)
}

pub(crate) fn idealize_return(_graph: &mut Graph, _id: NodeId) -> Result<Option<NodeId>, CompileError> {
    Ok(None)
}
