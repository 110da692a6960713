// src/ir/kinds/if_node.rs
//! `If`: takes a control input and a predicate value input, produces a
//! `Tuple(Control, Control)` consumed by two `Proj` nodes. Grounded on
//! `examples/original_source/chapter05/ir/if.go`.
use crate::error::CompileError;
use crate::ir::node::{Graph, NodeId};
use crate::types::Type;

pub(crate) fn compute_if(_graph: &Graph, _id: NodeId) -> Result<Type, CompileError> {
    Ok(Type::Tuple(vec![Type::Control, Type::Control]))
}

/// Never folds to a single branch here: constant-predicate elision is left
/// to the generator, which can skip building the unreachable branch
/// entirely once it sees a constant condition (matching the reference,
/// which performs this fold in `generator.go` rather than in `If.idealize`).
pub(crate) fn idealize_if(_graph: &mut Graph, _id: NodeId) -> Result<Option<NodeId>, CompileError> {
    Ok(None)
}
