// src/ir/kinds/bool_node.rs
//! `compute`/`idealize` for comparison nodes (`==`, `<`, `<=`; `>=`/`>`/`!=`
//! are synthesized by the generator from these three, with an operand swap
//! or an outer `Not`). Grounded on
//! `examples/original_source/chapter05/ir/bool.go`.
use crate::error::CompileError;
use crate::ir::node::{BoolOp, Graph, NodeId};
use crate::types::{IntValue, Type};

fn lhs(graph: &Graph, id: NodeId) -> NodeId {
    graph.input(id, 0).expect("bool op always has lhs")
}

fn rhs(graph: &Graph, id: NodeId) -> NodeId {
    graph.input(id, 1).expect("bool op always has rhs")
}

fn int_ty(graph: &Graph, id: NodeId) -> Type {
    graph.ty(id).cloned().unwrap_or(Type::Bottom)
}

pub(crate) fn compute_bool(graph: &Graph, id: NodeId, op: BoolOp) -> Result<Type, CompileError> {
    let (l, r) = (lhs(graph, id), rhs(graph, id));
    if l == r {
        // A value always compares equal/<=/not-< to itself.
        let always = match op {
            BoolOp::Eq | BoolOp::Le => 1,
            BoolOp::Lt => 0,
        };
        return Ok(Type::int(always));
    }
    match (int_ty(graph, l), int_ty(graph, r)) {
        (Type::Int(IntValue::Const(a)), Type::Int(IntValue::Const(b))) => {
            Ok(Type::int(i64::from(op.eval(a, b))))
        }
        (Type::Int(_), Type::Int(_)) => Ok(Type::int_bottom()),
        _ => Ok(Type::Bottom),
    }
}

pub(crate) fn idealize_bool(
    _graph: &mut Graph,
    _id: NodeId,
    _op: BoolOp,
) -> Result<Option<NodeId>, CompileError> {
    // Reflexive comparisons are already handled by `compute` folding to a
    // constant; there are no further algebraic simplifications for this
    // reduced comparison set.
    Ok(None)
}
