// src/ir/kinds/unary.rs
//! `compute`/`idealize` for the unary node kinds `Minus` and `Not`.
//! Grounded on `examples/original_source/chapter05/ir/{minus,not}.go`.
use crate::error::CompileError;
use crate::ir::node::{Graph, NodeId, NodeKind};
use crate::types::{IntValue, Type};

fn operand(graph: &Graph, id: NodeId) -> NodeId {
    graph.input(id, 0).expect("unary op always has an operand")
}

fn operand_ty(graph: &Graph, id: NodeId) -> Type {
    graph.ty(operand(graph, id)).cloned().unwrap_or(Type::Bottom)
}

pub(crate) fn compute_minus(graph: &Graph, id: NodeId) -> Result<Type, CompileError> {
    match operand_ty(graph, id) {
        Type::Int(IntValue::Const(v)) => Ok(Type::int(-v)),
        Type::Int(v) => Ok(Type::Int(v)),
        _ => Ok(Type::Bottom),
    }
}

pub(crate) fn idealize_minus(graph: &mut Graph, id: NodeId) -> Result<Option<NodeId>, CompileError> {
    // -(-x) => x
    let x = operand(graph, id);
    if let NodeKind::Minus = graph.kind(x) {
        return Ok(Some(operand(graph, x)));
    }
    Ok(None)
}

pub(crate) fn compute_not(graph: &Graph, id: NodeId) -> Result<Type, CompileError> {
    match operand_ty(graph, id) {
        Type::Int(IntValue::Const(0)) => Ok(Type::int(1)),
        Type::Int(IntValue::Const(_)) => Ok(Type::int(0)),
        Type::Int(_) => Ok(Type::int_bottom()),
        _ => Ok(Type::Bottom),
    }
}

pub(crate) fn idealize_not(graph: &mut Graph, id: NodeId) -> Result<Option<NodeId>, CompileError> {
    // !!!x => !x: three nested Nots always collapse to one, since `Not`
    // only ever distinguishes "zero" from "not zero".
    let a = operand(graph, id);
    if let NodeKind::Not = graph.kind(a) {
        let b = operand(graph, a);
        if let NodeKind::Not = graph.kind(b) {
            let c = operand(graph, b);
            return Ok(Some(graph.alloc(NodeKind::Not, vec![Some(c)])));
        }
    }
    Ok(None)
}
