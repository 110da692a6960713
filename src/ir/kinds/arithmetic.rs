// src/ir/kinds/arithmetic.rs
//! `compute`/`idealize` for the binary arithmetic node kinds `Add`, `Sub`,
//! `Mul`, `Div` (spec.md §4.2). Grounded on
//! `examples/original_source/chapter04/ir/{add,sub,mul,div}.go`.
use crate::error::CompileError;
use crate::ir::node::{Graph, NodeId, NodeKind};
use crate::location::Span;
use crate::types::{IntValue, Type};

fn int_ty(graph: &Graph, id: NodeId) -> Type {
    graph.ty(id).cloned().unwrap_or(Type::Bottom)
}

fn lhs(graph: &Graph, id: NodeId) -> NodeId {
    graph.input(id, 0).expect("binary op always has lhs")
}

fn rhs(graph: &Graph, id: NodeId) -> NodeId {
    graph.input(id, 1).expect("binary op always has rhs")
}

// ---------------------------------------------------------------- Add

pub(crate) fn compute_add(graph: &Graph, id: NodeId) -> Result<Type, CompileError> {
    let (l, r) = (int_ty(graph, lhs(graph, id)), int_ty(graph, rhs(graph, id)));
    match (&l, &r) {
        (Type::Int(a), Type::Int(b)) => match (a, b) {
            (IntValue::Const(a), IntValue::Const(b)) => Ok(Type::int(a + b)),
            _ => Ok(Type::Int(a.meet(*b))),
        },
        _ => Ok(Type::Bottom),
    }
}

pub(crate) fn idealize_add(graph: &mut Graph, id: NodeId) -> Result<Option<NodeId>, CompileError> {
    let (l, r) = (lhs(graph, id), rhs(graph, id));

    // x + 0 => x
    if let Some(0) = int_ty(graph, r).as_int_const() {
        return Ok(Some(l));
    }

    // x + x => x * 2
    if l == r {
        let two = graph.alloc_constant(Type::int(2));
        let mul = graph.alloc(NodeKind::Mul, vec![Some(l), Some(two)]);
        return Ok(Some(peephole(graph, mul)?));
    }

    // Move all adds to the left: a + (b + c) -> (a + b) + c, and
    // (a + b) + (c + d) -> ((a + b) + c) + d.
    let l_add = matches!(graph.kind(l), NodeKind::Add);
    if let NodeKind::Add = graph.kind(r) {
        let (r_lhs, r_rhs) = (lhs(graph, r), rhs(graph, r));
        if l_add {
            let new_lhs = graph.alloc(NodeKind::Add, vec![Some(l), Some(r_lhs)]);
            let new_lhs = peephole(graph, new_lhs)?;
            let new_add = graph.alloc(NodeKind::Add, vec![Some(new_lhs), Some(r_rhs)]);
            return Ok(Some(new_add));
        }
        swap_binary(graph, id);
        return Ok(Some(id));
    }

    if !l_add {
        if should_swap_non_adds(graph, l, r) {
            swap_binary(graph, id);
            return Ok(Some(id));
        }
        return Ok(None);
    }

    // l is itself an Add: (v + c1) + c2 with both constant => (v + (c1+c2))
    let (l_lhs, l_rhs) = (lhs(graph, l), rhs(graph, l));
    if int_ty(graph, l_rhs).is_constant() && int_ty(graph, r).is_constant() {
        let folded = graph.alloc(NodeKind::Add, vec![Some(l_rhs), Some(r)]);
        let folded = peephole(graph, folded)?;
        let new_add = graph.alloc(NodeKind::Add, vec![Some(l_lhs), Some(folded)]);
        return Ok(Some(new_add));
    }

    // (a + b) + c -> (a + c) + b, if that orders non-adds more canonically.
    if should_swap_non_adds(graph, l_rhs, r) {
        let new_lhs = graph.alloc(NodeKind::Add, vec![Some(l_lhs), Some(r)]);
        let new_lhs = peephole(graph, new_lhs)?;
        let new_add = graph.alloc(NodeKind::Add, vec![Some(new_lhs), Some(l_rhs)]);
        return Ok(Some(new_add));
    }

    Ok(None)
}

fn should_swap_non_adds(graph: &Graph, l: NodeId, r: NodeId) -> bool {
    !int_ty(graph, r).is_constant() && (int_ty(graph, l).is_constant() || r.index() > l.index())
}

// ---------------------------------------------------------------- Sub

pub(crate) fn compute_sub(graph: &Graph, id: NodeId) -> Result<Type, CompileError> {
    let (l, r) = (lhs(graph, id), rhs(graph, id));
    if l == r {
        return Ok(Type::int(0));
    }
    match (int_ty(graph, l), int_ty(graph, r)) {
        (Type::Int(IntValue::Const(a)), Type::Int(IntValue::Const(b))) => Ok(Type::int(a - b)),
        _ => Ok(Type::Bottom),
    }
}

pub(crate) fn idealize_sub(graph: &mut Graph, id: NodeId) -> Result<Option<NodeId>, CompileError> {
    let (l, r) = (lhs(graph, id), rhs(graph, id));
    // 0 - x => -x
    if let Some(0) = int_ty(graph, l).as_int_const() {
        let minus = graph.alloc(NodeKind::Minus, vec![Some(r)]);
        return Ok(Some(minus));
    }
    // x - 0 => x
    if let Some(0) = int_ty(graph, r).as_int_const() {
        return Ok(Some(l));
    }
    Ok(None)
}

// ---------------------------------------------------------------- Mul

pub(crate) fn compute_mul(graph: &Graph, id: NodeId) -> Result<Type, CompileError> {
    let (l, r) = (lhs(graph, id), rhs(graph, id));
    // x * 0 => 0, even for a non-constant x.
    if let Some(0) = int_ty(graph, r).as_int_const() {
        return Ok(Type::int(0));
    }
    match (int_ty(graph, l), int_ty(graph, r)) {
        (Type::Int(IntValue::Const(a)), Type::Int(IntValue::Const(b))) => Ok(Type::int(a * b)),
        _ => Ok(Type::Bottom),
    }
}

pub(crate) fn idealize_mul(graph: &mut Graph, id: NodeId) -> Result<Option<NodeId>, CompileError> {
    let (l, r) = (lhs(graph, id), rhs(graph, id));
    // x * 1 => x
    if let Some(1) = int_ty(graph, r).as_int_const() {
        return Ok(Some(l));
    }
    // gather constants on the right
    if int_ty(graph, l).is_constant() && !int_ty(graph, r).is_constant() {
        swap_binary(graph, id);
        return Ok(Some(id));
    }
    Ok(None)
}

// ---------------------------------------------------------------- Div

pub(crate) fn compute_div(graph: &Graph, id: NodeId, span: Span) -> Result<Type, CompileError> {
    let (l, r) = (lhs(graph, id), rhs(graph, id));
    match (int_ty(graph, l), int_ty(graph, r)) {
        (Type::Int(IntValue::Const(a)), Type::Int(IntValue::Const(b))) => {
            if b == 0 {
                Err(CompileError::compute("divide by zero", span))
            } else {
                Ok(Type::int(a / b))
            }
        }
        (Type::Int(_), Type::Int(_)) => Ok(Type::Bottom),
        _ => Ok(Type::Bottom),
    }
}

pub(crate) fn idealize_div(graph: &mut Graph, id: NodeId) -> Result<Option<NodeId>, CompileError> {
    let (l, r) = (lhs(graph, id), rhs(graph, id));
    // x / 1 => x
    if let Some(1) = int_ty(graph, r).as_int_const() {
        return Ok(Some(l));
    }
    Ok(None)
}

/// Swaps the two operands of a binary node in place; permitted by the
/// peephole protocol as the one side effect `idealize` may have on `n`
/// itself (spec.md §4.2).
fn swap_binary(graph: &mut Graph, id: NodeId) {
    let a = graph.input(id, 0);
    let b = graph.input(id, 1);
    graph.swap_inputs_unchecked(id, a, b);
}

use crate::ir::engine::peephole;
