// src/ir/engine.rs
//! The peephole engine: `compute` + `idealize` dispatch, constant
//! replacement, and textual rendering. Grounded on
//! `examples/original_source/chapter05/ir/node.go`'s `peephole`/`toString`
//! pair, generalized to the tagged-union `NodeKind` rather than Go's
//! interface dispatch.
use crate::error::CompileError;
use crate::ir::kinds::{arithmetic, bool_node, constant, if_node, phi, proj, region, return_node, start, unary};
use crate::ir::node::{BoolOp, Graph, NodeId, NodeKind};
use crate::types::Type;

fn compute(graph: &Graph, id: NodeId) -> Result<Type, CompileError> {
    match graph.kind(id) {
        NodeKind::Start { .. } => start::compute_start(graph, id),
        NodeKind::Constant => constant::compute_constant(graph, id),
        NodeKind::Return => return_node::compute_return(graph, id),
        NodeKind::If => if_node::compute_if(graph, id),
        NodeKind::Proj { index, .. } => proj::compute_proj(graph, id, *index),
        NodeKind::Region => region::compute_region(graph, id),
        NodeKind::Phi { .. } => phi::compute_phi(graph, id),
        NodeKind::Add => arithmetic::compute_add(graph, id),
        NodeKind::Sub => arithmetic::compute_sub(graph, id),
        NodeKind::Mul => arithmetic::compute_mul(graph, id),
        NodeKind::Div { span } => arithmetic::compute_div(graph, id, *span),
        NodeKind::Minus => unary::compute_minus(graph, id),
        NodeKind::Not => unary::compute_not(graph, id),
        NodeKind::Bool(op) => bool_node::compute_bool(graph, id, *op),
        // The Scope node carries no value of its own; mirrors
        // `ScopeNode.compute` in the reference, which always returns Bottom.
        NodeKind::Scope { .. } => Ok(Type::Bottom),
    }
}

fn idealize(graph: &mut Graph, id: NodeId) -> Result<Option<NodeId>, CompileError> {
    match graph.kind(id).clone() {
        NodeKind::Start { .. } => start::idealize_start(graph, id),
        NodeKind::Constant => constant::idealize_constant(graph, id),
        NodeKind::Return => return_node::idealize_return(graph, id),
        NodeKind::If => if_node::idealize_if(graph, id),
        NodeKind::Proj { index, .. } => proj::idealize_proj(graph, id, index),
        NodeKind::Region => region::idealize_region(graph, id),
        NodeKind::Phi { .. } => phi::idealize_phi(graph, id),
        NodeKind::Add => arithmetic::idealize_add(graph, id),
        NodeKind::Sub => arithmetic::idealize_sub(graph, id),
        NodeKind::Mul => arithmetic::idealize_mul(graph, id),
        NodeKind::Div { .. } => arithmetic::idealize_div(graph, id),
        NodeKind::Minus => unary::idealize_minus(graph, id),
        NodeKind::Not => unary::idealize_not(graph, id),
        NodeKind::Bool(op) => bool_node::idealize_bool(graph, id, op),
        NodeKind::Scope { .. } => Ok(None),
    }
}

/// The single entry point for any newly constructed or rewritten node
/// (spec.md §4.2): recompute its type, fold it to a `Constant` if that type
/// is now a single point, otherwise try an `idealize` rewrite, and cascade
/// through the replacement until a fixpoint is reached.
pub fn peephole(graph: &mut Graph, id: NodeId) -> Result<NodeId, CompileError> {
    let ty = compute(graph, id)?;
    graph.set_ty(id, ty.clone());

    if graph.disable_peephole {
        return Ok(id);
    }

    let is_constant_node = matches!(graph.kind(id), NodeKind::Constant);
    let opt =
        if !is_constant_node && ty.is_constant() { Some(graph.alloc_constant(ty)) } else { idealize(graph, id)? };

    match opt {
        Some(opt) => {
            // Re-peephole even when `idealize` returned `n` itself (an
            // in-place commutative swap): the swap can expose a further
            // fold (e.g. `0*arg` swaps to `arg*0`, whose recomputed type is
            // now the constant `0`) that a stale `opt == id` skip would
            // miss. `replace` is a no-op when `opt == id`.
            let opt = peephole(graph, opt)?;
            graph.replace(id, opt)?;
            Ok(opt)
        }
        None => Ok(id),
    }
}

/// `true` iff `id`'s output edge is conventionally drawn as a control edge.
/// Mirrors each kind's `IsControl` in
/// `examples/original_source/chapter05/ir/*.go`; used only by the
/// visualizer, not by any graph-construction invariant.
pub(crate) fn is_control(graph: &Graph, id: NodeId) -> bool {
    match graph.kind(id) {
        NodeKind::Start { .. } | NodeKind::Return | NodeKind::If | NodeKind::Region | NodeKind::Phi { .. } => true,
        NodeKind::Proj { index, .. } => *index == 0,
        NodeKind::Constant
        | NodeKind::Add
        | NodeKind::Sub
        | NodeKind::Mul
        | NodeKind::Div { .. }
        | NodeKind::Minus
        | NodeKind::Not
        | NodeKind::Bool(_)
        | NodeKind::Scope { .. } => false,
    }
}

/// `true` iff `id` has a tuple result and is drawn as a table of
/// projections (`Start`, `If`).
pub(crate) fn is_multi(graph: &Graph, id: NodeId) -> bool {
    matches!(graph.kind(id), NodeKind::Start { .. } | NodeKind::If)
}

/// The short kind label used both in `UniqueName` and in the DOT node
/// table, e.g. `"Add"`, `"Region"`. Grounded on each kind's `label()`.
pub(crate) fn label(graph: &Graph, id: NodeId) -> String {
    match graph.kind(id) {
        NodeKind::Start { .. } => "Start".to_owned(),
        NodeKind::Constant => format!("#{}", constant_label_value(graph, id)),
        NodeKind::Return => "Return".to_owned(),
        NodeKind::If => "If".to_owned(),
        NodeKind::Proj { label, .. } => label.clone(),
        NodeKind::Region => "Region".to_owned(),
        NodeKind::Phi { label } => format!("Phi_{label}"),
        NodeKind::Add => "Add".to_owned(),
        NodeKind::Sub => "Sub".to_owned(),
        NodeKind::Mul => "Mul".to_owned(),
        NodeKind::Div { .. } => "Div".to_owned(),
        NodeKind::Minus => "Minus".to_owned(),
        NodeKind::Not => "Not".to_owned(),
        NodeKind::Bool(op) => match op {
            BoolOp::Eq => "eq".to_owned(),
            BoolOp::Lt => "lt".to_owned(),
            BoolOp::Le => "le".to_owned(),
        },
        NodeKind::Scope { .. } => "Scope".to_owned(),
    }
}

fn constant_label_value(graph: &Graph, id: NodeId) -> String {
    graph.ty(id).map(ToString::to_string).unwrap_or_default()
}

/// The label drawn inside a node's DOT box. Grounded on each kind's
/// `GraphicLabel()` - symbolic for operators, identical to `label()`
/// elsewhere.
pub(crate) fn graphic_label(graph: &Graph, id: NodeId) -> String {
    match graph.kind(id) {
        NodeKind::Add => "+".to_owned(),
        NodeKind::Sub => "-".to_owned(),
        NodeKind::Mul => "*".to_owned(),
        NodeKind::Div { .. } => "/".to_owned(),
        NodeKind::Minus => "-".to_owned(),
        NodeKind::Not => "!".to_owned(),
        NodeKind::Bool(op) => op.symbol().to_owned(),
        NodeKind::Phi { label } => format!("&phi;_{label}"),
        NodeKind::Proj { label, .. } => label.clone(),
        _ => label(graph, id),
    }
}

/// `Con_<id>` for constants, `<parent>:p<i>` for projections, otherwise
/// `<label><id>`. Grounded on `UniqueName` in
/// `examples/original_source/chapter05/ir/node.go`.
pub(crate) fn unique_name(graph: &Graph, id: NodeId) -> String {
    match graph.kind(id) {
        NodeKind::Constant => format!("Con_{id}"),
        NodeKind::Proj { index, .. } => {
            let parent = graph.input(id, 0).expect("Proj always has a parent");
            format!("{}:p{index}", unique_name(graph, parent))
        }
        _ => format!("{}{id}", label(graph, id)),
    }
}

fn to_string_opt(graph: &Graph, id: Option<NodeId>, out: &mut String) {
    match id {
        None => out.push_str("nil"),
        Some(id) => to_string_into(graph, id, out),
    }
}

/// Produces a parenthesised textual form of the value/statement rooted at
/// `id` (spec.md §6); dead nodes render as `Name:DEAD`. Grounded on
/// `toString`/`toStringInternal` across
/// `examples/original_source/chapter0{2,3,5}/ir/*.go`.
#[must_use]
pub fn to_string(graph: &Graph, id: NodeId) -> String {
    let mut out = String::new();
    to_string_into(graph, id, &mut out);
    out
}

fn to_string_into(graph: &Graph, id: NodeId, out: &mut String) {
    if graph.dead(id) {
        out.push_str(&unique_name(graph, id));
        out.push_str(":DEAD");
        return;
    }
    match graph.kind(id) {
        NodeKind::Start { .. } => out.push_str("Start"),
        NodeKind::Constant => out.push_str(&constant_label_value(graph, id)),
        NodeKind::Return => {
            out.push_str("return ");
            to_string_opt(graph, graph.input(id, 1), out);
            out.push(';');
        }
        NodeKind::If => {
            out.push_str("if (");
            to_string_opt(graph, graph.input(id, 1), out);
            out.push(')');
        }
        NodeKind::Proj { label, .. } => out.push_str(label),
        NodeKind::Region => {
            out.push_str("Region");
            out.push_str(&id.to_string());
        }
        NodeKind::Phi { .. } => {
            out.push_str("Phi(");
            for (i, input) in graph.inputs(id).iter().enumerate() {
                if i != 0 {
                    out.push_str(", ");
                }
                to_string_opt(graph, *input, out);
            }
            out.push(')');
        }
        NodeKind::Add => binary(graph, id, "+", out),
        NodeKind::Sub => binary(graph, id, "-", out),
        NodeKind::Mul => binary(graph, id, "*", out),
        NodeKind::Div { .. } => binary(graph, id, "/", out),
        NodeKind::Bool(op) => binary(graph, id, op.symbol(), out),
        NodeKind::Minus => unary_str(graph, id, "-", out),
        NodeKind::Not => unary_str(graph, id, "!", out),
        NodeKind::Scope { scopes } => {
            out.push_str("Scope");
            for table in scopes {
                out.push('[');
                for (i, (name, index)) in table.iter().enumerate() {
                    if i != 0 {
                        out.push_str(", ");
                    }
                    out.push_str(name);
                    out.push(':');
                    to_string_opt(graph, graph.input(id, *index), out);
                }
                out.push(']');
            }
        }
    }
}

fn binary(graph: &Graph, id: NodeId, op: &str, out: &mut String) {
    out.push('(');
    to_string_opt(graph, graph.input(id, 0), out);
    out.push_str(op);
    to_string_opt(graph, graph.input(id, 1), out);
    out.push(')');
}

fn unary_str(graph: &Graph, id: NodeId, op: &str, out: &mut String) {
    out.push('(');
    out.push_str(op);
    to_string_opt(graph, graph.input(id, 0), out);
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Span;

    #[test]
    fn peephole_folds_constant_addition() {
        let mut graph = Graph::new(Type::int_bottom());
        let one = graph.alloc_constant(Type::int(1));
        let two = graph.alloc_constant(Type::int(2));
        let add = graph.alloc(NodeKind::Add, vec![Some(one), Some(two)]);
        let folded = peephole(&mut graph, add).unwrap();
        assert_eq!(graph.ty(folded), Some(&Type::int(3)));
        assert!(matches!(graph.kind(folded), NodeKind::Constant));
        assert!(graph.dead(add));
    }

    #[test]
    fn peephole_is_idempotent_at_fixpoint() {
        let mut graph = Graph::new(Type::int_bottom());
        let one = graph.alloc_constant(Type::int(1));
        let zero = graph.alloc_constant(Type::int(0));
        let add = graph.alloc(NodeKind::Add, vec![Some(one), Some(zero)]);
        let first = peephole(&mut graph, add).unwrap();
        let second = peephole(&mut graph, first).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn division_by_constant_zero_is_a_compute_error() {
        let mut graph = Graph::new(Type::int_bottom());
        let one = graph.alloc_constant(Type::int(1));
        let zero = graph.alloc_constant(Type::int(0));
        let div = graph.alloc(NodeKind::Div { span: Span::at(0) }, vec![Some(one), Some(zero)]);
        let err = peephole(&mut graph, div).unwrap_err();
        assert!(matches!(err, CompileError::Compute { .. }));
    }

    #[test]
    fn mul_by_zero_folds_even_after_a_commutative_swap() {
        let mut graph = Graph::new(Type::int_bottom());
        let arg_proj = graph.alloc(NodeKind::Proj { index: 1, label: "arg".to_owned() }, vec![Some(graph.start)]);
        let arg = peephole(&mut graph, arg_proj).unwrap();
        let zero = graph.alloc_constant(Type::int(0));
        // `0 * arg` idealizes to an in-place swap (`arg * 0`, same node id);
        // the swapped node must still be re-peepholed so the now-constant
        // rhs folds the whole thing to `0` rather than staying `Bottom`.
        let mul = graph.alloc(NodeKind::Mul, vec![Some(zero), Some(arg)]);
        let folded = peephole(&mut graph, mul).unwrap();
        assert_eq!(graph.ty(folded), Some(&Type::int(0)));
        assert!(matches!(graph.kind(folded), NodeKind::Constant));
    }

    #[test]
    fn to_string_renders_dead_nodes_by_name() {
        let mut graph = Graph::new(Type::int_bottom());
        let one = graph.alloc_constant(Type::int(1));
        let zero = graph.alloc_constant(Type::int(0));
        let add = graph.alloc(NodeKind::Add, vec![Some(one), Some(zero)]);
        let name = unique_name(&graph, add);
        peephole(&mut graph, add).unwrap();
        assert_eq!(to_string(&graph, add), format!("{name}:DEAD"));
    }
}
