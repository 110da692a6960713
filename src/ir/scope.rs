// src/ir/scope.rs
//! The lexical symbol table modeled as a node (spec.md §4.4): input 0 is
//! the current control node, inputs 1.. are live SSA bindings tracked by a
//! stack of name -> input-index tables carried in `NodeKind::Scope`.
//! Grounded on `examples/original_source/chapter05/ir/scope.go`, with one
//! deliberate simplification: `$ctrl` lives in a dedicated input slot 0
//! rather than as a named entry in the table stack, so `control`/
//! `set_control` never have to consult the name tables at all.
use crate::error::CompileError;
use crate::ir::engine::peephole;
use crate::ir::node::{Graph, NodeId, NodeKind};
use crate::location::Span;

/// The argument binding's name in the outermost scope, mirroring `Arg0` in
/// the reference.
pub const ARG0: &str = "arg";

fn tables(graph: &Graph, scope: NodeId) -> &[Vec<(String, usize)>] {
    match graph.kind(scope) {
        NodeKind::Scope { scopes } => scopes,
        _ => panic!("node {scope} is not a Scope"),
    }
}

fn tables_mut(graph: &mut Graph, scope: NodeId) -> &mut Vec<Vec<(String, usize)>> {
    match graph.kind_mut(scope) {
        NodeKind::Scope { scopes } => scopes,
        _ => panic!("node {scope} is not a Scope"),
    }
}

/// Allocates a fresh, empty `Scope` node: one input slot reserved for
/// `$ctrl` (initially unset) and no lexical levels pushed yet.
pub fn new_scope(graph: &mut Graph) -> NodeId {
    graph.alloc(NodeKind::Scope { scopes: Vec::new() }, vec![None])
}

/// Begins a nested lexical scope.
pub fn push(graph: &mut Graph, scope: NodeId) {
    tables_mut(graph, scope).push(Vec::new());
}

/// Ends the innermost lexical scope, releasing the output edge of each
/// binding it held (in reverse definition order, since each is the current
/// last input slot).
pub fn pop(graph: &mut Graph, scope: NodeId) -> Result<(), CompileError> {
    let count = tables_mut(graph, scope).pop().expect("pop without a matching push").len();
    for _ in 0..count {
        graph.remove_last_input(scope)?;
    }
    Ok(())
}

/// The current control node, or `None` once control has been consumed by a
/// `return` (spec.md §4.5's `SEALED` state).
#[must_use]
pub fn control(graph: &Graph, scope: NodeId) -> Option<NodeId> {
    graph.input(scope, 0)
}

/// Overwrites the current control node.
pub fn set_control(graph: &mut Graph, scope: NodeId, node: Option<NodeId>) -> Result<(), CompileError> {
    graph.set_input(scope, 0, node)
}

/// Binds `name` to `value` in the innermost scope level. Errors if `name`
/// is already defined at that level (spec.md §4.4: "must not already exist
/// in the innermost table").
pub fn define(graph: &mut Graph, scope: NodeId, name: &str, value: NodeId, span: Span) -> Result<(), CompileError> {
    let redefined =
        tables(graph, scope).last().is_some_and(|level| level.iter().any(|(existing, _)| existing == name));
    if redefined {
        return Err(CompileError::compute(format!("cannot redeclare '{name}' in the same scope"), span));
    }
    let index = graph.num_inputs(scope);
    graph.add_input(scope, value);
    tables_mut(graph, scope).last_mut().expect("define requires a pushed scope").push((name.to_owned(), index));
    Ok(())
}

fn lookup_index(graph: &Graph, scope: NodeId, name: &str) -> Option<usize> {
    tables(graph, scope)
        .iter()
        .rev()
        .find_map(|level| level.iter().find(|(existing, _)| existing == name).map(|(_, index)| *index))
}

/// Walks the scope stack innermost-first, returning the node currently
/// bound to `name`.
#[must_use]
pub fn lookup(graph: &Graph, scope: NodeId, name: &str) -> Option<NodeId> {
    let index = lookup_index(graph, scope, name)?;
    graph.input(scope, index)
}

/// Rebinds an existing name to `value`. Returns `false` (without touching
/// the graph) if `name` is not currently bound.
pub fn update(graph: &mut Graph, scope: NodeId, name: &str, value: NodeId) -> Result<bool, CompileError> {
    let Some(index) = lookup_index(graph, scope, name) else { return Ok(false) };
    graph.set_input(scope, index, Some(value))?;
    Ok(true)
}

/// Deep-copies the table stack; each entry still shares the same
/// underlying value nodes, which simply gain one more user via the normal
/// `alloc` output-wiring.
#[must_use]
pub fn clone_scope(graph: &mut Graph, scope: NodeId) -> NodeId {
    let scopes = tables(graph, scope).to_vec();
    let inputs = graph.inputs(scope).to_vec();
    graph.alloc(NodeKind::Scope { scopes }, inputs)
}

fn bindings(graph: &Graph, scope: NodeId) -> Vec<(String, usize)> {
    tables(graph, scope).iter().flatten().cloned().collect()
}

/// Produces a control-flow join of `this` and `other`: a `Region` over
/// their two control edges, with a `Phi` installed (in `this`, in place)
/// for every binding index where the two branches disagree. `other` is
/// killed afterwards - its bindings are now either shared with `this` or
/// superseded by a `Phi`. The caller installs the returned region as the
/// new control. Grounded on `ScopeNode.Merge`.
pub fn merge(graph: &mut Graph, this: NodeId, other: NodeId) -> Result<NodeId, CompileError> {
    let region = graph.alloc(NodeKind::Region, vec![control(graph, this), control(graph, other)]);
    graph.pin(region);
    let region = peephole(graph, region)?;

    for (name, index) in bindings(graph, this) {
        let d0 = graph.input(this, index);
        let d1 = graph.input(other, index);
        if d0 == d1 {
            continue;
        }
        let phi = graph.alloc(NodeKind::Phi { label: name }, vec![Some(region), d0, d1]);
        let phi = peephole(graph, phi)?;
        graph.set_input(this, index, Some(phi))?;
    }

    graph.unpin(region);
    graph.kill(other)?;
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    fn fresh_scope(graph: &mut Graph) -> NodeId {
        let scope = new_scope(graph);
        push(graph, scope);
        scope
    }

    #[test]
    fn define_then_lookup_round_trips() {
        let mut graph = Graph::new(Type::int_bottom());
        let scope = fresh_scope(&mut graph);
        let one = graph.alloc_constant(Type::int(1));
        define(&mut graph, scope, "a", one, Span::default()).unwrap();
        assert_eq!(lookup(&graph, scope, "a"), Some(one));
    }

    #[test]
    fn redefining_in_the_same_level_is_an_error() {
        let mut graph = Graph::new(Type::int_bottom());
        let scope = fresh_scope(&mut graph);
        let one = graph.alloc_constant(Type::int(1));
        let two = graph.alloc_constant(Type::int(2));
        define(&mut graph, scope, "a", one, Span::default()).unwrap();
        assert!(define(&mut graph, scope, "a", two, Span::default()).is_err());
    }

    #[test]
    fn inner_scope_shadows_outer_binding() {
        let mut graph = Graph::new(Type::int_bottom());
        let scope = fresh_scope(&mut graph);
        let outer = graph.alloc_constant(Type::int(1));
        define(&mut graph, scope, "b", outer, Span::default()).unwrap();
        push(&mut graph, scope);
        let inner = graph.alloc_constant(Type::int(3));
        define(&mut graph, scope, "b", inner, Span::default()).unwrap();
        assert_eq!(lookup(&graph, scope, "b"), Some(inner));
        pop(&mut graph, scope).unwrap();
        assert_eq!(lookup(&graph, scope, "b"), Some(outer));
    }

    #[test]
    fn update_rebinds_an_existing_name() {
        let mut graph = Graph::new(Type::int_bottom());
        let scope = fresh_scope(&mut graph);
        let one = graph.alloc_constant(Type::int(1));
        let two = graph.alloc_constant(Type::int(2));
        define(&mut graph, scope, "a", one, Span::default()).unwrap();
        assert!(update(&mut graph, scope, "a", two).unwrap());
        assert_eq!(lookup(&graph, scope, "a"), Some(two));
    }

    #[test]
    fn update_of_unknown_name_reports_absence() {
        let mut graph = Graph::new(Type::int_bottom());
        let scope = fresh_scope(&mut graph);
        let one = graph.alloc_constant(Type::int(1));
        assert!(!update(&mut graph, scope, "nope", one).unwrap());
    }

    #[test]
    fn clone_shares_values_and_merge_collapses_identical_bindings() {
        let mut graph = Graph::new(Type::int_bottom());
        let scope = fresh_scope(&mut graph);
        let proj_ctrl = graph.alloc(NodeKind::Proj { index: 0, label: "Control".into() }, vec![Some(graph.start)]);
        let ctrl = peephole(&mut graph, proj_ctrl).unwrap();
        set_control(&mut graph, scope, Some(ctrl)).unwrap();
        let one = graph.alloc_constant(Type::int(1));
        define(&mut graph, scope, "a", one, Span::default()).unwrap();

        let clone = clone_scope(&mut graph, scope);
        assert_eq!(lookup(&graph, clone, "a"), Some(one));

        let true_proj = graph.alloc(NodeKind::Proj { index: 0, label: "True".into() }, vec![]);
        let false_proj = graph.alloc(NodeKind::Proj { index: 1, label: "False".into() }, vec![]);
        set_control(&mut graph, scope, Some(true_proj)).unwrap();
        set_control(&mut graph, clone, Some(false_proj)).unwrap();

        let region = merge(&mut graph, scope, clone).unwrap();
        assert!(matches!(graph.kind(region), NodeKind::Region));
        // "a" agreed in both branches, so no Phi was needed for it.
        assert_eq!(lookup(&graph, scope, "a"), Some(one));
        assert!(graph.dead(clone));
    }
}
