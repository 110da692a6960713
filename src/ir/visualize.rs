// src/ir/visualize.rs
//! Emits a DOT graph of the current IR, for the `#showGraph` pragma and the
//! CLI's `--show-graph` flag (spec.md §4.3, non-normative debug surface).
//! Grounded on `examples/original_source/chapter05/ir/graph.go`.
use crate::ir::engine::{graphic_label, is_control, is_multi, unique_name};
use crate::ir::generator::Generator;
use crate::ir::node::{Graph, NodeId, NodeKind};

/// Renders the full graph reachable from `Start`, plus the live scope's
/// name tables, as a `digraph` DOT source.
#[must_use]
pub fn visualize(generator: &Generator) -> String {
    let graph = &generator.graph;
    let nodes = all_nodes(graph);
    let mut gb = GraphBuilder::default();

    gb.start_block("digraph simplec {");
    // Nodes above, Scopes below, so dashed scope->value edges point up.
    gb.append_line("rankdir=BT;");
    gb.append_line("ordering=\"in\";");
    gb.append_line("concentrate=\"true\";");

    visualize_nodes(&mut gb, graph, &nodes);
    visualize_scopes(&mut gb, graph, generator.scope);
    visualize_node_edges(&mut gb, graph, &nodes);
    visualize_scope_edges(&mut gb, graph, generator.scope);

    gb.end_block("}");
    gb.finish()
}

fn quote_name(graph: &Graph, id: NodeId) -> String {
    let name = unique_name(graph, id);
    if name.starts_with('$') {
        format!("\"{name}\"")
    } else {
        name
    }
}

fn visualize_nodes(gb: &mut GraphBuilder, graph: &Graph, nodes: &[NodeId]) {
    gb.start_block("subgraph cluster_Nodes {");
    for &id in nodes {
        visualize_node(gb, graph, id);
    }
    gb.end_block("}");
}

fn visualize_node(gb: &mut GraphBuilder, graph: &Graph, id: NodeId) {
    if matches!(graph.kind(id), NodeKind::Scope { .. } | NodeKind::Proj { .. }) {
        return;
    }
    gb.append(&format!("{} [ ", quote_name(graph, id)));
    if is_multi(graph, id) {
        visualize_multi_node(gb, graph, id);
    } else {
        if is_control(graph, id) {
            gb.append("shape=box style=filled fillcolor=yellow ");
        }
        gb.append(&format!("label=\"{}\"", graphic_label(graph, id)));
    }
    gb.append_line(" ];");
}

fn visualize_multi_node(gb: &mut GraphBuilder, graph: &Graph, id: NodeId) {
    gb.start_block("shape=plaintext label=<");
    gb.start_block("<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">");
    gb.append_line(&format!("<TR><TD BGCOLOR=\"yellow\">{}</TD></TR>", graphic_label(graph, id)));

    let proj_outputs: Vec<NodeId> =
        graph.outputs(id).iter().copied().filter(|&o| matches!(graph.kind(o), NodeKind::Proj { .. })).collect();
    if !proj_outputs.is_empty() {
        gb.start_block("<TR><TD><TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\"><TR>");
        for proj in proj_outputs {
            let NodeKind::Proj { index, .. } = graph.kind(proj) else { unreachable!() };
            gb.append(&format!("<TD Port=\"p{index}\""));
            if is_control(graph, proj) {
                gb.append(" BGCOLOR=\"yellow\"");
            }
            gb.append_line(&format!(">{}</TD>", graphic_label(graph, proj)));
        }
        gb.end_block("</TR></TABLE></TD></TR>");
    }

    gb.end_block("</TABLE>");
    gb.end_block(">");
}

fn scope_name(graph: &Graph, scope: NodeId, level: usize) -> String {
    format!("{}_{level}", unique_name(graph, scope))
}

fn visualize_scopes(gb: &mut GraphBuilder, graph: &Graph, scope: NodeId) {
    gb.append_line("node [shape=plaintext];");
    let NodeKind::Scope { scopes } = graph.kind(scope) else { return };
    for (level, table) in scopes.iter().enumerate() {
        visualize_scope(gb, graph, scope, level, table);
    }
}

fn visualize_scope(gb: &mut GraphBuilder, graph: &Graph, scope: NodeId, level: usize, table: &[(String, usize)]) {
    let name = scope_name(graph, scope, level);
    gb.start_block(&format!("subgraph cluster_{name} {{"));
    gb.start_block(&format!("{name} [label=<"));
    gb.start_block("<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">");

    gb.append(&format!("<TR><TD BGCOLOR=\"cyan\">{level}</TD>"));
    for (binding_name, _) in table {
        gb.append(&format!("<TD PORT=\"{name}_{binding_name}\">{binding_name}</TD>"));
    }
    gb.append_line("</TR>");

    gb.end_block("</TABLE>>");
    gb.end_block("];");
    gb.end_block("}");
}

fn visualize_node_edges(gb: &mut GraphBuilder, graph: &Graph, nodes: &[NodeId]) {
    gb.append_line("edge [ fontname=Helvetica, fontsize=8 ];");
    for &id in nodes {
        if matches!(graph.kind(id), NodeKind::Scope { .. } | NodeKind::Constant | NodeKind::Proj { .. }) {
            continue;
        }
        for (i, def) in graph.inputs(id).iter().enumerate() {
            let Some(def) = def else { continue };
            gb.append(&format!("{} -> {}", quote_name(graph, id), quote_name(graph, *def)));
            gb.append(&format!("[taillabel={i}"));
            if is_control(graph, *def) {
                gb.append(" color=red");
            }
            gb.append_line("];");
        }
    }
}

fn visualize_scope_edges(gb: &mut GraphBuilder, graph: &Graph, scope: NodeId) {
    gb.append_line("edge [style=dashed color=cornflowerblue];");
    let NodeKind::Scope { scopes } = graph.kind(scope) else { return };
    for (level, table) in scopes.iter().enumerate() {
        let name = scope_name(graph, scope, level);
        for (binding_name, index) in table {
            let Some(n) = graph.input(scope, *index) else { continue };
            gb.append_line(&format!("{name}:\"{name}_{binding_name}\"->{};", quote_name(graph, n)));
        }
    }
}

fn all_nodes(graph: &Graph) -> Vec<NodeId> {
    let mut walked = std::collections::HashSet::new();
    let mut order = Vec::new();
    walk_nodes(graph, graph.start, &mut walked, &mut order);
    order
}

fn walk_nodes(graph: &Graph, id: NodeId, walked: &mut std::collections::HashSet<NodeId>, order: &mut Vec<NodeId>) {
    if !walked.insert(id) {
        return;
    }
    order.push(id);
    for output in graph.outputs(id).to_vec() {
        walk_nodes(graph, output, walked, order);
    }
}

/// Accumulates DOT source with C-style brace indentation, mirroring
/// `graphBuilder` in the reference (`Append`/`AppendLine`/`StartBlock`/
/// `EndBlock`), generalized from its printf-style formatting to pre-built
/// `&str`s/`String`s.
#[derive(Default)]
struct GraphBuilder {
    indent: String,
    out: String,
    new_line: bool,
}

impl GraphBuilder {
    fn append(&mut self, s: &str) {
        if self.new_line {
            self.out.push('\n');
            self.out.push_str(&self.indent);
            self.new_line = false;
        }
        self.out.push_str(s);
    }

    fn append_line(&mut self, s: &str) {
        self.append(s);
        self.new_line = true;
    }

    fn start_block(&mut self, s: &str) {
        self.append_line(s);
        self.indent.push('\t');
    }

    fn end_block(&mut self, s: &str) {
        self.indent.pop();
        self.append_line(s);
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    #[test]
    fn visualize_emits_a_well_formed_digraph() {
        let mut generator = Generator::new(Type::int_bottom()).unwrap();
        let program = crate::parser::parse("return arg+1;").unwrap();
        generator.generate(&program).unwrap();
        let dot = visualize(&generator);
        assert!(dot.starts_with("digraph simplec {"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(dot.contains("subgraph cluster_Nodes {"));
    }
}
