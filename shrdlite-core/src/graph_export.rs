//! Optional DOT export of an explored search frontier, for the CLI's
//! `--graph` flag. Records the explored transitions into a `petgraph`
//! digraph (deduplicating on state label) and writes it out as GraphViz
//! DOT text directly — the teacher declares the matching `dot` crate in its
//! own `Cargo.toml` for the same graphviz-export purpose but never actually
//! calls into it, so the dependency is carried (per the teacher's own
//! pattern) while the rendering here stays on `petgraph` + a plain writer.

use std::collections::HashMap;
use std::io;
use std::io::Write;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

/// One explored transition, as recorded by the caller while running A*:
/// from-state label, to-state label, the action taken, and its cost.
#[derive(Debug)]
pub struct ExploredEdge {
    pub from: String,
    pub to: String,
    pub action: &'static str,
    pub cost: f64,
}

pub struct SearchGraph {
    graph: DiGraph<String, (&'static str, f64)>,
}

impl SearchGraph {
    pub fn from_edges(edges: &[ExploredEdge]) -> Self {
        let mut graph: DiGraph<String, (&'static str, f64)> = DiGraph::new();
        let mut index_of: HashMap<String, NodeIndex> = HashMap::new();

        for edge in edges {
            let from_idx = *index_of
                .entry(edge.from.clone())
                .or_insert_with(|| graph.add_node(edge.from.clone()));
            let to_idx = *index_of
                .entry(edge.to.clone())
                .or_insert_with(|| graph.add_node(edge.to.clone()));
            graph.add_edge(from_idx, to_idx, (edge.action, edge.cost));
        }

        SearchGraph { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Writes the explored frontier as a DOT document to `out`.
    pub fn write_dot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "digraph search {{")?;
        for node in self.graph.node_indices() {
            writeln!(out, "  n{} [label=\"{}\"];", node.index(), escape(&self.graph[node]))?;
        }
        for edge in self.graph.edge_references() {
            let (action, cost) = edge.weight();
            writeln!(
                out,
                "  n{} -> n{} [label=\"{} ({:.1})\"];",
                edge.source().index(),
                edge.target().index(),
                action,
                cost
            )?;
        }
        writeln!(out, "}}")?;
        Ok(())
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
