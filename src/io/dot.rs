//! # Dot
//!
//! The Dot-Format is a very extensive format used by [GraphViz](https://graphviz.org/) to allow
//! for detailed visualizations. We only use basic functionality: vertices are named by their
//! labels, pinned to their positions (`neato -n` respects them) and filled according to their
//! state; edges are colored according to their state.
//!
//! ```
//! use graph_trace::{prelude::*, algo::*, io::*};
//!
//! let graph = Graph::from_edges(3, true, [(0, 1), (1, 2), (2, 0)]);
//! let result = detect_cycle(&graph, true);
//!
//! let mut buffer = Vec::new();
//! DotWriter::new()
//!     .try_write_step(result.last_step().unwrap(), true, &mut buffer)
//!     .unwrap();
//!
//! let dot = String::from_utf8(buffer).unwrap();
//! assert!(dot.starts_with("digraph {"));
//! assert!(dot.contains("C->A[color=red]"));
//! ```
use std::fmt::Display;

use super::*;
use crate::trace::Step;

/// A writer for the Dot-Format
#[derive(Debug, Clone)]
pub struct DotWriter {
    /// Write `pos` attributes
    positions: bool,
    /// Write the step description as graph label
    descriptions: bool,
}

impl Default for DotWriter {
    fn default() -> Self {
        Self {
            positions: true,
            descriptions: true,
        }
    }
}

impl DotWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// If *false*, vertex positions are left to the layout engine of GraphViz
    pub fn positions(mut self, positions: bool) -> Self {
        self.positions = positions;
        self
    }

    /// If *false*, step descriptions are not written
    pub fn descriptions(mut self, descriptions: bool) -> Self {
        self.descriptions = descriptions;
        self
    }

    /// Writes the opening brackets of the graph.
    /// Must know if the graph is undirected
    pub fn start_graph<W>(&self, writer: &mut W, directed: bool) -> Result<()>
    where
        W: Write,
    {
        let graph_name = if directed { "digraph" } else { "graph" };

        writeln!(writer, "{graph_name} {{")
    }

    /// Writes all vertices with their position and state
    pub fn write_vertices<W>(&self, writer: &mut W, vertices: &[Vertex]) -> Result<()>
    where
        W: Write,
    {
        for vertex in vertices {
            write!(writer, "{vertex}[")?;
            if self.positions {
                write!(
                    writer,
                    "pos=\"{:.1},{:.1}!\", ",
                    vertex.position.x, vertex.position.y
                )?;
            }
            writeln!(
                writer,
                "style=filled, fillcolor={}]",
                DotColor::from(vertex.state)
            )?;
        }
        Ok(())
    }

    /// Writes edges between the given vertices. Edges in state [`EdgeState::Normal`] are not
    /// colored. Bidirectional edges of a directed graph get arrow heads on both ends.
    pub fn write_edges<'a, W, I>(
        &self,
        writer: &mut W,
        vertices: &[Vertex],
        edges: I,
        directed: bool,
    ) -> Result<()>
    where
        W: Write,
        I: IntoIterator<Item = &'a Edge>,
    {
        let edge_dir = if directed { "->" } else { "--" };

        for edge in edges {
            let mut attributes = Vec::new();
            if edge.state != EdgeState::Normal {
                attributes.push(format!("color={}", DotColor::from(edge.state)));
            }
            if directed && edge.bidirectional {
                attributes.push("dir=both".to_string());
            }
            if let Some(weight) = edge.weight {
                attributes.push(format!("label=\"{weight}\""));
            }

            write!(
                writer,
                "{}{edge_dir}{}",
                vertices[edge.from as usize], vertices[edge.to as usize]
            )?;
            if !attributes.is_empty() {
                write!(writer, "[{}]", attributes.join(", "))?;
            }
            writeln!(writer, ";")?;
        }
        Ok(())
    }

    /// Writes `text` as the label of the whole graph
    pub fn write_label<W>(&self, writer: &mut W, text: &str) -> Result<()>
    where
        W: Write,
    {
        writeln!(writer, "label=\"{}\";", text.replace('"', "\\\""))
    }

    /// Closes the Dot-Graph, thus finishing the graph
    pub fn finish_graph<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        writeln!(writer, "}}")
    }

    /// Writes a single step of a trace. Steps do not know whether their graph was directed.
    pub fn try_write_step<W>(&self, step: &Step, directed: bool, mut writer: W) -> Result<()>
    where
        W: Write,
    {
        self.start_graph(&mut writer, directed)?;
        if self.descriptions {
            self.write_label(&mut writer, &step.description)?;
        }
        self.write_vertices(&mut writer, &step.vertices)?;
        self.write_edges(&mut writer, &step.vertices, &step.edges, directed)?;
        self.finish_graph(&mut writer)
    }
}

impl GraphWriter<Graph> for DotWriter {
    fn try_write_graph<W>(&self, graph: &Graph, mut writer: W) -> Result<()>
    where
        W: Write,
    {
        let directed = graph.is_directed();
        self.start_graph(&mut writer, directed)?;
        self.write_vertices(&mut writer, graph.vertices())?;
        self.write_edges(
            &mut writer,
            graph.vertices(),
            &graph.display_edges(),
            directed,
        )?;
        self.finish_graph(&mut writer)
    }
}

/// Trait for writing a graph to a writer in the Dot-Format.
/// Shorthand for default settings.
pub trait DotWrite {
    /// Tries to write the graph to a writer
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write;
}

impl DotWrite for Graph {
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write,
    {
        DotWriter::default().try_write_graph(self, writer)
    }
}

/// Colors used to draw states, a subset of the SVG colors supported by GraphViz
/// (`https://graphviz.gitlab.io/doc/info/colors.html#svg`)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DotColor {
    Black,
    Blue,
    Gold,
    Gray,
    Green,
    LightGray,
    Orange,
    Purple,
    Red,
    White,
}

impl Display for DotColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}

impl From<VertexState> for DotColor {
    fn from(state: VertexState) -> Self {
        match state {
            VertexState::Unvisited => DotColor::White,
            VertexState::Visiting => DotColor::Gray,
            VertexState::Visited => DotColor::LightGray,
            VertexState::Highlighted => DotColor::Gold,
            VertexState::Processed => DotColor::Green,
        }
    }
}

impl From<EdgeState> for DotColor {
    fn from(state: EdgeState) -> Self {
        match state {
            EdgeState::Normal => DotColor::Black,
            EdgeState::Discovery => DotColor::Orange,
            EdgeState::Back => DotColor::Purple,
            EdgeState::Cross => DotColor::Gray,
            EdgeState::Cycle => DotColor::Red,
            EdgeState::Tree => DotColor::Blue,
            EdgeState::Highlighted => DotColor::Gold,
        }
    }
}
