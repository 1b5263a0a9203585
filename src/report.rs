//! Human-readable rendering of an analyzer response.

use std::io::Write;

use crate::models::{AnalyzeResponse, TopNode};

pub const SUCCESS_BANNER: &str = "✅ Analysis succeeded!";
pub const NODES_HEADER: &str = "📊 Top Most Time-consuming Nodes:";
pub const NO_NODES_NOTICE: &str = "❌ No top nodes data";
pub const FAILURE_PREFIX: &str = "❌ Analysis failed:";
/// Printed in place of a missing `error` field.
pub const MISSING_ERROR_PLACEHOLDER: &str = "None";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMarker {
    Most,
    SecondMost,
    Neutral,
}

impl NodeMarker {
    /// "Most" wins over "second-most" when the service sets both.
    pub fn for_node(node: &TopNode) -> Self {
        if node.is_most_consuming {
            NodeMarker::Most
        } else if node.is_second_most_consuming {
            NodeMarker::SecondMost
        } else {
            NodeMarker::Neutral
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            NodeMarker::Most => "🔴",
            NodeMarker::SecondMost => "🟠",
            NodeMarker::Neutral => "⚪",
        }
    }
}

pub fn format_node_line(node: &TopNode) -> String {
    format!(
        "  {} {}. {}: {} ({:.2}%)",
        NodeMarker::for_node(node).symbol(),
        node.rank,
        node.operator_name,
        node.total_time,
        node.time_percentage
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded { nodes: usize },
    Failed,
}

/// Writes the report for `resp`. Nodes are printed in the order received.
pub fn render_report<W: Write>(resp: &AnalyzeResponse, out: &mut W) -> std::io::Result<Outcome> {
    if !resp.success {
        let error = resp.error.as_deref().unwrap_or(MISSING_ERROR_PLACEHOLDER);
        writeln!(out, "{} {}", FAILURE_PREFIX, error)?;
        return Ok(Outcome::Failed);
    }

    writeln!(out, "{}\n", SUCCESS_BANNER)?;
    match resp.top_nodes() {
        Some(nodes) if !nodes.is_empty() => {
            writeln!(out, "{}", NODES_HEADER)?;
            for node in nodes {
                writeln!(out, "{}", format_node_line(node))?;
            }
            Ok(Outcome::Succeeded { nodes: nodes.len() })
        }
        _ => {
            writeln!(out, "{}", NO_NODES_NOTICE)?;
            Ok(Outcome::Succeeded { nodes: 0 })
        }
    }
}
