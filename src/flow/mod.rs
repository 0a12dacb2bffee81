//! In-memory flow graph model shared by the survey documents, the analytics
//! aggregation and the export commands.

pub mod export;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Closed set of node kinds. `start`, `question` and the two terminals carry
/// the eligibility semantics; the remaining kinds are the generic flow types
/// produced by the graph editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    Question,
    Eligible,
    Ineligible,
    Default,
    Input,
    Output,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Start => "start",
            NodeType::Question => "question",
            NodeType::Eligible => "eligible",
            NodeType::Ineligible => "ineligible",
            NodeType::Default => "default",
            NodeType::Input => "input",
            NodeType::Output => "output",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editor canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Node payload. Only `label` is interpreted; everything else the editor
/// attaches round-trips untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single step in a flow graph. Ids are unique within a survey; uniqueness
/// and graph shape (single start node, connectivity) are the editor's
/// responsibility, not enforced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub data: NodeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn label(&self) -> &str {
        self.data.label.as_deref().unwrap_or("")
    }
}

/// Directed connection between two nodes. Referential integrity against the
/// node list is not checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Percentage of terminal nodes that are `eligible` among all terminals,
/// rounded to the nearest integer. Returns 0 when the graph has no terminal
/// nodes yet.
pub fn eligibility_rate(nodes: &[Node]) -> u32 {
    let eligible = nodes
        .iter()
        .filter(|n| n.node_type == NodeType::Eligible)
        .count();
    let ineligible = nodes
        .iter()
        .filter(|n| n.node_type == NodeType::Ineligible)
        .count();
    let total = eligible + ineligible;

    if total == 0 {
        return 0;
    }
    ((eligible as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
pub(crate) fn test_node(id: &str, node_type: NodeType, label: &str) -> Node {
    Node {
        id: id.to_string(),
        node_type,
        data: NodeData {
            label: if label.is_empty() {
                None
            } else {
                Some(label.to_string())
            },
            extra: Map::new(),
        },
        position: None,
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligibility_rate_of_empty_graph_is_zero() {
        assert_eq!(eligibility_rate(&[]), 0);
    }

    #[test]
    fn eligibility_rate_ignores_non_terminal_nodes() {
        let nodes = vec![
            test_node("1", NodeType::Start, "Start"),
            test_node("2", NodeType::Question, "Q1"),
            test_node("3", NodeType::Eligible, "Yes"),
            test_node("4", NodeType::Eligible, "Yes too"),
            test_node("5", NodeType::Eligible, "Also yes"),
            test_node("6", NodeType::Ineligible, "No"),
        ];
        assert_eq!(eligibility_rate(&nodes), 75);
    }

    #[test]
    fn eligibility_rate_rounds_to_nearest() {
        let nodes = vec![
            test_node("1", NodeType::Eligible, ""),
            test_node("2", NodeType::Ineligible, ""),
            test_node("3", NodeType::Ineligible, ""),
        ];
        // 1/3 -> 33.33 -> 33
        assert_eq!(eligibility_rate(&nodes), 33);
        let nodes = vec![
            test_node("1", NodeType::Eligible, ""),
            test_node("2", NodeType::Eligible, ""),
            test_node("3", NodeType::Ineligible, ""),
        ];
        // 2/3 -> 66.67 -> 67
        assert_eq!(eligibility_rate(&nodes), 67);
    }

    #[test]
    fn node_round_trips_unknown_fields() {
        let raw = serde_json::json!({
            "id": "n1",
            "type": "question",
            "data": { "label": "Q1", "weight": 3 },
            "position": { "x": 120.0, "y": 40.5 },
            "selected": true
        });
        let node: Node = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(node.node_type, NodeType::Question);
        assert_eq!(node.label(), "Q1");
        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["data"]["weight"], 3);
        assert_eq!(back["selected"], true);
        assert_eq!(back["position"]["x"], 120.0);
    }

    #[test]
    fn unknown_node_type_is_rejected() {
        let raw = serde_json::json!({ "id": "n1", "type": "teleport", "data": {} });
        assert!(serde_json::from_value::<Node>(raw).is_err());
    }
}
