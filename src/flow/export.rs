//! File exports of a survey's flow graph. The JSON document carries the full
//! graph; the CSV is a flat `id,type,label` listing of the nodes.

use std::borrow::Cow;

use serde_json::json;

use super::{Edge, Node};

/// Serialize the graph as the downloadable logic document
/// `{ title, nodes, edges }`, pretty-printed.
pub fn export_json(title: &str, nodes: &[Node], edges: &[Edge]) -> serde_json::Result<String> {
    let doc = json!({
        "title": title,
        "nodes": nodes,
        "edges": edges,
    });
    serde_json::to_string_pretty(&doc)
}

/// Render the node list as CSV with an `id,type,label` header. Labels default
/// to the empty string; fields containing delimiters are quoted.
pub fn export_csv(nodes: &[Node]) -> String {
    let mut out = String::from("id,type,label\n");
    let rows: Vec<String> = nodes
        .iter()
        .map(|n| {
            format!(
                "{},{},{}",
                csv_field(&n.id),
                n.node_type,
                csv_field(n.label())
            )
        })
        .collect();
    out.push_str(&rows.join("\n"));
    out
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// File name for the JSON logic export, `<title>-logic.json`.
pub fn logic_filename(title: &str) -> String {
    format!("{}-logic.json", title_or_default(title))
}

/// File name for the CSV node export, `<title>-nodes.csv`.
pub fn nodes_filename(title: &str) -> String {
    format!("{}-nodes.csv", title_or_default(title))
}

fn title_or_default(title: &str) -> &str {
    if title.is_empty() {
        "survey"
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{test_node, NodeType};

    #[test]
    fn csv_matches_exact_contract() {
        let nodes = vec![test_node("1", NodeType::Question, "Q1")];
        assert_eq!(export_csv(&nodes), "id,type,label\n1,question,Q1");
    }

    #[test]
    fn csv_of_empty_graph_is_header_only() {
        assert_eq!(export_csv(&[]), "id,type,label\n");
    }

    #[test]
    fn csv_defaults_missing_labels_and_quotes_delimiters() {
        let nodes = vec![
            test_node("1", NodeType::Start, ""),
            test_node("2", NodeType::Question, "Age, in years"),
        ];
        assert_eq!(
            export_csv(&nodes),
            "id,type,label\n1,start,\n2,question,\"Age, in years\""
        );
    }

    #[test]
    fn json_export_carries_title_nodes_and_edges() {
        let nodes = vec![test_node("1", NodeType::Start, "Start")];
        let edges = vec![];
        let out = export_json("Screening", &nodes, &edges).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["title"], "Screening");
        assert_eq!(parsed["nodes"][0]["id"], "1");
        assert_eq!(parsed["edges"], serde_json::json!([]));
    }

    #[test]
    fn filenames_fall_back_to_survey() {
        assert_eq!(logic_filename("Screening"), "Screening-logic.json");
        assert_eq!(nodes_filename(""), "survey-nodes.csv");
    }
}
