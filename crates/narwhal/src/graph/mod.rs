use crate::error::{Error, Result};

/// Topological graph consumed and produced by the layout engine.
///
/// Node and edge order is preserved through a layout run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn validate(&self) -> Result<()> {
        let mut node_exists: std::collections::BTreeSet<&str> = std::collections::BTreeSet::new();
        for n in &self.nodes {
            if !node_exists.insert(n.id.as_str()) {
                return Err(Error::DuplicateNode {
                    node_id: n.id.clone(),
                });
            }
            if let Some(p) = n.position {
                if !(p.x.is_finite() && p.y.is_finite()) {
                    return Err(Error::NonFinitePosition {
                        node_id: n.id.clone(),
                    });
                }
            }
        }

        let mut edge_exists: std::collections::BTreeSet<&str> = std::collections::BTreeSet::new();
        for e in &self.edges {
            if !edge_exists.insert(e.id.as_str()) {
                return Err(Error::DuplicateEdge {
                    edge_id: e.id.clone(),
                });
            }
            for endpoint in [&e.source, &e.target] {
                if !node_exists.contains(endpoint.as_str()) {
                    return Err(Error::MissingEndpoint {
                        edge_id: e.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: String,
    /// Optional initial position. Only honored by `Seeding::Input`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<Point>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: None,
        }
    }

    pub fn at(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: Some(Point { x, y }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::{Edge, Graph, Node};
    use crate::error::Error;

    #[test]
    fn validate_reports_the_missing_endpoint() {
        let g = Graph {
            nodes: vec![Node::new("a")],
            edges: vec![Edge::new("e0", "a", "ghost")],
        };
        assert_eq!(
            g.validate(),
            Err(Error::MissingEndpoint {
                edge_id: "e0".to_string(),
                node_id: "ghost".to_string(),
            })
        );
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let g = Graph {
            nodes: vec![Node::new("a"), Node::new("a")],
            edges: Vec::new(),
        };
        assert!(matches!(g.validate(), Err(Error::DuplicateNode { .. })));

        let g = Graph {
            nodes: vec![Node::new("a"), Node::new("b")],
            edges: vec![Edge::new("e", "a", "b"), Edge::new("e", "b", "a")],
        };
        assert!(matches!(g.validate(), Err(Error::DuplicateEdge { .. })));
    }

    #[test]
    fn validate_rejects_non_finite_positions() {
        let g = Graph {
            nodes: vec![Node::at("a", f64::NAN, 0.0)],
            edges: Vec::new(),
        };
        assert!(matches!(g.validate(), Err(Error::NonFinitePosition { .. })));
    }
}
