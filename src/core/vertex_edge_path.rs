use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::core::error::DecodeError;
use crate::core::value::Value;

/// Writes ` {k: v, ...}` when the map is non-empty
fn fmt_properties(f: &mut fmt::Formatter<'_>, props: &IndexMap<String, Value>) -> fmt::Result {
    if props.is_empty() {
        return Ok(());
    }
    write!(f, " {{")?;
    for (i, (k, v)) in props.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", k, v)?;
    }
    write!(f, "}}")
}

/// A node as returned in a query reply
///
/// The id is unique within one result but is not stable across graph
/// mutations on the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: u64,
    pub labels: Vec<String>,
    pub properties: IndexMap<String, Value>,
}

impl Node {
    pub fn new(id: u64, labels: Vec<String>, properties: IndexMap<String, Value>) -> Self {
        Self {
            id,
            labels,
            properties,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Check if node carries a specific label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Properties in reply order
    pub fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }

    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.id)?;
        for label in &self.labels {
            write!(f, ":{}", label)?;
        }
        fmt_properties(f, &self.properties)?;
        write!(f, ")")
    }
}

/// A relationship between two nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub id: u64,
    pub relationship_type: String,
    pub source_id: u64,
    pub destination_id: u64,
    pub properties: IndexMap<String, Value>,
}

impl Edge {
    pub fn new(
        id: u64,
        relationship_type: String,
        source_id: u64,
        destination_id: u64,
        properties: IndexMap<String, Value>,
    ) -> Self {
        Self {
            id,
            relationship_type,
            source_id,
            destination_id,
            properties,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn relationship_type(&self) -> &str {
        &self.relationship_type
    }

    /// Get source node ID
    pub fn source_id(&self) -> u64 {
        self.source_id
    }

    /// Get destination node ID
    pub fn destination_id(&self) -> u64 {
        self.destination_id
    }

    pub fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }

    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-[{}:{}", self.source_id, self.id, self.relationship_type)?;
        fmt_properties(f, &self.properties)?;
        write!(f, "]->({})", self.destination_id)
    }
}

/// Alternating sequence of nodes and edges
///
/// Always holds at least one node, and exactly one edge fewer than nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Path {
    /// Build a path, rejecting node/edge counts that cannot alternate
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, DecodeError> {
        if nodes.is_empty() || edges.len() + 1 != nodes.len() {
            return Err(DecodeError::PathAlternation {
                nodes: nodes.len(),
                edges: edges.len(),
            });
        }
        Ok(Self { nodes, edges })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges
    pub fn length(&self) -> usize {
        self.edges.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn edge(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    pub fn first_node(&self) -> &Node {
        // 构造时保证至少一个节点
        &self.nodes[0]
    }

    pub fn last_node(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// `(from, edge, to)` triples in path order
    pub fn segments(&self) -> impl Iterator<Item = (&Node, &Edge, &Node)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(move |(i, edge)| (&self.nodes[i], edge, &self.nodes[i + 1]))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<({})", self.first_node().id)?;
        for (_, edge, to) in self.segments() {
            write!(f, "-[{}:{}]-({})", edge.id, edge.relationship_type, to.id)?;
        }
        write!(f, ">")
    }
}
