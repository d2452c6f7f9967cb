//! Graph data model
//!
//! The types here mirror the JSON a pipeline editor submits: a list of node
//! objects carrying an `id` and a list of edge objects carrying `source` and
//! `target`. Every other field is kept in `extra` and ignored by validation.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

/// Opaque node identifier
///
/// Editors send strings or numbers. Identifiers compare the way JSON scalars
/// compare numerically: `1`, `1.0` and `true` are the same node, while the
/// string `"1"` is a different one. Numbers keep their full range, so
/// integers above `i64::MAX` and fractional values are valid identifiers.
#[derive(Debug, Clone)]
pub enum NodeId {
    /// String identifier
    Text(String),
    /// Integral number, including whole floats and booleans (`true` is 1)
    Integer(i128),
    /// Number with a fractional part, or a whole float beyond `i128`
    Float(f64),
}

/// 2^127: whole floats below this magnitude convert to `i128` exactly
const I128_FLOAT_BOUND: f64 = i128::MAX as f64;

impl NodeId {
    /// Identifier for a JSON number given as a float
    ///
    /// Whole values collapse into [`NodeId::Integer`], so an edge written as
    /// `1.0` reaches the node `1`.
    pub fn from_f64(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < I128_FLOAT_BOUND {
            NodeId::Integer(value as i128)
        } else {
            NodeId::Float(value)
        }
    }

    /// Interpret an arbitrary JSON value as an identifier.
    ///
    /// Returns `None` for `null`, arrays and objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(NodeId::Text(s.clone())),
            // Booleans are integers for identity purposes
            Value::Bool(b) => Some(NodeId::Integer(i128::from(*b))),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(NodeId::Integer(i128::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Some(NodeId::Integer(i128::from(u)))
                } else {
                    n.as_f64().map(NodeId::from_f64)
                }
            }
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

// Floats only hold non-integral finite values (JSON has no NaN), so bit
// equality is numeric equality.
impl PartialEq for NodeId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeId::Text(a), NodeId::Text(b)) => a == b,
            (NodeId::Integer(a), NodeId::Integer(b)) => a == b,
            (NodeId::Float(a), NodeId::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for NodeId {}

impl Hash for NodeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            NodeId::Text(s) => s.hash(state),
            NodeId::Integer(i) => i.hash(state),
            NodeId::Float(f) => f.to_bits().hash(state),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeId::Text(s) => serializer.serialize_str(s),
            NodeId::Integer(i) => serializer.serialize_i128(*i),
            NodeId::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        NodeId::from_value(&value).ok_or_else(|| {
            de::Error::custom(format!(
                "node id must be a string, number or boolean, got {}",
                value
            ))
        })
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Text(s) => f.write_str(s),
            NodeId::Integer(i) => write!(f, "{}", i),
            NodeId::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Text(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId::Text(value)
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId::Integer(i128::from(value))
    }
}

/// A pipeline node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier
    pub id: NodeId,

    /// Editor metadata (type, position, data, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    /// Create a node with no metadata
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }
}

/// A directed connection between two nodes
///
/// Endpoints are optional: an edge whose `source` or `target` is missing,
/// `null` or not a scalar identifier is still part of the submission but
/// never takes part in cycle analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node
    #[serde(default, deserialize_with = "lenient_endpoint")]
    pub source: Option<NodeId>,

    /// Target node
    #[serde(default, deserialize_with = "lenient_endpoint")]
    pub target: Option<NodeId>,

    /// Editor metadata (handles, animation flags, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    /// Create an edge from `source` to `target`
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            extra: Map::new(),
        }
    }

    /// Both endpoints, if the edge carries them
    pub fn endpoints(&self) -> Option<(&NodeId, &NodeId)> {
        match (&self.source, &self.target) {
            (Some(source), Some(target)) => Some((source, target)),
            _ => None,
        }
    }
}

fn lenient_endpoint<'de, D>(deserializer: D) -> Result<Option<NodeId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(NodeId::from_value(&value))
}

/// A submitted pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineGraph {
    /// Nodes as submitted, duplicates included
    pub nodes: Vec<Node>,
    /// Edges as submitted, dangling and malformed ones included
    pub edges: Vec<Edge>,
}

impl PipelineGraph {
    /// Create a graph from its parts
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }
}

/// Structural summary of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphReport {
    /// Number of submitted node entries
    pub num_nodes: usize,
    /// Number of submitted edges
    pub num_edges: usize,
    /// Whether the valid edges form no directed cycle
    pub is_dag: bool,
}
