use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

pub const OBJECTIVE_TYPE: &str = "kazanım";

/// Node and link identifier. Keeps the JSON shape of the source value so a
/// numeric id is emitted as a number and a string id as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Number(Number),
    Text(String),
}

impl NodeId {
    /// Returns `None` for values that cannot key a node: null, empty
    /// strings, zero, booleans, arrays and objects. `1.0` and `1` are the
    /// same id.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) if !text.is_empty() => Some(Self::Text(text.clone())),
            Value::Number(number) if !is_zero(number) => Some(Self::Number(integral(number))),
            _ => None,
        }
    }
}

fn is_zero(number: &Number) -> bool {
    number.as_f64().is_some_and(|value| value == 0.0)
}

fn integral(number: &Number) -> Number {
    match number.as_f64() {
        Some(value)
            if number.is_f64()
                && value.fract() == 0.0
                && value >= i64::MIN as f64
                && value < i64::MAX as f64 =>
        {
            Number::from(value as i64)
        }
        _ => number.clone(),
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Objective,
    Topic,
    Group,
    Subgroup,
    Other,
}

impl NodeKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            OBJECTIVE_TYPE => Self::Objective,
            "konu" => Self::Topic,
            "grup" => Self::Group,
            "alt_grup" => Self::Subgroup,
            _ => Self::Other,
        }
    }

    pub fn is_objective(self) -> bool {
        self == Self::Objective
    }

    /// Maximum label length in characters, ellipsis included.
    pub fn label_cap(self) -> usize {
        match self {
            Self::Topic | Self::Group | Self::Subgroup => 40,
            Self::Objective | Self::Other => 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: String,
    pub r: u32,
    pub color: String,
    pub label: String,
    pub title: String,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        NodeKind::from_tag(&self.node_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl GraphData {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        Self { nodes, links }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
