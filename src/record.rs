use crate::ir::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod fields {
    pub const ID: &str = "id";
    pub const NODE_TYPE: &str = "node_type";
    pub const TYPE: &str = "type";
    pub const NODE_SIZE: &str = "node_size";
    pub const PARENT_ID: &str = "parent_id";
    pub const CODE: &str = "kazanim_kodu";
    pub const TITLE: &str = "baslik";
    pub const TOPIC: &str = "konu";
    pub const GRADE: &str = "sinif";
    pub const TEST: &str = "test";
    pub const SCORE: &str = "basari_puani";
}

/// One raw curriculum entry. Accessors treat falsy values the way the data
/// source means them: as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn id(&self) -> Option<NodeId> {
        self.get(fields::ID).and_then(NodeId::from_value)
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.get(fields::PARENT_ID).and_then(NodeId::from_value)
    }

    /// `node_type`, then `type`; empty and non-string tags are skipped.
    pub fn type_tag(&self) -> Option<&str> {
        [fields::NODE_TYPE, fields::TYPE]
            .into_iter()
            .find_map(|key| self.get(key).and_then(Value::as_str).filter(|tag| !tag.is_empty()))
    }

    /// Integer `node_size`; floats and strings do not count.
    pub fn size_hint(&self) -> Option<i64> {
        self.get(fields::NODE_SIZE).and_then(Value::as_i64)
    }

    pub fn title(&self) -> Option<String> {
        self.text(fields::TITLE)
    }

    pub fn code(&self) -> Option<String> {
        self.text(fields::CODE)
    }

    pub fn topic(&self) -> Option<String> {
        self.text(fields::TOPIC)
    }

    pub fn test(&self) -> Option<String> {
        self.text(fields::TEST)
    }

    /// Grade is kept even when it is `0`; only null and empty strings are absent.
    pub fn grade(&self) -> Option<String> {
        match self.get(fields::GRADE)? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    /// Raw success score; missing or non-numeric values read as 0.0.
    pub fn success_score(&self) -> f64 {
        self.get(fields::SCORE).and_then(Value::as_f64).unwrap_or(0.0)
    }

    fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
