use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// 點號路徑 → 出現次數
pub type FieldCounts = BTreeMap<String, usize>;

/// 一筆狀態更新 (status)，頂層必定是 JSON 物件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// 非物件的 JSON 值無法成為 Record，原值退回給呼叫端
    pub fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            other => Err(other),
        }
    }

    pub fn as_lookup(&self) -> Lookup<'_> {
        Lookup::Mapping(&self.data)
    }

    /// 沿著路徑逐層查找；任何一層不是物件或缺少 key 都回傳 `Missing`
    pub fn lookup(&self, path: &FieldPath) -> Lookup<'_> {
        path.segments()
            .iter()
            .fold(self.as_lookup(), |current, segment| current.get(segment))
    }

    /// 路徑結果的字串形式，缺少時為空字串
    pub fn cell(&self, path: &FieldPath) -> String {
        self.lookup(path).to_cell()
    }

    pub fn text_at(&self, path: &FieldPath) -> Option<&str> {
        match self.lookup(path) {
            Lookup::Scalar(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

/// 單一步查找的結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Scalar(&'a Value),
    Mapping(&'a Map<String, Value>),
    Sequence(&'a [Value]),
    Missing,
}

impl<'a> Lookup<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None => Lookup::Missing,
            Some(Value::Object(map)) => Lookup::Mapping(map),
            Some(Value::Array(items)) => Lookup::Sequence(items),
            Some(scalar) => Lookup::Scalar(scalar),
        }
    }

    pub fn get(self, key: &str) -> Lookup<'a> {
        match self {
            Lookup::Mapping(map) => Lookup::of(map.get(key)),
            _ => Lookup::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing)
    }

    pub fn to_cell(&self) -> String {
        match self {
            Lookup::Missing | Lookup::Scalar(Value::Null) => String::new(),
            Lookup::Scalar(Value::String(s)) => s.clone(),
            Lookup::Scalar(other) => other.to_string(),
            Lookup::Mapping(map) => Value::Object((*map).clone()).to_string(),
            Lookup::Sequence(items) => Value::Array(items.to_vec()).to_string(),
        }
    }
}

/// 設定中的點號欄位路徑，建構時即切好段落
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        if raw.is_empty() {
            return Err("Field path cannot be empty".to_string());
        }

        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err("Field path contains an empty segment".to_string());
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
