//! Core value types and operations.

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// Value represents a YAML node that can be any of the supported types.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
}

/// Map represents a key-value map where keys are strings.
///
/// Keys keep the order in which they were inserted or loaded, so a document
/// serializes back in the same shape it was read.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Map {
    pub fields: IndexMap<String, Value>,
}

/// ValueError is returned when YAML text cannot be held as a [`Value`].
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{path}: mapping keys must be strings, found {kind} key `{key}`")]
    NonStringKey {
        path: String,
        kind: &'static str,
        key: String,
    },

    #[error("{path}: values with custom tags are not supported, found `{tag}`")]
    Tagged { path: String, tag: String },
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Short name of the node kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

/// Two maps are equal only when they hold the same pairs in the same order.
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.fields.iter().eq(other.fields.iter())
    }
}

impl Map {
    pub fn new() -> Self {
        Map {
            fields: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Sets `key` to `value`. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Map {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse a value from YAML.
///
/// Mapping keys must be strings and custom tags (`!foo`) are rejected.
/// Standard tags such as `!!str` or `!!binary` are resolved by the YAML
/// parser to the plain scalar, so the tag itself is not written back.
pub fn from_yaml(yaml: &str) -> Result<Value, ValueError> {
    let node: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    convert(node, "$")
}

/// Serialize a value to YAML.
///
/// Strings are quoted only when YAML 1.2 would read them as another type,
/// so words like `yes`, `no`, `on` or `off` are written bare. YAML 1.1
/// readers take those for booleans.
pub fn to_yaml(value: &Value) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}

fn convert(node: serde_yaml::Value, path: &str) -> Result<Value, ValueError> {
    use serde_yaml::Value as Yaml;

    let value = match node {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::List(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| convert(item, &format!("{}[{}]", path, i)))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, item) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    other => {
                        return Err(ValueError::NonStringKey {
                            path: path.to_string(),
                            kind: yaml_kind(&other),
                            key: render_key(&other),
                        })
                    }
                };
                let child = convert(item, &format!("{}.{}", path, key))?;
                map.set(key, child);
            }
            Value::Map(map)
        }
        Yaml::Tagged(tagged) => {
            return Err(ValueError::Tagged {
                path: path.to_string(),
                tag: tagged.tag.to_string(),
            })
        }
    };
    Ok(value)
}

fn number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::UInt(u)
    } else {
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn yaml_kind(node: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value as Yaml;

    match node {
        Yaml::Null => "null",
        Yaml::Bool(_) => "bool",
        Yaml::Number(_) => "number",
        Yaml::String(_) => "string",
        Yaml::Sequence(_) => "list",
        Yaml::Mapping(_) => "map",
        Yaml::Tagged(_) => "tagged",
    }
}

fn render_key(node: &serde_yaml::Value) -> String {
    serde_yaml::to_string(node)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_default()
}
