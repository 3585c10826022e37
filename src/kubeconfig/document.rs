//! The in-memory kubeconfig document.

use super::entry::{ClusterEntry, ContextEntry, Entry, ExecConfig, UserEntry};
use super::error::{KubeconfigError, Result};
use super::upsert::{position_by_name, upsert_by_name, Upsert};
use crate::value::{self, Map, Value};

pub const API_VERSION: &str = "v1";
pub const KIND: &str = "Config";
pub const CURRENT_CONTEXT_KEY: &str = "current-context";

/// Document is a kubeconfig tree rooted at an ordered mapping.
///
/// Keys and entries the merge never targets are carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Map,
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl Document {
    /// Creates an empty kubeconfig with no clusters, users or contexts.
    pub fn new() -> Self {
        let mut root = Map::new();
        root.set("apiVersion", API_VERSION);
        root.set(ClusterEntry::LIST_KEY, Value::List(vec![]));
        root.set(ContextEntry::LIST_KEY, Value::List(vec![]));
        root.set(CURRENT_CONTEXT_KEY, "");
        root.set("kind", KIND);
        root.set("preferences", Map::new());
        root.set(UserEntry::LIST_KEY, Value::List(vec![]));
        Document { root }
    }

    /// Parses YAML text. The document root must be a mapping.
    ///
    /// Non-string mapping keys and custom tags such as `!vault` fail with a
    /// parse error naming the offending path. Standard tags (`!!binary`,
    /// `!!str`) are resolved to their plain scalar and are not written back.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let parsed = value::from_yaml(yaml).map_err(|e| KubeconfigError::parse(e.to_string()))?;
        match parsed {
            Value::Map(root) => Ok(Document { root }),
            other => Err(KubeconfigError::parse(format!(
                "document root must be a mapping, got {}",
                other.kind()
            ))),
        }
    }

    /// Serializes the document with block layout.
    ///
    /// Strings are quoted only where YAML 1.2 would read another type, so a
    /// value such as `'yes'` is written as bare `yes`. Loading it back here
    /// still yields the string; YAML 1.1 readers may see a boolean.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.root).map_err(|e| KubeconfigError::serialize(e.to_string()))
    }

    pub fn root(&self) -> &Map {
        &self.root
    }

    /// Inserts or replaces `entry` in its list, matched by name.
    pub fn upsert<E: Entry>(&mut self, entry: &E) -> Result<Upsert> {
        upsert_by_name(&mut self.root, E::LIST_KEY, entry.name(), entry.to_value())
    }

    /// Registers a cluster endpoint under `key_name`.
    pub fn set_cluster(&mut self, key_name: &str, endpoint: &str, ca_data: &str) -> Result<Upsert> {
        self.upsert(&ClusterEntry::new(key_name, endpoint, ca_data))
    }

    /// Registers an authenticator-backed user under `key_name`.
    pub fn set_user(&mut self, key_name: &str, cluster_name: &str) -> Result<Upsert> {
        self.upsert(&UserEntry::new(key_name, ExecConfig::aws_authenticator(cluster_name)))
    }

    /// Registers a context pairing `cluster_name` with `user_name`.
    pub fn set_context(&mut self, key_name: &str, cluster_name: &str, user_name: &str) -> Result<Upsert> {
        self.upsert(&ContextEntry::new(key_name, cluster_name, user_name))
    }

    /// Overwrites `current-context`. A missing key is added at the end.
    pub fn set_current_context(&mut self, name: &str) {
        self.root.set(CURRENT_CONTEXT_KEY, name);
    }

    pub fn current_context(&self) -> Option<&str> {
        self.root.get(CURRENT_CONTEXT_KEY).and_then(Value::as_str)
    }

    /// The list stored under `list_key`, if it is one.
    pub fn list(&self, list_key: &str) -> Option<&[Value]> {
        self.root.get(list_key).and_then(Value::as_list).map(Vec::as_slice)
    }

    /// Looks up an entry by name in the list stored under `list_key`.
    pub fn find(&self, list_key: &str, name: &str) -> Option<&Map> {
        let list = self.list(list_key)?;
        position_by_name(list, name).and_then(|i| list[i].as_map())
    }

    /// Names of the mapping entries in `list_key`, in list order.
    pub fn entry_names(&self, list_key: &str) -> Vec<&str> {
        self.list(list_key)
            .unwrap_or_default()
            .iter()
            .filter_map(|item| item.as_map()?.get("name")?.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_document_shape() {
        let doc = Document::new();
        let expected = "\
apiVersion: v1
clusters: []
contexts: []
current-context: ''
kind: Config
preferences: {}
users: []
";
        assert_eq!(doc.to_yaml().unwrap(), expected);
        assert_eq!(doc.current_context(), Some(""));
        assert!(doc.list("clusters").unwrap().is_empty());
        assert!(doc.list("users").unwrap().is_empty());
        assert!(doc.list("contexts").unwrap().is_empty());
    }

    #[test]
    fn test_from_yaml_rejects_scalar_root() {
        let err = Document::from_yaml("just a string").unwrap_err();
        assert!(matches!(err, KubeconfigError::Parse { .. }));
    }

    #[test]
    fn test_from_yaml_rejects_empty_input() {
        let err = Document::from_yaml("").unwrap_err();
        assert!(matches!(err, KubeconfigError::Parse { .. }));
    }

    #[test]
    fn test_from_yaml_rejects_malformed_input() {
        let err = Document::from_yaml("clusters: [unterminated").unwrap_err();
        assert!(matches!(err, KubeconfigError::Parse { .. }));
    }

    #[test]
    fn test_from_yaml_rejects_custom_tag_clearly() {
        let err = Document::from_yaml("apiVersion: v1\ntoken: !vault secret/kube\n").unwrap_err();
        assert!(matches!(err, KubeconfigError::Parse { .. }));
        assert_eq!(
            err.to_string(),
            "cannot unmarshal yaml data: $.token: values with custom tags are not supported, found `!vault`"
        );
    }

    #[test]
    fn test_from_yaml_rejects_non_string_key_clearly() {
        let err = Document::from_yaml("apiVersion: v1\npreferences:\n  1: a\n").unwrap_err();
        assert!(matches!(err, KubeconfigError::Parse { .. }));
        let message = err.to_string();
        assert!(message.contains("$.preferences"), "{}", message);
        assert!(message.contains("mapping keys must be strings"), "{}", message);
    }

    #[test]
    fn test_yes_string_reloads_as_string() {
        let doc = Document::from_yaml("apiVersion: v1\nflag: 'yes'\n").unwrap();
        let written = doc.to_yaml().unwrap();
        let reloaded = Document::from_yaml(&written).unwrap();

        assert_eq!(reloaded.root().get("flag"), Some(&Value::from("yes")));
        assert_eq!(reloaded, doc);
    }

    #[test]
    fn test_set_current_context_overwrites() {
        let mut doc = Document::new();
        doc.set_current_context("first");
        doc.set_current_context("second");
        assert_eq!(doc.current_context(), Some("second"));
    }

    #[test]
    fn test_set_current_context_adds_missing_key() {
        let mut doc = Document::from_yaml("apiVersion: v1\nclusters: []\n").unwrap();
        doc.set_current_context("ctx");
        assert_eq!(doc.to_yaml().unwrap(), "apiVersion: v1\nclusters: []\ncurrent-context: ctx\n");
    }

    #[test]
    fn test_find_and_entry_names() {
        let mut doc = Document::new();
        doc.set_cluster("a", "https://a", "QQ==").unwrap();
        doc.set_cluster("b", "https://b", "Qg==").unwrap();

        assert_eq!(doc.entry_names("clusters"), vec!["a", "b"]);
        let b = doc.find("clusters", "b").unwrap();
        let server = b.get("cluster").and_then(Value::as_map).and_then(|c| c.get("server"));
        assert_eq!(server, Some(&Value::from("https://b")));
        assert!(doc.find("clusters", "missing").is_none());
    }
}
