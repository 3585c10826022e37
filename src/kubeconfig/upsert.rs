//! Update-or-insert of named entries in the reserved top-level lists.

use super::error::{KubeconfigError, Result};
use crate::value::{Map, Value};
use tracing::debug;

/// What an upsert did to its target list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// An entry with the same name existed and was replaced at this index.
    Replaced(usize),
    /// No entry had the name; the new one was appended at this index.
    Appended(usize),
}

/// Returns the index of the first element of `list` that is a mapping whose
/// `name` is the string `name`.
///
/// Elements that are not mappings, or whose `name` is missing or not a
/// string, never match.
pub fn position_by_name(list: &[Value], name: &str) -> Option<usize> {
    list.iter().position(|item| {
        item.as_map()
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            == Some(name)
    })
}

/// Puts `entry` into the list stored under `list_key` in `root`.
///
/// An element with the same `name` is replaced wholesale at its index;
/// otherwise `entry` goes to the tail. Fails with a schema error when
/// `list_key` is absent or does not hold a list, leaving `root` untouched.
pub fn upsert_by_name(root: &mut Map, list_key: &str, name: &str, entry: Value) -> Result<Upsert> {
    let node = root
        .get_mut(list_key)
        .ok_or_else(|| KubeconfigError::missing_key(list_key))?;
    let list = node
        .as_list_mut()
        .ok_or_else(|| KubeconfigError::not_a_list(list_key))?;

    match position_by_name(list, name) {
        Some(index) => {
            debug!(list = list_key, name, index, "replacing entry");
            list[index] = entry;
            Ok(Upsert::Replaced(index))
        }
        None => {
            list.push(entry);
            let index = list.len() - 1;
            debug!(list = list_key, name, index, "appending entry");
            Ok(Upsert::Appended(index))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_yaml;
    use pretty_assertions::assert_eq;

    fn named(name: &str, marker: &str) -> Value {
        Value::Map([("name", name), ("marker", marker)].into_iter().collect())
    }

    fn root_with(list: Vec<Value>) -> Map {
        let mut root = Map::new();
        root.set("items", list);
        root
    }

    fn markers(root: &Map) -> Vec<String> {
        root.get("items")
            .and_then(Value::as_list)
            .unwrap()
            .iter()
            .map(|v| {
                let m = v.as_map().unwrap();
                format!(
                    "{}={}",
                    m.get("name").and_then(Value::as_str).unwrap_or("?"),
                    m.get("marker").and_then(Value::as_str).unwrap_or("?")
                )
            })
            .collect()
    }

    #[test]
    fn test_replace_keeps_index() {
        let mut root = root_with(vec![named("a", "1"), named("b", "1"), named("c", "1")]);
        let result = upsert_by_name(&mut root, "items", "b", named("b", "2")).unwrap();

        assert_eq!(result, Upsert::Replaced(1));
        assert_eq!(markers(&root), vec!["a=1", "b=2", "c=1"]);
    }

    #[test]
    fn test_append_goes_to_tail() {
        let mut root = root_with(vec![named("a", "1"), named("b", "1"), named("c", "1")]);
        let result = upsert_by_name(&mut root, "items", "d", named("d", "1")).unwrap();

        assert_eq!(result, Upsert::Appended(3));
        assert_eq!(markers(&root), vec!["a=1", "b=1", "c=1", "d=1"]);
    }

    #[test]
    fn test_first_match_wins() {
        let mut root = root_with(vec![named("a", "1"), named("a", "2")]);
        upsert_by_name(&mut root, "items", "a", named("a", "3")).unwrap();
        assert_eq!(markers(&root), vec!["a=3", "a=2"]);
    }

    #[test]
    fn test_replace_discards_extra_fields() {
        let mut root = root_with(vec![Value::Map(
            [("name", "a"), ("custom", "hand-added")].into_iter().collect(),
        )]);
        upsert_by_name(&mut root, "items", "a", named("a", "new")).unwrap();

        let entry = root.get("items").and_then(Value::as_list).unwrap()[0].as_map().unwrap();
        assert!(!entry.has("custom"));
    }

    #[test]
    fn test_non_mapping_elements_are_skipped() {
        let mut root = from_yaml("items:\n- plain\n- name: a\n").unwrap().as_map().unwrap().clone();
        let result = upsert_by_name(&mut root, "items", "a", named("a", "1")).unwrap();

        assert_eq!(result, Upsert::Replaced(1));
        assert_eq!(root.get("items").and_then(Value::as_list).unwrap()[0], Value::from("plain"));
    }

    #[test]
    fn test_missing_key() {
        let mut root = Map::new();
        let err = upsert_by_name(&mut root, "items", "a", named("a", "1")).unwrap_err();
        assert_eq!(err.to_string(), "illegal config format: key 'items' is not exist");
        assert!(root.is_empty());
    }

    #[test]
    fn test_key_not_a_list() {
        let mut root = Map::new();
        root.set("items", "scalar");
        let err = upsert_by_name(&mut root, "items", "a", named("a", "1")).unwrap_err();

        assert!(matches!(err, KubeconfigError::Schema { .. }));
        assert_eq!(err.to_string(), "illegal config format: key 'items' must have array data");
        assert_eq!(root.get("items"), Some(&Value::from("scalar")));
    }
}
