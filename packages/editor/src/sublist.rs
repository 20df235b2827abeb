//! # Sub-list Editors
//!
//! Ordered lists inside a widget config (FAQ items, steps, pricing tiers,
//! gifts inside a tier, ...) all share the same four edits: add, update,
//! remove and adjacent move.
//!
//! The list functions never mutate their input. [`edit_list`] applies a
//! [`SubListOp`] to whichever list a [`ConfigPath`] points at, so
//! `faqs` and `tiers.0.gifts` are edited the same way.

use crate::collection::Direction;
use pagekit_common::path::{get_list, set};
use pagekit_common::{ConfigMap, ConfigPath, IdGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ITEM_ID_KEY: &str = "id";

/// One edit on a sub-list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SubListOp {
    /// Append a copy of `template`, or of the schema's item template when absent
    Add {
        #[serde(default)]
        template: Option<Value>,
    },
    /// Shallow-merge `fields` into the item at `index`
    Update { index: usize, fields: Map<String, Value> },
    Remove { index: usize },
    Move { index: usize, direction: Direction },
    /// Replace the item at `index` (plain string lists)
    Set { index: usize, value: Value },
}

/// Append `template`; a template carrying an `id` key gets a fresh id
pub fn add_item(list: &[Value], template: Value, ids: &mut IdGenerator) -> Vec<Value> {
    let mut item = template;

    if let Value::Object(fields) = &mut item {
        if fields.contains_key(ITEM_ID_KEY) {
            let id = ids.new_id_avoiding(|candidate| {
                list.iter()
                    .any(|existing| existing.get(ITEM_ID_KEY).and_then(Value::as_str) == Some(candidate))
            });
            fields.insert(ITEM_ID_KEY.to_string(), Value::String(id));
        }
    }

    let mut next = list.to_vec();
    next.push(item);
    next
}

/// Shallow-merge `fields` into the item at `index`.
///
/// Out-of-range indices and non-object items leave the list unchanged.
pub fn update_item(list: &[Value], index: usize, fields: &Map<String, Value>) -> Vec<Value> {
    let mut next = list.to_vec();

    if let Some(Value::Object(item)) = next.get_mut(index) {
        for (key, value) in fields {
            item.insert(key.clone(), value.clone());
        }
    }

    next
}

pub fn remove_item(list: &[Value], index: usize) -> Vec<Value> {
    let mut next = list.to_vec();
    if index < next.len() {
        next.remove(index);
    }
    next
}

/// Swap with the neighbour in `direction`; no-op at either end
pub fn move_item(list: &[Value], index: usize, direction: Direction) -> Vec<Value> {
    let mut next = list.to_vec();

    let target = match direction {
        Direction::Up if index > 0 && index < next.len() => index - 1,
        Direction::Down if index + 1 < next.len() => index + 1,
        _ => return next,
    };

    next.swap(index, target);
    next
}

pub fn set_item(list: &[Value], index: usize, value: Value) -> Vec<Value> {
    let mut next = list.to_vec();
    if let Some(slot) = next.get_mut(index) {
        *slot = value;
    }
    next
}

impl SubListOp {
    /// Apply to a list value
    ///
    /// `fallback_template` is used by `Add` when the op carries no template.
    pub fn apply(
        &self,
        list: &[Value],
        ids: &mut IdGenerator,
        fallback_template: Option<Value>,
    ) -> Vec<Value> {
        match self {
            SubListOp::Add { template } => {
                let template = template
                    .clone()
                    .or(fallback_template)
                    .unwrap_or_else(|| Value::Object(Map::new()));
                add_item(list, template, ids)
            }
            SubListOp::Update { index, fields } => update_item(list, *index, fields),
            SubListOp::Remove { index } => remove_item(list, *index),
            SubListOp::Move { index, direction } => move_item(list, *index, *direction),
            SubListOp::Set { index, value } => set_item(list, *index, value.clone()),
        }
    }
}

/// Apply `op` to the list at `path` inside `config`.
///
/// A missing or non-list value is treated as an empty list. Returns `None`
/// when the edit leaves the list unchanged.
pub fn edit_list(
    config: &ConfigMap,
    path: &ConfigPath,
    op: &SubListOp,
    ids: &mut IdGenerator,
    fallback_template: Option<Value>,
) -> Option<ConfigMap> {
    let list = get_list(config, path);
    let next = op.apply(&list, ids, fallback_template);

    if next == list {
        return None;
    }

    Some(set(config, path, Value::Array(next)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids() -> IdGenerator {
        IdGenerator::from_seed("q")
    }

    fn path(source: &str) -> ConfigPath {
        ConfigPath::parse(source).unwrap()
    }

    #[test]
    fn test_add_assigns_fresh_id() {
        let list = vec![json!({ "id": "q-1", "text": "first" })];
        let next = add_item(&list, json!({ "id": "", "text": "" }), &mut ids());

        assert_eq!(next.len(), 2);
        assert_eq!(next[1]["id"], json!("q-2"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_without_id_key_keeps_template() {
        let next = add_item(&[], json!({ "question": "", "answer": "" }), &mut ids());
        assert_eq!(next, vec![json!({ "question": "", "answer": "" })]);
    }

    #[test]
    fn test_update_is_shallow_merge() {
        let list = vec![json!({ "name": "Basic", "price": "9" })];
        let fields = json!({ "price": "12" });
        let next = update_item(&list, 0, fields.as_object().unwrap());

        assert_eq!(next[0], json!({ "name": "Basic", "price": "12" }));
    }

    #[test]
    fn test_out_of_range_is_unchanged() {
        let list = vec![json!("a"), json!("b")];

        assert_eq!(update_item(&list, 5, &Map::new()), list);
        assert_eq!(remove_item(&list, 2), list);
        assert_eq!(move_item(&list, 7, Direction::Up), list);
        assert_eq!(set_item(&list, 2, json!("c")), list);
    }

    #[test]
    fn test_move_boundaries() {
        let list = vec![json!(1), json!(2), json!(3)];

        assert_eq!(move_item(&list, 0, Direction::Up), list);
        assert_eq!(move_item(&list, 2, Direction::Down), list);
        assert_eq!(
            move_item(&list, 0, Direction::Down),
            vec![json!(2), json!(1), json!(3)]
        );
        assert_eq!(
            move_item(&list, 2, Direction::Up),
            vec![json!(1), json!(3), json!(2)]
        );
    }

    #[test]
    fn test_edit_nested_list() {
        let config = json!({
            "tiers": [{ "name": "Pro", "gifts": [{ "text": "Sticker" }] }]
        });
        let config = config.as_object().unwrap();

        let next = edit_list(
            config,
            &path("tiers.0.gifts"),
            &SubListOp::Add { template: Some(json!({ "text": "Mug" })) },
            &mut ids(),
            None,
        )
        .unwrap();

        assert_eq!(
            next["tiers"][0]["gifts"],
            json!([{ "text": "Sticker" }, { "text": "Mug" }])
        );
        assert_eq!(next["tiers"][0]["name"], json!("Pro"));
    }

    #[test]
    fn test_edit_missing_list_starts_empty() {
        let config = ConfigMap::new();
        let next = edit_list(
            &config,
            &path("features"),
            &SubListOp::Add { template: None },
            &mut ids(),
            Some(json!("")),
        )
        .unwrap();

        assert_eq!(next["features"], json!([""]));
    }

    #[test]
    fn test_edit_unchanged_returns_none() {
        let config = json!({ "items": [] });
        let result = edit_list(
            config.as_object().unwrap(),
            &path("items"),
            &SubListOp::Remove { index: 0 },
            &mut ids(),
            None,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_op_serialization() {
        let op = SubListOp::Move { index: 1, direction: Direction::Up };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json, json!({ "kind": "move", "index": 1, "direction": "up" }));

        let back: SubListOp = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
    }
}
