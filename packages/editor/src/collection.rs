//! # Block Collection
//!
//! Ordered widgets of one page.
//!
//! ## Invariants
//!
//! - ids are unique
//! - blocks are stored in display order and `position == index` for every
//!   block after every public operation (dense `0..n`)
//!
//! ## Stale targets
//!
//! Operations naming an id that is not in the collection do nothing and
//! report it (`false` / `None`). Editing UIs routinely fire operations at a
//! widget that was deleted a moment ago; that is not an error.

use crate::block::BlockInstance;
use pagekit_catalog::{Catalog, CatalogResult};
use pagekit_common::{ConfigMap, IdGenerator};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Adjacent-swap direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<BlockInstance>", into = "Vec<BlockInstance>")]
pub struct BlockCollection {
    blocks: Vec<BlockInstance>,
}

impl BlockCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a loaded list: sort by stored position (stable), drop repeated
    /// ids, and renumber.
    pub fn from_blocks(mut blocks: Vec<BlockInstance>) -> Self {
        blocks.sort_by_key(|b| b.position);

        let mut seen = HashSet::new();
        blocks.retain(|block| {
            let fresh = seen.insert(block.id.clone());
            if !fresh {
                warn!(id = %block.id, "Dropping widget with duplicate id");
            }
            fresh
        });

        let mut collection = Self { blocks };
        collection.renumber();
        collection
    }

    pub fn blocks(&self) -> &[BlockInstance] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<BlockInstance> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BlockInstance> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.id.as_str())
    }

    /// Insert a new widget of type `tag` with its catalog defaults.
    ///
    /// `at` defaults to the end and is clamped to the collection size.
    pub fn insert(
        &mut self,
        catalog: &Catalog,
        ids: &mut IdGenerator,
        tag: &str,
        at: Option<usize>,
    ) -> CatalogResult<BlockInstance> {
        let config = catalog.default_config(tag)?;
        let id = ids.new_id_avoiding(|candidate| self.contains(candidate));
        let index = at.unwrap_or(self.blocks.len()).min(self.blocks.len());

        self.blocks.insert(index, BlockInstance::new(id, tag, config));
        self.renumber();

        debug!(block_type = %tag, index, "Inserted widget");
        Ok(self.blocks[index].clone())
    }

    /// Swap with the neighbour in `direction`; no-op at either end
    pub fn move_block(&mut self, id: &str, direction: Direction) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };

        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.blocks.len() => index + 1,
            _ => return false,
        };

        self.blocks.swap(index, target);
        self.renumber();
        debug!(id, from = index, to = target, "Moved widget");
        true
    }

    /// Move to `to_index` (clamped), shifting the widgets in between
    pub fn reorder(&mut self, id: &str, to_index: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };

        let to = to_index.min(self.blocks.len() - 1);
        if from == to {
            return false;
        }

        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        self.renumber();
        debug!(id, from, to, "Reordered widget");
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<BlockInstance> {
        let index = self.index_of(id)?;
        let removed = self.blocks.remove(index);
        self.renumber();
        debug!(id, "Removed widget");
        Some(removed)
    }

    /// Copy type and config under a new id, appended at the end of the page
    pub fn duplicate(&mut self, ids: &mut IdGenerator, id: &str) -> Option<BlockInstance> {
        let source = self.get(id)?;
        let new_id = ids.new_id_avoiding(|candidate| self.contains(candidate));
        let copy = source.duplicate_as(new_id);

        self.blocks.push(copy);
        self.renumber();

        let copy = self.blocks.last()?.clone();
        debug!(source = id, id = %copy.id, "Duplicated widget");
        Some(copy)
    }

    /// Flip `enabled`; positions are untouched
    pub fn toggle_enabled(&mut self, id: &str) -> bool {
        match self.blocks.iter_mut().find(|b| b.id == id) {
            Some(block) => {
                block.enabled = !block.enabled;
                true
            }
            None => false,
        }
    }

    /// Shallow-merge `partial` into the widget's config.
    ///
    /// Returns false when the id is unknown or nothing changed.
    pub fn update_config(&mut self, id: &str, partial: &ConfigMap) -> bool {
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            return false;
        };

        let mut changed = false;
        for (key, value) in partial {
            if block.config.get(key) != Some(value) {
                block.config.insert(key.clone(), value.clone());
                changed = true;
            }
        }
        changed
    }

    /// Replace the widget's config wholesale
    pub fn replace_config(&mut self, id: &str, config: ConfigMap) -> bool {
        match self.blocks.iter_mut().find(|b| b.id == id) {
            Some(block) if block.config != config => {
                block.config = config;
                true
            }
            _ => false,
        }
    }

    /// Whether positions are exactly `0..n` in storage order
    pub fn is_dense(&self) -> bool {
        self.blocks.iter().enumerate().all(|(i, b)| b.position == i)
    }

    fn renumber(&mut self) {
        for (index, block) in self.blocks.iter_mut().enumerate() {
            block.position = index;
        }
    }
}

impl From<Vec<BlockInstance>> for BlockCollection {
    fn from(blocks: Vec<BlockInstance>) -> Self {
        Self::from_blocks(blocks)
    }
}

impl From<BlockCollection> for Vec<BlockInstance> {
    fn from(collection: BlockCollection) -> Self {
        collection.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(id: &str, position: usize) -> BlockInstance {
        let mut b = BlockInstance::new(id, "text", ConfigMap::new());
        b.position = position;
        b
    }

    fn abc() -> BlockCollection {
        BlockCollection::from_blocks(vec![block("a", 0), block("b", 1), block("c", 2)])
    }

    fn order(collection: &BlockCollection) -> Vec<&str> {
        collection.ids().collect()
    }

    #[test]
    fn test_reorder_to_front() {
        let mut collection = abc();
        assert!(collection.reorder("c", 0));

        assert_eq!(order(&collection), vec!["c", "a", "b"]);
        assert!(collection.is_dense());
        assert_eq!(collection.get("c").unwrap().position, 0);
        assert_eq!(collection.get("b").unwrap().position, 2);
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let mut collection = abc();
        let before = collection.clone();
        assert!(!collection.reorder("b", 1));
        assert_eq!(collection, before);
    }

    #[test]
    fn test_reorder_clamps_past_end() {
        let mut collection = abc();
        assert!(collection.reorder("a", 99));
        assert_eq!(order(&collection), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_boundaries_are_noops() {
        let mut collection = abc();
        let before = collection.clone();

        assert!(!collection.move_block("a", Direction::Up));
        assert!(!collection.move_block("c", Direction::Down));
        assert_eq!(collection, before);

        assert!(collection.move_block("a", Direction::Down));
        assert_eq!(order(&collection), vec!["b", "a", "c"]);
        assert!(collection.is_dense());
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut collection = abc();
        let before = collection.clone();
        let mut ids = IdGenerator::from_seed("t");

        assert!(!collection.move_block("zz", Direction::Up));
        assert!(!collection.reorder("zz", 0));
        assert!(collection.remove("zz").is_none());
        assert!(collection.duplicate(&mut ids, "zz").is_none());
        assert!(!collection.toggle_enabled("zz"));
        assert!(!collection.update_config("zz", &ConfigMap::new()));

        assert_eq!(collection, before);
    }

    #[test]
    fn test_remove_renumbers() {
        let mut collection = abc();
        let removed = collection.remove("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(order(&collection), vec!["b", "c"]);
        assert!(collection.is_dense());
    }

    #[test]
    fn test_insert_at_index() {
        let catalog = Catalog::builtin();
        let mut ids = IdGenerator::from_seed("t");
        let mut collection = abc();

        let inserted = collection
            .insert(&catalog, &mut ids, "spacer", Some(1))
            .unwrap();

        assert_eq!(inserted.position, 1);
        assert_eq!(collection.blocks()[1].id, inserted.id);
        assert_eq!(collection.len(), 4);
        assert!(collection.is_dense());
    }

    #[test]
    fn test_insert_unknown_variant_leaves_collection() {
        let catalog = Catalog::builtin();
        let mut ids = IdGenerator::from_seed("t");
        let mut collection = abc();
        let before = collection.clone();

        assert!(collection.insert(&catalog, &mut ids, "marquee", None).is_err());
        assert_eq!(collection, before);
    }

    #[test]
    fn test_insert_avoids_existing_ids() {
        let catalog = Catalog::builtin();
        let mut ids = IdGenerator::from_seed("t");
        let mut collection = BlockCollection::from_blocks(vec![block("t-1", 0)]);

        let inserted = collection.insert(&catalog, &mut ids, "text", None).unwrap();
        assert_eq!(inserted.id, "t-2");
    }

    #[test]
    fn test_duplicate_appends_at_end() {
        let mut ids = IdGenerator::from_seed("t");
        let mut collection = abc();
        collection.update_config("a", json!({ "body": "hi" }).as_object().unwrap());

        let copy = collection.duplicate(&mut ids, "a").unwrap();

        assert_eq!(copy.position, 3);
        assert_eq!(collection.blocks()[3].id, copy.id);
        assert_eq!(copy.block_type(), "text");
        assert_eq!(copy.config["body"], json!("hi"));
        assert_ne!(copy.id, "a");
    }

    #[test]
    fn test_toggle_keeps_positions() {
        let mut collection = abc();
        assert!(collection.toggle_enabled("b"));
        assert!(!collection.get("b").unwrap().enabled);
        assert_eq!(order(&collection), vec!["a", "b", "c"]);
        assert!(collection.is_dense());
    }

    #[test]
    fn test_update_config_is_shallow() {
        let mut collection = abc();
        collection.update_config(
            "a",
            json!({ "style": { "color": "red", "size": 2 } }).as_object().unwrap(),
        );
        collection.update_config("a", json!({ "style": { "color": "blue" } }).as_object().unwrap());

        assert_eq!(
            collection.get("a").unwrap().config["style"],
            json!({ "color": "blue" })
        );
    }

    #[test]
    fn test_update_config_reports_unchanged() {
        let mut collection = abc();
        let partial = json!({ "body": "x" });
        assert!(collection.update_config("a", partial.as_object().unwrap()));
        assert!(!collection.update_config("a", partial.as_object().unwrap()));
    }

    #[test]
    fn test_load_normalizes_positions_and_ids() {
        let collection = BlockCollection::from_blocks(vec![
            block("c", 9),
            block("a", 2),
            block("b", 5),
            block("a", 7),
        ]);

        assert_eq!(order(&collection), vec!["a", "b", "c"]);
        assert!(collection.is_dense());
    }

    #[test]
    fn test_serde_round_trip() {
        let collection = abc();
        let json = serde_json::to_string(&collection).unwrap();
        let decoded: BlockCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, collection);
    }
}
