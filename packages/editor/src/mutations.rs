//! # Collection Mutations
//!
//! Every edit to a page is expressed as a serializable [`Mutation`], the
//! same way an editing UI would send it over the wire or log it.
//!
//! ## Mutation Semantics
//!
//! ### Stale targets
//! - A mutation naming a widget id that no longer exists is a no-op
//! - So is a mutation that would not change anything (moving the first
//!   widget up, merging identical values, removing index 7 of a 3-item list)
//! - No-ops are reported as [`MutationOutcome::NoOp`], never as errors
//!
//! ### Insert
//! - The only mutation that can fail: an unknown variant tag is rejected
//!   before the collection is touched

use crate::collection::{BlockCollection, Direction};
use crate::sublist::{edit_list, SubListOp};
use pagekit_catalog::schema::list_template;
use pagekit_catalog::{Catalog, CatalogError};
use pagekit_common::path::{get_ref, set};
use pagekit_common::{ConfigMap, ConfigPath, CtaTarget, IdGenerator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Semantic edits on a [`BlockCollection`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Insert a widget with its catalog defaults (`at` defaults to the end)
    Insert {
        tag: String,
        #[serde(default)]
        at: Option<usize>,
    },

    /// Swap with the adjacent widget
    Move { id: String, direction: Direction },

    /// Move to an absolute index
    Reorder { id: String, to_index: usize },

    Remove { id: String },

    /// Copy type and config to a new widget at the end of the page
    Duplicate { id: String },

    ToggleEnabled { id: String },

    /// Shallow-merge into the widget's config
    UpdateConfig { id: String, partial: ConfigMap },

    /// Write one value through a config path
    SetField {
        id: String,
        path: ConfigPath,
        value: Value,
    },

    /// Add/update/remove/move an item of a sub-list
    EditList {
        id: String,
        path: ConfigPath,
        edit: SubListOp,
    },

    /// Replace the CTA group, at the config root or inside the object at `at`
    SetCta {
        id: String,
        #[serde(default)]
        at: Option<ConfigPath>,
        cta: CtaTarget,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The collection changed; `id` is the affected (or newly created) widget
    Applied { id: String },
    NoOp,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Unknown widget variant: {0}")]
    UnknownVariant(String),
}

impl From<CatalogError> for MutationError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::UnknownVariant(tag) => MutationError::UnknownVariant(tag),
        }
    }
}

pub type MutationResult = Result<MutationOutcome, MutationError>;

impl Mutation {
    /// Id of the widget this mutation targets, if any
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Mutation::Insert { .. } => None,
            Mutation::Move { id, .. }
            | Mutation::Reorder { id, .. }
            | Mutation::Remove { id }
            | Mutation::Duplicate { id }
            | Mutation::ToggleEnabled { id }
            | Mutation::UpdateConfig { id, .. }
            | Mutation::SetField { id, .. }
            | Mutation::EditList { id, .. }
            | Mutation::SetCta { id, .. } => Some(id),
        }
    }

    /// Apply to `collection`
    pub fn apply(
        &self,
        collection: &mut BlockCollection,
        catalog: &Catalog,
        ids: &mut IdGenerator,
    ) -> MutationResult {
        let changed = match self {
            Mutation::Insert { tag, at } => {
                let block = collection.insert(catalog, ids, tag, *at)?;
                return Ok(MutationOutcome::Applied { id: block.id });
            }
            Mutation::Duplicate { id } => {
                return Ok(match collection.duplicate(ids, id) {
                    Some(copy) => MutationOutcome::Applied { id: copy.id },
                    None => MutationOutcome::NoOp,
                });
            }
            Mutation::Move { id, direction } => collection.move_block(id, *direction),
            Mutation::Reorder { id, to_index } => collection.reorder(id, *to_index),
            Mutation::Remove { id } => collection.remove(id).is_some(),
            Mutation::ToggleEnabled { id } => collection.toggle_enabled(id),
            Mutation::UpdateConfig { id, partial } => collection.update_config(id, partial),
            Mutation::SetField { id, path, value } => Self::apply_set_field(collection, id, path, value),
            Mutation::EditList { id, path, edit } => {
                Self::apply_edit_list(collection, catalog, ids, id, path, edit)
            }
            Mutation::SetCta { id, at, cta } => Self::apply_set_cta(collection, id, at.as_ref(), cta),
        };

        Ok(match (changed, self.target_id()) {
            (true, Some(id)) => MutationOutcome::Applied { id: id.to_string() },
            _ => MutationOutcome::NoOp,
        })
    }

    fn apply_set_field(collection: &mut BlockCollection, id: &str, path: &ConfigPath, value: &Value) -> bool {
        let Some(block) = collection.get(id) else {
            return false;
        };

        if get_ref(&block.config, path) == Some(value) {
            return false;
        }

        let next = set(&block.config, path, value.clone());
        collection.replace_config(id, next)
    }

    fn apply_edit_list(
        collection: &mut BlockCollection,
        catalog: &Catalog,
        ids: &mut IdGenerator,
        id: &str,
        path: &ConfigPath,
        edit: &SubListOp,
    ) -> bool {
        let Some(block) = collection.get(id) else {
            return false;
        };

        let template = catalog
            .describe(block.block_type())
            .ok()
            .and_then(|descriptor| list_template(descriptor.fields, path));

        match edit_list(&block.config, path, edit, ids, template) {
            Some(next) => collection.replace_config(id, next),
            None => false,
        }
    }

    fn apply_set_cta(
        collection: &mut BlockCollection,
        id: &str,
        at: Option<&ConfigPath>,
        cta: &CtaTarget,
    ) -> bool {
        let Some(block) = collection.get(id) else {
            return false;
        };

        let next = match at {
            None => {
                let mut config = block.config.clone();
                cta.write_into(&mut config);
                config
            }
            Some(path) => {
                let mut group = match get_ref(&block.config, path) {
                    Some(Value::Object(map)) => map.clone(),
                    _ => ConfigMap::new(),
                };
                cta.write_into(&mut group);
                set(&block.config, path, Value::Object(group))
            }
        };

        collection.replace_config(id, next)
    }
}
