use pagekit_common::{ConfigMap, ANCHOR_PREFIX};
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// One widget on a page
///
/// Serialized as `{id, type, position, enabled, config}`. The type tag is
/// fixed at construction; changing the kind of a widget means removing it and
/// inserting a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    pub id: String,

    #[serde(rename = "type")]
    block_type: String,

    /// Sort key; dense `0..n` inside a [`crate::BlockCollection`]
    #[serde(default)]
    pub position: usize,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub config: ConfigMap,
}

impl BlockInstance {
    pub fn new(id: impl Into<String>, block_type: impl Into<String>, config: ConfigMap) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            position: 0,
            enabled: true,
            config,
        }
    }

    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    /// DOM id the rendered widget is exposed under
    pub fn anchor_id(&self) -> String {
        format!("{}{}", ANCHOR_PREFIX, self.id)
    }

    /// Copy with the same type and config under a new id
    pub(crate) fn duplicate_as(&self, id: String) -> Self {
        Self {
            id,
            block_type: self.block_type.clone(),
            position: self.position,
            enabled: self.enabled,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_fills_defaults() {
        let block: BlockInstance =
            serde_json::from_value(json!({ "id": "a", "type": "spacer" })).unwrap();

        assert_eq!(block.block_type(), "spacer");
        assert_eq!(block.position, 0);
        assert!(block.enabled);
        assert!(block.config.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut block = BlockInstance::new("a", "hero", ConfigMap::new());
        block.position = 3;

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({ "id": "a", "type": "hero", "position": 3, "enabled": true, "config": {} })
        );
    }

    #[test]
    fn test_anchor_id() {
        let block = BlockInstance::new("abc", "hero", ConfigMap::new());
        assert_eq!(block.anchor_id(), "widget-abc");
    }
}
