//! Parented block and item models.
//!
//! A parented model reuses the geometry of its parent (e.g.
//! `minecraft:block/cube_all`) and only overrides texture variables.

use crate::error::Result;
use crate::resource::{assets_dir, MinecraftResource};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Whether a model belongs in the `block` or the `item` models folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Block,
    Item,
}

impl ModelType {
    pub fn folder_name(&self) -> &'static str {
        match self {
            ModelType::Block => "block",
            ModelType::Item => "item",
        }
    }
}

/// A model that names a parent and optionally overrides its textures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentedModel {
    #[serde(skip)]
    model_type: ModelType,
    parent: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    textures: IndexMap<String, String>,
}

impl ParentedModel {
    pub fn new(model_type: ModelType, parent: impl Into<String>) -> Self {
        Self {
            model_type,
            parent: parent.into(),
            textures: IndexMap::new(),
        }
    }

    /// Create a block model.
    pub fn block(parent: impl Into<String>) -> Self {
        Self::new(ModelType::Block, parent)
    }

    /// Create an item model.
    pub fn item(parent: impl Into<String>) -> Self {
        Self::new(ModelType::Item, parent)
    }

    /// Override a texture variable. Setting the same key twice keeps the
    /// last texture.
    pub fn texture(mut self, key: impl Into<String>, texture: impl Into<String>) -> Self {
        self.textures.insert(key.into(), texture.into());
        self
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    pub fn parent(&self) -> &str {
        &self.parent
    }

    pub fn generate(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl MinecraftResource for ParentedModel {
    fn generate(&self) -> Result<Value> {
        ParentedModel::generate(self)
    }

    fn output_directory(&self, base_dir: &Path, namespace: &str) -> PathBuf {
        assets_dir(base_dir, namespace, "models").join(self.model_type.folder_name())
    }
}
