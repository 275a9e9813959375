//! Model references used as the leaves of a block state.

use crate::error::{DatagenError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A reference to a block model, with optional rotation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockStateModel {
    /// Model resource location (e.g., "block/stone" or "mymod:block/pillar").
    pub model: String,
    /// X rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub x: i32,
    /// Y rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub y: i32,
    /// If true, UV coordinates don't rotate with the block.
    #[serde(default)]
    pub uvlock: bool,
    /// Weight for random selection (default 1).
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

/// Output form of a model reference; defaults are left out.
#[derive(Serialize)]
struct ModelJson<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "if_0")]
    x: i32,
    #[serde(skip_serializing_if = "if_0")]
    y: i32,
    #[serde(skip_serializing_if = "if_false")]
    uvlock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<u32>,
}

fn if_0(value: &i32) -> bool {
    *value == 0
}

fn if_false(value: &bool) -> bool {
    !*value
}

impl BlockStateModel {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            x: 0,
            y: 0,
            uvlock: false,
            weight: default_weight(),
        }
    }

    pub fn with_x(mut self, degrees: i32) -> Self {
        self.x = degrees;
        self
    }

    pub fn with_y(mut self, degrees: i32) -> Self {
        self.y = degrees;
        self
    }

    pub fn with_uvlock(mut self, uvlock: bool) -> Self {
        self.uvlock = uvlock;
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Build the JSON object for this reference.
    ///
    /// `x`, `y` and `uvlock` are only written when they differ from their
    /// defaults. `weight` is only written when `weighted` is set, which is the
    /// case for every entry of a multi-model list.
    pub fn to_json(&self, weighted: bool) -> Result<Value> {
        if self.model.is_empty() {
            return Err(DatagenError::EmptyModel);
        }

        let json = ModelJson {
            model: &self.model,
            x: self.x,
            y: self.y,
            uvlock: self.uvlock,
            weight: weighted.then_some(self.weight),
        };
        Ok(serde_json::to_value(json)?)
    }
}

impl From<&str> for BlockStateModel {
    fn from(model: &str) -> Self {
        Self::new(model)
    }
}

impl From<String> for BlockStateModel {
    fn from(model: String) -> Self {
        Self::new(model)
    }
}

impl From<&BlockStateModel> for BlockStateModel {
    fn from(model: &BlockStateModel) -> Self {
        model.clone()
    }
}

/// The models attached to one variant selector or multipart rule.
///
/// Serialized as a bare object for a single model and as an array of
/// weighted entries otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ModelChoice {
    Single(BlockStateModel),
    Weighted(Vec<BlockStateModel>),
}

impl ModelChoice {
    /// Build a choice from a list, collapsing one-element lists to `Single`.
    pub fn from_models(mut models: Vec<BlockStateModel>) -> Self {
        if models.len() == 1 {
            if let Some(model) = models.pop() {
                return ModelChoice::Single(model);
            }
        }
        ModelChoice::Weighted(models)
    }

    pub fn models(&self) -> &[BlockStateModel] {
        match self {
            ModelChoice::Single(model) => std::slice::from_ref(model),
            ModelChoice::Weighted(models) => models,
        }
    }

    /// Build the `apply`/variant value. `owner` names the selector or rule in
    /// the error raised for an empty list.
    pub fn to_json<F>(&self, owner: F) -> Result<Value>
    where
        F: FnOnce() -> String,
    {
        match self.models() {
            [] => Err(DatagenError::NoModels(owner())),
            [model] => model.to_json(false),
            models => models
                .iter()
                .map(|model| model.to_json(true))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
        }
    }
}

impl From<BlockStateModel> for ModelChoice {
    fn from(model: BlockStateModel) -> Self {
        ModelChoice::Single(model)
    }
}

impl From<&BlockStateModel> for ModelChoice {
    fn from(model: &BlockStateModel) -> Self {
        ModelChoice::Single(model.clone())
    }
}

impl From<&str> for ModelChoice {
    fn from(model: &str) -> Self {
        ModelChoice::Single(BlockStateModel::new(model))
    }
}

impl From<String> for ModelChoice {
    fn from(model: String) -> Self {
        ModelChoice::Single(BlockStateModel::new(model))
    }
}

impl<M: Into<BlockStateModel>> From<Vec<M>> for ModelChoice {
    fn from(models: Vec<M>) -> Self {
        Self::from_models(models.into_iter().map(Into::into).collect())
    }
}

impl<M: Into<BlockStateModel>, const N: usize> From<[M; N]> for ModelChoice {
    fn from(models: [M; N]) -> Self {
        Self::from_models(models.into_iter().map(Into::into).collect())
    }
}
