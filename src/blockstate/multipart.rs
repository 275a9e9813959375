//! Multipart block states: ordered, optionally conditional model layers.

use super::condition::Condition;
use super::model::ModelChoice;
use crate::error::{DatagenError, Result};
use crate::resource::{assets_dir, MinecraftResource};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// One entry of the `multipart` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartRule {
    /// Condition for when this rule applies. `None` means always.
    pub when: Option<Condition>,
    /// Model(s) to apply.
    pub apply: ModelChoice,
}

impl MultipartRule {
    fn to_json(&self, index: usize) -> Result<Value> {
        let mut object = Map::new();
        if let Some(when) = &self.when {
            object.insert("when".to_string(), when.to_json());
        }
        let apply = self.apply.to_json(|| format!("multipart rule {}", index))?;
        object.insert("apply".to_string(), apply);
        Ok(Value::Object(object))
    }
}

/// Builder for a `{"multipart": [...]}` block state.
///
/// Rules are written in exactly the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBlockState {
    rules: Vec<MultipartRule>,
}

impl MultipartBlockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the models unconditionally.
    pub fn apply(self, models: impl Into<ModelChoice>) -> Self {
        self.push(None, models.into())
    }

    /// Apply the models when the parsed condition holds. The predicate is
    /// used as-is, without an `AND`/`OR` wrapper.
    pub fn apply_when(self, models: impl Into<ModelChoice>, condition: &str) -> Result<Self> {
        let condition = Condition::parse(condition)?;
        Ok(self.push(Some(condition), models.into()))
    }

    /// Apply the models when every condition holds, wrapped in `AND`.
    pub fn apply_when_all<I, S>(self, models: impl Into<ModelChoice>, conditions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let condition = Condition::all(conditions)?;
        Ok(self.push(Some(condition), models.into()))
    }

    /// Apply the models when any condition holds, wrapped in `OR`.
    pub fn apply_when_any<I, S>(self, models: impl Into<ModelChoice>, conditions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let condition = Condition::any(conditions)?;
        Ok(self.push(Some(condition), models.into()))
    }

    /// Apply the models under an already built condition.
    pub fn apply_condition(self, models: impl Into<ModelChoice>, condition: Condition) -> Self {
        self.push(Some(condition), models.into())
    }

    fn push(mut self, when: Option<Condition>, apply: ModelChoice) -> Self {
        self.rules.push(MultipartRule { when, apply });
        self
    }

    pub fn rules(&self) -> &[MultipartRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Build the block state JSON.
    pub fn generate(&self) -> Result<Value> {
        if self.rules.is_empty() {
            return Err(DatagenError::EmptyState);
        }

        let rules = self
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| rule.to_json(index))
            .collect::<Result<Vec<_>>>()?;

        let mut root = Map::new();
        root.insert("multipart".to_string(), Value::Array(rules));
        Ok(Value::Object(root))
    }
}

impl MinecraftResource for MultipartBlockState {
    fn generate(&self) -> Result<Value> {
        MultipartBlockState::generate(self)
    }

    fn output_directory(&self, base_dir: &Path, namespace: &str) -> PathBuf {
        assets_dir(base_dir, namespace, "blockstates")
    }
}
