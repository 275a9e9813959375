//! Variant block states: property selectors mapped to models.

use super::model::ModelChoice;
use crate::error::{DatagenError, Result};
use crate::resource::{assets_dir, MinecraftResource};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Builder for a `{"variants": {...}}` block state.
///
/// Selectors are written in the order they were first added. Adding a
/// selector again replaces its models in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantBlockState {
    variants: IndexMap<String, ModelChoice>,
}

impl VariantBlockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a selector (e.g. `"facing=north"`, or `""` for a block without
    /// properties) to one model or a weighted list of models.
    pub fn variant(mut self, selector: impl Into<String>, models: impl Into<ModelChoice>) -> Self {
        self.variants.insert(selector.into(), models.into());
        self
    }

    pub fn get(&self, selector: &str) -> Option<&ModelChoice> {
        self.variants.get(selector)
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Build the block state JSON.
    pub fn generate(&self) -> Result<Value> {
        if self.variants.is_empty() {
            return Err(DatagenError::EmptyState);
        }

        let mut variants = Map::new();
        for (selector, models) in &self.variants {
            let value = models.to_json(|| format!("variant '{}'", selector))?;
            variants.insert(selector.clone(), value);
        }

        let mut root = Map::new();
        root.insert("variants".to_string(), Value::Object(variants));
        Ok(Value::Object(root))
    }
}

impl MinecraftResource for VariantBlockState {
    fn generate(&self) -> Result<Value> {
        VariantBlockState::generate(self)
    }

    fn output_directory(&self, base_dir: &Path, namespace: &str) -> PathBuf {
        assets_dir(base_dir, namespace, "blockstates")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockstate::BlockStateModel;
    use serde_json::json;

    #[test]
    fn test_no_variants_is_an_error() {
        assert!(matches!(
            VariantBlockState::new().generate(),
            Err(DatagenError::EmptyState)
        ));
    }

    #[test]
    fn test_one_variant_one_model() {
        assert_eq!(
            VariantBlockState::new().variant("", "model1").generate().unwrap(),
            json!({ "variants": { "": { "model": "model1" } } })
        );
    }

    #[test]
    fn test_one_variant_multiple_models() {
        let model1 = BlockStateModel::new("model1");
        let model2 = BlockStateModel::new("model2");
        assert_eq!(
            VariantBlockState::new()
                .variant("", [&model1, &model2])
                .generate()
                .unwrap(),
            json!({
                "variants": {
                    "": [
                        { "model": "model1", "weight": 1 },
                        { "model": "model2", "weight": 1 }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_multiple_variants_keep_insertion_order() {
        let state = VariantBlockState::new()
            .variant("type=2", BlockStateModel::new("model2").with_y(90))
            .variant("type=1", "model1");

        let value = state.generate().unwrap();
        assert_eq!(
            value,
            json!({
                "variants": {
                    "type=2": { "model": "model2", "y": 90 },
                    "type=1": { "model": "model1" }
                }
            })
        );
        let keys: Vec<_> = value["variants"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["type=2", "type=1"]);
    }

    #[test]
    fn test_repeated_selector_replaces_models() {
        let state = VariantBlockState::new()
            .variant("a=1", "first")
            .variant("a=2", "second")
            .variant("a=1", "replaced");

        assert_eq!(state.len(), 2);
        assert_eq!(state.selectors().collect::<Vec<_>>(), vec!["a=1", "a=2"]);
        assert_eq!(
            state.get("a=1"),
            Some(&ModelChoice::from("replaced"))
        );
    }

    #[test]
    fn test_generate_is_repeatable() {
        let state = VariantBlockState::new().variant("", "model1");
        assert_eq!(state.generate().unwrap(), state.generate().unwrap());
    }

    #[test]
    fn test_later_mutation_of_source_model_is_not_visible() {
        let mut model = BlockStateModel::new("model1");
        let state = VariantBlockState::new().variant("", &model);
        model.model = "changed".to_string();

        assert_eq!(
            state.generate().unwrap(),
            json!({ "variants": { "": { "model": "model1" } } })
        );
    }

    #[test]
    fn test_empty_model_list_is_an_error() {
        let state = VariantBlockState::new().variant("facing=north", Vec::<BlockStateModel>::new());
        assert!(matches!(state.generate(), Err(DatagenError::NoModels(_))));
    }

    #[test]
    fn test_output_directory() {
        let dir = MinecraftResource::output_directory(
            &VariantBlockState::new(),
            Path::new("out"),
            "mymod",
        );
        assert_eq!(dir, Path::new("out/assets/mymod/blockstates"));
    }
}
