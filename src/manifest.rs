//! JSON manifests describing a whole pack.
//!
//! A manifest lists the block states, models and flattened files of one
//! namespace so a pack can be generated without writing Rust:
//!
//! ```json
//! {
//!   "namespace": "mymod",
//!   "blockstates": {
//!     "pillar": { "variants": { "axis=y": { "model": "mymod:block/pillar" } } },
//!     "fence": {
//!       "multipart": [
//!         { "apply": { "model": "mymod:block/fence_post" } },
//!         { "when": "north=true", "apply": { "model": "mymod:block/fence_side", "uvlock": true } }
//!       ]
//!     }
//!   },
//!   "models": { "pillar": { "type": "block", "parent": "minecraft:block/cube_column" } },
//!   "lang": { "en_us": { "source": "lang/en_us.json" } }
//! }
//! ```

use crate::blockstate::{BlockState, Condition, ModelChoice, MultipartBlockState, VariantBlockState};
use crate::error::{DatagenError, Result};
use crate::generator::{FileSaver, ResourceGenerator};
use crate::lang::{FlattenedJson, DEFAULT_FOLDER, DEFAULT_SEPARATOR};
use crate::model::{ModelType, ParentedModel};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The parsed manifest file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Namespace the resources are generated under (e.g. "mymod").
    #[serde(default)]
    pub namespace: String,

    /// Block states by block id.
    #[serde(default)]
    pub blockstates: IndexMap<String, BlockStateEntry>,

    /// Parented models by model name.
    #[serde(default)]
    pub models: IndexMap<String, ModelEntry>,

    /// Flattened JSON files by output file name.
    #[serde(default)]
    pub lang: IndexMap<String, LangEntry>,
}

/// A block state in either the variant or the multipart form.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockStateEntry {
    #[serde(default)]
    pub variants: Option<IndexMap<String, ModelChoice>>,
    #[serde(default)]
    pub multipart: Option<Vec<RuleEntry>>,
}

/// One multipart rule. At most one of the `when*` fields may be set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub when_all: Option<Vec<String>>,
    #[serde(default)]
    pub when_any: Option<Vec<String>>,
    pub apply: ModelChoice,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    #[serde(rename = "type", default = "default_model_type")]
    pub model_type: ModelType,
    pub parent: String,
    #[serde(default)]
    pub textures: IndexMap<String, String>,
}

fn default_model_type() -> ModelType {
    ModelType::Block
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LangEntry {
    /// Nested JSON source, relative to the manifest's directory.
    pub source: PathBuf,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_folder")]
    pub folder: String,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_location() -> String {
    "lang".to_string()
}

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a manifest file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading manifest {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Total number of resources the manifest describes.
    pub fn resource_count(&self) -> usize {
        self.blockstates.len() + self.models.len() + self.lang.len()
    }

    /// Register every resource with an existing generator: block states
    /// first, then models, then flattened files. `source_root` is the
    /// directory relative `lang` sources are resolved against.
    pub fn register<S: FileSaver>(
        &self,
        generator: &mut ResourceGenerator<S>,
        source_root: &Path,
    ) -> Result<()> {
        for (name, entry) in &self.blockstates {
            generator.add(name.clone(), entry.build(name)?);
        }

        for (name, entry) in &self.models {
            generator.add(name.clone(), entry.build());
        }

        for (name, entry) in &self.lang {
            generator.add(name.clone(), entry.load(source_root)?);
        }

        Ok(())
    }

    /// Build a filesystem generator for this manifest.
    pub fn into_generator(
        self,
        base_directory: impl Into<PathBuf>,
        source_root: &Path,
    ) -> Result<ResourceGenerator> {
        if self.namespace.is_empty() {
            return Err(DatagenError::InvalidManifest(
                "namespace is missing".to_string(),
            ));
        }

        let mut generator = ResourceGenerator::new(self.namespace.clone(), base_directory);
        self.register(&mut generator, source_root)?;
        Ok(generator)
    }
}

impl BlockStateEntry {
    /// Build the block state described by this entry.
    pub fn build(&self, name: &str) -> Result<BlockState> {
        match (&self.variants, &self.multipart) {
            (Some(variants), None) => {
                let state = variants
                    .iter()
                    .fold(VariantBlockState::new(), |state, (selector, models)| {
                        state.variant(selector.clone(), models.clone())
                    });
                Ok(state.into())
            }
            (None, Some(rules)) => {
                let mut state = MultipartBlockState::new();
                for rule in rules {
                    state = match rule.condition()? {
                        Some(condition) => state.apply_condition(rule.apply.clone(), condition),
                        None => state.apply(rule.apply.clone()),
                    };
                }
                Ok(state.into())
            }
            (Some(_), Some(_)) => Err(DatagenError::InvalidManifest(format!(
                "block state '{}' has both variants and multipart",
                name
            ))),
            (None, None) => Err(DatagenError::InvalidManifest(format!(
                "block state '{}' has neither variants nor multipart",
                name
            ))),
        }
    }
}

impl RuleEntry {
    /// The rule's condition, if any.
    pub fn condition(&self) -> Result<Option<Condition>> {
        match (&self.when, &self.when_all, &self.when_any) {
            (None, None, None) => Ok(None),
            (Some(text), None, None) => Condition::parse(text).map(Some),
            (None, Some(texts), None) => Condition::all(texts).map(Some),
            (None, None, Some(texts)) => Condition::any(texts).map(Some),
            _ => Err(DatagenError::InvalidManifest(
                "only one of when, when_all and when_any may be set".to_string(),
            )),
        }
    }
}

impl ModelEntry {
    pub fn build(&self) -> ParentedModel {
        self.textures
            .iter()
            .fold(
                ParentedModel::new(self.model_type, self.parent.clone()),
                |model, (key, texture)| model.texture(key.clone(), texture.clone()),
            )
    }
}

impl LangEntry {
    /// Load the source file, resolving relative paths against `source_root`.
    pub fn load(&self, source_root: &Path) -> Result<FlattenedJson> {
        let path = if self.source.is_absolute() {
            self.source.clone()
        } else {
            source_root.join(&self.source)
        };
        Ok(FlattenedJson::from_file(path, self.location.clone())?
            .with_folder(self.folder.clone())
            .with_separator(self.separator.clone()))
    }
}
