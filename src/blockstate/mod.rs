//! Block state generation.
//!
//! Block states map block properties to models. There are two formats:
//! "variants", where each property selector picks a model, and "multipart",
//! where independent rules each contribute a model layer.

pub mod condition;
pub mod model;
pub mod multipart;
pub mod variant;

pub use condition::Condition;
pub use model::{BlockStateModel, ModelChoice};
pub use multipart::{MultipartBlockState, MultipartRule};
pub use variant::VariantBlockState;

use crate::error::Result;
use crate::resource::MinecraftResource;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Either kind of block state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockState {
    Variants(VariantBlockState),
    Multipart(MultipartBlockState),
}

impl BlockState {
    /// Start an empty variant block state.
    pub fn variants() -> VariantBlockState {
        VariantBlockState::new()
    }

    /// Start an empty multipart block state.
    pub fn multipart() -> MultipartBlockState {
        MultipartBlockState::new()
    }

    pub fn generate(&self) -> Result<Value> {
        match self {
            BlockState::Variants(state) => state.generate(),
            BlockState::Multipart(state) => state.generate(),
        }
    }
}

impl From<VariantBlockState> for BlockState {
    fn from(state: VariantBlockState) -> Self {
        BlockState::Variants(state)
    }
}

impl From<MultipartBlockState> for BlockState {
    fn from(state: MultipartBlockState) -> Self {
        BlockState::Multipart(state)
    }
}

impl MinecraftResource for BlockState {
    fn generate(&self) -> Result<Value> {
        BlockState::generate(self)
    }

    fn output_directory(&self, base_dir: &Path, namespace: &str) -> PathBuf {
        match self {
            BlockState::Variants(state) => state.output_directory(base_dir, namespace),
            BlockState::Multipart(state) => state.output_directory(base_dir, namespace),
        }
    }
}
