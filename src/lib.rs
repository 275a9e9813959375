//! # Pack Datagen
//!
//! A Rust library for generating Minecraft resource pack and data pack JSON.
//!
//! ## Overview
//!
//! Resources (block states, parented models, flattened language files) are
//! described with small builders and turned into `serde_json::Value` trees.
//! A [`ResourceGenerator`] then formats each tree and writes it to the right
//! place in the pack.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pack_datagen::{BlockState, BlockStateModel, ParentedModel, ResourceGenerator};
//!
//! let mut generator = ResourceGenerator::new("mymod", "generated");
//!
//! // A block with one model per axis
//! generator.add(
//!     "pillar",
//!     BlockState::variants()
//!         .variant("axis=y", "mymod:block/pillar")
//!         .variant("axis=x", BlockStateModel::new("mymod:block/pillar").with_x(90).with_y(90)),
//! );
//!
//! // A fence built from independent parts
//! generator.add(
//!     "fence",
//!     BlockState::multipart()
//!         .apply("mymod:block/fence_post")
//!         .apply_when(BlockStateModel::new("mymod:block/fence_side").with_uvlock(true), "north=true")?
//!         .apply_when_any("mymod:block/fence_cap", ["north=false", "east=false"])?,
//! );
//!
//! generator.add("pillar", ParentedModel::block("minecraft:block/cube_column"));
//!
//! generator.generate()?;
//! ```

pub mod error;
pub mod resource;
pub mod blockstate;
pub mod model;
pub mod lang;
pub mod generator;
pub mod manifest;

// Re-export main types for convenience
pub use error::{DatagenError, Result};
pub use resource::MinecraftResource;
pub use blockstate::{
    BlockState, BlockStateModel, Condition, ModelChoice, MultipartBlockState, MultipartRule,
    VariantBlockState,
};
pub use model::{ModelType, ParentedModel};
pub use lang::{flatten, FlattenedJson};
pub use generator::{
    CompactJsonFormatter, FileSaver, FilesystemFileSaver, GeneratorEntry, JsonFormatter,
    MemoryFileSaver, PrettyJsonFormatter, ResourceGenerator,
};
pub use manifest::Manifest;
