//! The trait shared by everything the generator can write out.

use crate::error::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A resource that can be turned into a JSON file inside a pack.
pub trait MinecraftResource {
    /// Build the JSON tree for this resource.
    fn generate(&self) -> Result<Value>;

    /// Directory the resource is written to by default, relative to the
    /// pack's base directory. The file name is chosen by the caller.
    fn output_directory(&self, base_dir: &Path, namespace: &str) -> PathBuf;
}

impl<R: MinecraftResource + ?Sized> MinecraftResource for Box<R> {
    fn generate(&self) -> Result<Value> {
        (**self).generate()
    }

    fn output_directory(&self, base_dir: &Path, namespace: &str) -> PathBuf {
        (**self).output_directory(base_dir, namespace)
    }
}

/// Resolve `assets/<namespace>/<kind>` under `base_dir`.
pub(crate) fn assets_dir(base_dir: &Path, namespace: &str, kind: &str) -> PathBuf {
    base_dir.join("assets").join(namespace).join(kind)
}
