//! Writing resources out as files.
//!
//! A [`ResourceGenerator`] holds named resources and writes each one to
//! `<output_directory>/<name>.json`. How text is produced and where it ends
//! up are pluggable through [`JsonFormatter`] and [`FileSaver`].

use crate::error::Result;
use crate::resource::MinecraftResource;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Converts a generated JSON tree to text.
pub trait JsonFormatter {
    fn format(&self, json: &Value) -> Result<String>;
}

/// Two-space indented JSON with a trailing newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyJsonFormatter;

impl JsonFormatter for PrettyJsonFormatter {
    fn format(&self, json: &Value) -> Result<String> {
        let mut text = serde_json::to_string_pretty(json)?;
        text.push('\n');
        Ok(text)
    }
}

/// Single-line JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactJsonFormatter;

impl JsonFormatter for CompactJsonFormatter {
    fn format(&self, json: &Value) -> Result<String> {
        Ok(serde_json::to_string(json)?)
    }
}

/// Destination for generated files.
pub trait FileSaver {
    /// Runs once before any file is saved.
    fn prepare(&mut self, base_dir: &Path) -> Result<()>;

    /// Write `content` to `path`.
    fn save(&mut self, path: &Path, content: &str) -> Result<()>;

    /// Runs once after all files have been saved.
    fn finish(&mut self, _base_dir: &Path) -> Result<()> {
        Ok(())
    }
}

/// Writes files to disk, creating directories as needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemFileSaver;

impl FileSaver for FilesystemFileSaver {
    fn prepare(&mut self, base_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(base_dir)?;
        Ok(())
    }

    fn save(&mut self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Keeps saved files in memory, in the order they were written.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSaver {
    pub files: Vec<(PathBuf, String)>,
    pub prepared: bool,
    pub finished: bool,
}

impl MemoryFileSaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content saved at `path`, if any.
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files
            .iter()
            .rev()
            .find(|(saved, _)| saved == path)
            .map(|(_, content)| content.as_str())
    }
}

impl FileSaver for MemoryFileSaver {
    fn prepare(&mut self, _base_dir: &Path) -> Result<()> {
        self.prepared = true;
        Ok(())
    }

    fn save(&mut self, path: &Path, content: &str) -> Result<()> {
        self.files.push((path.to_path_buf(), content.to_string()));
        Ok(())
    }

    fn finish(&mut self, _base_dir: &Path) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// A resource together with the file name it is written under.
pub struct GeneratorEntry {
    pub name: String,
    pub resource: Box<dyn MinecraftResource>,
}

impl GeneratorEntry {
    pub fn new(name: impl Into<String>, resource: impl MinecraftResource + 'static) -> Self {
        Self {
            name: name.into(),
            resource: Box::new(resource),
        }
    }
}

impl std::fmt::Debug for GeneratorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Generates every registered resource for one namespace.
pub struct ResourceGenerator<S: FileSaver = FilesystemFileSaver> {
    namespace: String,
    base_directory: PathBuf,
    file_saver: S,
    formatter: Box<dyn JsonFormatter>,
    entries: Vec<GeneratorEntry>,
}

impl ResourceGenerator<FilesystemFileSaver> {
    /// Create a generator that writes pretty-printed files to disk.
    pub fn new(namespace: impl Into<String>, base_directory: impl Into<PathBuf>) -> Self {
        Self::with_strategies(
            namespace,
            base_directory,
            FilesystemFileSaver,
            PrettyJsonFormatter,
        )
    }
}

impl<S: FileSaver> ResourceGenerator<S> {
    pub fn with_strategies(
        namespace: impl Into<String>,
        base_directory: impl Into<PathBuf>,
        file_saver: S,
        formatter: impl JsonFormatter + 'static,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            base_directory: base_directory.into(),
            file_saver,
            formatter: Box::new(formatter),
            entries: Vec::new(),
        }
    }

    /// Replace the JSON formatter.
    pub fn with_formatter(mut self, formatter: impl JsonFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Register a resource under `name`; it is written to `<name>.json`.
    pub fn add(&mut self, name: impl Into<String>, resource: impl MinecraftResource + 'static) {
        self.entries.push(GeneratorEntry::new(name, resource));
    }

    /// Register several prepared entries.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = GeneratorEntry>) {
        self.entries.extend(entries);
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn entries(&self) -> &[GeneratorEntry] {
        &self.entries
    }

    pub fn file_saver(&self) -> &S {
        &self.file_saver
    }

    /// Path a resource named `name` will be written to.
    pub fn output_path(&self, name: &str, resource: &dyn MinecraftResource) -> PathBuf {
        resource
            .output_directory(&self.base_directory, &self.namespace)
            .join(format!("{}.json", name))
    }

    /// Generate and save every resource, in registration order.
    ///
    /// Stops at the first failing resource. Returns the number of files
    /// written.
    pub fn generate(&mut self) -> Result<usize> {
        info!(
            "Generating {} resources for namespace '{}' into {:?}",
            self.entries.len(),
            self.namespace,
            self.base_directory
        );

        self.file_saver.prepare(&self.base_directory)?;

        for entry in &self.entries {
            let path = self.output_path(&entry.name, entry.resource.as_ref());
            let json = entry.resource.generate()?;
            let content = self.formatter.format(&json)?;
            debug!("Saving {} ({} bytes) to {:?}", entry.name, content.len(), path);
            self.file_saver.save(&path, &content)?;
        }

        self.file_saver.finish(&self.base_directory)?;

        info!("Generated {} files", self.entries.len());
        Ok(self.entries.len())
    }
}
