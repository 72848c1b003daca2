//! Schema file loader.
//!
//! Declarative schemas live one per file at `<dir>/type_<tag>.json` and
//! are loaded into the registry at startup. Predicates cannot be
//! expressed in files; loaded schemas carry fields and protocol only.

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{RegistryError, RegistryResult};
use super::registry::SchemaRegistry;
use super::types::SchemaDef;

/// Loads declarative schema files from a directory.
pub struct SchemaFileLoader {
    schema_dir: PathBuf,
}

impl SchemaFileLoader {
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Load every `.json` file in the directory into the registry.
    ///
    /// Returns the number of schemas loaded. A missing directory is not
    /// an error (there is simply nothing to load); a malformed file is.
    pub fn load_all(&self, registry: &SchemaRegistry) -> RegistryResult<usize> {
        if !self.schema_dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| RegistryError::MalformedFile {
            path: self.schema_dir.display().to_string(),
            reason: format!("failed to read schema directory: {}", e),
        })?;

        let mut loaded = 0;
        for entry in entries {
            let entry = entry.map_err(|e| RegistryError::MalformedFile {
                path: self.schema_dir.display().to_string(),
                reason: format!("failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            self.load_file(registry, &path)?;
            loaded += 1;
        }

        Ok(loaded)
    }

    fn load_file(&self, registry: &SchemaRegistry, path: &Path) -> RegistryResult<()> {
        let content = fs::read_to_string(path).map_err(|e| RegistryError::MalformedFile {
            path: path.display().to_string(),
            reason: format!("failed to read file: {}", e),
        })?;

        let def: SchemaDef =
            serde_json::from_str(&content).map_err(|e| RegistryError::MalformedFile {
                path: path.display().to_string(),
                reason: format!("invalid JSON: {}", e),
            })?;

        registry.register(def.into())
    }

    /// Write a schema definition to its standard location.
    pub fn save(&self, def: &SchemaDef) -> RegistryResult<PathBuf> {
        let path = self.schema_dir.join(format!("type_{}.json", def.type_tag));

        if !self.schema_dir.exists() {
            fs::create_dir_all(&self.schema_dir).map_err(|e| RegistryError::MalformedFile {
                path: self.schema_dir.display().to_string(),
                reason: format!("failed to create schema directory: {}", e),
            })?;
        }

        let content =
            serde_json::to_string_pretty(def).map_err(|e| RegistryError::MalformedFile {
                path: path.display().to_string(),
                reason: format!("failed to serialize schema: {}", e),
            })?;

        fs::write(&path, content).map_err(|e| RegistryError::MalformedFile {
            path: path.display().to_string(),
            reason: format!("failed to write file: {}", e),
        })?;

        Ok(path)
    }
}
