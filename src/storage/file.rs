use super::Defaults;
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Stores each key as a file inside one directory.
#[derive(Debug, Clone)]
pub struct FileDefaults {
    dir: PathBuf,
}

impl FileDefaults {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            bail!("Invalid defaults key: {key:?}");
        }
        Ok(self.dir.join(key))
    }
}

impl Defaults for FileDefaults {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.key_path(key)?;

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

        Ok(())
    }
}
