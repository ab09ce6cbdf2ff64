use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

pub fn get_clipstack_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".clipstack"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let dir = get_clipstack_dir()?;
    Ok(dir.join("config.toml"))
}

/// Directory backing the key-value defaults store.
pub fn get_defaults_dir() -> Result<PathBuf> {
    let dir = get_clipstack_dir()?;
    Ok(dir.join("defaults"))
}

pub fn ensure_directories_exist() -> Result<()> {
    let defaults_dir = get_defaults_dir()?;

    if !defaults_dir.exists() {
        fs::create_dir_all(&defaults_dir)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_clipstack_dir() {
        let dir = get_clipstack_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".clipstack"));
    }

    #[test]
    fn test_get_config_path() {
        let path = get_config_path().unwrap();
        assert!(path.to_string_lossy().contains(".clipstack"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_get_defaults_dir() {
        let dir = get_defaults_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".clipstack"));
        assert!(dir.to_string_lossy().ends_with("defaults"));
    }
}
