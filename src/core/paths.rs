use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{VaultError, VaultResult};

/// Resolved store directories. Both `notes` and `tags` are guaranteed to
/// exist once a value of this type has been constructed through
/// [`DataPaths::resolve`] or [`DataPaths::from_root`].
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub root: PathBuf,
    pub notes: PathBuf,
    pub tags: PathBuf,
}

impl DataPaths {
    /// Resolve the store directories from configuration, creating them if
    /// absent.
    pub fn resolve(config: &Config) -> VaultResult<Self> {
        let root = match &config.data_directory {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .ok_or_else(|| VaultError::Config("no platform data directory".to_string()))?
                .join("zettel"),
        };
        Self::from_root(root)
    }

    /// Build the directory layout under an explicit root, creating the
    /// subdirectories if absent.
    pub fn from_root(root: PathBuf) -> VaultResult<Self> {
        let notes = root.join("notes");
        let tags = root.join("tags");
        fs::create_dir_all(&notes)?;
        fs::create_dir_all(&tags)?;
        Ok(Self { root, notes, tags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_root_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::from_root(dir.path().join("store")).unwrap();
        assert!(paths.notes.is_dir());
        assert!(paths.tags.is_dir());
        assert_eq!(paths.notes, dir.path().join("store").join("notes"));
        assert_eq!(paths.tags, dir.path().join("store").join("tags"));
    }

    #[test]
    fn resolve_honours_configured_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_directory: Some(dir.path().join("kb")),
            ..Config::default()
        };
        let paths = DataPaths::resolve(&config).unwrap();
        assert_eq!(paths.root, dir.path().join("kb"));
        assert!(paths.tags.is_dir());
    }
}
