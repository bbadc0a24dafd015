//! Configuration for the zettel store.
//!
//! The whole configuration is decoded once at startup into a typed struct
//! tree and passed by reference into every operation. Every field carries a
//! default, so a missing file or a partial file degrades gracefully. Shape
//! mismatches are reported as [`VaultError::Config`], never panics.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

/// ID encoding options: output base, charset and padding.
///
/// `charset` is either one of the named presets (`StdEncoding`,
/// `HexEncoding` for base32, `URLEncoding` for base64) or a literal custom
/// charset of exactly 32/64 characters. It is validated where the ID is
/// encoded, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeConfig {
    #[serde(default = "default_encode_format")]
    pub format: String,
    #[serde(default = "default_encode_charset")]
    pub charset: String,
    #[serde(default)]
    pub padding: bool,
}

fn default_encode_format() -> String {
    "base32".to_string()
}

fn default_encode_charset() -> String {
    "StdEncoding".to_string()
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            format: default_encode_format(),
            charset: default_encode_charset(),
            padding: false,
        }
    }
}

/// Note ID generation options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdConfig {
    /// ID algorithm: `UUIDv4` or `UUIDv7`
    #[serde(rename = "type", default = "default_id_type")]
    pub id_type: String,
    #[serde(default)]
    pub encode: EncodeConfig,
}

fn default_id_type() -> String {
    "UUIDv4".to_string()
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            id_type: default_id_type(),
            encode: EncodeConfig::default(),
        }
    }
}

/// Timestamp rendering for note front matter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateConfig {
    /// Named preset (`RFC3339`, `RFC2822`, `DateOnly`, `DateTime`) or a
    /// chrono strftime pattern
    #[serde(default = "default_date_format")]
    pub format: String,
}

fn default_date_format() -> String {
    "RFC3339".to_string()
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            format: default_date_format(),
        }
    }
}

/// Front-matter metadata options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteMetadataConfig {
    #[serde(default)]
    pub id: IdConfig,
    #[serde(default)]
    pub date: DateConfig,
}

/// Optional filename prefixes, each separated by `.`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefixConfig {
    #[serde(default = "default_true")]
    pub date: bool,
    #[serde(default = "default_true")]
    pub time: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PrefixConfig {
    fn default() -> Self {
        Self {
            date: true,
            time: true,
        }
    }
}

/// Note filename scheme: `[date.][time.]<encoded-id>.<extension>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenamesConfig {
    #[serde(default)]
    pub prefix: PrefixConfig,
    #[serde(default = "default_note_extension")]
    pub extension: String,
}

fn default_note_extension() -> String {
    "md".to_string()
}

impl Default for FilenamesConfig {
    fn default() -> Self {
        Self {
            prefix: PrefixConfig::default(),
            extension: default_note_extension(),
        }
    }
}

/// Note-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotesConfig {
    #[serde(default)]
    pub metadata: NoteMetadataConfig,
    #[serde(default)]
    pub filenames: FilenamesConfig,
}

/// Tag-related configuration.
///
/// `extension` is the one canonical key for the tag file extension; the
/// historical `tags.metadata.extension` spelling is not recognised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsConfig {
    #[serde(default = "default_tag_extension")]
    pub extension: String,
}

fn default_tag_extension() -> String {
    "yaml".to_string()
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            extension: default_tag_extension(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Root directory for the note and tag stores. Defaults to
    /// `<platform data dir>/zettel`.
    #[serde(rename = "data-directory", default)]
    pub data_directory: Option<PathBuf>,
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub tags: TagsConfig,
}

impl Config {
    /// Decode a configuration file, layered over the defaults.
    pub fn from_file(path: &Path) -> VaultResult<Self> {
        let text = fs::read_to_string(path)?;
        serde_yaml::from_str(&text)
            .map_err(|e| VaultError::Config(format!("{}: {e}", path.display())))
    }

    /// Load configuration from `path` if given, otherwise from the default
    /// location if a file exists there, otherwise defaults.
    pub fn load(path: Option<&Path>) -> VaultResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match default_config_file() {
                Some(p) if p.is_file() => Self::from_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("zettel").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.notes.metadata.id.id_type, "UUIDv4");
        assert_eq!(config.notes.metadata.id.encode.format, "base32");
        assert_eq!(config.notes.metadata.id.encode.charset, "StdEncoding");
        assert!(!config.notes.metadata.id.encode.padding);
        assert_eq!(config.notes.metadata.date.format, "RFC3339");
        assert!(config.notes.filenames.prefix.date);
        assert!(config.notes.filenames.prefix.time);
        assert_eq!(config.notes.filenames.extension, "md");
        assert_eq!(config.tags.extension, "yaml");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "notes:\n  metadata:\n    id:\n      type: UUIDv7\ntags:\n  extension: tag.yaml\n"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.notes.metadata.id.id_type, "UUIDv7");
        assert_eq!(config.tags.extension, "tag.yaml");
        // untouched sections fall back to defaults
        assert_eq!(config.notes.metadata.id.encode.format, "base32");
        assert_eq!(config.notes.filenames.extension, "md");
    }

    #[test]
    fn mismatched_shape_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "notes: just-a-string\n").unwrap();

        match Config::from_file(file.path()) {
            Err(VaultError::Config(_)) => {}
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
