use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::paths::DataPaths;
use crate::error::{VaultError, VaultResult};

/// A tag, stored as one YAML file per tag in the tags directory.
///
/// Tags are case-insensitive in practice: lookups go through the
/// normalized name, while `name` preserves how the tag is displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Canonical, human-facing name. Case is preserved on output.
    pub name: String,

    /// Short human-readable description. Tags are created on the fly, so
    /// most start out without one.
    pub description: Option<String>,

    /// Icon glyph used to represent the tag.
    pub icon: Option<String>,

    /// A virtual tag cannot be directly assigned to notes; it exists for
    /// more abstract concepts up the hierarchy.
    pub is_virtual: bool,

    /// Alternative names resolving to this tag.
    pub aliases: Vec<String>,

    /// Display names of tags considered broader concepts. Not
    /// cycle-checked.
    pub parents: BTreeSet<String>,

    /// Related tag display name -> free-text description of the relation.
    pub relations: BTreeMap<String, String>,

    /// IDs of notes directly carrying this tag. Direct tagging only; never
    /// the transitive closure through parents or aliases.
    pub notes: BTreeSet<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RelationDoc {
    name: String,
    description: String,
}

/// Wire form of [`Tag`]. `name` and `notes` are always emitted; everything
/// else only when non-default. Parents are persisted as display names
/// only; normalized forms are recomputed on load.
#[derive(Debug, Serialize, Deserialize)]
struct TagDoc {
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default, rename = "virtual", skip_serializing_if = "is_false")]
    is_virtual: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    parents: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    relations: Vec<RelationDoc>,
    #[serde(default)]
    notes: Vec<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Normalize a tag name for use as an index or storage key: lowercase,
/// spaces to hyphens, nothing else. Idempotent.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

impl Tag {
    /// Create a tag with the given display name and an empty notes set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            icon: None,
            is_virtual: false,
            aliases: Vec::new(),
            parents: BTreeSet::new(),
            relations: BTreeMap::new(),
            notes: BTreeSet::new(),
        }
    }

    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Filename for this tag: `<normalized-name>.<extension>`.
    pub fn gen_file_name(&self, config: &Config) -> String {
        format!("{}.{}", self.normalized_name(), config.tags.extension)
    }

    /// Read a tag file. An absent or empty `name` field is a hard error,
    /// never a zeroed tag.
    pub fn load(path: &Path) -> VaultResult<Self> {
        let text = fs::read_to_string(path)?;
        let doc: TagDoc = serde_yaml::from_str(&text)?;
        if doc.name.is_empty() {
            return Err(VaultError::MissingTagName(path.to_path_buf()));
        }
        Ok(Self {
            name: doc.name,
            description: doc.description,
            icon: doc.icon,
            is_virtual: doc.is_virtual,
            aliases: doc.aliases,
            parents: doc.parents.into_iter().collect(),
            relations: doc
                .relations
                .into_iter()
                .map(|r| (r.name, r.description))
                .collect(),
            notes: doc.notes.into_iter().collect(),
        })
    }

    pub fn serialize(&self) -> VaultResult<String> {
        let doc = TagDoc {
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            is_virtual: self.is_virtual,
            aliases: self.aliases.clone(),
            parents: self.parents.iter().cloned().collect(),
            relations: self
                .relations
                .iter()
                .map(|(name, description)| RelationDoc {
                    name: name.clone(),
                    description: description.clone(),
                })
                .collect(),
            notes: self.notes.iter().cloned().collect(),
        };
        Ok(serde_yaml::to_string(&doc)?)
    }

    /// Write the tag into the tags directory under its generated filename,
    /// overwriting unconditionally.
    pub fn save(&self, paths: &DataPaths, config: &Config) -> VaultResult<()> {
        let path = paths.tags.join(self.gen_file_name(config));
        fs::write(path, self.serialize()?)?;
        Ok(())
    }
}
