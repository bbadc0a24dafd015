use std::collections::BTreeMap;
use std::fs;

use crate::config::Config;
use crate::core::note::collect_notes;
use crate::core::paths::DataPaths;
use crate::core::tag::{normalize_name, Tag};
use crate::error::{VaultError, VaultResult};

/// In-memory, alias-transparent view over all tags.
///
/// Two maps keep ownership unambiguous: `tags` maps a canonical normalized
/// name to the tag it owns, `aliases` maps a normalized alias to its
/// canonical key and never owns anything. Every key is unique across both
/// maps. BTree maps give a stable iteration order within a run.
///
/// The index is ephemeral: rebuilt from disk by [`TagIndex::load_all`] and
/// never itself persisted; the tags it references are saved individually.
#[derive(Debug, Default)]
pub struct TagIndex {
    tags: BTreeMap<String, Tag>,
    aliases: BTreeMap<String, String>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every tag file in the tags directory, registering each tag's
    /// canonical name and then its aliases. The first duplicate key aborts
    /// the whole load; no partially built index is returned.
    pub fn load_all(paths: &DataPaths) -> VaultResult<Self> {
        let mut index = Self::new();
        let mut files = Vec::new();
        for entry in fs::read_dir(&paths.tags)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        for path in files {
            let tag = Tag::load(&path)?;
            let name = tag.name.clone();
            let aliases = tag.aliases.clone();
            index.add(&name, tag)?;
            for alias in &aliases {
                index.add_alias(alias, &name)?;
            }
        }
        Ok(index)
    }

    /// Register `tag` under `normalize(name)` as a canonical entry.
    /// Fails with `DuplicateKey` if the key is already taken anywhere in
    /// the index, leaving the existing mapping untouched.
    pub fn add(&mut self, name: &str, tag: Tag) -> VaultResult<()> {
        let key = normalize_name(name);
        if self.occupied(&key) {
            return Err(VaultError::DuplicateKey(key));
        }
        self.tags.insert(key, tag);
        Ok(())
    }

    /// Register `alias` as a redirect to the tag owning
    /// `normalize(canonical)`.
    pub fn add_alias(&mut self, alias: &str, canonical: &str) -> VaultResult<()> {
        let key = normalize_name(alias);
        if self.occupied(&key) {
            return Err(VaultError::DuplicateKey(key));
        }
        self.aliases.insert(key, normalize_name(canonical));
        Ok(())
    }

    fn occupied(&self, key: &str) -> bool {
        self.tags.contains_key(key) || self.aliases.contains_key(key)
    }

    /// Look up a tag by canonical name or alias. `None` when absent.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        let key = normalize_name(name);
        if let Some(tag) = self.tags.get(&key) {
            return Some(tag);
        }
        self.aliases.get(&key).and_then(|k| self.tags.get(k))
    }

    /// Canonical key a name resolves to, through at most one alias hop.
    fn resolve_key(&self, name: &str) -> Option<String> {
        let key = normalize_name(name);
        if self.tags.contains_key(&key) {
            return Some(key);
        }
        self.aliases.get(&key).cloned()
    }

    /// File a note under a tag, creating and registering the tag on first
    /// reference, and persist that one tag. Inserting an already-present
    /// note ID is a no-op. This is the primary write path when a note is
    /// tagged.
    pub fn add_note_tag(
        &mut self,
        name: &str,
        note_id: &str,
        paths: &DataPaths,
        config: &Config,
    ) -> VaultResult<()> {
        let key = match self.resolve_key(name) {
            Some(key) => key,
            None => {
                self.add(name, Tag::new(name))?;
                normalize_name(name)
            }
        };
        if let Some(tag) = self.tags.get_mut(&key) {
            tag.notes.insert(note_id.to_string());
            tag.save(paths, config)?;
        }
        Ok(())
    }

    /// Rebuild every notes set from ground truth, the note corpus.
    ///
    /// Clears each canonical tag exactly once (alias entries are redirects,
    /// so they are skipped structurally), then rescans the notes directory,
    /// creating tags for unseen names. Mutates only the in-memory index;
    /// callers invoke [`TagIndex::save_all`] to persist. Running twice over
    /// an unchanged notes directory yields identical membership.
    pub fn reindex(&mut self, paths: &DataPaths, config: &Config) -> VaultResult<()> {
        for tag in self.tags.values_mut() {
            tag.notes.clear();
        }

        for note in collect_notes(paths, config)? {
            for name in &note.meta.tags {
                let key = match self.resolve_key(name) {
                    Some(key) => key,
                    None => {
                        self.add(name, Tag::new(name.clone()))?;
                        normalize_name(name)
                    }
                };
                if let Some(tag) = self.tags.get_mut(&key) {
                    tag.notes.insert(note.meta.id.clone());
                }
            }
        }
        Ok(())
    }

    /// Write every canonical tag exactly once; a tag reachable under
    /// several alias keys is still only written through its owner entry.
    pub fn save_all(&self, paths: &DataPaths, config: &Config) -> VaultResult<()> {
        for tag in self.tags.values() {
            tag.save(paths, config)?;
        }
        Ok(())
    }

    /// Iterate the canonical tags in normalized-name order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    /// Number of canonical tags (aliases not counted).
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
