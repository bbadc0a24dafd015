use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::core::meta::Meta;
use crate::core::paths::DataPaths;
use crate::error::{VaultError, VaultResult};

/// Byte sequence separating the front matter from the body.
const META_END: &str = "\n...\n\n";

/// A single atomic note: YAML front matter plus a free-form body.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub meta: Meta,
    pub body: String,
}

impl Note {
    /// Create a new note with freshly generated metadata and the given
    /// initial body. Tags and body may be edited freely before `save`.
    pub fn new(body: impl Into<String>, config: &Config) -> VaultResult<Self> {
        Ok(Self {
            meta: Meta::new(config)?,
            body: body.into(),
        })
    }

    /// Render the on-disk form: `---`, front matter, `...`, a blank line,
    /// then the body verbatim.
    ///
    /// NOTE: the blank line after the end-of-document marker is mandatory;
    /// without it Markdown renderers fold the front matter into a level-1
    /// heading on the first body line.
    pub fn serialize(&self, config: &Config) -> VaultResult<String> {
        let mut out = String::from("---\n");
        out.push_str(&self.meta.to_yaml(config)?);
        out.push_str("...\n\n");
        out.push_str(&self.body);
        Ok(out)
    }

    /// Parse the on-disk form back into a note.
    pub fn deserialize(text: &str, config: &Config) -> VaultResult<Self> {
        let split = text
            .find(META_END)
            .ok_or_else(|| VaultError::malformed("missing front-matter end marker"))?;
        // keep the newline terminating the last front-matter line
        let head = &text[..split + 1];
        let head = head.strip_prefix("---\n").unwrap_or(head);
        Ok(Self {
            meta: Meta::from_yaml(head, config)?,
            body: text[split + META_END.len()..].to_string(),
        })
    }

    pub fn load(path: &Path, config: &Config) -> VaultResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::deserialize(&text, config)
    }

    /// Write the note into the notes directory under its generated
    /// filename, overwriting unconditionally.
    pub fn save(&self, paths: &DataPaths, config: &Config) -> VaultResult<()> {
        let path = paths.notes.join(self.meta.gen_file_name(config));
        fs::write(path, self.serialize(config)?)?;
        Ok(())
    }
}

/// Load every regular file in the notes directory as a note, in filename
/// order. Fails on the first unreadable or undecodable file rather than
/// skipping it, so callers never operate on a partial corpus.
pub fn collect_notes(paths: &DataPaths, config: &Config) -> VaultResult<Vec<Note>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(&paths.notes)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    let mut notes = Vec::with_capacity(files.len());
    for path in files {
        notes.push(Note::load(&path, config)?);
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixed_note(config: &Config) -> Note {
        let mut note = Note::new("Body text\n", config).unwrap();
        note.meta.created = Utc.with_ymd_and_hms(2024, 5, 13, 1, 2, 3).unwrap();
        note
    }

    #[test]
    fn serialized_form_has_blank_line_after_marker() {
        let config = Config::default();
        let text = fixed_note(&config).serialize(&config).unwrap();
        assert!(text.starts_with("---\n"));
        assert!(text.contains("\n...\n\nBody text\n"));
    }

    #[test]
    fn deserialize_scenario() {
        let config = Config::default();
        let text = "---\nid: \"123456789\"\ntags:\n  - Foo\n  - Bar\ncreated: 2024-05-13T01:02:03Z\n...\n\nBody text";
        let note = Note::deserialize(text, &config).unwrap();
        assert_eq!(note.meta.id, "123456789");
        assert_eq!(note.meta.tags, vec!["Foo", "Bar"]);
        assert_eq!(note.body, "Body text");
    }

    #[test]
    fn deserialize_requires_end_marker() {
        let config = Config::default();
        let text = "---\nid: \"123456789\"\ncreated: 2024-05-13T01:02:03Z\n\nBody text";
        assert!(matches!(
            Note::deserialize(text, &config),
            Err(VaultError::MalformedNoteFile(_))
        ));
    }

    #[test]
    fn round_trip() {
        let config = Config::default();
        let mut note = fixed_note(&config);
        note.meta.tags = vec!["Foo".to_string(), "Bar".to_string()];
        note.meta.title = Some("Test Note".to_string());
        note.body = "A Test Note\n===========\n\nWith several\n\nparagraphs.\n".to_string();

        let text = note.serialize(&config).unwrap();
        assert_eq!(Note::deserialize(&text, &config).unwrap(), note);
    }

    #[test]
    fn save_uses_generated_file_name() {
        let config = Config::default();
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::from_root(dir.path().to_path_buf()).unwrap();
        let note = fixed_note(&config);

        note.save(&paths, &config).unwrap();

        let expected = paths
            .notes
            .join(format!("2024-05-13.01-02.{}.md", note.meta.id));
        assert!(expected.is_file());
        let loaded = Note::load(&expected, &config).unwrap();
        assert_eq!(loaded, note);
    }

    #[test]
    fn collect_notes_fails_fast_on_garbage() {
        let config = Config::default();
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::from_root(dir.path().to_path_buf()).unwrap();
        fixed_note(&config).save(&paths, &config).unwrap();
        fs::write(paths.notes.join("junk.md"), "no front matter here").unwrap();

        assert!(collect_notes(&paths, &config).is_err());
    }

    #[test]
    fn collect_notes_returns_all() {
        let config = Config::default();
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::from_root(dir.path().to_path_buf()).unwrap();
        let a = fixed_note(&config);
        let b = fixed_note(&config);
        a.save(&paths, &config).unwrap();
        b.save(&paths, &config).unwrap();

        let notes = collect_notes(&paths, &config).unwrap();
        assert_eq!(notes.len(), 2);
    }
}
