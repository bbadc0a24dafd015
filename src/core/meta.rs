use std::collections::BTreeMap;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::id;
use crate::error::{VaultError, VaultResult};

/// Metadata of a note, stored as the YAML front matter of the note file.
/// Kept separate from [`Note`](super::note::Note) for organisational
/// purposes; a Note holds it as a plain named field.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    /// Unique identifier, generated once when the note is created. The
    /// algorithm and text encoding come from the configuration.
    pub id: String,

    /// When the note was originally created. Immutable.
    pub created: DateTime<Utc>,

    /// Tag names this note is filed under. Order is preserved.
    pub tags: Vec<String>,

    /// When the note was last rewritten, if ever.
    pub modified: Option<DateTime<Utc>>,

    /// Secondary links: URLs, URNs, local paths, keyed by a short label.
    pub refs: Option<BTreeMap<String, String>>,

    /// Markup format of the body, when it cannot be inferred.
    pub format: Option<String>,

    /// Explicit title. Usually absent, as the body markup carries one.
    pub title: Option<String>,
}

/// Wire form of [`Meta`]. Optional keys are emitted only when set and
/// tolerated when absent.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct MetaDoc {
    id: String,
    created: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refs: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl Meta {
    /// Create a new Meta with a freshly generated ID and the current time.
    /// Encoding and ID-generation failures abort creation; no
    /// partially-initialised value is returned.
    pub fn new(config: &Config) -> VaultResult<Self> {
        Ok(Self {
            id: id::generate_encoded(&config.notes.metadata.id)?,
            created: Utc::now(),
            tags: Vec::new(),
            modified: None,
            refs: None,
            format: None,
            title: None,
        })
    }

    /// Generate the note's filename: `[date.][time.]<id>.<extension>`.
    /// Pure function of the Meta fields and configuration.
    pub fn gen_file_name(&self, config: &Config) -> String {
        let scheme = &config.notes.filenames;
        let mut name = String::new();
        if scheme.prefix.date {
            name.push_str(&self.created.format("%Y-%m-%d").to_string());
            name.push('.');
        }
        if scheme.prefix.time {
            name.push_str(&self.created.format("%H-%M").to_string());
            name.push('.');
        }
        name.push_str(&self.id);
        name.push('.');
        name.push_str(&scheme.extension);
        name
    }

    pub(crate) fn to_yaml(&self, config: &Config) -> VaultResult<String> {
        let date_format = &config.notes.metadata.date.format;
        let modified = match &self.modified {
            Some(t) => Some(format_timestamp(t, date_format)?),
            None => None,
        };
        let doc = MetaDoc {
            id: self.id.clone(),
            created: format_timestamp(&self.created, date_format)?,
            tags: self.tags.clone(),
            modified,
            refs: self.refs.clone(),
            format: self.format.clone(),
            title: self.title.clone(),
        };
        Ok(serde_yaml::to_string(&doc)?)
    }

    pub(crate) fn from_yaml(text: &str, config: &Config) -> VaultResult<Self> {
        let doc: MetaDoc = serde_yaml::from_str(text)?;
        if doc.id.is_empty() {
            return Err(VaultError::malformed("missing note id"));
        }
        let date_format = &config.notes.metadata.date.format;
        let modified = match doc.modified {
            Some(s) => Some(parse_timestamp(&s, date_format)?),
            None => None,
        };
        Ok(Self {
            id: doc.id,
            created: parse_timestamp(&doc.created, date_format)?,
            tags: doc.tags,
            modified,
            refs: doc.refs,
            format: doc.format,
            title: doc.title,
        })
    }
}

/// Render a timestamp per the configured format: a named preset or a
/// chrono strftime pattern. An unparseable pattern is a configuration
/// error, not a panic at display time.
fn format_timestamp(t: &DateTime<Utc>, format: &str) -> VaultResult<String> {
    match format {
        "RFC3339" => Ok(t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        "RFC2822" => Ok(t.to_rfc2822()),
        "DateOnly" => Ok(t.format("%Y-%m-%d").to_string()),
        "DateTime" => Ok(t.format("%Y-%m-%d %H:%M:%S").to_string()),
        pattern => {
            let items: Vec<Item> = StrftimeItems::new(pattern).collect();
            if items.iter().any(|i| matches!(i, Item::Error)) {
                return Err(VaultError::Config(format!("invalid date format: {pattern}")));
            }
            Ok(t.format_with_items(items.into_iter()).to_string())
        }
    }
}

fn parse_timestamp(text: &str, format: &str) -> VaultResult<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_rfc2822(text) {
        return Ok(t.with_timezone(&Utc));
    }
    let naive = match format {
        "DateOnly" => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
        "DateTime" => NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").ok(),
        pattern => NaiveDateTime::parse_from_str(text, pattern).ok(),
    };
    match naive {
        Some(n) => Ok(Utc.from_utc_datetime(&n)),
        None => Err(VaultError::malformed(format!(
            "unparseable timestamp: {text:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 13, 1, 2, 3).unwrap()
    }

    fn sample() -> Meta {
        Meta {
            id: "123456789".to_string(),
            created: fixed_created(),
            tags: vec!["Foo".to_string(), "Bar".to_string()],
            modified: None,
            refs: None,
            format: None,
            title: None,
        }
    }

    #[test]
    fn new_populates_id_and_created() {
        let meta = Meta::new(&Config::default()).unwrap();
        assert!(!meta.id.is_empty());
        assert!(meta.tags.is_empty());
        assert!(meta.title.is_none());
    }

    #[test]
    fn yaml_omits_absent_optionals() {
        let yaml = sample().to_yaml(&Config::default()).unwrap();
        assert!(yaml.contains("id: '123456789'"));
        assert!(yaml.contains("created: 2024-05-13T01:02:03Z"));
        assert!(!yaml.contains("modified"));
        assert!(!yaml.contains("refs"));
        assert!(!yaml.contains("title"));
    }

    #[test]
    fn yaml_round_trip_with_optionals() {
        let config = Config::default();
        let mut refs = BTreeMap::new();
        refs.insert("Website".to_string(), "https://example.com".to_string());
        refs.insert("Book".to_string(), "ISBN 1234567890".to_string());
        let meta = Meta {
            modified: Some(fixed_created()),
            refs: Some(refs),
            format: Some("AsciiDoc".to_string()),
            title: Some("Test Note".to_string()),
            ..sample()
        };

        let yaml = meta.to_yaml(&config).unwrap();
        let parsed = Meta::from_yaml(&yaml, &config).unwrap();
        assert_eq!(parsed, meta);
    }

    #[test]
    fn decode_does_not_require_optionals() {
        let yaml = "created: 2024-05-13T01:02:03Z\nid: \"123456789\"\ntags:\n  - Foo\n  - Bar\n";
        let meta = Meta::from_yaml(yaml, &Config::default()).unwrap();
        assert_eq!(meta, sample());
    }

    #[test]
    fn decode_rejects_empty_id() {
        let yaml = "id: \"\"\ncreated: 2024-05-13T01:02:03Z\ntags: []\n";
        assert!(matches!(
            Meta::from_yaml(yaml, &Config::default()),
            Err(VaultError::MalformedNoteFile(_))
        ));
    }

    #[test]
    fn file_name_with_both_prefixes() {
        let meta = sample();
        assert_eq!(
            meta.gen_file_name(&Config::default()),
            "2024-05-13.01-02.123456789.md"
        );
    }

    #[test]
    fn file_name_without_prefixes() {
        let mut config = Config::default();
        config.notes.filenames.prefix.date = false;
        config.notes.filenames.prefix.time = false;
        assert_eq!(sample().gen_file_name(&config), "123456789.md");
    }

    #[test]
    fn custom_date_format_round_trips() {
        let mut config = Config::default();
        config.notes.metadata.date.format = "%Y/%m/%d %H:%M:%S".to_string();
        let yaml = sample().to_yaml(&config).unwrap();
        assert!(yaml.contains("created: 2024/05/13 01:02:03"));
        let parsed = Meta::from_yaml(&yaml, &config).unwrap();
        assert_eq!(parsed.created, fixed_created());
    }
}
