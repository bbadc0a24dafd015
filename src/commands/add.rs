use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Result;
use colored::*;

use zettel::{Config, DataPaths, Note, TagIndex};

pub fn run(
    config: &Config,
    body: Option<String>,
    tags: Vec<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let body = match (body, file) {
        (Some(b), _) => b,
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let paths = DataPaths::resolve(config)?;
    let mut note = Note::new(body, config)?;
    note.meta.tags = tags.clone();
    note.save(&paths, config)?;

    let mut index = TagIndex::load_all(&paths)?;
    for tag in &tags {
        index.add_note_tag(tag, &note.meta.id, &paths, config)?;
    }

    println!(
        "{} {}",
        "Saved".green().bold(),
        note.meta.gen_file_name(config)
    );
    if !tags.is_empty() {
        println!("  filed under: {}", tags.join(", ").cyan());
    }
    Ok(())
}
