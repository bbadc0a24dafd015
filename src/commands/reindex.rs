use anyhow::Result;
use colored::*;
use serde::Serialize;

use zettel::{Config, DataPaths, TagIndex};

#[derive(Serialize)]
struct ReindexResult {
    tags: usize,
    note_links: usize,
    saved: bool,
}

pub fn run(config: &Config, save: bool, json: bool) -> Result<()> {
    let paths = DataPaths::resolve(config)?;
    let mut index = TagIndex::load_all(&paths)?;
    index.reindex(&paths, config)?;
    if save {
        index.save_all(&paths, config)?;
    }

    let result = ReindexResult {
        tags: index.len(),
        note_links: index.tags().map(|t| t.notes.len()).sum(),
        saved: save,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} {} tags, {} note links",
            "Reindexed".green().bold(),
            result.tags,
            result.note_links
        );
        if !save {
            println!("{}", "(in-memory only; pass --save to persist)".dimmed());
        }
    }

    Ok(())
}
