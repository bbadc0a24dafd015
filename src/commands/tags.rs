use anyhow::Result;
use colored::*;
use serde::Serialize;

use zettel::{Config, DataPaths, TagIndex};

#[derive(Serialize)]
struct TagsResult {
    total_tags: usize,
    total_note_links: usize,
    tags: Vec<TagRow>,
}

#[derive(Serialize)]
struct TagRow {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
    notes: usize,
}

pub fn run(config: &Config, json: bool) -> Result<()> {
    let paths = DataPaths::resolve(config)?;
    let index = TagIndex::load_all(&paths)?;

    let tags: Vec<TagRow> = index
        .tags()
        .map(|t| TagRow {
            name: t.name.clone(),
            description: t.description.clone(),
            icon: t.icon.clone(),
            aliases: t.aliases.clone(),
            notes: t.notes.len(),
        })
        .collect();

    let result = TagsResult {
        total_tags: tags.len(),
        total_note_links: tags.iter().map(|t| t.notes).sum(),
        tags,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(())
}

fn print_report(result: &TagsResult) {
    println!("{}", "Tags".bold());
    println!("{}", "=".repeat(60));

    for tag in &result.tags {
        let count_str = format!("{:>3}", tag.notes);
        let count_colored = if tag.notes >= 2 {
            count_str.green()
        } else if tag.notes == 1 {
            count_str.yellow()
        } else {
            count_str.red()
        };
        print!("  {} × {}", count_colored, tag.name);
        if !tag.aliases.is_empty() {
            print!(" {}", format!("({})", tag.aliases.join(", ")).dimmed());
        }
        println!();
    }

    println!();
    println!(
        "{} tags, {} note links",
        result.total_tags, result.total_note_links
    );
}
