mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zettel")]
#[command(about = "File-backed Zettelkasten note and tag store", long_about = None)]
#[command(version)]
struct Cli {
    /// Alternative configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a note
    Add {
        /// Note body; read from stdin when omitted
        body: Option<String>,
        #[arg(short = 't', long = "tag", help = "File the note under TAG (repeatable)")]
        tags: Vec<String>,
        #[arg(long, help = "Read the body from a file instead")]
        file: Option<PathBuf>,
    },
    /// List all tags
    Tags {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Rebuild every tag's note set from the note files
    Reindex {
        #[arg(long, help = "Persist the rebuilt index to the tag files")]
        save: bool,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = zettel::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Add { body, tags, file } => commands::add::run(&config, body, tags, file),
        Commands::Tags { json } => commands::tags::run(&config, json),
        Commands::Reindex { save, json } => commands::reindex::run(&config, save, json),
    }
}
