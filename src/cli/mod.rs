// src/cli/mod.rs
// Command-line surface for the form operations plus a schema diagnostic

pub mod init_database;
pub mod list_columns;
pub mod new_batch;
pub mod save_item;
pub mod save_photos;

use crate::error::AppResult;
use crate::settings::AppSettings;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "assessdb")]
#[command(about = "Conservator assessment records - batches, items, condition selections and photos", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Settings file (defaults to app_settings.json in the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Document to open instead of the ambient one
    #[arg(long, global = true)]
    pub document: Option<String>,

    /// Directory holding the ambient document, photos and properties
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn apply(&self, settings: &mut AppSettings) {
        if let Some(document) = &self.document {
            settings.document = Some(document.clone());
        }
        if let Some(dir) = &self.data_dir {
            settings.data_dir = Some(dir.clone());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or repair every canonical sheet
    Init,

    /// Start a new assessment batch for a client
    NewBatch {
        #[arg(long)]
        client: String,
        #[arg(long)]
        assessor: String,
    },

    /// Save an item and its condition selections from a JSON payload
    SaveItem {
        /// Payload file, or `-` for stdin
        payload: PathBuf,
    },

    /// Save photos given as a JSON array of data-URL entries
    SavePhotos {
        #[arg(long)]
        batch: String,
        #[arg(long)]
        item: String,
        /// Payload file, or `-` for stdin
        payload: PathBuf,
    },

    /// Show a sheet's live header row against its canonical header
    ListColumns {
        sheet: String,
    },
}

pub fn read_json_input<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let mut raw = String::new();
    if path == Path::new("-") {
        std::io::stdin().read_to_string(&mut raw)?;
    } else {
        raw = std::fs::read_to_string(path)?;
    }
    Ok(serde_json::from_str(&raw)?)
}

pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_new_batch_with_global_flags() {
        let cli = Cli::try_parse_from([
            "assessdb",
            "new-batch",
            "--client",
            "Museum",
            "--assessor",
            "Alex",
            "--data-dir",
            "/tmp/x",
        ])
        .unwrap();
        assert_eq!(cli.global.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Commands::NewBatch { client, assessor } => {
                assert_eq!(client, "Museum");
                assert_eq!(assessor, "Alex");
            }
            _ => panic!("expected new-batch"),
        }
    }

    #[test]
    fn global_args_override_settings() {
        let args = GlobalArgs {
            config: None,
            document: Some("/srv/doc.db".into()),
            data_dir: None,
        };
        let mut settings = AppSettings::default();
        args.apply(&mut settings);
        assert_eq!(settings.document.as_deref(), Some("/srv/doc.db"));
        assert!(settings.data_dir.is_none());
    }
}
