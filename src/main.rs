// src/main.rs

use assessdb::cli::{self, Cli, Commands};
use assessdb::settings::io::load_settings;
use assessdb::{AppResult, AssessmentService};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout carries only the JSON response.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Cli) -> AppResult<()> {
    let mut settings = load_settings(args.global.config.as_deref())?;
    args.global.apply(&mut settings);

    let service = || AssessmentService::from_settings(settings.clone());
    match args.command {
        Commands::Init => cli::init_database::run(&service()?),
        Commands::NewBatch { client, assessor } => cli::new_batch::run(&service()?, &client, &assessor),
        Commands::SaveItem { payload } => cli::save_item::run(&service()?, &payload),
        Commands::SavePhotos { batch, item, payload } => {
            cli::save_photos::run(&service()?, &batch, &item, &payload)
        }
        Commands::ListColumns { sheet } => cli::list_columns::run(&settings, &sheet),
    }
}
