use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use intel_sync::config::Config;
use intel_sync::db;
use intel_sync::sync::SyncJob;
use intel_sync::upload;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "client", version, about = "Exchanges JSON snapshots with the data server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch JSON data from the server and store it in the database
    Get,
    /// Upload JSON data to the server
    Post {
        /// Path to the JSON file to upload
        #[arg(short, long, conflicts_with = "data")]
        file: Option<PathBuf>,
        /// Inline JSON document to upload
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Remove an item and its indicators from the database
    Remove {
        /// Id of the item to remove
        id: String,
    },
}

fn main() {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command) {
        log::error!("{:#}", err);

        process::exit(1);
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Get => fetch_and_store(),
        Command::Post { file, data } => post(file, data),
        Command::Remove { id } => remove(&id),
    }
}

fn fetch_and_store() -> anyhow::Result<()> {
    let mut connection = db::establish_connection()?;
    let sync_job = SyncJob::default();

    sync_job
        .execute(&mut connection)
        .with_context(|| format!("Failed to sync data from {}", sync_job.url()))?;

    let total = db::items::count(&mut connection)?;
    log::info!("Data fetched and stored successfully, {} items in the database", total);

    Ok(())
}

fn post(file: Option<PathBuf>, data: Option<String>) -> anyhow::Result<()> {
    let url = Config::upload_url();

    let response = match (file, data) {
        (Some(path), _) => upload::upload_file(&url, &path)?,
        (None, Some(data)) => {
            let value = serde_json::from_str(&data).context("--data is not valid JSON")?;

            log::info!("Posting JSON data");

            upload::upload_value(&url, &value)?
        }
        (None, None) => anyhow::bail!("Nothing to upload, pass --file or --data"),
    };

    log::info!("POST request successful: {}", response);

    Ok(())
}

fn remove(id: &str) -> anyhow::Result<()> {
    let mut connection = db::establish_connection()?;

    match db::items::remove(&mut connection, id)? {
        0 => log::warn!("Item {} not found", id),
        _ => log::info!("Removed item {} and its indicators", id),
    }

    Ok(())
}
