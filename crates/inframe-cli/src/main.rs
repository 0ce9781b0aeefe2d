//! Inframe CLI
//!
//! Command-line interface for managing the Inframe CMS content

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use inframe_api::{
    AboutUsSection, BlogPost, Company, ContactSubmission, LifePost, Membership, Resource,
    ResourceKind,
};
use inframe_client::{ApiError, Asset, AssetStore, DashboardConfig, HostedUploader, HttpClient};
use inframe_table::RecordTable;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser)]
#[command(name = "inframe", version)]
#[command(about = "Manage Inframe CMS content from the terminal", long_about = None)]
struct Cli {
    /// Backend URL, overrides the config file
    #[arg(short, long, global = true)]
    server: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the records of a resource
    List {
        /// Resource name, e.g. partners or blogs
        resource: ResourceKind,
        /// Only show rows where any cell contains this text
        #[arg(long)]
        search: Option<String>,
        /// Words shown per cell before truncating
        #[arg(long)]
        words: Option<usize>,
    },
    /// Print one record as JSON
    Get { resource: ResourceKind, id: String },
    /// Create a record from a JSON file
    Create {
        resource: ResourceKind,
        #[arg(long)]
        data: PathBuf,
    },
    /// Replace a record from a JSON file
    Update {
        resource: ResourceKind,
        id: String,
        #[arg(long)]
        data: PathBuf,
    },
    /// Delete a record
    Delete { resource: ResourceKind, id: String },
    /// Upload an image or PDF and print its URL
    Upload { file: PathBuf },
    /// List the known resources
    Resources,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        // Backend failures already carry a user-facing message
        if let Some(api) = err.downcast_ref::<ApiError>() {
            tracing::debug!(kind = %api.kind(), status = ?api.status(), original = ?api.original());
            for line in api.display_lines() {
                eprintln!("error: {line}");
            }
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info,inframe_client=debug",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = DashboardConfig::resolve(cli.config.as_deref())?;
    if let Some(server) = cli.server {
        config.api.base_url = server;
    }

    match cli.command {
        Commands::Resources => {
            for kind in ResourceKind::ALL {
                println!("{:<16} {:<22} {}", kind.slug(), kind.path(), kind.label());
            }
        }
        Commands::Upload { file } => {
            let uploader = HostedUploader::new(config.upload);
            let asset = Asset::from_path(&file).await?;
            let stored = uploader.upload(asset).await?;
            println!("{}", stored.secure_url);
        }
        Commands::List {
            resource,
            search,
            words,
        } => {
            let client = HttpClient::new(&config.api.base_url)?;
            let records = client.list_records(resource).await?;

            let mut table = RecordTable::new(resource.columns(), resource.base_route())
                .with_word_limit(words.unwrap_or(config.ui.word_limit));
            table.set_records(records);
            if let Some(search) = search {
                table.set_search(search);
            }

            print!("{}", render::format_table(&table));
            tracing::info!(shown = table.visible_len(), total = table.records().len(), "listed");
        }
        Commands::Get { resource, id } => {
            let client = HttpClient::new(&config.api.base_url)?;
            let value = client.get_raw(resource, &id).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Create { resource, data } => {
            let client = HttpClient::new(&config.api.base_url)?;
            let body = read_json(&data)?;
            let created = dispatch_write(&client, resource, None, body).await?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        Commands::Update { resource, id, data } => {
            let client = HttpClient::new(&config.api.base_url)?;
            let body = read_json(&data)?;
            let updated = dispatch_write(&client, resource, Some(&id), body).await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        Commands::Delete { resource, id } => {
            let client = HttpClient::new(&config.api.base_url)?;
            client.delete(resource, &id).await?;
            println!("Deleted {} {id}", resource.label());
        }
    }

    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).wrap_err_with(|| format!("{} is not valid JSON", path.display()))
}

/// Create or replace a record through its typed resource
async fn dispatch_write(
    client: &HttpClient,
    kind: ResourceKind,
    id: Option<&str>,
    body: Value,
) -> Result<Value> {
    match kind {
        ResourceKind::AboutUs => write::<AboutUsSection>(client, id, body).await,
        ResourceKind::Partners => write::<Company>(client, id, body).await,
        ResourceKind::LifeAtInframe => write::<LifePost>(client, id, body).await,
        ResourceKind::Contacts => write::<ContactSubmission>(client, id, body).await,
        ResourceKind::Memberships => write::<Membership>(client, id, body).await,
        ResourceKind::Blogs => write::<BlogPost>(client, id, body).await,
    }
}

async fn write<R: Resource>(client: &HttpClient, id: Option<&str>, body: Value) -> Result<Value> {
    let record = R::from_json(body)
        .wrap_err_with(|| format!("data does not describe a {} record", R::KIND.label()))?;
    let saved = match id {
        Some(id) => client.update(id, &record).await?,
        None => client.create(&record).await?,
    };
    Ok(serde_json::to_value(saved)?)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resource_argument_parses_slug() {
        let cli = Cli::try_parse_from(["inframe", "list", "partners", "--search", "acme"]).unwrap();
        match cli.command {
            Commands::List {
                resource, search, ..
            } => {
                assert_eq!(resource, ResourceKind::Partners);
                assert_eq!(search.as_deref(), Some("acme"));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_unknown_resource_rejected() {
        assert!(Cli::try_parse_from(["inframe", "list", "staff"]).is_err());
    }
}
