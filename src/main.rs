use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use godaddy_domains::config::{self, ProviderConfig};
use godaddy_domains::resource::{DomainDataSource, RecordResource, RecordSpec, RecordState};
use godaddy_domains::sync::{self, Manifest};
use godaddy_domains::{api::GoDaddyClient, identifier};
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "godaddy-domains")]
#[command(version)]
#[command(about = "Manage GoDaddy DNS records as declared resources")]
struct Cli {
    /// Provider configuration file (YAML). Defaults to GODADDY_* environment variables
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage a single DNS record
    Record {
        #[command(subcommand)]
        action: RecordCommand,
    },
    /// Look up a domain's details
    Domain { name: String },
    /// Reconcile every record in a manifest with the remote zone
    Sync {
        manifest: PathBuf,
        /// Only report what would change
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum RecordCommand {
    Create {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        record_type: String,
        #[arg(long)]
        data: String,
        #[arg(long)]
        ttl: Option<u32>,
    },
    /// Read a record by `<domain>:<name>:<type>`
    Read { id: String },
    Update {
        id: String,
        #[arg(long)]
        data: String,
        #[arg(long)]
        ttl: Option<u32>,
    },
    Delete { id: String },
    /// Adopt an existing record and print its state
    Import { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Command::Record { action } => {
            let client = build_client(provider_config(cli.config.as_ref())?)?;
            run_record(&client, action).await
        }
        Command::Domain { name } => {
            let client = build_client(provider_config(cli.config.as_ref())?)?;
            let summary = DomainDataSource::new(&client).read(&name).await?;
            print_json(&summary)
        }
        Command::Sync { manifest, dry_run } => {
            let manifest = Manifest::load(&manifest)?;
            let provider = match cli.config.as_ref() {
                Some(path) => ProviderConfig::load(path)?,
                None => manifest.provider.clone().resolve(),
            };
            let client = build_client(provider)?;

            let resource = RecordResource::new(&client);
            let report = sync::sync(&resource, &manifest.records, dry_run).await;
            print_json(&report)?;
            if report.failed() > 0 {
                bail!(
                    "{} of {} records failed to sync",
                    report.failed(),
                    report.outcomes.len()
                );
            }
            info!("{} records changed", report.changed());
            Ok(())
        }
    }
}

fn init_logging(level: Option<&str>) {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.init();
}

fn provider_config(path: Option<&PathBuf>) -> Result<ProviderConfig> {
    match path {
        Some(path) => ProviderConfig::load(path),
        None => Ok(ProviderConfig::from_env()),
    }
}

fn build_client(provider: ProviderConfig) -> Result<GoDaddyClient> {
    let configured = config::configure(&provider).context("Failed to build HTTP client")?;
    Ok(configured.into_client()?)
}

async fn run_record(client: &GoDaddyClient, action: RecordCommand) -> Result<()> {
    let resource = RecordResource::new(client);

    match action {
        RecordCommand::Create {
            domain,
            name,
            record_type,
            data,
            ttl,
        } => {
            let spec = RecordSpec {
                domain,
                name,
                record_type,
                data,
                ttl,
            };
            spec.validate()?;
            let mut state = RecordState::from_spec(&spec);
            resource.create(&mut state).await?;
            print_json(&state)
        }
        RecordCommand::Read { id } | RecordCommand::Import { id } => {
            let mut state = import(&resource, &id)?;
            resource.read(&mut state).await?;
            if !state.is_bound() {
                warn!("Record {id} does not exist");
            }
            print_json(&state)
        }
        RecordCommand::Update { id, data, ttl } => {
            let mut state = import(&resource, &id)?;
            resource.read(&mut state).await?;
            if !state.is_bound() {
                bail!("Record {id} does not exist");
            }
            let desired = RecordSpec {
                domain: state.domain().to_string(),
                name: state.name().to_string(),
                record_type: state.record_type().to_string(),
                data,
                ttl,
            };
            resource.update(&mut state, &desired).await?;
            print_json(&state)
        }
        RecordCommand::Delete { id } => {
            let mut state = import(&resource, &id)?;
            resource.delete(&mut state).await?;
            print_json(&state)
        }
    }
}

/// Imports `id`, insisting on the composite form since the CLI has no other
/// way to learn the record's domain, name and type.
fn import(resource: &RecordResource<'_, GoDaddyClient>, id: &str) -> Result<RecordState> {
    if !identifier::is_composite(id) {
        bail!("Record ID must look like <domain>:<name>:<type>, got {id:?}");
    }
    Ok(resource.import(id)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
