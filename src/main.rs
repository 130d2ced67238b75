use anyhow::Context;
use clap::Parser;
use messagesource::{
    read_config, ImportConfig, ImportPlan, ImportResult, ImportStatus, Importer, StoreLocation,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Messagesource Import - copy localized message catalogs between stores
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file. Command-line flags override its values.
    #[arg(short, long, env = "MESSAGESOURCE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of .properties bundles to import from
    #[arg(long, conflicts_with = "source_json")]
    source_dir: Option<PathBuf>,

    /// JSON message store to import from
    #[arg(long)]
    source_json: Option<PathBuf>,

    /// Directory of .properties bundles to import into
    #[arg(long, conflicts_with = "target_json")]
    target_dir: Option<PathBuf>,

    /// JSON message store to import into
    #[arg(long)]
    target_json: Option<PathBuf>,

    /// Base name to import. Repeat for several; defaults to all.
    #[arg(short, long = "base-name")]
    base_names: Vec<String>,

    /// Show what would change without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn to_config(&self) -> ImportConfig {
        let location = |dir: &Option<PathBuf>, json: &Option<PathBuf>| {
            dir.clone()
                .map(|path| StoreLocation::Directory { path })
                .or_else(|| json.clone().map(|path| StoreLocation::Json { path }))
        };

        ImportConfig {
            source: location(&self.source_dir, &self.source_json),
            target: location(&self.target_dir, &self.target_json),
            base_names: self.base_names.clone(),
            dry_run: self.dry_run,
        }
    }
}

fn log_plan(base_name: &str, plan: &ImportPlan) {
    info!(
        base_name,
        added = plan.added(),
        updated = plan.updated(),
        removed = plan.removed(),
        "Planned changes"
    );
}

fn log_result(result: &ImportResult) {
    match result.status {
        ImportStatus::Imported => info!(
            base_name = %result.base_name,
            added = result.plan.added(),
            updated = result.plan.updated(),
            removed = result.plan.removed(),
            fingerprint = result.fingerprint.as_deref().unwrap_or_default(),
            "Imported messages"
        ),
        ImportStatus::Unchanged => info!(
            base_name = %result.base_name,
            fingerprint = result.fingerprint.as_deref().unwrap_or_default(),
            "Messages already up to date"
        ),
        ImportStatus::NotFound => warn!(
            base_name = %result.base_name,
            "No messages found in source"
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let file_config = match &args.config {
        Some(path) => read_config(path)
            .await
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ImportConfig::default(),
    };
    let config = file_config.merge(args.to_config());

    let provider = config.source()?.open_provider();
    let importer = Importer::new(provider.clone(), config.target()?.open_acceptor());

    info!(dry_run = config.dry_run, "Starting import");

    if config.dry_run {
        let base_names = if config.base_names.is_empty() {
            provider
                .available_base_names()
                .await
                .context("Failed to list base names")?
        } else {
            config.base_names.clone()
        };

        for base_name in &base_names {
            match importer.plan_import(base_name).await? {
                Some(plan) => log_plan(base_name, &plan),
                None => warn!(base_name = %base_name, "No messages found in source"),
            }
        }
    } else if config.base_names.is_empty() {
        for result in importer.import_all().await? {
            log_result(&result);
        }
    } else {
        for base_name in &config.base_names {
            log_result(&importer.import_messages(base_name).await?);
        }
    }

    info!("Import finished");
    Ok(())
}
