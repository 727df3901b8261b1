//! Folio main entry point
//!
//! This is the command-line interface for the Folio catalog harvester.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use folio::config::{load_config_with_hash, validate, Config};
use folio::output::{print_statistics, render_dataset, watch_site};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Folio: a catalog harvester for online book libraries
///
/// Folio walks the catalog's listing pages, downloads each book's cover and
/// text, writes everything to one JSON dataset, and renders that dataset
/// into static HTML pages.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A catalog harvester for online book libraries", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG", env = "FOLIO_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Settings that take precedence over the configuration file
#[derive(Args, Debug, Default)]
struct Overrides {
    /// Catalog root address
    #[arg(long, env = "FOLIO_BASE_URL", global = true)]
    base_url: Option<String>,

    /// First listing page to harvest
    #[arg(long, env = "FOLIO_START_PAGE", global = true)]
    start_page: Option<u32>,

    /// Last listing page to harvest (walks to the end of the catalog when unset)
    #[arg(long, env = "FOLIO_END_PAGE", global = true)]
    end_page: Option<u32>,

    /// Dataset file to write (harvest) or read (render)
    #[arg(long, env = "FOLIO_DATASET", global = true)]
    dataset: Option<String>,

    /// Folder for downloaded cover images
    #[arg(long, env = "FOLIO_IMAGE_FOLDER", global = true)]
    image_folder: Option<String>,

    /// Folder for downloaded book texts
    #[arg(long, env = "FOLIO_TEXT_FOLDER", global = true)]
    text_folder: Option<String>,

    /// Page template for rendering (built-in layout when the file is missing)
    #[arg(long, env = "FOLIO_TEMPLATE", global = true)]
    template: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Harvest the catalog into the dataset file (default)
    Harvest,

    /// Render the dataset into static HTML pages
    Render {
        /// Keep running and re-render whenever the template or dataset changes
        #[arg(long)]
        watch: bool,

        /// Polling interval for --watch, in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },

    /// Validate the configuration and show what would be harvested
    DryRun,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(cli.config.as_deref(), &cli.overrides)?;

    match cli.command.unwrap_or(Command::Harvest) {
        Command::Harvest => handle_harvest(config, cli.quiet).await,
        Command::Render { watch, interval_ms } => {
            handle_render(&config, watch, Duration::from_millis(interval_ms)).await
        }
        Command::DryRun => handle_dry_run(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("folio=info,warn"),
            1 => EnvFilter::new("folio=debug,info"),
            2 => EnvFilter::new("folio=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (or defaults) and applies overrides
fn resolve_config(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, overrides);
    validate(&config).context("invalid configuration")?;

    Ok(config)
}

fn apply_overrides(config: &mut Config, overrides: &Overrides) {
    if let Some(base_url) = &overrides.base_url {
        config.catalog.base_url = base_url.clone();
    }
    if let Some(start_page) = overrides.start_page {
        config.catalog.start_page = start_page;
    }
    if let Some(end_page) = overrides.end_page {
        config.catalog.end_page = Some(end_page);
    }
    if let Some(dataset) = &overrides.dataset {
        config.output.dataset_path = dataset.clone();
    }
    if let Some(image_folder) = &overrides.image_folder {
        config.output.image_folder = image_folder.clone();
    }
    if let Some(text_folder) = &overrides.text_folder {
        config.output.text_folder = text_folder.clone();
    }
    if let Some(template) = &overrides.template {
        config.site.template_path = template.clone();
    }
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Harvesting {} into {} (images: {}, texts: {})",
        config.catalog.base_url,
        config.output.dataset_path,
        config.output.image_folder,
        config.output.text_folder
    );

    let stats = folio::harvest(config).await.context("harvest failed")?;

    if !quiet {
        print_statistics(&stats);
    }

    Ok(())
}

/// Handles the render command, optionally watching the dataset
async fn handle_render(config: &Config, watch: bool, interval: Duration) -> anyhow::Result<()> {
    let dataset = Path::new(&config.output.dataset_path);

    if watch {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
            }
        };
        watch_site(dataset, &config.site, interval, shutdown)
            .await
            .context("watch failed")?;
    } else {
        let pages = render_dataset(dataset, &config.site)
            .with_context(|| format!("failed to render {}", dataset.display()))?;
        tracing::info!("Wrote {} pages", pages.len());
    }

    Ok(())
}

/// Handles the dry-run command: shows the resolved configuration
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let endpoints = folio::Endpoints::new(&config.catalog.base_url, config.catalog.category)?;

    println!("=== Folio Dry Run ===\n");

    println!("Catalog:");
    println!("  Base URL: {}", endpoints.base());
    println!("  Category: {}", config.catalog.category);
    println!("  Start page: {}", config.catalog.start_page);
    match config.catalog.end_page {
        Some(end_page) => println!("  End page: {}", end_page),
        None => println!("  End page: (until the catalog ends)"),
    }
    println!(
        "  First listing: {}",
        endpoints.listing_page(config.catalog.start_page)?
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    if let Some(contact_url) = &config.user_agent.contact_url {
        println!("  Contact URL: {}", contact_url);
    }
    println!("  Timeout: {}s", config.user_agent.timeout_secs);

    println!("\nOutput:");
    println!("  Dataset: {}", config.output.dataset_path);
    println!("  Images: {}", config.output.image_folder);
    println!("  Texts: {}", config.output.text_folder);

    println!("\nSite:");
    println!("  Template: {}", config.site.template_path);
    println!("  Static folder: {}", config.site.static_folder);
    println!("  Books per page: {}", config.site.page_size);

    println!("\n✓ Configuration is valid");

    Ok(())
}
