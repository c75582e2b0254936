//! Site Counts host
//!
//! Renders registered blocks against a content fixture and prints the
//! markup to stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use site_counts_block::{BLOCK_NAME, SiteCountsBlock, TEXT_DOMAIN};
use site_counts_kernel::{BlockRegistry, Config, ConfigOverrides, ContentStore, LocaleService};
use site_counts_sdk::block::BlockContext;
use site_counts_sdk::types::ItemId;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Render server-side blocks from the command line.
#[derive(Parser, Debug)]
#[command(name = "site-counts", author, version, about, long_about = None)]
struct Cli {
    /// What to do; renders the block when omitted.
    #[command(subcommand)]
    command: Option<Command>,

    /// YAML content fixture (overrides SITE_COUNTS_FIXTURE).
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// .po catalog for the block text domain (overrides SITE_COUNTS_TRANSLATIONS).
    #[arg(long, global = true)]
    translations: Option<PathBuf>,

    /// Interface language (overrides SITE_COUNTS_LOCALE).
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Render a block and print its HTML
    Render,

    /// List registered blocks
    List,
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
struct RenderArgs {
    /// Identifier of the item the block is rendered in.
    #[arg(long, global = true, default_value_t = 0)]
    current_item: u64,

    /// Extra CSS class for the wrapper element.
    #[arg(long, global = true)]
    class_name: Option<String>,

    /// Block to render.
    #[arg(long, global = true, default_value = BLOCK_NAME)]
    block: String,
}

impl Cli {
    /// Command-line settings that take precedence over the environment.
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            locale: self.locale.clone(),
            fixture: self.fixture.clone(),
            translations: self.translations.clone(),
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    config.apply_overrides(cli.overrides());
    info!(locale = %config.locale, "configuration loaded");

    let registry = registry()?;

    match cli.command.unwrap_or(Command::Render) {
        Command::List => print!("{}", block_listing(&registry)),
        Command::Render => {
            let html = render(&config, &registry, &cli.render)?;
            println!("{html}");
        }
    }

    Ok(())
}

/// Registry with every block the host ships.
fn registry() -> Result<BlockRegistry> {
    let mut registry = BlockRegistry::new();
    registry
        .register(SiteCountsBlock)
        .context("failed to register blocks")?;
    Ok(registry)
}

/// One tab-separated line per block: name, category, title.
fn block_listing(registry: &BlockRegistry) -> String {
    registry
        .metadata()
        .into_iter()
        .map(|meta| format!("{}\t{}\t{}\n", meta.name, meta.category, meta.title))
        .collect()
}

/// Build the store and locale from `config` and render one block.
fn render(config: &Config, registry: &BlockRegistry, args: &RenderArgs) -> Result<String> {
    let store = match &config.fixture {
        Some(path) => ContentStore::load_fixture(path)?,
        None => ContentStore::with_builtin_types(),
    };

    let locale = LocaleService::new(&config.locale);
    if let Some(path) = &config.translations {
        locale.load_po_file(TEXT_DOMAIN, path)?;
    }

    let mut attributes = Map::new();
    if let Some(class) = &args.class_name {
        attributes.insert("className".into(), Value::String(class.clone()));
    }

    let ctx = BlockContext {
        current_item: ItemId(args.current_item),
        types: &store,
        query: &store,
        translator: &locale,
    };

    registry
        .render(&args.block, &Value::Object(attributes), "", &ctx)
        .with_context(|| format!("failed to render block {}", args.block))
}

/// Initialize tracing subscriber with environment filter.
///
/// Writes to stderr so stdout carries only rendered markup.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
