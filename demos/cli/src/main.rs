use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use connect_core::{
    AuthorizationStatus, ConnectConfig, HealthStore, MemoryStore, SampleType, Section,
};
use connect_fhir::CategoryListing;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "connect-cli",
    about = "List a health record category from a JSON health data export."
)]
struct Args {
    /// Path to the JSON health data export.
    #[arg(short, long)]
    input: PathBuf,

    /// Sample type identifier, e.g. HKClinicalTypeIdentifierConditionRecord.
    /// Lists the available categories when omitted.
    #[arg(short, long)]
    category: Option<String>,

    /// Maximum number of samples to list.
    #[arg(long)]
    limit: Option<usize>,

    /// Read payloads without a recognised FHIR release as DSTU2.
    #[arg(long)]
    dstu2_only: bool,

    /// JSON file with settings to use instead of the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minutes east of UTC to show timestamps in. Defaults to the local offset.
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,

    /// Print the FHIR source of the row at this index.
    #[arg(long)]
    source: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Could not read {:?}", args.input))?;
    let mut store = MemoryStore::from_export_str(&data)?;

    let read_types = Section::read_types();
    if store.authorization_status(&read_types)? == AuthorizationStatus::MustRequest {
        info!(count = read_types.len(), "requesting read authorization");
        store.request_authorization(&read_types)?;
    }

    let Some(identifier) = args.category.clone() else {
        print_sections();
        return Ok(());
    };

    let mut listing = CategoryListing::new(SampleType::from(identifier));
    listing.refresh(&store, &config)?;

    println!("{}", listing.title());
    for (index, item) in listing.items(&config).iter().enumerate() {
        let marker = if item.is_navigable() { " >" } else { "" };
        println!(
            "{index:>3}. {}: {}{marker}",
            item.title,
            item.subtitle.as_deref().unwrap_or_default()
        );
    }

    if let Some(index) = args.source {
        let Some(view) = listing.detail(index) else {
            bail!("Row {index} has no FHIR source");
        };
        println!("\n{}\n{}", view.title, view.render()?);
    }

    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<ConnectConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read {path:?}"))?;
            serde_json::from_str(&text).with_context(|| format!("Invalid settings in {path:?}"))?
        }
        None => ConnectConfig::default(),
    };
    if let Some(limit) = args.limit {
        config.query_limit = limit;
    }
    if args.dstu2_only {
        config.r4_supported = false;
    }
    config.utc_offset_minutes = match args.utc_offset {
        Some(minutes) => minutes,
        None if args.config.is_none() => Local::now().offset().local_minus_utc() / 60,
        None => config.utc_offset_minutes,
    };
    Ok(config)
}

fn print_sections() {
    for section in Section::ALL {
        println!("{}", section.display_name());
        for sample_type in section.types() {
            println!("  {} ({sample_type})", sample_type.category_display_name());
        }
    }
}
