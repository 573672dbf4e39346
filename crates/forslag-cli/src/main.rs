mod cli;
mod display;
mod pipeline;

use anyhow::{Context, bail};
use clap::Parser;
use forslag_core::Config;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, DocumentArgs};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("forslag v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_or_default(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Normalize(args) => {
            let stats = pipeline::run_normalize(&args.input, &args.output, &config)?;
            display::print_normalize_stats(&stats);
        }
        Command::Render(args) => {
            render(&args.table, &args.output, &args.document, &config)?;
        }
        Command::Convert(args) => {
            let stats = pipeline::run_normalize(&args.input, &args.table, &config)?;
            tracing::info!(
                written = stats.written,
                skipped = stats.skipped,
                table = %args.table.display(),
                "normalized"
            );
            render(&args.table, &args.output, &args.document, &config)?;
        }
        Command::Inspect(args) => {
            let read = forslag_store::read_records(&args.table)
                .with_context(|| format!("reading normalized table {}", args.table.display()))?;

            let records: Vec<_> = match &args.id {
                Some(id) => read.records.iter().filter(|r| &r.id == id).collect(),
                None => read.records.iter().collect(),
            };
            if let Some(id) = &args.id
                && records.is_empty()
            {
                bail!("no record with id {id:?} in {}", args.table.display());
            }

            if args.json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in &records {
                    display::print_record_card(record);
                }
                if args.id.is_none() {
                    display::print_status_summary(&forslag_core::count_by_status(&read.records));
                }
            }
        }
    }

    Ok(())
}

fn render(
    table: &std::path::Path,
    output: &std::path::Path,
    document: &DocumentArgs,
    config: &Config,
) -> anyhow::Result<()> {
    let title = document.title.as_deref().unwrap_or(&config.document.title);
    let stats = pipeline::run_render(table, output, title, document.format, config)?;
    if stats.skipped > 0 {
        tracing::warn!(skipped = stats.skipped, "some stored rows were not rendered");
    }
    if stats.unrecognized > 0 {
        tracing::warn!(
            unrecognized = stats.unrecognized,
            "some proposals have an unrecognized status and no recommendation"
        );
    }
    tracing::info!(records = stats.records, bytes = stats.bytes, output = %output.display(), "done");
    Ok(())
}
