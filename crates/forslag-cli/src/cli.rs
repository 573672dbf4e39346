//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use forslag_render::DocumentFormat;

#[derive(Parser, Debug)]
#[command(
    name = "forslag",
    version,
    about = "Normalize proposal decisions and render deliberation documents",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// TOML configuration (column names, classifier rules, document labels)
    #[arg(long, global = true, value_name = "FILE", env = "FORSLAG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify a raw proposal export into a normalized table
    Normalize(NormalizeArgs),
    /// Render a normalized table as a document
    Render(RenderArgs),
    /// Normalize and render in one go
    Convert(ConvertArgs),
    /// Print records of a normalized table
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Raw export (.csv, .parquet, .arrow)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Normalized table to write (.parquet, .arrow, .csv)
    #[arg(short, long, value_name = "TABLE")]
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
pub struct DocumentArgs {
    /// Document title (defaults to the configured title)
    #[arg(long)]
    pub title: Option<String>,

    /// Document format: text (txt) or markdown (md)
    #[arg(long, default_value_t = DocumentFormat::Text)]
    pub format: DocumentFormat,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Normalized table
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Document to write, or `-` for stdout
    #[arg(short, long, value_name = "DOC")]
    pub output: PathBuf,

    #[command(flatten)]
    pub document: DocumentArgs,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Raw export (.csv, .parquet, .arrow)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Intermediate normalized table
    #[arg(long, value_name = "TABLE")]
    pub table: PathBuf,

    /// Document to write, or `-` for stdout
    #[arg(short, long, value_name = "DOC")]
    pub output: PathBuf,

    #[command(flatten)]
    pub document: DocumentArgs,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Normalized table
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Show only the record with this id
    #[arg(long)]
    pub id: Option<String>,

    /// Emit records as JSON
    #[arg(long)]
    pub json: bool,
}
