use clap::{Args, Parser, Subcommand, ValueEnum};
use lode_core::enums::FormatType;

/// How command results are printed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Answer text with numbered citations.
    Text,
    Json,
    Raw,
}

/// Top-level CLI parser for the `lode` binary.
#[derive(Debug, Parser)]
#[command(name = "lode", version, about = "Lodestar - cited answers from public sources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: text, json, raw
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Answer a question from the configured sources.
    Ask(AskArgs),
    /// Drop cached answers older than a number of days.
    ClearCache(ClearCacheArgs),
    /// Search learned concepts.
    Kb(KbArgs),
    /// Component health, metrics, and catalogues.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    /// The question; several words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Caller identity used to scope cached answers.
    #[arg(long)]
    pub user: Option<String>,

    /// Answer style (normal, sugarcoated, unhinged, dark, chaotic, or an alias).
    #[arg(long)]
    pub style: Option<String>,

    /// Answer layout: comprehensive, summary, bullet_points
    #[arg(long, value_parser = parse_format)]
    pub format: Option<FormatType>,
}

impl AskArgs {
    pub fn text(&self) -> String {
        self.query.join(" ")
    }
}

#[derive(Clone, Debug, Args)]
pub struct ClearCacheArgs {
    /// Age threshold; defaults to the configured retention.
    #[arg(long)]
    pub days: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct KbArgs {
    pub term: String,

    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,
}

fn parse_format(value: &str) -> Result<FormatType, String> {
    value.parse::<FormatType>().map_err(|e| e.to_string())
}
