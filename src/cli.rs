use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "footage-report",
    version,
    about = "Structured reports from streamed video analysis text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Parse(ParseArgs),
    Seconds(SecondsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Accumulated model output; `-` reads stdin.
    #[arg(long, default_value = "-")]
    pub input: PathBuf,

    /// Replay the text in chunks of this many characters, re-parsing after each.
    #[arg(long)]
    pub chunk_size: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write a JSON report manifest here.
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub hide_metadata: bool,

    #[arg(long, default_value_t = false)]
    pub hide_timestamps: bool,

    #[arg(long, default_value_t = false)]
    pub hide_summary: bool,

    #[arg(long = "category")]
    pub categories: Vec<String>,

    #[arg(long, default_value_t = false)]
    pub complete_ranges: bool,

    #[arg(long, default_value_t = false)]
    pub show_empty: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SecondsArgs {
    /// `M:S`, `H:M:S` or a `START - END` range.
    #[arg(long)]
    pub time: String,
}
