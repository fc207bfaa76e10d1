// CLI configuration
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tta_tag::{ReadStyle, TagKind};

/// tta-tag - TrueAudio header and tag inspection tool
#[derive(Parser, Debug)]
#[command(name = "tta-tag")]
#[command(about = "Inspect TrueAudio (TTA) stream headers and their ID3/APE tags", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages, log errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (log at info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Index tags only, skip decoding the stream header
    #[arg(long, global = true)]
    pub tags_only: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

impl Config {
    pub fn read_style(&self) -> ReadStyle {
        if self.tags_only {
            ReadStyle::TagsOnly
        } else {
            ReadStyle::Average
        }
    }

    /// Log filter used when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON, one document per line
    Json,
    /// Key-value pairs
    KeyValue,
    /// Table format
    Table,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show audio properties, tag regions and file information
    Info {
        /// TTA file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the tags of file(s)
    Tags {
        /// TTA file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Only this tag kind (id3v2, id3v1, ape, xiph)
        #[arg(short, long)]
        kind: Option<TagKind>,

        /// Create an empty tag of `--kind` in memory when missing
        #[arg(long, requires = "kind")]
        create: bool,
    },

    /// Detect whether file(s) are TTA streams
    Detect {
        /// File path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Summarise every matching file in a directory
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: PathBuf,

        /// File pattern (e.g. "*.tta"); plain names are searched recursively
        #[arg(short, long, default_value = "*.tta")]
        pattern: String,
    },
}
