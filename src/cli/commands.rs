use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::format::{MalformedPolicy, QuotePolicy, SentinelPolicy};
use crate::table::Delimiter;

#[derive(Parser)]
#[command(
    name = "careerfmt",
    version,
    about = "Reformat work experience and education pasted from recruiter result pages",
    after_help = "Settings are read from ./careerfmt.toml when present; flags override them. \
                  Cells that already start with '- are treated as formatted and left unchanged."
)]
pub struct Cli {
    /// Settings file (default: ./careerfmt.toml if it exists)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Formatting flags shared by every formatting command.
#[derive(Args, Debug, Clone, Default)]
pub struct FormatFlags {
    /// Malformed entries: strict keeps the cell as it was, lenient formats what it can
    #[arg(long, value_enum)]
    pub on_malformed: Option<MalformedPolicy>,
    /// "Profile experience" / "Profile education" header lines: drop or keep
    #[arg(long, value_enum)]
    pub sentinel: Option<SentinelPolicy>,
    /// Prefix output cells with ' so spreadsheets read them as text
    #[arg(long, value_enum)]
    pub quote: Option<QuotePolicy>,
    /// Reformat cells even if they already look formatted
    #[arg(long)]
    pub no_detect_formatted: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Format the experience and/or education columns of a csv or txt file.
    ///
    /// Writes <name>_output.<ext> next to the input unless --output is given.
    /// Prints a JSON summary on stdout; warnings are logged on stderr.
    Convert {
        /// Input file (.csv or .txt)
        input: PathBuf,
        /// Header of the work experience column
        #[arg(long)]
        experience_column: Option<String>,
        /// Header of the education column
        #[arg(long)]
        education_column: Option<String>,
        /// Field delimiter of the input file
        #[arg(short, long, value_enum)]
        delimiter: Option<Delimiter>,
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Append warnings to this JSONL file
        #[arg(long)]
        warnings_log: Option<PathBuf>,
        #[command(flatten)]
        flags: FormatFlags,
    },

    /// Format one work experience cell (argument or stdin)
    Experience {
        /// Cell text; read from stdin when omitted
        text: Option<String>,
        #[command(flatten)]
        flags: FormatFlags,
    },

    /// Format one education cell (argument or stdin)
    Education {
        /// Cell text; read from stdin when omitted
        text: Option<String>,
        #[command(flatten)]
        flags: FormatFlags,
    },

    /// Inspect a warnings log written by `convert --warnings-log`
    Warnings {
        /// Log file
        log: PathBuf,
        /// Show summary statistics instead of entries
        #[arg(long)]
        summary: bool,
        /// Delete the log file
        #[arg(long)]
        clear: bool,
    },
}
