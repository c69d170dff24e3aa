//! CLI module - Command-line interface definition and handler

use anyhow::Result;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use std::path::PathBuf;

use crate::core::error::ScanError;
use crate::core::model::{ExtensionFilter, Input, ScanConfig};
use crate::core::paths::is_valid_extension;
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::scan::walk::walk;

/// corpus-stats - count lines and bytes across a file or a corpus directory.
#[derive(Parser, Debug)]
#[command(name = "corpus-stats")]
#[command(
    author,
    version,
    about,
    long_about = r#"corpus-stats counts files, lines and bytes under PATH and prints a short
preview of the first lines it encounters.

PATH may be a single file, a directory (scanned one level deep unless
--recursive is given) or `-` to read standard input.

Exit codes:
   0  success
   1  missing path
   2  bad numeric argument
   3  malformed --ext value
   4  unknown option or other usage error
   5  extra positional argument
   6  failed to open file
   7  read error
  10  a file inside the directory failed to scan
  20  path does not exist
  21  path is neither a file nor a directory
  22  directory traversal error

Examples:
    corpus-stats data/ -r --ext .jsonl --ext .csv --preview 5
    corpus-stats data/ -r -c --ext .jsonl
    corpus-stats file.txt --preview 3
    cat rows.jsonl | corpus-stats - 3
"#
)]
pub struct Cli {
    /// File or directory to scan, or `-` for standard input.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Number of preview lines (positional form of --preview).
    #[arg(
        value_name = "PREVIEW",
        long_help = "Number of preview lines, accepted positionally for compatibility.\n\n\
If --preview is also given, --preview wins."
    )]
    pub legacy_preview: Option<usize>,

    /// Descend into subdirectories.
    #[arg(short, long)]
    pub recursive: bool,

    /// Record per-file failures and keep going.
    #[arg(
        short = 'c',
        long = "continue",
        long_help = "Record files that fail to open or read and keep scanning the rest.\n\n\
The run still exits 0; the failure count and up to 5 messages are reported.\n\
Failures on a root file, a missing root or a traversal error always abort."
    )]
    pub continue_on_error: bool,

    /// Only scan files with this extension (repeatable, e.g. --ext .jsonl).
    #[arg(
        long = "ext",
        value_name = "EXT",
        value_parser = parse_extension,
        long_help = "Only scan files whose extension exactly matches EXT, including the\n\
leading dot. Matching is case-sensitive. Repeat to allow several extensions.\n\n\
Ignored when reading standard input."
    )]
    pub exts: Vec<String>,

    /// Number of lines to preview across the whole run.
    #[arg(
        short,
        long,
        value_name = "N",
        allow_negative_numbers = true,
        long_help = "Capture the first N lines encountered across all scanned files.\n\n\
0 (the default) disables the preview."
    )]
    pub preview: Option<usize>,

    /// Output format (text/json).
    #[arg(
        long,
        default_value = "text",
        env = "CORPUS_STATS_FORMAT",
        value_parser = ["text", "json"],
        value_name = "FORMAT"
    )]
    pub format: String,

    /// Pretty-print JSON output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode (only errors on stderr).
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Effective preview limit, preferring the --preview flag
    pub fn preview_limit(&self) -> usize {
        self.preview.or(self.legacy_preview).unwrap_or(0)
    }

    /// Build the immutable configuration for one walk
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new(Input::from_arg(&self.path))
            .with_recursive(self.recursive)
            .with_extensions(ExtensionFilter::new(self.exts.iter().cloned()))
            .with_preview_limit(self.preview_limit())
            .with_continue_on_error(self.continue_on_error)
    }

    pub fn render_config(&self) -> RenderConfig {
        let format: OutputFormat = self.format.parse().unwrap_or_default();
        RenderConfig::with_pretty(format, self.pretty)
    }
}

fn parse_extension(s: &str) -> Result<String, String> {
    if is_valid_extension(s) {
        Ok(s.to_string())
    } else {
        Err(format!(
            "extension must start with '.' followed by a name (e.g. .jsonl), got '{}'",
            s
        ))
    }
}

/// Exit code for a command-line parsing failure (0 for --help/--version)
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    let arg = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(s)) => s.as_str(),
        _ => "",
    };

    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        ErrorKind::MissingRequiredArgument => 1,
        ErrorKind::InvalidValue if arg == "<PATH>" => 1,
        ErrorKind::InvalidValue | ErrorKind::ValueValidation => {
            if arg.starts_with("--ext") {
                3
            } else if arg.to_ascii_lowercase().contains("preview") {
                2
            } else {
                4
            }
        }
        ErrorKind::UnknownArgument if !arg.is_empty() && !arg.starts_with('-') => 5,
        ErrorKind::TooManyValues => 5,
        _ => 4,
    }
}

/// Exit code for a failed run
pub fn failure_exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ScanError>()
        .map(ScanError::exit_code)
        .unwrap_or(1)
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.scan_config();
    let totals = walk(&config)?;

    let renderer = Renderer::with_config(cli.render_config());
    renderer.render_to(&totals, std::io::stdout().lock())
}
