// pgrid - headless views of potential tables
//
// Loads a potential document (JSON or TOML), projects it onto a grid, and
// prints, exports or re-imports that grid.

mod exit_codes;
mod logging;
mod table;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use potgrid_config::Settings;
use potgrid_engine::{column_index, configuration_for_column, Rounding, ValueProjector};
use potgrid_io::{csv, json, load_document, render, save_document, IoError};

use exit_codes::{EXIT_DOCUMENT, EXIT_GRID, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "pgrid")]
#[command(about = "Project potential tables onto spreadsheet-style grids (headless)")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (default: <config dir>/potgrid/settings.json)
    #[arg(long, global = true, env = "PGRID_SETTINGS")]
    settings: Option<PathBuf>,

    /// Decimal places shown (overrides display.maxDecimals)
    #[arg(long, global = true)]
    decimals: Option<u32>,

    /// Show values exactly as stored
    #[arg(long, global = true, conflicts_with = "decimals")]
    no_round: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grid of a potential
    #[command(after_help = "\
Examples:
  pgrid show rain.json
  pgrid show rain.toml --decimals 3")]
    Show {
        /// Potential document (.json or .toml)
        doc: PathBuf,

        /// Maximum column width
        #[arg(long, default_value = "16")]
        width: usize,
    },

    /// Export the grid as CSV or JSON
    #[command(after_help = "\
Examples:
  pgrid export rain.json -t csv
  pgrid export rain.json -t csv --column-ids -o rain.csv
  pgrid export rain.json -t json | jq .")]
    Export {
        doc: PathBuf,

        /// Output format
        #[arg(long, short = 't')]
        to: ExportFormat,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// CSV delimiter (overrides export.delimiter)
        #[arg(long)]
        delimiter: Option<char>,

        /// First CSV record holds the column ids (A, B, C, ...)
        #[arg(long)]
        column_ids: bool,
    },

    /// Print the parent configuration a grid column stands for
    #[command(after_help = "\
COLUMN is a column id (B, C, ..., AA) or a grid column index (1 = B).

Examples:
  pgrid config rain.json --column C
  pgrid config rain.json --column 2 --json")]
    Config {
        doc: PathBuf,

        #[arg(long)]
        column: String,

        /// Print the configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print which cells are locked (. free, H header, R restricted, U uncertain)
    Mask { doc: PathBuf },

    /// Rebuild a document's values from an edited grid
    #[command(after_help = "\
Examples:
  pgrid export rain.json -t csv -o rain.csv
  # edit rain.csv
  pgrid import rain.json rain.csv
  pgrid import rain.json rain.csv -o rain-edited.toml")]
    Import {
        doc: PathBuf,

        /// Edited grid (CSV, delimiter detected unless given)
        grid: PathBuf,

        /// Where to write the updated document (default: overwrite DOC)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        #[arg(long)]
        delimiter: Option<char>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\nengine:  potgrid-engine ",
        env!("CARGO_PKG_VERSION"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = match &cli.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let projector = projector(&cli, &settings);

    let result = match cli.command {
        Commands::Show { doc, width } => cmd_show(&doc, &projector, width),
        Commands::Export { doc, to, output, delimiter, column_ids } => {
            cmd_export(&doc, &projector, &settings, to, output, delimiter, column_ids)
        }
        Commands::Config { doc, column, json } => cmd_config(&doc, &column, json),
        Commands::Mask { doc } => cmd_mask(&doc),
        Commands::Import { doc, grid, output, delimiter } => cmd_import(&doc, &grid, output, delimiter),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<IoError> for CliError {
    fn from(e: IoError) -> Self {
        let code = match &e {
            IoError::Json(_) | IoError::Toml(_) | IoError::Document(_) => EXIT_DOCUMENT,
            IoError::Grid(_) => EXIT_GRID,
            IoError::Io(_) | IoError::Csv(_) => EXIT_IO,
        };
        Self { code, message: e.to_string(), hint: None }
    }
}

impl From<potgrid_engine::GridError> for CliError {
    fn from(e: potgrid_engine::GridError) -> Self {
        IoError::from(e).into()
    }
}

fn projector(cli: &Cli, settings: &Settings) -> ValueProjector {
    if cli.no_round {
        return ValueProjector::exact();
    }
    match cli.decimals {
        Some(decimals) => ValueProjector::new(Some(Rounding::new(decimals, settings.epsilon))),
        None => ValueProjector::new(settings.rounding()),
    }
}

fn ascii_delimiter(delimiter: char) -> Result<u8, CliError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(CliError::args(format!("delimiter {delimiter:?} must be a single ASCII character")))
    }
}

/// Parse a column id (`C`, `aa`) or a grid column index (`2`).
fn parse_column(column: &str) -> Result<usize, CliError> {
    let column = column.trim();
    if let Ok(index) = column.parse::<usize>() {
        return Ok(index);
    }
    column_index(column).ok_or_else(|| {
        CliError::args(format!("invalid column '{column}'")).with_hint("use a column id like B or an index like 1")
    })
}

/// Stdout, or a buffered file when `output` is given.
fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>, CliError> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| CliError::io(format!("{}: {e}", path.display())))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn cmd_show(doc_path: &Path, projector: &ValueProjector, width: usize) -> Result<(), CliError> {
    let doc = load_document(doc_path)?;
    let rendered = render(&doc, projector)?;
    print!("{}", table::render_grid(&rendered.grid, &rendered.layout, width));
    Ok(())
}

fn cmd_export(
    doc_path: &Path,
    projector: &ValueProjector,
    settings: &Settings,
    to: ExportFormat,
    output: Option<PathBuf>,
    delimiter: Option<char>,
    column_ids: bool,
) -> Result<(), CliError> {
    let delimiter = match delimiter {
        Some(c) => ascii_delimiter(c)?,
        None => settings.delimiter_byte(),
    };
    let column_ids = column_ids || settings.include_column_ids;
    let doc = load_document(doc_path)?;
    let rendered = render(&doc, projector)?;
    let mut out = open_output(output.as_deref())?;

    match to {
        ExportFormat::Csv => {
            csv::export(&rendered.grid, &rendered.layout, &mut out, delimiter, column_ids)?;
        }
        ExportFormat::Json => {
            json::export(&rendered.grid, &mut out)?;
            writeln!(out).map_err(|e| CliError::io(e.to_string()))?;
        }
    }
    out.flush().map_err(|e| CliError::io(e.to_string()))?;

    if let Some(path) = &output {
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_config(doc_path: &Path, column: &str, json: bool) -> Result<(), CliError> {
    let doc = load_document(doc_path)?;
    let layout = doc.layout()?;
    let col = parse_column(column)?;
    let configuration = configuration_for_column(col, &layout)?;

    if json {
        let text = serde_json::to_string_pretty(&configuration).map_err(|e| CliError::io(e.to_string()))?;
        println!("{text}");
    } else if configuration.is_empty() {
        println!("{}: (no parents)", layout.column_ids[col]);
    } else {
        println!("{}: {}", layout.column_ids[col], configuration.describe(layout.space()));
    }
    Ok(())
}

fn cmd_mask(doc_path: &Path) -> Result<(), CliError> {
    let doc = load_document(doc_path)?;
    let rendered = render(&doc, &ValueProjector::exact())?;
    print!("{}", table::render_mask(&rendered.mask, &rendered.layout));
    Ok(())
}

fn cmd_import(doc_path: &Path, grid_path: &Path, output: Option<PathBuf>, delimiter: Option<char>) -> Result<(), CliError> {
    let doc = load_document(doc_path)?;
    let layout = doc.layout()?;
    let delimiter = delimiter.map(ascii_delimiter).transpose()?;

    let values = csv::import_file(grid_path, &layout, delimiter, doc.values.kind())?;
    let updated = doc.with_values(values);

    let target = output.as_deref().unwrap_or(doc_path);
    save_document(&updated, target)?;
    log::info!("updated {} values in {}", updated.values.len(), target.display());
    Ok(())
}
