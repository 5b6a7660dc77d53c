// Activos CLI - bulk asset import from spreadsheets

mod exit_codes;
mod table;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use activos_config::Settings;
use activos_import::{
    resolve_header, run_import, DuplicateHeaderPolicy, ImportError, ImportOptions, StoreError,
};
use activos_io::{read_rows, xlsx};
use activos_store::{AssetFilter, SqliteStore};

use exit_codes::{
    import_exit_code, EXIT_ERROR, EXIT_STORE, EXIT_SUCCESS, EXIT_USAGE, EXIT_WRITE,
};

#[derive(Parser)]
#[command(name = "activos")]
#[command(about = "Import, list and export the asset inventory")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Log import decisions (debug level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DbArgs {
    /// SQLite database file
    #[arg(long, env = "ACTIVOS_DB", value_name = "PATH")]
    db: Option<PathBuf>,
}

#[derive(Args)]
struct FilterArgs {
    /// Substring match on codigo, nombre or serie
    #[arg(long, short = 's')]
    search: Option<String>,

    /// Exact edificio
    #[arg(long)]
    building: Option<String>,

    /// Exact nivel
    #[arg(long)]
    floor: Option<String>,

    /// Exact categoria
    #[arg(long)]
    category: Option<String>,

    /// Include soft-deleted records
    #[arg(long)]
    include_deleted: bool,
}

impl FilterArgs {
    fn into_filter(self) -> AssetFilter {
        AssetFilter {
            search: self.search,
            building: self.building,
            floor: self.floor,
            category: self.category,
            include_deleted: self.include_deleted,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update assets from a spreadsheet, matching on codigo
    #[command(after_help = "\
Examples:
  activos import inventario.xlsx
  activos import inventario.xlsx --sheet Activos --json
  activos import inventario.csv --db /srv/activos.db")]
    Import {
        /// Spreadsheet to import (xlsx, xls, xlsb, ods, csv, tsv)
        file: PathBuf,

        #[command(flatten)]
        db: DbArgs,

        /// Worksheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// When a header repeats, use its leftmost column
        #[arg(long)]
        first_wins: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an import template with the expected headers and an example row
    Template {
        /// Output file (.xlsx)
        #[arg(default_value = "plantilla_activos.xlsx")]
        output: PathBuf,
    },

    /// Export stored assets in the import layout
    #[command(after_help = "\
Examples:
  activos export activos.xlsx
  activos export piso1.csv --building 'Edificio A' --floor 'Piso 1'")]
    Export {
        /// Output file (.xlsx or .csv)
        output: PathBuf,

        #[command(flatten)]
        db: DbArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List stored assets
    List {
        #[command(flatten)]
        db: DbArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the database and its schema
    Init {
        #[command(flatten)]
        db: DbArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::load();
    init_logging(&settings, cli.verbose);

    let result = match cli.command {
        Commands::Import { file, db, sheet, first_wins, json } => {
            cmd_import(&settings, file, db, sheet, first_wins, json)
        }
        Commands::Template { output } => cmd_template(output),
        Commands::Export { output, db, filter } => cmd_export(&settings, output, db, filter),
        Commands::List { db, filter, json } => cmd_list(&settings, db, filter, json),
        Commands::Init { db } => cmd_init(&settings, db),
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

/// `RUST_LOG` wins; otherwise `-v` means debug, else the settings level.
fn init_logging(settings: &Settings, verbose: bool) {
    let level = if verbose { "debug" } else { settings.log_level.as_str() };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
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

    pub fn store(err: StoreError) -> Self {
        Self { code: EXIT_STORE, message: err.to_string(), hint: None }
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self { code: EXIT_WRITE, message: msg.into(), hint: None }
    }

    pub fn import(err: ImportError) -> Self {
        let hint = match &err {
            ImportError::EmptySheet => Some("the first row must hold the column headers".to_string()),
            ImportError::MissingRequiredColumns { .. } => {
                Some("run `activos template` for a file with the expected headers".to_string())
            }
            ImportError::SheetParseFailure(_) => None,
        };
        Self { code: import_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self { code: EXIT_ERROR, message: e.to_string(), hint: None }
    }
}

/// Database path: `--db` / `ACTIVOS_DB` (clap handles both), then settings.
fn resolve_db(settings: &Settings, db: DbArgs) -> PathBuf {
    db.db.unwrap_or_else(|| settings.db_path())
}

fn open_store(path: &Path) -> Result<SqliteStore, CliError> {
    log::debug!("opening database {}", path.display());
    SqliteStore::open(path).map_err(|e| {
        CliError::store(e).with_hint(format!("database: {}", path.display()))
    })
}

// ============================================================================
// import
// ============================================================================

fn cmd_import(
    settings: &Settings,
    file: PathBuf,
    db: DbArgs,
    sheet: Option<String>,
    first_wins: bool,
    json: bool,
) -> Result<(), CliError> {
    let sheet = sheet.or_else(|| settings.import_sheet.clone());
    let rows = read_rows(&file, sheet.as_deref())
        .map_err(|e| CliError::import(ImportError::SheetParseFailure(e)))?;

    let options = ImportOptions {
        duplicate_headers: if first_wins {
            DuplicateHeaderPolicy::FirstWins
        } else {
            settings.duplicate_headers
        },
        now: None,
    };

    // Header aborts happen before the database is opened or created
    let header = rows.first().ok_or(ImportError::EmptySheet).map_err(CliError::import)?;
    resolve_header(header, options.duplicate_headers).map_err(CliError::import)?;

    let mut store = open_store(&resolve_db(settings, db))?;
    let summary = run_import(&rows, &mut store, &options).map_err(CliError::import)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let body = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string(), hint: None })?;
        writeln!(out, "{}", body)?;
    } else {
        writeln!(out, "{}", summary.message())?;
        if summary.has_errors() {
            writeln!(out, "(run with -v for per-row reasons)")?;
        }
    }
    Ok(())
}

// ============================================================================
// template / export
// ============================================================================

fn cmd_template(output: PathBuf) -> Result<(), CliError> {
    if !is_xlsx(&output) {
        return Err(CliError::args(format!(
            "template must be an .xlsx file: {}",
            output.display()
        )));
    }
    xlsx::write_template(&output).map_err(CliError::write)?;
    eprintln!("Wrote {}", output.display());
    Ok(())
}

fn cmd_export(
    settings: &Settings,
    output: PathBuf,
    db: DbArgs,
    filter: FilterArgs,
) -> Result<(), CliError> {
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    if !matches!(ext.as_deref(), Some("xlsx" | "csv")) {
        return Err(CliError::args(format!(
            "unsupported export format: {}",
            output.display()
        ))
        .with_hint("use a .xlsx or .csv file name"));
    }

    let store = open_store(&resolve_db(settings, db))?;
    let assets = store.list(&filter.into_filter()).map_err(CliError::store)?;

    if ext.as_deref() == Some("csv") {
        activos_io::csv::export_assets(&assets, &output)
    } else {
        xlsx::export_assets(&assets, &output)
    }
    .map_err(CliError::write)?;

    eprintln!("Exported {} asset(s) to {}", assets.len(), output.display());
    Ok(())
}

fn is_xlsx(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false)
}

// ============================================================================
// list / init
// ============================================================================

fn cmd_list(
    settings: &Settings,
    db: DbArgs,
    filter: FilterArgs,
    json: bool,
) -> Result<(), CliError> {
    let store = open_store(&resolve_db(settings, db))?;
    let assets = store.list(&filter.into_filter()).map_err(CliError::store)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let body = serde_json::to_string_pretty(&assets)
            .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string(), hint: None })?;
        writeln!(out, "{}", body)?;
    } else {
        write!(out, "{}", table::render(&assets))?;
    }
    Ok(())
}

fn cmd_init(settings: &Settings, db: DbArgs) -> Result<(), CliError> {
    let path = resolve_db(settings, db);
    let store = open_store(&path)?;
    let count = store.count().map_err(CliError::store)?;
    eprintln!("Database ready: {} ({} asset(s))", path.display(), count);
    eprintln!("Settings: {}", Settings::config_path_display());
    Ok(())
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\ntarget:  ", env!("TARGET"),
    )
}
