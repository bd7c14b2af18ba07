//! Load a JSON document list into a table, sort it and print an export.
//!
//! ```text
//! vault-table-cli <documents.json> [sort-field|none] [asc|desc] [json|csv]
//! ```

mod paths;

use std::fs::{self, File};
use std::process::ExitCode;

use log::{info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};
use vault_table::{
    Document, ExportFormat, SortField, SortOrder, TableCore, TableError, TableOptions,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("usage: vault-table-cli <documents.json> [sort-field|none] [asc|desc] [json|csv]")]
    Usage,

    #[error("Unknown sort order '{0}' (expected asc or desc)")]
    BadOrder(String),

    #[error("Failed to read documents: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse documents: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Table(#[from] TableError),
}

fn parse_order(raw: &str) -> Result<SortOrder, CliError> {
    match raw {
        "asc" => Ok(SortOrder::Asc),
        "desc" => Ok(SortOrder::Desc),
        other => Err(CliError::BadOrder(other.to_string())),
    }
}

fn run(args: &[String]) -> Result<String, CliError> {
    let [path, rest @ ..] = args else {
        return Err(CliError::Usage);
    };

    let documents: Vec<Document> = serde_json::from_str(&fs::read_to_string(path)?)?;
    info!("Loaded {} documents from {}", documents.len(), path);

    let mut table = TableCore::new(documents, TableOptions::default());

    match rest.first().map(String::as_str) {
        Some("none") => table.clear_sorting(),
        Some(field) => {
            let order = rest.get(1).map(|raw| parse_order(raw)).transpose()?;
            table.set_sorting(Some(SortField::from(field)), order);
        }
        None => {}
    }

    let format = match rest.get(2) {
        Some(raw) => raw.parse::<ExportFormat>()?,
        None => ExportFormat::Json,
    };

    table.select_all();
    Ok(table.export_selected_rows(format)?)
}

fn main() -> ExitCode {
    let log_path = paths::log_file();
    match File::create(&log_path) {
        Ok(log_file) => {
            if WriteLogger::init(LevelFilter::Debug, Config::default(), log_file).is_err() {
                eprintln!("Failed to initialize logger");
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", log_path.display(), e),
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            warn!("Export failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
