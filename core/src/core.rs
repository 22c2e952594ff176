use crate::artifacts::collection::{collect, collectors};
use crate::{error::TomlError, structs::toml::IshinobuToml, utils::logging::create_log_file};
use log::{error, info};
use simplelog::{Config, WriteLogger};
use std::{
    fs::read,
    sync::atomic::{AtomicBool, Ordering},
};

/// Set once a stop is requested. Checked by running collectors
static CANCEL: AtomicBool = AtomicBool::new(false);

/// Request that a running collection stop. Output already written is kept and finished.
/// Safe to call from a signal handler thread
pub fn cancel_collection() {
    CANCEL.store(true, Ordering::SeqCst);
}

/// Cancellation flag shared with collectors
pub(crate) fn cancel_flag() -> &'static AtomicBool {
    &CANCEL
}

/// Parse a TOML file at provided path
pub fn parse_toml_file(path: &str) -> Result<(), TomlError> {
    let buffer = match read(path) {
        Ok(results) => results,
        Err(err) => {
            error!("[core] Could not read TOML file {path}: {err:?}");
            return Err(TomlError::NoFile);
        }
    };
    parse_toml_data(&buffer)
}

/// Parse an already read TOML file
pub fn parse_toml_data(data: &[u8]) -> Result<(), TomlError> {
    let collection = match IshinobuToml::parse_ishinobu_toml(data) {
        Ok(results) => results,
        Err(_) => {
            return Err(TomlError::BadToml);
        }
    };
    ishinobu_collection(&collection)
}

/// Setup logging and run every artifact in the collection
pub fn ishinobu_collection(collection: &IshinobuToml) -> Result<(), TomlError> {
    if let Ok((log_file, level)) = create_log_file(&collection.output) {
        let _ = WriteLogger::init(level, Config::default(), log_file);
    }

    let table = collectors();
    match collect(collection, &table) {
        Ok(_) => info!("[core] Core parsed TOML data"),
        Err(err) => {
            error!("[core] Core failed to parse collection: {err:?}");
            return Err(TomlError::Collection);
        }
    }
    Ok(())
}
