use super::{error::IshinobuError, uuid::generate_uuid};
use crate::structs::toml::Output;
use log::{error, LevelFilter};
use std::{
    fs::{create_dir_all, File, OpenOptions},
    io::Write,
};

/// Create log output file and logging level based on TOML `Output` configuration
pub(crate) fn create_log_file(output: &Output) -> Result<(File, LevelFilter), IshinobuError> {
    let path = format!("{}/{}", output.directory, output.name);
    let result = create_dir_all(&path);
    match result {
        Ok(_) => {}
        Err(err) => {
            error!("[core] Failed to create logging output directory for {path}. Error: {err:?}");
            return Err(IshinobuError::CreateDirectory);
        }
    }

    let output_result = File::create(format!("{path}/{}.log", generate_uuid()));
    let log_file = match output_result {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Failed to create log file at {path}. Error: {err:?}");
            return Err(IshinobuError::LogFile);
        }
    };

    Ok((log_file, log_level(output)))
}

/// Map the TOML logging option to a `LevelFilter`. Default is warn
fn log_level(output: &Output) -> LevelFilter {
    match output.logging.as_deref().map(str::to_lowercase).as_deref() {
        Some("error") => LevelFilter::Error,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        _ => LevelFilter::Warn,
    }
}

/// Create and update a simple `status.log` file to track our output data
pub(crate) fn collection_status(
    artifact_name: &str,
    output: &Output,
    output_file: &str,
) -> Result<(), IshinobuError> {
    let path = format!("{}/{}", output.directory, output.name);
    let result = create_dir_all(&path);
    match result {
        Ok(_) => {}
        Err(err) => {
            error!("[core] Failed to create status output directory for {path}. Error: {err:?}");
            return Err(IshinobuError::CreateDirectory);
        }
    }

    let status_result = OpenOptions::new()
        .append(true)
        .create(true)
        .open(format!("{path}/status.log"));

    let mut status = match status_result {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Failed to open or create status.log at {path}. Error: {err:?}");
            return Err(IshinobuError::LogFile);
        }
    };

    // Ex: listfiles:listfiles.jsonl.gz
    let status_message = format!("{artifact_name}:{output_file}\n");
    if let Err(err) = status.write_all(status_message.as_bytes()) {
        error!("[core] Failed to update status.log at {path}. Error: {err:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{collection_status, create_log_file, log_level};
    use crate::structs::toml::Output;
    use log::LevelFilter;
    use std::fs::read_to_string;

    fn output_options(directory: &str, logging: Option<&str>) -> Output {
        Output {
            name: String::from("logging_test"),
            directory: directory.to_string(),
            format: String::from("jsonl"),
            compress: false,
            logging: logging.map(str::to_string),
        }
    }

    #[test]
    fn test_create_log_file() {
        let temp = tempfile::tempdir().unwrap();
        let output = output_options(&temp.path().display().to_string(), Some("DEBUG"));

        let (_, level) = create_log_file(&output).unwrap();
        assert_eq!(level, LevelFilter::Debug);

        let entries = std::fs::read_dir(temp.path().join("logging_test"))
            .unwrap()
            .count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(&output_options("./tmp", None)), LevelFilter::Warn);
        assert_eq!(
            log_level(&output_options("./tmp", Some("error"))),
            LevelFilter::Error
        );
        assert_eq!(
            log_level(&output_options("./tmp", Some("verbose"))),
            LevelFilter::Warn
        );
    }

    #[test]
    fn test_collection_status() {
        let temp = tempfile::tempdir().unwrap();
        let output = output_options(&temp.path().display().to_string(), None);

        collection_status("listfiles", &output, "listfiles.jsonl").unwrap();
        collection_status("listfiles", &output, "listfiles.csv").unwrap();

        let status = read_to_string(temp.path().join("logging_test/status.log")).unwrap();
        assert_eq!(status, "listfiles:listfiles.jsonl\nlistfiles:listfiles.csv\n");
    }
}
