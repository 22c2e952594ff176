use super::commands::Commands;
use ishinobu_core::{
    core::ishinobu_collection,
    error::TomlError,
    structs::{
        artifacts::os::files::FileOptions,
        toml::{Artifacts, IshinobuToml, Output},
    },
};

/// Build a collection from the command line options
pub(crate) fn setup_collection(command: &Commands) -> IshinobuToml {
    match command {
        Commands::Listfiles {
            root,
            workers,
            max_size,
            format,
            directory,
            name,
            compress,
        } => {
            let options = FileOptions {
                roots: if root.is_empty() {
                    None
                } else {
                    Some(root.clone())
                },
                max_size: Some(*max_size),
                workers: Some(*workers),
                ..Default::default()
            };

            IshinobuToml {
                output: Output {
                    name: name.to_string(),
                    directory: directory.to_string(),
                    format: format.to_lowercase(),
                    compress: *compress,
                    logging: Some(String::from("warn")),
                },
                artifacts: vec![Artifacts {
                    artifact_name: String::from("listfiles"),
                    listfiles: Some(options),
                }],
            }
        }
    }
}

/// Run the collector for the provided subcommand
pub(crate) fn run_collector(command: &Commands) -> Result<(), TomlError> {
    let collection = setup_collection(command);
    println!(
        "[ishinobu] Writing output to: {}/{}",
        collection.output.directory, collection.output.name
    );
    ishinobu_collection(&collection)
}
