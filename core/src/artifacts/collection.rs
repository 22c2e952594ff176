use super::{error::CollectionError, os::files::artifact::listfiles};
use crate::core::cancel_flag;
use crate::structs::{
    artifacts::os::files::FileOptions,
    toml::{Artifacts, IshinobuToml, Output},
};
use log::{error, info, warn};
use std::collections::BTreeMap;

/// Run one collector with its TOML artifact options
pub(crate) type CollectorFn = fn(&Output, &Artifacts) -> Result<(), CollectionError>;

/// Table of collector name to collector. Built once when a collection starts
pub(crate) fn collectors() -> BTreeMap<&'static str, CollectorFn> {
    let mut table: BTreeMap<&'static str, CollectorFn> = BTreeMap::new();
    table.insert("listfiles", listfiles_collector);
    table
}

/// Get a file listing. Missing options use the builtin macOS policy
fn listfiles_collector(output: &Output, artifact: &Artifacts) -> Result<(), CollectionError> {
    let default_options = FileOptions::default();
    let options = artifact.listfiles.as_ref().unwrap_or(&default_options);
    match listfiles(output, options, cancel_flag()) {
        Ok(_) => Ok(()),
        Err(err) => {
            error!("[core] Failed to get file listing: {err:?}");
            Err(CollectionError::Listfiles)
        }
    }
}

/// Run every artifact in the TOML collector. A failed or unknown artifact does not stop the collection
pub(crate) fn collect(
    collector: &IshinobuToml,
    table: &BTreeMap<&'static str, CollectorFn>,
) -> Result<(), CollectionError> {
    for artifact in &collector.artifacts {
        let run = match table.get(artifact.artifact_name.as_str()) {
            Some(result) => result,
            None => {
                warn!("[core] Unknown artifact {}", artifact.artifact_name);
                continue;
            }
        };

        match run(&collector.output, artifact) {
            Ok(_) => info!("[core] Collected {}", artifact.artifact_name),
            Err(err) => error!("[core] Failed to parse {}: {err:?}", artifact.artifact_name),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{collect, collectors};
    use crate::structs::toml::{Artifacts, IshinobuToml, Output};

    #[test]
    fn test_collectors() {
        let table = collectors();
        assert!(table.contains_key("listfiles"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_collect_unknown_artifact() {
        let temp = tempfile::tempdir().unwrap();
        let collector = IshinobuToml {
            output: Output {
                name: String::from("collect_test"),
                directory: temp.path().display().to_string(),
                format: String::from("jsonl"),
                compress: false,
                logging: None,
            },
            artifacts: vec![Artifacts {
                artifact_name: String::from("safari"),
                listfiles: None,
            }],
        };

        collect(&collector, &collectors()).unwrap();
        assert!(!temp.path().join("collect_test").exists());
    }
}
