use super::artifacts::os::files::FileOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct IshinobuToml {
    pub output: Output,
    pub artifacts: Vec<Artifacts>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Output {
    /**Name of the collection. Output is written to `directory/name` */
    pub name: String,
    pub directory: String,
    /**`jsonl` or `csv` */
    pub format: String,
    pub compress: bool,
    /**Log level: `error`, `warn`, `info`, or `debug`. Default is `warn` */
    pub logging: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Artifacts {
    /**Name of the collector to run */
    pub artifact_name: String,
    pub listfiles: Option<FileOptions>,
}
