use super::error::IshinobuError;
use crate::structs::toml::IshinobuToml;
use log::error;
use std::str::from_utf8;

impl IshinobuToml {
    /// Parse the ishinobu TOML collector file
    pub(crate) fn parse_ishinobu_toml(toml_data: &[u8]) -> Result<IshinobuToml, IshinobuError> {
        let toml_results = toml::from_str(from_utf8(toml_data).unwrap_or_default());
        let mut collector: IshinobuToml = match toml_results {
            Ok(results) => results,
            Err(err) => {
                error!("[core] ishinobu failed to parse TOML data. Error: {err:?}");
                return Err(IshinobuError::BadToml);
            }
        };

        // Format is always lowercase
        collector.output.format = collector.output.format.to_lowercase();
        Ok(collector)
    }
}
