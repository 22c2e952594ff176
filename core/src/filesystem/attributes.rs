/**
 * Read the extended attributes macOS attaches to downloaded files
 *   `com.apple.quarantine` - Gatekeeper quarantine flags, timestamp, agent, and event UUID
 *   `com.apple.metadata:kMDItemWhereFroms` - Binary plist array of download URLs
 *   `com.apple.metadata:kMDItemDownloadedDate` - Binary plist array containing the download date
 *
 * Attributes are best effort. Any failure returns `None`
 */
use crate::utils::time::systemtime_to_iso;
use log::debug;
use plist::Value;
use std::io::Cursor;
use std::path::Path;
use std::time::SystemTime;

const QUARANTINE: &str = "com.apple.quarantine";
const WHERE_FROMS: &str = "com.apple.metadata:kMDItemWhereFroms";
const DOWNLOADED_DATE: &str = "com.apple.metadata:kMDItemDownloadedDate";

#[derive(Debug, Default, PartialEq)]
pub(crate) struct DownloadAttributes {
    pub(crate) quarantine: Option<String>,
    pub(crate) where_from: Vec<String>,
    pub(crate) downloaded_date: Option<String>,
}

/// Get download provenance attributes for a path
pub(crate) fn download_attributes(path: &Path) -> DownloadAttributes {
    DownloadAttributes {
        quarantine: get_attribute(path, QUARANTINE).map(|data| quarantine_value(&data)),
        where_from: get_attribute(path, WHERE_FROMS)
            .map(|data| where_from_values(&data))
            .unwrap_or_default(),
        downloaded_date: get_attribute(path, DOWNLOADED_DATE)
            .and_then(|data| downloaded_date_value(&data)),
    }
}

#[cfg(target_family = "unix")]
/// Read an extended attribute without following symlinks
fn get_attribute(path: &Path, name: &str) -> Option<Vec<u8>> {
    match xattr::get(path, name) {
        Ok(result) => result,
        Err(err) => {
            debug!(
                "[listfiles] Could not read attribute {name} for {}: {err:?}",
                path.display()
            );
            None
        }
    }
}

#[cfg(not(target_family = "unix"))]
fn get_attribute(_path: &Path, _name: &str) -> Option<Vec<u8>> {
    None
}

/// Quarantine data is a plain string. Ex: `0083;65a1b2c3;Safari;1B2C3D4E-...`
fn quarantine_value(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .trim_end_matches('\0')
        .to_string()
}

/// WhereFroms is a plist array of strings (URL of the file, then the referring page)
fn where_from_values(data: &[u8]) -> Vec<String> {
    let value = match Value::from_reader(Cursor::new(data)) {
        Ok(result) => result,
        Err(err) => {
            debug!("[listfiles] Could not parse WhereFroms plist: {err:?}");
            return Vec::new();
        }
    };

    let mut values = Vec::new();
    if let Some(entries) = value.as_array() {
        for entry in entries {
            if let Some(url) = entry.as_string() {
                values.push(url.to_string());
            }
        }
    } else if let Some(url) = value.as_string() {
        values.push(url.to_string());
    }
    values
}

/// DownloadedDate is a plist array with a single date
fn downloaded_date_value(data: &[u8]) -> Option<String> {
    let value = match Value::from_reader(Cursor::new(data)) {
        Ok(result) => result,
        Err(err) => {
            debug!("[listfiles] Could not parse DownloadedDate plist: {err:?}");
            return None;
        }
    };

    let date = match &value {
        Value::Array(entries) => entries.first().and_then(Value::as_date),
        _ => value.as_date(),
    }?;
    Some(systemtime_to_iso(SystemTime::from(date)))
}

#[cfg(test)]
mod tests {
    use super::{
        download_attributes, downloaded_date_value, quarantine_value, where_from_values,
        DownloadAttributes,
    };
    use plist::{Date, Value};
    use std::time::{Duration, UNIX_EPOCH};

    fn binary_plist(value: &Value) -> Vec<u8> {
        let mut data = Vec::new();
        value.to_writer_binary(&mut data).unwrap();
        data
    }

    #[test]
    fn test_quarantine_value() {
        let data = b"0083;65a1b2c3;Safari;1B2C3D4E-0000-0000-0000-000000000000\0";
        assert_eq!(
            quarantine_value(data),
            "0083;65a1b2c3;Safari;1B2C3D4E-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_where_from_values() {
        let value = Value::Array(vec![
            Value::String(String::from("https://example.com/installer.dmg")),
            Value::String(String::from("https://example.com/download")),
        ]);
        let result = where_from_values(&binary_plist(&value));
        assert_eq!(result.len(), 2);
        assert_eq!(result[0], "https://example.com/installer.dmg");
        assert_eq!(result[1], "https://example.com/download");
    }

    #[test]
    fn test_where_from_bad_data() {
        assert!(where_from_values(b"not a plist").is_empty());
    }

    #[test]
    fn test_downloaded_date_value() {
        let date = Date::from(UNIX_EPOCH + Duration::from_secs(1577836800));
        let value = Value::Array(vec![Value::Date(date)]);
        let result = downloaded_date_value(&binary_plist(&value)).unwrap();
        assert_eq!(result, "2020-01-01T00:00:00Z");
    }

    #[test]
    fn test_download_attributes_plain_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("plain.txt");
        std::fs::write(&path, b"nothing downloaded").unwrap();

        let result = download_attributes(&path);
        assert_eq!(result, DownloadAttributes::default());
    }
}
