//! Reading definition documents.
//!
//! Documents are JSON unless the file extension says YAML; both parse into
//! the same shapes.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

use crate::error::{Error, Result};

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read and parse a whole document.
///
/// An unreadable file is an I/O error; an empty or malformed one is a parse error.
pub fn read_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;

    if content.trim().is_empty() {
        return Err(Error::parse(format!("{} is empty", path.display())));
    }

    match Format::from_path(path) {
        Format::Json => serde_json::from_str(&content)
            .map_err(|e| Error::parse(format!("{} (JSON): {}", path.display(), e))),
        Format::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| Error::parse(format!("{} (YAML): {}", path.display(), e))),
    }
}

/// Read the list stored under `key` in a document's top-level object.
///
/// A missing or null key yields an empty list. A root that is not an object
/// is a configuration error.
pub fn read_collection<T: DeserializeOwned>(path: &Path, key: &str) -> Result<Vec<T>> {
    let mut root = read_value(path)?;

    let object = root.as_object_mut().ok_or_else(|| {
        Error::config(format!("{}: expected an object with a '{}' key", path.display(), key))
    })?;

    let entries = match object.remove(key) {
        Some(Value::Null) | None => {
            tracing::debug!(path = %path.display(), key = key, "Key missing, treating as empty");
            return Ok(Vec::new());
        }
        Some(entries) => entries,
    };

    serde_json::from_value(entries)
        .map_err(|e| Error::parse(format!("{}: invalid '{}' entries: {}", path.display(), key, e)))
}

/// Read a document whose root is itself a list.
pub fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let root = read_value(path)?;

    if !root.is_array() {
        return Err(Error::parse(format!("{}: expected a list", path.display())));
    }

    serde_json::from_value(root).map_err(|e| Error::parse(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize)]
    struct Item {
        id: u32,
    }

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_key_is_empty() {
        let file = write_temp(".json", r#"{"other": []}"#);
        let items: Vec<Item> = read_collection(file.path(), "items").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_reads_key() {
        let file = write_temp(".json", r#"{"items": [{"id": 1}, {"id": 2}]}"#);
        let items: Vec<Item> = read_collection(file.path(), "items").unwrap();
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_yaml_by_extension() {
        let file = write_temp(".yaml", "items:\n  - id: 7\n");
        let items: Vec<Item> = read_collection(file.path(), "items").unwrap();
        assert_eq!(items[0].id, 7);
    }

    #[test]
    fn test_empty_document_is_parse_error() {
        let file = write_temp(".json", "  \n");
        let err = read_collection::<Item>(file.path(), "items").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let file = write_temp(".json", "{\"items\": [");
        let err = read_collection::<Item>(file.path(), "items").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_non_object_root_is_config_error() {
        let file = write_temp(".json", "[1, 2]");
        let err = read_collection::<Item>(file.path(), "items").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let err = read_value(Path::new("/nonexistent/crewkit/doc.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("/nonexistent/crewkit/doc.json"));
    }

    #[test]
    fn test_read_list_requires_array() {
        let file = write_temp(".json", r#"{"id": 1}"#);
        assert!(matches!(read_list::<Item>(file.path()), Err(Error::Parse(_))));

        let file = write_temp(".json", r#"[{"id": 3}]"#);
        assert_eq!(read_list::<Item>(file.path()).unwrap()[0].id, 3);
    }
}
