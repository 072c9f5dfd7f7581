//! Reading entity stream exports.
//!
//! Two layouts are accepted:
//! - `.jsonl`: one document per line, blank lines ignored
//! - anything else: a JSON array of documents, or `{"documents": [...]}`

use super::{EntityId, EntityRecord, StreamConfig};
use crate::debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid JSON in `{path}`")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid JSON in `{path}` at line {line}")]
    JsonLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{path}`: expected an array of documents")]
    Shape { path: PathBuf },

    #[error("`{path}`: document #{index} has no `id`")]
    MissingId { path: PathBuf, index: usize },

    #[error("`{path}`: document #{index} (id `{id}`) does not match the record shape")]
    Record {
        path: PathBuf,
        index: usize,
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load every document from a stream export.
///
/// `stream` is only used to report declared fields that the export lacks.
pub fn load_stream(path: &Path, stream: &StreamConfig) -> Result<Vec<EntityRecord>, StreamError> {
    let content = fs::read_to_string(path).map_err(|e| StreamError::Io(path.to_path_buf(), e))?;

    let documents = if path.extension().is_some_and(|ext| ext == "jsonl") {
        parse_lines(path, &content)?
    } else {
        parse_array(path, &content)?
    };

    documents
        .into_iter()
        .enumerate()
        .map(|(index, document)| into_record(path, index, document, stream))
        .collect()
}

fn parse_lines(path: &Path, content: &str) -> Result<Vec<Value>, StreamError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| StreamError::JsonLine {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })
        })
        .collect()
}

fn parse_array(path: &Path, content: &str) -> Result<Vec<Value>, StreamError> {
    let value: Value = serde_json::from_str(content).map_err(|source| StreamError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("documents") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(StreamError::Shape {
                path: path.to_path_buf(),
            }),
        },
        _ => Err(StreamError::Shape {
            path: path.to_path_buf(),
        }),
    }
}

fn into_record(
    path: &Path,
    index: usize,
    document: Value,
    stream: &StreamConfig,
) -> Result<EntityRecord, StreamError> {
    let id = match document.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => EntityId::from_number(n).as_str().to_string(),
        _ => {
            return Err(StreamError::MissingId {
                path: path.to_path_buf(),
                index,
            });
        }
    };

    let missing = stream.missing_fields(&document);
    if !missing.is_empty() {
        debug!("stream"; "document `{}` lacks {}", id, missing.join(", "));
    }

    serde_json::from_value(document).map_err(|source| StreamError::Record {
        path: path.to_path_buf(),
        index,
        id,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json_array() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "stream.json",
            r#"[{"id": "42", "slug": "widgets", "name": "Widgets"}, {"id": 7, "name": "Gears"}]"#,
        );
        let records = load_stream(&path, &StreamConfig::category()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].slug.as_deref(), Some("widgets"));
        assert_eq!(records[1].id.as_str(), "7");
    }

    #[test]
    fn test_load_documents_wrapper() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "stream.json", r#"{"documents": [{"id": "1"}]}"#);
        assert_eq!(load_stream(&path, &StreamConfig::category()).unwrap().len(), 1);
    }

    #[test]
    fn test_load_jsonl_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "stream.jsonl", "{\"id\": \"1\"}\n\n{\"id\": \"2\"}\n");
        let records = load_stream(&path, &StreamConfig::category()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_jsonl_error_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "stream.jsonl", "{\"id\": \"1\"}\n{broken\n");
        let err = load_stream(&path, &StreamConfig::category()).unwrap_err();
        assert!(matches!(err, StreamError::JsonLine { line: 2, .. }));
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "stream.json", r#"[{"id": "1"}, {"name": "No id"}]"#);
        let err = load_stream(&path, &StreamConfig::category()).unwrap_err();
        assert!(matches!(err, StreamError::MissingId { index: 1, .. }));
        assert!(err.to_string().contains("document #1"));
    }

    #[test]
    fn test_scalar_root_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "stream.json", "42");
        let err = load_stream(&path, &StreamConfig::category()).unwrap_err();
        assert!(matches!(err, StreamError::Shape { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_stream(Path::new("/no/such/stream.json"), &StreamConfig::category())
            .unwrap_err();
        assert!(matches!(err, StreamError::Io(..)));
    }
}
