//! JSON loading for builder inputs
//!
//! Reads a package.json-shaped manifest and a lock table already flattened to
//! a `{"name@range": entry}` JSON object. Parsing a lockfile's own text format
//! is left to whatever produced that object.

use camino::Utf8Path;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{LockgraphError, LockgraphResult};
use crate::types::{LockTable, Manifest};

/// Parse JSON string to a Manifest
pub fn parse_manifest(content: &str) -> LockgraphResult<Manifest> {
    parse_json(content)
}

/// Parse JSON string to a LockTable
pub fn parse_lock_table(content: &str) -> LockgraphResult<LockTable> {
    parse_json(content)
}

/// Serialize a LockTable to pretty JSON
pub fn serialize_lock_table(table: &LockTable) -> LockgraphResult<String> {
    serde_json::to_string_pretty(table).map_err(|e| LockgraphError::JsonParse {
        message: format!("JSON serialization error: {}", e),
    })
}

/// Load and parse a manifest from file path
pub async fn load_manifest(path: &Utf8Path) -> LockgraphResult<Manifest> {
    load_json(path).await
}

/// Load and parse a lock table from file path
pub async fn load_lock_table(path: &Utf8Path) -> LockgraphResult<LockTable> {
    let table: LockTable = load_json(path).await?;
    debug!(path = %path, entries = table.len(), "loaded lock table");
    Ok(table)
}

fn parse_json<T: DeserializeOwned>(content: &str) -> LockgraphResult<T> {
    serde_json::from_str(content).map_err(|e| LockgraphError::JsonParse {
        message: format!("JSON parsing error: {}", e),
    })
}

async fn load_json<T: DeserializeOwned>(path: &Utf8Path) -> LockgraphResult<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LockgraphError::io(format!("Failed to read {}", path), e))?;

    parse_json(&content).map_err(|e| match e {
        LockgraphError::JsonParse { message } => LockgraphError::JsonParse {
            message: format!("In file {}: {}", path, message),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_parse_manifest() {
        let manifest = parse_manifest(
            r#"{ "name": "app", "dependencies": { "a": "^1.0.0" }, "scripts": { "x": "y" } }"#,
        )
        .unwrap();
        assert_eq!(manifest.name, "app");
        assert_eq!(manifest.dependencies["a"], "^1.0.0");
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_lock_table("{ not json").unwrap_err();
        assert!(matches!(err, LockgraphError::JsonParse { .. }));
        assert!(err.to_string().contains("JSON parsing error"));
    }

    #[test]
    fn test_lock_table_round_trip() {
        let json = r#"{ "a@^1.0.0": { "version": "1.0.1", "dependencies": { "b": "^2.0.0" } } }"#;
        let table = parse_lock_table(json).unwrap();
        let reparsed = parse_lock_table(&serialize_lock_table(&table).unwrap()).unwrap();
        assert_eq!(table, reparsed);
    }

    #[tokio::test]
    async fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();

        let manifest_path = root.join("package.json");
        tokio::fs::write(&manifest_path, r#"{ "name": "app", "dependencies": { "a": "^1.0.0" } }"#)
            .await
            .unwrap();
        let lock_path = root.join("yarn.lock.json");
        tokio::fs::write(&lock_path, r#"{ "a@^1.0.0": { "version": "1.0.1" } }"#)
            .await
            .unwrap();

        let manifest = load_manifest(&manifest_path).await.unwrap();
        let table = load_lock_table(&lock_path).await.unwrap();
        assert_eq!(manifest.name, "app");
        assert_eq!(table.get("a", "^1.0.0").unwrap().version, "1.0.1");
    }

    #[tokio::test]
    async fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();

        let missing = root.join("missing.json");
        let err = load_manifest(&missing).await.unwrap_err();
        assert!(matches!(err, LockgraphError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));

        let broken = root.join("broken.json");
        tokio::fs::write(&broken, "{").await.unwrap();
        let err = load_lock_table(&broken).await.unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
