// JSON persistence helpers.
// Atomic writes via temp file and tolerant reads for missing files.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::Result;

/// Wrapper for persisted data with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persisted<T> {
    pub data: T,
    /// When the data was written.
    pub saved_at: DateTime<Utc>,
}

impl<T> Persisted<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            saved_at: Utc::now(),
        }
    }
}

/// Read persisted JSON data from a file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<Persisted<T>>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let persisted: Persisted<T> = serde_json::from_str(&contents)?;
    Ok(Some(persisted))
}

/// Write data as JSON.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let persisted = Persisted::new(data);
    let json = serde_json::to_string_pretty(&persisted)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_write_and_read_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json(&path, &data).unwrap();
        assert!(!path.with_extension("tmp").exists());

        let persisted: Option<Persisted<TestData>> = read_json(&path).unwrap();
        assert_eq!(persisted.unwrap().data, data);
    }

    #[test]
    fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let persisted: Option<Persisted<TestData>> = read_json(&path).unwrap();
        assert!(persisted.is_none());
    }

    #[test]
    fn test_read_corrupt_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.json");
        fs::write(&path, "{not json").unwrap();

        assert!(read_json::<TestData>(&path).is_err());
    }
}
