//! JSON-backed user record cache
//!
//! The cache is a flat JSON object mapping user identifiers to arbitrary
//! JSON values, persisted wholesale at a caller-supplied path. There is no
//! eviction, expiry, or indexing: every load re-reads the file from disk and
//! every save overwrites the whole document. Concurrent writers racing on the
//! same path are last-writer-wins; callers that need stronger guarantees must
//! serialize access themselves.

use crate::error::{StashError, StashResult};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// In-memory snapshot of the on-disk cache document.
///
/// Keys are held in sorted order, so saves are deterministic.
pub type Cache = Map<String, Value>;

/// Load the cache document at `path`.
///
/// Reads the whole file into memory and parses it as a JSON object. Fails
/// with [`StashError::ReadFailed`] when the file is missing or unreadable,
/// [`StashError::InvalidJson`] when it does not parse, and
/// [`StashError::NotAnObject`] when the top-level value is not an object.
pub fn load_cache(path: &Path) -> StashResult<Cache> {
    let content = fs::read_to_string(path).map_err(|source| StashError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value =
        serde_json::from_str(&content).map_err(|source| StashError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StashError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Overwrite the cache document at `path` with `cache`.
///
/// Serializes through a real JSON encoder (pretty-printed), so anything
/// saved here reloads through [`load_cache`] unchanged.
pub fn save_cache(path: &Path, cache: &Cache) -> StashResult<()> {
    let json = serde_json::to_string_pretty(cache).map_err(StashError::SerializeFailed)?;

    fs::write(path, json).map_err(|source| StashError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Fetch the record for `user_id` from a loaded cache.
///
/// Fails with [`StashError::UserNotFound`] when the key is absent; there is
/// no default-value option.
pub fn get_user_data<'a>(cache: &'a Cache, user_id: &str) -> StashResult<&'a Value> {
    cache.get(user_id).ok_or_else(|| StashError::UserNotFound {
        user_id: user_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");

        let mut cache = Cache::new();
        cache.insert("alice".to_string(), json!({"age": 30, "tags": ["a", "b"]}));
        cache.insert("bob".to_string(), json!([1, 2, 3]));
        cache.insert("unicode".to_string(), json!("héllo wörld ✓"));

        save_cache(&path, &cache).unwrap();
        let reloaded = load_cache(&path).unwrap();

        assert_eq!(reloaded, cache);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("does_not_exist.json");

        let err = load_cache(&path).unwrap_err();
        assert!(matches!(err, StashError::ReadFailed { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        std::fs::write(&path, "{not valid json").unwrap();

        let err = load_cache(&path).unwrap_err();
        assert!(matches!(err, StashError::InvalidJson { .. }));
    }

    #[test]
    fn test_load_non_object_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = load_cache(&path).unwrap_err();
        assert!(matches!(err, StashError::NotAnObject { .. }));
    }

    #[test]
    fn test_load_rereads_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");

        let mut cache = Cache::new();
        cache.insert("k".to_string(), json!(1));
        save_cache(&path, &cache).unwrap();
        assert_eq!(load_cache(&path).unwrap().len(), 1);

        cache.insert("k2".to_string(), json!(2));
        save_cache(&path, &cache).unwrap();
        assert_eq!(load_cache(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_get_user_data_found() {
        let mut cache = Cache::new();
        cache.insert("x".to_string(), json!(1));

        let value = get_user_data(&cache, "x").unwrap();
        assert_eq!(value, &json!(1));
    }

    #[test]
    fn test_get_user_data_missing() {
        let cache = Cache::new();

        let err = get_user_data(&cache, "x").unwrap_err();
        match err {
            StashError::UserNotFound { user_id } => assert_eq!(user_id, "x"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
