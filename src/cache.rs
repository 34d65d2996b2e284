//! Deployment payload cache
//!
//! Persists prepared deployment payloads so repeat requests skip the whole
//! forge pipeline. Entries are keyed by the contract-source hash and expire
//! after a fixed TTL. The cache is a single JSON file in the data directory,
//! written atomically via a temp file and rename.

use crate::contract::ContractData;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Cache errors
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// A single cached payload with its expiry timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct CacheEntry {
    data: ContractData,
    expires_at: DateTime<Utc>,
}

/// File-backed payload cache with per-entry TTL.
pub struct PayloadCache {
    data_dir: PathBuf,
    ttl_secs: u64,
}

impl PayloadCache {
    /// Create a cache rooted at the given data directory.
    pub fn new(data_dir: PathBuf, ttl_secs: u64) -> Result<Self, CacheError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir, ttl_secs })
    }

    fn cache_path(&self) -> PathBuf {
        self.data_dir.join("payload_cache.json")
    }

    fn load_entries(&self) -> Result<HashMap<String, CacheEntry>, CacheError> {
        let path = self.cache_path();
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save_entries(&self, entries: &HashMap<String, CacheEntry>) -> Result<(), CacheError> {
        // Write to temporary file first, then atomic rename
        let temp_path = self.data_dir.join("payload_cache.tmp");
        fs::write(&temp_path, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&temp_path, self.cache_path())?;
        Ok(())
    }

    /// Look up a payload; expired entries read as misses.
    pub fn get(&self, key: &str) -> Result<Option<ContractData>, CacheError> {
        let entries = self.load_entries()?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Utc::now() => Ok(Some(entry.data.clone())),
            _ => Ok(None),
        }
    }

    /// Store a payload under the given key with the configured TTL.
    pub fn store(&self, key: &str, data: &ContractData) -> Result<(), CacheError> {
        let mut entries = self.load_entries()?;
        entries.retain(|_, e| e.expires_at > Utc::now());
        entries.insert(
            key.to_string(),
            CacheEntry {
                data: data.clone(),
                expires_at: Utc::now() + ChronoDuration::seconds(self.ttl_secs as i64),
            },
        );
        self.save_entries(&entries)
    }

    /// Drop all cached payloads.
    pub fn clear(&self) -> Result<(), CacheError> {
        let path = self.cache_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> ContractData {
        ContractData {
            contract_data_value: "0x9c4d535bdeadbeef".to_string(),
        }
    }

    #[test]
    fn test_store_and_get() {
        let temp_dir = tempfile::tempdir().unwrap();
        let cache = PayloadCache::new(temp_dir.path().to_path_buf(), 720_000).unwrap();

        assert!(cache.get("counter_contract_abc").unwrap().is_none());

        cache.store("counter_contract_abc", &sample_data()).unwrap();
        let hit = cache.get("counter_contract_abc").unwrap();
        assert_eq!(hit, Some(sample_data()));
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let temp_dir = tempfile::tempdir().unwrap();
        let cache = PayloadCache::new(temp_dir.path().to_path_buf(), 0).unwrap();

        cache.store("counter_contract_abc", &sample_data()).unwrap();
        assert!(cache.get("counter_contract_abc").unwrap().is_none());
    }

    #[test]
    fn test_survives_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();

        {
            let cache = PayloadCache::new(temp_dir.path().to_path_buf(), 720_000).unwrap();
            cache.store("counter_contract_abc", &sample_data()).unwrap();
        }

        let cache = PayloadCache::new(temp_dir.path().to_path_buf(), 720_000).unwrap();
        assert_eq!(cache.get("counter_contract_abc").unwrap(), Some(sample_data()));
    }

    #[test]
    fn test_clear() {
        let temp_dir = tempfile::tempdir().unwrap();
        let cache = PayloadCache::new(temp_dir.path().to_path_buf(), 720_000).unwrap();

        cache.store("counter_contract_abc", &sample_data()).unwrap();
        cache.clear().unwrap();
        assert!(cache.get("counter_contract_abc").unwrap().is_none());
    }
}
