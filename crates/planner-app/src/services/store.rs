//! Local JSON store for saved strategies, tab records and the export count.
//!
//! The whole store is a single JSON document. Writes go through an
//! exclusive file lock so two planner processes never interleave.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planner_core::prelude::*;
use planner_core::{ContentStrategyPlanOutput, StrategyConfig};

pub const STORE_FILENAME: &str = "store.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedStrategy {
    pub id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub config: StrategyConfig,
    pub plan: ContentStrategyPlanOutput,
}

/// A record created by a save-to-tab action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    pub id: String,
    pub kind: String,
    pub user_id: String,
    pub saved_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoreData {
    saved_strategies: Vec<SavedStrategy>,
    strategy_export_count: u32,
    tab_records: Vec<TabRecord>,
}

#[derive(Debug)]
pub struct PlannerStore {
    /// `None` keeps everything in memory
    path: Option<PathBuf>,
    max_saved: usize,
    data: Mutex<StoreData>,
}

impl PlannerStore {
    /// Open (or create) the store in `dir`.
    ///
    /// An unreadable or corrupt file is logged and replaced by an empty
    /// store on the next write.
    pub fn open(dir: &Path, max_saved: usize) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| Error::storage(dir, e.to_string()))?;
        let path = dir.join(STORE_FILENAME);

        let data = if path.exists() {
            match std::fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|s| serde_json::from_str::<StoreData>(&s).map_err(Error::from))
            {
                Ok(data) => data,
                Err(e) => {
                    warn!("Ignoring unreadable store {:?}: {}", path, e);
                    StoreData::default()
                }
            }
        } else {
            StoreData::default()
        };

        debug!(
            "Opened store {:?}: {} saved strategies, {} exports",
            path,
            data.saved_strategies.len(),
            data.strategy_export_count
        );

        Ok(Self {
            path: Some(path),
            max_saved,
            data: Mutex::new(data),
        })
    }

    pub fn in_memory(max_saved: usize) -> Self {
        Self {
            path: None,
            max_saved,
            data: Mutex::new(StoreData::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreData> {
        self.data.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn export_count(&self) -> u32 {
        self.lock().strategy_export_count
    }

    /// Count one successful export. Returns the new count.
    pub fn record_export(&self) -> Result<u32> {
        let mut data = self.lock();
        data.strategy_export_count += 1;
        self.persist(&data)?;
        Ok(data.strategy_export_count)
    }

    /// Saved strategies, newest first.
    pub fn saved_strategies(&self) -> Vec<SavedStrategy> {
        self.lock().saved_strategies.clone()
    }

    /// Keep a copy of a plan, evicting the oldest beyond the cap.
    pub fn save_strategy(
        &self,
        config: &StrategyConfig,
        plan: &ContentStrategyPlanOutput,
        now: DateTime<Utc>,
    ) -> Result<SavedStrategy> {
        let saved = SavedStrategy {
            id: Uuid::new_v4(),
            saved_at: now,
            config: config.clone(),
            plan: plan.clone(),
        };
        let mut data = self.lock();
        data.saved_strategies.insert(0, saved.clone());
        data.saved_strategies.truncate(self.max_saved);
        self.persist(&data)?;
        Ok(saved)
    }

    pub fn tab_records(&self) -> Vec<TabRecord> {
        self.lock().tab_records.clone()
    }

    pub fn append_record(&self, record: TabRecord) -> Result<()> {
        let mut data = self.lock();
        data.tab_records.push(record);
        self.persist(&data)
    }

    fn persist(&self, data: &StoreData) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(data)?;

        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| Error::storage(path, format!("Failed to open: {}", e)))?;

        // Blocks if another process holds the lock
        file.lock_exclusive()
            .map_err(|e| Error::storage(path, format!("Failed to lock: {}", e)))?;

        use std::io::Write;
        let mut file = file;
        file.write_all(content.as_bytes())
            .map_err(|e| Error::storage(path, format!("Failed to write: {}", e)))?;
        file.flush()
            .map_err(|e| Error::storage(path, format!("Failed to flush: {}", e)))?;

        trace!("Persisted store to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config(niche: &str) -> StrategyConfig {
        StrategyConfig {
            niche: niche.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_saved_strategies_capped_newest_first() {
        let store = PlannerStore::in_memory(10);
        for i in 0..12 {
            store
                .save_strategy(&config(&format!("n{i}")), &ContentStrategyPlanOutput::default(), Utc::now())
                .unwrap();
        }
        let saved = store.saved_strategies();
        assert_eq!(saved.len(), 10);
        assert_eq!(saved[0].config.niche, "n11");
        assert_eq!(saved[9].config.niche, "n2");
    }

    #[test]
    fn test_export_count_persists_across_open() {
        let dir = tempdir().unwrap();
        {
            let store = PlannerStore::open(dir.path(), 10).unwrap();
            assert_eq!(store.export_count(), 0);
            store.record_export().unwrap();
            assert_eq!(store.record_export().unwrap(), 2);
        }
        let store = PlannerStore::open(dir.path(), 10).unwrap();
        assert_eq!(store.export_count(), 2);
    }

    #[test]
    fn test_corrupt_store_starts_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(STORE_FILENAME), "{ not json").unwrap();
        let store = PlannerStore::open(dir.path(), 10).unwrap();
        assert_eq!(store.export_count(), 0);
        assert!(store.saved_strategies().is_empty());
    }

    #[test]
    fn test_store_uses_storage_keys() {
        let dir = tempdir().unwrap();
        let store = PlannerStore::open(dir.path(), 10).unwrap();
        store.record_export().unwrap();

        let raw = std::fs::read_to_string(dir.path().join(STORE_FILENAME)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["strategyExportCount"], 1);
        assert!(json["savedStrategies"].is_array());
    }

    #[test]
    fn test_tab_records_append() {
        let store = PlannerStore::in_memory(10);
        for i in 0..2 {
            store
                .append_record(TabRecord {
                    id: format!("r{i}"),
                    kind: "goal".to_string(),
                    user_id: "u".to_string(),
                    saved_at: Utc::now(),
                    payload: serde_json::json!({ "title": "same" }),
                })
                .unwrap();
        }
        // no dedupe: two saves, two records
        assert_eq!(store.tab_records().len(), 2);
    }
}
