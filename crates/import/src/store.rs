use std::collections::HashMap;

use crate::error::StoreError;
use crate::model::Asset;

/// Persistence collaborator for the reconciler.
///
/// `code` must be unique across records; a violation surfaces as
/// `StoreError::Constraint` from `create` / `update`.
pub trait AssetStore {
    fn find_by_code(&self, code: &str) -> Result<Option<Asset>, StoreError>;
    fn create(&mut self, asset: &Asset) -> Result<(), StoreError>;
    fn update(&mut self, asset: &Asset) -> Result<(), StoreError>;
}

/// In-process store keyed by code. Enforces the same uniqueness rules as the
/// SQLite schema (`codigo` and `sync_id` unique, `nombre` non-empty).
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, Asset>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Asset> {
        self.records.get(code)
    }

    /// All records ordered by code.
    pub fn assets(&self) -> Vec<&Asset> {
        let mut all: Vec<&Asset> = self.records.values().collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        all
    }

    fn check_name(asset: &Asset) -> Result<(), StoreError> {
        if asset.name.trim().is_empty() {
            return Err(StoreError::Constraint("nombre may not be empty".into()));
        }
        Ok(())
    }
}

impl AssetStore for MemoryStore {
    fn find_by_code(&self, code: &str) -> Result<Option<Asset>, StoreError> {
        Ok(self.records.get(code).cloned())
    }

    fn create(&mut self, asset: &Asset) -> Result<(), StoreError> {
        Self::check_name(asset)?;
        if self.records.contains_key(&asset.code) {
            return Err(StoreError::Constraint(format!(
                "codigo '{}' already exists",
                asset.code
            )));
        }
        if self.records.values().any(|a| a.sync_id == asset.sync_id) {
            return Err(StoreError::Constraint(format!(
                "sync_id '{}' already exists",
                asset.sync_id
            )));
        }

        self.next_id += 1;
        let mut stored = asset.clone();
        stored.id = Some(self.next_id);
        self.records.insert(stored.code.clone(), stored);
        Ok(())
    }

    fn update(&mut self, asset: &Asset) -> Result<(), StoreError> {
        Self::check_name(asset)?;
        let existing = self.records.get_mut(&asset.code).ok_or_else(|| {
            StoreError::Backend(format!("no record with codigo '{}'", asset.code))
        })?;
        if existing.sync_id != asset.sync_id {
            return Err(StoreError::Constraint("sync_id is immutable".into()));
        }

        let id = existing.id;
        *existing = asset.clone();
        existing.id = id;
        Ok(())
    }
}
