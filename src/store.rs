//! Immutable intrinsic store.
//!
//! Records are keyed by lowercase intrinsic name; each key maps to all
//! overloads sharing that name, in document order. Iteration over names also
//! follows document order (first occurrence wins the position). Once built,
//! a store is never mutated; rebuilding from fresh input is the only way to
//! change its contents.

use std::collections::HashMap;
use std::path::Path;

use crate::cache::{self, CacheError};
use crate::ingest::{self, LoadError};
use crate::record::IntrinsicRecord;
use crate::taxonomy::CpuFeatureSet;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct IntrinsicStore {
    /// Lowercase keys in first-seen document order.
    order: Vec<String>,
    map: HashMap<String, Vec<IntrinsicRecord>>,
}

impl IntrinsicStore {
    /// Build a store from records, preserving document order.
    pub fn build(records: Vec<IntrinsicRecord>) -> Self {
        let mut order = Vec::new();
        let mut map: HashMap<String, Vec<IntrinsicRecord>> = HashMap::new();
        for rec in records {
            let key = rec.name.to_ascii_lowercase();
            let slot = map.entry(key.clone()).or_default();
            if slot.is_empty() {
                order.push(key);
            }
            slot.push(rec);
        }
        Self { order, map }
    }

    /// Ingest a guide document and build a store from it.
    pub fn from_guide_str(text: &str) -> Result<Self, LoadError> {
        Ok(Self::build(ingest::parse_guide(text)?))
    }

    pub fn load_guide(path: &Path) -> Result<Self, LoadError> {
        Ok(Self::build(ingest::load_guide(path)?))
    }

    /// Rebuild a store from previously exported cache XML.
    pub fn from_cache_str(text: &str) -> Result<Self, CacheError> {
        cache::import(text)
    }

    pub fn load_cache(path: &Path) -> Result<Self, CacheError> {
        let text = std::fs::read_to_string(path)?;
        cache::import(&text)
    }

    /// All overloads registered under `name`, case-insensitively. Empty
    /// slice for unknown names.
    pub fn lookup(&self, name: &str) -> &[IntrinsicRecord] {
        self.map
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_lowercase())
    }

    /// Lowercase names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Every record in document order.
    pub fn records(&self) -> impl Iterator<Item = &IntrinsicRecord> {
        self.order.iter().flat_map(|k| self.map[k].iter())
    }

    /// Records whose feature requirement is satisfied by `enabled`.
    pub fn records_by_feature(
        &self,
        enabled: CpuFeatureSet,
    ) -> impl Iterator<Item = &IntrinsicRecord> {
        self.records()
            .filter(move |r| r.cpu_features.is_subset_of(enabled))
    }

    /// Records requiring any of the given features, e.g. everything tagged
    /// AVX512F for a per-extension documentation listing.
    pub fn records_with_feature(
        &self,
        features: CpuFeatureSet,
    ) -> impl Iterator<Item = &IntrinsicRecord> {
        self.records()
            .filter(move |r| r.cpu_features.intersects(features))
    }

    /// Union of the feature requirements of all overloads of `name`.
    pub fn combined_features(&self, name: &str) -> CpuFeatureSet {
        self.lookup(name)
            .iter()
            .fold(CpuFeatureSet::empty(), |acc, r| acc | r.cpu_features)
    }

    pub fn name_count(&self) -> usize {
        self.order.len()
    }

    pub fn record_count(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
