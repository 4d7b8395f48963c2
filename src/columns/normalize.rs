//! Column normalization with a content-keyed cache.
//!
//! Normalization drops disabled leaves (evaluated without row context) and
//! recursively filters group children; groups themselves are always kept,
//! even when every child is filtered out.
//!
//! Processed nodes are cached by key together with the fingerprint they were
//! built from. The fingerprint covers every attribute of the node, so a column
//! edited in place misses the cache and replaces its entry instead of
//! returning a stale result. Columns without a key are processed every time.

use std::collections::HashMap;

use super::model::TableColumn;

/// Normalizes without caching.
pub fn normalize<T>(columns: &[TableColumn<T>]) -> Vec<TableColumn<T>> {
    columns
        .iter()
        .filter(|c| !c.is_disabled())
        .map(process)
        .collect()
}

fn process<T>(column: &TableColumn<T>) -> TableColumn<T> {
    match column {
        TableColumn::Leaf(leaf) => TableColumn::Leaf(leaf.clone()),
        TableColumn::Group(group) => {
            let mut group = group.clone();
            group.children = normalize(&group.children);
            TableColumn::Group(group)
        }
    }
}

/// Cached normalizer, one per table.
#[derive(Debug)]
pub struct ColumnNormalizer<T> {
    cache: HashMap<String, (u64, TableColumn<T>)>,
    hits: u64,
    misses: u64,
}

impl<T> Default for ColumnNormalizer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ColumnNormalizer<T> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Normalizes `columns`, reusing cached results for unchanged keyed nodes.
    /// Relative order of surviving nodes is preserved.
    pub fn normalize(&mut self, columns: &[TableColumn<T>]) -> Vec<TableColumn<T>> {
        columns
            .iter()
            .filter(|c| !c.is_disabled())
            .map(|c| self.process_cached(c))
            .collect()
    }

    fn process_cached(&mut self, column: &TableColumn<T>) -> TableColumn<T> {
        let Some(key) = column.key() else {
            self.misses += 1;
            return process(column);
        };

        let fingerprint = column.fingerprint();
        if let Some((cached_fingerprint, cached)) = self.cache.get(key) {
            if *cached_fingerprint == fingerprint {
                self.hits += 1;
                return cached.clone();
            }
        }

        self.misses += 1;
        let processed = match column {
            TableColumn::Leaf(_) => process(column),
            TableColumn::Group(group) => {
                let mut group = group.clone();
                group.children = self.normalize(&group.children);
                TableColumn::Group(group)
            }
        };
        self.cache.insert(key.to_string(), (fingerprint, processed.clone()));
        processed
    }

    /// Drops every cached entry.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
