// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series data, selection, and flattening.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One value in a series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesItem {
    /// Item identifier, matched against the [`Selection`].
    pub addr: String,
    /// Category label; bars sharing a category are grouped together.
    pub cat: String,
    /// Bar length in value units.
    pub value: f64,
}

impl SeriesItem {
    /// Creates an item.
    pub fn new(addr: impl Into<String>, cat: impl Into<String>, value: f64) -> Self {
        Self {
            addr: addr.into(),
            cat: cat.into(),
            value,
        }
    }
}

/// A series: a color plus its items keyed by item key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    /// CSS color shared by every bar of the series.
    pub color: String,
    /// Items in insertion order.
    pub data: IndexMap<String, SeriesItem>,
}

/// Series entries keyed by series id.
///
/// Iteration follows insertion order. Replacing an id keeps its slot; removing
/// one closes the gap.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataStore {
    series: IndexMap<String, SeriesEntry>,
}

impl DataStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `id`.
    pub fn insert(&mut self, id: impl Into<String>, entry: SeriesEntry) {
        self.series.insert(id.into(), entry);
    }

    /// Removes the entry for `id`, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<SeriesEntry> {
        self.series.shift_remove(id)
    }

    /// Returns the entry for `id`.
    pub fn get(&self, id: &str) -> Option<&SeriesEntry> {
        self.series.get(id)
    }

    /// Iterates `(id, entry)` pairs in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SeriesEntry)> {
        self.series.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if there are no series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// One bar's worth of data: an item stamped with its series color.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatRow {
    /// Item identifier.
    pub addr: String,
    /// Category label.
    pub cat: String,
    /// Series color.
    pub color: String,
    /// Item value.
    pub value: f64,
}

/// Flattens every item of every series into rows.
///
/// Series come in store order and items in series order. Nothing is sorted or
/// deduplicated: the same `addr` in two series yields two rows.
pub fn flatten_data(store: &DataStore) -> Vec<FlatRow> {
    store
        .iter()
        .flat_map(|(_, entry)| {
            entry.data.values().map(|item| FlatRow {
                addr: item.addr.clone(),
                cat: item.cat.clone(),
                color: entry.color.clone(),
                value: item.value,
            })
        })
        .collect()
}

/// The highlighted item identifiers. Empty means nothing is filtered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(pub Vec<String>);

impl Selection {
    /// Returns `true` if no item is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the bar for `addr` is drawn in its series color.
    pub fn highlights(&self, addr: &str) -> bool {
        self.is_empty() || self.0.iter().any(|a| a == addr)
    }
}

impl From<Vec<String>> for Selection {
    fn from(addrs: Vec<String>) -> Self {
        Self(addrs)
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(color: &str, items: &[(&str, &str, &str, f64)]) -> SeriesEntry {
        SeriesEntry {
            color: color.to_string(),
            data: items
                .iter()
                .map(|(k, addr, cat, v)| ((*k).to_string(), SeriesItem::new(*addr, *cat, *v)))
                .collect(),
        }
    }

    #[test]
    fn empty_store_flattens_to_nothing() {
        assert!(flatten_data(&DataStore::new()).is_empty());
    }

    #[test]
    fn flatten_stamps_color_and_keeps_duplicates() {
        let mut store = DataStore::new();
        store.insert("s1", entry("red", &[("k1", "a1", "X", 10.0), ("k2", "a2", "Y", 3.0)]));
        store.insert("s2", entry("blue", &[("k1", "a1", "X", 20.0)]));

        let rows = flatten_data(&store);
        assert_eq!(rows.len(), 3, "one row per item");
        assert_eq!(
            rows[0],
            FlatRow {
                addr: "a1".into(),
                cat: "X".into(),
                color: "red".into(),
                value: 10.0,
            }
        );
        assert_eq!(rows[1].cat, "Y");
        assert_eq!(rows[2].color, "blue");
        assert_eq!(rows[2].addr, rows[0].addr, "duplicate addr kept as its own row");
    }

    #[test]
    fn replace_keeps_slot_and_remove_closes_gap() {
        let mut store = DataStore::new();
        store.insert("a", entry("red", &[]));
        store.insert("b", entry("green", &[]));
        store.insert("c", entry("blue", &[]));
        store.insert("a", entry("black", &[]));
        let ids: Vec<&str> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(store.get("a").map(|e| e.color.as_str()), Some("black"));

        assert!(store.remove("b").is_some());
        assert!(store.remove("b").is_none(), "second removal is a no-op");
        let ids: Vec<&str> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn selection_filters_only_when_non_empty() {
        let all = Selection::default();
        assert!(all.highlights("anything"));

        let some: Selection = ["a1"].into_iter().collect();
        assert!(some.highlights("a1"));
        assert!(!some.highlights("a2"));
    }

    #[test]
    fn store_deserializes_from_series_json() {
        let json = r#"{
            "s1": {"color": "red", "data": {"k1": {"addr": "a1", "cat": "X", "value": 10}}}
        }"#;
        let store: DataStore = serde_json::from_str(json).unwrap();
        assert_eq!(store.len(), 1);
        let rows = flatten_data(&store);
        assert_eq!(rows[0].value, 10.0);
        assert_eq!(rows[0].color, "red");
    }
}
