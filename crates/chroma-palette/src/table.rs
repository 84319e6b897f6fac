//! The in-memory color table.

use std::collections::BTreeMap;

use serde::ser::{Serialize, Serializer};

use crate::entry::ColorEntry;

/// Colors of one category, keyed by color name.
pub type Bucket = BTreeMap<String, ColorEntry>;

/// Colors indexed by category and by name.
///
/// Insertion is last-write-wins: a later entry with an already known name
/// replaces the earlier one in the flat map and in every bucket holding the
/// name, so each bucket member always carries the flat-map value. Category
/// membership accumulates across definitions. All iteration is in
/// lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    categories: BTreeMap<String, Bucket>,
    flat: BTreeMap<String, ColorEntry>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entry` under each of its categories.
    ///
    /// Returns the flat-map entry it replaced, if any.
    pub fn insert(&mut self, entry: ColorEntry) -> Option<ColorEntry> {
        if self.flat.contains_key(entry.name()) {
            // Earlier definitions may have joined buckets the latest one does not name
            for bucket in self.categories.values_mut() {
                if let Some(member) = bucket.get_mut(entry.name()) {
                    *member = entry.clone();
                }
            }
        }

        for category in entry.categories() {
            self.categories
                .entry(category.clone())
                .or_default()
                .insert(entry.name().to_string(), entry.clone());
        }
        self.flat.insert(entry.name().to_string(), entry)
    }

    /// Categories with their members.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &Bucket)> {
        self.categories.iter().map(|(name, bucket)| (name.as_str(), bucket))
    }

    pub fn category(&self, name: &str) -> Option<&Bucket> {
        self.categories.get(name)
    }

    /// Entry for `name` within `category`.
    pub fn get(&self, category: &str, name: &str) -> Option<&ColorEntry> {
        self.categories.get(category)?.get(name)
    }

    /// Entry for `name` in the flat map.
    pub fn color(&self, name: &str) -> Option<&ColorEntry> {
        self.flat.get(name)
    }

    /// Every unique color, one per name.
    pub fn colors(&self) -> impl Iterator<Item = &ColorEntry> {
        self.flat.values()
    }

    /// Number of unique color names.
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

struct BucketValues<'a>(&'a Bucket);

impl Serialize for BucketValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, entry)| (name, entry.value())))
    }
}

/// Serializes as `{ category: { name: "#rrggbb" } }`.
impl Serialize for ColorTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.categories
                .iter()
                .map(|(category, bucket)| (category, BucketValues(bucket))),
        )
    }
}
