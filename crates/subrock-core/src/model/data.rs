//! `data` object: group key -> records, kept in the order the API sent them.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::UrlRecord;

/// Records sharing one key of the `data` object (e.g. `employees_urls`).
#[derive(Debug, Clone, PartialEq)]
pub struct UrlGroup {
    pub key: String,
    pub records: Vec<UrlRecord>,
}

/// Ordered view of the `data` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlData {
    groups: Vec<UrlGroup>,
}

impl UrlData {
    pub fn new(groups: Vec<UrlGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[UrlGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    /// Every record URL, group by group.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.records.iter().map(|r| r.url()))
    }
}

impl Serialize for UrlData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.key, &group.records)?;
        }
        map.end()
    }
}

struct UrlDataVisitor;

impl<'de> Visitor<'de> for UrlDataVisitor {
    type Value = UrlData;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of group name to URL records")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, records)) = access.next_entry::<String, Vec<UrlRecord>>()? {
            groups.push(UrlGroup { key, records });
        }
        Ok(UrlData { groups })
    }
}

impl<'de> Deserialize<'de> for UrlData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(UrlDataVisitor)
    }
}
