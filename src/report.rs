//! The intermediate library file and the failure report.
//!
//! Both files are JSON objects keyed by playlist name. Playlist order in
//! the library file is significant (imports run in document order), so
//! both types keep their entries in an insertion-ordered `Vec` behind
//! hand-written serde map implementations instead of a `HashMap`, which
//! would scramble the order on deserialization.

use crate::types::{FailureRecord, TrackRecord};
use crate::{ImportError, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

/// The exported music library: playlist name → ordered track list.
///
/// Produced by the extractor, consumed by the importer. Round-trips
/// through JSON preserving both playlist order and track order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    entries: Vec<(String, Vec<TrackRecord>)>,
}

impl Library {
    pub fn new(entries: Vec<(String, Vec<TrackRecord>)>) -> Self {
        Self { entries }
    }

    /// Parse a library from any reader (file or stdin).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| ImportError::Parse(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Playlists in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TrackRecord])> {
        self.entries
            .iter()
            .map(|(name, tracks)| (name.as_str(), tracks.as_slice()))
    }
}

impl Serialize for Library {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, tracks) in &self.entries {
            map.serialize_entry(name, tracks)?;
        }
        map.end()
    }
}

struct LibraryVisitor;

impl<'de> Visitor<'de> for LibraryVisitor {
    type Value = Library;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of playlist name to track list")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, tracks)) = access.next_entry::<String, Vec<TrackRecord>>()? {
            entries.push((name, tracks));
        }
        Ok(Library { entries })
    }
}

impl<'de> Deserialize<'de> for Library {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(LibraryVisitor)
    }
}

/// Everything that could not be imported, keyed by playlist name.
///
/// Built up during the import, trimmed during review (accepting a bad
/// match removes its record), and written out once at the end of the run.
/// A playlist whose last record is removed keeps its (now empty) entry,
/// matching the report format of earlier versions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureReport {
    entries: Vec<(String, Vec<FailureRecord>)>,
}

impl FailureReport {
    /// Append a failure under the given playlist.
    pub fn record(&mut self, playlist_name: &str, failure: FailureRecord) {
        match self
            .entries
            .iter_mut()
            .find(|(name, _)| name == playlist_name)
        {
            Some((_, records)) => records.push(failure),
            None => self.entries.push((playlist_name.to_string(), vec![failure])),
        }
    }

    /// Remove the first record equal to `failure` under `playlist_name`.
    ///
    /// Returns whether a record was removed.
    pub fn remove(&mut self, playlist_name: &str, failure: &FailureRecord) -> bool {
        if let Some((_, records)) = self
            .entries
            .iter_mut()
            .find(|(name, _)| name == playlist_name)
        {
            if let Some(pos) = records.iter().position(|r| r == failure) {
                records.remove(pos);
                return true;
            }
        }
        false
    }

    /// Total number of failed tracks across all playlists.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FailureRecord])> {
        self.entries
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// The reviewable subset: cloned `(playlist_name, record)` pairs for
    /// every bad match, in report order.
    pub fn bad_matches(&self) -> Vec<(String, FailureRecord)> {
        let mut out = Vec::new();
        for (name, records) in &self.entries {
            for record in records {
                if record.is_bad_match() {
                    out.push((name.clone(), record.clone()));
                }
            }
        }
        out
    }

    /// Write the report as JSON to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)
            .map_err(|e| ImportError::Parse(e.to_string()))
    }
}

impl Serialize for FailureReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, records) in &self.entries {
            map.serialize_entry(name, records)?;
        }
        map.end()
    }
}

struct FailureReportVisitor;

impl<'de> Visitor<'de> for FailureReportVisitor {
    type Value = FailureReport;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of playlist name to failure list")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, records)) = access.next_entry::<String, Vec<FailureRecord>>()? {
            entries.push((name, records));
        }
        Ok(FailureReport { entries })
    }
}

impl<'de> Deserialize<'de> for FailureReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(FailureReportVisitor)
    }
}
