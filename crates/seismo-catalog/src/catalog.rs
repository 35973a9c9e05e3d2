//! Event table with positional row identity.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CatalogError, Result};

/// A single seismic event.
///
/// Depth is a magnitude below the surface. Keys other than the named ones
/// are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Depth, positive down.
    pub depth: f64,
    /// Magnitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    /// Catalog identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Origin time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_origin_time"
    )]
    pub time: Option<DateTime<Utc>>,
    /// Pass-through attributes.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

const NAIVE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an origin time.
///
/// RFC 3339 timestamps keep their offset; timestamps without an offset,
/// with a `T` or a space between date and time, are read as UTC.
pub fn parse_origin_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.with_timezone(&Utc));
    }
    NAIVE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_origin_time<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_origin_time(&text)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized origin time {text:?}")))
}

impl Event {
    /// Event at a location with no optional attributes.
    pub fn new(lon: f64, lat: f64, depth: f64) -> Self {
        Self {
            lon,
            lat,
            depth,
            magnitude: None,
            id: None,
            time: None,
            extra: BTreeMap::new(),
        }
    }

    /// Builder-style origin time.
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Builder-style magnitude.
    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    /// Builder-style identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// An ordered table of events; rows are identified by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    events: Vec<Event>,
}

impl Catalog {
    /// Wrap a list of events.
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Parse a JSON array of events.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let catalog = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("loaded {} events from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in row order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Mutable access to the events, for tables derived from another one.
    pub fn events_mut(&mut self) -> &mut [Event] {
        &mut self.events
    }

    /// Event at `row`.
    pub fn get(&self, row: usize) -> Option<&Event> {
        self.events.get(row)
    }

    /// Iterate over events in row order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Longitude column.
    pub fn lons(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.lon).collect()
    }

    /// Latitude column.
    pub fn lats(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.lat).collect()
    }

    /// Depth column normalized to positive-down magnitudes.
    ///
    /// Catalogs that store elevations (negative depths) are folded onto
    /// the same convention; the catalog itself is left untouched.
    pub fn depths(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.depth.abs()).collect()
    }

    /// New catalog holding the given rows, in the given order.
    pub fn subset(&self, rows: &[usize]) -> Result<Catalog> {
        let events = rows
            .iter()
            .map(|&index| {
                self.events
                    .get(index)
                    .cloned()
                    .ok_or(CatalogError::IndexOutOfRange {
                        index,
                        len: self.events.len(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Catalog { events })
    }
}

impl From<Vec<Event>> for Catalog {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}

impl FromIterator<Event> for Catalog {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
