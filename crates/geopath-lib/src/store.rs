//! Point storage.
//!
//! Points live in an arena whose slot index is the point identifier. Removing a
//! point leaves an empty slot behind, so identifiers of the remaining points
//! never shift and a removed identifier is never handed out again until the
//! store is reloaded.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::distance::GeoPosition;
use crate::error::{Error, Result};
use crate::names::NameRegistry;

/// Stable identifier for a point within a loaded session.
pub type PointId = u64;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Coordinate value as it appears on the wire. Devices post both JSON numbers
/// and numeric strings; the original form is kept so saving does not rewrite
/// records the engine never touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
    /// Any other JSON value (bool, array, object). Never numeric, but kept so
    /// the record round-trips unchanged.
    Other(Value),
}

impl Coordinate {
    /// Numeric value, if finite.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Coordinate::Number(value) => *value,
            Coordinate::Text(text) => text.trim().parse::<f64>().ok()?,
            Coordinate::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::Number(value)
    }
}

/// Point record in its persisted form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<Coordinate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_name"
    )]
    pub name: Option<String>,
    /// Opaque passthrough; never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    /// Fields the engine does not know about, preserved on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PointRecord {
    /// Record with numeric coordinates and no name.
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
            altitude: Some(altitude.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<Value>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Name of the first coordinate that is absent or not numeric.
    pub fn missing_coordinate(&self) -> Option<&'static str> {
        let fields = [
            ("latitude", &self.latitude),
            ("longitude", &self.longitude),
            ("altitude", &self.altitude),
        ];
        fields
            .into_iter()
            .find(|(_, value)| value.as_ref().and_then(Coordinate::as_f64).is_none())
            .map(|(field, _)| field)
    }

    /// Parsed position when all three coordinates are present and numeric.
    pub fn position(&self) -> Option<GeoPosition> {
        let latitude = self.latitude.as_ref()?.as_f64()?;
        let longitude = self.longitude.as_ref()?.as_f64()?;
        let altitude = self.altitude.as_ref()?.as_f64()?;
        Some(GeoPosition::new(latitude, longitude, altitude))
    }
}

/// Names arrive as strings, but devices occasionally post numbers or
/// booleans. Scalars keep their text form; arrays and objects fall back to the
/// default label instead of failing the whole file.
fn lenient_name<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(name)) => Some(name),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

/// Graphable view of a stored point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub id: PointId,
    pub name: String,
    pub position: GeoPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
}

/// Arena slot contents.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPoint {
    pub id: PointId,
    pub record: PointRecord,
    /// `None` for display-only records that lack a coordinate.
    pub position: Option<GeoPosition>,
}

impl StoredPoint {
    pub fn is_graphable(&self) -> bool {
        self.position.is_some()
    }
}

/// Outcome of [`PointStore::load`].
#[derive(Debug, Default)]
pub struct LoadSummary {
    /// Records retained, graphable or not.
    pub total: usize,
    /// Records with all three coordinates.
    pub graphable: usize,
    /// One [`Error::MalformedRecord`] per record kept for display only.
    pub skipped: Vec<Error>,
}

/// Ordered collection of point records with stable identifiers.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    slots: Vec<Option<StoredPoint>>,
    names: NameRegistry,
    live: usize,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every point with `records`. Each record's identifier is its
    /// zero-based input position.
    pub fn load(&mut self, records: Vec<PointRecord>) -> LoadSummary {
        self.slots.clear();
        self.names.clear();
        self.live = 0;

        let mut summary = LoadSummary::default();
        for record in records {
            let (id, missing) = self.insert(record);
            summary.total += 1;
            match missing {
                Some(field) => summary.skipped.push(Error::MalformedRecord { id, field }),
                None => summary.graphable += 1,
            }
        }

        debug!(
            total = summary.total,
            graphable = summary.graphable,
            skipped = summary.skipped.len(),
            "loaded point records"
        );
        summary
    }

    /// Add one record after the existing ones and return its identifier.
    /// Records lacking a coordinate are kept but not graphable.
    pub fn append(&mut self, record: PointRecord) -> PointId {
        let (id, _) = self.insert(record);
        id
    }

    fn insert(&mut self, mut record: PointRecord) -> (PointId, Option<&'static str>) {
        let id = self.slots.len() as PointId;

        let name = record
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| NameRegistry::default_name(id));
        self.names.assign(id, name.clone());
        record.name = Some(name);

        let missing = record.missing_coordinate();
        if let Some(field) = missing {
            warn!(id, field, "point record missing coordinate; kept for display only");
        }

        let position = record.position();
        self.slots.push(Some(StoredPoint {
            id,
            record,
            position,
        }));
        self.live += 1;
        (id, missing)
    }

    /// Rename a point, updating both the registry and the stored record.
    pub fn rename(&mut self, id: PointId, new_name: &str) -> Result<()> {
        let slot = slot_index(id)
            .and_then(|index| self.slots.get_mut(index))
            .and_then(Option::as_mut)
            .ok_or(Error::InvalidIdentifier { id })?;

        self.names.set(id, new_name)?;
        slot.record.name = Some(new_name.to_string());
        debug!(id, name = new_name, "renamed point");
        Ok(())
    }

    /// Delete a point. Other identifiers stay valid.
    pub fn remove(&mut self, id: PointId) -> Result<PointRecord> {
        let removed = slot_index(id)
            .and_then(|index| self.slots.get_mut(index))
            .and_then(Option::take)
            .ok_or(Error::InvalidIdentifier { id })?;

        self.names.remove(id);
        self.live -= 1;
        debug!(id, "removed point");
        Ok(removed.record)
    }

    pub fn get(&self, id: PointId) -> Option<&StoredPoint> {
        slot_index(id)
            .and_then(|index| self.slots.get(index))
            .and_then(Option::as_ref)
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.get(id).is_some()
    }

    /// Graphable view of a point; `None` when absent or malformed.
    pub fn point(&self, id: PointId) -> Option<Point> {
        self.get(id).and_then(|stored| self.view(stored))
    }

    fn view(&self, stored: &StoredPoint) -> Option<Point> {
        let position = stored.position?;
        Some(Point {
            id: stored.id,
            name: self.names.get(stored.id),
            position,
            timestamp: stored.record.timestamp.clone(),
        })
    }

    /// Display name for a point present in the store.
    pub fn name(&self, id: PointId) -> Option<String> {
        self.contains(id).then(|| self.names.get(id))
    }

    /// Every retained point in display order, graphable or not.
    pub fn iter(&self) -> impl Iterator<Item = &StoredPoint> {
        self.slots.iter().flatten()
    }

    /// Graphable points in display order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.iter().filter_map(|stored| self.view(stored))
    }

    /// Records to hand to the persistence collaborator.
    pub fn records(&self) -> Vec<PointRecord> {
        self.iter().map(|stored| stored.record.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// First point whose display name matches exactly.
    pub fn find_by_name(&self, name: &str) -> Option<PointId> {
        self.iter()
            .map(|stored| stored.id)
            .find(|id| self.names.get(*id) == name)
    }

    /// Resolve a user-supplied reference: an exact display name first, then a
    /// numeric identifier.
    pub fn resolve(&self, reference: &str) -> Result<PointId> {
        if let Some(id) = self.find_by_name(reference) {
            return Ok(id);
        }
        if let Ok(id) = reference.trim().parse::<PointId>() {
            return if self.contains(id) {
                Ok(id)
            } else {
                Err(Error::InvalidIdentifier { id })
            };
        }
        Err(Error::UnknownPoint {
            name: reference.to_string(),
            suggestions: self.fuzzy_name_matches(reference, 3),
        })
    }

    /// Names similar to `name`, best match first.
    pub fn fuzzy_name_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, String)> = self
            .iter()
            .map(|stored| self.names.get(stored.id))
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
        });
        scored.dedup_by(|a, b| a.1 == b.1);
        scored.truncate(limit);
        scored.into_iter().map(|(_, candidate)| candidate).collect()
    }
}

fn slot_index(id: PointId) -> Option<usize> {
    usize::try_from(id).ok()
}
