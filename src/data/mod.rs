use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use bincode::ErrorKind;
use serde_json::Value;
use thiserror::Error;

use crate::Country;

/// Compression level used when encoding serialized dataset bundles.
const BUNDLE_COMPRESSION_LEVEL: i32 = 19;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] Box<ErrorKind>),
    #[error("Compression error: {0}")]
    Compression(#[source] std::io::Error),
    #[error("record {index}: {reason}")]
    BadRecord { index: usize, reason: String },
}

/// Parses a JSON array of country records.
///
/// `Country`, `Latitude` and `Longitude` are fixed columns; every other
/// field is a statistic and is captured as text. Bare JSON numbers are kept
/// as their string rendering, nulls as empty strings.
pub fn countries_from_json(bytes: &[u8]) -> Result<Vec<Country>, DataError> {
    let records: Vec<serde_json::Map<String, Value>> = serde_json::from_slice(bytes)?;
    records
        .iter()
        .enumerate()
        .map(|(index, record)| country_from_record(index, record))
        .collect()
}

pub fn load_countries_json<P: AsRef<Path>>(path: P) -> Result<Vec<Country>, DataError> {
    let bytes = fs::read(path)?;
    countries_from_json(&bytes)
}

fn country_from_record(
    index: usize,
    record: &serde_json::Map<String, Value>,
) -> Result<Country, DataError> {
    let name = match record.get("Country") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => {
            return Err(DataError::BadRecord {
                index,
                reason: "missing Country name".into(),
            })
        }
    };
    let latitude = coordinate(record, "Latitude").ok_or_else(|| DataError::BadRecord {
        index,
        reason: "missing or non-numeric Latitude".into(),
    })?;
    let longitude = coordinate(record, "Longitude").ok_or_else(|| DataError::BadRecord {
        index,
        reason: "missing or non-numeric Longitude".into(),
    })?;

    let mut stats = BTreeMap::new();
    for (key, value) in record {
        if matches!(key.as_str(), "Country" | "Latitude" | "Longitude") {
            continue;
        }
        stats.insert(key.clone(), stat_text(value));
    }

    Ok(Country {
        name,
        latitude,
        longitude,
        stats,
    })
}

fn coordinate(record: &serde_json::Map<String, Value>, key: &str) -> Option<f32> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64().map(|v| v as f32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn stat_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Sorted union of statistic keys across the dataset; this is what an
/// external selector control gets populated with.
pub fn stat_keys(countries: &[Country]) -> Vec<String> {
    let keys: BTreeSet<&str> = countries
        .iter()
        .flat_map(|c| c.stats.keys().map(String::as_str))
        .collect();
    keys.into_iter().map(String::from).collect()
}

pub fn serialize_dataset(countries: &[Country]) -> Result<Vec<u8>, DataError> {
    let encoded = bincode::serialize(countries)?;
    let mut cursor = Cursor::new(encoded);
    zstd::stream::encode_all(&mut cursor, BUNDLE_COMPRESSION_LEVEL).map_err(DataError::Compression)
}

pub fn deserialize_dataset(bytes: &[u8]) -> Result<Vec<Country>, DataError> {
    let mut cursor = Cursor::new(bytes);
    let decoded = zstd::stream::decode_all(&mut cursor).map_err(DataError::Compression)?;
    Ok(bincode::deserialize(&decoded)?)
}

pub fn write_dataset_to_file<P: AsRef<Path>>(
    countries: &[Country],
    path: P,
) -> Result<(), DataError> {
    let bytes = serialize_dataset(countries)?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn read_dataset_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Country>, DataError> {
    let bytes = fs::read(path)?;
    deserialize_dataset(&bytes)
}
