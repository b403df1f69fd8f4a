use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::Serialize;

use globe_engine::data::{countries_from_json, stat_keys, write_dataset_to_file};

#[derive(Debug, Serialize)]
struct DatasetMetadata {
    source: String,
    countries: usize,
    stat_keys: Vec<String>,
    generated_at_epoch: u64,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(input) = args.next() else {
        bail!("usage: build_dataset <countries.json> [output-dir]");
    };
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "data".into()));

    let bytes = fs::read(&input).with_context(|| format!("failed to read {input}"))?;
    let mut countries = countries_from_json(&bytes)
        .with_context(|| format!("failed to parse dataset {input}"))?;

    countries.retain(|country| {
        let usable = country.latitude.is_finite() && country.longitude.is_finite();
        if !usable {
            warn!("Skipping {}: non-finite coordinates", country.name);
        }
        usable
    });
    if countries.is_empty() {
        bail!("dataset contains no usable records");
    }

    fs::create_dir_all(&output_dir).context("failed to create data output directory")?;
    let dataset_path = output_dir.join("countries.bin");
    write_dataset_to_file(&countries, &dataset_path)
        .with_context(|| format!("failed to write dataset to {}", dataset_path.display()))?;

    let metadata = DatasetMetadata {
        source: input.clone(),
        countries: countries.len(),
        stat_keys: stat_keys(&countries),
        generated_at_epoch: current_epoch_seconds(),
    };
    let metadata_path = output_dir.join("countries.meta.json");
    let metadata_json = serde_json::to_vec_pretty(&metadata)?;
    fs::write(&metadata_path, metadata_json)
        .with_context(|| format!("failed to write metadata to {}", metadata_path.display()))?;

    info!(
        "Wrote compact dataset to {} ({} countries, {} statistic columns)",
        dataset_path.display(),
        metadata.countries,
        metadata.stat_keys.len()
    );

    Ok(())
}

fn current_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
