pub mod data;
pub mod interact;
pub mod projection;
pub mod scene;
pub mod stats;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Country {
    pub name: String,
    /// Geographic coordinates in degrees.
    pub latitude: f32,
    pub longitude: f32,
    /// Statistic columns keyed by name. Values keep the raw dataset text,
    /// formatting symbols included ("1,234", "$56%", "").
    pub stats: BTreeMap<String, String>,
}

impl Country {
    /// Raw text of one statistic column, if the dataset has it.
    pub fn stat(&self, key: &str) -> Option<&str> {
        self.stats.get(key).map(String::as_str)
    }
}
