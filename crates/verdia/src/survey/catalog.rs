//! Plant catalog import from CSV exports. Multi-value columns use a `|`
//! separator so a single row stays one plant.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{Plant, PlantCare};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read plant catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid plant catalog data: {0}")]
    Csv(#[from] csv::Error),
}

pub fn load_plants<R: Read>(reader: R) -> Result<Vec<Plant>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut plants = Vec::new();

    for record in csv_reader.deserialize::<PlantRow>() {
        let row = record?;
        plants.push(row.into_plant());
    }

    Ok(plants)
}

pub fn load_plants_from_path(path: &Path) -> Result<Vec<Plant>, CatalogError> {
    let file = File::open(path)?;
    load_plants(file)
}

#[derive(Debug, Deserialize)]
struct PlantRow {
    scientific_name: String,
    common_name: String,
    #[serde(default)]
    space_types: String,
    #[serde(default)]
    area_sizes: String,
    #[serde(default)]
    challenges: String,
    #[serde(default)]
    tech_preferences: String,
    #[serde(default)]
    locations: String,
    #[serde(default)]
    watering: String,
    #[serde(default)]
    sunlight: String,
    #[serde(default)]
    maintenance: String,
}

impl PlantRow {
    fn into_plant(self) -> Plant {
        Plant {
            scientific_name: self.scientific_name,
            common_name: self.common_name,
            space_types: split_tags(&self.space_types),
            area_sizes: split_tags(&self.area_sizes),
            challenges: split_tags(&self.challenges),
            tech_preferences: split_tags(&self.tech_preferences),
            locations: split_tags(&self.locations),
            care: PlantCare {
                watering: self.watering,
                sunlight: self.sunlight,
                maintenance: self.maintenance,
            },
        }
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
