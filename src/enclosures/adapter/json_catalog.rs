use std::{collections::HashMap, path::PathBuf};

use anyhow::Context;
use serde_json::Value;
use thiserror::Error;

use crate::enclosures::{
    domain::{
        types::{parse_biomes, BiomeSet, Enclosure, Occupant, SpeciesKey, SpeciesRule},
        Catalog,
    },
    port::catalog_source::CatalogSource,
};

/// Catalog read from a JSON file.
///
/// ```json
/// {
///   "species": {"LEAO": {"size": 3, "biomes": ["savana"], "predator": true}},
///   "enclosures": [{"id": 5, "biome": "savana", "capacity": 9,
///                   "occupants": [{"species": "LEAO", "count": 1}]}]
/// }
/// ```
///
/// A species may carry `"exclusive_biome": "savana e rio"`; `predator` and
/// `occupants` default to `false` and `[]`.
pub struct JsonCatalog {
    path: PathBuf,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum JsonCatalogError {
    #[error("invalid json: {0}")]
    InvalidJson(String),

    #[error("missing or malformed field `{field}` in {context}")]
    InvalidField { field: &'static str, context: String },
}

impl JsonCatalogError {
    fn field(field: &'static str, context: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            context: context.into(),
        }
    }
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> JsonCatalog {
        JsonCatalog { path: path.into() }
    }
}

impl CatalogSource for JsonCatalog {
    fn load(&self) -> Result<Catalog, anyhow::Error> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("while reading catalog file {}", self.path.display()))?;
        log::info!("loading catalog from {}", self.path.display());
        parse_catalog(&text).with_context(|| format!("in catalog file {}", self.path.display()))
    }
}

pub fn parse_catalog(text: &str) -> Result<Catalog, anyhow::Error> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| JsonCatalogError::InvalidJson(e.to_string()))?;

    let species = value["species"]
        .as_object()
        .ok_or_else(|| JsonCatalogError::field("species", "catalog"))?
        .iter()
        .map(|(key, rule)| Ok((key.clone(), species_from_json(key, rule)?)))
        .collect::<Result<HashMap<SpeciesKey, SpeciesRule>, JsonCatalogError>>()?;

    let enclosures = value["enclosures"]
        .as_array()
        .ok_or_else(|| JsonCatalogError::field("enclosures", "catalog"))?
        .iter()
        .enumerate()
        .map(|(index, enclosure)| enclosure_from_json(index, enclosure))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::new(species, enclosures)?)
}

fn species_from_json(key: &str, val: &Value) -> Result<SpeciesRule, JsonCatalogError> {
    let context = || format!("species {key}");

    let size = as_u32(&val["size"]).ok_or_else(|| JsonCatalogError::field("size", context()))?;
    let biomes: BiomeSet = val["biomes"]
        .as_array()
        .and_then(|biomes| {
            biomes
                .iter()
                .map(|b| b.as_str().map(str::to_string))
                .collect::<Option<_>>()
        })
        .ok_or_else(|| JsonCatalogError::field("biomes", context()))?;
    let predator = match &val["predator"] {
        Value::Null => false,
        other => other
            .as_bool()
            .ok_or_else(|| JsonCatalogError::field("predator", context()))?,
    };
    let exclusive_biome = match &val["exclusive_biome"] {
        Value::Null => None,
        other => Some(parse_biomes(
            other
                .as_str()
                .ok_or_else(|| JsonCatalogError::field("exclusive_biome", context()))?,
        )),
    };

    Ok(SpeciesRule {
        size,
        biomes,
        predator,
        exclusive_biome,
    })
}

fn enclosure_from_json(index: usize, val: &Value) -> Result<Enclosure, JsonCatalogError> {
    let context = || format!("enclosure #{index}");

    let id = as_u32(&val["id"]).ok_or_else(|| JsonCatalogError::field("id", context()))?;
    let biome = val["biome"]
        .as_str()
        .ok_or_else(|| JsonCatalogError::field("biome", context()))?;
    let capacity =
        as_u32(&val["capacity"]).ok_or_else(|| JsonCatalogError::field("capacity", context()))?;

    let occupants: Vec<Occupant> = match &val["occupants"] {
        Value::Null => vec![],
        Value::Array(occupants) => occupants
            .iter()
            .map(|occupant| {
                let species = occupant["species"].as_str();
                let count = as_u32(&occupant["count"]);
                match (species, count) {
                    (Some(species), Some(count)) => Ok(Occupant {
                        species: species.to_string(),
                        count,
                    }),
                    _ => Err(JsonCatalogError::field("occupants", context())),
                }
            })
            .collect::<Result<_, _>>()?,
        _ => return Err(JsonCatalogError::field("occupants", context())),
    };

    Ok(Enclosure {
        id,
        biomes: parse_biomes(biome),
        capacity,
        occupants,
    })
}

fn as_u32(val: &Value) -> Option<u32> {
    val.as_u64().and_then(|n| u32::try_from(n).ok())
}
