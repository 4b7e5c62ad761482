use std::collections::BTreeSet;

pub type SpeciesKey = String;
pub type Biome = String;
pub type BiomeSet = BTreeSet<Biome>;

pub type EnclosureId = u32;
pub type Space = u32;
pub type Count = u32;

/// Separator between the tags of a compound biome label, as in `savana e rio`.
const BIOME_SEPARATOR: &str = " e ";

/// Split a biome label into its tags. Surrounding whitespace is ignored and
/// empty segments are dropped.
pub fn parse_biomes(label: &str) -> BiomeSet {
    label
        .split(BIOME_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeciesRule {
    /// Space taken by a single individual.
    pub size: Space,
    pub biomes: BiomeSet,
    pub predator: bool,
    /// When set, the species may only be placed in an enclosure whose biome
    /// tags are exactly this set.
    pub exclusive_biome: Option<BiomeSet>,
}

impl SpeciesRule {
    pub fn new(size: Space, biomes: &[&str], predator: bool) -> Self {
        Self {
            size,
            biomes: biomes.iter().map(|b| b.to_string()).collect(),
            predator,
            exclusive_biome: None,
        }
    }

    pub fn with_exclusive_biome(mut self, label: &str) -> Self {
        self.exclusive_biome = Some(parse_biomes(label));
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub species: SpeciesKey,
    pub count: Count,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enclosure {
    pub id: EnclosureId,
    pub biomes: BiomeSet,
    pub capacity: Space,
    pub occupants: Vec<Occupant>,
}

impl Enclosure {
    pub fn new(id: EnclosureId, biome_label: &str, capacity: Space) -> Self {
        Self {
            id,
            biomes: parse_biomes(biome_label),
            capacity,
            occupants: vec![],
        }
    }

    pub fn with_occupants(mut self, species: &str, count: Count) -> Self {
        self.occupants.push(Occupant {
            species: species.to_string(),
            count,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn houses(&self, species: &str) -> bool {
        self.occupants.iter().any(|o| o.species == species)
    }

    /// True if every occupant group belongs to `species`. Vacuously true for
    /// an empty enclosure.
    pub fn houses_only(&self, species: &str) -> bool {
        self.occupants.iter().all(|o| o.species == species)
    }
}
