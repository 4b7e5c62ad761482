use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::types::{Enclosure, EnclosureId, Space, SpeciesKey, SpeciesRule};

/// The species rules and enclosures an evaluator works on.
///
/// Only constructible through [`Catalog::new`], so holders can rely on every
/// occupant resolving to a known species and on no enclosure being overfull.
#[derive(Clone, Debug)]
pub struct Catalog {
    species: HashMap<SpeciesKey, SpeciesRule>,
    enclosures: Vec<Enclosure>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("species {0} has a unit size of zero")]
    ZeroUnitSize(SpeciesKey),

    #[error("species {0} has no compatible biome")]
    NoBiomes(SpeciesKey),

    #[error("enclosure {0} has a capacity of zero")]
    ZeroCapacity(EnclosureId),

    #[error("enclosure {0} has no biome")]
    NoEnclosureBiome(EnclosureId),

    #[error("enclosure id {0} is used more than once")]
    DuplicateEnclosure(EnclosureId),

    #[error("enclosure {enclosure} houses unknown species {species}")]
    UnknownOccupantSpecies {
        enclosure: EnclosureId,
        species: SpeciesKey,
    },

    #[error("enclosure {enclosure} lists an empty group of {species}")]
    EmptyOccupantGroup {
        enclosure: EnclosureId,
        species: SpeciesKey,
    },

    #[error("enclosure {enclosure} holds {occupied} units but only has room for {capacity}")]
    Overfull {
        enclosure: EnclosureId,
        occupied: u64,
        capacity: Space,
    },
}

impl Catalog {
    pub fn new(
        species: HashMap<SpeciesKey, SpeciesRule>,
        enclosures: Vec<Enclosure>,
    ) -> Result<Self, CatalogError> {
        for (key, rule) in &species {
            if rule.size == 0 {
                return Err(CatalogError::ZeroUnitSize(key.clone()));
            }
            if rule.biomes.is_empty() {
                return Err(CatalogError::NoBiomes(key.clone()));
            }
        }

        let mut seen = HashSet::new();
        for enclosure in &enclosures {
            if !seen.insert(enclosure.id) {
                return Err(CatalogError::DuplicateEnclosure(enclosure.id));
            }
            if enclosure.capacity == 0 {
                return Err(CatalogError::ZeroCapacity(enclosure.id));
            }
            if enclosure.biomes.is_empty() {
                return Err(CatalogError::NoEnclosureBiome(enclosure.id));
            }

            let mut occupied = 0u64;
            for occupant in &enclosure.occupants {
                let Some(rule) = species.get(&occupant.species) else {
                    return Err(CatalogError::UnknownOccupantSpecies {
                        enclosure: enclosure.id,
                        species: occupant.species.clone(),
                    });
                };
                if occupant.count == 0 {
                    return Err(CatalogError::EmptyOccupantGroup {
                        enclosure: enclosure.id,
                        species: occupant.species.clone(),
                    });
                }
                occupied += rule.size as u64 * occupant.count as u64;
            }

            if occupied > enclosure.capacity as u64 {
                return Err(CatalogError::Overfull {
                    enclosure: enclosure.id,
                    occupied,
                    capacity: enclosure.capacity,
                });
            }
        }

        Ok(Self {
            species,
            enclosures,
        })
    }

    pub fn species(&self, key: &str) -> Option<&SpeciesRule> {
        self.species.get(key)
    }

    /// Enclosures in declaration order.
    pub fn enclosures(&self) -> &[Enclosure] {
        &self.enclosures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species() -> HashMap<SpeciesKey, SpeciesRule> {
        HashMap::from([
            ("MACACO".to_string(), SpeciesRule::new(1, &["savana"], false)),
            ("LEAO".to_string(), SpeciesRule::new(3, &["savana"], true)),
        ])
    }

    #[test]
    fn accepts_consistent_data() {
        let catalog = Catalog::new(
            species(),
            vec![
                Enclosure::new(1, "savana", 10).with_occupants("MACACO", 3),
                Enclosure::new(2, "floresta", 5),
            ],
        )
        .unwrap();

        assert_eq!(catalog.enclosures().len(), 2);
        assert_eq!(catalog.enclosures()[1].id, 2);
        assert!(catalog.species("LEAO").unwrap().predator);
        assert!(catalog.species("ZEBRA").is_none());
    }

    #[test]
    fn rejects_unknown_occupant() {
        let err = Catalog::new(
            species(),
            vec![Enclosure::new(1, "savana", 10).with_occupants("ZEBRA", 1)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownOccupantSpecies {
                enclosure: 1,
                species: "ZEBRA".to_string()
            }
        );
    }

    #[test]
    fn rejects_overfull_enclosure() {
        let err = Catalog::new(
            species(),
            vec![Enclosure::new(5, "savana", 5).with_occupants("LEAO", 2)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::Overfull {
                enclosure: 5,
                occupied: 6,
                capacity: 5
            }
        );
    }

    #[test]
    fn rejects_malformed_entries() {
        let dup = Catalog::new(
            species(),
            vec![Enclosure::new(1, "savana", 3), Enclosure::new(1, "rio", 3)],
        );
        assert_eq!(dup.unwrap_err(), CatalogError::DuplicateEnclosure(1));

        let zero = Catalog::new(species(), vec![Enclosure::new(4, "rio", 0)]);
        assert_eq!(zero.unwrap_err(), CatalogError::ZeroCapacity(4));

        let empty_group = Catalog::new(
            species(),
            vec![Enclosure::new(1, "savana", 3).with_occupants("MACACO", 0)],
        );
        assert!(matches!(
            empty_group.unwrap_err(),
            CatalogError::EmptyOccupantGroup { enclosure: 1, .. }
        ));

        let mut bad_species = species();
        bad_species.insert("GHOST".to_string(), SpeciesRule::new(0, &["rio"], false));
        assert_eq!(
            Catalog::new(bad_species, vec![]).unwrap_err(),
            CatalogError::ZeroUnitSize("GHOST".to_string())
        );
    }
}
