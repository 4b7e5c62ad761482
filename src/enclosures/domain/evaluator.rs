//! The core of the enclosure planner.
//!
//! Given a species and a head count, [`Evaluator::evaluate`] scans the catalog once and reports
//! every enclosure that could take the whole group. Nothing here mutates the catalog, so an
//! evaluator can be shared freely between callers.

use std::fmt;

use log::debug;
use thiserror::Error;

#[cfg(test)]
use {
    proptest::{collection::vec, prelude::*},
    proptest_derive::Arbitrary,
    std::collections::HashMap,
};

use super::{
    catalog::Catalog,
    types::{Enclosure, EnclosureId, Space, SpeciesRule},
};

/// Space reserved once whenever a species moves in with a different one.
const MIXED_HABITAT_OVERHEAD: i64 = 1;

pub struct Evaluator {
    catalog: Catalog,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Animal inválido")]
    InvalidSpecies,

    #[error("Quantidade inválida")]
    InvalidQuantity,

    #[error("Não há recinto viável")]
    NoViableEnclosure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViableEnclosure {
    pub id: EnclosureId,
    /// Space left once the requested group has moved in.
    pub free_space: i64,
    pub capacity: Space,
}

impl fmt::Display for ViableEnclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recinto {} (espaço livre: {} total: {})",
            self.id, self.free_space, self.capacity
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    ExclusiveBiomeMismatch,
    IncompatibleBiome,
    PredatorConflict,
    InsufficientSpace { remaining: i64, required: i64 },
}

impl Evaluator {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn evaluate(
        &self,
        species: &str,
        count: i64,
    ) -> Result<Vec<ViableEnclosure>, EvaluationError> {
        let _span = tracing::info_span!("evaluate", species, count).entered();

        let rule = self
            .catalog
            .species(species)
            .ok_or(EvaluationError::InvalidSpecies)?;

        if count <= 0 {
            return Err(EvaluationError::InvalidQuantity);
        }

        // A request this large cannot fit anywhere.
        let Some(required) = (rule.size as i64).checked_mul(count) else {
            debug!("request for {count} x {species} overflows the space computation");
            return Err(EvaluationError::NoViableEnclosure);
        };

        let viable: Vec<ViableEnclosure> = self
            .catalog
            .enclosures()
            .iter()
            .filter_map(
                |enclosure| match self.assess(species, rule, enclosure, required) {
                    Ok(viable) => Some(viable),
                    Err(rejection) => {
                        debug!("enclosure {} rejected for {species}: {rejection:?}", enclosure.id);
                        None
                    }
                },
            )
            .collect();

        if viable.is_empty() {
            Err(EvaluationError::NoViableEnclosure)
        } else {
            Ok(viable)
        }
    }

    fn assess(
        &self,
        species: &str,
        rule: &SpeciesRule,
        enclosure: &Enclosure,
        required: i64,
    ) -> Result<ViableEnclosure, Rejection> {
        if let Some(exclusive) = &rule.exclusive_biome {
            if enclosure.biomes != *exclusive {
                return Err(Rejection::ExclusiveBiomeMismatch);
            }
        }

        let occupied: i64 = enclosure
            .occupants
            .iter()
            .map(|occupant| self.unit_size(&occupant.species) * occupant.count as i64)
            .sum();

        let overhead = if !enclosure.is_empty() && !enclosure.houses(species) {
            MIXED_HABITAT_OVERHEAD
        } else {
            0
        };

        let remaining = enclosure.capacity as i64 - occupied - overhead;

        if rule.biomes.is_disjoint(&enclosure.biomes) {
            return Err(Rejection::IncompatibleBiome);
        }

        let cohabitation_allowed = if rule.predator {
            enclosure.houses_only(species)
        } else {
            !self.has_predator_resident(enclosure)
        };
        if !cohabitation_allowed {
            return Err(Rejection::PredatorConflict);
        }

        if remaining < required {
            return Err(Rejection::InsufficientSpace {
                remaining,
                required,
            });
        }

        Ok(ViableEnclosure {
            id: enclosure.id,
            free_space: remaining - required,
            capacity: enclosure.capacity,
        })
    }

    // Occupants always resolve in a `Catalog`; a miss counts as taking no space.
    fn unit_size(&self, species: &str) -> i64 {
        self.catalog
            .species(species)
            .map_or(0, |rule| rule.size as i64)
    }

    fn has_predator_resident(&self, enclosure: &Enclosure) -> bool {
        enclosure.occupants.iter().any(|occupant| {
            self.catalog
                .species(&occupant.species)
                .is_some_and(|rule| rule.predator)
        })
    }
}

#[cfg(test)]
const SYNTHETIC_SPECIES: [&str; 5] = ["PREY_A", "PREY_B", "PREY_C", "PRED_A", "PRED_B"];

#[cfg(test)]
const SYNTHETIC_BIOMES: [&str; 3] = ["mata", "lago", "mata e lago"];

#[cfg(test)]
fn synthetic_species() -> HashMap<String, SpeciesRule> {
    HashMap::from([
        ("PREY_A".to_string(), SpeciesRule::new(1, &["mata"], false)),
        (
            "PREY_B".to_string(),
            SpeciesRule::new(2, &["mata", "lago"], false).with_exclusive_biome("mata e lago"),
        ),
        ("PREY_C".to_string(), SpeciesRule::new(1, &["mata"], false)),
        ("PRED_A".to_string(), SpeciesRule::new(2, &["mata"], true)),
        ("PRED_B".to_string(), SpeciesRule::new(3, &["lago"], true)),
    ])
}

#[cfg(test)]
fn evaluator_for(enclosures: Vec<Enclosure>) -> Evaluator {
    Evaluator::new(Catalog::new(synthetic_species(), enclosures).unwrap())
}

/// Randomly generated enclosure; capacity is derived so it is never overfull.
#[cfg(test)]
#[derive(Debug, Clone, Arbitrary)]
struct SyntheticEnclosure {
    #[proptest(strategy = "0usize..3")]
    biome: usize,
    #[proptest(strategy = "1u32..20")]
    spare: u32,
    #[proptest(strategy = "proptest::collection::vec((0usize..5, 1u32..4), 0..3)")]
    occupants: Vec<(usize, u32)>,
}

#[cfg(test)]
fn build_evaluator(synthetic: &[SyntheticEnclosure]) -> Evaluator {
    let species = synthetic_species();
    let enclosures = synthetic
        .iter()
        .enumerate()
        .map(|(index, s)| {
            let occupied: u32 = s
                .occupants
                .iter()
                .map(|(sp, count)| species[SYNTHETIC_SPECIES[*sp]].size * count)
                .sum();
            s.occupants.iter().fold(
                Enclosure::new(
                    index as EnclosureId + 1,
                    SYNTHETIC_BIOMES[s.biome],
                    occupied + s.spare,
                ),
                |enclosure, (sp, count)| enclosure.with_occupants(SYNTHETIC_SPECIES[*sp], *count),
            )
        })
        .collect();
    Evaluator::new(Catalog::new(species, enclosures).unwrap())
}

#[cfg(test)]
fn viable_ids(evaluator: &Evaluator, species: &str, count: i64) -> Vec<EnclosureId> {
    match evaluator.evaluate(species, count) {
        Ok(viable) => viable.iter().map(|v| v.id).collect(),
        Err(EvaluationError::NoViableEnclosure) => vec![],
        Err(e) => panic!("unexpected validation error {e}"),
    }
}


#[cfg(test)]
proptest! {
    #[test]
    fn unknown_species_is_invalid(name in "[a-z]{1,12}", count: i64) {
        let evaluator = evaluator_for(vec![Enclosure::new(1, "mata", 10)]);
        prop_assert_eq!(evaluator.evaluate(&name, count), Err(EvaluationError::InvalidSpecies));
    }

    #[test]
    fn non_positive_count_is_invalid(species in 0usize..5, count in i64::MIN..=0) {
        let evaluator = evaluator_for(vec![Enclosure::new(1, "mata", 10)]);
        prop_assert_eq!(
            evaluator.evaluate(SYNTHETIC_SPECIES[species], count),
            Err(EvaluationError::InvalidQuantity)
        );
    }

    #[test]
    fn evaluation_is_idempotent(
        enclosures in vec(any::<SyntheticEnclosure>(), 1..6),
        species in 0usize..5,
        count in 1i64..10,
    ) {
        let evaluator = build_evaluator(&enclosures);
        let first = evaluator.evaluate(SYNTHETIC_SPECIES[species], count);
        let second = evaluator.evaluate(SYNTHETIC_SPECIES[species], count);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn larger_requests_never_gain_enclosures(
        enclosures in vec(any::<SyntheticEnclosure>(), 1..6),
        species in 0usize..5,
        count in 1i64..10,
        extra in 1i64..10,
    ) {
        let evaluator = build_evaluator(&enclosures);
        let smaller = viable_ids(&evaluator, SYNTHETIC_SPECIES[species], count);
        let larger = viable_ids(&evaluator, SYNTHETIC_SPECIES[species], count + extra);
        prop_assert!(larger.iter().all(|id| smaller.contains(id)));
    }

    #[test]
    fn predators_never_join_other_species(
        enclosures in vec(any::<SyntheticEnclosure>(), 1..6),
        species in 3usize..5,
        count in 1i64..4,
    ) {
        let evaluator = build_evaluator(&enclosures);
        let species = SYNTHETIC_SPECIES[species];
        for id in viable_ids(&evaluator, species, count) {
            let enclosure = &evaluator.catalog().enclosures()[id as usize - 1];
            prop_assert!(enclosure.houses_only(species));
        }
    }

    #[test]
    fn prey_never_joins_predators(
        enclosures in vec(any::<SyntheticEnclosure>(), 1..6),
        species in 0usize..3,
        count in 1i64..4,
    ) {
        let evaluator = build_evaluator(&enclosures);
        for id in viable_ids(&evaluator, SYNTHETIC_SPECIES[species], count) {
            let enclosure = &evaluator.catalog().enclosures()[id as usize - 1];
            prop_assert!(!evaluator.has_predator_resident(enclosure));
        }
    }

    #[test]
    fn empty_enclosure_fits_floor_of_capacity(capacity in 1u32..60, species in 0usize..5) {
        let evaluator = evaluator_for(vec![Enclosure::new(1, "mata e lago", capacity)]);
        let species = SYNTHETIC_SPECIES[species];
        let size = evaluator.catalog().species(species).unwrap().size;
        let fits = (capacity / size) as i64;

        if fits > 0 {
            let viable = evaluator.evaluate(species, fits).unwrap();
            prop_assert_eq!(viable[0].free_space, (capacity % size) as i64);
        }
        prop_assert_eq!(
            evaluator.evaluate(species, fits + 1),
            Err(EvaluationError::NoViableEnclosure)
        );
    }
}
