use std::collections::HashMap;

use anyhow::Context;

use crate::enclosures::{
    domain::{
        types::{Enclosure, SpeciesRule},
        Catalog,
    },
    port::catalog_source::CatalogSource,
};

/// The built-in zoo: five enclosures and the six species it is licensed to keep.
pub struct ReferenceCatalog;

impl CatalogSource for ReferenceCatalog {
    fn load(&self) -> Result<Catalog, anyhow::Error> {
        let species = HashMap::from([
            ("LEAO".to_string(), SpeciesRule::new(3, &["savana"], true)),
            ("LEOPARDO".to_string(), SpeciesRule::new(2, &["savana"], true)),
            ("CROCODILO".to_string(), SpeciesRule::new(3, &["rio"], true)),
            (
                "MACACO".to_string(),
                SpeciesRule::new(1, &["savana", "floresta"], false),
            ),
            ("GAZELA".to_string(), SpeciesRule::new(2, &["savana"], false)),
            (
                "HIPOPOTAMO".to_string(),
                SpeciesRule::new(4, &["savana", "rio"], false).with_exclusive_biome("savana e rio"),
            ),
        ]);

        let enclosures = vec![
            Enclosure::new(1, "savana", 10).with_occupants("MACACO", 3),
            Enclosure::new(2, "floresta", 5),
            Enclosure::new(3, "savana e rio", 7).with_occupants("GAZELA", 1),
            Enclosure::new(4, "rio", 8),
            Enclosure::new(5, "savana", 9).with_occupants("LEAO", 1),
        ];

        Catalog::new(species, enclosures).context("building the reference catalog")
    }
}
