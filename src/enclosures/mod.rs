use anyhow::Context;

pub mod adapter;
pub mod domain;
pub mod port;

use self::{domain::Evaluator, port::catalog_source::CatalogSource};

pub fn create_evaluator(source: &impl CatalogSource) -> anyhow::Result<Evaluator> {
    let catalog = source.load().context("while loading the enclosure catalog")?;
    let evaluator = Evaluator::new(catalog);
    log::info!(
        "loaded catalog with {} enclosures",
        evaluator.catalog().enclosures().len()
    );
    Ok(evaluator)
}

#[cfg(test)]
mod tests {
    use crate::enclosures::{adapter::reference_catalog::ReferenceCatalog, domain::EvaluationError};

    use super::*;

    fn descriptors(evaluator: &Evaluator, species: &str, count: i64) -> Vec<String> {
        evaluator
            .evaluate(species, count)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn reference() -> Evaluator {
        let _ = env_logger::builder().is_test(true).try_init();
        create_evaluator(&ReferenceCatalog).unwrap()
    }

    #[test]
    fn rejects_invalid_input() {
        let evaluator = reference();
        assert_eq!(
            evaluator.evaluate("UNICORNIO", 1),
            Err(EvaluationError::InvalidSpecies)
        );
        assert_eq!(
            evaluator.evaluate("MACACO", 0),
            Err(EvaluationError::InvalidQuantity)
        );
        assert_eq!(
            evaluator.evaluate("MACACO", 10),
            Err(EvaluationError::NoViableEnclosure)
        );
    }

    #[test]
    fn monkeys_share_with_monkeys_and_gazelles() {
        let evaluator = reference();
        assert_eq!(
            descriptors(&evaluator, "MACACO", 2),
            vec![
                "Recinto 1 (espaço livre: 5 total: 10)",
                "Recinto 2 (espaço livre: 3 total: 5)",
                "Recinto 3 (espaço livre: 2 total: 7)",
            ]
        );
        // one more monkey in enclosure 1 takes exactly one unit
        assert_eq!(
            descriptors(&evaluator, "MACACO", 1)[0],
            "Recinto 1 (espaço livre: 6 total: 10)"
        );
    }

    #[test]
    fn crocodile_gets_the_river() {
        let evaluator = reference();
        assert_eq!(
            descriptors(&evaluator, "CROCODILO", 1),
            vec!["Recinto 4 (espaço livre: 5 total: 8)"]
        );
    }

    #[test]
    fn lions_only_join_lions() {
        let evaluator = reference();
        assert_eq!(
            descriptors(&evaluator, "LEAO", 1),
            vec!["Recinto 5 (espaço livre: 3 total: 9)"]
        );
        // enclosure 5 has room but already holds a different predator
        assert_eq!(
            evaluator.evaluate("LEOPARDO", 1),
            Err(EvaluationError::NoViableEnclosure)
        );
    }

    #[test]
    fn hippo_needs_savanna_and_river() {
        let evaluator = reference();
        assert_eq!(
            descriptors(&evaluator, "HIPOPOTAMO", 1),
            vec!["Recinto 3 (espaço livre: 0 total: 7)"]
        );
        assert_eq!(
            evaluator.evaluate("HIPOPOTAMO", 2),
            Err(EvaluationError::NoViableEnclosure)
        );
    }

    #[test]
    fn gazelles_pay_overhead_only_when_mixing() {
        let evaluator = reference();
        assert_eq!(
            descriptors(&evaluator, "GAZELA", 1),
            vec![
                "Recinto 1 (espaço livre: 4 total: 10)",
                "Recinto 3 (espaço livre: 3 total: 7)",
            ]
        );
    }
}
