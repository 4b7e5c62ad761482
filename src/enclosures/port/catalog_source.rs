use crate::enclosures::domain::Catalog;

/// Something that can hand an evaluator its catalog at construction time.
pub trait CatalogSource {
    fn load(&self) -> Result<Catalog, anyhow::Error>;
}
