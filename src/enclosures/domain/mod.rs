pub mod catalog;
pub mod evaluator;
pub mod types;

pub use catalog::{Catalog, CatalogError};
pub use evaluator::{EvaluationError, Evaluator, ViableEnclosure};
