pub mod json_catalog;
pub mod line_protocol;
pub mod reference_catalog;
