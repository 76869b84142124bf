//! MultiSelect Component Family
//!
//! The paged option catalog, the confirmed/pending selection state, chip
//! overflow fitting, and the dropdown field component built on them.

pub mod catalog;
pub mod chips;
pub mod multi_select;
pub mod selection;

pub use catalog::{CatalogItem, CatalogRequest, SelectionCatalog};
pub use multi_select::MultiSelectField;
pub use selection::{SelectionChange, SelectionState, ALL_CHIP_ID};
