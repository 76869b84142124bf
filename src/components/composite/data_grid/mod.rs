//! DataGrid Component Family
//!
//! A generic tabular view decoupled from any specific row shape: columns
//! drive rendering, sorting cycles asc/desc, row checkboxes keep an
//! exception set, and rows can be edited inline through flat buffers.

pub mod cell;
pub mod column;
pub mod data_grid;
pub mod edit;
pub mod pagination;
pub mod row_selection;
pub mod sort;

pub use cell::{display_value, CellValue, ColumnOptions, GridRow};
pub use column::{ColumnSpec, ColumnWidth};
pub use data_grid::DataGrid;
pub use edit::{EditBuffer, EditKeyMap};
pub use pagination::Pagination;
pub use row_selection::{CheckboxChange, CheckboxChangeKind, CheckboxState, RowSelection};
pub use sort::{SortDirection, SortEvent, SortState};
