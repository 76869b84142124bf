//! Component Layer
//!
//! Reusable UI components, split into primitives (buttons, checkboxes,
//! inputs, chips) and composites (modals, alerts, the multi-select field,
//! the data grid).

pub mod composite;
pub mod layout;
pub mod primitives;
