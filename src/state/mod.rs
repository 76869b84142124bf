//! State Layer
//!
//! Per-page state entities updated from the workspace event pump and
//! observed by pages. All bookkeeping here is plain data, testable
//! without GPUI.

pub mod alert_state;
pub mod capabilities_state;
pub mod i18n_state;
pub mod log_state;
pub mod profiles_state;
pub mod protocols_state;
pub mod tabs_state;
