//! Service Layer
//!
//! Abstraction over the reporting platform's REST API: the typed client,
//! the command/event hub, the tokio bridge, and debounce bookkeeping.
//!
//! ```text
//! controllers ──ServiceCommand──▶ ServiceHub ──HTTP──▶ backend
//!      ▲                              │
//!      └──────── AppEvent ◀───────────┘
//! ```

pub mod api;
pub mod debounce;
pub mod hub;
pub mod runtime;

pub use api::AdminApi;
pub use debounce::{Debouncer, SEARCH_DEBOUNCE_MS};
pub use hub::{ServiceCommand, ServiceHub};
