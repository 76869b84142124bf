//! CTR Admin GUI Client Library
//!
//! This crate provides the main application logic for the CTR Admin
//! client, a native administration UI for the clinical trial reporting
//! platform: protocol/user management, report-profile (blind/hide)
//! configuration, and capability management.

pub mod app;
pub mod components;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod features;
pub mod i18n;
pub mod services;
pub mod state;
pub mod theme;
pub mod utils;
