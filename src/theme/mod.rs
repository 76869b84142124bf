//! Theme Layer
//!
//! Color palette and typography constants.

pub mod colors;
pub mod typography;
