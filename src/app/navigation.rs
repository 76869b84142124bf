//! Navigation - Admin Pages

use serde::{Deserialize, Serialize};

/// Available pages in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActivePage {
    /// Protocol and user management
    #[default]
    Protocols,
    /// Report profile (blind/hide) configuration
    Profiles,
    /// Capability management
    Capabilities,
}

impl ActivePage {
    /// Get the icon name for the page
    pub fn icon(&self) -> &'static str {
        match self {
            ActivePage::Protocols => "clipboard",
            ActivePage::Profiles => "shield",
            ActivePage::Capabilities => "grid",
        }
    }

    /// Get the translation key for the page title
    pub fn title_key(&self) -> &'static str {
        match self {
            ActivePage::Protocols => "nav-protocols",
            ActivePage::Profiles => "nav-profiles",
            ActivePage::Capabilities => "nav-capabilities",
        }
    }

    /// All pages for the sidebar
    pub fn all() -> &'static [ActivePage] {
        &[
            ActivePage::Protocols,
            ActivePage::Profiles,
            ActivePage::Capabilities,
        ]
    }
}
