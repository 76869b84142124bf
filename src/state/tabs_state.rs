//! TabsState - Page Navigation State

use crate::app::navigation::ActivePage;

/// State for page navigation
#[derive(Debug, Default)]
pub struct TabsState {
    /// Currently active page
    pub active_page: ActivePage,
}

impl TabsState {
    /// Set the active page (from sidebar click)
    pub fn set_active_page(&mut self, page: ActivePage) {
        self.active_page = page;
    }
}
