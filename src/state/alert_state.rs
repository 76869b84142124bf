//! AlertState - Transient Alerts with Replaceable Dismiss Timers
//!
//! Write results surface as a toast with title/subtitle; local validation
//! failures surface as an inline notice. Each slot carries a generation
//! counter: re-triggering an alert bumps the generation, so the previous
//! auto-dismiss task finds its ticket stale and leaves the newer alert
//! alone instead of stacking timers.

use crate::eventing::app_event::MutationKind;

/// Toast auto-dismiss window (ms)
pub const TOAST_DISMISS_MS: u64 = 8000;
/// Validation notice auto-dismiss window (ms)
pub const VALIDATION_DISMISS_MS: u64 = 5000;

/// Toast flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// The toast currently on screen
#[derive(Debug, Clone)]
pub struct ToastAlert {
    pub kind: AlertKind,
    pub title: String,
    pub subtitle: String,
    /// Mutation category that raised the toast
    pub source: Option<MutationKind>,
}

/// The inline validation notice currently on screen
#[derive(Debug, Clone)]
pub struct ValidationNotice {
    pub message: String,
}

/// Per-page alert bookkeeping
#[derive(Debug, Default)]
pub struct AlertState {
    toast: Option<ToastAlert>,
    toast_generation: u64,
    validation: Option<ValidationNotice>,
    validation_generation: u64,
}

impl AlertState {
    pub fn toast(&self) -> Option<&ToastAlert> {
        self.toast.as_ref()
    }

    pub fn validation(&self) -> Option<&ValidationNotice> {
        self.validation.as_ref()
    }

    /// Show (or replace) the toast. Returns the dismissal ticket; the
    /// caller schedules the auto-dismiss with it.
    pub fn show_toast(
        &mut self,
        kind: AlertKind,
        subtitle: impl Into<String>,
        source: Option<MutationKind>,
    ) -> u64 {
        let title = match kind {
            AlertKind::Success => "Success!",
            AlertKind::Error => "Failed!",
        };
        self.toast = Some(ToastAlert {
            kind,
            title: title.to_string(),
            subtitle: subtitle.into(),
            source,
        });
        self.toast_generation += 1;
        self.toast_generation
    }

    /// Manual close
    pub fn dismiss_toast(&mut self) {
        self.toast = None;
        self.toast_generation += 1;
    }

    /// Timer-driven close; a stale ticket is ignored
    pub fn dismiss_toast_if(&mut self, ticket: u64) -> bool {
        if ticket == self.toast_generation && self.toast.is_some() {
            self.toast = None;
            true
        } else {
            false
        }
    }

    /// Show (or replace) the inline validation notice
    pub fn show_validation(&mut self, message: impl Into<String>) -> u64 {
        self.validation = Some(ValidationNotice {
            message: message.into(),
        });
        self.validation_generation += 1;
        self.validation_generation
    }

    pub fn clear_validation(&mut self) {
        self.validation = None;
        self.validation_generation += 1;
    }

    /// Timer-driven close; a stale ticket is ignored
    pub fn dismiss_validation_if(&mut self, ticket: u64) -> bool {
        if ticket == self.validation_generation && self.validation.is_some() {
            self.validation = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrigger_replaces_dismiss_ticket() {
        let mut alerts = AlertState::default();
        let first = alerts.show_toast(AlertKind::Success, "saved", None);
        let second = alerts.show_toast(AlertKind::Error, "failed", None);

        // The first timer fires late and must not clear the newer alert.
        assert!(!alerts.dismiss_toast_if(first));
        assert_eq!(alerts.toast().map(|t| t.kind), Some(AlertKind::Error));

        assert!(alerts.dismiss_toast_if(second));
        assert!(alerts.toast().is_none());
    }

    #[test]
    fn test_titles_follow_kind() {
        let mut alerts = AlertState::default();
        alerts.show_toast(AlertKind::Success, "done", None);
        assert_eq!(alerts.toast().map(|t| t.title.as_str()), Some("Success!"));
        alerts.show_toast(AlertKind::Error, "boom", None);
        assert_eq!(alerts.toast().map(|t| t.title.as_str()), Some("Failed!"));
    }

    #[test]
    fn test_manual_dismiss_invalidates_timer() {
        let mut alerts = AlertState::default();
        let ticket = alerts.show_toast(AlertKind::Success, "saved", None);
        alerts.dismiss_toast();
        assert!(!alerts.dismiss_toast_if(ticket));
    }

    #[test]
    fn test_validation_slot_is_independent() {
        let mut alerts = AlertState::default();
        alerts.show_toast(AlertKind::Success, "saved", None);
        let ticket = alerts.show_validation("Selected tests must belong to the same cohort");
        assert!(alerts.toast().is_some());
        assert!(alerts.validation().is_some());
        assert!(alerts.dismiss_validation_if(ticket));
        assert!(alerts.toast().is_some());
    }
}
