//! Resume download guard.
//!
//! The resume link must point at a file with the configured extension. A bad
//! link is stopped before navigation and reported; a good one is allowed
//! through with a short confirmation.

#[cfg(test)]
#[path = "resume_test.rs"]
mod resume_test;

use std::time::Duration;

use crate::config::FolioConfig;
use crate::notify::{Notifier, Toast};

/// Whether the browser should follow the clicked link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkDecision {
    Allow,
    Prevent,
}

#[derive(Clone, Debug)]
pub struct ResumeGuard {
    extension: String,
    toast_duration: Duration,
}

impl ResumeGuard {
    #[must_use]
    pub fn new(config: &FolioConfig) -> Self {
        Self {
            extension: config.resume_extension.clone(),
            toast_duration: Duration::from_millis(config.resume_toast_ms),
        }
    }

    /// Check `href` and notify. A missing `href` is invalid.
    pub fn on_click<No: Notifier>(&self, notifier: &No, href: Option<&str>) -> LinkDecision {
        let valid = href.is_some_and(|href| href.ends_with(&self.extension));
        if !valid {
            log::warn!("resume link {href:?} does not end with {}", self.extension);
            notifier.notify(Toast::error("Resume Not Found").with_text("Resume PDF not found!"));
            return LinkDecision::Prevent;
        }
        notifier.notify(
            Toast::success("Download Started")
                .with_text("Your resume PDF is downloading!")
                .with_timer(self.toast_duration),
        );
        LinkDecision::Allow
    }
}
