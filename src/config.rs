//! Tunable page behavior constants.
//!
//! DESIGN
//! ======
//! Every timing, threshold and phrase lives in one serde struct with
//! defaults, so a page can override a subset through an embedded
//! `<script type="application/json" id="folio-config">` block and tests can
//! shrink values without touching the managers.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// One reveal group: every element matching `selector` gets `class`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RevealGroup {
    pub selector: String,
    pub class: String,
}

impl RevealGroup {
    fn new(selector: &str, class: &str) -> Self {
        Self { selector: selector.to_owned(), class: class.to_owned() }
    }
}

/// Page behavior configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FolioConfig {
    /// `localStorage` key holding `"light"` or `"dark"`.
    pub theme_storage_key: String,
    /// Added to the scroll offset before testing section bounds.
    pub scroll_lookahead_px: f64,
    /// Space left above a section when a nav link scrolls to it.
    pub header_offset_px: f64,
    pub scrolled_threshold_px: f64,
    pub back_to_top_threshold_px: f64,

    pub reveal_groups: Vec<RevealGroup>,
    pub reveal_stagger_secs: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub skill_threshold: f64,
    pub skill_fill_delay_ms: u64,

    pub typing_phrases: Vec<String>,
    pub typing_speed_ms: u64,
    pub deleting_speed_ms: u64,
    pub typing_pause_ms: u64,
    pub typing_start_delay_ms: u64,

    pub submit_delay_ms: u64,
    pub toast_duration_ms: u64,

    pub resume_extension: String,
    pub resume_toast_ms: u64,

    /// Stylesheets preloaded into `<head>` at startup.
    pub preload_stylesheets: Vec<String>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            theme_storage_key: "theme".to_owned(),
            scroll_lookahead_px: 100.0,
            header_offset_px: 70.0,
            scrolled_threshold_px: 50.0,
            back_to_top_threshold_px: 300.0,

            reveal_groups: vec![
                RevealGroup::new(".hero-text", "fade-in"),
                RevealGroup::new(".hero-image", "fade-in"),
                RevealGroup::new(".about-text", "slide-in-left"),
                RevealGroup::new(".about-image", "slide-in-right"),
                RevealGroup::new(".timeline-item", "fade-in"),
                RevealGroup::new(".project-card", "fade-in"),
                RevealGroup::new(".skill-category", "fade-in"),
                RevealGroup::new(".education-item", "slide-in-left"),
                RevealGroup::new(".cert-item", "fade-in"),
                RevealGroup::new(".award-item", "fade-in"),
                RevealGroup::new(".contact-item", "slide-in-left"),
                RevealGroup::new(".contact-form", "slide-in-right"),
            ],
            reveal_stagger_secs: 0.1,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_owned(),
            skill_threshold: 0.5,
            skill_fill_delay_ms: 500,

            typing_phrases: vec![
                "IoT & Cybersecurity Engineer".to_owned(),
                "Smart Technology Innovator".to_owned(),
                "Automation Systems Developer".to_owned(),
                "Blockchain Technology Enthusiast".to_owned(),
            ],
            typing_speed_ms: 100,
            deleting_speed_ms: 50,
            typing_pause_ms: 2000,
            typing_start_delay_ms: 1000,

            submit_delay_ms: 2000,
            toast_duration_ms: 2000,

            resume_extension: ".pdf".to_owned(),
            resume_toast_ms: 1500,

            preload_stylesheets: vec![
                "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap"
                    .to_owned(),
            ],
        }
    }
}

impl FolioConfig {
    /// Parse a (possibly partial) JSON object over the defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn skill_fill_delay(&self) -> Duration {
        Duration::from_millis(self.skill_fill_delay_ms)
    }

    #[must_use]
    pub fn typing_start_delay(&self) -> Duration {
        Duration::from_millis(self.typing_start_delay_ms)
    }

    #[must_use]
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}
