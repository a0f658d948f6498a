//! Error types shared by the core managers.
//!
//! ERROR HANDLING
//! ==============
//! Nothing in the page behavior is fatal. Submission failures are shown to
//! the visitor, config failures fall back to defaults, and an unknown stored
//! theme falls back to light.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure reported by a contact form submit capability.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("submission transport failed: {0}")]
    Transport(String),
}

/// Failure to read the embedded page configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A stored theme value that is neither `light` nor `dark`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0:?}")]
pub struct ParseThemeError(pub String);

/// Failure while booting the browser host.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("no window object")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("javascript error: {0}")]
    Js(String),
}
