//! Light/dark theme preference.
//!
//! Reads the persisted preference once at startup and writes it back on every
//! toggle. The active value is mirrored as a `data-theme` attribute on
//! `<html>`, and the toggle button's icon always shows the *other* mode.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use crate::consts::{DARK_ICON_CLASS, LIGHT_ICON_CLASS, THEME_ATTRIBUTE, THEME_ICON_SELECTOR, THEME_TOGGLE_ID};
use crate::dom::Dom;
use crate::error::ParseThemeError;
use crate::storage::PreferenceStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon class for the toggle button: sun when dark, moon when light.
    #[must_use]
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Light => LIGHT_ICON_CLASS,
            Self::Dark => DARK_ICON_CLASS,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseThemeError(other.to_owned())),
        }
    }
}

/// Owns the current theme and its storage key.
#[derive(Clone, Debug)]
pub struct ThemeCoordinator {
    theme: Theme,
    storage_key: String,
}

impl ThemeCoordinator {
    /// Read the persisted preference, defaulting to light.
    pub fn load<S: PreferenceStore>(store: &S, storage_key: &str) -> Self {
        let theme = match store.get(storage_key) {
            None => Theme::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                log::warn!("ignoring stored theme: {err}");
                Theme::default()
            }),
        };
        Self { theme, storage_key: storage_key.to_owned() }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Mirror the current theme onto the document and the toggle icon.
    pub fn apply<D: Dom>(&self, dom: &D) {
        if let Some(root) = dom.document_element() {
            dom.set_attribute(&root, THEME_ATTRIBUTE, self.theme.as_str());
        }
        let icon = dom
            .by_id(THEME_TOGGLE_ID)
            .and_then(|toggle| dom.query_within(&toggle, THEME_ICON_SELECTOR));
        if let Some(icon) = icon {
            dom.set_class_name(&icon, self.theme.icon_class());
        }
    }

    /// Flip, persist and re-apply. Returns the new theme.
    pub fn toggle<D: Dom, S: PreferenceStore>(&mut self, dom: &D, store: &S) -> Theme {
        self.theme = self.theme.toggled();
        store.set(&self.storage_key, self.theme.as_str());
        self.apply(dom);
        log::debug!("theme switched to {}", self.theme);
        self.theme
    }
}
