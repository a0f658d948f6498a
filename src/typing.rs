//! Typing headline.
//!
//! A self-rescheduling step machine: each [`TypingEffect::step`] produces the
//! text to display and the delay before the next step. The host arms a timer
//! with that delay and steps again when it fires, forever.
//!
//! Indexing is by `char`, so multi-byte phrases never split a code point.

#[cfg(test)]
#[path = "typing_test.rs"]
mod typing_test;

use std::time::Duration;

use crate::config::FolioConfig;

/// Per-step delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingSpeeds {
    pub typing: Duration,
    pub deleting: Duration,
    /// Hold time once a phrase is fully typed.
    pub pause: Duration,
}

impl TypingSpeeds {
    #[must_use]
    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            typing: Duration::from_millis(config.typing_speed_ms),
            deleting: Duration::from_millis(config.deleting_speed_ms),
            pause: Duration::from_millis(config.typing_pause_ms),
        }
    }
}

/// Output of one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub next: Duration,
}

#[derive(Clone, Debug)]
pub struct TypingEffect {
    phrases: Vec<String>,
    phrase_index: usize,
    char_index: usize,
    deleting: bool,
    speeds: TypingSpeeds,
}

impl TypingEffect {
    /// `None` when there is nothing to type.
    #[must_use]
    pub fn new(phrases: Vec<String>, speeds: TypingSpeeds) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }
        Some(Self { phrases, phrase_index: 0, char_index: 0, deleting: false, speeds })
    }

    #[must_use]
    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    #[must_use]
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Type or delete one character and report the next delay.
    pub fn step(&mut self) -> TypingFrame {
        let phrase = self.phrases.get(self.phrase_index).map_or("", String::as_str);
        let length = phrase.chars().count();

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(length.max(1));
        }
        let text: String = phrase.chars().take(self.char_index).collect();

        let mut next = if self.deleting { self.speeds.deleting } else { self.speeds.typing };
        if !self.deleting && self.char_index >= length {
            next = self.speeds.pause;
            self.deleting = true;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            log::debug!("typing advanced to phrase {}", self.phrase_index);
        }

        TypingFrame { text, next }
    }
}
