//! Toast notifications.
//!
//! The page loads SweetAlert2; [`Toast::swal_options`] produces the option
//! object passed to `Swal.fire`. The notifier itself is injected so managers
//! never depend on that global.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::time::Duration;

use serde::Serialize;
use serde_json::json;

/// Toast severity, also the SweetAlert2 icon name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// A transient notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub text: Option<String>,
    /// Auto-dismiss after this long; `None` waits for confirmation.
    pub timer: Option<Duration>,
    /// Corner toast instead of a centered modal.
    pub corner: bool,
}

impl Toast {
    #[must_use]
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self { kind, title: title.into(), text: None, timer: None, corner: false }
    }

    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    #[must_use]
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title)
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_timer(mut self, timer: Duration) -> Self {
        self.timer = Some(timer);
        self
    }

    #[must_use]
    pub fn in_corner(mut self) -> Self {
        self.corner = true;
        self
    }

    /// SweetAlert2 option object for this toast.
    #[must_use]
    pub fn swal_options(&self) -> serde_json::Value {
        let mut options = json!({
            "icon": self.kind,
            "title": self.title,
            "showConfirmButton": self.timer.is_none(),
        });
        let Some(map) = options.as_object_mut() else {
            return options;
        };
        if let Some(text) = &self.text {
            map.insert("text".to_owned(), json!(text));
        }
        if let Some(timer) = self.timer {
            map.insert("timer".to_owned(), json!(u64::try_from(timer.as_millis()).unwrap_or(u64::MAX)));
        } else {
            map.insert("confirmButtonColor".to_owned(), json!("#2563eb"));
        }
        if self.corner {
            map.insert("toast".to_owned(), json!(true));
            map.insert("position".to_owned(), json!("top-end"));
            map.insert("timerProgressBar".to_owned(), json!(self.timer.is_some()));
        }
        options
    }
}

/// Sink for user-visible notifications.
pub trait Notifier {
    fn notify(&self, toast: Toast);
}
