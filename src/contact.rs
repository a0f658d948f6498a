//! Contact form submission flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page has no backend. Submission goes through the [`Submitter`]
//! capability; the default [`DelaySubmitter`] only waits, so the visible
//! sequence (loading label, toast, reset, label restore) is exercised end to
//! end and a real transport can be dropped in later.
//!
//! ERROR HANDLING
//! ==============
//! A failed submit shows an error toast and keeps the form contents. The
//! button is re-enabled and relabeled on both paths. There is no retry.

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::FolioConfig;
use crate::consts::{CONTACT_FORM_ID, LOADING_LABEL_HTML, SUBMIT_BUTTON_SELECTOR};
use crate::dom::Dom;
use crate::error::SubmitError;
use crate::notify::{Notifier, Toast};

pub const SUCCESS_TITLE: &str = "Message sent successfully!";
pub const FAILURE_TITLE: &str = "Failed to send message. Please try again.";

/// Delivers the contact form.
#[async_trait(?Send)]
pub trait Submitter {
    async fn submit(&self) -> Result<(), SubmitError>;
}

/// Resolves successfully after a fixed delay, using an injected sleep.
#[derive(Clone, Debug)]
pub struct DelaySubmitter<F> {
    delay: Duration,
    sleep: F,
}

impl<F> DelaySubmitter<F> {
    pub fn new(delay: Duration, sleep: F) -> Self {
        Self { delay, sleep }
    }
}

#[async_trait(?Send)]
impl<F, Fut> Submitter for DelaySubmitter<F>
where
    F: Fn(Duration) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    async fn submit(&self) -> Result<(), SubmitError> {
        (self.sleep)(self.delay).await;
        Ok(())
    }
}

/// The bound form and its submit button.
#[derive(Clone, Debug)]
pub struct ContactForm<N> {
    form: N,
    button: Option<N>,
    toast_duration: Duration,
}

impl<N: Clone + PartialEq + std::fmt::Debug> ContactForm<N> {
    /// `None` when the page has no contact form.
    pub fn bind<D: Dom<Node = N>>(dom: &D, config: &FolioConfig) -> Option<Self> {
        let form = dom.by_id(CONTACT_FORM_ID)?;
        let button = dom.query_within(&form, SUBMIT_BUTTON_SELECTOR);
        Some(Self { form, button, toast_duration: Duration::from_millis(config.toast_duration_ms) })
    }

    #[must_use]
    pub fn form(&self) -> &N {
        &self.form
    }

    /// Full submission: loading state, submit, toast, restore.
    pub async fn run<D, No, S>(&self, dom: &D, notifier: &No, submitter: &S) -> Result<(), SubmitError>
    where
        D: Dom<Node = N>,
        No: Notifier,
        S: Submitter + ?Sized,
    {
        let original_label = self.begin(dom);
        let result = submitter.submit().await;
        match &result {
            Ok(()) => {
                notifier.notify(Toast::success(SUCCESS_TITLE).with_timer(self.toast_duration).in_corner());
                dom.reset_form(&self.form);
            }
            Err(err) => {
                log::warn!("contact form submission failed: {err}");
                notifier.notify(Toast::error(FAILURE_TITLE).with_timer(self.toast_duration).in_corner());
            }
        }
        self.finish(dom, original_label.as_deref());
        result
    }

    /// Show the loading label and disable the button. Returns the label to restore.
    fn begin<D: Dom<Node = N>>(&self, dom: &D) -> Option<String> {
        let button = self.button.as_ref()?;
        let label = dom.text(button);
        dom.set_inner_html(button, LOADING_LABEL_HTML);
        dom.set_disabled(button, true);
        Some(label)
    }

    fn finish<D: Dom<Node = N>>(&self, dom: &D, label: Option<&str>) {
        let Some(button) = &self.button else {
            return;
        };
        if let Some(label) = label {
            dom.set_text(button, label);
        }
        dom.set_disabled(button, false);
    }
}
