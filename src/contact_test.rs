use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::notify::ToastKind;
use crate::test_support::{El, FakeDom, RecordingNotifier};

struct FailingSubmitter;

#[async_trait(?Send)]
impl Submitter for FailingSubmitter {
    async fn submit(&self) -> Result<(), SubmitError> {
        Err(SubmitError::Transport("offline".to_owned()))
    }
}

/// Records the button state observed while the submission is in flight.
struct InFlightSubmitter<'a> {
    dom: &'a FakeDom,
    button: usize,
    seen: RefCell<Option<(String, bool)>>,
}

#[async_trait(?Send)]
impl Submitter for InFlightSubmitter<'_> {
    async fn submit(&self) -> Result<(), SubmitError> {
        let element = self.dom.element(self.button);
        *self.seen.borrow_mut() = Some((element.html, element.disabled));
        Ok(())
    }
}

fn page() -> (FakeDom, usize, usize) {
    let dom = FakeDom::new();
    let form = dom.add(El::new("form").id("contact-form").class("contact-form"));
    dom.add(El::new("input").attr("name", "email").child_of(form));
    let button = dom.add(El::new("button").attr("type", "submit").text("Send Message").child_of(form));
    (dom, form, button)
}

#[test]
fn bind_requires_a_form() {
    let dom = FakeDom::new();
    assert!(ContactForm::bind(&dom, &FolioConfig::default()).is_none());

    let (dom, form, _) = page();
    let contact = ContactForm::bind(&dom, &FolioConfig::default()).expect("form present");
    assert_eq!(contact.form(), &form);
}

#[test]
fn successful_submit_notifies_resets_and_restores_button() {
    let (dom, form, button) = page();
    let notifier = RecordingNotifier::default();
    let contact = ContactForm::bind(&dom, &FolioConfig::default()).expect("form present");
    let delays = RefCell::new(Vec::new());
    let submitter = DelaySubmitter::new(Duration::from_millis(2000), |delay: Duration| {
        delays.borrow_mut().push(delay);
        std::future::ready(())
    });

    let result = block_on(contact.run(&dom, &notifier, &submitter));
    assert!(result.is_ok());
    assert_eq!(*delays.borrow(), vec![Duration::from_millis(2000)]);

    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].title, SUCCESS_TITLE);
    assert_eq!(toasts[0].timer, Some(Duration::from_millis(2000)));
    assert!(toasts[0].corner);

    assert_eq!(dom.element(form).resets, 1);
    let button = dom.element(button);
    assert_eq!(button.text, "Send Message");
    assert_eq!(button.html, "Send Message");
    assert!(!button.disabled);
}

#[test]
fn failed_submit_shows_error_and_keeps_form() {
    let (dom, form, button) = page();
    let notifier = RecordingNotifier::default();
    let contact = ContactForm::bind(&dom, &FolioConfig::default()).expect("form present");

    let result = block_on(contact.run(&dom, &notifier, &FailingSubmitter));
    assert!(matches!(result, Err(SubmitError::Transport(_))));

    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].title, FAILURE_TITLE);

    assert_eq!(dom.element(form).resets, 0);
    let button = dom.element(button);
    assert_eq!(button.text, "Send Message");
    assert_eq!(button.html, "Send Message");
    assert!(!button.disabled);
}

#[test]
fn button_shows_loading_state_while_in_flight() {
    let (dom, _, button) = page();
    let notifier = RecordingNotifier::default();
    let contact = ContactForm::bind(&dom, &FolioConfig::default()).expect("form present");
    let in_flight = InFlightSubmitter { dom: &dom, button, seen: RefCell::new(None) };

    block_on(contact.run(&dom, &notifier, &in_flight)).expect("in_flight succeeds");
    let (html, disabled) = in_flight.seen.into_inner().expect("submit was called");
    assert_eq!(html, "<span class=\"loading\"></span> Sending...");
    assert!(disabled);
}

#[test]
fn form_without_button_still_submits() {
    let dom = FakeDom::new();
    let form = dom.add(El::new("form").id("contact-form"));
    let notifier = RecordingNotifier::default();
    let contact = ContactForm::bind(&dom, &FolioConfig::default()).expect("form present");
    let submitter = DelaySubmitter::new(Duration::ZERO, |_: Duration| std::future::ready(()));

    block_on(contact.run(&dom, &notifier, &submitter)).expect("delay submitter succeeds");
    assert_eq!(dom.element(form).resets, 1);
    assert_eq!(notifier.toasts().len(), 1);
}

#[test]
fn loading_markup_is_replaced_by_original_label() {
    let (dom, _, button) = page();
    let notifier = RecordingNotifier::default();
    let contact = ContactForm::bind(&dom, &FolioConfig::default()).expect("form present");
    let in_flight = InFlightSubmitter { dom: &dom, button, seen: RefCell::new(None) };

    block_on(contact.run(&dom, &notifier, &in_flight)).expect("submission succeeds");
    let (during, _) = in_flight.seen.into_inner().expect("submit was called");
    assert!(during.contains("loading"));

    let after = dom.element(button);
    assert_eq!(after.html, "Send Message");
    assert!(!after.html.contains("loading"));
}
