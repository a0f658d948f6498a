//! Browser host: `web_sys` implementations of the capabilities and the
//! WebAssembly entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`start`] runs when the module is instantiated. It waits for
//! `DOMContentLoaded` if the document is still loading, reads the optional
//! `<script id="folio-config">` JSON, builds the [`App`], installs one
//! listener per row of `App::bindings` and one `IntersectionObserver` per
//! watcher, then executes every [`Effect`] that `dispatch` returns.
//!
//! DESIGN
//! ======
//! The app lives in an `Rc<RefCell<_>>` shared by every closure. A dispatch
//! borrows it mutably only for the synchronous `App::dispatch` call; effects
//! run after the borrow is released, so timers and the async submission never
//! hold it. Closures are leaked with `forget` because the page lives as long
//! as the module.
//!
//! ERROR HANDLING
//! ==============
//! Boot failures are logged and returned to the JS loader. After boot every
//! failing DOM call is logged at warn level and skipped.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

use crate::app::App;
use crate::config::FolioConfig;
use crate::consts::CONFIG_SCRIPT_ID;
use crate::contact::DelaySubmitter;
use crate::dom::Dom;
use crate::error::BrowserError;
use crate::events::{Effect, Target, Task, UiEvent, WatcherKind};
use crate::notify::{Notifier, Toast, ToastKind};
use crate::storage::LocalStorage;

const FALLBACK_SHOW_MS: u32 = 100;
const FALLBACK_VISIBLE_MS: u32 = 5000;
const FALLBACK_EXIT_MS: u32 = 300;

impl From<JsValue> for BrowserError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

fn report<T>(action: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{action} failed: {err:?}");
            None
        }
    }
}

fn check(action: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("{action} failed: {err:?}");
    }
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

fn sleep(delay: Duration) -> TimeoutFuture {
    TimeoutFuture::new(millis(delay))
}

// =============================================================
// Dom
// =============================================================

/// The live document.
#[derive(Clone, Debug)]
pub struct BrowserDom {
    window: Window,
    document: Document,
}

impl BrowserDom {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn append_to_body(&self, node: &Element) {
        if let Some(body) = self.document.body() {
            report("append to body", body.append_child(node));
        }
    }
}

impl Dom for BrowserDom {
    type Node = Element;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        report("querySelector", self.document.query_selector(selector)).flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Some(list) = report("querySelectorAll", self.document.query_selector_all(selector)) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_ref::<Element>().cloned())
            .collect()
    }

    fn query_within(&self, node: &Element, selector: &str) -> Option<Element> {
        report("querySelector", node.query_selector(selector)).flatten()
    }

    fn document_element(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn add_class(&self, node: &Element, class: &str) {
        check("classList.add", node.class_list().add_1(class));
    }

    fn remove_class(&self, node: &Element, class: &str) {
        check("classList.remove", node.class_list().remove_1(class));
    }

    fn toggle_class(&self, node: &Element, class: &str) -> bool {
        report("classList.toggle", node.class_list().toggle(class)).unwrap_or(false)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class_name(&self, node: &Element, value: &str) {
        node.set_class_name(value);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        check("setAttribute", node.set_attribute(name, value));
    }

    fn style(&self, node: &Element, property: &str) -> String {
        let Some(html) = node.dyn_ref::<HtmlElement>() else {
            return String::new();
        };
        report("style read", html.style().get_property_value(property)).unwrap_or_default()
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(html) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        if value.is_empty() {
            report("style remove", style.remove_property(property));
        } else {
            check("style write", style.set_property(property, value));
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn set_disabled(&self, node: &Element, disabled: bool) {
        if let Some(button) = node.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        }
    }

    fn reset_form(&self, node: &Element) {
        if let Some(form) = node.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>().map_or(0.0, |html| f64::from(html.offset_top()))
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>().map_or(0.0, |html| f64::from(html.offset_height()))
    }

    fn scroll_y(&self) -> f64 {
        report("scrollY", self.window.scroll_y()).unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn preload(&self, href: &str, kind: &str) {
        let Some(link) = report("create link", self.document.create_element("link")) else {
            return;
        };
        check("set rel", link.set_attribute("rel", "preload"));
        check("set as", link.set_attribute("as", kind));
        check("set href", link.set_attribute("href", href));
        if let Some(head) = self.document.head() {
            report("append preload", head.append_child(&link));
        }
    }
}

// =============================================================
// Notifier
// =============================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Swal, js_name = fire)]
    fn swal_fire(options: &JsValue) -> Result<JsValue, JsValue>;
}

/// Shows toasts with SweetAlert2, or with an inline banner when the
/// `Swal` global is missing.
#[derive(Clone, Debug)]
pub struct SwalNotifier {
    dom: BrowserDom,
}

impl SwalNotifier {
    pub fn new(dom: BrowserDom) -> Self {
        Self { dom }
    }

    fn fire(&self, toast: &Toast) -> Result<(), JsValue> {
        let options = js_sys::JSON::parse(&toast.swal_options().to_string())?;
        swal_fire(&options)?;
        Ok(())
    }

    fn show_fallback(&self, toast: &Toast) {
        let Some(banner) = report("create banner", self.dom.document.create_element("div")) else {
            return;
        };
        let message = match &toast.text {
            Some(text) => format!("{} {text}", toast.title),
            None => toast.title.clone(),
        };
        banner.set_class_name(&format!("form-message {}", toast.kind.as_str()));
        banner.set_text_content(Some(&message));
        let background = if toast.kind == ToastKind::Success { "#10b981" } else { "#ef4444" };
        let css = format!(
            "position: fixed; top: 100px; right: 20px; padding: 16px 24px; border-radius: 8px; color: white; \
             font-weight: 500; z-index: 1000; transform: translateX(100%); transition: transform 0.3s ease; \
             background-color: {background};"
        );
        check("banner style", banner.set_attribute("style", &css));
        self.dom.append_to_body(&banner);

        let dom = self.dom.clone();
        let entering = banner.clone();
        Timeout::new(FALLBACK_SHOW_MS, move || dom.set_style(&entering, "transform", "translateX(0)")).forget();

        let dom = self.dom.clone();
        Timeout::new(FALLBACK_VISIBLE_MS, move || {
            dom.set_style(&banner, "transform", "translateX(100%)");
            Timeout::new(FALLBACK_EXIT_MS, move || banner.remove()).forget();
        })
        .forget();
    }
}

impl Notifier for SwalNotifier {
    fn notify(&self, toast: Toast) {
        if let Err(err) = self.fire(&toast) {
            log::debug!("Swal.fire unavailable ({err:?}), using inline banner");
            self.show_fallback(&toast);
        }
    }
}

// =============================================================
// Runtime
// =============================================================

type BrowserApp = App<BrowserDom, LocalStorage, SwalNotifier>;
type Sleep = fn(Duration) -> TimeoutFuture;

/// Shared handles captured by every listener.
#[derive(Clone)]
struct Runtime {
    app: Rc<RefCell<BrowserApp>>,
    observers: Rc<RefCell<HashMap<WatcherKind, IntersectionObserver>>>,
    submitter: Rc<DelaySubmitter<Sleep>>,
}

impl Runtime {
    fn dispatch(&self, event: UiEvent<Element>, raw: Option<&Event>) {
        let effects = match self.app.try_borrow_mut() {
            Ok(mut app) => app.dispatch(event),
            Err(_) => {
                log::warn!("nested dispatch of {event:?} dropped");
                return;
            }
        };
        self.run_effects(effects, raw);
    }

    fn run_effects(&self, effects: Vec<Effect<Element>>, raw: Option<&Event>) {
        for effect in effects {
            match effect {
                Effect::PreventDefault => {
                    if let Some(event) = raw {
                        event.prevent_default();
                    }
                }
                Effect::Schedule { delay, task } => self.schedule(delay, task),
                Effect::Unobserve { watcher, node } => {
                    if let Some(observer) = self.observers.borrow().get(&watcher) {
                        observer.unobserve(&node);
                    }
                }
                Effect::SubmitContact => self.submit_contact(),
            }
        }
    }

    fn schedule(&self, delay: Duration, task: Task<Element>) {
        let runtime = self.clone();
        Timeout::new(millis(delay), move || runtime.dispatch(UiEvent::Timer(task), None)).forget();
    }

    fn submit_contact(&self) {
        let (form, dom, notifier) = {
            let app = self.app.borrow();
            let Some(form) = app.contact_form() else {
                return;
            };
            (form.clone(), app.dom().clone(), app.notifier().clone())
        };
        let submitter = Rc::clone(&self.submitter);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = form.run(&dom, &notifier, submitter.as_ref()).await {
                log::debug!("contact submission ended with {err}");
            }
        });
    }

    fn install_listeners(&self, window: &Window) -> Result<(), BrowserError> {
        let bindings = self.app.borrow().bindings();
        for binding in bindings {
            let target: EventTarget = match binding.target {
                Target::Window => window.clone().into(),
                Target::Node(node) => node.into(),
            };
            let runtime = self.clone();
            let dispatch = binding.dispatch;
            let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                runtime.dispatch(dispatch.clone(), Some(&event));
            });
            target.add_event_listener_with_callback(binding.event.as_str(), callback.as_ref().unchecked_ref())?;
            callback.forget();
        }
        Ok(())
    }

    fn install_observers(&self) -> Result<(), BrowserError> {
        let watchers = self.app.borrow().watchers();
        for watcher in watchers {
            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(watcher.options.threshold));
            init.set_root_margin(&watcher.options.root_margin);

            let runtime = self.clone();
            let kind = watcher.kind;
            let callback =
                Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        let event =
                            UiEvent::Intersect { watcher: kind, node: entry.target(), entering: entry.is_intersecting() };
                        runtime.dispatch(event, None);
                    }
                });
            let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
            callback.forget();
            for target in &watcher.targets {
                observer.observe(target);
            }
            log::debug!("observing {} nodes for {kind:?}", watcher.targets.len());
            self.observers.borrow_mut().insert(kind, observer);
        }
        Ok(())
    }
}

fn load_config(document: &Document) -> FolioConfig {
    let Some(raw) = document.get_element_by_id(CONFIG_SCRIPT_ID).and_then(|script| script.text_content()) else {
        return FolioConfig::default();
    };
    match FolioConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{err}; using defaults");
            FolioConfig::default()
        }
    }
}

fn boot(window: &Window, document: &Document) -> Result<(), BrowserError> {
    let config = load_config(document);
    let submitter = DelaySubmitter::new(config.submit_delay(), sleep as Sleep);
    let dom = BrowserDom::new(window.clone(), document.clone());
    let store = LocalStorage::new(window);
    let notifier = SwalNotifier::new(dom.clone());
    let mut app = App::new(dom, store, notifier, config);
    let effects = app.init();

    let runtime = Runtime {
        app: Rc::new(RefCell::new(app)),
        observers: Rc::new(RefCell::new(HashMap::new())),
        submitter: Rc::new(submitter),
    };
    runtime.install_listeners(window)?;
    runtime.install_observers()?;
    runtime.run_effects(effects, None);
    Ok(())
}

/// Module entry point.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }

    let window = web_sys::window().ok_or(BrowserError::NoWindow).map_err(to_js)?;
    let document = window.document().ok_or(BrowserError::NoDocument).map_err(to_js)?;

    if document.ready_state() == "loading" {
        let (ready_window, ready_document) = (window.clone(), document.clone());
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = boot(&ready_window, &ready_document) {
                log::error!("folio boot failed: {err}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        return Ok(());
    }
    boot(&window, &document).map_err(|err| {
        log::error!("folio boot failed: {err}");
        to_js(err)
    })
}

fn to_js(err: BrowserError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
