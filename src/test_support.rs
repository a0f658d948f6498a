//! In-memory page used by unit tests.
//!
//! Elements live in a flat vector in document order; the index is the node
//! handle. Selector support covers what the managers use: tag, `#id`,
//! `.class`, `[attr]`, `[attr="value"]` compounds joined by descendant
//! whitespace.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::dom::Dom;
use crate::notify::{Notifier, Toast};

pub const HTML: usize = 0;
pub const BODY: usize = 2;

#[derive(Clone, Debug, Default)]
pub struct FakeElement {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub text: String,
    pub html: String,
    pub disabled: bool,
    pub top: f64,
    pub height: f64,
    pub parent: Option<usize>,
    pub resets: u32,
}

/// Builder for [`FakeDom::add`].
pub struct El(FakeElement);

impl El {
    pub fn new(tag: &str) -> Self {
        Self(FakeElement { tag: tag.to_owned(), ..FakeElement::default() })
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        self.0.classes.push(class.to_owned());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.0.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.0.styles.insert(property.to_owned(), value.to_owned());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.0.text = text.to_owned();
        self
    }

    pub fn layout(mut self, top: f64, height: f64) -> Self {
        self.0.top = top;
        self.0.height = height;
        self
    }

    pub fn child_of(mut self, parent: usize) -> Self {
        self.0.parent = Some(parent);
        self
    }
}

pub struct FakeDom {
    elements: RefCell<Vec<FakeElement>>,
    scroll_y: Cell<f64>,
    scrolls: RefCell<Vec<f64>>,
    preloads: RefCell<Vec<(String, String)>>,
}

impl FakeDom {
    pub fn new() -> Self {
        let dom = Self {
            elements: RefCell::new(Vec::new()),
            scroll_y: Cell::new(0.0),
            scrolls: RefCell::new(Vec::new()),
            preloads: RefCell::new(Vec::new()),
        };
        dom.elements.borrow_mut().push(FakeElement { tag: "html".to_owned(), ..FakeElement::default() });
        dom.add(El::new("head").child_of(HTML));
        dom.add(El::new("body").child_of(HTML));
        dom
    }

    /// Append an element; it lands under `<body>` unless `child_of` was set.
    pub fn add(&self, el: El) -> usize {
        let mut element = el.0;
        if element.parent.is_none() {
            element.parent = Some(BODY);
        }
        let mut elements = self.elements.borrow_mut();
        elements.push(element);
        elements.len() - 1
    }

    pub fn element(&self, node: usize) -> FakeElement {
        self.elements.borrow().get(node).cloned().unwrap_or_default()
    }

    pub fn set_scroll(&self, y: f64) {
        self.scroll_y.set(y);
    }

    pub fn scrolls(&self) -> Vec<f64> {
        self.scrolls.borrow().clone()
    }

    pub fn preloads(&self) -> Vec<(String, String)> {
        self.preloads.borrow().clone()
    }

    fn with_element(&self, node: usize, f: impl FnOnce(&mut FakeElement)) {
        if let Some(element) = self.elements.borrow_mut().get_mut(node) {
            f(element);
        }
    }

    fn is_descendant(&self, node: usize, ancestor: usize) -> bool {
        let elements = self.elements.borrow();
        let mut current = elements.get(node).and_then(|e| e.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = elements.get(id).and_then(|e| e.parent);
        }
        false
    }

    fn matches(&self, node: usize, selector: &Selector) -> bool {
        let elements = self.elements.borrow();
        let Some((last, rest)) = selector.parts.split_last() else {
            return false;
        };
        let Some(element) = elements.get(node) else {
            return false;
        };
        if !last.matches(element) {
            return false;
        }
        let mut current = element.parent;
        for part in rest.iter().rev() {
            loop {
                let Some(id) = current else {
                    return false;
                };
                let Some(ancestor) = elements.get(id) else {
                    return false;
                };
                current = ancestor.parent;
                if part.matches(ancestor) {
                    break;
                }
            }
        }
        true
    }

    fn all_matching(&self, selector: &str) -> Vec<usize> {
        let selector = Selector::parse(selector);
        let count = self.elements.borrow().len();
        (0..count).filter(|&node| self.matches(node, &selector)).collect()
    }
}

#[derive(Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Compound {
    fn parse(text: &str) -> Self {
        let mut compound = Self::default();
        let tag_end = text.find(['#', '.', '[']).unwrap_or(text.len());
        if tag_end > 0 {
            compound.tag = Some(text[..tag_end].to_owned());
        }
        let mut rest = &text[tag_end..];
        while let Some(marker) = rest.chars().next() {
            rest = &rest[1..];
            if marker == '[' {
                let end = rest.find(']').unwrap_or(rest.len());
                let inner = &rest[..end];
                rest = rest.get(end + 1..).unwrap_or("");
                let (name, value) = match inner.split_once('=') {
                    Some((name, value)) => (name, Some(value.trim_matches('"').to_owned())),
                    None => (inner, None),
                };
                compound.attributes.push((name.to_owned(), value));
            } else {
                let end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
                let word = rest[..end].to_owned();
                rest = &rest[end..];
                if marker == '#' {
                    compound.id = Some(word);
                } else {
                    compound.classes.push(word);
                }
            }
        }
        compound
    }

    fn matches(&self, element: &FakeElement) -> bool {
        if self.tag.as_ref().is_some_and(|tag| *tag != element.tag) {
            return false;
        }
        if self.id.as_ref().is_some_and(|id| element.attributes.get("id") != Some(id)) {
            return false;
        }
        if !self.classes.iter().all(|class| element.classes.contains(class)) {
            return false;
        }
        self.attributes.iter().all(|(name, value)| match (element.attributes.get(name), value) {
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }
}

struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    fn parse(text: &str) -> Self {
        Self { parts: text.split_whitespace().map(Compound::parse).collect() }
    }
}

impl Dom for FakeDom {
    type Node = usize;

    fn by_id(&self, id: &str) -> Option<usize> {
        let elements = self.elements.borrow();
        elements.iter().position(|e| e.attributes.get("id").is_some_and(|v| v == id))
    }

    fn query(&self, selector: &str) -> Option<usize> {
        self.all_matching(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<usize> {
        self.all_matching(selector)
    }

    fn query_within(&self, node: &usize, selector: &str) -> Option<usize> {
        self.all_matching(selector)
            .into_iter()
            .find(|&candidate| self.is_descendant(candidate, *node))
    }

    fn document_element(&self) -> Option<usize> {
        Some(HTML)
    }

    fn body(&self) -> Option<usize> {
        Some(BODY)
    }

    fn add_class(&self, node: &usize, class: &str) {
        self.with_element(*node, |e| {
            if !e.classes.iter().any(|c| c == class) {
                e.classes.push(class.to_owned());
            }
        });
    }

    fn remove_class(&self, node: &usize, class: &str) {
        self.with_element(*node, |e| e.classes.retain(|c| c != class));
    }

    fn toggle_class(&self, node: &usize, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn has_class(&self, node: &usize, class: &str) -> bool {
        self.elements
            .borrow()
            .get(*node)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn set_class_name(&self, node: &usize, value: &str) {
        self.with_element(*node, |e| {
            e.classes = value.split_whitespace().map(str::to_owned).collect();
        });
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.elements.borrow().get(*node).and_then(|e| e.attributes.get(name).cloned())
    }

    fn set_attribute(&self, node: &usize, name: &str, value: &str) {
        self.with_element(*node, |e| {
            e.attributes.insert(name.to_owned(), value.to_owned());
        });
    }

    fn style(&self, node: &usize, property: &str) -> String {
        self.elements
            .borrow()
            .get(*node)
            .and_then(|e| e.styles.get(property).cloned())
            .unwrap_or_default()
    }

    fn set_style(&self, node: &usize, property: &str, value: &str) {
        self.with_element(*node, |e| {
            if value.is_empty() {
                e.styles.remove(property);
            } else {
                e.styles.insert(property.to_owned(), value.to_owned());
            }
        });
    }

    fn text(&self, node: &usize) -> String {
        self.element(*node).text
    }

    fn set_text(&self, node: &usize, text: &str) {
        self.with_element(*node, |e| {
            e.text = text.to_owned();
            e.html = text.to_owned();
        });
    }

    fn set_inner_html(&self, node: &usize, html: &str) {
        self.with_element(*node, |e| {
            e.html = html.to_owned();
            e.text = strip_tags(html);
        });
    }

    fn set_disabled(&self, node: &usize, disabled: bool) {
        self.with_element(*node, |e| e.disabled = disabled);
    }

    fn reset_form(&self, node: &usize) {
        self.with_element(*node, |e| e.resets += 1);
    }

    fn offset_top(&self, node: &usize) -> f64 {
        self.element(*node).top
    }

    fn offset_height(&self, node: &usize) -> f64 {
        self.element(*node).height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_to(&self, top: f64) {
        self.scroll_y.set(top);
        self.scrolls.borrow_mut().push(top);
    }

    fn preload(&self, href: &str, kind: &str) {
        self.preloads.borrow_mut().push((href.to_owned(), kind.to_owned()));
    }
}

/// Text content of a markup fragment: everything outside `<...>`.
fn strip_tags(html: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// Notifier that keeps every toast for inspection.
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: RefCell<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }
}
