//! Deferred image loading.
//!
//! `img[data-src]` elements get their real `src` the first time they enter
//! the viewport; the `lazy` class is dropped and the node is unobserved.

#[cfg(test)]
#[path = "lazy_image_test.rs"]
mod lazy_image_test;

use crate::consts::{DEFERRED_SRC_ATTRIBUTE, LAZY_CLASS, LAZY_IMAGE_SELECTOR};
use crate::dom::Dom;
use crate::events::{Effect, ObserverOptions, WatcherKind};

#[derive(Clone, Debug)]
pub struct LazyImages<N> {
    pending: Vec<N>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> LazyImages<N> {
    #[must_use]
    pub fn empty() -> Self {
        Self { pending: Vec::new() }
    }

    pub fn setup<D: Dom<Node = N>>(dom: &D) -> Self {
        Self { pending: dom.query_all(LAZY_IMAGE_SELECTOR) }
    }

    /// Browser default options: any visible pixel counts.
    #[must_use]
    pub fn options() -> ObserverOptions {
        ObserverOptions { threshold: 0.0, root_margin: "0px".to_owned() }
    }

    /// Images not loaded yet.
    #[must_use]
    pub fn pending(&self) -> &[N] {
        &self.pending
    }

    pub fn on_intersect<D: Dom<Node = N>>(&mut self, dom: &D, node: &N, entering: bool) -> Vec<Effect<N>> {
        if !entering {
            return Vec::new();
        }
        let Some(position) = self.pending.iter().position(|pending| pending == node) else {
            return Vec::new();
        };
        self.pending.remove(position);
        if let Some(src) = dom.attribute(node, DEFERRED_SRC_ATTRIBUTE) {
            dom.set_attribute(node, "src", &src);
        }
        dom.remove_class(node, LAZY_CLASS);
        vec![Effect::Unobserve { watcher: WatcherKind::LazyImage, node: node.clone() }]
    }
}
