//! Scroll position tracker and navigation chrome.
//!
//! DESIGN
//! ======
//! Sections are re-read from layout on every scroll, so late-loading images
//! that shift offsets never leave the highlight stale. The active section is
//! the first, in document order, whose `[top, top + height)` interval holds
//! `scroll_y + lookahead`; every nav link is cleared before the match (if
//! any) is marked, so at most one link is ever active.
//!
//! Missing chrome (navbar, hamburger, menu, back-to-top) turns the matching
//! operation into a no-op.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::config::FolioConfig;
use crate::consts::{
    ACTIVE_CLASS, BACK_TO_TOP_ID, HAMBURGER_ID, NAV_LINK_SELECTOR, NAV_MENU_ID, NAVBAR_ID, SCROLLED_CLASS,
    SECTION_SELECTOR, VISIBLE_CLASS,
};
use crate::dom::Dom;

/// A page section as laid out right now.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    /// Half-open containment; zero-height sections contain nothing.
    #[must_use]
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// First section containing `position`.
#[must_use]
pub fn active_section(sections: &[Section], position: f64) -> Option<&Section> {
    sections.iter().find(|section| section.contains(position))
}

/// Read every `section[id]` in document order.
pub fn collect_sections<D: Dom>(dom: &D) -> Vec<Section> {
    dom.query_all(SECTION_SELECTOR)
        .iter()
        .filter_map(|node| {
            let id = dom.attribute(node, "id")?;
            Some(Section { id, top: dom.offset_top(node), height: dom.offset_height(node) })
        })
        .collect()
}

/// Navbar, mobile menu, nav links and back-to-top button.
#[derive(Clone, Debug)]
pub struct Navigation<N> {
    navbar: Option<N>,
    hamburger: Option<N>,
    menu: Option<N>,
    back_to_top: Option<N>,
    links: Vec<N>,
    active: Option<String>,
    lookahead: f64,
    header_offset: f64,
    scrolled_threshold: f64,
    back_to_top_threshold: f64,
}

impl<N: Clone + PartialEq + std::fmt::Debug> Navigation<N> {
    /// Look up the navigation elements. Absent ones stay `None`.
    pub fn bind<D: Dom<Node = N>>(dom: &D, config: &FolioConfig) -> Self {
        Self {
            navbar: dom.by_id(NAVBAR_ID),
            hamburger: dom.by_id(HAMBURGER_ID),
            menu: dom.by_id(NAV_MENU_ID),
            back_to_top: dom.by_id(BACK_TO_TOP_ID),
            links: dom.query_all(NAV_LINK_SELECTOR),
            active: None,
            lookahead: config.scroll_lookahead_px,
            header_offset: config.header_offset_px,
            scrolled_threshold: config.scrolled_threshold_px,
            back_to_top_threshold: config.back_to_top_threshold_px,
        }
    }

    #[must_use]
    pub fn hamburger(&self) -> Option<&N> {
        self.hamburger.as_ref()
    }

    #[must_use]
    pub fn back_to_top(&self) -> Option<&N> {
        self.back_to_top.as_ref()
    }

    #[must_use]
    pub fn links(&self) -> &[N] {
        &self.links
    }

    /// Id of the section whose link is currently highlighted.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Everything that depends on the scroll offset.
    pub fn on_scroll<D: Dom<Node = N>>(&mut self, dom: &D) {
        let scroll_y = dom.scroll_y();
        if let Some(navbar) = &self.navbar {
            if scroll_y > self.scrolled_threshold {
                dom.add_class(navbar, SCROLLED_CLASS);
            } else {
                dom.remove_class(navbar, SCROLLED_CLASS);
            }
        }
        if let Some(button) = &self.back_to_top {
            if scroll_y > self.back_to_top_threshold {
                dom.add_class(button, VISIBLE_CLASS);
            } else {
                dom.remove_class(button, VISIBLE_CLASS);
            }
        }
        self.update_active_link(dom);
    }

    /// Recompute the active section and mark its nav link.
    pub fn update_active_link<D: Dom<Node = N>>(&mut self, dom: &D) -> Option<&str> {
        let sections = collect_sections(dom);
        let position = dom.scroll_y() + self.lookahead;
        let active = active_section(&sections, position).map(|section| section.id.clone());

        let target = active.as_ref().map(|id| format!("#{id}"));
        for link in &self.links {
            dom.remove_class(link, ACTIVE_CLASS);
        }
        if let Some(target) = &target {
            let link = self
                .links
                .iter()
                .find(|link| dom.attribute(link, "href").as_deref() == Some(target.as_str()));
            if let Some(link) = link {
                dom.add_class(link, ACTIVE_CLASS);
            }
        }

        if active != self.active {
            log::debug!("active section: {active:?}");
            self.active = active;
        }
        self.active.as_deref()
    }

    /// Open or close the mobile menu. Returns whether it is now open.
    pub fn toggle_menu<D: Dom<Node = N>>(&self, dom: &D) -> bool {
        if let Some(hamburger) = &self.hamburger {
            dom.toggle_class(hamburger, ACTIVE_CLASS);
        }
        let open = self
            .menu
            .as_ref()
            .is_some_and(|menu| dom.toggle_class(menu, ACTIVE_CLASS));
        lock_body_scroll(dom, open);
        open
    }

    pub fn close_menu<D: Dom<Node = N>>(&self, dom: &D) {
        if let Some(hamburger) = &self.hamburger {
            dom.remove_class(hamburger, ACTIVE_CLASS);
        }
        if let Some(menu) = &self.menu {
            dom.remove_class(menu, ACTIVE_CLASS);
        }
        lock_body_scroll(dom, false);
    }

    /// Close the menu and smooth-scroll to the link's `#section`, leaving room
    /// for the fixed header. The default jump is always suppressed.
    pub fn follow_link<D: Dom<Node = N>>(&self, dom: &D, link: &N) {
        self.close_menu(dom);
        let Some(href) = dom.attribute(link, "href") else {
            return;
        };
        let target = href.strip_prefix('#').and_then(|id| dom.by_id(id));
        if let Some(section) = target {
            dom.scroll_to(dom.offset_top(&section) - self.header_offset);
        }
    }

    pub fn scroll_to_top<D: Dom<Node = N>>(&self, dom: &D) {
        dom.scroll_to(0.0);
    }
}

fn lock_body_scroll<D: Dom>(dom: &D, locked: bool) {
    if let Some(body) = dom.body() {
        dom.set_style(&body, "overflow", if locked { "hidden" } else { "" });
    }
}
