//! Composition root.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` is built once per page with the injected capabilities (DOM,
//! preference store, notifier) and owns every manager. The host asks it for
//! the listener table ([`App::bindings`]) and the intersection watchers
//! ([`App::watchers`]), then feeds every callback through [`App::dispatch`]
//! and executes the returned effects.
//!
//! DESIGN
//! ======
//! Managers own disjoint parts of the page, so a dispatch touches exactly one
//! of them (scroll touches navigation only, a timer touches its own state
//! machine only). The contact submission is the one async flow; it is started
//! by the host from a cloned [`ContactForm`] so no borrow of `App` is held
//! across the await.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::config::FolioConfig;
use crate::consts::{LOADED_CLASS, RESUME_LINK_SELECTOR, SUBTITLE_SELECTOR, THEME_TOGGLE_ID};
use crate::contact::ContactForm;
use crate::dom::Dom;
use crate::events::{Binding, Effect, EventType, Target, Task, UiEvent, Watcher, WatcherKind};
use crate::lazy_image::LazyImages;
use crate::nav::Navigation;
use crate::notify::Notifier;
use crate::resume::{LinkDecision, ResumeGuard};
use crate::reveal::RevealEngine;
use crate::storage::PreferenceStore;
use crate::theme::{Theme, ThemeCoordinator};
use crate::typing::{TypingEffect, TypingSpeeds};

/// Typing state plus the element it writes into.
#[derive(Clone, Debug)]
struct TypingHost<N> {
    subtitle: N,
    effect: TypingEffect,
}

pub struct App<D: Dom, S, No> {
    dom: D,
    store: S,
    notifier: No,
    config: FolioConfig,
    theme: ThemeCoordinator,
    theme_toggle: Option<D::Node>,
    nav: Navigation<D::Node>,
    reveal: RevealEngine<D::Node>,
    lazy: LazyImages<D::Node>,
    typing: Option<TypingHost<D::Node>>,
    contact: Option<ContactForm<D::Node>>,
    resume_link: Option<D::Node>,
    resume: ResumeGuard,
}

impl<D, S, No> App<D, S, No>
where
    D: Dom,
    S: PreferenceStore,
    No: Notifier,
{
    /// Look up the page elements and read the stored theme. Does not touch
    /// the page; call [`App::init`] for that.
    pub fn new(dom: D, store: S, notifier: No, config: FolioConfig) -> Self {
        let theme = ThemeCoordinator::load(&store, &config.theme_storage_key);
        let theme_toggle = dom.by_id(THEME_TOGGLE_ID);
        let nav = Navigation::bind(&dom, &config);
        let typing = dom.query(SUBTITLE_SELECTOR).and_then(|subtitle| {
            let effect = TypingEffect::new(config.typing_phrases.clone(), TypingSpeeds::from_config(&config))?;
            Some(TypingHost { subtitle, effect })
        });
        let contact = ContactForm::bind(&dom, &config);
        let resume_link = dom.query(RESUME_LINK_SELECTOR);

        Self {
            reveal: RevealEngine::empty(&config),
            lazy: LazyImages::empty(),
            resume: ResumeGuard::new(&config),
            dom,
            store,
            notifier,
            theme,
            theme_toggle,
            nav,
            typing,
            contact,
            resume_link,
            config,
        }
    }

    /// Apply startup state to the page. Returns the initial timers.
    pub fn init(&mut self) -> Vec<Effect<D::Node>> {
        self.theme.apply(&self.dom);
        self.nav.on_scroll(&self.dom);
        self.reveal = RevealEngine::setup(&self.dom, &self.config);
        self.lazy = LazyImages::setup(&self.dom);
        for href in &self.config.preload_stylesheets {
            self.dom.preload(href, "style");
        }
        if let Some(body) = self.dom.body() {
            self.dom.add_class(&body, LOADED_CLASS);
        }
        log::info!("folio initialized with {} theme", self.theme.theme());

        let mut effects = Vec::new();
        if self.typing.is_some() {
            effects.push(Effect::Schedule { delay: self.config.typing_start_delay(), task: Task::TypeStep });
        }
        effects
    }

    /// Handler-registration table: one row per listener the host installs.
    pub fn bindings(&self) -> Vec<Binding<D::Node>> {
        let mut rows = vec![Binding { event: EventType::Scroll, target: Target::Window, dispatch: UiEvent::Scroll }];
        let mut click = |node: &D::Node, dispatch: UiEvent<D::Node>| {
            rows.push(Binding { event: EventType::Click, target: Target::Node(node.clone()), dispatch });
        };
        if let Some(toggle) = &self.theme_toggle {
            click(toggle, UiEvent::ThemeToggle);
        }
        if let Some(hamburger) = self.nav.hamburger() {
            click(hamburger, UiEvent::HamburgerToggle);
        }
        for link in self.nav.links() {
            click(link, UiEvent::NavLinkClicked(link.clone()));
        }
        if let Some(button) = self.nav.back_to_top() {
            click(button, UiEvent::BackToTop);
        }
        if let Some(link) = &self.resume_link {
            click(link, UiEvent::ResumeClicked(link.clone()));
        }
        if let Some(contact) = &self.contact {
            rows.push(Binding {
                event: EventType::Submit,
                target: Target::Node(contact.form().clone()),
                dispatch: UiEvent::ContactSubmitted,
            });
        }
        rows
    }

    /// Intersection watchers and the nodes each still has to observe.
    pub fn watchers(&self) -> Vec<Watcher<D::Node>> {
        vec![
            Watcher {
                kind: WatcherKind::Reveal,
                options: self.reveal.reveal_options().clone(),
                targets: self.reveal.reveal_targets(),
            },
            Watcher {
                kind: WatcherKind::SkillBar,
                options: self.reveal.skill_options().clone(),
                targets: self.reveal.skill_targets(),
            },
            Watcher {
                kind: WatcherKind::LazyImage,
                options: LazyImages::<D::Node>::options(),
                targets: self.lazy.pending().to_vec(),
            },
        ]
    }

    /// Single entry point for every UI event.
    pub fn dispatch(&mut self, event: UiEvent<D::Node>) -> Vec<Effect<D::Node>> {
        match event {
            UiEvent::Scroll => {
                self.nav.on_scroll(&self.dom);
                Vec::new()
            }
            UiEvent::ThemeToggle => {
                self.theme.toggle(&self.dom, &self.store);
                Vec::new()
            }
            UiEvent::HamburgerToggle => {
                self.nav.toggle_menu(&self.dom);
                Vec::new()
            }
            UiEvent::NavLinkClicked(link) => {
                self.nav.follow_link(&self.dom, &link);
                vec![Effect::PreventDefault]
            }
            UiEvent::BackToTop => {
                self.nav.scroll_to_top(&self.dom);
                Vec::new()
            }
            UiEvent::ResumeClicked(link) => {
                let href = self.dom.attribute(&link, "href");
                match self.resume.on_click(&self.notifier, href.as_deref()) {
                    LinkDecision::Allow => Vec::new(),
                    LinkDecision::Prevent => vec![Effect::PreventDefault],
                }
            }
            UiEvent::ContactSubmitted => {
                if self.contact.is_some() {
                    vec![Effect::PreventDefault, Effect::SubmitContact]
                } else {
                    Vec::new()
                }
            }
            UiEvent::Intersect { watcher, node, entering } => match watcher {
                WatcherKind::Reveal => self.reveal.on_reveal_intersect(&self.dom, &node, entering),
                WatcherKind::SkillBar => self.reveal.on_skill_intersect(&self.dom, &node, entering),
                WatcherKind::LazyImage => self.lazy.on_intersect(&self.dom, &node, entering),
            },
            UiEvent::Timer(Task::TypeStep) => {
                let Some(typing) = self.typing.as_mut() else {
                    return Vec::new();
                };
                let frame = typing.effect.step();
                self.dom.set_text(&typing.subtitle, &frame.text);
                vec![Effect::Schedule { delay: frame.next, task: Task::TypeStep }]
            }
            UiEvent::Timer(Task::RestoreSkillBar(node)) => {
                self.reveal.restore_skill_bar(&self.dom, &node);
                Vec::new()
            }
        }
    }

    // --- Queries ---

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &No {
        &self.notifier
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn navigation(&self) -> &Navigation<D::Node> {
        &self.nav
    }

    pub fn reveal(&self) -> &RevealEngine<D::Node> {
        &self.reveal
    }

    pub fn typing(&self) -> Option<&TypingEffect> {
        self.typing.as_ref().map(|host| &host.effect)
    }

    /// The bound contact form, cloned by the host to run a submission.
    pub fn contact_form(&self) -> Option<&ContactForm<D::Node>> {
        self.contact.as_ref()
    }
}
