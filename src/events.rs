//! Event model between the browser layer and the coordinator.
//!
//! DESIGN
//! ======
//! The browser layer translates raw DOM callbacks into [`UiEvent`]s and hands
//! them to `App::dispatch`. The coordinator answers with [`Effect`]s the host
//! must carry out (prevent default, arm a timer, unobserve a node, start the
//! async submission). Timer-driven sequences come back in as
//! `UiEvent::Timer`, so every visible state step is reachable from a test by
//! dispatching events by hand.

use std::time::Duration;

/// DOM event types the coordinator listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    Scroll,
    Submit,
}

impl EventType {
    /// Name passed to `addEventListener`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::Submit => "submit",
        }
    }
}

/// Where a listener is installed.
#[derive(Clone, Debug, PartialEq)]
pub enum Target<N> {
    Window,
    Node(N),
}

/// One row of the handler-registration table.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding<N> {
    pub event: EventType,
    pub target: Target<N>,
    pub dispatch: UiEvent<N>,
}

/// Independent intersection watchers, each with its own options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WatcherKind {
    /// Reveal animations (threshold 0.1 with a negative bottom margin).
    Reveal,
    /// Skill progress bars (threshold 0.5).
    SkillBar,
    /// Deferred images (browser defaults).
    LazyImage,
}

/// `IntersectionObserver` options.
#[derive(Clone, Debug, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

/// A watcher and the nodes it must observe.
#[derive(Clone, Debug, PartialEq)]
pub struct Watcher<N> {
    pub kind: WatcherKind,
    pub options: ObserverOptions,
    pub targets: Vec<N>,
}

/// Work scheduled on a timer.
#[derive(Clone, Debug, PartialEq)]
pub enum Task<N> {
    /// Advance the typing headline by one step.
    TypeStep,
    /// Put a skill bar's captured width back after zeroing it.
    RestoreSkillBar(N),
}

/// Input to `App::dispatch`.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent<N> {
    Scroll,
    ThemeToggle,
    HamburgerToggle,
    NavLinkClicked(N),
    BackToTop,
    ResumeClicked(N),
    ContactSubmitted,
    Intersect { watcher: WatcherKind, node: N, entering: bool },
    Timer(Task<N>),
}

/// Output of `App::dispatch`, executed by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect<N> {
    PreventDefault,
    Schedule { delay: Duration, task: Task<N> },
    Unobserve { watcher: WatcherKind, node: N },
    /// Run the contact form submission future.
    SubmitContact,
}
