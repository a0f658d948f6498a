//! Intersection reveal engine and skill bar fill sequence.
//!
//! DESIGN
//! ======
//! Setup tags each element of a reveal group with the group's class and a
//! staggered `transition-delay` (`index_within_group × step`), then hands the
//! nodes to the Reveal watcher. The first entering notification adds
//! `visible`; the flag is one-way and the node is unobserved.
//!
//! Skill bars run a three-phase sequence on their own watcher:
//! `Idle → Filling { target } → Done`. The inline width is captured *before*
//! it is zeroed, then restored by a timer task; a bar with no inline width
//! restores to the empty string. `Done` is terminal, so the fill plays once.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use std::time::Duration;

use crate::config::{FolioConfig, RevealGroup};
use crate::consts::{SKILL_BAR_EMPTY_WIDTH, SKILL_BAR_SELECTOR, VISIBLE_CLASS};
use crate::dom::Dom;
use crate::events::{Effect, ObserverOptions, Task, WatcherKind};

/// Fill phase of one skill bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FillPhase {
    Idle,
    Filling { target: String },
    Done,
}

#[derive(Clone, Debug)]
struct Revealable<N> {
    node: N,
    revealed: bool,
}

#[derive(Clone, Debug)]
struct SkillBar<N> {
    node: N,
    phase: FillPhase,
}

/// Reveal and skill bar state for the whole page.
#[derive(Clone, Debug)]
pub struct RevealEngine<N> {
    elements: Vec<Revealable<N>>,
    bars: Vec<SkillBar<N>>,
    reveal_options: ObserverOptions,
    skill_options: ObserverOptions,
    fill_delay: Duration,
}

/// `transition-delay` for the `index`-th element of a group, rounded to the
/// millisecond so `3 × 0.1` renders as `0.3s`.
#[must_use]
pub fn stagger_delay(index: u32, step_secs: f64) -> String {
    let millis = (f64::from(index) * step_secs * 1000.0).round();
    format!("{}s", millis / 1000.0)
}

impl<N: Clone + PartialEq + std::fmt::Debug> RevealEngine<N> {
    /// An engine watching nothing.
    #[must_use]
    pub fn empty(config: &FolioConfig) -> Self {
        Self {
            elements: Vec::new(),
            bars: Vec::new(),
            reveal_options: ObserverOptions {
                threshold: config.reveal_threshold,
                root_margin: config.reveal_root_margin.clone(),
            },
            skill_options: ObserverOptions { threshold: config.skill_threshold, root_margin: "0px".to_owned() },
            fill_delay: config.skill_fill_delay(),
        }
    }

    /// Tag every reveal group member and collect skill bars.
    pub fn setup<D: Dom<Node = N>>(dom: &D, config: &FolioConfig) -> Self {
        let mut engine = Self::empty(config);
        for group in &config.reveal_groups {
            engine.tag_group(dom, group, config.reveal_stagger_secs);
        }
        engine.bars = dom
            .query_all(SKILL_BAR_SELECTOR)
            .into_iter()
            .map(|node| SkillBar { node, phase: FillPhase::Idle })
            .collect();
        log::debug!("reveal engine watching {} elements and {} skill bars", engine.elements.len(), engine.bars.len());
        engine
    }

    fn tag_group<D: Dom<Node = N>>(&mut self, dom: &D, group: &RevealGroup, step_secs: f64) {
        for (node, index) in dom.query_all(&group.selector).into_iter().zip(0_u32..) {
            dom.add_class(&node, &group.class);
            dom.set_style(&node, "transition-delay", &stagger_delay(index, step_secs));
            if !self.elements.iter().any(|e| e.node == node) {
                self.elements.push(Revealable { node, revealed: false });
            }
        }
    }

    #[must_use]
    pub fn reveal_options(&self) -> &ObserverOptions {
        &self.reveal_options
    }

    #[must_use]
    pub fn skill_options(&self) -> &ObserverOptions {
        &self.skill_options
    }

    /// Nodes the Reveal watcher must observe.
    #[must_use]
    pub fn reveal_targets(&self) -> Vec<N> {
        self.elements.iter().filter(|e| !e.revealed).map(|e| e.node.clone()).collect()
    }

    /// Nodes the SkillBar watcher must observe.
    #[must_use]
    pub fn skill_targets(&self) -> Vec<N> {
        self.bars
            .iter()
            .filter(|bar| bar.phase == FillPhase::Idle)
            .map(|bar| bar.node.clone())
            .collect()
    }

    #[must_use]
    pub fn is_revealed(&self, node: &N) -> bool {
        self.elements.iter().any(|e| e.node == *node && e.revealed)
    }

    #[must_use]
    pub fn fill_phase(&self, node: &N) -> Option<&FillPhase> {
        self.bars.iter().find(|bar| bar.node == *node).map(|bar| &bar.phase)
    }

    /// Reveal watcher notification. Exits and repeats are ignored.
    pub fn on_reveal_intersect<D: Dom<Node = N>>(&mut self, dom: &D, node: &N, entering: bool) -> Vec<Effect<N>> {
        if !entering {
            return Vec::new();
        }
        let Some(element) = self.elements.iter_mut().find(|e| e.node == *node) else {
            return Vec::new();
        };
        if element.revealed {
            return Vec::new();
        }
        element.revealed = true;
        dom.add_class(node, VISIBLE_CLASS);
        vec![Effect::Unobserve { watcher: WatcherKind::Reveal, node: node.clone() }]
    }

    /// SkillBar watcher notification: capture, zero, schedule the restore.
    pub fn on_skill_intersect<D: Dom<Node = N>>(&mut self, dom: &D, node: &N, entering: bool) -> Vec<Effect<N>> {
        if !entering {
            return Vec::new();
        }
        let Some(bar) = self.bars.iter_mut().find(|bar| bar.node == *node) else {
            return Vec::new();
        };
        if bar.phase != FillPhase::Idle {
            return Vec::new();
        }
        let target = dom.style(node, "width");
        dom.set_style(node, "width", SKILL_BAR_EMPTY_WIDTH);
        bar.phase = FillPhase::Filling { target };
        vec![
            Effect::Unobserve { watcher: WatcherKind::SkillBar, node: node.clone() },
            Effect::Schedule { delay: self.fill_delay, task: Task::RestoreSkillBar(node.clone()) },
        ]
    }

    /// Restore task: put the captured width back.
    pub fn restore_skill_bar<D: Dom<Node = N>>(&mut self, dom: &D, node: &N) {
        let Some(bar) = self.bars.iter_mut().find(|bar| bar.node == *node) else {
            return;
        };
        let FillPhase::Filling { target } = &bar.phase else {
            return;
        };
        dom.set_style(node, "width", target);
        bar.phase = FillPhase::Done;
    }
}
