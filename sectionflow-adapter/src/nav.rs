use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use sectionflow::{Phase, SectionChange, SectionRegistry};

/// A navigation entry pointing at a section.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavLink {
    pub target_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
}

impl NavLink {
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Highlight state of one navigation entry.
///
/// `AnimatingIn`/`AnimatingOut` cover the transition between two highlighted entries, so a host
/// can play its underline animation before the state settles to `Active`/`Inactive`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavLinkState {
    #[default]
    Inactive,
    Active,
    AnimatingIn,
    AnimatingOut,
}

/// Keeps the highlighted navigation entry in step with the current section.
///
/// Moving between two sections of the same category keeps whatever entry was highlighted.
/// Otherwise the entry that targets the new section wins, then the first entry whose target
/// shares its category; with neither, nothing is highlighted.
#[derive(Clone, Debug, Default)]
pub struct NavigationSync {
    links: Vec<NavLink>,
    states: Vec<NavLinkState>,
    active: Option<usize>,
}

impl NavigationSync {
    pub fn new(links: impl IntoIterator<Item = NavLink>) -> Self {
        let links: Vec<NavLink> = links.into_iter().collect();
        let states = vec![NavLinkState::Inactive; links.len()];
        Self {
            links,
            states,
            active: None,
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn state(&self, link: usize) -> Option<NavLinkState> {
        self.states.get(link).copied()
    }

    pub fn states(&self) -> &[NavLinkState] {
        &self.states
    }

    /// The highlighted entry.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_link(&self) -> Option<&NavLink> {
        self.active.and_then(|i| self.links.get(i))
    }

    /// The entry to highlight for section `index`, ignoring the same-category rule.
    pub fn link_for(&self, registry: &SectionRegistry, index: usize) -> Option<usize> {
        let section = registry.get(index)?;
        if let Some(link) = self.links.iter().position(|l| l.target_id == section.id()) {
            return Some(link);
        }
        let category = section.category()?;
        self.links.iter().position(|l| {
            registry
                .resolve(&l.target_id)
                .is_ok_and(|target| target.category() == Some(category))
        })
    }

    /// Highlights the entry for section `index` without any animation states.
    pub fn sync_to(&mut self, registry: &SectionRegistry, index: usize) {
        self.active = self.link_for(registry, index);
        if self.active.is_none() && !self.links.is_empty() {
            ftrace!(index, "no navigation entry for section");
        }
        self.settle_states();
    }

    pub fn on_change(&mut self, registry: &SectionRegistry, change: &SectionChange) {
        let same_category = match (
            registry.get(change.previous_index),
            registry.get(change.current_index),
        ) {
            (Some(prev), Some(next)) => prev.shares_category_with(next),
            _ => false,
        };
        if same_category {
            ftrace!(
                from = change.previous_index,
                to = change.current_index,
                "same category, keeping highlight"
            );
            return;
        }
        let next = self.link_for(registry, change.current_index);
        match change.phase {
            Phase::Starting => {
                if next == self.active {
                    return;
                }
                if let Some(state) = self.active.and_then(|i| self.states.get_mut(i)) {
                    *state = NavLinkState::AnimatingOut;
                }
                if let Some(state) = next.and_then(|i| self.states.get_mut(i)) {
                    *state = NavLinkState::AnimatingIn;
                }
            }
            Phase::Settled => {
                if next.is_none() {
                    fwarn!(
                        section = change.current_id.as_str(),
                        "no navigation entry matches section or category"
                    );
                }
                self.active = next;
                self.settle_states();
            }
        }
    }

    fn settle_states(&mut self) {
        for (i, state) in self.states.iter_mut().enumerate() {
            *state = if Some(i) == self.active {
                NavLinkState::Active
            } else {
                NavLinkState::Inactive
            };
        }
    }
}

/// State of one progress dot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DotState {
    Active,
    /// Shares the current section's category.
    SameCategory,
    #[default]
    Inactive,
}

/// One dot per section, tinted by the current section's category.
#[derive(Clone, Debug)]
pub struct ProgressIndicator {
    dots: Vec<DotState>,
    visible: bool,
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self {
            dots: Vec::new(),
            visible: true,
        }
    }
}

impl ProgressIndicator {
    pub fn new(registry: &SectionRegistry, current: usize) -> Self {
        let mut p = Self::default();
        p.update(registry, current);
        p
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn dots(&self) -> &[DotState] {
        &self.dots
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Flips visibility and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        fdebug!(visible = self.visible, "progress indicator toggled");
        self.visible
    }

    /// Recomputes every dot for `current`; also resizes to the registry.
    pub fn update(&mut self, registry: &SectionRegistry, current: usize) {
        let current_section = registry.get(current);
        self.dots.clear();
        self.dots.extend(registry.list().iter().map(|s| {
            if s.index() == current {
                DotState::Active
            } else if current_section.is_some_and(|c| c.shares_category_with(s)) {
                DotState::SameCategory
            } else {
                DotState::Inactive
            }
        }));
    }

    /// Dots follow settled changes only.
    pub fn on_change(&mut self, registry: &SectionRegistry, change: &SectionChange) {
        if change.is_settled() {
            self.update(registry, change.current_index);
        }
    }
}
