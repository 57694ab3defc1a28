use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use sectionflow::{Section, SectionChange, SectionRegistry};

/// Bespoke per-section behaviour, run when a transition into or out of a section starts.
///
/// Hooks complement the data-driven choreography: use them for effects a layer recipe cannot
/// express (counters, timelines of nested widgets, lazy loading).
pub trait SectionHook: Send {
    /// `section` is being entered.
    fn on_enter(&mut self, section: &Section, change: &SectionChange);

    /// `section` is being left.
    fn on_exit(&mut self, _section: &Section, _change: &SectionChange) {}

    /// The transition into `section` has settled.
    fn on_settled(&mut self, _section: &Section, _change: &SectionChange) {}
}

impl<F> SectionHook for F
where
    F: FnMut(&Section, &SectionChange) + Send,
{
    fn on_enter(&mut self, section: &Section, change: &SectionChange) {
        self(section, change)
    }
}

/// Hooks keyed by section id or by category.
///
/// A category hook runs for every section carrying that category, so it also sees moves between
/// two sections of its own category.
#[derive(Default)]
pub struct SectionHooks {
    by_id: BTreeMap<String, Vec<Box<dyn SectionHook>>>,
    by_category: BTreeMap<String, Vec<Box<dyn SectionHook>>>,
}

impl fmt::Debug for SectionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionHooks")
            .field("ids", &self.by_id.keys().collect::<Vec<_>>())
            .field("categories", &self.by_category.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SectionHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_section(&mut self, section_id: impl Into<String>, hook: impl SectionHook + 'static) {
        self.by_id
            .entry(section_id.into())
            .or_default()
            .push(Box::new(hook));
    }

    pub fn on_category(&mut self, category: impl Into<String>, hook: impl SectionHook + 'static) {
        self.by_category
            .entry(category.into())
            .or_default()
            .push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.by_id.values().chain(self.by_category.values()).map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs exit hooks of the previous section, then enter hooks of the current one on
    /// `Starting`; settled hooks of the current section on `Settled`.
    pub fn dispatch(&mut self, registry: &SectionRegistry, change: &SectionChange) {
        let previous = registry.get(change.previous_index);
        let current = registry.get(change.current_index);
        if change.is_starting() {
            if let Some(section) = previous {
                self.for_each_hook(section, |hook| hook.on_exit(section, change));
            }
            if let Some(section) = current {
                self.for_each_hook(section, |hook| hook.on_enter(section, change));
            }
        } else if let Some(section) = current {
            self.for_each_hook(section, |hook| hook.on_settled(section, change));
        }
    }

    fn for_each_hook(&mut self, section: &Section, mut f: impl FnMut(&mut Box<dyn SectionHook>)) {
        if let Some(hooks) = self.by_id.get_mut(section.id()) {
            ftrace!(section = section.id(), hooks = hooks.len(), "section hooks");
            hooks.iter_mut().for_each(&mut f);
        }
        if let Some(hooks) = section.category().and_then(|c| self.by_category.get_mut(c)) {
            hooks.iter_mut().for_each(&mut f);
        }
    }
}
