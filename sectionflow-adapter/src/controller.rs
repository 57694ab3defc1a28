use sectionflow::{BackgroundLayout, Engine, Frame, Result, SectionRegistry, Viewport};

use crate::{
    Dispatch, InputAdapter, InputConfig, InputEvent, InputOutcome, NavLink, NavigationSync,
    ProgressIndicator, SectionHook, SectionHooks,
};

/// A framework-neutral controller that wraps a `sectionflow::Engine` and wires up input
/// handling, navigation highlighting, progress dots and per-section hooks.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `handle(event, now_ms)` for every wheel/touch/pointer/key/click event
/// - `tick(now_ms)` each frame, applying the returned [`Frame`] to the section layers
/// - `on_resize` when the viewport changes
///
/// Section changes are routed to the navigation sync, the progress indicator and the hooks as
/// soon as the engine emits them, in emission order.
#[derive(Debug)]
pub struct Controller {
    engine: Engine,
    input: InputAdapter,
    nav: NavigationSync,
    progress: ProgressIndicator,
    hooks: SectionHooks,
}

impl Controller {
    pub fn new(engine: Engine) -> Self {
        Self::with_parts(engine, InputAdapter::default(), NavigationSync::default())
    }

    pub fn with_parts(mut engine: Engine, input: InputAdapter, mut nav: NavigationSync) -> Self {
        engine.set_record_changes(true);
        let current = engine.current_index();
        nav.sync_to(engine.registry(), current);
        let progress = ProgressIndicator::new(engine.registry(), current);
        Self {
            engine,
            input,
            nav,
            progress,
            hooks: SectionHooks::new(),
        }
    }

    pub fn with_input_config(mut self, config: InputConfig) -> Self {
        self.input.set_config(config);
        self
    }

    pub fn with_nav_links(mut self, links: impl IntoIterator<Item = NavLink>) -> Self {
        self.nav = NavigationSync::new(links);
        self.nav
            .sync_to(self.engine.registry(), self.engine.current_index());
        self
    }

    pub fn with_section_hook(
        mut self,
        section_id: &str,
        hook: impl SectionHook + 'static,
    ) -> Self {
        self.hooks.on_section(section_id, hook);
        self
    }

    pub fn with_category_hook(mut self, category: &str, hook: impl SectionHook + 'static) -> Self {
        self.hooks.on_category(category, hook);
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Direct engine access. Changes emitted through it are routed on the next `handle`/`tick`.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    pub fn input(&self) -> &InputAdapter {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputAdapter {
        &mut self.input
    }

    pub fn nav(&self) -> &NavigationSync {
        &self.nav
    }

    pub fn progress(&self) -> &ProgressIndicator {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressIndicator {
        &mut self.progress
    }

    pub fn hooks_mut(&mut self) -> &mut SectionHooks {
        &mut self.hooks
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_busy()
    }

    /// Feeds one input event through the adapter and routes whatever it caused.
    pub fn handle(&mut self, event: &InputEvent, now_ms: u64) -> Dispatch {
        let dispatch = self.input.dispatch(&mut self.engine, event, now_ms);
        if dispatch.outcome == InputOutcome::ToggleIndicator {
            self.progress.toggle();
        }
        self.route_changes();
        dispatch
    }

    /// Advances the engine; see [`Engine::tick`].
    pub fn tick(&mut self, now_ms: u64) -> Option<Frame> {
        let frame = self.engine.tick(now_ms);
        self.route_changes();
        frame
    }

    /// Completes the in-flight transition at once; see [`Engine::finish`].
    pub fn finish(&mut self) -> Option<Frame> {
        let frame = self.engine.finish();
        self.route_changes();
        frame
    }

    /// Re-measures the viewport; returns where backgrounds should now sit.
    pub fn on_resize(&mut self, viewport: Viewport) -> BackgroundLayout {
        self.engine.set_viewport(viewport);
        self.engine.background_layout()
    }

    /// Replaces the section list and re-syncs navigation and progress.
    pub fn rebuild(&mut self, registry: SectionRegistry) -> Result<()> {
        self.engine.rebuild(registry)?;
        self.input.reset_gestures();
        let current = self.engine.current_index();
        self.nav.sync_to(self.engine.registry(), current);
        self.progress.update(self.engine.registry(), current);
        Ok(())
    }

    fn route_changes(&mut self) {
        for change in self.engine.take_changes() {
            let registry = self.engine.registry();
            self.nav.on_change(registry, &change);
            self.progress.on_change(registry, &change);
            self.hooks.dispatch(registry, &change);
        }
    }
}
