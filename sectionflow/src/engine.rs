use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use crate::{
    BackgroundLayout, ChoreographyPatch, ChoreographyRegistry, Direction, EngineOptions,
    EngineSnapshot, EngineState, Error, Frame, InputSource, Phase, Result, Section,
    SectionChange, SectionRegistry, Target, Timeline, Transform, Transition, TransitionPlan,
    TransitionRequest, Viewport,
};

/// Callback invoked for every [`SectionChange`].
pub type Listener = Arc<dyn Fn(&Engine, &SectionChange) + Send + Sync>;

/// Handle returned by [`Engine::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// The section navigation and transition engine.
///
/// This type is UI-agnostic:
/// - It owns the section list, the choreography registry and the `Idle ⇄ Transitioning` state.
/// - The host drives it with a monotonic clock (`now_ms`) and renders the [`Frame`]s returned by
///   [`tick`](Self::tick).
/// - Only one transition runs at a time; requests made while busy are rejected, never queued.
///
/// Input handling (wheel, touch, keys, debounce) lives in the `sectionflow-adapter` crate.
pub struct Engine {
    registry: SectionRegistry,
    choreography: ChoreographyRegistry,
    options: EngineOptions,

    state: EngineState,
    source: Option<InputSource>,
    timeline: Option<Timeline>,
    progress: f32,

    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    record_changes: bool,
    changes: Vec<SectionChange>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("sections", &self.registry.count())
            .field("state", &self.state)
            .field("source", &self.source)
            .field("progress", &self.progress)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine resting on `options.initial_index` (clamped to the last section).
    pub fn new(registry: SectionRegistry, options: EngineOptions) -> Self {
        let last = registry.count().saturating_sub(1);
        let current = if options.initial_index > last {
            fwarn!(
                initial_index = options.initial_index,
                count = registry.count(),
                "Engine::new: initial index out of range, clamping"
            );
            last
        } else {
            options.initial_index
        };
        fdebug!(
            count = registry.count(),
            current,
            reduced_motion = options.reduced_motion,
            "Engine::new"
        );
        Self {
            registry,
            choreography: ChoreographyRegistry::new(),
            options,
            state: EngineState::Idle { current },
            source: None,
            timeline: None,
            progress: 1.0,
            listeners: Vec::new(),
            next_listener: 0,
            record_changes: false,
            changes: Vec::new(),
        }
    }

    pub fn with_choreography(mut self, choreography: ChoreographyRegistry) -> Self {
        self.choreography = choreography;
        self
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn choreography(&self) -> &ChoreographyRegistry {
        &self.choreography
    }

    pub fn choreography_mut(&mut self) -> &mut ChoreographyRegistry {
        &mut self.choreography
    }

    /// Shallow-merges `patch` over the choreography of `section_id`.
    ///
    /// Takes effect from the next accepted transition.
    pub fn register_choreography(
        &mut self,
        section_id: impl Into<String>,
        patch: &ChoreographyPatch,
    ) {
        self.choreography.register(section_id, patch);
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Replaces the options. An in-flight timeline keeps the values it was built with.
    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
        ftrace!(
            reduced_motion = self.options.reduced_motion,
            main_duration_ms = self.options.main_duration_ms,
            "Engine::set_options"
        );
    }

    /// Copies the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut EngineOptions)) {
        let mut next = self.options;
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.update_options(|o| o.reduced_motion = reduced_motion);
    }

    /// Re-measures the viewport. The next timeline uses the new geometry.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        fdebug!(
            width = viewport.width,
            height = viewport.height,
            background_height_ratio = viewport.background_height_ratio(),
            "Engine::set_viewport"
        );
        self.options.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.options.viewport
    }

    /// Background size and offset for the current viewport.
    pub fn background_layout(&self) -> BackgroundLayout {
        self.options.viewport.background_layout()
    }

    /// Adds a listener for every [`SectionChange`].
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&Engine, &SectionChange) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Keeps a copy of every emitted change until [`take_changes`](Self::take_changes).
    pub fn set_record_changes(&mut self, record: bool) {
        self.record_changes = record;
        if !record {
            self.changes.clear();
        }
    }

    /// Drains the changes recorded since the last call, oldest first.
    pub fn take_changes(&mut self) -> Vec<SectionChange> {
        mem::take(&mut self.changes)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        !self.state.is_idle()
    }

    /// The current section index; mid-transition this is still the outgoing one.
    pub fn current_index(&self) -> usize {
        self.state.current()
    }

    pub fn current_section(&self) -> Option<&Section> {
        self.registry.get(self.current_index())
    }

    pub fn target_index(&self) -> Option<usize> {
        self.state.target()
    }

    pub fn direction(&self) -> Option<Direction> {
        match self.state {
            EngineState::Idle { .. } => None,
            EngineState::Transitioning { direction, .. } => Some(direction),
        }
    }

    /// The input source of the in-flight transition.
    pub fn source(&self) -> Option<InputSource> {
        self.source
    }

    pub fn section_count(&self) -> usize {
        self.registry.count()
    }

    /// Whether section `index` should be shown: the current one at rest, both ends mid-transition.
    pub fn is_visible(&self, index: usize) -> bool {
        match self.state {
            EngineState::Idle { current } => index == current,
            EngineState::Transitioning { from, to, .. } => index == from || index == to,
        }
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.state,
            section_count: self.registry.count(),
            viewport: self.options.viewport,
            progress: self.progress,
        }
    }

    /// Starts the transition `request` describes.
    ///
    /// Rejections leave the engine untouched and emit nothing. On acceptance a
    /// [`Phase::Starting`] change is emitted; the matching [`Phase::Settled`] follows from
    /// [`tick`](Self::tick) or [`finish`](Self::finish), or immediately with reduced motion.
    pub fn request(&mut self, request: TransitionRequest, now_ms: u64) -> Result<Transition> {
        let TransitionRequest {
            target_index: target,
            direction,
            source,
        } = request;
        let count = self.registry.count();
        if count < 2 {
            fdebug!(count, "Engine::request: not enough sections");
            return Err(Error::NotEnoughSections(count));
        }
        if self.is_busy() {
            fdebug!(target, ?source, "Engine::request: busy, dropped");
            return Err(Error::Busy);
        }
        if target >= count {
            fdebug!(target, count, "Engine::request: out of range");
            return Err(Error::IndexOutOfRange {
                index: target,
                count,
            });
        }
        let current = self.current_index();
        if target == current {
            ftrace!(target, "Engine::request: already active");
            return Err(Error::AlreadyActive(target));
        }

        let (Some(outgoing), Some(incoming)) =
            (self.registry.get(current), self.registry.get(target))
        else {
            return Err(Error::IndexOutOfRange {
                index: target,
                count,
            });
        };
        let timeline = TransitionPlan {
            outgoing,
            incoming,
            direction,
            options: &self.options,
            exit: self.choreography.resolve(outgoing.id()),
            enter: self.choreography.resolve(incoming.id()),
        }
        .build(now_ms);

        fdebug!(
            from = current,
            to = target,
            ?direction,
            ?source,
            duration_ms = timeline.duration_ms(),
            "Engine: transition accepted"
        );
        self.state = EngineState::Transitioning {
            from: current,
            to: target,
            direction,
        };
        self.source = Some(source);
        self.timeline = Some(timeline);
        self.progress = 0.0;
        self.emit(Phase::Starting, current, target, direction, source);

        if self.options.reduced_motion {
            self.finish();
        }
        Ok(Transition {
            from: current,
            to: target,
            direction,
            source,
        })
    }

    /// Starts a transition to `target`; see [`request`](Self::request).
    pub fn request_go_to(
        &mut self,
        target: usize,
        direction: Direction,
        source: InputSource,
        now_ms: u64,
    ) -> Result<Transition> {
        self.request(TransitionRequest::new(target, direction, source), now_ms)
    }

    /// The following section, wrapping from the last to the first. Always `Down`.
    pub fn next_request(&self, source: InputSource) -> Result<TransitionRequest> {
        let count = self.registry.count();
        if count < 2 {
            return Err(Error::NotEnoughSections(count));
        }
        let target = (self.current_index() + 1) % count;
        Ok(TransitionRequest::new(target, Direction::Down, source))
    }

    /// The preceding section, wrapping from the first to the last. Always `Up`.
    pub fn previous_request(&self, source: InputSource) -> Result<TransitionRequest> {
        let count = self.registry.count();
        if count < 2 {
            return Err(Error::NotEnoughSections(count));
        }
        let target = (self.current_index() + count - 1) % count;
        Ok(TransitionRequest::new(target, Direction::Up, source))
    }

    /// Straight to `index`; the direction follows document order.
    pub fn jump_request(&self, index: usize, source: InputSource) -> TransitionRequest {
        TransitionRequest::new(index, Direction::between(self.current_index(), index), source)
    }

    pub fn request_next(&mut self, source: InputSource, now_ms: u64) -> Result<Transition> {
        let request = self.next_request(source)?;
        self.request(request, now_ms)
    }

    pub fn request_previous(&mut self, source: InputSource, now_ms: u64) -> Result<Transition> {
        let request = self.previous_request(source)?;
        self.request(request, now_ms)
    }

    pub fn request_jump(
        &mut self,
        index: usize,
        source: InputSource,
        now_ms: u64,
    ) -> Result<Transition> {
        let request = self.jump_request(index, source);
        self.request(request, now_ms)
    }

    /// Jumps straight to the section called `id`.
    pub fn request_go_to_id(
        &mut self,
        id: &str,
        source: InputSource,
        now_ms: u64,
    ) -> Result<Transition> {
        let Some(index) = self.registry.index_of(id) else {
            fwarn!(id, ?source, "Engine: unknown section id");
            return Err(Error::UnknownSection(id.into()));
        };
        self.request_jump(index, source, now_ms)
    }

    /// Advances the in-flight timeline.
    ///
    /// Returns `None` at rest. The frame at or past the end of the timeline is returned with
    /// `settled = true` and final values; by then the target is current and
    /// [`Phase::Settled`] has been emitted.
    pub fn tick(&mut self, now_ms: u64) -> Option<Frame> {
        let EngineState::Transitioning {
            from,
            to,
            direction,
        } = self.state
        else {
            return None;
        };
        let timeline = self.timeline.as_ref()?;
        if timeline.is_done(now_ms) {
            return self.finish();
        }
        let mut transforms = Vec::with_capacity(timeline.len());
        timeline.for_each_sample(now_ms, |target, t| transforms.push((target.clone(), t)));
        self.progress = timeline.progress(now_ms);
        Some(Frame {
            from,
            to,
            direction,
            progress: self.progress,
            transforms,
            settled: false,
        })
    }

    /// Jumps the in-flight timeline to its end and settles.
    ///
    /// Returns the final frame, or `None` at rest.
    pub fn finish(&mut self) -> Option<Frame> {
        let EngineState::Transitioning {
            from,
            to,
            direction,
        } = self.state
        else {
            return None;
        };
        let mut transforms = Vec::new();
        if let Some(timeline) = &self.timeline {
            transforms.reserve(timeline.len());
            timeline.for_each_final(|target, t| transforms.push((target.clone(), t)));
        }
        self.complete();
        Some(Frame {
            from,
            to,
            direction,
            progress: 1.0,
            transforms,
            settled: true,
        })
    }

    /// The value of `target` at `now_ms` without advancing anything.
    pub fn sample(&self, target: &Target, now_ms: u64) -> Option<Transform> {
        self.timeline
            .as_ref()
            .and_then(|t| t.sample_target(target, now_ms))
    }

    /// Replaces the section list, e.g. after the host re-scanned its document.
    ///
    /// The current section keeps being current if its id survives; otherwise the current index
    /// is clamped. Rejected with [`Error::Busy`] while a transition is in flight.
    pub fn rebuild(&mut self, registry: SectionRegistry) -> Result<()> {
        if self.is_busy() {
            fdebug!("Engine::rebuild: busy, dropped");
            return Err(Error::Busy);
        }
        let previous = self.current_index();
        let current = self
            .current_section()
            .and_then(|s| registry.index_of(s.id()))
            .unwrap_or_else(|| previous.min(registry.count().saturating_sub(1)));
        fdebug!(
            count = registry.count(),
            previous,
            current,
            "Engine::rebuild"
        );
        self.registry = registry;
        self.state = EngineState::Idle { current };
        Ok(())
    }

    /// The single completion path: updates the state, then notifies.
    fn complete(&mut self) {
        let EngineState::Transitioning {
            from,
            to,
            direction,
        } = self.state
        else {
            return;
        };
        let source = self.source.take().unwrap_or(InputSource::Programmatic);
        self.timeline = None;
        self.progress = 1.0;
        self.state = EngineState::Idle { current: to };
        fdebug!(from, to, ?direction, "Engine: transition settled");
        self.emit(Phase::Settled, from, to, direction, source);
    }

    fn emit(
        &mut self,
        phase: Phase,
        from: usize,
        to: usize,
        direction: Direction,
        source: InputSource,
    ) {
        let id_of = |index: usize| {
            self.registry
                .get(index)
                .map(|s| String::from(s.id()))
                .unwrap_or_default()
        };
        let change = SectionChange {
            phase,
            previous_index: from,
            previous_id: id_of(from),
            current_index: to,
            current_id: id_of(to),
            direction,
            source,
        };
        ftrace!(?phase, from, to, "Engine: notify");
        if self.record_changes {
            self.changes.push(change.clone());
        }
        for (_, listener) in &self.listeners {
            listener(self, &change);
        }
    }
}
