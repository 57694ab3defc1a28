use alloc::string::String;

use sectionflow::{Engine, Error, InputSource, Transition, TransitionRequest};

/// Thresholds and the cooldown used to turn raw input into navigation intents.
///
/// With `feature = "serde"`, missing fields take their defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    /// Wheel deltas at or below this magnitude are ignored.
    pub wheel_threshold: f32,
    /// Minimum vertical swipe distance in pixels.
    pub touch_threshold: f32,
    /// Minimum vertical pointer drag distance in pixels.
    pub drag_threshold: f32,
    /// Cooldown for wheel and keyboard input, measured from the last accepted request.
    pub debounce_ms: u64,

    pub wheel: bool,
    pub touch: bool,
    pub drag: bool,
    pub keyboard: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_threshold: 1.0,
            touch_threshold: 40.0,
            drag_threshold: 100.0,
            debounce_ms: 500,
            wheel: true,
            touch: true,
            drag: true,
            keyboard: true,
        }
    }
}

impl InputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wheel_threshold(mut self, threshold: f32) -> Self {
        self.wheel_threshold = threshold;
        self
    }

    pub fn with_touch_threshold(mut self, threshold: f32) -> Self {
        self.touch_threshold = threshold;
        self
    }

    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_wheel(mut self, enabled: bool) -> Self {
        self.wheel = enabled;
        self
    }

    pub fn with_touch(mut self, enabled: bool) -> Self {
        self.touch = enabled;
        self
    }

    pub fn with_drag(mut self, enabled: bool) -> Self {
        self.drag = enabled;
        self
    }

    pub fn with_keyboard(mut self, enabled: bool) -> Self {
        self.keyboard = enabled;
        self
    }
}

/// A key, as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowDown,
    ArrowUp,
    PageDown,
    PageUp,
    Space,
    Character(char),
    Other,
}

impl Key {
    /// Maps a DOM-style key name (`"ArrowDown"`, `" "`, `"d"`, ...).
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "PageDown" => Self::PageDown,
            "PageUp" => Self::PageUp,
            " " | "Space" | "Spacebar" => Self::Space,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        shift: true,
        alt: false,
        meta: false,
    };
}

/// Raw input, already stripped of any UI framework types.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent {
    /// Positive `delta_y` scrolls down.
    Wheel { delta_y: f32 },
    TouchStart { y: f32 },
    TouchEnd { y: f32 },
    PointerDown { y: f32 },
    PointerMove { y: f32 },
    /// Pointer released or left the window.
    PointerUp,
    Key { key: Key, modifiers: Modifiers },
    /// A navigation link, progress dot or logo pointing at a section.
    NavClick { target_id: String },
    /// A programmatic jump by id.
    JumpTo { target_id: String },
    /// A programmatic jump by index.
    JumpToIndex { index: usize },
}

/// Why an event did not turn into a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Fewer than two sections: nothing to navigate.
    NotEnoughSections,
    /// The input source is turned off in [`InputConfig`].
    Disabled,
    BelowThreshold,
    /// Inside the cooldown of the last accepted request.
    Debounced,
    UnmappedKey,
    /// A gesture end without a start, or a drag that already fired.
    NoGesture,
    /// The link points at the current section.
    AlreadyActive,
    /// The link points at no registered section.
    UnknownTarget,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputOutcome {
    Navigated(Transition),
    Ignored(IgnoreReason),
    /// The engine refused the request (usually [`Error::Busy`]).
    Rejected(Error),
    /// `Ctrl+Shift+D`: the host should toggle the progress indicator.
    ToggleIndicator,
}

/// What happened to one event, and whether the host should suppress its default action.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch {
    pub outcome: InputOutcome,
    pub prevent_default: bool,
}

impl Dispatch {
    fn ignored(reason: IgnoreReason) -> Self {
        Self {
            outcome: InputOutcome::Ignored(reason),
            prevent_default: false,
        }
    }

    pub fn is_navigation(&self) -> bool {
        matches!(self.outcome, InputOutcome::Navigated(_))
    }

    pub fn transition(&self) -> Option<Transition> {
        match self.outcome {
            InputOutcome::Navigated(t) => Some(t),
            _ => None,
        }
    }
}

/// `true` when `delta` travels further than `threshold` in either direction.
fn beyond(delta: f32, threshold: f32) -> bool {
    delta > threshold || delta < -threshold
}

enum Intent {
    Next,
    Previous,
    Jump(usize),
}

/// Turns raw input into engine requests.
///
/// Wheel and keyboard input share one cooldown, measured from the last request the engine
/// accepted (from any source). Touch, drag, link clicks and programmatic jumps are not
/// debounced; the engine's busy state still drops them mid-transition.
#[derive(Clone, Debug, Default)]
pub struct InputAdapter {
    config: InputConfig,
    last_accepted_ms: Option<u64>,
    touch_start_y: Option<f32>,
    drag_start_y: Option<f32>,
}

impl InputAdapter {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InputConfig) {
        self.config = config;
    }

    /// When the engine last accepted a request made through this adapter.
    pub fn last_accepted_ms(&self) -> Option<u64> {
        self.last_accepted_ms
    }

    /// Forgets any half-finished touch or drag gesture.
    pub fn reset_gestures(&mut self) {
        self.touch_start_y = None;
        self.drag_start_y = None;
    }

    fn is_debounced(&self, now_ms: u64) -> bool {
        matches!(
            self.last_accepted_ms,
            Some(last) if now_ms.saturating_sub(last) < self.config.debounce_ms
        )
    }

    pub fn dispatch(&mut self, engine: &mut Engine, event: &InputEvent, now_ms: u64) -> Dispatch {
        if engine.section_count() < 2 {
            self.reset_gestures();
            return Dispatch::ignored(IgnoreReason::NotEnoughSections);
        }
        match event {
            InputEvent::Wheel { delta_y } => {
                if !self.config.wheel {
                    return Dispatch::ignored(IgnoreReason::Disabled);
                }
                let mut d = if self.is_debounced(now_ms) {
                    ftrace!(now_ms, "wheel debounced");
                    Dispatch::ignored(IgnoreReason::Debounced)
                } else if !beyond(*delta_y, self.config.wheel_threshold) {
                    Dispatch::ignored(IgnoreReason::BelowThreshold)
                } else {
                    let intent = if *delta_y > 0.0 {
                        Intent::Next
                    } else {
                        Intent::Previous
                    };
                    self.request(engine, intent, InputSource::Wheel, now_ms)
                };
                // The page itself never scrolls.
                d.prevent_default = true;
                d
            }
            InputEvent::TouchStart { y } => {
                if self.config.touch {
                    self.touch_start_y = Some(*y);
                }
                Dispatch::ignored(IgnoreReason::NoGesture)
            }
            InputEvent::TouchEnd { y } => {
                if !self.config.touch {
                    return Dispatch::ignored(IgnoreReason::Disabled);
                }
                let Some(start) = self.touch_start_y.take() else {
                    return Dispatch::ignored(IgnoreReason::NoGesture);
                };
                let delta = *y - start;
                if !beyond(delta, self.config.touch_threshold) {
                    return Dispatch::ignored(IgnoreReason::BelowThreshold);
                }
                // Swiping up moves forward.
                let intent = if delta < 0.0 {
                    Intent::Next
                } else {
                    Intent::Previous
                };
                self.request(engine, intent, InputSource::Touch, now_ms)
            }
            InputEvent::PointerDown { y } => {
                if self.config.drag {
                    self.drag_start_y = Some(*y);
                }
                Dispatch::ignored(IgnoreReason::NoGesture)
            }
            InputEvent::PointerMove { y } => {
                if !self.config.drag {
                    return Dispatch::ignored(IgnoreReason::Disabled);
                }
                let Some(start) = self.drag_start_y else {
                    return Dispatch::ignored(IgnoreReason::NoGesture);
                };
                let delta = *y - start;
                if !beyond(delta, self.config.drag_threshold) {
                    return Dispatch::ignored(IgnoreReason::BelowThreshold);
                }
                // One navigation per press.
                self.drag_start_y = None;
                let intent = if delta < 0.0 {
                    Intent::Next
                } else {
                    Intent::Previous
                };
                self.request(engine, intent, InputSource::Drag, now_ms)
            }
            InputEvent::PointerUp => {
                self.drag_start_y = None;
                Dispatch::ignored(IgnoreReason::NoGesture)
            }
            InputEvent::Key { key, modifiers } => self.key(engine, *key, *modifiers, now_ms),
            InputEvent::NavClick { target_id } => {
                let Some(index) = engine.registry().index_of(target_id) else {
                    fwarn!(target_id = target_id.as_str(), "nav link to unknown section");
                    return Dispatch::ignored(IgnoreReason::UnknownTarget);
                };
                let mut d = if index == engine.current_index() && !engine.is_busy() {
                    Dispatch::ignored(IgnoreReason::AlreadyActive)
                } else {
                    self.request(engine, Intent::Jump(index), InputSource::Click, now_ms)
                };
                d.prevent_default = true;
                d
            }
            InputEvent::JumpTo { target_id } => match engine.registry().index_of(target_id) {
                Some(index) => self.jump(engine, index, now_ms),
                None => {
                    fwarn!(target_id = target_id.as_str(), "jump to unknown section");
                    Dispatch {
                        outcome: InputOutcome::Rejected(Error::UnknownSection(target_id.clone())),
                        prevent_default: false,
                    }
                }
            },
            InputEvent::JumpToIndex { index } => self.jump(engine, *index, now_ms),
        }
    }

    fn key(
        &mut self,
        engine: &mut Engine,
        key: Key,
        modifiers: Modifiers,
        now_ms: u64,
    ) -> Dispatch {
        if let Key::Character(c) = key {
            if modifiers.ctrl && modifiers.shift && c.eq_ignore_ascii_case(&'d') {
                fdebug!("toggle progress indicator");
                return Dispatch {
                    outcome: InputOutcome::ToggleIndicator,
                    prevent_default: true,
                };
            }
        }
        if !self.config.keyboard {
            return Dispatch::ignored(IgnoreReason::Disabled);
        }
        let intent = match key {
            Key::ArrowDown | Key::PageDown | Key::Space => Intent::Next,
            Key::ArrowUp | Key::PageUp => Intent::Previous,
            Key::Character(_) | Key::Other => return Dispatch::ignored(IgnoreReason::UnmappedKey),
        };
        let mut d = if self.is_debounced(now_ms) {
            ftrace!(now_ms, "key debounced");
            Dispatch::ignored(IgnoreReason::Debounced)
        } else {
            self.request(engine, intent, InputSource::Key, now_ms)
        };
        d.prevent_default = true;
        d
    }

    fn jump(&mut self, engine: &mut Engine, index: usize, now_ms: u64) -> Dispatch {
        self.request(engine, Intent::Jump(index), InputSource::Programmatic, now_ms)
    }

    fn request(
        &mut self,
        engine: &mut Engine,
        intent: Intent,
        source: InputSource,
        now_ms: u64,
    ) -> Dispatch {
        let request: Result<TransitionRequest, Error> = match intent {
            Intent::Next => engine.next_request(source),
            Intent::Previous => engine.previous_request(source),
            Intent::Jump(index) => Ok(engine.jump_request(index, source)),
        };
        let result = request.and_then(|request| engine.request(request, now_ms));
        let outcome = match result {
            Ok(transition) => {
                self.last_accepted_ms = Some(now_ms);
                InputOutcome::Navigated(transition)
            }
            Err(err) => {
                fdebug!(?source, %err, "request rejected");
                InputOutcome::Rejected(err)
            }
        };
        Dispatch {
            outcome,
            prevent_default: false,
        }
    }
}
