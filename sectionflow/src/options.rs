use crate::{Easing, LayerTiming, Viewport};

/// Configuration for [`crate::Engine`].
///
/// Plain data: with `feature = "serde"` it can be loaded from any serde format, and missing
/// fields take their defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineOptions {
    pub viewport: Viewport,

    /// The section that is current before any navigation.
    pub initial_index: usize,

    /// Duration of the section slide.
    pub main_duration_ms: u64,
    /// Duration of the background parallax.
    pub background_duration_ms: u64,
    /// When the incoming section and its background start moving.
    pub incoming_delay_ms: u64,
    /// When the incoming overlay starts clearing.
    pub overlay_delay_ms: u64,
    /// When the incoming content layers start entering.
    pub content_delay_ms: u64,

    pub main_easing: Easing,
    pub incoming_easing: Easing,
    pub background_easing: Easing,

    /// Stagger between elements of layers that have no choreography entry.
    pub stagger_ms: u64,
    /// Vertical travel of elements of layers that have no choreography entry.
    pub content_shift: f32,
    /// Easing of elements of layers that have no choreography entry.
    pub content_easing: Easing,

    /// Background travel as a fraction of the viewport height.
    pub parallax_ratio: f32,
    /// Background scale at the far end of its parallax travel.
    pub background_scale: f32,

    /// Opacity the outgoing overlay darkens to.
    pub outgoing_overlay_opacity: f32,
    /// Opacity the incoming overlay clears from.
    pub incoming_overlay_opacity: f32,

    /// Completes every accepted transition immediately, still emitting both notifications.
    pub reduced_motion: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            initial_index: 0,
            main_duration_ms: 800,
            background_duration_ms: 1000,
            incoming_delay_ms: 100,
            overlay_delay_ms: 200,
            content_delay_ms: 350,
            main_easing: Easing::Power2InOut,
            incoming_easing: Easing::Power2Out,
            background_easing: Easing::Power2Out,
            stagger_ms: 30,
            content_shift: 30.0,
            content_easing: Easing::BackOut(1.5),
            parallax_ratio: 0.05,
            background_scale: 1.05,
            outgoing_overlay_opacity: 0.3,
            incoming_overlay_opacity: 0.4,
            reduced_motion: false,
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_initial_index(mut self, initial_index: usize) -> Self {
        self.initial_index = initial_index;
        self
    }

    pub fn with_main_duration_ms(mut self, duration_ms: u64) -> Self {
        self.main_duration_ms = duration_ms;
        self
    }

    pub fn with_background_duration_ms(mut self, duration_ms: u64) -> Self {
        self.background_duration_ms = duration_ms;
        self
    }

    /// Sets the incoming section, overlay and content delays at once.
    pub fn with_delays_ms(mut self, incoming: u64, overlay: u64, content: u64) -> Self {
        self.incoming_delay_ms = incoming;
        self.overlay_delay_ms = overlay;
        self.content_delay_ms = content;
        self
    }

    pub fn with_easings(mut self, main: Easing, incoming: Easing, background: Easing) -> Self {
        self.main_easing = main;
        self.incoming_easing = incoming;
        self.background_easing = background;
        self
    }

    pub fn with_content_motion(mut self, shift: f32, stagger_ms: u64, easing: Easing) -> Self {
        self.content_shift = shift;
        self.stagger_ms = stagger_ms;
        self.content_easing = easing;
        self
    }

    pub fn with_parallax(mut self, ratio: f32, background_scale: f32) -> Self {
        self.parallax_ratio = ratio;
        self.background_scale = background_scale;
        self
    }

    pub fn with_overlay_opacities(mut self, outgoing: f32, incoming: f32) -> Self {
        self.outgoing_overlay_opacity = outgoing;
        self.incoming_overlay_opacity = incoming;
        self
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Enter timing for layers without a choreography entry.
    pub fn fallback_enter_timing(&self) -> LayerTiming {
        LayerTiming {
            duration_ms: self.main_duration_ms.saturating_mul(4) / 5,
            stagger_ms: self.stagger_ms,
            easing: self.content_easing,
            start_ms: 0,
        }
    }

    /// Exit timing for layers without a choreography entry.
    pub fn fallback_exit_timing(&self) -> LayerTiming {
        LayerTiming {
            duration_ms: self.main_duration_ms.saturating_mul(3) / 5,
            stagger_ms: self.stagger_ms,
            easing: self.main_easing,
            start_ms: 0,
        }
    }
}
