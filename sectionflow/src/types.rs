use alloc::string::String;

/// Which way a transition travels.
///
/// `Down` is forward: the outgoing section leaves upward and the incoming one rises from below.
/// `Up` is the mirror image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    /// Direction of a direct jump: forward when the target lies after the current index.
    pub fn between(from: usize, to: usize) -> Self {
        if to > from { Self::Down } else { Self::Up }
    }

    /// `+1.0` for `Down`, `-1.0` for `Up`.
    pub fn sign(self) -> f32 {
        match self {
            Self::Down => 1.0,
            Self::Up => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }
}

/// The input that produced a navigation intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputSource {
    Wheel,
    Touch,
    Drag,
    Key,
    Click,
    Programmatic,
}

/// Viewport geometry in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height <= 0.0 {
            return 1.0;
        }
        self.width / self.height
    }

    /// Height of the parallax background relative to the viewport height.
    ///
    /// Backgrounds are oversized so parallax travel never reveals an edge: wide screens get
    /// 120%, tall/narrow screens 130%, everything else 110%.
    pub fn background_height_ratio(&self) -> f32 {
        let aspect = self.aspect_ratio();
        if aspect > 1.5 {
            1.2
        } else if aspect < 0.8 {
            1.3
        } else {
            1.1
        }
    }

    /// Vertical offset that keeps an oversized background centered.
    pub fn background_top(&self) -> f32 {
        -(self.background_height_ratio() - 1.0) / 2.0 * self.height
    }

    pub fn background_layout(&self) -> BackgroundLayout {
        BackgroundLayout {
            width: self.width,
            height: self.background_height_ratio() * self.height,
            top: self.background_top(),
        }
    }
}

/// Where a host places every parallax background for the current viewport, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackgroundLayout {
    pub width: f32,
    pub height: f32,
    /// Relative to the section's top edge; negative so the overflow is split evenly.
    pub top: f32,
}

/// The animatable parameter set of any layer.
///
/// `offset_x`/`offset_y` are pixels, `rotation` is degrees, `scale` is a factor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Transform {
    pub offset_x: f32,
    pub offset_y: f32,
    pub opacity: f32,
    pub rotation: f32,
    pub scale: f32,
}

impl Transform {
    /// The resting state of a layer.
    pub const IDENTITY: Self = Self {
        offset_x: 0.0,
        offset_y: 0.0,
        opacity: 1.0,
        rotation: 0.0,
        scale: 1.0,
    };

    pub fn translate_y(offset_y: f32) -> Self {
        Self {
            offset_y,
            ..Self::IDENTITY
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            offset_x: mix(self.offset_x, to.offset_x),
            offset_y: mix(self.offset_y, to.offset_y),
            opacity: mix(self.opacity, to.opacity),
            rotation: mix(self.rotation, to.rotation),
            scale: mix(self.scale, to.scale),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The side of a transition a target belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Outgoing,
    Incoming,
}

/// Something a timeline animates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// The whole section container.
    Section(Role),
    /// The parallax background of a section.
    Background(Role),
    /// The darkening overlay of a section.
    Overlay(Role),
    /// One nested element of a named content layer.
    Element {
        role: Role,
        layer: String,
        element: usize,
    },
}

impl Target {
    pub fn role(&self) -> Role {
        match self {
            Self::Section(role) | Self::Background(role) | Self::Overlay(role) => *role,
            Self::Element { role, .. } => *role,
        }
    }

    pub fn element(role: Role, layer: impl Into<String>, element: usize) -> Self {
        Self::Element {
            role,
            layer: layer.into(),
            element,
        }
    }
}

/// A navigation intent: where to go, which way, and what asked for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionRequest {
    pub target_index: usize,
    pub direction: Direction,
    pub source: InputSource,
}

impl TransitionRequest {
    pub fn new(target_index: usize, direction: Direction, source: InputSource) -> Self {
        Self {
            target_index,
            direction,
            source,
        }
    }
}

/// An accepted transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub source: InputSource,
}
