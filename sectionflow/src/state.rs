use alloc::string::String;
use alloc::vec::Vec;

use crate::{Direction, InputSource, Role, Target, Transform, Viewport};

/// The state machine's state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineState {
    Idle {
        current: usize,
    },
    Transitioning {
        from: usize,
        to: usize,
        direction: Direction,
    },
}

impl EngineState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle { .. })
    }

    /// The section that is current: at rest, or the outgoing one mid-transition.
    pub fn current(&self) -> usize {
        match *self {
            Self::Idle { current } => current,
            Self::Transitioning { from, .. } => from,
        }
    }

    pub fn target(&self) -> Option<usize> {
        match *self {
            Self::Idle { .. } => None,
            Self::Transitioning { to, .. } => Some(to),
        }
    }
}

/// Which half of a transition a notification reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Emitted once a request is accepted, before anything moves.
    Starting,
    /// Emitted after the timeline completed and the target became current.
    Settled,
}

/// The section-change notification.
///
/// Exactly one `Starting` and one `Settled` are emitted per accepted transition, in that order.
/// `previous_*` is the section being left, `current_*` the section being entered, in both
/// phases.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionChange {
    pub phase: Phase,
    pub previous_index: usize,
    pub previous_id: String,
    pub current_index: usize,
    pub current_id: String,
    pub direction: Direction,
    pub source: InputSource,
}

impl SectionChange {
    pub fn is_starting(&self) -> bool {
        self.phase == Phase::Starting
    }

    pub fn is_settled(&self) -> bool {
        self.phase == Phase::Settled
    }
}

/// A lightweight, serializable snapshot of the engine.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineSnapshot {
    pub state: EngineState,
    pub section_count: usize,
    pub viewport: Viewport,
    /// Progress of the in-flight timeline in `[0, 1]`; `1.0` at rest.
    pub progress: f32,
}

/// The sampled transforms of one [`crate::Engine::tick`].
///
/// Targets the timeline does not animate are at rest ([`Transform::IDENTITY`]); sections other
/// than `from` and `to` are hidden.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    /// Timeline progress in `[0, 1]`.
    pub progress: f32,
    pub transforms: Vec<(Target, Transform)>,
    /// `true` for the last frame of a transition; `to` is current from here on.
    pub settled: bool,
}

impl Frame {
    /// The sampled value of `target`, if the timeline animates it.
    pub fn get(&self, target: &Target) -> Option<Transform> {
        self.transforms
            .iter()
            .rev()
            .find(|(t, _)| t == target)
            .map(|(_, transform)| *transform)
    }

    /// Samples of every element of `layer` on one side, in element order.
    pub fn layer<'a>(
        &'a self,
        role: Role,
        layer: &'a str,
    ) -> impl Iterator<Item = (usize, Transform)> + 'a {
        self.transforms.iter().filter_map(move |(t, transform)| match t {
            Target::Element {
                role: r,
                layer: l,
                element,
            } if *r == role && l == layer => Some((*element, *transform)),
            _ => None,
        })
    }
}
