//! A headless engine for full-viewport, section-based scroll presentations.
//!
//! For input handling (wheel/touch/keys with debounce), navigation highlighting and per-section
//! hooks, see the `sectionflow-adapter` crate.
//!
//! The page is an ordered list of sections; exactly one is current. Navigation intents start an
//! animated transition that slides the outgoing section away, moves backgrounds with a parallax
//! offset and staggers each content layer in or out according to a per-section choreography.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - the section list and the layers each section actually has
//! - viewport geometry
//! - a monotonic clock, by calling [`Engine::tick`] once per frame and applying the returned
//!   transforms
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod choreography;
mod engine;
mod error;
mod key;
mod options;
mod registry;
mod state;
mod timeline;
mod transition;
mod tween;
mod types;


pub use choreography::{
    ChoreographyDescriptor, ChoreographyPatch, ChoreographyRegistry, LayerChoreography,
    LayerPatch, LayerTiming, PRIMARY_LEFT, PRIMARY_RIGHT, TimingPatch, TransformPatch,
};
pub use engine::{Engine, Listener, ListenerId};
pub use error::{Error, Result};
pub use options::EngineOptions;
pub use registry::{ContentLayer, LayerSet, Section, SectionRegistry, SectionSpec};
pub use state::{EngineSnapshot, EngineState, Frame, Phase, SectionChange};
pub use timeline::{Position, Step, Timeline, TimelineBuilder, Track};
pub use transition::TransitionPlan;
pub use tween::{Easing, Tween};
pub use types::{
    BackgroundLayout, Direction, InputSource, Role, Target, Transform, Transition, TransitionRequest, Viewport,
};
