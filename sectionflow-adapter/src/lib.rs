//! Adapter utilities for the `sectionflow` crate.
//!
//! The `sectionflow` crate owns sections, choreography and the transition state machine. This
//! crate provides the framework-neutral pieces a host usually needs around it:
//!
//! - Input normalization: wheel, touch, pointer drag and keyboard thresholds plus a shared
//!   cooldown, link clicks and programmatic jumps
//! - Navigation highlighting and progress dots that follow section changes
//! - Per-section hooks for bespoke enter/exit effects
//! - A [`Controller`] that ties all of the above to an engine
//!
//! This crate is intentionally framework-agnostic (no DOM or GUI bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod hooks;
mod input;
mod nav;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use hooks::{SectionHook, SectionHooks};
pub use input::{
    Dispatch, IgnoreReason, InputAdapter, InputConfig, InputEvent, InputOutcome, Key, Modifiers,
};
pub use nav::{DotState, NavLink, NavLinkState, NavigationSync, ProgressIndicator};
