//! Per-section enter/exit recipes.
//!
//! A [`ChoreographyDescriptor`] maps layer names to the transform a layer enters from, the
//! transform it exits to, and the timing of both. The engine never branches on section ids: it
//! asks [`ChoreographyRegistry::resolve`] for a descriptor and plays whatever comes back.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::key::IdMap;
use crate::{Easing, Error, Result, Transform};

pub const PRIMARY_LEFT: &str = "primary-left";
pub const PRIMARY_RIGHT: &str = "primary-right";

/// Pacing of one layer's enter or exit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerTiming {
    pub duration_ms: u64,
    /// Delay between consecutive elements of the layer.
    pub stagger_ms: u64,
    pub easing: Easing,
    /// Offset of the layer's first element within its phase of the transition.
    pub start_ms: u64,
}

impl LayerTiming {
    pub const ENTER: Self = Self {
        duration_ms: 1200,
        stagger_ms: 150,
        easing: Easing::Power3Out,
        start_ms: 0,
    };

    pub const EXIT: Self = Self {
        duration_ms: 800,
        stagger_ms: 0,
        easing: Easing::Power2In,
        start_ms: 0,
    };

    pub fn with_start_ms(mut self, start_ms: u64) -> Self {
        self.start_ms = start_ms;
        self
    }

    /// Start offset of element `element` of the layer.
    pub fn element_start(&self, element: usize) -> u64 {
        self.start_ms
            .saturating_add(self.stagger_ms.saturating_mul(element as u64))
    }
}

/// The recipe of one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerChoreography {
    pub enter_from: Transform,
    pub exit_to: Transform,
    pub enter: LayerTiming,
    pub exit: LayerTiming,
}

impl Default for LayerChoreography {
    fn default() -> Self {
        Self {
            enter_from: Transform::IDENTITY,
            exit_to: Transform::IDENTITY,
            enter: LayerTiming::ENTER,
            exit: LayerTiming::EXIT,
        }
    }
}

impl LayerChoreography {
    /// Fade-and-slide recipe for layers no descriptor mentions: elements rise into place in the
    /// travel direction and leave against it.
    pub fn directional(shift: f32, sign: f32, enter: LayerTiming, exit: LayerTiming) -> Self {
        Self {
            enter_from: Transform::translate_y(sign * shift).with_opacity(0.0),
            exit_to: Transform::translate_y(-sign * shift).with_opacity(0.0),
            enter,
            exit,
        }
    }
}

/// A complete recipe: every layer the section's choreography knows about.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoreographyDescriptor {
    layers: BTreeMap<String, LayerChoreography>,
}

impl Default for ChoreographyDescriptor {
    fn default() -> Self {
        Self::generic()
    }
}

impl ChoreographyDescriptor {
    pub fn empty() -> Self {
        Self {
            layers: BTreeMap::new(),
        }
    }

    /// The generic recipe: the left layer slides in from 50px left, the right layer from 50px
    /// right, both fading in; they leave 30px to their own side. The right layer starts two
    /// stagger steps after the left one.
    pub fn generic() -> Self {
        let left = LayerChoreography {
            enter_from: Transform {
                offset_x: -50.0,
                opacity: 0.0,
                ..Transform::IDENTITY
            },
            exit_to: Transform {
                offset_x: -30.0,
                opacity: 0.0,
                ..Transform::IDENTITY
            },
            ..LayerChoreography::default()
        };
        let right = LayerChoreography {
            enter_from: Transform {
                offset_x: 50.0,
                opacity: 0.0,
                ..Transform::IDENTITY
            },
            exit_to: Transform {
                offset_x: 30.0,
                opacity: 0.0,
                ..Transform::IDENTITY
            },
            enter: LayerTiming::ENTER.with_start_ms(LayerTiming::ENTER.stagger_ms * 2),
            ..LayerChoreography::default()
        };
        Self::empty()
            .with_layer(PRIMARY_LEFT, left)
            .with_layer(PRIMARY_RIGHT, right)
    }

    pub fn with_layer(mut self, name: impl Into<String>, layer: LayerChoreography) -> Self {
        self.layers.insert(name.into(), layer);
        self
    }

    pub fn layer(&self, name: &str) -> Option<&LayerChoreography> {
        self.layers.get(name)
    }

    pub fn layers(&self) -> impl Iterator<Item = (&str, &LayerChoreography)> {
        self.layers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Shallow-merges `patch` into a copy of `self`.
    pub fn merged(&self, patch: &ChoreographyPatch) -> Self {
        let mut out = self.clone();
        for (name, layer_patch) in &patch.layers {
            let base = out.layers.get(name).copied().unwrap_or_default();
            out.layers.insert(name.clone(), layer_patch.apply(base));
        }
        out
    }
}

/// A partial [`Transform`]: `None` fields keep the base value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformPatch {
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
    pub opacity: Option<f32>,
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
}

impl TransformPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset_x(mut self, v: f32) -> Self {
        self.offset_x = Some(v);
        self
    }

    pub fn offset_y(mut self, v: f32) -> Self {
        self.offset_y = Some(v);
        self
    }

    pub fn opacity(mut self, v: f32) -> Self {
        self.opacity = Some(v);
        self
    }

    pub fn rotation(mut self, v: f32) -> Self {
        self.rotation = Some(v);
        self
    }

    pub fn scale(mut self, v: f32) -> Self {
        self.scale = Some(v);
        self
    }

    pub fn apply(&self, base: Transform) -> Transform {
        Transform {
            offset_x: self.offset_x.unwrap_or(base.offset_x),
            offset_y: self.offset_y.unwrap_or(base.offset_y),
            opacity: self.opacity.unwrap_or(base.opacity),
            rotation: self.rotation.unwrap_or(base.rotation),
            scale: self.scale.unwrap_or(base.scale),
        }
    }

    /// `over` on top of `self`: fields set in `over` win.
    pub fn layered(&self, over: &Self) -> Self {
        Self {
            offset_x: over.offset_x.or(self.offset_x),
            offset_y: over.offset_y.or(self.offset_y),
            opacity: over.opacity.or(self.opacity),
            rotation: over.rotation.or(self.rotation),
            scale: over.scale.or(self.scale),
        }
    }
}

/// A partial [`LayerTiming`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingPatch {
    pub duration_ms: Option<u64>,
    pub stagger_ms: Option<u64>,
    pub easing: Option<Easing>,
    pub start_ms: Option<u64>,
}

impl TimingPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration_ms(mut self, v: u64) -> Self {
        self.duration_ms = Some(v);
        self
    }

    pub fn stagger_ms(mut self, v: u64) -> Self {
        self.stagger_ms = Some(v);
        self
    }

    pub fn easing(mut self, v: Easing) -> Self {
        self.easing = Some(v);
        self
    }

    pub fn start_ms(mut self, v: u64) -> Self {
        self.start_ms = Some(v);
        self
    }

    pub fn apply(&self, base: LayerTiming) -> LayerTiming {
        LayerTiming {
            duration_ms: self.duration_ms.unwrap_or(base.duration_ms),
            stagger_ms: self.stagger_ms.unwrap_or(base.stagger_ms),
            easing: self.easing.unwrap_or(base.easing),
            start_ms: self.start_ms.unwrap_or(base.start_ms),
        }
    }

    pub fn layered(&self, over: &Self) -> Self {
        Self {
            duration_ms: over.duration_ms.or(self.duration_ms),
            stagger_ms: over.stagger_ms.or(self.stagger_ms),
            easing: over.easing.or(self.easing),
            start_ms: over.start_ms.or(self.start_ms),
        }
    }
}

/// A partial [`LayerChoreography`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerPatch {
    pub enter_from: TransformPatch,
    pub exit_to: TransformPatch,
    pub enter: TimingPatch,
    pub exit: TimingPatch,
}

impl LayerPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_from(mut self, patch: TransformPatch) -> Self {
        self.enter_from = patch;
        self
    }

    pub fn exit_to(mut self, patch: TransformPatch) -> Self {
        self.exit_to = patch;
        self
    }

    pub fn enter(mut self, patch: TimingPatch) -> Self {
        self.enter = patch;
        self
    }

    pub fn exit(mut self, patch: TimingPatch) -> Self {
        self.exit = patch;
        self
    }

    pub fn apply(&self, base: LayerChoreography) -> LayerChoreography {
        LayerChoreography {
            enter_from: self.enter_from.apply(base.enter_from),
            exit_to: self.exit_to.apply(base.exit_to),
            enter: self.enter.apply(base.enter),
            exit: self.exit.apply(base.exit),
        }
    }

    pub fn layered(&self, over: &Self) -> Self {
        Self {
            enter_from: self.enter_from.layered(&over.enter_from),
            exit_to: self.exit_to.layered(&over.exit_to),
            enter: self.enter.layered(&over.enter),
            exit: self.exit.layered(&over.exit),
        }
    }
}

/// A partial descriptor handed to [`ChoreographyRegistry::register`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChoreographyPatch {
    pub layers: BTreeMap<String, LayerPatch>,
}

impl ChoreographyPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(mut self, name: impl Into<String>, patch: LayerPatch) -> Self {
        self.layers.insert(name.into(), patch);
        self
    }

    /// Combines two patches; where both set a field, `over` wins.
    pub fn layered(&self, over: &Self) -> Self {
        let mut out = self.clone();
        for (name, patch) in &over.layers {
            let base = out.layers.get(name).copied().unwrap_or_default();
            out.layers.insert(name.clone(), base.layered(patch));
        }
        out
    }
}

/// A section's registered recipe.
///
/// Patch-based overrides keep the raw patch so they can be re-applied over a new default;
/// descriptors registered outright are pinned.
#[derive(Clone, Debug)]
struct Override {
    patch: Option<ChoreographyPatch>,
    descriptor: ChoreographyDescriptor,
}

/// The default recipe plus per-section overrides.
#[derive(Clone, Debug, Default)]
pub struct ChoreographyRegistry {
    default: ChoreographyDescriptor,
    overrides: IdMap<Override>,
}

impl ChoreographyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, default: ChoreographyDescriptor) -> Self {
        self.set_default(default);
        self
    }

    pub fn default_descriptor(&self) -> &ChoreographyDescriptor {
        &self.default
    }

    /// Replaces the generic recipe.
    ///
    /// Sections registered with [`register`](Self::register) are rebuilt over the new default,
    /// so layers and fields their patches leave out follow it. Descriptors registered with
    /// [`register_descriptor`](Self::register_descriptor) are not affected.
    pub fn set_default(&mut self, default: ChoreographyDescriptor) {
        for entry in self.overrides.values_mut() {
            if let Some(patch) = &entry.patch {
                entry.descriptor = default.merged(patch);
            }
        }
        self.default = default;
    }

    /// Merges `patch` over the section's current recipe.
    ///
    /// Registering twice for the same id layers the second patch over the first; layers and
    /// fields a patch leaves out keep their previous values.
    pub fn register(&mut self, section_id: impl Into<String>, patch: &ChoreographyPatch) {
        let section_id = section_id.into();
        fdebug!(
            section = section_id.as_str(),
            layers = patch.layers.len(),
            "ChoreographyRegistry::register"
        );
        let entry = match self.overrides.get(section_id.as_str()) {
            Some(Override {
                patch: Some(prev), ..
            }) => {
                let combined = prev.layered(patch);
                Override {
                    descriptor: self.default.merged(&combined),
                    patch: Some(combined),
                }
            }
            Some(Override {
                patch: None,
                descriptor,
            }) => Override {
                patch: None,
                descriptor: descriptor.merged(patch),
            },
            None => Override {
                descriptor: self.default.merged(patch),
                patch: Some(patch.clone()),
            },
        };
        self.overrides.insert(section_id, entry);
    }

    /// Replaces the section's recipe outright, ignoring the default.
    pub fn register_descriptor(
        &mut self,
        section_id: impl Into<String>,
        descriptor: ChoreographyDescriptor,
    ) {
        self.overrides.insert(
            section_id.into(),
            Override {
                patch: None,
                descriptor,
            },
        );
    }

    pub fn contains(&self, section_id: &str) -> bool {
        self.overrides.contains_key(section_id)
    }

    /// The section's own recipe, without falling back.
    pub fn lookup(&self, section_id: &str) -> Result<&ChoreographyDescriptor> {
        self.overrides
            .get(section_id)
            .map(|entry| &entry.descriptor)
            .ok_or_else(|| Error::ConfigurationMissing(section_id.into()))
    }

    /// The section's recipe, or the default one when it has none.
    pub fn resolve(&self, section_id: &str) -> &ChoreographyDescriptor {
        match self.lookup(section_id) {
            Ok(descriptor) => descriptor,
            Err(_) => {
                ftrace!(section = section_id, "no choreography override, using default");
                &self.default
            }
        }
    }
}
