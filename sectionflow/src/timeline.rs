use alloc::vec::Vec;

use crate::{Easing, Target, Transform, Tween};

/// Where a step starts, relative to the steps already added to a [`TimelineBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// A fixed offset from the start of the timeline.
    At(u64),
    /// Together with the previously added step.
    WithPrevious,
    /// Right after the previously added step ends.
    AfterPrevious,
    /// Relative to the end of the previously added step; negative values overlap it.
    Relative(i64),
    /// After everything added so far.
    End,
}

/// The keyframes and pacing of one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub from: Transform,
    pub to: Transform,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Step {
    pub fn new(from: Transform, to: Transform, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
        }
    }
}

/// One animated target inside a timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub target: Target,
    pub tween: Tween,
}

/// Collects steps with relative positions, then anchors them to a clock with [`build`].
///
/// [`build`]: TimelineBuilder::build
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    tracks: Vec<Track>,
    prev_start: u64,
    prev_end: u64,
    end: u64,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn resolve(&self, position: Position) -> u64 {
        match position {
            Position::At(ms) => ms,
            Position::WithPrevious => self.prev_start,
            Position::AfterPrevious => self.prev_end,
            Position::Relative(delta) => {
                if delta >= 0 {
                    self.prev_end.saturating_add(delta as u64)
                } else {
                    self.prev_end.saturating_sub(delta.unsigned_abs())
                }
            }
            Position::End => self.end,
        }
    }

    pub fn add(&mut self, target: Target, step: Step, position: Position) -> &mut Self {
        let start = self.resolve(position);
        let tween = Tween::new(step.from, step.to, start, step.duration_ms, step.easing);
        self.prev_start = start;
        self.prev_end = tween.end_ms();
        self.end = self.end.max(self.prev_end);
        self.tracks.push(Track { target, tween });
        self
    }

    /// Adds the same step for several targets, each starting `stagger_ms` after the previous.
    ///
    /// Counts as a single step for the purposes of [`Position::WithPrevious`] and
    /// [`Position::AfterPrevious`].
    pub fn stagger(
        &mut self,
        targets: impl IntoIterator<Item = Target>,
        step: Step,
        stagger_ms: u64,
        position: Position,
    ) -> &mut Self {
        let base = self.resolve(position);
        let mut group_end = None;
        for (i, target) in targets.into_iter().enumerate() {
            let start = base.saturating_add(stagger_ms.saturating_mul(i as u64));
            let tween = Tween::new(step.from, step.to, start, step.duration_ms, step.easing);
            group_end = Some(group_end.unwrap_or(0).max(tween.end_ms()));
            self.tracks.push(Track { target, tween });
        }
        if let Some(group_end) = group_end {
            self.prev_start = base;
            self.prev_end = group_end;
            self.end = self.end.max(group_end);
        }
        self
    }

    /// Anchors every step at `origin_ms`.
    pub fn build(self, origin_ms: u64) -> Timeline {
        let tracks = self
            .tracks
            .into_iter()
            .map(|t| Track {
                target: t.target,
                tween: t.tween.delayed(origin_ms),
            })
            .collect();
        Timeline {
            tracks,
            origin_ms,
            duration_ms: self.end,
            cancelled: false,
        }
    }
}

/// A group of tweens anchored to a clock.
#[derive(Clone, Debug)]
pub struct Timeline {
    tracks: Vec<Track>,
    origin_ms: u64,
    duration_ms: u64,
    cancelled: bool,
}

impl Timeline {
    pub fn empty(origin_ms: u64) -> Self {
        Self {
            tracks: Vec::new(),
            origin_ms,
            duration_ms: 0,
            cancelled: false,
        }
    }

    pub fn origin_ms(&self) -> u64 {
        self.origin_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.origin_ms.saturating_add(self.duration_ms)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stops the timeline; it reports done and produces no further samples.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.cancelled || now_ms >= self.end_ms()
    }

    pub fn progress(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.origin_ms);
        (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// The last track animating `target`, if any.
    pub fn track(&self, target: &Target) -> Option<&Track> {
        self.tracks.iter().rev().find(|t| &t.target == target)
    }

    /// Samples every track at `now_ms`, in insertion order.
    ///
    /// When several tracks animate the same target, later ones win once they have started.
    pub fn for_each_sample(&self, now_ms: u64, mut f: impl FnMut(&Target, Transform)) {
        if self.cancelled {
            return;
        }
        for track in &self.tracks {
            f(&track.target, track.tween.sample(now_ms));
        }
    }

    /// Samples every track at its end value.
    pub fn for_each_final(&self, mut f: impl FnMut(&Target, Transform)) {
        for track in &self.tracks {
            f(&track.target, track.tween.to);
        }
    }

    /// The value of `target` at `now_ms`.
    pub fn sample_target(&self, target: &Target, now_ms: u64) -> Option<Transform> {
        let mut matching = self.tracks.iter().filter(|t| &t.target == target).peekable();
        let first = matching.peek().map(|t| t.tween.from)?;
        let started = matching
            .filter(|t| t.tween.is_started(now_ms))
            .last()
            .map(|t| t.tween.sample(now_ms));
        Some(started.unwrap_or(first))
    }
}
