use crate::Transform;

/// A single property change over time: `from` → `to`, starting at `start_ms`.
///
/// Before `start_ms` a tween samples as `from`, after it ends as `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: Transform,
    pub to: Transform,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(
        from: Transform,
        to: Transform,
        start_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    pub fn is_started(&self, now_ms: u64) -> bool {
        now_ms >= self.start_ms
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now_ms: u64) -> Transform {
        let eased = self.easing.sample(self.progress(now_ms));
        self.from.lerp(&self.to, eased)
    }

    /// Shifts the tween by `offset_ms` (used when a relative timeline is anchored to a clock).
    pub fn delayed(mut self, offset_ms: u64) -> Self {
        self.start_ms = self.start_ms.saturating_add(offset_ms);
        self
    }
}

/// Easing curves. The `Power*` and `BackOut` names follow the usual animation-library
/// vocabulary (`power2.out` is a cubic ease-out, `power3.out` a quartic one).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    EaseInOutCubic,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    /// Overshoots past the target before settling; the value is the overshoot amount.
    BackOut(f32),
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic | Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
            Self::Power2In => t * t * t,
            Self::Power2Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::Power3In => t * t * t * t,
            Self::Power3Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv * inv
            }
            Self::BackOut(overshoot) => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u * u * u + overshoot * u * u
            }
        }
    }
}
