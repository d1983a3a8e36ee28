//! Animation collaborator.
//!
//! The toolkit never animates on its own. Declaration procedures ask the
//! session's [`Animator`] for the current value of an id and set new
//! targets; the host plugs in its motion engine or uses [`EasedAnimator`].

use sigil_shared::HashedId;
use std::collections::HashMap;

/// Shape of an animation curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimKind {
    /// Accelerate then decelerate.
    #[default]
    EaseInOut,
    /// Overshoot and settle.
    Spring,
}

/// Describes how a value travels to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimCurve {
    /// Curve family.
    pub kind: AnimKind,
    /// Distance the curve is tuned for.
    pub typical_delta_distance: f32,
    /// Time in seconds to cover `typical_delta_distance`.
    pub typical_total_time: f32,
    /// 0 leans on the ease-in half, 1 on the ease-out half.
    pub bias: f32,
}

impl Default for AnimCurve {
    fn default() -> Self {
        Self {
            kind: AnimKind::EaseInOut,
            typical_delta_distance: 1.0,
            typical_total_time: 0.15,
            bias: 0.5,
        }
    }
}

/// Motion engine behind `Frame::animatable` and `Frame::start_animation`.
pub trait Animator {
    /// Current value of `id`, creating it at `starting` on first use.
    fn value(&mut self, id: HashedId, starting: &[f32]) -> Vec<f32>;

    /// Starts moving `id` towards `target`.
    fn set_target(&mut self, id: HashedId, target: &[f32], velocity: &[f32], curve: &AnimCurve);

    /// Seconds until `id` settles. Zero for unknown ids.
    fn time_remaining(&self, id: HashedId) -> f64;

    /// Advances all animations. Called once per frame by the session.
    fn advance(&mut self, _delta_time: f32) {}
}

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Exponential ease-out.
    #[default]
    ExponentialOut,
    /// Exponential ease-in.
    ExponentialIn,
    /// Damped oscillation around the target.
    Spring,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::ExponentialIn => {
                if t <= 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * (t - 1.0))
                }
            }
            Self::Spring => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - (-6.0 * t).exp() * (4.0 * std::f32::consts::PI * t).cos()
                }
            }
        }
    }
}

/// One animated vector.
#[derive(Debug, Clone)]
struct Track {
    start: Vec<f32>,
    current: Vec<f32>,
    target: Vec<f32>,
    progress: f32,
    duration: f32,
    kind: AnimKind,
    bias: f32,
}

impl Track {
    fn at_rest(value: &[f32]) -> Self {
        Self {
            start: value.to_vec(),
            current: value.to_vec(),
            target: value.to_vec(),
            progress: 1.0,
            duration: 0.0,
            kind: AnimKind::EaseInOut,
            bias: 0.5,
        }
    }

    fn eased(&self, t: f32) -> f32 {
        match self.kind {
            AnimKind::EaseInOut => {
                let bias = self.bias.clamp(0.0, 1.0);
                Easing::ExponentialIn.apply(t) * (1.0 - bias)
                    + Easing::ExponentialOut.apply(t) * bias
            }
            AnimKind::Spring => Easing::Spring.apply(t),
        }
    }

    fn update(&mut self, dt: f32) {
        if self.progress >= 1.0 {
            return;
        }

        if self.duration > 0.0 {
            self.progress += dt / self.duration;
        } else {
            self.progress = 1.0;
        }
        self.progress = self.progress.min(1.0);

        let eased = self.eased(self.progress);
        for ((current, start), target) in self.current.iter_mut().zip(&self.start).zip(&self.target) {
            *current = start + (target - start) * eased;
        }

        if self.progress >= 1.0 {
            self.current.clone_from(&self.target);
        }
    }
}

/// Time-based easing animator for hosts without a motion engine.
#[derive(Debug, Clone, Default)]
pub struct EasedAnimator {
    tracks: HashMap<HashedId, Track>,
}

impl EasedAnimator {
    /// Creates an animator with no tracks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns true if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Animator for EasedAnimator {
    fn value(&mut self, id: HashedId, starting: &[f32]) -> Vec<f32> {
        self.tracks
            .entry(id)
            .or_insert_with(|| Track::at_rest(starting))
            .current
            .clone()
    }

    fn set_target(&mut self, id: HashedId, target: &[f32], _velocity: &[f32], curve: &AnimCurve) {
        let track = self
            .tracks
            .entry(id)
            .or_insert_with(|| Track::at_rest(target));

        let distance = track
            .current
            .iter()
            .zip(target)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f32, f32::max);
        if distance < 0.0001 {
            return;
        }

        let scale = if curve.typical_delta_distance > 0.0 {
            (distance / curve.typical_delta_distance).clamp(0.25, 4.0)
        } else {
            1.0
        };
        track.start.clone_from(&track.current);
        track.target = target.to_vec();
        track.progress = 0.0;
        track.duration = curve.typical_total_time.max(0.0) * scale;
        track.kind = curve.kind;
        track.bias = curve.bias;
    }

    fn time_remaining(&self, id: HashedId) -> f64 {
        self.tracks
            .get(&id)
            .map_or(0.0, |t| f64::from((1.0 - t.progress) * t.duration))
    }

    fn advance(&mut self, delta_time: f32) {
        for track in self.tracks.values_mut() {
            track.update(delta_time);
        }
    }
}
