//! Timeline descriptors: the declarative `{delay, duration, curve,
//! repeat}` parameter objects every animated channel in the scene is
//! driven by. A channel is a [`Track`] of keyed values sampled through a
//! [`Timeline`], evaluated purely from scene time.

use crate::{
    core::{Rgba8, Vec2},
    ease::{Ease, Spring},
    error::{GardenError, GardenResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum Curve {
    Ease(Ease),
    Spring(Spring),
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum Repeat {
    Once,
    /// Loop forever; `mirror` plays every other cycle backwards.
    Forever {
        mirror: bool,
    },
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Seconds of scene time before the channel starts moving.
    pub delay: f64,
    /// Cycle length in seconds. Ignored by spring curves, which run on
    /// their own physical clock.
    pub duration: f64,
    pub curve: Curve,
    pub repeat: Repeat,
}

impl Timeline {
    pub fn once(delay: f64, duration: f64, ease: Ease) -> Self {
        Self {
            delay,
            duration,
            curve: Curve::Ease(ease),
            repeat: Repeat::Once,
        }
    }

    pub fn spring(delay: f64, spring: Spring) -> Self {
        Self {
            delay,
            duration: 0.0,
            curve: Curve::Spring(spring),
            repeat: Repeat::Once,
        }
    }

    pub fn forever(delay: f64, duration: f64, ease: Ease, mirror: bool) -> Self {
        Self {
            delay,
            duration,
            curve: Curve::Ease(ease),
            repeat: Repeat::Forever { mirror },
        }
    }

    pub fn validate(&self) -> GardenResult<()> {
        if let Curve::Ease(_) = self.curve
            && !(self.duration > 0.0)
        {
            return Err(GardenError::animation("eased timeline duration must be > 0"));
        }
        if matches!(self.repeat, Repeat::Forever { .. }) && matches!(self.curve, Curve::Spring(_)) {
            return Err(GardenError::animation("spring timelines cannot repeat"));
        }
        Ok(())
    }

    /// Progress at scene time `t`. Zero before `delay`; eased progress is
    /// in [0,1], spring progress may overshoot past 1.
    pub fn progress(&self, t: f64) -> f64 {
        let local = t - self.delay;
        if local <= 0.0 {
            return 0.0;
        }
        match self.curve {
            Curve::Spring(spring) => spring.value_at(local),
            Curve::Ease(ease) => {
                let u = match self.repeat {
                    Repeat::Once => (local / self.duration).min(1.0),
                    Repeat::Forever { mirror: false } => {
                        (local / self.duration).fract()
                    }
                    Repeat::Forever { mirror: true } => {
                        let cycle = 2.0 * self.duration;
                        let pos = local % cycle;
                        if pos < self.duration {
                            pos / self.duration
                        } else {
                            (cycle - pos) / self.duration
                        }
                    }
                };
                ease.apply(u)
            }
        }
    }
}

/// Keyed value track over normalized progress: `times` ascending in
/// [0,1], one value per key.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Track<T> {
    pub times: Vec<f64>,
    pub values: Vec<T>,
}

impl<T> Track<T>
where
    T: Lerp + Clone,
{
    pub fn validate(&self) -> GardenResult<()> {
        if self.values.is_empty() {
            return Err(GardenError::animation("track must have at least one key"));
        }
        if self.times.len() != self.values.len() {
            return Err(GardenError::animation("track times/values length mismatch"));
        }
        if !self.times.windows(2).all(|w| w[0] <= w[1]) {
            return Err(GardenError::animation("track times must be ascending"));
        }
        if self.times.iter().any(|t| !(0.0..=1.0).contains(t)) {
            return Err(GardenError::animation("track times must lie in [0,1]"));
        }
        Ok(())
    }

    /// Piecewise-linear sample. Beyond the last key the final segment is
    /// extrapolated so spring overshoot carries past the target value.
    pub fn sample(&self, u: f64) -> T {
        let n = self.values.len();
        if n == 1 || u <= self.times[0] {
            return self.values[0].clone();
        }

        let mut i = n - 1;
        for k in 1..n {
            if u <= self.times[k] {
                i = k;
                break;
            }
        }

        let t0 = self.times[i - 1];
        let t1 = self.times[i];
        let denom = t1 - t0;
        if denom <= 0.0 {
            return self.values[i].clone();
        }
        let s = (u - t0) / denom;
        T::lerp(&self.values[i - 1], &self.values[i], s)
    }
}

/// One animated channel: a keyed track sampled through a timeline.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Animated<T> {
    pub track: Track<T>,
    pub timeline: Timeline,
}

impl<T> Animated<T>
where
    T: Lerp + Clone,
{
    pub fn constant(value: T) -> Self {
        Self {
            track: Track {
                times: vec![0.0],
                values: vec![value],
            },
            timeline: Timeline::once(0.0, 1.0, Ease::Linear),
        }
    }

    pub fn from_to(from: T, to: T, timeline: Timeline) -> Self {
        Self {
            track: Track {
                times: vec![0.0, 1.0],
                values: vec![from, to],
            },
            timeline,
        }
    }

    pub fn keyed(times: Vec<f64>, values: Vec<T>, timeline: Timeline) -> Self {
        Self {
            track: Track { times, values },
            timeline,
        }
    }

    pub fn validate(&self) -> GardenResult<()> {
        self.track.validate()?;
        self.timeline.validate()
    }

    pub fn at(&self, t: f64) -> T {
        self.track.sample(self.timeline.progress(t))
    }
}
