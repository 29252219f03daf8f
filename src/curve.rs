//! Designer-authored response curves.
//!
//! A [`ResponseCurve`] maps normalized progress to an output multiplier. It is
//! stored as a list of keyframes with in/out tangents and evaluated with cubic
//! Hermite interpolation, so curves authored in an editor survive a round
//! trip through a config file unchanged.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// One control point of a [`ResponseCurve`].
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position on the progress axis.
    pub time: f32,
    /// Curve output at `time`.
    pub value: f32,
    /// Slope arriving at this key.
    #[serde(default)]
    pub in_tangent: f32,
    /// Slope leaving this key.
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Create a keyframe with flat tangents.
    pub fn new(time: f32, value: f32) -> Self {
        Self::with_tangents(time, value, 0.0, 0.0)
    }

    /// Create a keyframe with explicit tangents.
    pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }

    fn is_finite(&self) -> bool {
        self.time.is_finite()
            && self.value.is_finite()
            && self.in_tangent.is_finite()
            && self.out_tangent.is_finite()
    }
}

/// Piecewise cubic response curve.
///
/// Outside the keyed range the curve holds its first/last value. Inside, the
/// output is **not** clamped: keys above 1.0 produce overshoot on purpose.
///
/// # Example
///
/// ```rust
/// use curve_locomotion::curve::ResponseCurve;
///
/// let curve = ResponseCurve::ease_in_out();
/// assert_eq!(curve.evaluate(0.0), 0.0);
/// assert_eq!(curve.evaluate(0.5), 0.5);
/// assert_eq!(curve.evaluate(1.0), 1.0);
/// ```
#[derive(Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseCurve {
    keys: Vec<Keyframe>,
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self::ease_in_out()
    }
}

impl ResponseCurve {
    /// Build a curve from keyframes, rejecting anything that cannot be evaluated.
    pub fn new(keys: Vec<Keyframe>) -> Result<Self, CurveError> {
        let curve = Self { keys };
        curve.validate()?;
        Ok(curve)
    }

    /// Straight line from (0, 0) to (1, 1).
    pub fn linear() -> Self {
        Self {
            keys: vec![
                Keyframe::with_tangents(0.0, 0.0, 1.0, 1.0),
                Keyframe::with_tangents(1.0, 1.0, 1.0, 1.0),
            ],
        }
    }

    /// Flat-tangent S curve from (0, 0) to (1, 1) (smoothstep).
    pub fn ease_in_out() -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 1.0)],
        }
    }

    /// A curve that always returns `value`.
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    /// The keyframes, ordered by time.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Check that the curve is non-empty, finite and ordered.
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (index, key) in self.keys.iter().enumerate() {
            if !key.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
            if index > 0 && key.time <= self.keys[index - 1].time {
                return Err(CurveError::Unordered {
                    index,
                    time: key.time,
                });
            }
        }
        Ok(())
    }

    /// Sample the curve at `t`.
    ///
    /// `t` is used as given. Callers clamp progress into [0, 1] themselves.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; the segment is [index - 1, index].
        let index = self.keys.partition_point(|key| key.time <= t);
        let start = &self.keys[index - 1];
        let end = &self.keys[index];
        hermite(start, end, t)
    }
}

/// Unclamped linear interpolation, so overshooting curves carry through.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

fn hermite(start: &Keyframe, end: &Keyframe, t: f32) -> f32 {
    let span = end.time - start.time;
    let s = (t - start.time) / span;
    let s2 = s * s;
    let s3 = s2 * s;

    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;

    h00 * start.value
        + h10 * span * start.out_tangent
        + h01 * end.value
        + h11 * span * end.in_tangent
}
