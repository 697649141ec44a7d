//! Decay curves for effect rendering

use serde::{Deserialize, Serialize};

/// Maps linear lifetime progress (0.0 to 1.0) to eased progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseOutQuad,
    EaseOutQuart,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the curve to `t`, clamped to 0.0..=1.0
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// CSS-style cubic bezier timing function.
///
/// The x control points are clamped into 0..=1, which keeps x(s) monotonic,
/// so a fixed bisection finds the curve parameter for `t`. Twenty halvings
/// resolve well below one opacity step.
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = Axis::new(x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0));
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..20 {
        let mid = (lo + hi) * 0.5;
        if x.at(mid) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Axis::new(y1, y2).at((lo + hi) * 0.5)
}

/// One coordinate of a bezier running from 0 to 1, in polynomial form
#[derive(Clone, Copy)]
struct Axis {
    a: f32,
    b: f32,
    c: f32,
}

impl Axis {
    fn new(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self { a: 1.0 - c - b, b, c }
    }

    #[inline]
    fn at(self, s: f32) -> f32 {
        ((self.a * s + self.b) * s + self.c) * s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 7] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseOutQuad,
        Easing::EaseOutQuart,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for curve in CURVES {
            assert!(curve.apply(0.0).abs() < 1e-5, "{curve:?}");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-5, "{curve:?}");
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::EaseOut.apply(-2.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(3.0), 1.0);
    }

    #[test]
    fn test_curves_are_monotonic() {
        for curve in CURVES {
            let mut last = 0.0;
            for i in 1..=50 {
                let v = curve.apply(i as f32 / 50.0);
                assert!(v + 1e-4 >= last, "{curve:?} at step {i}");
                last = v;
            }
        }
    }

    #[test]
    fn test_bezier_matches_known_curves() {
        // (0,0,1,1) is the identity
        let linear = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((linear.apply(t) - t).abs() < 1e-4, "at {t}");
        }

        let ease = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);
        assert!((ease.apply(0.5) - 0.8024).abs() < 1e-3);
    }

    #[test]
    fn test_bezier_tolerates_out_of_range_controls() {
        let wild = Easing::CubicBezier(-3.0, 0.0, 4.0, 1.0);
        let mut last = 0.0;
        for i in 0..=20 {
            let v = wild.apply(i as f32 / 20.0);
            assert!(v.is_finite());
            assert!(v + 1e-4 >= last);
            last = v;
        }
    }

    #[test]
    fn test_ease_out_front_loads_progress() {
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
    }
}
