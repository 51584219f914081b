use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Linear interpolation between `a` and `b`; `t` is not clamped.
#[inline]
pub fn lerp(a: Real, b: Real, t: Real) -> Real {
    a + (b - a) * t
}

/// Position of `x` in `[lo, hi]`, clamped to `[0, 1]`.
///
/// Degenerate spans (`hi <= lo`) act as a step at `lo`.
#[inline]
pub fn unit_ramp(x: Real, lo: Real, hi: Real) -> Real {
    if hi <= lo {
        return if x < lo { 0.0 } else { 1.0 };
    }
    ((x - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Cubic smoothstep on a clamped unit argument.
#[inline]
pub fn smoothstep(t: Real) -> Real {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Piecewise-linear table over strictly ascending breakpoints.
///
/// Evaluation clamps to the first/last value outside the covered span.
#[derive(Clone, Debug)]
pub struct PiecewiseLinear {
    points: Vec<(Real, Real)>,
}

impl PiecewiseLinear {
    pub fn new(points: Vec<(Real, Real)>) -> Result<Self, CoreError> {
        if points.len() < 2 {
            return Err(CoreError::InvalidArg {
                what: "piecewise-linear table needs at least two points",
            });
        }
        for pair in points.windows(2) {
            if !(pair[1].0 > pair[0].0) {
                return Err(CoreError::InvalidArg {
                    what: "piecewise-linear breakpoints must be strictly ascending",
                });
            }
        }
        for &(x, y) in &points {
            ensure_finite(x, "piecewise-linear breakpoint")?;
            ensure_finite(y, "piecewise-linear value")?;
        }
        Ok(Self { points })
    }

    pub fn eval(&self, x: Real) -> Real {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }
        for pair in self.points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if x <= x1 {
                return lerp(y0, y1, (x - x0) / (x1 - x0));
            }
        }
        last.1
    }
}
