/// Cubic Bezier timing curve through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
///
/// `ease(x)` finds the curve parameter whose x-coordinate is `x` and returns
/// the matching y-coordinate. Inputs outside `[0, 1]` clamp to the endpoints,
/// which are returned exactly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// Identity curve.
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Fast start, decelerating finish.
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn ease(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        // Control points on the diagonal make y(t) == x(t).
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x;
        }

        let t = self.solve_t(x as f64);
        bezier(self.y1 as f64, self.y2 as f64, t) as f32
    }

    /// Curve parameter `t` with `x(t) == x`.
    fn solve_t(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;
        let (x1, x2) = (self.x1 as f64, self.x2 as f64);

        let mut t = x;
        for _ in 0..8 {
            let err = bezier(x1, x2, t) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let slope = bezier_slope(x1, x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        // Newton stalled on a flat segment: x(t) is monotonic for control
        // x-values in [0, 1], so bisection always converges.
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let err = bezier(x1, x2, t) - x;
            if err.abs() < EPSILON {
                break;
            }
            if err > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }
}

#[inline]
fn bezier(p1: f64, p2: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

#[inline]
fn bezier_slope(p1: f64, p2: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for curve in [CubicBezier::EASE_OUT, CubicBezier::LINEAR, CubicBezier::new(0.4, 0.0, 0.2, 1.0)] {
            assert_eq!(curve.ease(0.0), 0.0);
            assert_eq!(curve.ease(1.0), 1.0);
            assert_eq!(curve.ease(-3.0), 0.0);
            assert_eq!(curve.ease(7.0), 1.0);
        }
    }

    #[test]
    fn linear_is_identity() {
        for i in 0..=20 {
            let x = i as f32 / 20.0;
            assert_eq!(CubicBezier::LINEAR.ease(x), x);
        }
    }

    #[test]
    fn ease_out_leads_the_diagonal() {
        for x in [0.1, 0.25, 0.5, 0.75, 0.9] {
            assert!(CubicBezier::EASE_OUT.ease(x) > x, "ease_out({x}) should exceed {x}");
        }
    }

    #[test]
    fn ease_out_is_monotonic() {
        let mut prev = 0.0;
        for i in 1..=200 {
            let y = CubicBezier::EASE_OUT.ease(i as f32 / 200.0);
            assert!(y >= prev);
            prev = y;
        }
    }

    #[test]
    fn solved_parameter_reproduces_x() {
        let c = CubicBezier::EASE_OUT;
        for x in [0.05, 0.3, 0.6, 0.95] {
            let t = c.solve_t(x);
            assert!((bezier(c.x1 as f64, c.x2 as f64, t) - x).abs() < 1e-6);
        }
    }
}
