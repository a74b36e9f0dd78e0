//! Catmull-Rom spline used to route the coolant tube

use glam::{Quat, Vec3};

/// Chord samples behind the arc-length table
const ARC_DIVISIONS: usize = 200;

/// Open centripetal Catmull-Rom curve through a list of control points.
///
/// End segments are shaped by reflecting the neighbouring point, so the curve passes
/// through the first and last control point. `point_at` and `tangent_at` take the raw
/// spline parameter; the `_u` variants take a fraction of the arc length instead.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    /// Cumulative chord length at `d / ARC_DIVISIONS`
    lengths: Vec<f32>,
}

/// Cubic coefficients for one span, evaluated per axis
struct CubicPoly {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicPoly {
    fn nonuniform(x0: Vec3, x1: Vec3, x2: Vec3, x3: Vec3, dt0: f32, dt1: f32, dt2: f32) -> Self {
        let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
        let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;

        Self {
            c0: x1,
            c1: t1,
            c2: -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2,
            c3: 2.0 * x1 - 2.0 * x2 + t1 + t2,
        }
    }

    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }
}

impl CatmullRomCurve {
    /// Create a curve; fewer than two points yields a degenerate curve at the origin
    pub fn new(points: Vec<Vec3>) -> Self {
        let mut curve = Self {
            points,
            lengths: Vec::new(),
        };
        curve.lengths = curve.arc_lengths(ARC_DIVISIONS);
        curve
    }

    fn arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point_at(0.0);
        let mut sum = 0.0;
        lengths.push(sum);
        for d in 1..=divisions {
            let current = self.point_at(d as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }

    /// Approximate total length
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Spline parameter at arc-length fraction `u`
    pub fn u_to_t(&self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        let total = self.length();
        if total <= f32::EPSILON {
            return u;
        }

        let target = u * total;
        let divisions = self.lengths.len() - 1;
        // Last sample at or before the target length
        let i = self.lengths.partition_point(|&l| l <= target).saturating_sub(1);
        if i >= divisions {
            return 1.0;
        }

        let before = self.lengths[i];
        let span = self.lengths[i + 1] - before;
        let fraction = if span > 0.0 { (target - before) / span } else { 0.0 };
        (i as f32 + fraction) / divisions as f32
    }

    /// Point at arc-length fraction `u`
    pub fn point_at_u(&self, u: f32) -> Vec3 {
        self.point_at(self.u_to_t(u))
    }

    /// Unit tangent at arc-length fraction `u`
    pub fn tangent_at_u(&self, u: f32) -> Vec3 {
        self.tangent_at(self.u_to_t(u))
    }

    /// Control points
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Point on the curve for `t` in `[0, 1]`
    pub fn point_at(&self, t: f32) -> Vec3 {
        let len = self.points.len();
        match len {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let p = (len - 1) as f32 * t.clamp(0.0, 1.0);
        let mut index = p.floor() as usize;
        let mut weight = p - index as f32;
        if index >= len - 1 {
            index = len - 2;
            weight = 1.0;
        }

        let p1 = self.points[index];
        let p2 = self.points[index + 1];
        let p0 = if index > 0 {
            self.points[index - 1]
        } else {
            2.0 * p1 - p2
        };
        let p3 = if index + 2 < len {
            self.points[index + 2]
        } else {
            2.0 * p2 - p1
        };

        // Centripetal parameterisation: sqrt of the chord length
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        CubicPoly::nonuniform(p0, p1, p2, p3, dt0, dt1, dt2).eval(weight)
    }

    /// Unit tangent at `t`, by central difference
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        const DELTA: f32 = 1e-3;
        let t1 = (t - DELTA).max(0.0);
        let t2 = (t + DELTA).min(1.0);
        (self.point_at(t2) - self.point_at(t1)).normalize_or_zero()
    }

    /// Parallel-transport frames (tangent, normal, binormal) at `segments + 1` samples
    /// spaced evenly along the arc
    pub fn frames(&self, segments: u32) -> Vec<(Vec3, Vec3, Vec3)> {
        let segments = segments.max(1);
        let tangents: Vec<Vec3> = (0..=segments)
            .map(|i| self.tangent_at_u(i as f32 / segments as f32))
            .collect();

        // Seed the first normal off the axis least aligned with the tangent
        let t0 = tangents[0];
        let abs = t0.abs();
        let axis = if abs.x <= abs.y && abs.x <= abs.z {
            Vec3::X
        } else if abs.y <= abs.z {
            Vec3::Y
        } else {
            Vec3::Z
        };
        let side = t0.cross(axis).normalize_or_zero();
        let mut normal = t0.cross(side);

        let mut frames = Vec::with_capacity(tangents.len());
        frames.push((t0, normal, t0.cross(normal)));

        for pair in tangents.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let axis = prev.cross(next);
            if axis.length() > f32::EPSILON {
                let theta = prev.dot(next).clamp(-1.0, 1.0).acos();
                normal = Quat::from_axis_angle(axis.normalize(), theta) * normal;
            }
            frames.push((next, normal, next.cross(normal)));
        }

        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_curve() -> CatmullRomCurve {
        CatmullRomCurve::new(vec![
            Vec3::new(0.0, 0.2, -0.4),
            Vec3::new(0.3, 0.3, -0.2),
            Vec3::new(0.4, 0.6, -0.4),
        ])
    }

    #[test]
    fn test_curve_passes_through_control_points() {
        let curve = sample_curve();
        assert!(curve.point_at(0.0).distance(curve.points()[0]) < 1e-5);
        assert!(curve.point_at(0.5).distance(curve.points()[1]) < 1e-5);
        assert!(curve.point_at(1.0).distance(curve.points()[2]) < 1e-5);
    }

    #[test]
    fn test_frames_are_orthonormal() {
        for (tangent, normal, binormal) in sample_curve().frames(20) {
            assert!((tangent.length() - 1.0).abs() < 1e-3);
            assert!((normal.length() - 1.0).abs() < 1e-3);
            assert!(tangent.dot(normal).abs() < 1e-3);
            assert!((binormal.length() - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_degenerate_curves() {
        assert_eq!(CatmullRomCurve::new(vec![]).point_at(0.5), Vec3::ZERO);
        let single = CatmullRomCurve::new(vec![Vec3::ONE]);
        assert_eq!(single.point_at(0.7), Vec3::ONE);
        assert_eq!(single.length(), 0.0);
        assert_eq!(single.point_at_u(0.3), Vec3::ONE);
    }

    /// Length of the curve between parameters `a` and `b`, finely sampled
    fn measured_length(curve: &CatmullRomCurve, a: f32, b: f32) -> f32 {
        const STEPS: usize = 2000;
        let mut last = curve.point_at(a);
        let mut sum = 0.0;
        for step in 1..=STEPS {
            let next = curve.point_at(a + (b - a) * step as f32 / STEPS as f32);
            sum += next.distance(last);
            last = next;
        }
        sum
    }

    #[test]
    fn test_arc_length_mapping_endpoints() {
        let curve = sample_curve();
        assert_eq!(curve.u_to_t(0.0), 0.0);
        assert!((curve.u_to_t(1.0) - 1.0).abs() < 1e-6);
        assert!(curve.point_at_u(1.0).distance(curve.points()[2]) < 1e-5);
    }

    #[test]
    fn test_arc_length_mapping_follows_distance() {
        // Spans of length 1 and 3: the arc midpoint lies well inside the second span
        let curve = CatmullRomCurve::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 3.0, 0.0),
        ]);
        let total = measured_length(&curve, 0.0, 1.0);

        let half = curve.u_to_t(0.5);
        assert!(half > 0.55, "u=0.5 mapped to t={}", half);
        assert!((measured_length(&curve, 0.0, half) / total - 0.5).abs() < 0.01);

        let mut previous = 0.0;
        for i in 1..=10 {
            let t = curve.u_to_t(i as f32 / 10.0);
            assert!(t > previous);
            previous = t;
        }
    }
}
