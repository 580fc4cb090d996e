//! Easing primitives.

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic Hermite smoothstep: `t²(3 − 2t)` with `t = clamp((x − e0)/(e1 − e0), 0, 1)`.
///
/// Returns 0 for `x <= e0` and 1 for `x >= e1`. A degenerate edge pair
/// (`e0 == e1`) acts as a hard step at `e0`.
#[inline]
pub fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    if e1 == e0 {
        return if x < e0 { 0.0 } else { 1.0 };
    }
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(4.0, 6.0, 3.0), 0.0);
        assert_eq!(smoothstep(4.0, 6.0, 4.0), 0.0);
        assert_eq!(smoothstep(4.0, 6.0, 6.0), 1.0);
        assert_eq!(smoothstep(4.0, 6.0, 9.0), 1.0);
        assert!((smoothstep(4.0, 6.0, 5.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_smoothstep_monotonic() {
        let mut prev = 0.0;
        for i in 0..=200 {
            let x = 19.0 + 3.0 * i as f32 / 200.0;
            let v = smoothstep(19.0, 22.0, x);
            assert!(v >= prev, "smoothstep decreased at x={x}");
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
    }

    #[test]
    fn test_smoothstep_degenerate_edges() {
        assert_eq!(smoothstep(2.0, 2.0, 1.9), 0.0);
        assert_eq!(smoothstep(2.0, 2.0, 2.0), 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.003, 0.008, 0.0), 0.003);
        assert!((lerp(0.5, 1.2, 1.0) - 1.2).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 0.25) - 2.5).abs() < 1e-6);
    }
}
