//! Progress and interpolation helpers

use std::time::Duration;

/// Fraction of `duration` covered by `elapsed`, clamped to [0, 1].
/// A zero duration counts as finished.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let d = Duration::from_millis(400);
        assert_eq!(progress(Duration::ZERO, d), 0.0);
        assert!((progress(Duration::from_millis(100), d) - 0.25).abs() < 1e-9);
        assert_eq!(progress(Duration::from_secs(5), d), 1.0);
        assert_eq!(progress(Duration::ZERO, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_lerp_downward() {
        assert!((lerp(800.0, 200.0, 0.5) - 500.0).abs() < 1e-9);
    }
}
