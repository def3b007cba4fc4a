//! Easing curves for smooth scrolling

pub use crate::config::EasingType;

/// Extension trait mapping animation progress through an easing curve
pub trait EasingTypeExt {
    /// Map `t` in [0, 1] (clamped) to eased progress in [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            // Jump at the very end
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
            EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
            EasingType::EaseOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - (-10.0 * t).exp2()
                }
            }
        }
    }
}
