//! Duration helpers over the scroll configuration

use std::time::Duration;

pub use crate::config::{EasingType, ScrollConfig};

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Interval between animation frames
    fn frame_interval(&self) -> Duration;

    /// Delay between closing the mobile drawer and starting the scroll
    fn menu_close_delay(&self) -> Duration;

    /// Smooth scrolling enabled with a non-zero duration
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn frame_interval(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn menu_close_delay(&self) -> Duration {
        Duration::from_millis(self.menu_close_delay_ms)
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval_fallback() {
        let config = ScrollConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(16));

        let config = ScrollConfig {
            animation_fps: 50,
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_is_smooth() {
        let mut config = ScrollConfig::default();
        assert!(config.is_smooth());

        config.animation_duration_ms = 0;
        assert!(!config.is_smooth());

        config.animation_duration_ms = 300;
        config.smooth_enabled = false;
        assert!(!config.is_smooth());
    }
}
