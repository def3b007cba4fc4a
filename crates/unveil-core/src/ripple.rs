//! Click ripple geometry for call-to-action buttons

use std::time::Duration;

use crate::config::RippleConfig;

/// Bounding box relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A ripple span positioned inside its button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    /// Width and height of the (square) span
    pub size: f64,
    /// Offset from the button's left edge
    pub x: f64,
    /// Offset from the button's top edge
    pub y: f64,
    pub lifetime: Duration,
}

impl Ripple {
    /// Center a square ripple, big enough to cover the button, on the click
    pub fn from_click(button: Rect, client_x: f64, client_y: f64, config: &RippleConfig) -> Self {
        let size = button.width.max(button.height);
        Self {
            size,
            x: client_x - button.left - size / 2.0,
            y: client_y - button.top - size / 2.0,
            lifetime: Duration::from_millis(config.lifetime_ms),
        }
    }

    /// The span should be removed once `elapsed` reaches its lifetime
    #[inline]
    pub fn is_expired(&self, elapsed: Duration) -> bool {
        elapsed >= self.lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ripple_centered_on_click() {
        let button = Rect {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 40.0,
        };
        let ripple = Ripple::from_click(button, 150.0, 70.0, &RippleConfig::default());
        assert_eq!(ripple.size, 200.0);
        assert_eq!(ripple.x, -50.0);
        assert_eq!(ripple.y, -80.0);
    }

    #[test]
    fn test_expiry() {
        let button = Rect {
            left: 0.0,
            top: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let ripple = Ripple::from_click(button, 5.0, 5.0, &RippleConfig::default());
        assert!(!ripple.is_expired(Duration::from_millis(599)));
        assert!(ripple.is_expired(Duration::from_millis(600)));
    }
}
