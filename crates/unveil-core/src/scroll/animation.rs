//! Frame-driven smooth scroll controller

use std::time::{Duration, Instant};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{lerp, progress};

#[derive(Debug, Clone)]
struct ActiveScroll {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Smooth scroll controller.
///
/// Call `scroll_to()` when a link is clicked, then `update()` on every
/// animation frame and apply the returned offset to the page. With smooth
/// scrolling disabled, or under reduced motion, `scroll_to()` jumps.
#[derive(Debug, Clone)]
pub struct SmoothScroller {
    active: Option<ActiveScroll>,
    config: ScrollConfig,
    position: f64,
    reduced_motion: bool,
}

impl SmoothScroller {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            active: None,
            config,
            position: 0.0,
            reduced_motion: false,
        }
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if enabled {
            self.finish();
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Final position once the current animation ends
    pub fn target(&self) -> f64 {
        self.active.as_ref().map(|a| a.to).unwrap_or(self.position)
    }

    /// User scrolled by hand; adopt the new offset and drop any animation
    pub fn sync(&mut self, scroll_y: f64) {
        self.active = None;
        self.position = scroll_y;
    }

    /// Begin scrolling to `target`, starting from the current position
    pub fn scroll_to(&mut self, target: f64, now: Instant) {
        let target = target.max(0.0);

        if !self.config.is_smooth() || self.reduced_motion {
            self.position = target;
            self.active = None;
            return;
        }

        if (self.position - target).abs() < f64::EPSILON {
            self.active = None;
            return;
        }

        self.active = Some(ActiveScroll {
            start: now,
            from: self.position,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Advance to `now` and return the offset to apply
    pub fn update(&mut self, now: Instant) -> f64 {
        if let Some(ref scroll) = self.active {
            let t = progress(now.saturating_duration_since(scroll.start), scroll.duration);
            if t >= 1.0 {
                self.position = scroll.to;
                self.active = None;
            } else {
                self.position = lerp(scroll.from, scroll.to, scroll.easing.apply(t));
            }
        }
        self.position
    }

    /// Jump to the end of the current animation
    pub fn finish(&mut self) {
        if let Some(scroll) = self.active.take() {
            self.position = scroll.to;
        }
    }
}
