use crate::config::NavConfig;

/// Presentation state for the fixed nav bar and the hero scroll indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavView {
    /// Nav bar carries its "visible" class
    pub nav_visible: bool,
    /// Indicator faded out and no longer clickable
    pub indicator_hidden: bool,
}

#[derive(Debug, Clone)]
pub struct NavBar {
    config: NavConfig,
    view: NavView,
    last_scroll_y: f64,
}

impl NavBar {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            view: NavView::default(),
            last_scroll_y: 0.0,
        }
    }

    /// Recompute the view for a new scroll offset.
    ///
    /// The nav bar follows the offset both ways; the indicator, once hidden,
    /// stays hidden.
    pub fn update(&mut self, scroll_y: f64) -> NavView {
        self.view.nav_visible = scroll_y > self.config.show_after_px;
        if scroll_y > self.config.indicator_hide_px {
            self.view.indicator_hidden = true;
        }
        self.last_scroll_y = scroll_y;
        self.view
    }

    #[inline]
    pub fn view(&self) -> NavView {
        self.view
    }

    #[inline]
    pub fn last_scroll_y(&self) -> f64 {
        self.last_scroll_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_follows_threshold() {
        let mut bar = NavBar::new(NavConfig::default());
        assert!(!bar.update(100.0).nav_visible);
        assert!(bar.update(101.0).nav_visible);
        assert!(!bar.update(20.0).nav_visible);
    }

    #[test]
    fn test_indicator_hide_is_latched() {
        let mut bar = NavBar::new(NavConfig::default());
        assert!(!bar.update(50.0).indicator_hidden);
        assert!(bar.update(60.0).indicator_hidden);
        assert!(bar.update(0.0).indicator_hidden);
        assert_eq!(bar.last_scroll_y(), 0.0);
    }
}
