//! Anchor link resolution

use std::time::Duration;

use super::config::{ScrollConfig, ScrollConfigExt};

/// Anchor that always means "top of the page"
pub const HERO_ANCHOR: &str = "#hero";

/// Section the hero scroll indicator points at
pub const INDICATOR_ANCHOR: &str = "#filosofia";

/// Where a scroll request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    /// Desktop nav link or logo
    Desktop,
    /// Link inside the mobile drawer; the drawer closes first
    Mobile,
    /// Hero scroll indicator
    Indicator,
}

/// Resolved scroll request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPlan {
    /// Absolute page offset to scroll to
    pub target: f64,
    /// Wait this long before starting the scroll
    pub delay: Duration,
}

/// Absolute scroll offset for an anchor.
///
/// `element_top` is the target's top relative to the viewport, `None` when the
/// anchor matches nothing. The hero anchor resolves to 0 regardless.
pub fn anchor_target(anchor: &str, element_top: Option<f64>, scroll_y: f64, offset: f64) -> Option<f64> {
    if anchor == HERO_ANCHOR {
        return Some(0.0);
    }
    element_top.map(|top| (top + scroll_y - offset).max(0.0))
}

/// Plan a scroll for a link click. Returns None when the anchor has no target.
pub fn plan_scroll(
    source: LinkSource,
    anchor: &str,
    element_top: Option<f64>,
    scroll_y: f64,
    config: &ScrollConfig,
) -> Option<ScrollPlan> {
    let (offset, delay) = match source {
        LinkSource::Desktop => (config.anchor_offset, Duration::ZERO),
        LinkSource::Mobile => (config.anchor_offset, config.menu_close_delay()),
        LinkSource::Indicator => (0.0, Duration::ZERO),
    };

    let target = anchor_target(anchor, element_top, scroll_y, offset)?;
    Some(ScrollPlan { target, delay })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_always_top() {
        assert_eq!(anchor_target(HERO_ANCHOR, None, 900.0, 60.0), Some(0.0));
    }

    #[test]
    fn test_target_accounts_for_offset() {
        assert_eq!(anchor_target("#menu", Some(300.0), 500.0, 60.0), Some(740.0));
        assert_eq!(anchor_target("#menu", Some(10.0), 0.0, 60.0), Some(0.0));
        assert_eq!(anchor_target("#missing", None, 500.0, 60.0), None);
    }

    #[test]
    fn test_mobile_link_waits_for_drawer() {
        let config = ScrollConfig::default();
        let plan = plan_scroll(LinkSource::Mobile, "#chef", Some(200.0), 0.0, &config).unwrap();
        assert_eq!(plan.target, 140.0);
        assert_eq!(plan.delay, Duration::from_millis(300));
    }

    #[test]
    fn test_indicator_uses_no_offset() {
        let config = ScrollConfig::default();
        let plan = plan_scroll(LinkSource::Indicator, INDICATOR_ANCHOR, Some(700.0), 0.0, &config).unwrap();
        assert_eq!(plan, ScrollPlan { target: 700.0, delay: Duration::ZERO });
    }
}
