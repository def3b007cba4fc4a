//! Focus containment for the open mobile drawer

/// Keeps Tab / Shift+Tab cycling inside a fixed list of focusable elements.
///
/// Indices refer to the drawer's focusable elements in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTrap {
    count: usize,
}

impl FocusTrap {
    pub fn new(focusable_count: usize) -> Self {
        Self {
            count: focusable_count,
        }
    }

    /// Handle a Tab press while element `active` has focus.
    ///
    /// Returns the index to focus (and the caller suppresses the default
    /// action) when focus would leave the trap; otherwise None.
    pub fn on_tab(&self, active: Option<usize>, shift: bool) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let last = self.count - 1;

        match (shift, active) {
            (true, Some(0)) => Some(last),
            (false, Some(i)) if i == last => Some(0),
            _ => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_at_edges() {
        let trap = FocusTrap::new(4);
        assert_eq!(trap.on_tab(Some(3), false), Some(0));
        assert_eq!(trap.on_tab(Some(0), true), Some(3));
    }

    #[test]
    fn test_middle_uses_default() {
        let trap = FocusTrap::new(4);
        assert_eq!(trap.on_tab(Some(1), false), None);
        assert_eq!(trap.on_tab(Some(2), true), None);
        assert_eq!(trap.on_tab(None, false), None);
    }

    #[test]
    fn test_single_element_stays_put() {
        let trap = FocusTrap::new(1);
        assert_eq!(trap.on_tab(Some(0), false), Some(0));
        assert_eq!(trap.on_tab(Some(0), true), Some(0));
    }

    #[test]
    fn test_empty_never_intercepts() {
        let trap = FocusTrap::new(0);
        assert!(trap.is_empty());
        assert_eq!(trap.on_tab(Some(0), true), None);
    }
}
