//! Scroll-linked navigation chrome
//!
//! Scroll events arrive far more often than frames. [`FrameGate`] collapses a
//! burst of scroll events into one frame request, and [`NavBar`] computes what
//! the nav bar and scroll indicator should look like for that frame.

mod bar;
mod frame_gate;

pub use bar::{NavBar, NavView};
pub use frame_gate::{FrameGate, GateState};

use crate::config::NavConfig;

/// Frame gate and nav bar wired together
#[derive(Debug, Clone)]
pub struct ScrollWatcher {
    gate: FrameGate,
    bar: NavBar,
}

impl ScrollWatcher {
    pub fn new(config: NavConfig) -> Self {
        Self {
            gate: FrameGate::new(),
            bar: NavBar::new(config),
        }
    }

    /// Returns true when the caller should request an animation frame
    pub fn on_scroll(&mut self) -> bool {
        self.gate.on_scroll()
    }

    /// Run the frame callback with the scroll offset at frame time
    pub fn on_frame(&mut self, scroll_y: f64) -> NavView {
        self.gate.on_frame();
        self.bar.update(scroll_y)
    }

    pub fn view(&self) -> NavView {
        self.bar.view()
    }
}
