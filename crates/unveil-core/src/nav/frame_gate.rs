/// Whether a frame callback is already queued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Idle,
    ScheduledFrame,
}

/// Coalesces scroll events so at most one frame callback is queued at a time
#[derive(Debug, Clone, Default)]
pub struct FrameGate {
    state: GateState,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle -> ScheduledFrame. Returns true only on that transition.
    pub fn on_scroll(&mut self) -> bool {
        match self.state {
            GateState::Idle => {
                self.state = GateState::ScheduledFrame;
                true
            }
            GateState::ScheduledFrame => false,
        }
    }

    /// Frame callback ran; back to Idle
    pub fn on_frame(&mut self) {
        self.state = GateState::Idle;
    }

    #[inline]
    pub fn state(&self) -> GateState {
        self.state
    }
}
