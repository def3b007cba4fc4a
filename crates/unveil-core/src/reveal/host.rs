//! Capabilities the scheduler borrows from its host environment

use std::time::Duration;

use super::element::{ElementId, TimerToken};

/// Fire-once, cancellable timers.
///
/// When a scheduled timer elapses the host must hand its token back through
/// [`RevealScheduler::on_timer`](super::RevealScheduler::on_timer). Tokens that
/// arrive after `cancel` are ignored by the scheduler, so hosts may race.
pub trait Timers {
    fn schedule(&mut self, delay: Duration, token: TimerToken);

    fn cancel(&mut self, token: TimerToken);
}

/// Receives the "revealed" marker for an element
pub trait Presenter {
    fn reveal(&mut self, id: &ElementId);
}

impl<F> Presenter for F
where
    F: FnMut(&ElementId),
{
    fn reveal(&mut self, id: &ElementId) {
        self(id)
    }
}
