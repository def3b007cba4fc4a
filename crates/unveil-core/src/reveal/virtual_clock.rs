//! Deterministic host for the scheduler: a shared millisecond clock, a timer
//! queue driven by explicit `advance` calls, and a presenter that records when
//! each element was revealed.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;

use super::element::{ElementId, TimerToken};
use super::host::{Presenter, Timers};
use super::scheduler::RevealScheduler;

/// Millisecond clock shared by [`VirtualTimers`] and [`RecordingPresenter`]
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now_ms: Rc<Cell<u64>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn set(&self, ms: u64) {
        self.now_ms.set(ms);
    }

    pub fn timers(&self) -> VirtualTimers {
        VirtualTimers {
            clock: self.clone(),
            queue: BTreeSet::new(),
            created: 0,
        }
    }

    pub fn recorder(&self) -> RecordingPresenter {
        RecordingPresenter {
            clock: self.clone(),
            records: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

/// Timer queue ordered by due time, then by scheduling order
#[derive(Debug)]
pub struct VirtualTimers {
    clock: VirtualClock,
    queue: BTreeSet<(u64, TimerToken)>,
    created: usize,
}

impl VirtualTimers {
    /// Timers scheduled over the queue's lifetime, including cancelled ones
    pub fn created(&self) -> usize {
        self.created
    }

    /// Timers still waiting to fire
    pub fn outstanding(&self) -> usize {
        self.queue.len()
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerToken> {
        let &(due, token) = self.queue.iter().next()?;
        if due > until_ms {
            return None;
        }
        self.queue.remove(&(due, token));
        self.clock.set(due.max(self.clock.now_ms()));
        Some(token)
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }
}

impl Timers for VirtualTimers {
    fn schedule(&mut self, delay: Duration, token: TimerToken) {
        let due = self.clock.now_ms().saturating_add(delay.as_millis() as u64);
        self.queue.insert((due, token));
        self.created += 1;
    }

    fn cancel(&mut self, token: TimerToken) {
        self.queue.retain(|&(_, t)| t != token);
    }
}

/// One reveal as seen by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealRecord {
    pub id: ElementId,
    pub at_ms: u64,
}

/// Presenter that timestamps every reveal against the virtual clock.
///
/// Clones share the same record list, so a caller can keep one handle while
/// the scheduler owns another.
#[derive(Debug, Clone)]
pub struct RecordingPresenter {
    clock: VirtualClock,
    records: Rc<RefCell<Vec<RevealRecord>>>,
}

impl RecordingPresenter {
    pub fn records(&self) -> Vec<RevealRecord> {
        self.records.borrow().clone()
    }

    /// Reveal time of `id`, if it was revealed
    pub fn revealed_at(&self, id: &ElementId) -> Option<u64> {
        self.records
            .borrow()
            .iter()
            .find(|r| &r.id == id)
            .map(|r| r.at_ms)
    }
}

impl Presenter for RecordingPresenter {
    fn reveal(&mut self, id: &ElementId) {
        self.records.borrow_mut().push(RevealRecord {
            id: id.clone(),
            at_ms: self.clock.now_ms(),
        });
    }
}

impl<P: Presenter> RevealScheduler<VirtualTimers, P> {
    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.timers().clock().now_ms()
    }

    /// Fire every timer due up to `at_ms` in order, then park the clock there
    pub fn advance_to(&mut self, at_ms: u64) {
        while let Some(token) = self.timers_mut().pop_due(at_ms) {
            self.on_timer(token);
        }
        let clock = self.timers().clock().clone();
        if at_ms > clock.now_ms() {
            clock.set(at_ms);
        }
    }

    pub fn advance(&mut self, by: Duration) {
        let target = self.now_ms().saturating_add(by.as_millis() as u64);
        self.advance_to(target);
    }
}
