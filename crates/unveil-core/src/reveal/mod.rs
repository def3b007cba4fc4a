//! Visibility-triggered reveal scheduling
//!
//! One [`RevealScheduler`] tracks every animated element on the page, keyed by
//! group. Each element moves from Hidden to Revealed once, after a delay
//! proportional to its position in its group.
//!
//! # Layers
//!
//! - `element` - handles, states and intersection events
//! - `host` - capabilities the scheduler consumes (timers, presenter)
//! - `scheduler` - the registry and transition logic
//! - `virtual_clock` - deterministic millisecond host for tests and replays
//! - `service` - tokio task that owns a scheduler and drives real timers
//!
//! # Usage
//!
//! ```ignore
//! use unveil_core::reveal::{RevealScheduler, VirtualClock, IntersectionEvent};
//!
//! let clock = VirtualClock::new();
//! let mut scheduler = RevealScheduler::new(clock.timers(), clock.recorder(), false);
//! scheduler.register("hero".into(), "sections", &ScheduleConfig::default());
//! scheduler.on_intersection(&IntersectionEvent::entering("hero", 0.5));
//! scheduler.advance(Duration::from_millis(100));
//! ```

mod element;
mod host;
mod scheduler;
pub mod service;
mod virtual_clock;

pub use element::{ElementId, IntersectionEvent, RevealState, TimerToken};
pub use host::{Presenter, Timers};
pub use scheduler::RevealScheduler;
pub use service::{RevealCommand, RevealEvent, RevealHandle, RevealService};
pub use virtual_clock::{RecordingPresenter, RevealRecord, VirtualClock, VirtualTimers};
