use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::ScheduleConfig;

use super::element::{ElementId, IntersectionEvent, RevealState, TimerToken};
use super::host::{Presenter, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Hidden,
    /// Reveal timer running
    Pending(TimerToken),
    Revealed,
}

#[derive(Debug, Clone)]
struct Entry {
    group: String,
    stagger_index: u32,
    /// Registration order across all groups
    seq: u64,
    config: ScheduleConfig,
    phase: Phase,
}

/// Registry of watched elements and their one-way reveal transitions
///
/// The scheduler never touches rendering. Timed transitions go through `T`,
/// and the revealed marker is handed to `P` exactly once per element.
pub struct RevealScheduler<T, P> {
    timers: T,
    presenter: P,
    entries: HashMap<ElementId, Entry>,
    /// Pending timer -> element it will reveal
    pending: HashMap<TimerToken, ElementId>,
    /// Registrations seen per group; drives stagger indices
    group_counts: HashMap<String, u32>,
    next_token: u64,
    next_seq: u64,
    reduced_motion: bool,
}

impl<T: Timers, P: Presenter> RevealScheduler<T, P> {
    /// Create an empty scheduler.
    ///
    /// `reduced_motion` is the host's preference at startup; later changes
    /// arrive through [`set_reduced_motion`](Self::set_reduced_motion).
    pub fn new(timers: T, presenter: P, reduced_motion: bool) -> Self {
        Self {
            timers,
            presenter,
            entries: HashMap::new(),
            pending: HashMap::new(),
            group_counts: HashMap::new(),
            next_token: 0,
            next_seq: 0,
            reduced_motion,
        }
    }

    /// Start watching an element.
    ///
    /// The element's stagger index is the number of earlier registrations in
    /// `group`. Returns false (and changes nothing) if `id` is already watched.
    pub fn register(&mut self, id: ElementId, group: &str, config: &ScheduleConfig) -> bool {
        if self.entries.contains_key(&id) {
            debug!("Element '{}' already registered, ignoring", id);
            return false;
        }

        let count = self.group_counts.entry(group.to_string()).or_insert(0);
        let stagger_index = *count;
        *count += 1;

        let seq = self.next_seq;
        self.next_seq += 1;

        let config = config.sanitized();
        let reduced = self.reduced_motion || config.reduced_motion;

        debug!(
            element = %id,
            group,
            stagger_index,
            reduced_motion = reduced,
            "Registered element"
        );

        self.entries.insert(
            id.clone(),
            Entry {
                group: group.to_string(),
                stagger_index,
                seq,
                config,
                phase: Phase::Hidden,
            },
        );

        if reduced {
            self.reveal(&id);
        }

        true
    }

    /// Handle a visibility change reported by the host
    pub fn on_intersection(&mut self, event: &IntersectionEvent) {
        let reduced_motion = self.reduced_motion;
        let Some(entry) = self.entries.get(&event.id) else {
            debug!("Intersection for unknown element '{}', ignoring", event.id);
            return;
        };

        if reduced_motion || entry.config.reduced_motion {
            return;
        }

        // One-way: leaving the viewport never hides an element again.
        // NaN ratios fail the comparison and are dropped here too.
        if !event.is_intersecting || !(event.ratio >= entry.config.visibility_threshold) {
            return;
        }

        if entry.phase != Phase::Hidden {
            return;
        }

        let delay = entry.config.delay_for(entry.stagger_index);
        if delay.is_zero() {
            self.reveal(&event.id);
            return;
        }

        let token = TimerToken(self.next_token);
        self.next_token += 1;

        debug!(
            element = %event.id,
            delay_ms = delay.as_millis() as u64,
            "Scheduling reveal"
        );

        self.timers.schedule(delay, token);
        self.pending.insert(token, event.id.clone());
        if let Some(entry) = self.entries.get_mut(&event.id) {
            entry.phase = Phase::Pending(token);
        }
    }

    /// Complete a timed transition. Unknown or cancelled tokens are ignored.
    pub fn on_timer(&mut self, token: TimerToken) {
        let Some(id) = self.pending.remove(&token) else {
            debug!("Stale timer {:?}, ignoring", token);
            return;
        };

        match self.entries.get_mut(&id) {
            Some(entry) if entry.phase == Phase::Pending(token) => {
                // Already fired, so reveal() must not cancel it
                entry.phase = Phase::Hidden;
                self.reveal(&id);
            }
            _ => debug!("Timer {:?} no longer matches '{}'", token, id),
        }
    }

    /// Stop watching an element (it left the page). Cancels a pending reveal.
    pub fn deregister(&mut self, id: &ElementId) -> bool {
        let Some(entry) = self.entries.remove(id) else {
            debug!("Deregister for unknown element '{}', ignoring", id);
            return false;
        };

        if let Phase::Pending(token) = entry.phase {
            self.pending.remove(&token);
            self.timers.cancel(token);
            debug!("Cancelled pending reveal for '{}'", id);
        }

        true
    }

    /// Apply a change of the host's reduced-motion preference.
    ///
    /// Turning it on reveals every element that is still hidden or pending,
    /// in registration order, and cancels their timers. Turning it off only
    /// affects later registrations and intersection events.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        if self.reduced_motion == enabled {
            return;
        }
        self.reduced_motion = enabled;
        info!("Reduced motion {}", if enabled { "enabled" } else { "disabled" });

        if !enabled {
            return;
        }

        let mut waiting: Vec<(u64, ElementId)> = self
            .entries
            .iter()
            .filter(|(_, e)| e.phase != Phase::Revealed)
            .map(|(id, e)| (e.seq, id.clone()))
            .collect();
        waiting.sort_by_key(|(seq, _)| *seq);

        for (_, id) in waiting {
            self.reveal(&id);
        }
    }

    /// Mark an element revealed, cancelling any timer it still holds
    fn reveal(&mut self, id: &ElementId) {
        let Some(entry) = self.entries.get_mut(id) else {
            return;
        };

        match entry.phase {
            Phase::Revealed => return,
            Phase::Pending(token) => {
                self.pending.remove(&token);
                self.timers.cancel(token);
            }
            Phase::Hidden => {}
        }

        entry.phase = Phase::Revealed;
        debug!(element = %id, group = %entry.group, "Revealed");
        self.presenter.reveal(id);
    }

    /// Current state, or None for elements that are not registered
    pub fn state(&self, id: &ElementId) -> Option<RevealState> {
        self.entries.get(id).map(|e| match e.phase {
            Phase::Revealed => RevealState::Revealed,
            Phase::Hidden | Phase::Pending(_) => RevealState::Hidden,
        })
    }

    pub fn stagger_index(&self, id: &ElementId) -> Option<u32> {
        self.entries.get(id).map(|e| e.stagger_index)
    }

    /// Whether a reveal timer is currently running for `id`
    pub fn is_pending(&self, id: &ElementId) -> bool {
        matches!(
            self.entries.get(id).map(|e| e.phase),
            Some(Phase::Pending(_))
        )
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    /// Timer host that only records what was asked of it
    #[derive(Default)]
    struct FakeTimers {
        scheduled: Vec<(Duration, TimerToken)>,
        cancelled: Vec<TimerToken>,
    }

    impl Timers for FakeTimers {
        fn schedule(&mut self, delay: Duration, token: TimerToken) {
            self.scheduled.push((delay, token));
        }

        fn cancel(&mut self, token: TimerToken) {
            self.cancelled.push(token);
        }
    }

    type TestScheduler = RevealScheduler<FakeTimers, Vec<ElementId>>;

    impl Presenter for Vec<ElementId> {
        fn reveal(&mut self, id: &ElementId) {
            self.push(id.clone());
        }
    }

    fn scheduler(reduced_motion: bool) -> TestScheduler {
        RevealScheduler::new(FakeTimers::default(), Vec::new(), reduced_motion)
    }

    fn id(s: &str) -> ElementId {
        ElementId::from(s)
    }

    #[test]
    fn test_register_assigns_indices_per_group() {
        let mut s = scheduler(false);
        let config = ScheduleConfig::default();
        assert!(s.register(id("a"), "sections", &config));
        assert!(s.register(id("b"), "sections", &config));
        assert!(s.register(id("photo"), "chef", &config));

        assert_eq!(s.stagger_index(&id("a")), Some(0));
        assert_eq!(s.stagger_index(&id("b")), Some(1));
        assert_eq!(s.stagger_index(&id("photo")), Some(0));
        assert_eq!(s.state(&id("a")), Some(RevealState::Hidden));
    }

    #[test]
    fn test_duplicate_register_is_noop() {
        let mut s = scheduler(false);
        let config = ScheduleConfig::default();
        assert!(s.register(id("a"), "sections", &config));
        assert!(!s.register(id("a"), "sections", &config));
        assert!(s.register(id("b"), "sections", &config));
        assert_eq!(s.stagger_index(&id("b")), Some(1));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_index_zero_reveals_without_timer() {
        let mut s = scheduler(false);
        s.register(id("a"), "sections", &ScheduleConfig::default());
        s.on_intersection(&IntersectionEvent::entering("a", 0.5));

        assert_eq!(s.state(&id("a")), Some(RevealState::Revealed));
        assert!(s.timers().scheduled.is_empty());
        assert_eq!(s.presenter(), &vec![id("a")]);
    }

    #[test]
    fn test_staggered_element_schedules_delay() {
        let mut s = scheduler(false);
        let config = ScheduleConfig::default();
        s.register(id("a"), "sections", &config);
        s.register(id("b"), "sections", &config);
        s.register(id("c"), "sections", &config);
        s.on_intersection(&IntersectionEvent::entering("c", 0.3));

        assert_eq!(s.timers().scheduled.len(), 1);
        let (delay, token) = s.timers().scheduled[0];
        assert_eq!(delay, Duration::from_millis(200));
        assert!(s.is_pending(&id("c")));
        assert_eq!(s.state(&id("c")), Some(RevealState::Hidden));

        s.on_timer(token);
        assert_eq!(s.state(&id("c")), Some(RevealState::Revealed));
        assert_eq!(s.pending_count(), 0);
        assert!(s.timers().cancelled.is_empty());
    }

    #[test]
    fn test_repeated_intersections_do_not_duplicate() {
        let mut s = scheduler(false);
        let config = ScheduleConfig::default();
        s.register(id("a"), "sections", &config);
        s.register(id("b"), "sections", &config);

        for _ in 0..3 {
            s.on_intersection(&IntersectionEvent::entering("b", 1.0));
        }
        assert_eq!(s.timers().scheduled.len(), 1);

        let token = s.timers().scheduled[0].1;
        s.on_timer(token);
        s.on_timer(token);
        s.on_intersection(&IntersectionEvent::entering("b", 1.0));

        assert_eq!(s.presenter(), &vec![id("b")]);
    }

    #[test]
    fn test_below_threshold_and_leaving_are_ignored() {
        let mut s = scheduler(false);
        s.register(id("a"), "sections", &ScheduleConfig::default());

        s.on_intersection(&IntersectionEvent::entering("a", 0.1));
        s.on_intersection(&IntersectionEvent::leaving("a"));
        s.on_intersection(&IntersectionEvent::entering("a", f64::NAN));
        assert_eq!(s.state(&id("a")), Some(RevealState::Hidden));

        s.on_intersection(&IntersectionEvent::entering("a", 0.2));
        assert_eq!(s.state(&id("a")), Some(RevealState::Revealed));

        s.on_intersection(&IntersectionEvent::leaving("a"));
        assert_eq!(s.state(&id("a")), Some(RevealState::Revealed));
    }

    #[test]
    fn test_unknown_element_is_noop() {
        let mut s = scheduler(false);
        s.on_intersection(&IntersectionEvent::entering("ghost", 1.0));
        s.on_timer(TimerToken(42));
        assert!(!s.deregister(&id("ghost")));
        assert!(s.presenter().is_empty());
        assert_eq!(s.state(&id("ghost")), None);
    }

    #[test]
    fn test_reduced_motion_reveals_on_register() {
        let mut s = scheduler(true);
        let config = ScheduleConfig::default();
        s.register(id("a"), "sections", &config);
        s.register(id("b"), "sections", &config);

        assert_eq!(s.state(&id("b")), Some(RevealState::Revealed));
        assert!(s.timers().scheduled.is_empty());

        s.on_intersection(&IntersectionEvent::entering("b", 1.0));
        assert_eq!(s.presenter().len(), 2);
    }

    #[test]
    fn test_per_registration_reduced_motion() {
        let mut s = scheduler(false);
        let config = ScheduleConfig {
            reduced_motion: true,
            ..Default::default()
        };
        s.register(id("a"), "sections", &ScheduleConfig::default());
        s.register(id("b"), "sections", &config);

        assert_eq!(s.state(&id("a")), Some(RevealState::Hidden));
        assert_eq!(s.state(&id("b")), Some(RevealState::Revealed));
    }

    #[test]
    fn test_deregister_cancels_pending() {
        let mut s = scheduler(false);
        let config = ScheduleConfig::default();
        s.register(id("a"), "sections", &config);
        s.register(id("b"), "sections", &config);
        s.on_intersection(&IntersectionEvent::entering("b", 1.0));
        let token = s.timers().scheduled[0].1;

        assert!(s.deregister(&id("b")));
        assert_eq!(s.timers().cancelled, vec![token]);

        // Host delivered the timer anyway
        s.on_timer(token);
        assert!(s.presenter().is_empty());
        assert_eq!(s.state(&id("b")), None);
    }

    #[test]
    fn test_reregister_after_removal_gets_new_index() {
        let mut s = scheduler(false);
        let config = ScheduleConfig::default();
        s.register(id("a"), "sections", &config);
        s.deregister(&id("a"));
        s.register(id("a"), "sections", &config);
        assert_eq!(s.stagger_index(&id("a")), Some(1));
    }

    #[test]
    fn test_enabling_reduced_motion_flushes_pending() {
        let mut s = scheduler(false);
        let config = ScheduleConfig::default();
        for name in ["a", "b", "c"] {
            s.register(id(name), "sections", &config);
        }
        s.on_intersection(&IntersectionEvent::entering("c", 1.0));
        let token = s.timers().scheduled[0].1;

        s.set_reduced_motion(true);
        assert_eq!(s.presenter(), &vec![id("a"), id("b"), id("c")]);
        assert_eq!(s.timers().cancelled, vec![token]);
        assert_eq!(s.pending_count(), 0);

        s.on_timer(token);
        assert_eq!(s.presenter().len(), 3);
    }

    #[test]
    fn test_disabling_reduced_motion_restores_timing() {
        let mut s = scheduler(true);
        s.set_reduced_motion(false);
        let config = ScheduleConfig::default();
        s.register(id("a"), "sections", &config);
        s.register(id("b"), "sections", &config);
        assert_eq!(s.state(&id("b")), Some(RevealState::Hidden));

        s.on_intersection(&IntersectionEvent::entering("b", 1.0));
        assert_eq!(s.timers().scheduled[0].0, Duration::from_millis(100));
    }

    #[test]
    fn test_closure_presenter() {
        let mut seen = Vec::new();
        {
            let mut s = RevealScheduler::new(
                FakeTimers::default(),
                |id: &ElementId| seen.push(id.to_string()),
                false,
            );
            s.register(id("a"), "sections", &ScheduleConfig::default());
            s.on_intersection(&IntersectionEvent::entering("a", 1.0));
        }
        assert_eq!(seen, vec!["a".to_string()]);
    }

    #[test]
    fn test_malformed_config_is_clamped() {
        let mut s = scheduler(false);
        let config = ScheduleConfig {
            visibility_threshold: 7.0,
            stagger_unit_ms: -100,
            reduced_motion: false,
        };
        s.register(id("a"), "sections", &config);
        s.register(id("b"), "sections", &config);

        // Threshold clamps to 1.0, stagger to zero: reveals immediately
        s.on_intersection(&IntersectionEvent::entering("b", 0.9));
        assert_eq!(s.state(&id("b")), Some(RevealState::Hidden));
        s.on_intersection(&IntersectionEvent::entering("b", 1.0));
        assert_eq!(s.state(&id("b")), Some(RevealState::Revealed));
        assert!(s.timers().scheduled.is_empty());
    }
}
