//! Scripted host events for exercising the scheduler outside a browser
//!
//! A script lists element groups (registered at t=0 in file order) and timed
//! host events. Example:
//!
//! ```toml
//! reduced_motion = false
//!
//! [[groups]]
//! name = "sections"
//! stagger_unit_ms = 100
//! elements = ["hero", "filosofia", "menu", "chef"]
//!
//! [[events]]
//! at_ms = 0
//! kind = "enter"
//! element = "menu"
//! ratio = 0.4
//!
//! [[events]]
//! at_ms = 120
//! kind = "remove"
//! element = "menu"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::config::{RevealConfig, ScheduleConfig};
use crate::reveal::{ElementId, IntersectionEvent, RevealRecord, RevealScheduler, VirtualClock};
use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    /// Overrides the configured reduced-motion preference at startup
    #[serde(default)]
    pub reduced_motion: Option<bool>,
    #[serde(default)]
    pub groups: Vec<ScriptGroup>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptGroup {
    pub name: String,
    pub elements: Vec<String>,
    #[serde(default)]
    pub stagger_unit_ms: Option<i64>,
    #[serde(default)]
    pub visibility_threshold: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptAction {
    /// Element intersects the viewport at `ratio`
    Enter {
        element: String,
        #[serde(default = "full_ratio")]
        ratio: f64,
    },
    /// Element leaves the viewport
    Leave { element: String },
    /// Element removed from the page
    Remove { element: String },
    /// Host's reduced-motion preference changed
    ReducedMotion { enabled: bool },
}

fn full_ratio() -> f64 {
    1.0
}

impl ReplayScript {
    pub fn parse(text: &str) -> Result<Self> {
        let script: Self = toml::from_str(text).map_err(|e| Error::Script(e.to_string()))?;

        for group in &script.groups {
            if group.name.trim().is_empty() {
                return Err(Error::Script("group name must not be empty".to_string()));
            }
        }

        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Schedule for a group: script values over configured defaults
    pub fn schedule_for(&self, group: &ScriptGroup, defaults: &RevealConfig) -> ScheduleConfig {
        let base = defaults.schedule_for(&group.name);
        ScheduleConfig {
            visibility_threshold: group.visibility_threshold.unwrap_or(base.visibility_threshold),
            stagger_unit_ms: group.stagger_unit_ms.unwrap_or(base.stagger_unit_ms),
            reduced_motion: false,
        }
    }

    pub fn reduced_motion(&self, defaults: &RevealConfig) -> bool {
        self.reduced_motion.unwrap_or(defaults.reduced_motion)
    }

    /// Events ordered by time; ties keep file order
    pub fn sorted_events(&self) -> Vec<&ScriptEvent> {
        let mut events: Vec<&ScriptEvent> = self.events.iter().collect();
        events.sort_by_key(|e| e.at_ms);
        events
    }

    /// Every element named by a group, in registration order
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.elements.iter().map(String::as_str))
    }

    /// Longest stagger any registered element can wait, in milliseconds
    pub fn max_stagger_ms(&self, defaults: &RevealConfig) -> u64 {
        self.groups
            .iter()
            .map(|g| {
                let schedule = self.schedule_for(g, defaults).sanitized();
                let last = g.elements.len().saturating_sub(1) as u32;
                schedule.delay_for(last).as_millis() as u64
            })
            .max()
            .unwrap_or(0)
    }
}

impl ScriptAction {
    pub fn element(&self) -> Option<&str> {
        match self {
            Self::Enter { element, .. } | Self::Leave { element } | Self::Remove { element } => {
                Some(element.as_str())
            }
            Self::ReducedMotion { .. } => None,
        }
    }
}

/// Run a script against a virtual clock and return the reveal timeline
pub fn run_virtual(script: &ReplayScript, defaults: &RevealConfig) -> Vec<RevealRecord> {
    let clock = VirtualClock::new();
    let recorder = clock.recorder();
    let mut scheduler = RevealScheduler::new(
        clock.timers(),
        recorder.clone(),
        script.reduced_motion(defaults),
    );

    for group in &script.groups {
        let schedule = script.schedule_for(group, defaults);
        for element in &group.elements {
            scheduler.register(ElementId::new(element.as_str()), &group.name, &schedule);
        }
    }

    for event in script.sorted_events() {
        scheduler.advance_to(event.at_ms);
        match &event.action {
            ScriptAction::Enter { element, ratio } => {
                scheduler.on_intersection(&IntersectionEvent::entering(element.as_str(), *ratio));
            }
            ScriptAction::Leave { element } => {
                scheduler.on_intersection(&IntersectionEvent::leaving(element.as_str()));
            }
            ScriptAction::Remove { element } => {
                scheduler.deregister(&ElementId::new(element.as_str()));
            }
            ScriptAction::ReducedMotion { enabled } => scheduler.set_reduced_motion(*enabled),
        }
    }

    // Let every outstanding timer fire
    while let Some(token) = scheduler.timers_mut().pop_due(u64::MAX) {
        scheduler.on_timer(token);
    }

    recorder.records()
}
