use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::ScheduleConfig;

use super::element::{ElementId, IntersectionEvent, TimerToken};
use super::host::{Presenter, Timers};
use super::scheduler::RevealScheduler;

/// Events emitted by the reveal service to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RevealEvent {
    /// Element should receive its "revealed" marker
    Revealed { id: ElementId },
}

/// Host notifications forwarded to the scheduler task
#[derive(Debug, Clone)]
pub enum RevealCommand {
    Register {
        id: ElementId,
        group: String,
        config: ScheduleConfig,
    },
    Intersect(IntersectionEvent),
    Deregister(ElementId),
    SetReducedMotion(bool),
}

/// Timers backed by spawned `tokio::time::sleep` tasks.
///
/// Fired tokens are sent back to the service loop; cancelled timers are aborted.
pub struct TokioTimers {
    fired_tx: mpsc::UnboundedSender<TimerToken>,
    handles: HashMap<TimerToken, JoinHandle<()>>,
}

impl TokioTimers {
    fn new(fired_tx: mpsc::UnboundedSender<TimerToken>) -> Self {
        Self {
            fired_tx,
            handles: HashMap::new(),
        }
    }

    /// Drop the handle of a timer that already fired
    fn complete(&mut self, token: TimerToken) {
        self.handles.remove(&token);
    }

    pub fn active(&self) -> usize {
        self.handles.len()
    }
}

impl Timers for TokioTimers {
    fn schedule(&mut self, delay: Duration, token: TimerToken) {
        let tx = self.fired_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(token);
        });
        self.handles.insert(token, handle);
    }

    fn cancel(&mut self, token: TimerToken) {
        if let Some(handle) = self.handles.remove(&token) {
            handle.abort();
        }
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

/// Presenter that publishes reveals on an unbounded channel
pub struct EventPresenter {
    tx: mpsc::UnboundedSender<RevealEvent>,
}

impl Presenter for EventPresenter {
    fn reveal(&mut self, id: &ElementId) {
        if self.tx.send(RevealEvent::Revealed { id: id.clone() }).is_err() {
            warn!("Failed to send reveal event for '{}': receiver dropped", id);
        }
    }
}

/// Cloneable sender side of a running [`RevealService`].
///
/// Sends never fail from the caller's point of view; once the service has
/// stopped, commands are dropped.
#[derive(Debug, Clone)]
pub struct RevealHandle {
    tx: mpsc::UnboundedSender<RevealCommand>,
}

impl RevealHandle {
    fn send(&self, command: RevealCommand) {
        if self.tx.send(command).is_err() {
            debug!("Reveal service stopped, dropping command");
        }
    }

    pub fn register(&self, id: impl Into<ElementId>, group: impl Into<String>, config: ScheduleConfig) {
        self.send(RevealCommand::Register {
            id: id.into(),
            group: group.into(),
            config,
        });
    }

    pub fn intersect(&self, event: IntersectionEvent) {
        self.send(RevealCommand::Intersect(event));
    }

    pub fn deregister(&self, id: impl Into<ElementId>) {
        self.send(RevealCommand::Deregister(id.into()));
    }

    pub fn set_reduced_motion(&self, enabled: bool) {
        self.send(RevealCommand::SetReducedMotion(enabled));
    }
}

/// Single task owning one [`RevealScheduler`].
///
/// Host commands and timer completions are handled one at a time on the
/// service task, so the scheduler needs no locking.
pub struct RevealService {
    scheduler: RevealScheduler<TokioTimers, EventPresenter>,
    commands: mpsc::UnboundedReceiver<RevealCommand>,
    fired: mpsc::UnboundedReceiver<TimerToken>,
}

impl RevealService {
    /// Create a service plus its command handle and the reveal event stream
    pub fn new(reduced_motion: bool) -> (Self, RevealHandle, mpsc::UnboundedReceiver<RevealEvent>) {
        let (command_tx, commands) = mpsc::unbounded_channel();
        let (fired_tx, fired) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let scheduler = RevealScheduler::new(
            TokioTimers::new(fired_tx),
            EventPresenter { tx: event_tx },
            reduced_motion,
        );

        let service = Self {
            scheduler,
            commands,
            fired,
        };

        (service, RevealHandle { tx: command_tx }, event_rx)
    }

    fn handle_command(&mut self, command: RevealCommand) {
        match command {
            RevealCommand::Register { id, group, config } => {
                self.scheduler.register(id, &group, &config);
            }
            RevealCommand::Intersect(event) => self.scheduler.on_intersection(&event),
            RevealCommand::Deregister(id) => {
                self.scheduler.deregister(&id);
            }
            RevealCommand::SetReducedMotion(enabled) => self.scheduler.set_reduced_motion(enabled),
        }
    }

    /// Process commands and timers until shutdown or until every handle is dropped
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Reveal service started (reduced_motion={})",
            self.scheduler.reduced_motion()
        );

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Reveal service received shutdown signal");
                        break;
                    }
                }

                Some(token) = self.fired.recv() => {
                    self.scheduler.timers_mut().complete(token);
                    self.scheduler.on_timer(token);
                }

                command = self.commands.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => {
                            debug!("All reveal handles dropped");
                            break;
                        }
                    }
                }
            }
        }

        let pending = self.scheduler.timers().active();
        if pending > 0 {
            debug!("Aborting {} pending reveal timers", pending);
        }
        info!("Reveal service stopped");
    }
}
