use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tokio::time::{timeout, Instant};

use unveil_core::replay::{run_virtual, ReplayScript, ScriptAction};
use unveil_core::reveal::{IntersectionEvent, RevealEvent, RevealRecord, RevealService};
use unveil_core::AppConfig;

/// Extra wait after the last possible reveal before the realtime run stops
const SETTLE_MARGIN_MS: u64 = 50;

pub async fn run(config: &AppConfig, script_path: &Path, json: bool, realtime: bool) -> Result<()> {
    let script = ReplayScript::load(script_path)?;

    let known: HashSet<&str> = script.elements().collect();
    for event in &script.events {
        if let Some(element) = event.action.element() {
            if !known.contains(element) {
                tracing::warn!("Event at {}ms targets unregistered element '{}'", event.at_ms, element);
            }
        }
    }

    let records = if realtime {
        run_realtime(&script, config).await
    } else {
        run_virtual(&script, &config.reveal)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    print_timeline(&script, &records);
    Ok(())
}

/// Replay through the tokio service, sleeping for real between events
async fn run_realtime(script: &ReplayScript, config: &AppConfig) -> Vec<RevealRecord> {
    let (service, handle, mut events) = RevealService::new(script.reduced_motion(&config.reveal));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let service_task = tokio::spawn(service.run(shutdown_rx));

    let start = Instant::now();
    let collector = tokio::spawn(async move {
        let mut records = Vec::new();
        while let Some(RevealEvent::Revealed { id }) = events.recv().await {
            records.push(RevealRecord {
                id,
                at_ms: start.elapsed().as_millis() as u64,
            });
        }
        records
    });

    for group in &script.groups {
        let schedule = script.schedule_for(group, &config.reveal);
        for element in &group.elements {
            handle.register(element.as_str(), group.name.as_str(), schedule);
        }
    }

    let mut last_at = 0;
    for event in script.sorted_events() {
        tokio::time::sleep_until(start + Duration::from_millis(event.at_ms)).await;
        last_at = event.at_ms;
        match &event.action {
            ScriptAction::Enter { element, ratio } => {
                handle.intersect(IntersectionEvent::entering(element.as_str(), *ratio));
            }
            ScriptAction::Leave { element } => {
                handle.intersect(IntersectionEvent::leaving(element.as_str()));
            }
            ScriptAction::Remove { element } => handle.deregister(element.as_str()),
            ScriptAction::ReducedMotion { enabled } => handle.set_reduced_motion(*enabled),
        }
    }

    let settle = last_at + script.max_stagger_ms(&config.reveal) + SETTLE_MARGIN_MS;
    tokio::time::sleep_until(start + Duration::from_millis(settle)).await;

    let _ = shutdown_tx.send(true);
    drop(handle);
    if timeout(Duration::from_secs(1), service_task).await.is_err() {
        tracing::warn!("Reveal service did not stop within 1s");
    }

    match collector.await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Reveal collector failed: {}", e);
            Vec::new()
        }
    }
}

fn print_timeline(script: &ReplayScript, records: &[RevealRecord]) {
    println!("{:>8}  element", "t (ms)");
    for record in records {
        println!("{:>8}  {}", record.at_ms, record.id);
    }

    let revealed: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let hidden: Vec<&str> = script
        .elements()
        .filter(|e| !revealed.contains(e))
        .collect();

    if !hidden.is_empty() {
        println!();
        println!("still hidden: {}", hidden.join(", "));
    }
}
