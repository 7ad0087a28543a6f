//! Headless CLI commands writing to an injected handle.

use std::io::Write;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::cli::{CliCommand, ListArgs, SimulateArgs};
use crate::config::AppConfig;
use crate::queue::{IdleQueue, WorkItem};
use crate::registry::DEMOS;
use crate::sched::ManualScheduler;

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::List(args) => handle_list(&args, &mut writer),
        CliCommand::Simulate(args) => handle_simulate(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch the interactive surface directly")),
    }
}

fn handle_list<W: Write>(args: &ListArgs, mut writer: W) -> Result<()> {
    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&DEMOS)?)?;
        return Ok(());
    }
    for demo in DEMOS {
        writeln!(
            writer,
            "{:<18} {} {:<18} {}",
            demo.id, demo.icon, demo.name, demo.description
        )?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    batches: u32,
    enqueued: u64,
    completed: u64,
    items: Vec<WorkItem>,
}

fn handle_simulate<W: Write>(config: &AppConfig, args: &SimulateArgs, mut writer: W) -> Result<()> {
    let mut queue = IdleQueue::new(ManualScheduler::new(), config.seed());
    for _ in 0..args.batches {
        queue.enqueue_batch();
    }
    queue.start_processing();

    // Drive the deterministic scheduler until everything drains: grant each
    // requested slice as a forced run, then fire the completion timers.
    while queue.is_running() || queue.scheduler_mut().armed_timers() > 0 {
        queue.scheduler_mut().grant_forced(Duration::ZERO);
        queue.pump();
        queue.scheduler_mut().fire_all_timers();
        queue.pump();
    }

    let counters = queue.counters();
    let report = SimulationReport {
        batches: args.batches,
        enqueued: counters.enqueued,
        completed: counters.completed,
        items: queue.items().to_vec(),
    };

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(
            writer,
            "Processed {} batch{}: {} enqueued, {} completed",
            report.batches,
            if report.batches == 1 { "" } else { "es" },
            report.enqueued,
            report.completed
        )?;
        for item in &report.items {
            writeln!(writer, "  #{:<4} {:<10} {}", item.id, item.status.as_str(), item.label)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliCommand;

    fn run(command: CliCommand) -> String {
        let config = AppConfig::discover(None, Some(42)).expect("config");
        let mut output = Vec::new();
        execute(&config, command, &mut output).expect("execute command");
        String::from_utf8(output).expect("utf8")
    }

    #[test]
    fn list_prints_every_registry_entry() {
        let output = run(CliCommand::List(ListArgs { json: false }));
        for demo in DEMOS {
            assert!(output.contains(demo.id.as_str()));
            assert!(output.contains(demo.name));
        }
    }

    #[test]
    fn list_json_round_trips() {
        let output = run(CliCommand::List(ListArgs { json: true }));
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(value.as_array().map(|demos| demos.len()), Some(5));
    }

    #[test]
    fn simulate_completes_every_item() {
        let output = run(CliCommand::Simulate(SimulateArgs {
            batches: 2,
            json: true,
        }));
        let report: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(report["enqueued"], report["completed"]);
        let items = report["items"].as_array().expect("items array");
        assert_eq!(items.len() as u64, report["enqueued"].as_u64().unwrap());
        assert!(items.iter().all(|item| item["status"] == "completed"));
    }

    #[test]
    fn simulate_summary_reports_batch_count() {
        let output = run(CliCommand::Simulate(SimulateArgs {
            batches: 1,
            json: false,
        }));
        assert!(output.contains("Processed 1 batch:"));
    }

    #[test]
    fn tui_command_is_rejected_headlessly() {
        let config = AppConfig::discover(None, None).expect("config");
        let mut output = Vec::new();
        assert!(execute(&config, CliCommand::Tui, &mut output).is_err());
    }
}
