//! CLI commands implementation

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use slotter_core::{BlockOutcome, SlotTable, SlotterConfig, TimeBlock};
use slotter_ingest::read_requests_from_path;
use slotter_scheduler::Scheduler;
use std::path::Path;
use tracing::info;

/// Result rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable slot tables
    Text,
    /// JSON array, one entry per time block
    Json,
}

/// One time block in JSON output
#[derive(Debug, Serialize)]
struct BlockReport<'a> {
    block: &'a TimeBlock,
    outcome: &'a BlockOutcome,
}

/// Load the configuration file, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<SlotterConfig> {
    match path {
        Some(path) => SlotterConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(SlotterConfig::default()),
    }
}

/// Apply command-line capacity overrides on top of the loaded config
pub fn apply_overrides(
    config: &mut SlotterConfig,
    slots: Option<usize>,
    request_columns: Option<usize>,
) -> Result<()> {
    if let Some(slots) = slots {
        config.scheduler.slot_count = slots;
    }
    if let Some(columns) = request_columns {
        config.scheduler.request_columns = columns;
    }
    config.scheduler.validate()?;
    config.input.validate(&config.scheduler)?;
    Ok(())
}

/// Schedule every time block in a request CSV and print the result
pub async fn schedule(
    config: &SlotterConfig,
    csv: &Path,
    format: OutputFormat,
    parallel: bool,
) -> Result<()> {
    let blocks = read_requests_from_path(csv, &config.input, &config.scheduler)
        .with_context(|| format!("Failed to read requests from {}", csv.display()))?;

    let scheduler = Scheduler::new(config.scheduler.clone());
    let outcomes = if parallel {
        scheduler.schedule_all_parallel(blocks).await?
    } else {
        scheduler.schedule_all(blocks)
    };

    let rendered = match format {
        OutputFormat::Text => render_text(&outcomes),
        OutputFormat::Json => render_json(&outcomes)?,
    };
    println!("{}", rendered);

    let failed = outcomes.iter().filter(|(_, o)| !o.is_scheduled()).count();
    if failed > 0 {
        eprintln!(
            "{} of {} time blocks could not be scheduled",
            failed,
            outcomes.len()
        );
    }

    info!(
        blocks = outcomes.len(),
        unschedulable = failed,
        "Scheduling finished"
    );

    Ok(())
}

/// Print the effective configuration as TOML
pub fn show_config(config: &SlotterConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Render outcomes as per-block slot tables
pub fn render_text(outcomes: &[(TimeBlock, BlockOutcome)]) -> String {
    if outcomes.is_empty() {
        return "No time blocks found".to_string();
    }

    let mut sections = Vec::with_capacity(outcomes.len());

    for (block, outcome) in outcomes {
        let mut lines = Vec::new();
        match outcome {
            BlockOutcome::Scheduled(schedule) => {
                lines.push(format!(
                    "{} ({} meetings)",
                    block,
                    schedule.meeting_count()
                ));
                lines.push("-".repeat(60));
                lines.push("Mentors:".to_string());
                for (name, table) in schedule.mentors.iter() {
                    lines.push(format!("  {:<20} {}", name, slot_row(table)));
                }
                lines.push("Fellows:".to_string());
                for (name, table) in schedule.fellows.iter() {
                    lines.push(format!("  {:<20} {}", name, slot_row(table)));
                }
            }
            BlockOutcome::Unschedulable(e) => {
                lines.push(format!("{} UNSCHEDULABLE", block));
                lines.push("-".repeat(60));
                lines.push(format!("  {}", e));
            }
        }
        sections.push(lines.join("\n"));
    }

    sections.join("\n\n")
}

fn slot_row(table: &SlotTable) -> String {
    (0..table.len())
        .map(|slot| table.get(slot).unwrap_or("-"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Render outcomes as a JSON array
pub fn render_json(outcomes: &[(TimeBlock, BlockOutcome)]) -> Result<String> {
    let reports: Vec<BlockReport<'_>> = outcomes
        .iter()
        .map(|(block, outcome)| BlockReport { block, outcome })
        .collect();
    Ok(serde_json::to_string_pretty(&reports)?)
}
