//! CSV request reader

use csv::{ReaderBuilder, StringRecord, Trim};
use slotter_core::{
    BlockRequests, InputConfig, SchedulerConfig, SlotterError, SlotterResult, TimeBlock,
};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read mentor requests from a CSV file
pub fn read_requests_from_path(
    path: &Path,
    input: &InputConfig,
    scheduler: &SchedulerConfig,
) -> SlotterResult<BlockRequests> {
    let file = File::open(path)?;
    let blocks = read_requests(file, input, scheduler)?;

    info!(
        path = %path.display(),
        blocks = blocks.len(),
        "Loaded mentor requests"
    );

    Ok(blocks)
}

/// Read mentor requests from CSV data, grouped by time block.
///
/// Each row holds one mentor's requests for one day and period. Rows whose
/// day or period is the configured undefined marker are skipped whatever
/// their other cells hold, as are rows with every cell blank. Blank and
/// missing request cells become `None`. A mentor appearing twice in a block
/// keeps its first position and takes the later requests.
pub fn read_requests<R: Read>(
    reader: R,
    input: &InputConfig,
    scheduler: &SchedulerConfig,
) -> SlotterResult<BlockRequests> {
    input.validate(scheduler)?;

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(input.has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut blocks = BlockRequests::new();

    for record in csv_reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(str::is_empty) {
            debug!(line = line, "Skipping blank row");
            continue;
        }

        let day = cell(&record, input.day_column);
        let period = cell(&record, input.period_column);
        let marker = Some(input.undefined_marker.as_str());
        if day == marker || period == marker {
            debug!(line = line, "Skipping unconfirmed time block");
            continue;
        }

        let mentor = required(&record, input.mentor_column, "mentor", line)?;
        let day = required(&record, input.day_column, "day", line)?;
        let period = required(&record, input.period_column, "period", line)?;

        let requests: Vec<Option<String>> = (0..scheduler.request_columns)
            .map(|i| cell(&record, input.first_request_column + i).map(str::to_string))
            .collect();

        let block = TimeBlock::new(day, period);
        if blocks.entry(block.clone()).insert(mentor, requests).is_some() {
            warn!(
                mentor = mentor,
                block = %block,
                line = line,
                "Mentor listed twice for time block, using later row"
            );
        }
    }

    Ok(blocks)
}

fn cell(record: &StringRecord, column: usize) -> Option<&str> {
    record.get(column).filter(|value| !value.is_empty())
}

fn required<'r>(
    record: &'r StringRecord,
    column: usize,
    field: &str,
    line: u64,
) -> SlotterResult<&'r str> {
    cell(record, column).ok_or_else(|| SlotterError::Input {
        line,
        message: format!("missing {} in column {}", field, column + 1),
    })
}

fn csv_error(err: csv::Error) -> SlotterError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => SlotterError::Io(e),
        _ => SlotterError::Input { line, message },
    }
}
