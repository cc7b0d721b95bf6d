//! Feed ingestion: validate raw rounds and build the per-fetch aggregate.
//!
//! The feed delivers rounds newest-first; everything downstream (projection,
//! chart, report) wants chronological ascending, so the reversal happens here
//! and exactly once.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{DrawData, DrawRecord, RawRound};
use crate::error::AppError;

/// Validate and reshape the raw rounds array into [`DrawData`].
///
/// - the series is reversed to chronological ascending, preserving every
///   input record exactly once
/// - the date index gets one entry per distinct date; a duplicate date is
///   last-write-wins (not expected in the feed, not validated)
///
/// Any malformed record aborts the whole ingest; no partial state is
/// committed.
pub fn ingest(raw: Vec<RawRound>) -> Result<DrawData, AppError> {
    let mut series = Vec::with_capacity(raw.len());
    for round in raw.into_iter().rev() {
        series.push(validate_round(round)?);
    }

    let mut by_date: HashMap<NaiveDate, DrawRecord> = HashMap::with_capacity(series.len());
    for record in &series {
        by_date.insert(record.date, record.clone());
    }

    Ok(DrawData { series, by_date })
}

fn validate_round(round: RawRound) -> Result<DrawRecord, AppError> {
    let date = NaiveDate::parse_from_str(&round.draw_date, "%Y-%m-%d").map_err(|e| {
        AppError::parse(format!(
            "Invalid drawDate '{}' for draw #{}: {e}",
            round.draw_date, round.draw_number
        ))
    })?;

    Ok(DrawRecord {
        date,
        number: round.draw_number,
        name: round.draw_name,
        crs: round.draw_crs,
        size_raw: round.draw_size,
    })
}
