//! Derived views of the draw series: windowed projections and tooltip
//! captions, plus formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the data-shaping code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

use chrono::NaiveDate;

use crate::domain::{DrawIndex, DrawRecord, SelectedWindow};
use crate::error::AppError;

/// Three index-aligned parallel series, ready for a chart renderer: position
/// `i` in every vector describes the same draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub labels: Vec<NaiveDate>,
    pub scores: Vec<u32>,
    pub sizes: Vec<u32>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Project the trailing window of the series into parallel label/score/size
/// vectors.
///
/// The window table lives in [`SelectedWindow::slice_len`]; a window without
/// a slice length (AllDraws) takes the whole series, which is the defined
/// fallback rather than an error. Invitation sizes are textual in the feed
/// (`"3,500"`); a value that does not reduce to an integer after separator
/// stripping fails naming the draw instead of being coerced to zero.
pub fn project(series: &[DrawRecord], window: SelectedWindow) -> Result<Projection, AppError> {
    let windowed = match window.slice_len() {
        Some(n) => &series[series.len().saturating_sub(n)..],
        None => series,
    };

    let mut labels = Vec::with_capacity(windowed.len());
    let mut scores = Vec::with_capacity(windowed.len());
    let mut sizes = Vec::with_capacity(windowed.len());
    for record in windowed {
        labels.push(record.date);
        scores.push(record.crs);
        sizes.push(parse_draw_size(record)?);
    }

    Ok(Projection {
        labels,
        scores,
        sizes,
    })
}

/// Parse a thousands-separated invitation count (`"3,500"` -> 3500).
pub fn parse_draw_size(record: &DrawRecord) -> Result<u32, AppError> {
    let stripped: String = record
        .size_raw
        .chars()
        .filter(|c| *c != ',')
        .collect();
    stripped.trim().parse::<u32>().map_err(|_| {
        AppError::parse(format!(
            "Invalid drawSize '{}' for draw #{} ({})",
            record.size_raw, record.number, record.date
        ))
    })
}

/// Caption for the chart tooltip footer: `#<number> - <name>.`
///
/// Every label handed to the chart came out of the same ingest that built the
/// index, so a miss here means that invariant was broken upstream; fail fast
/// rather than degrade to a blank caption.
pub fn resolve_tooltip_label(date: NaiveDate, index: &DrawIndex) -> Result<String, AppError> {
    let record = index.get(&date).ok_or_else(|| {
        AppError::contract(format!("No draw indexed for displayed date {date}"))
    })?;
    Ok(format!("#{} - {}.", record.number, record.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest;
    use crate::domain::RawRound;

    fn record(date: &str, number: u32, crs: u32, size: &str) -> DrawRecord {
        DrawRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            number,
            name: "General".to_string(),
            crs,
            size_raw: size.to_string(),
        }
    }

    fn series_of(n: usize) -> Vec<DrawRecord> {
        (0..n)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
                    + chrono::Days::new(i as u64 * 14);
                record(&date.to_string(), 200 + i as u32, 500 + i as u32, "1,000")
            })
            .collect()
    }

    #[test]
    fn windows_take_trailing_min_of_table_and_length() {
        let series = series_of(30);
        for window in SelectedWindow::ALL {
            let p = project(&series, window).unwrap();
            let expected = window.slice_len().map_or(30, |n| n.min(30));
            assert_eq!(p.len(), expected, "window {window:?}");
            assert_eq!(p.labels.len(), p.scores.len());
            assert_eq!(p.labels.len(), p.sizes.len());
        }

        // Trailing slice: the last label is always the last draw.
        let p = project(&series, SelectedWindow::Last10Draws).unwrap();
        assert_eq!(p.labels.last(), Some(&series.last().unwrap().date));
        assert_eq!(p.labels.first(), Some(&series[20].date));
    }

    #[test]
    fn offset_exceeding_length_returns_all_records() {
        let raw = vec![
            RawRound {
                draw_date: "2024-03-01".to_string(),
                draw_number: 300,
                draw_name: "General".to_string(),
                draw_crs: 526,
                draw_size: "3,500".to_string(),
            },
            RawRound {
                draw_date: "2024-02-01".to_string(),
                draw_number: 299,
                draw_name: "General".to_string(),
                draw_crs: 531,
                draw_size: "1,000".to_string(),
            },
        ];
        let data = ingest(raw).unwrap();
        let dates: Vec<String> = data.series.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-02-01", "2024-03-01"]);

        let p = project(&data.series, SelectedWindow::Last10Draws).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.scores, vec![531, 526]);
        assert_eq!(p.sizes, vec![1000, 3500]);
    }

    #[test]
    fn all_draws_never_slices() {
        let series = series_of(120);
        let p = project(&series, SelectedWindow::AllDraws).unwrap();
        assert_eq!(p.len(), 120);
    }

    #[test]
    fn empty_series_projects_empty() {
        let p = project(&[], SelectedWindow::Last25Draws).unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn size_parsing_strips_thousands_separators() {
        assert_eq!(
            parse_draw_size(&record("2024-03-01", 300, 526, "3,500")).unwrap(),
            3500
        );
        assert_eq!(
            parse_draw_size(&record("2024-03-01", 300, 526, "1,234,567")).unwrap(),
            1_234_567
        );
        assert_eq!(parse_draw_size(&record("2024-03-01", 300, 526, "750")).unwrap(), 750);
    }

    #[test]
    fn malformed_size_fails_naming_the_draw() {
        let bad = record("2024-03-01", 300, 526, "3,5OO");
        let err = parse_draw_size(&bad).unwrap_err();
        assert_eq!(err.exit_code(), 5);
        let msg = err.to_string();
        assert!(msg.contains("drawSize"), "message should name the field: {msg}");
        assert!(msg.contains("#300"), "message should name the draw: {msg}");

        // And it aborts the projection rather than coercing to zero.
        let err = project(std::slice::from_ref(&bad), SelectedWindow::AllDraws).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn tooltip_caption_combines_number_and_name() {
        let r = record("2024-03-01", 300, 526, "3,500");
        let mut index = DrawIndex::new();
        index.insert(r.date, r.clone());
        let caption = resolve_tooltip_label(r.date, &index).unwrap();
        assert_eq!(caption, "#300 - General.");
    }

    #[test]
    fn tooltip_miss_is_a_contract_violation() {
        let index = DrawIndex::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let err = resolve_tooltip_label(date, &index).unwrap_err();
        assert_eq!(err.exit_code(), 6);
        assert!(err.to_string().contains("2024-03-01"));
    }
}
