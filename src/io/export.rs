//! Export the windowed projection to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::DrawIndex;
use crate::error::AppError;
use crate::report::Projection;

/// Write one row per projected draw, chronological ascending.
pub fn write_projection_csv(
    path: &Path,
    projection: &Projection,
    index: &DrawIndex,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    write_projection(&mut file, projection, index)
        .map_err(|e| AppError::usage(format!("Failed to write export CSV: {e}")))
}

fn write_projection(
    out: &mut impl Write,
    projection: &Projection,
    index: &DrawIndex,
) -> Result<(), std::io::Error> {
    writeln!(out, "date,draw_number,draw_name,crs,invitations")?;

    for i in 0..projection.len() {
        let date = projection.labels[i];
        // The projection and the index come from the same ingest; a miss here
        // is the same contract breach the tooltip path guards against.
        let Some(record) = index.get(&date) else {
            return Err(std::io::Error::other(format!(
                "no draw indexed for date {date}"
            )));
        };
        writeln!(
            out,
            "{},{},{},{},{}",
            date,
            record.number,
            csv_field(&record.name),
            projection.scores[i],
            projection.sizes[i],
        )?;
    }

    Ok(())
}

/// Quote a field if it contains CSV metacharacters.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::{DrawData, DrawRecord, SelectedWindow};
    use crate::report::project;

    fn sample_data() -> DrawData {
        let series = vec![
            DrawRecord {
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                number: 299,
                name: "General".to_string(),
                crs: 531,
                size_raw: "1,000".to_string(),
            },
            DrawRecord {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                number: 300,
                name: "Trades, transport".to_string(),
                crs: 526,
                size_raw: "3,500".to_string(),
            },
        ];
        let by_date = series.iter().map(|r| (r.date, r.clone())).collect();
        DrawData { series, by_date }
    }

    #[test]
    fn writes_header_and_separator_free_sizes() {
        let data = sample_data();
        let p = project(&data.series, SelectedWindow::AllDraws).unwrap();
        let mut buf = Vec::new();
        write_projection(&mut buf, &p, &data.by_date).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,draw_number,draw_name,crs,invitations");
        assert_eq!(lines[1], "2024-02-01,299,General,531,1000");
        // A comma in the name gets quoted; the size stays a plain integer.
        assert_eq!(lines[2], "2024-03-01,300,\"Trades, transport\",526,3500");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn csv_field_quoting() {
        assert_eq!(csv_field("General"), "General");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
