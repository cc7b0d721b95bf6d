//! Formatted terminal output for the `show` command.

use crate::domain::{DrawData, DrawIndex, SelectedWindow};
use crate::error::AppError;
use crate::report::{Projection, resolve_tooltip_label};

const NAME_COL: usize = 46;

/// Header block: feed stats plus the active window.
pub fn format_summary(data: &DrawData, window: SelectedWindow, projection: &Projection) -> String {
    let mut out = String::new();

    out.push_str("=== eed - Express Entry draws ===\n");
    out.push_str(&format!("Period: {}\n", window.label()));
    out.push_str(&format!(
        "Draws: {} total | {} in window\n",
        data.series.len(),
        projection.len()
    ));

    if let (Some(first), Some(last)) = (projection.labels.first(), projection.labels.last()) {
        out.push_str(&format!("Window: {first} .. {last}\n"));
    }
    if let (Some(min), Some(max)) = (
        projection.scores.iter().min(),
        projection.scores.iter().max(),
    ) {
        out.push_str(&format!("CRS: [{min}, {max}]\n"));
    }
    if let (Some(min), Some(max)) = (projection.sizes.iter().min(), projection.sizes.iter().max())
    {
        out.push_str(&format!("Invitations: [{min}, {max}] per draw\n"));
    }

    out
}

/// Per-draw table for the windowed projection.
///
/// Rows go through the date index (the same lookup the chart tooltip uses),
/// so a broken ingest invariant surfaces here as a contract error rather than
/// a blank row.
pub fn format_draw_table(projection: &Projection, index: &DrawIndex) -> Result<String, AppError> {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<10}  {:<NAME_COL$}  {:>5}  {:>11}\n",
        "date", "draw", "crs", "invitations"
    ));

    for i in 0..projection.len() {
        let date = projection.labels[i];
        let caption = truncate(&resolve_tooltip_label(date, index)?, NAME_COL);
        out.push_str(&format!(
            "{:<10}  {:<NAME_COL$}  {:>5}  {:>11}\n",
            date.to_string(),
            caption,
            projection.scores[i],
            group_thousands(projection.sizes[i]),
        ));
    }

    Ok(out)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Re-insert thousands separators for display (the inverse of size parsing).
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
