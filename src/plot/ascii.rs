//! ASCII plotting for non-TUI terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Two stacked panels mirror the TUI chart's dual axes:
//! - CRS score trend: `*` markers
//! - invitation sizes: `#` bars

use crate::report::Projection;

const GUTTER: usize = 9;

/// Render the windowed projection as a fixed-size character grid.
///
/// One column per draw, resampled when the window holds more draws than
/// `width` columns. Output is deterministic for a given projection and size.
pub fn render_ascii_chart(projection: &Projection, width: usize, height: usize) -> String {
    let n = projection.len();
    if n == 0 {
        return "(no draws in window)\n".to_string();
    }

    let cols = n.min(width.max(16));
    let height = height.max(9);
    let score_rows = (height * 2 / 3).max(4);
    let size_rows = (height - score_rows).max(3);

    // Column -> draw index, trailing-biased so the newest draw is always the
    // last column.
    let draw_at = |col: usize| -> usize {
        if cols == 1 {
            n - 1
        } else {
            col * (n - 1) / (cols - 1)
        }
    };

    let scores: Vec<u32> = (0..cols).map(|c| projection.scores[draw_at(c)]).collect();
    let sizes: Vec<u32> = (0..cols).map(|c| projection.sizes[draw_at(c)]).collect();

    let (s_min, s_max) = min_max(&scores);
    let (_, z_max) = min_max(&sizes);

    let mut out = String::new();

    // Score panel.
    let mut grid = vec![vec![' '; cols]; score_rows];
    for (col, &v) in scores.iter().enumerate() {
        let row = scale_to_row(v, s_min, s_max, score_rows);
        grid[score_rows - 1 - row][col] = '*';
    }
    for (i, row) in grid.iter().enumerate() {
        let label = if i == 0 {
            format!("{s_max:>7} ")
        } else if i == score_rows - 1 {
            format!("{s_min:>7} ")
        } else {
            " ".repeat(GUTTER - 1)
        };
        out.push_str(&label);
        out.push('|');
        out.extend(row.iter());
        out.push('\n');
    }
    out.push_str(&format!("{}+{}\n", " ".repeat(GUTTER - 1), "-".repeat(cols)));

    // Size panel: bars grow upward from the baseline.
    let mut bars = vec![vec![' '; cols]; size_rows];
    for (col, &v) in sizes.iter().enumerate() {
        let h = bar_height(v, z_max, size_rows);
        for row in 0..h {
            bars[size_rows - 1 - row][col] = '#';
        }
    }
    for (i, row) in bars.iter().enumerate() {
        let label = if i == 0 {
            format!("{z_max:>7} ")
        } else if i == size_rows - 1 {
            format!("{:>7} ", 0)
        } else {
            " ".repeat(GUTTER - 1)
        };
        out.push_str(&label);
        out.push('|');
        out.extend(row.iter());
        out.push('\n');
    }

    out.push_str(&format!(
        "{}{} .. {}  (crs: *, invitations: #, {n} draws)\n",
        " ".repeat(GUTTER),
        projection.labels[0],
        projection.labels[n - 1],
    ));

    out
}

fn min_max(values: &[u32]) -> (u32, u32) {
    let min = values.iter().copied().min().unwrap_or(0);
    let max = values.iter().copied().max().unwrap_or(0);
    (min, max)
}

fn scale_to_row(v: u32, min: u32, max: u32, rows: usize) -> usize {
    if max == min {
        return rows / 2;
    }
    let u = f64::from(v - min) / f64::from(max - min);
    ((u * (rows - 1) as f64).round() as usize).min(rows - 1)
}

fn bar_height(v: u32, max: u32, rows: usize) -> usize {
    if max == 0 {
        return 0;
    }
    let u = f64::from(v) / f64::from(max);
    let h = (u * rows as f64).ceil() as usize;
    h.min(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn projection(scores: Vec<u32>, sizes: Vec<u32>) -> Projection {
        let labels = (0..scores.len())
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64))
            .collect();
        Projection {
            labels,
            scores,
            sizes,
        }
    }

    #[test]
    fn empty_projection_renders_placeholder() {
        let p = projection(vec![], vec![]);
        assert_eq!(render_ascii_chart(&p, 80, 20), "(no draws in window)\n");
    }

    #[test]
    fn output_is_deterministic_and_sized() {
        let p = projection(vec![500, 510, 520, 530], vec![1000, 2000, 1500, 3000]);
        let a = render_ascii_chart(&p, 40, 18);
        let b = render_ascii_chart(&p, 40, 18);
        assert_eq!(a, b);

        // score rows + separator + size rows + footer
        assert_eq!(a.lines().count(), 12 + 1 + 6 + 1);
        assert!(a.contains('*'));
        assert!(a.contains('#'));
        assert!(a.contains("2024-01-01 .. 2024-01-04"));
    }

    #[test]
    fn axis_labels_show_value_ranges() {
        let p = projection(vec![491, 546, 500], vec![750, 7000, 1000]);
        let s = render_ascii_chart(&p, 40, 18);
        assert!(s.contains("546"));
        assert!(s.contains("491"));
        assert!(s.contains("7000"));
    }

    #[test]
    fn flat_series_still_renders() {
        let p = projection(vec![500, 500, 500], vec![0, 0, 0]);
        let s = render_ascii_chart(&p, 40, 18);
        assert!(s.contains('*'));
        // Zero-size draws draw no bars; only the footer legend may mention
        // the bar glyph. Panel rows are the ones carrying the axis `|`.
        let bars_in_panels = s
            .lines()
            .filter(|line| line.contains('|'))
            .any(|line| line.contains('#'));
        assert!(!bars_in_panels);
    }

    #[test]
    fn wide_windows_resample_to_width() {
        let scores: Vec<u32> = (0..300).map(|i| 450 + (i % 100)).collect();
        let sizes: Vec<u32> = (0..300).map(|i| 500 + i * 10).collect();
        let p = projection(scores, sizes);
        let s = render_ascii_chart(&p, 60, 18);
        // No line exceeds gutter + configured column budget.
        let max_line = s.lines().map(|l| l.chars().count()).max().unwrap();
        assert!(max_line <= GUTTER + 60 + 50, "line too wide: {max_line}");
    }
}
