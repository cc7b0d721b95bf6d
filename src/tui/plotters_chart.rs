//! Plotters-powered draw chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - dual-axis support (CRS line on one scale, invitation bars on another)
//! - less manual work for scaling and layout
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
// The ratatui `Color` import below shadows the plotters `Color` trait from the
// prelude; re-import it anonymously so `filled()` stays in scope.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are computed
/// outside the render call. X positions are draw indices within the windowed
/// projection; tick labels are drawn by the caller around the chart area,
/// where terminal-cell text is reliable.
pub struct DrawPlottersChart<'a> {
    /// CRS score per draw, on the primary y-axis: `(index, score)`.
    pub scores: &'a [(f64, f64)],
    /// Invitation count per draw, on the secondary y-axis: `(index, size)`.
    pub sizes: &'a [(f64, f64)],
    /// Index of the cursored draw, if any (vertical highlight).
    pub cursor: Option<f64>,
    /// X bounds (draw index).
    pub x_bounds: [f64; 2],
    /// Primary y bounds (CRS score).
    pub score_bounds: [f64; 2],
    /// Secondary y bounds (invitations).
    pub size_bounds: [f64; 2],
}

impl Widget for DrawPlottersChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.score_bounds[0];
        let y1 = self.score_bounds[1];
        let z0 = self.size_bounds[0];
        let z1 = self.size_bounds[1];

        let finite = x0.is_finite()
            && x1.is_finite()
            && y0.is_finite()
            && y1.is_finite()
            && z0.is_finite()
            && z1.is_finite();
        if !finite || x1 <= x0 || y1 <= y0 || z1 <= z0 {
            return;
        }

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        //
        // We delegate rendering to the crate-provided widget helper to avoid
        // coupling our code to its internal backend types.
        let widget = widget_fn(move |root| {
            let chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                .build_cartesian_2d(x0..x1, y0..y1)?;
            let mut chart = chart.set_secondary_coord(x0..x1, z0..z1);

            // Axis lines only; tick labels are drawn by the caller in plain
            // terminal cells where they stay crisp.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(0)
                .y_labels(0)
                .axis_style(&WHITE)
                .draw()?;

            // Series styling: keep the palette high-contrast for terminal readability.
            let score_color = RGBColor(0, 255, 255); // cyan
            let size_color = RGBColor(0, 128, 0); // green
            let cursor_color = RGBColor(255, 255, 0); // yellow

            // 1) Invitation-size bars on the secondary axis, behind the line.
            //
            // Bar width shrinks with the window so adjacent draws stay
            // distinguishable even in the all-draws view.
            let half = bar_half_width(self.sizes.len());
            chart.draw_secondary_series(self.sizes.iter().map(|&(x, z)| {
                Rectangle::new([(x - half, 0.0), (x + half, z)], size_color.filled())
            }))?;

            // 2) Cursor highlight: a vertical line through the selected draw.
            if let Some(c) = self.cursor {
                chart.draw_series(LineSeries::new(
                    [(c, y0), (c, y1)].into_iter(),
                    &cursor_color,
                ))?;
            }

            // 3) CRS score line on the primary axis.
            chart.draw_series(LineSeries::new(self.scores.iter().copied(), &score_color))?;

            // 4) One pixel per draw on top of the line, so single-draw windows
            // remain visible.
            chart.draw_series(
                self.scores
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), score_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn bar_half_width(n: usize) -> f64 {
    if n <= 1 { 0.4 } else { 0.35 }
}
