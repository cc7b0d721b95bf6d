//! Ratatui-based terminal UI.
//!
//! The TUI fetches the rounds feed once at startup, then re-projects the
//! resident series as the user cycles the time window. A fetch failure leaves
//! the UI in a dataless state with the error in the status line; there is no
//! retry loop.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::app::pipeline;
use crate::cli::CommonArgs;
use crate::data::{IrccClient, refetch_warning};
use crate::domain::{DrawData, SelectedWindow};
use crate::error::AppError;
use crate::report::{self, Projection};
use crate::session::Session;

mod plotters_chart;

use plotters_chart::DrawPlottersChart;

/// Start the TUI.
pub fn run(args: CommonArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::fetch(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(&args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::fetch(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::fetch(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    session: Session,
    window: SelectedWindow,
    client: IrccClient,
    data: Option<DrawData>,
    projection: Option<Projection>,
    /// Index of the cursored draw within the windowed projection.
    cursor: usize,
    status: String,
}

impl App {
    fn new(args: &CommonArgs) -> Result<Self, AppError> {
        let (session, window) = pipeline::open_session(args)?;
        let mut app = Self {
            session,
            window,
            client: IrccClient::from_env(),
            data: None,
            projection: None,
            cursor: 0,
            status: "Fetching rounds feed...".to_string(),
        };
        // One fetch at startup. On failure the UI stays dataless with the
        // error on the status line; window changes still work against the
        // empty series.
        app.fetch();
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::fetch(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::fetch(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::fetch(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Left => self.set_window(self.window.prev()),
            KeyCode::Right => self.set_window(self.window.next()),
            KeyCode::Char(c @ '1'..='4') => {
                let i = (c as usize) - ('1' as usize);
                self.set_window(SelectedWindow::ALL[i]);
            }
            KeyCode::Up => {
                let len = self.projection.as_ref().map_or(0, Projection::len);
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
            }
            KeyCode::Down => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Char('r') => self.fetch(),
            _ => {}
        }
        false
    }

    /// Fetch and ingest the feed, replacing resident data on success.
    ///
    /// Normal operation comes through here exactly once; a repeat (the `r`
    /// key, or a host that initializes twice) is surfaced as a warning in the
    /// status line, not silently absorbed.
    fn fetch(&mut self) {
        match pipeline::fetch_and_ingest(&mut self.client) {
            Ok(data) => {
                self.data = Some(data);
                self.reproject();
                self.status = if self.client.anomalous_refetch() {
                    refetch_warning(self.client.fetch_count())
                } else {
                    format!("Loaded {} draws.", self.draw_count())
                };
            }
            Err(e) => {
                self.status = e.to_string();
            }
        }
    }

    /// Re-project the resident series for the active window. Synchronous; no
    /// I/O happens here.
    fn reproject(&mut self) {
        let Some(data) = &self.data else {
            self.projection = None;
            return;
        };
        match report::project(&data.series, self.window) {
            Ok(p) => {
                // Cursor onto the newest draw in the window.
                self.cursor = p.len().saturating_sub(1);
                self.projection = Some(p);
            }
            Err(e) => {
                self.projection = None;
                self.status = e.to_string();
            }
        }
    }

    fn set_window(&mut self, window: SelectedWindow) {
        self.window = window;
        self.session.set_period(window);
        self.reproject();
        self.status = window.label().to_string();
    }

    fn draw_count(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.series.len())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("eed", Style::default().fg(Color::Cyan)),
            Span::raw(" — Express Entry draws (IRCC rounds feed)"),
        ]));

        let in_window = self.projection.as_ref().map_or(0, Projection::len);
        let latest = self
            .data
            .as_ref()
            .and_then(|d| d.series.last())
            .map(|r| r.date.to_string())
            .unwrap_or_else(|| "-".to_string());

        lines.push(Line::from(Span::styled(
            format!(
                "period: {} | draws: {} total, {in_window} in window | latest: {latest}",
                self.window.label(),
                self.draw_count(),
            ),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!("link: {}", self.session.href()),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_details(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("CRS Score Trend Over Time")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let projection = match &self.projection {
            Some(p) if !p.is_empty() => p,
            _ => {
                let msg = Paragraph::new("Waiting for data...")
                    .style(Style::default().fg(Color::Yellow))
                    .block(Block::default());
                frame.render_widget(msg, inner);
                return;
            }
        };

        let (scores, sizes, x_bounds, score_bounds, size_bounds) = chart_series(projection);

        let (chart_rect, insets) = chart_layout(inner);
        let widget = DrawPlottersChart {
            scores: &scores,
            sizes: &sizes,
            cursor: Some(self.cursor as f64),
            x_bounds,
            score_bounds,
            size_bounds,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(
                frame,
                inner,
                chart_rect,
                insets,
                projection,
                score_bounds,
                size_bounds,
            );
        }
    }

    fn draw_details(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Selected draw").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(projection) = &self.projection else {
            return;
        };
        let (Some(data), Some(&date)) = (&self.data, projection.labels.get(self.cursor)) else {
            return;
        };

        let mut lines: Vec<Line> = Vec::new();
        match report::resolve_tooltip_label(date, &data.by_date) {
            Ok(caption) => {
                lines.push(Line::from(Span::styled(
                    caption,
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(format!(
                    "{date} | CRS {} | {} invitations | draw {} of {} in window",
                    projection.scores[self.cursor],
                    crate::report::format::group_thousands(projection.sizes[self.cursor]),
                    self.cursor + 1,
                    projection.len(),
                )));
            }
            Err(e) => {
                // Broken ingest invariant; show it, in red, instead of a
                // blank caption.
                lines.push(Line::from(Span::styled(
                    e.to_string(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
            }
        }

        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ window  1-4 period  ↑/↓ draw  r refetch  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build chart series for Plotters. X positions are indices into the windowed
/// projection; the three input vectors are index-aligned by construction.
fn chart_series(
    projection: &Projection,
) -> (
    Vec<(f64, f64)>,
    Vec<(f64, f64)>,
    [f64; 2],
    [f64; 2],
    [f64; 2],
) {
    let n = projection.len();
    let x_bounds = [-0.5, n as f64 - 0.5];

    let scores: Vec<(f64, f64)> = projection
        .scores
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64, f64::from(s)))
        .collect();
    let sizes: Vec<(f64, f64)> = projection
        .sizes
        .iter()
        .enumerate()
        .map(|(i, &z)| (i as f64, f64::from(z)))
        .collect();

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in &scores {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.1).max(1.0);
    let score_bounds = [y_min - pad, y_max + pad];

    let z_max = sizes.iter().map(|&(_, z)| z).fold(0.0_f64, f64::max);
    let size_bounds = [0.0, (z_max * 1.05).max(1.0)];

    (scores, sizes, x_bounds, score_bounds, size_bounds)
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 8,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

/// Tick labels in plain terminal cells: dates along the bottom, CRS scores on
/// the left axis, invitation counts on the right (secondary) axis.
fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    projection: &Projection,
    score_bounds: [f64; 2],
    size_bounds: [f64; 2],
) {
    let style = Style::default().fg(Color::Gray);
    let n = projection.len();

    let x_ticks = 3usize.min(n);
    for i in 0..x_ticks {
        let u = if x_ticks == 1 {
            0.0
        } else {
            i as f64 / (x_ticks as f64 - 1.0)
        };
        let label = projection.labels[((n - 1) as f64 * u).round() as usize].to_string();
        let label_len = label.len() as u16;
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let start = x
            .saturating_sub((label.len() / 2) as u16)
            .clamp(inner.x, (inner.x + inner.width).saturating_sub(label_len));
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let y_ticks = 5usize;
    for i in 0..y_ticks {
        let u = i as f64 / (y_ticks as f64 - 1.0);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;

        // Left: CRS score.
        let score = score_bounds[0] + u * (score_bounds[1] - score_bounds[0]);
        let label = format!("{score:.0}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        if let Some(start) = x.checked_sub(label_len).filter(|s| *s >= inner.x) {
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
        }

        // Right: invitations.
        let size = size_bounds[0] + u * (size_bounds[1] - size_bounds[0]);
        let label = format!("{size:.0}");
        let label_len = label.len() as u16;
        let start = chart.x + chart.width + 1;
        if start + label_len <= inner.x + inner.width {
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
        }
    }

    let x_label = Paragraph::new("draw date")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new("crs")
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);

    let z_label = Paragraph::new("size")
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let z_rect = Rect {
        x: chart.x + chart.width + 1,
        y: inner.y,
        width: insets.right.saturating_sub(1).min(4),
        height: 1,
    };
    if z_rect.x + z_rect.width <= inner.x + inner.width {
        frame.render_widget(z_label, z_rect);
    }
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
    fn chart_series_stays_index_aligned() {
        let p = projection(vec![500, 510, 520], vec![1000, 2000, 3000]);
        let (scores, sizes, x_bounds, score_bounds, size_bounds) = chart_series(&p);
        assert_eq!(scores.len(), 3);
        assert_eq!(sizes.len(), 3);
        assert_eq!(scores[1], (1.0, 510.0));
        assert_eq!(sizes[2], (2.0, 3000.0));
        assert_eq!(x_bounds, [-0.5, 2.5]);
        assert!(score_bounds[0] < 500.0 && score_bounds[1] > 520.0);
        assert!(size_bounds[0] == 0.0 && size_bounds[1] >= 3000.0);
    }

    #[test]
    fn single_draw_series_has_valid_bounds() {
        let p = projection(vec![500], vec![0]);
        let (_, _, x_bounds, score_bounds, size_bounds) = chart_series(&p);
        assert!(x_bounds[1] > x_bounds[0]);
        assert!(score_bounds[1] > score_bounds[0]);
        assert!(size_bounds[1] > size_bounds[0]);
    }

    #[test]
    fn chart_widget_renders_into_buffer() {
        use ratatui::buffer::Buffer;
        use ratatui::widgets::Widget;

        let p = projection(vec![500, 510, 520], vec![1000, 2000, 3000]);
        let (scores, sizes, x_bounds, score_bounds, size_bounds) = chart_series(&p);
        let widget = DrawPlottersChart {
            scores: &scores,
            sizes: &sizes,
            cursor: Some(2.0),
            x_bounds,
            score_bounds,
            size_bounds,
        };

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        // The line, bars, and axes must have put something into the buffer.
        let drawn = buf
            .content()
            .iter()
            .any(|cell| !cell.symbol().trim().is_empty());
        assert!(drawn, "chart render left the buffer blank");
    }

    #[test]
    fn tiny_areas_skip_manual_ticks() {
        let inner = Rect::new(0, 0, 20, 6);
        let (rect, insets) = chart_layout(inner);
        assert_eq!(rect, inner);
        assert!(insets.is_none());
    }
}
