//! Plotters-powered load chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`,
//! which gives nicer axis + mesh rendering than Ratatui's built-in `Chart`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Colour role of a line series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Main series (load, mean).
    Primary,
    /// Upper envelope or trend.
    Secondary,
    /// Lower envelope.
    Tertiary,
}

impl LineKind {
    fn color(self) -> RGBColor {
        match self {
            LineKind::Primary => RGBColor(0, 255, 255),
            LineKind::Secondary => RGBColor(255, 170, 0),
            LineKind::Tertiary => RGBColor(120, 160, 255),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    pub points: Vec<(f64, f64)>,
    pub kind: LineKind,
}

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct LoadPlottersChart<'a> {
    pub lines: &'a [ChartLine],
    /// Scatter series (white dots).
    pub points: &'a [(f64, f64)],
    /// Highlighted scatter (peak hours, holidays), drawn last.
    pub highlights: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl Widget for LoadPlottersChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for line in self.lines {
                let color = line.kind.color();
                chart.draw_series(LineSeries::new(line.points.iter().copied(), &color))?;
            }

            chart.draw_series(self.points.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;

            // `Circle` radii are mis-scaled by the ratatui backend; plain pixels
            // render as clean dots.
            let highlight = RGBColor(255, 0, 0);
            chart.draw_series(self.highlights.iter().map(|&(x, y)| Pixel::new((x, y), highlight)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
