//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed hours: `o` (`P` for peak hours)
//! - quadratic temperature trend: `-` line

use crate::models::is_peak_hour;
use crate::report::{HourlyPoint, TemperatureTrend};

/// One day's load by hour of day.
pub fn render_hourly_profile(points: &[HourlyPoint], width: usize, height: usize) -> String {
    let marks: Vec<(f64, f64, char)> = points
        .iter()
        .map(|p| (p.hour as f64, p.load_mw, if is_peak_hour(p.hour) { 'P' } else { 'o' }))
        .collect();
    let header = |x0: f64, x1: f64, y0: f64, y1: f64| {
        format!("Load by hour: hour=[{x0:.0}, {x1:.0}] | load=[{y0:.1}, {y1:.1}] MW\n")
    };
    render_plot(&marks, None, (0.0, 23.0), width, height, header)
}

/// Load against temperature for one day, with the fitted trend if any.
pub fn render_temperature_plot(
    points: &[HourlyPoint],
    trend: Option<&TemperatureTrend>,
    width: usize,
    height: usize,
) -> String {
    let marks: Vec<(f64, f64, char)> = points
        .iter()
        .map(|p| (p.temperature_c, p.load_mw, if is_peak_hour(p.hour) { 'P' } else { 'o' }))
        .collect();
    let (t_min, t_max) = x_range(&marks).unwrap_or((0.0, 1.0));
    let curve = trend.map(|tr| sample_trend(tr, t_min, t_max, width.max(2)));
    let header = |x0: f64, x1: f64, y0: f64, y1: f64| {
        format!("Load vs temperature: temp=[{x0:.1}, {x1:.1}] C | load=[{y0:.1}, {y1:.1}] MW\n")
    };
    render_plot(&marks, curve.as_deref(), (t_min, t_max), width, height, header)
}

fn render_plot(
    marks: &[(f64, f64, char)],
    curve_points: Option<&[(f64, f64)]>,
    (x_min, x_max): (f64, f64),
    width: usize,
    height: usize,
    header: impl Fn(f64, f64, f64, f64) -> String,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(marks, curve_points).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first so points overlay it.
    if let Some(curve) = curve_points {
        draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);
    }

    for &(x, y, ch) in marks {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = ch;
    }

    let mut out = header(x_min, x_max, y_min, y_max);
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

fn x_range(marks: &[(f64, f64, char)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _, _) in marks {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn sample_trend(trend: &TemperatureTrend, t_min: f64, t_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let t = t_min + u * (t_max - t_min);
            (t, trend.predict(t))
        })
        .collect()
}

fn y_range(marks: &[(f64, f64, char)], curve: Option<&[(f64, f64)]>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y, _) in marks {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if let Some(curve) = curve {
        for &(_, y) in curve {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
