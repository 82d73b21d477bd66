//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - running balance: `-` line
//! - days with a published rate: `o`

use crate::domain::DailyBalance;

/// Render the running-balance chart for a computed trajectory.
pub fn render_balance_plot(trajectory: &[DailyBalance], width: usize, height: usize) -> String {
    if trajectory.len() < 2 {
        return "Plot: range too short to draw.\n".to_string();
    }

    let width = width.max(10);
    let height = height.max(5);
    let n = trajectory.len();

    let (y_min, y_max) = balance_range(trajectory);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Balance line first (so rate-day markers can overlay).
    let mut prev = None;
    for (i, day) in trajectory.iter().enumerate() {
        let x = map_x(i, n, width);
        let y = map_y(day.balance, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(&mut grid, x0, y0, x, y, '-');
        } else {
            grid[y][x] = '-';
        }
        prev = Some((x, y));
    }

    for (i, day) in trajectory.iter().enumerate() {
        if day.rate.is_some() {
            let x = map_x(i, n, width);
            let y = map_y(day.balance, y_min, y_max, height);
            grid[y][x] = 'o';
        }
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} → {} | balance=[{y_min:.2}, {y_max:.2}] R$\n",
        trajectory[0].date,
        trajectory[n - 1].date
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn balance_range(trajectory: &[DailyBalance]) -> (f64, f64) {
    let mut min_b = f64::INFINITY;
    let mut max_b = f64::NEG_INFINITY;
    for day in trajectory {
        min_b = min_b.min(day.balance);
        max_b = max_b.max(day.balance);
    }
    if min_b.is_finite() && max_b.is_finite() {
        (min_b, max_b)
    } else {
        (0.0, 1.0)
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    let u = i as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(b: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((b - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let trajectory = vec![
            DailyBalance {
                date: date(1),
                rate: None,
                balance: 100.0,
            },
            DailyBalance {
                date: date(2),
                rate: Some(10.0),
                balance: 110.0,
            },
            DailyBalance {
                date: date(3),
                rate: None,
                balance: 110.0,
            },
        ];

        let txt = render_balance_plot(&trajectory, 10, 5);
        let expected = concat!(
            "Plot: 2023-01-01 → 2023-01-03 | balance=[99.50, 110.50] R$\n",
            "     o----\n",
            "    -     \n",
            "  --      \n",
            " -        \n",
            "-         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn single_day_range_degrades_gracefully() {
        let trajectory = vec![DailyBalance {
            date: date(1),
            rate: None,
            balance: 100.0,
        }];
        assert_eq!(
            render_balance_plot(&trajectory, 80, 15),
            "Plot: range too short to draw.\n"
        );
    }
}
