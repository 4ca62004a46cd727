//! Scatter plot of BMC vs AI4BMC total time, one series per solver.

use std::collections::HashSet;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::errors::{Result, StatsError};
use crate::model::Solver;
use crate::pipeline::SolverRun;

/// Points are `(BMC, AI4BMC)` total seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub solver: Solver,
    pub points: Vec<(f64, f64)>,
}

const SIZE: (u32, u32) = (1500, 1200);
const POINT_SIZE: i32 = 7;
const GRID_GRAY: RGBColor = RGBColor(160, 160, 160);
/// Dash and gap length of grid lines, in pixels.
const DASH: i32 = 12;
const DASH_GAP: i32 = 8;

/// Tick positions, as fractions of the timeout in ninths.
const TICK_NINTHS: [f64; 6] = [0.0, 1.0, 3.0, 5.0, 7.0, 9.0];

/// Builds one series per run over the cases joined for every solver, so each
/// benchmark contributes one point per solver.
pub fn comparison_series(runs: &[SolverRun]) -> Vec<PlotSeries> {
    let mut common: Option<HashSet<&str>> = None;
    for run in runs {
        let names: HashSet<&str> = run.joined.iter().map(|c| c.job_name.as_str()).collect();
        common = Some(match common {
            None => names,
            Some(prev) => prev.intersection(&names).copied().collect(),
        });
    }
    let common = common.unwrap_or_default();

    runs.iter()
        .map(|run| PlotSeries {
            solver: run.solver,
            points: run
                .joined
                .iter()
                .filter(|c| common.contains(c.job_name.as_str()))
                .map(|c| (c.baseline.total_time, c.augmented.total_time))
                .collect(),
        })
        .collect()
}

pub fn tick_positions(timeout: f64) -> Vec<f64> {
    TICK_NINTHS.iter().map(|k| k * timeout / 9.0).collect()
}

/// Renders the plot to `path` (PNG). The parent directory is created if
/// needed; any failure is a [`StatsError::WriteError`].
pub fn scatter_total_times(path: &Path, series: &[PlotSeries], timeout: f64) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StatsError::write(path, e))?;
    }
    draw(path, series, timeout).map_err(|e| StatsError::write(path, e))?;
    tracing::info!(
        event = "plot_written",
        path = %path.display(),
        series = series.len(),
        points = series.iter().map(|s| s.points.len()).sum::<usize>()
    );
    Ok(())
}

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

fn draw(path: &Path, series: &[PlotSeries], timeout: f64) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    draw_on(&root, series, timeout)?;
    root.present()?;
    Ok(())
}

fn draw_on<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[PlotSeries],
    timeout: f64,
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let pad = timeout * 0.009;
    let mut builder = ChartBuilder::on(root);
    builder.margin(30);
    #[cfg(feature = "labels")]
    builder.x_label_area_size(90).y_label_area_size(110);
    let mut chart = builder.build_cartesian_2d(-pad..timeout + pad, -pad..timeout + pad)?;

    #[cfg(feature = "labels")]
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(TICK_NINTHS.len())
        .y_labels(TICK_NINTHS.len())
        .x_desc("BMC (seconds)")
        .y_desc("AI4BMC (seconds)")
        .label_style(("sans-serif", 28))
        .axis_desc_style(("sans-serif", 36))
        .draw()?;

    let grid = GRID_GRAY.stroke_width(1);
    for t in tick_positions(timeout) {
        if t > 0.0 && t < timeout {
            for line in [vec![(t, 0.0), (t, timeout)], vec![(0.0, t), (timeout, t)]] {
                chart.draw_series(DashedLineSeries::new(line, DASH, DASH_GAP, grid))?;
            }
        }
    }

    // Axes at zero and the timeout bound on both sides.
    let bound = BLACK.mix(0.7);
    for line in [
        vec![(0.0, 0.0), (timeout, 0.0)],
        vec![(0.0, 0.0), (0.0, timeout)],
        vec![(timeout, 0.0), (timeout, timeout)],
        vec![(0.0, timeout), (timeout, timeout)],
    ] {
        chart.draw_series(std::iter::once(PathElement::new(line, bound.stroke_width(2))))?;
    }

    // Above the diagonal AI4BMC is slower than BMC.
    chart.draw_series(LineSeries::new(
        vec![(0.0, 0.0), (timeout, timeout)],
        RED.stroke_width(2),
    ))?;

    for s in series {
        match s.solver {
            Solver::Z3 => {
                let color = BLUE.mix(0.8);
                let anno = chart.draw_series(
                    s.points
                        .iter()
                        .map(|&p| Circle::new(p, POINT_SIZE, color.filled())),
                )?;
                #[cfg(feature = "labels")]
                anno.label(s.solver.name())
                    .legend(move |(x, y)| Circle::new((x, y), POINT_SIZE, color.filled()));
                #[cfg(not(feature = "labels"))]
                let _ = anno;
            }
            Solver::Yices2 => {
                let color = GREEN.mix(0.8);
                let anno = chart.draw_series(
                    s.points
                        .iter()
                        .map(|&p| Cross::new(p, POINT_SIZE, color.stroke_width(2))),
                )?;
                #[cfg(feature = "labels")]
                anno.label(s.solver.name())
                    .legend(move |(x, y)| Cross::new((x, y), POINT_SIZE, color.stroke_width(2)));
                #[cfg(not(feature = "labels"))]
                let _ = anno;
            }
        }
    }

    #[cfg(feature = "labels")]
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .label_font(("sans-serif", 20))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
