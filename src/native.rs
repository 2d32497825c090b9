//! Native front-end: tokio timers, console board, SVG charts.

use crate::dashboard::Dashboard;
use crate::display::{Board, ChangeDirection, DisplaySurface};
use crate::domain::history::{ChartSeries, ChartSink};
use crate::domain::status::ConnectionStatus;
use crate::error::ChartError;
use crate::pipeline::{PriceSource, UpdatePipeline};
use crate::refresh::Scheduler;
use crate::shared::fmt::format_axis_price;
use crate::shared::{Asset, SecondaryMetric};

use plotters::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Dashboard driven by tokio timers.
pub type NativeDashboard<P, D, K> = Dashboard<P, D, K, TokioScheduler<P, D, K>>;

/// Wire a pipeline to a [`TokioScheduler`] firing cycles on it.
pub fn dashboard<P, D, K>(pipeline: UpdatePipeline<P, D, K>) -> NativeDashboard<P, D, K>
where
    P: PriceSource + Send + Sync + 'static,
    D: DisplaySurface + Send + 'static,
    K: ChartSink + Send + 'static,
{
    let scheduler = TokioScheduler::new(pipeline.clone());
    Dashboard::new(pipeline, scheduler)
}

// ─── Scheduler ───────────────────────────────────────────────────────────────

/// Aborts the wrapped task when dropped.
#[derive(Debug)]
pub struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Spawns each cycle as its own task, so a slow cycle never delays the timer.
/// Must be used from inside a tokio runtime.
pub struct TokioScheduler<P, D, K> {
    pipeline: UpdatePipeline<P, D, K>,
}

impl<P, D, K> TokioScheduler<P, D, K>
where
    P: PriceSource + Send + Sync + 'static,
    D: DisplaySurface + Send + 'static,
    K: ChartSink + Send + 'static,
{
    pub fn new(pipeline: UpdatePipeline<P, D, K>) -> Self {
        Self { pipeline }
    }

    fn spawn_cycle(pipeline: UpdatePipeline<P, D, K>) {
        tokio::spawn(async move {
            // Failures are already logged and shown by the pipeline.
            let _ = pipeline.run_cycle().await;
        });
    }
}

impl<P, D, K> Scheduler for TokioScheduler<P, D, K>
where
    P: PriceSource + Send + Sync + 'static,
    D: DisplaySurface + Send + 'static,
    K: ChartSink + Send + 'static,
{
    type Timer = AbortOnDrop;

    fn start_timer(&self, period: Duration) -> AbortOnDrop {
        let pipeline = self.pipeline.clone();
        AbortOnDrop(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.reset(); // skip immediate first tick
            loop {
                ticker.tick().await;
                Self::spawn_cycle(pipeline.clone());
            }
        }))
    }

    fn trigger_now(&self) {
        Self::spawn_cycle(self.pipeline.clone());
    }
}

// ─── Console board ───────────────────────────────────────────────────────────

/// [`Board`] that prints itself after every completed or failed cycle.
#[derive(Debug, Default)]
pub struct ConsoleBoard {
    board: Board,
}

impl ConsoleBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl DisplaySurface for ConsoleBoard {
    fn set_price(&mut self, asset: Asset, text: &str) {
        self.board.set_price(asset, text);
    }

    fn set_change(&mut self, asset: Asset, text: &str, direction: ChangeDirection) {
        self.board.set_change(asset, text, direction);
    }

    fn set_secondary(&mut self, asset: Asset, metric: SecondaryMetric, text: &str) {
        self.board.set_secondary(asset, metric, text);
    }

    fn set_card_error(&mut self, asset: Asset, errored: bool) {
        self.board.set_card_error(asset, errored);
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.board.set_status(status);
    }

    fn set_last_update(&mut self, text: &str) {
        self.board.set_last_update(text);
        println!("{}\n", self.board.render());
    }

    fn show_error(&mut self, message: &str) {
        self.board.show_error(message);
        eprintln!("{}\n", message);
    }
}

// ─── SVG charts ──────────────────────────────────────────────────────────────

const CHART_SIZE: (u32, u32) = (800, 300);

fn line_color(asset: Asset) -> RGBColor {
    match asset {
        Asset::Btc => RGBColor(245, 158, 11),
        Asset::Sp500 => RGBColor(59, 130, 246),
    }
}

/// Writes each redrawn chart to `<dir>/<asset>-chart.svg`.
#[derive(Debug, Clone)]
pub struct SvgChartSink {
    dir: PathBuf,
}

impl SvgChartSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ChartError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| ChartError::Render(format!("cannot create {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, asset: Asset) -> PathBuf {
        self.dir.join(format!("{}-chart.svg", asset.as_str()))
    }

    fn draw(path: &Path, asset: Asset, series: &ChartSeries) -> Result<(), String> {
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| format!("Failed to fill canvas: {}", e))?;

        let (min, max) = series.bounds().unwrap_or((0.0, 1.0));
        let padding = ((max - min) * 0.05).max(1e-8);
        let y_range = (min - padding)..(max + padding);
        let x_range = 0usize..series.len().saturating_sub(1).max(1);

        let labels = series.labels();
        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} ({})", asset.name(), asset.symbol()),
                ("sans-serif", 20).into_font(),
            )
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range, y_range)
            .map_err(|e| format!("Failed to build chart: {}", e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(8)
            .x_label_formatter(&|i| labels.get(*i).cloned().unwrap_or_default())
            .y_label_formatter(&|v| format_axis_price(*v))
            .draw()
            .map_err(|e| format!("Failed to draw mesh: {}", e))?;

        chart
            .draw_series(LineSeries::new(
                series
                    .values()
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| !v.is_nan())
                    .map(|(i, v)| (i, *v)),
                line_color(asset).stroke_width(2),
            ))
            .map_err(|e| format!("Failed to draw line: {}", e))?;

        root.present()
            .map_err(|e| format!("Failed to render chart: {}", e))?;
        Ok(())
    }
}

impl ChartSink for SvgChartSink {
    fn redraw(&mut self, asset: Asset, series: &ChartSeries) -> Result<(), ChartError> {
        let path = self.path_for(asset);
        Self::draw(&path, asset, series).map_err(ChartError::Render)?;
        tracing::debug!(%asset, points = series.len(), "Chart written to {}", path.display());
        Ok(())
    }
}
