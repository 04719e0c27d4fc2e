use std::time::Instant;

use ratatui::layout::Rect;
use trendboard_core::animation::{advance_ticker_offset, AnimationMode};
use trendboard_core::widgets::{CellMeasure, ChartOptions, ChartSlot, Placement};
use trendboard_core::{DashboardView, TrendsSnapshot};

use crate::config::AppConfig;
use crate::loader::load_snapshot;
use crate::ui::layout::DashboardLayout;
use crate::ui::widgets::ticker::sequence_width;

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub config: AppConfig,
    /// `None` until a snapshot has loaded. A failed reload keeps the last view.
    pub view: Option<DashboardView>,
    pub chart_slot: ChartSlot,
    pub chart_rendered_at: Instant,
    pub cloud_placements: Vec<Placement>,
    pub cloud_area: Rect,
    pub ticker_offset: f64,
    pub ticker_last_tick: Option<f64>,
    pub ticker_mode: AnimationMode,
    pub show_help: bool,
    pub status_message: String,
    pub layout: Option<DashboardLayout>,
    pending_render: bool,
    started: Instant,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            running: true,
            config,
            view: None,
            chart_slot: ChartSlot::new(),
            chart_rendered_at: Instant::now(),
            cloud_placements: Vec::new(),
            cloud_area: Rect::default(),
            ticker_offset: 0.0,
            ticker_last_tick: None,
            ticker_mode: AnimationMode::Running,
            show_help: false,
            status_message: String::new(),
            layout: None,
            pending_render: false,
            started: Instant::now(),
        }
    }

    /// Loads the snapshot and re-renders every widget. A failure is logged
    /// once and leaves whatever is on screen untouched.
    pub async fn reload(&mut self) {
        match load_snapshot(&self.config.data_path).await {
            Ok(snapshot) => {
                self.apply_snapshot(&snapshot);
                self.status_message = format!(
                    "Loaded {} keywords from {}",
                    snapshot.keyword_frequencies.len(),
                    self.config.data_path.display()
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load trends snapshot");
            }
        }
    }

    /// Builds the view for `snapshot`. Cloud placement and the chart need the
    /// container size, so they are rendered on the next [`Self::sync_layout`].
    pub fn apply_snapshot(&mut self, snapshot: &TrendsSnapshot) {
        self.view = Some(DashboardView::build(snapshot, &self.config.dashboard));
        self.ticker_offset = 0.0;
        self.pending_render = true;
        if let Some(layout) = self.layout {
            self.render_sized_widgets(&layout);
        }
    }

    /// Records the layout for a frame of `area`. Pending renders run here, and
    /// a changed layout re-runs the cloud and re-syncs the card heights.
    pub fn sync_layout(&mut self, area: Rect) {
        let layout = DashboardLayout::new(area);
        let changed = self.layout != Some(layout);
        self.layout = Some(layout);

        if self.pending_render {
            self.render_sized_widgets(&layout);
        } else if changed {
            tracing::debug!(width = area.width, height = area.height, "layout changed");
            self.layout_cloud(&layout);
        }
    }

    fn render_sized_widgets(&mut self, layout: &DashboardLayout) {
        self.pending_render = false;
        self.layout_cloud(layout);
        self.render_chart(layout);
    }

    fn layout_cloud(&mut self, layout: &DashboardLayout) {
        let Some(view) = &self.view else {
            return;
        };

        let area = layout.cloud_canvas();
        let cloud = &self.config.dashboard.cloud;
        let measure = CellMeasure::default();

        self.cloud_placements = measure.layout(area.width, area.height, cloud).place(
            &view.cloud_words,
            &measure,
            &cloud.palette,
            &mut rand::thread_rng(),
        );
        self.cloud_area = area;
        tracing::debug!(
            words = view.cloud_words.len(),
            placed = self.cloud_placements.len(),
            "laid out word cloud"
        );
    }

    fn render_chart(&mut self, layout: &DashboardLayout) {
        let Some(view) = &self.view else {
            return;
        };

        let velocity = &self.config.dashboard.velocity;
        let options = ChartOptions {
            height: CellMeasure::default().rows(f64::from(velocity.height)),
            ..ChartOptions::from(velocity)
        };
        let chart = self
            .chart_slot
            .render(view.velocity.clone(), options, layout.velocity_canvas().width);
        tracing::debug!(chart = chart.id(), bars = chart.bars().len(), "rendered velocity chart");
        self.chart_rendered_at = Instant::now();
    }

    /// Seconds since the current chart was created.
    pub fn chart_elapsed(&self) -> f64 {
        self.chart_rendered_at.elapsed().as_secs_f64()
    }

    pub fn update(&mut self) {
        let Some(view) = &self.view else {
            return;
        };

        let wrap_width = f64::from(sequence_width(&view.ticker));
        let now = self.started.elapsed().as_secs_f64();
        (self.ticker_offset, self.ticker_last_tick) = advance_ticker_offset(
            self.ticker_offset,
            self.ticker_last_tick,
            now,
            self.ticker_mode,
            wrap_width,
        );
    }

    pub fn toggle_ticker(&mut self) {
        self.ticker_mode = self.ticker_mode.toggled();
        self.status_message = match self.ticker_mode {
            AnimationMode::Running => "Ticker running".to_string(),
            AnimationMode::Paused => "Ticker paused".to_string(),
        };
    }
}
