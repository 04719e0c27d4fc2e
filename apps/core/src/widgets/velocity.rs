//! Keyword velocity bars and the chart handle that owns them.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use crate::config::{HexColor, VelocityConfig};
use crate::snapshot::KeywordVelocity;

/// Seconds an animated chart takes to grow its bars to full height.
pub const CHART_ANIMATION_SECONDS: f64 = 0.6;

/// Cells between neighbouring bars on a character grid.
pub const BAR_GAP: u16 = 1;
pub const MAX_BAR_WIDTH: u16 = 8;

/// Widest bars that fit `count` bars and their gaps into `width` cells.
pub fn bar_width(width: u16, count: usize) -> u16 {
    let Ok(count) = u16::try_from(count) else {
        return 1;
    };
    if count == 0 {
        return MAX_BAR_WIDTH;
    }
    (width.saturating_add(BAR_GAP) / count)
        .saturating_sub(BAR_GAP)
        .clamp(1, MAX_BAR_WIDTH)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VelocityBar {
    pub label: String,
    pub delta: i64,
    pub color: HexColor,
}

impl VelocityBar {
    pub const fn is_rising(&self) -> bool {
        self.delta >= 0
    }

    /// Signed value as shown next to the series label.
    pub fn value_label(&self) -> String {
        format!("{:+}", self.delta)
    }

    /// Bar length at `progress` of full height. Bars grow from the axis by
    /// magnitude; the sign shows in the color and the value label.
    pub fn scaled(&self, progress: f64) -> u64 {
        (self.delta.unsigned_abs() as f64 * progress).round() as u64
    }
}

/// The first `limit` velocity entries, colored by the sign of their delta.
/// A delta of zero counts as rising.
pub fn velocity_bars(velocity: &[KeywordVelocity], config: &VelocityConfig) -> Vec<VelocityBar> {
    velocity
        .iter()
        .take(config.limit)
        .map(|entry| VelocityBar {
            label: entry.keyword.clone(),
            delta: entry.delta,
            color: if entry.delta >= 0 {
                config.positive_color
            } else {
                config.negative_color
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartOptions {
    pub animation: bool,
    pub responsive: bool,
    /// In the drawing surface's units: pixels for SVG, rows on a terminal.
    pub height: u16,
    pub label: String,
}

impl From<&VelocityConfig> for ChartOptions {
    fn from(config: &VelocityConfig) -> Self {
        Self {
            animation: config.animation,
            responsive: config.responsive,
            height: config.height,
            label: config.label.clone(),
        }
    }
}

/// A live chart. Created only through [`ChartSlot::render`]; dropping or
/// destroying it releases its slot.
#[derive(Debug)]
pub struct VelocityChart {
    id: u64,
    bars: Vec<VelocityBar>,
    options: ChartOptions,
    width: u16,
    live: Rc<Cell<usize>>,
}

impl VelocityChart {
    pub const fn id(&self) -> u64 {
        self.id
    }

    pub fn bars(&self) -> &[VelocityBar] {
        &self.bars
    }

    pub const fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Largest bar magnitude, never below 1 so an all-zero chart has a scale.
    pub fn max_magnitude(&self) -> u64 {
        self.bars
            .iter()
            .map(|bar| bar.delta.unsigned_abs())
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Size to draw at. A non-responsive chart keeps the width it was
    /// created with and its configured height, clipped to what is available.
    pub fn viewport(&self, available_width: u16, available_height: u16) -> (u16, u16) {
        if self.options.responsive {
            (available_width, available_height)
        } else {
            (
                self.width.min(available_width),
                self.options.height.min(available_height),
            )
        }
    }

    /// Fraction of full bar height to draw `elapsed` seconds after creation.
    pub fn progress(&self, elapsed: f64) -> f64 {
        if !self.options.animation {
            return 1.0;
        }
        (elapsed / CHART_ANIMATION_SECONDS).clamp(0.0, 1.0)
    }

    pub fn destroy(self) {}
}

impl Drop for VelocityChart {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

/// Owner of the chart bound to one drawing surface.
#[derive(Debug, Default)]
pub struct ChartSlot {
    chart: Option<VelocityChart>,
    next_id: u64,
    live: Rc<Cell<usize>>,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispose the current chart, then create a new one for `bars` at the
    /// surface's current width.
    pub fn render(
        &mut self,
        bars: Vec<VelocityBar>,
        options: ChartOptions,
        width: u16,
    ) -> &VelocityChart {
        self.dispose();

        self.next_id += 1;
        self.live.set(self.live.get() + 1);
        self.chart.insert(VelocityChart {
            id: self.next_id,
            bars,
            options,
            width,
            live: Rc::clone(&self.live),
        })
    }

    pub fn dispose(&mut self) {
        if let Some(chart) = self.chart.take() {
            chart.destroy();
        }
    }

    pub const fn current(&self) -> Option<&VelocityChart> {
        self.chart.as_ref()
    }

    pub fn live_instances(&self) -> usize {
        self.live.get()
    }
}
