//! Word cloud sizing and layout.
//!
//! Words are placed largest first. Each one starts near the middle of the
//! container and walks outward along an Archimedean spiral until its box fits
//! inside the container without touching any word already placed. Words that
//! never find a spot are dropped.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::config::{CloudConfig, HexColor};
use crate::snapshot::KeywordFrequency;

/// Spiral angle advanced per step, in radians.
const SPIRAL_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudWord {
    pub text: String,
    pub size: f64,
}

/// `base_size + sqrt(count) * scale`; dampens long-tailed distributions.
pub fn font_size(count: u64, config: &CloudConfig) -> f64 {
    (count as f64).sqrt().mul_add(config.scale, config.base_size)
}

pub fn cloud_words(frequencies: &[KeywordFrequency], config: &CloudConfig) -> Vec<CloudWord> {
    frequencies
        .iter()
        .take(config.limit)
        .map(|frequency| CloudWord {
            text: frequency.word.clone(),
            size: font_size(frequency.count, config),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rotation {
    Horizontal,
    Vertical,
}

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 90,
        }
    }
}

/// Measures the box a word occupies once drawn, already rotated.
pub trait TextMeasure {
    fn measure(&self, text: &str, size: f64, rotation: Rotation) -> (f64, f64);
}

/// Proportional-font estimate used for SVG output.
#[derive(Debug, Clone, Copy)]
pub struct GlyphMeasure {
    /// Average glyph advance as a fraction of the font size.
    pub advance: f64,
}

impl Default for GlyphMeasure {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for GlyphMeasure {
    fn measure(&self, text: &str, size: f64, rotation: Rotation) -> (f64, f64) {
        let length = text.chars().count() as f64 * size * self.advance;
        match rotation {
            Rotation::Horizontal => (length, size),
            Rotation::Vertical => (size, length),
        }
    }
}

/// Fixed-size character cells, as on a terminal grid.
///
/// Every glyph takes a whole cell however large its font size, so a measured
/// box is never smaller than the cells its text covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasure {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for CellMeasure {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

impl TextMeasure for CellMeasure {
    fn measure(&self, text: &str, size: f64, rotation: Rotation) -> (f64, f64) {
        let chars = text.chars().count() as f64;
        let (width, height) = GlyphMeasure::default().measure(text, size, rotation);
        match rotation {
            Rotation::Horizontal => (
                width.max(chars * self.cell_width),
                height.max(self.cell_height),
            ),
            Rotation::Vertical => (
                width.max(self.cell_width),
                height.max(chars * self.cell_height),
            ),
        }
    }
}

impl CellMeasure {
    /// Layout in pixels for a `columns` by `rows` grid. Padding is at least
    /// one cell wide so no two words share a cell.
    pub fn layout(&self, columns: u16, rows: u16, config: &CloudConfig) -> CloudLayout {
        let mut layout = CloudLayout::new(
            f64::from(columns) * self.cell_width,
            f64::from(rows) * self.cell_height,
            config,
        );
        layout.padding = layout.padding.max(self.cell_width);
        layout
    }

    /// Rows covering `px` pixels of height.
    pub fn rows(&self, px: f64) -> u16 {
        (px / self.cell_height).ceil().max(0.0) as u16
    }

    /// Cell index for a pixel offset, `None` when it falls before the grid.
    /// Offsets a rounding error short of a cell edge count as on it.
    fn index(px: f64, cell: f64) -> Option<u16> {
        let index = (px / cell + 1e-9).floor();
        (index >= 0.0).then_some(index as u16)
    }

    /// The `(column, row, char)` cells `placement` covers on a `columns` by
    /// `rows` grid, clipped to it. Vertical words read top to bottom.
    pub fn cells(&self, placement: &Placement, columns: u16, rows: u16) -> Vec<(u16, u16, char)> {
        let center_x = placement.x + f64::from(columns) * self.cell_width / 2.0;
        let center_y = placement.y + f64::from(rows) * self.cell_height / 2.0;
        let chars: Vec<char> = placement.text.chars().collect();
        let length = chars.len() as f64;

        let (start_col, start_row, step) = match placement.rotation {
            Rotation::Horizontal => (
                Self::index(length.mul_add(-self.cell_width / 2.0, center_x), self.cell_width),
                Self::index(center_y, self.cell_height),
                (1, 0),
            ),
            Rotation::Vertical => (
                Self::index(center_x, self.cell_width),
                Self::index(length.mul_add(-self.cell_height / 2.0, center_y), self.cell_height),
                (0, 1),
            ),
        };
        let (Some(col), Some(row)) = (start_col, start_row) else {
            return Vec::new();
        };

        chars
            .into_iter()
            .enumerate()
            .filter_map(|(offset, ch)| {
                let offset = u16::try_from(offset).ok()?;
                let x = col.checked_add(offset * step.0)?;
                let y = row.checked_add(offset * step.1)?;
                (x < columns && y < rows).then_some((x, y, ch))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub text: String,
    pub size: f64,
    /// Center of the word relative to the container center.
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
    pub color: Option<HexColor>,
    /// Measured box, already rotated.
    pub width: f64,
    pub height: f64,
}

impl Placement {
    /// `(left, top, right, bottom)` relative to the container center.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        (self.x - half_w, self.y - half_h, self.x + half_w, self.y + half_h)
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Bounds {
    fn centered(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            left: x - width / 2.0,
            top: y - height / 2.0,
            right: x + width / 2.0,
            bottom: y + height / 2.0,
        }
    }

    fn collides(&self, other: &Self, gap: f64) -> bool {
        self.left - gap < other.right
            && other.left < self.right + gap
            && self.top - gap < other.bottom
            && other.top < self.bottom + gap
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CloudLayout {
    pub width: f64,
    pub height: f64,
    /// Minimum gap between two placed words.
    pub padding: f64,
    pub rotate_probability: f64,
}

impl CloudLayout {
    /// Layout for a container of the given rendered size. A container that
    /// reports no height falls back to the configured one.
    pub fn new(width: f64, height: f64, config: &CloudConfig) -> Self {
        let height = if height > 0.0 {
            height
        } else {
            config.fallback_height
        };
        Self {
            width: width.max(0.0),
            height,
            padding: config.padding,
            rotate_probability: config.rotate_probability,
        }
    }

    pub fn place<M, R>(
        &self,
        words: &[CloudWord],
        measure: &M,
        palette: &[HexColor],
        rng: &mut R,
    ) -> Vec<Placement>
    where
        M: TextMeasure + ?Sized,
        R: Rng + ?Sized,
    {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec::new();
        }

        let mut ordered: Vec<&CloudWord> = words.iter().collect();
        ordered.sort_by(|a, b| b.size.total_cmp(&a.size));

        let mut occupied: Vec<Bounds> = Vec::with_capacity(ordered.len());
        let mut placements = Vec::with_capacity(ordered.len());

        for word in ordered {
            let rotation = if rng.gen::<f64>() < self.rotate_probability {
                Rotation::Vertical
            } else {
                Rotation::Horizontal
            };
            let (width, height) = measure.measure(&word.text, word.size, rotation);
            if width > self.width || height > self.height {
                continue;
            }

            let start_x = (self.width * (rng.gen::<f64>() + 0.5) / 2.0).floor();
            let start_y = (self.height * (rng.gen::<f64>() + 0.5) / 2.0).floor();
            let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

            let Some(bounds) =
                self.find_spot(start_x, start_y, width, height, direction, &occupied)
            else {
                continue;
            };

            occupied.push(bounds);
            placements.push(Placement {
                text: word.text.clone(),
                size: word.size,
                x: (bounds.left + bounds.right) / 2.0 - self.width / 2.0,
                y: (bounds.top + bounds.bottom) / 2.0 - self.height / 2.0,
                rotation,
                color: palette.choose(rng).copied(),
                width,
                height,
            });
        }

        placements
    }

    fn find_spot(
        &self,
        start_x: f64,
        start_y: f64,
        width: f64,
        height: f64,
        direction: f64,
        occupied: &[Bounds],
    ) -> Option<Bounds> {
        let aspect = self.width / self.height;
        let max_delta = self.width.hypot(self.height);
        let mut t: f64 = 0.0;

        loop {
            let angle = t * SPIRAL_STEP;
            let dx = aspect * angle * angle.cos();
            let dy = angle * angle.sin();
            if dx.abs().min(dy.abs()) >= max_delta {
                return None;
            }
            t += direction;

            let candidate = Bounds::centered(start_x + dx, start_y + dy, width, height);
            if candidate.left < 0.0
                || candidate.top < 0.0
                || candidate.right > self.width
                || candidate.bottom > self.height
            {
                continue;
            }

            if occupied
                .iter()
                .all(|other| !candidate.collides(other, self.padding))
            {
                return Some(candidate);
            }
        }
    }
}
