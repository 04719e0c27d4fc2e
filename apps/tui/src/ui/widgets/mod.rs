pub mod cloud;
pub mod explore;
pub mod keywords;
pub mod mascot;
pub mod ticker;
pub mod velocity;

use ratatui::style::Color;
use trendboard_core::config::HexColor;

pub const fn hex_color(color: HexColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
