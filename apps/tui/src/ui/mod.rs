// UI module for trendboard
// Handles all rendering

pub mod dashboard;
pub mod layout;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    dashboard::render_dashboard(app, f);
}
