//! Snapshot model and widget renderers shared by the Trendboard frontends.
//!
//! Every renderer is a pure function from typed snapshot data to a view value.
//! The terminal and web apps only draw those values; the [`html`] module turns
//! them into the static dashboard page.

pub mod animation;
pub mod config;
pub mod error;
pub mod html;
pub mod snapshot;
pub mod widgets;

pub use config::DashboardConfig;
pub use error::{Result, TrendsError};
pub use snapshot::TrendsSnapshot;
pub use widgets::DashboardView;
