mod loop_handler;

pub use loop_handler::{export_html, run, run_headless};
