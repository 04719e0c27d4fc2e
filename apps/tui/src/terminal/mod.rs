mod setup;

pub use setup::cleanup_terminal_state as cleanup;
pub use setup::setup_terminal as setup;
