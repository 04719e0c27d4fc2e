// App module for trendboard
// Handles application state and input

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::App;
