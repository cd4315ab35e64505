//! Terminal UI: the event loop and the ratatui view for playing Connect Four.

mod app;
mod game_view;

pub use app::App;
