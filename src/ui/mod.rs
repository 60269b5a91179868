//! Terminal UI using ratatui.

mod app;
pub mod event;
mod input;
pub mod render;

pub use app::{
    App, CommitsView, DiffView, Screen, StatsView, Transition, UiState, ViewStack, CHROME_ROWS,
};
pub use event::{AppEvent, EventBus, EventSender, InputPump};
pub use input::handle_input;
pub use render::render;
