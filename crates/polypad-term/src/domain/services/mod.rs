mod actions;
mod app_state;
mod events;

pub use actions::start_worker;
pub use app_state::{AppState, AppStateProps};
pub use events::EventsService;
