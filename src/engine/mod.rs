mod events;
mod runner;

pub use events::SwitcherEvent;
pub use runner::{run_apply, run_fetch};
