// Persistence module.
// Stores UI preferences on the local filesystem between runs.

pub mod paths;
pub mod store;
pub mod ui_state;

pub use ui_state::{UiState, UiStateStore};
