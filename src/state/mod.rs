// State management module.
// Navigation, session, console, and loading state for the shell.

pub mod console;
pub mod loading;
pub mod location;
pub mod nav;
pub mod session;
pub mod switcher;

pub use console::{Console, ConsoleLevel, ConsoleMessage};
pub use loading::LoadingState;
pub use location::Location;
pub use nav::{NavItem, PanelKind, base_nav_items};
pub use session::SessionState;
pub use switcher::{NavAction, NavEffect, NavMode, NavState, PanelSlot, resolve_initial_key};
