// Runtime module.
// Background worker that performs server requests off the UI thread.

mod bridge;
mod worker;

pub use bridge::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
