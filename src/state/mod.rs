//! Interaction state: the gesture machine, its effects and selection views.

mod effect;
mod machine;
mod selection;

#[cfg(test)]
mod tests;

pub use effect::{Cursor, Effect, GuiState};
pub use machine::InteractionStateMachine;
pub use selection::{DrawModel, SelectionSnapshot};
