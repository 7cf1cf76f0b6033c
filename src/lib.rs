//! wavemark - interactive time-range annotation for 1-D signals
//!
//! Turns pointer and keyboard input into edits of an ordered set of
//! non-overlapping ranges over a signal, while driving a pan/zoom view and
//! pixel-accurate edge grabbing. Rendering and audio are left to a
//! [`session::Frontend`] implementation.

pub mod config;
pub mod constants;
pub mod hit_test;
pub mod keybindings;
pub mod model;
pub mod session;
pub mod signal;
pub mod state;
pub mod viewport;

pub use config::{AnnotatorConfig, ConfigError, InteractionConfig, LogLevel};
pub use hit_test::{HitTester, RenderSurface};
pub use keybindings::{KeyAction, KeyBinding, KeyBindings};
pub use model::{Annotation, AnnotationCollection, AnnotationId, Edge, ExportedRange, GrabMargin};
pub use session::{Annotator, Frontend};
pub use signal::{Signal, SignalError};
pub use state::{Cursor, DrawModel, Effect, GuiState, InteractionStateMachine, SelectionSnapshot};
pub use viewport::Viewport;
