//! wavemark_input - input vocabulary for the wavemark annotator
//!
//! Pointer, wheel, keyboard and resize events as plain data. Each event is a
//! self-contained snapshot: the button that changed and the modifiers held
//! travel with the event instead of living in mutable state elsewhere.

mod event;

pub use event::{
    DataPoint, InputEvent, Key, Modifiers, MouseButton, PixelPoint, PointerPosition,
};
