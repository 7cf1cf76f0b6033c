use std::fmt;

use serde::{Deserialize, Serialize};

/// A position on the render surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A position in data space (sample units on x, signal value on y).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where the pointer is, in both coordinate systems.
///
/// `data` is `None` when the pointer is outside the plotted axis. Handlers
/// treat that as "nothing to do for this event", never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub pixel: PixelPoint,
    #[serde(default)]
    pub data: Option<DataPoint>,
}

impl PointerPosition {
    /// Pointer inside the plot.
    pub fn inside(pixel: PixelPoint, data: DataPoint) -> Self {
        Self {
            pixel,
            data: Some(data),
        }
    }

    /// Pointer outside the plot (no data coordinate).
    pub fn outside(pixel: PixelPoint) -> Self {
        Self { pixel, data: None }
    }

    /// Data-space x, if the pointer is over the plot.
    pub fn data_x(&self) -> Option<f64> {
        self.data.map(|d| d.x)
    }
}

/// Discrete input delivered to the annotator, one at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Mouse button pressed.
    PointerPressed {
        button: MouseButton,
        position: PointerPosition,
    },
    /// Mouse button released.
    PointerReleased {
        button: MouseButton,
        position: PointerPosition,
    },
    /// Mouse moved.
    PointerMoved { position: PointerPosition },
    /// Mouse wheel scrolled. Positive steps zoom in.
    Scrolled {
        step: f64,
        position: PointerPosition,
    },
    /// Keyboard key pressed, with the modifiers held at that moment.
    KeyPressed {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// The plot area changed size or position on screen.
    Resized { left_px: f32, width_px: f32 },
}

impl InputEvent {
    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            InputEvent::PointerPressed { .. } => "press",
            InputEvent::PointerReleased { .. } => "release",
            InputEvent::PointerMoved { .. } => "move",
            InputEvent::Scrolled { .. } => "scroll",
            InputEvent::KeyPressed { .. } => "key",
            InputEvent::Resized { .. } => "resize",
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl MouseButton {
    /// The button that creates, moves and resizes ranges.
    pub fn is_primary(&self) -> bool {
        matches!(self, MouseButton::Left)
    }

    /// The button that pans the view.
    pub fn is_secondary(&self) -> bool {
        matches!(self, MouseButton::Right)
    }
}

/// Keyboard keys (simplified set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Key::Enter => f.write_str("Enter"),
            Key::Escape => f.write_str("Esc"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Tab => f.write_str("Tab"),
            Key::Space => f.write_str("Space"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
        }
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only shift held.
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// True if no modifier is held.
    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }
}
