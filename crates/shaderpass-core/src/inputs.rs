//! Window and input events delivered to the engine.

/// Number of key slots in the state buffer, one per GLFW key code.
pub const KEY_COUNT: usize = 349;

/// Number of mouse button slots in the state buffer.
pub const BUTTON_COUNT: usize = 8;

/// Events the window provider forwards to the engine.
///
/// Key codes follow GLFW numbering, so printable keys carry their uppercase
/// ASCII value. Codes outside the state table are ignored when folded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Resized { width: u32, height: u32 },
    Key { code: i32, pressed: bool },
    CursorMoved { x: f64, y: f64 },
    MouseButton { button: u32, pressed: bool },
}
