//! Translation of winit keys and buttons to the engine's GLFW-style codes.

use glium::winit::event::MouseButton;
use glium::winit::keyboard::{KeyCode, PhysicalKey};

/// GLFW key code for a physical key, if the engine tracks it.
pub fn key_code(key: PhysicalKey) -> Option<i32> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };

    use KeyCode::*;
    let glfw = match code {
        Space => 32,
        Quote => 39,
        Comma => 44,
        Minus => 45,
        Period => 46,
        Slash => 47,
        Digit0 => 48,
        Digit1 => 49,
        Digit2 => 50,
        Digit3 => 51,
        Digit4 => 52,
        Digit5 => 53,
        Digit6 => 54,
        Digit7 => 55,
        Digit8 => 56,
        Digit9 => 57,
        Semicolon => 59,
        Equal => 61,
        KeyA => 65,
        KeyB => 66,
        KeyC => 67,
        KeyD => 68,
        KeyE => 69,
        KeyF => 70,
        KeyG => 71,
        KeyH => 72,
        KeyI => 73,
        KeyJ => 74,
        KeyK => 75,
        KeyL => 76,
        KeyM => 77,
        KeyN => 78,
        KeyO => 79,
        KeyP => 80,
        KeyQ => 81,
        KeyR => 82,
        KeyS => 83,
        KeyT => 84,
        KeyU => 85,
        KeyV => 86,
        KeyW => 87,
        KeyX => 88,
        KeyY => 89,
        KeyZ => 90,
        BracketLeft => 91,
        Backslash => 92,
        BracketRight => 93,
        Backquote => 96,
        Escape => 256,
        Enter => 257,
        Tab => 258,
        Backspace => 259,
        Insert => 260,
        Delete => 261,
        ArrowRight => 262,
        ArrowLeft => 263,
        ArrowDown => 264,
        ArrowUp => 265,
        PageUp => 266,
        PageDown => 267,
        Home => 268,
        End => 269,
        CapsLock => 280,
        ScrollLock => 281,
        NumLock => 282,
        PrintScreen => 283,
        Pause => 284,
        F1 => 290,
        F2 => 291,
        F3 => 292,
        F4 => 293,
        F5 => 294,
        F6 => 295,
        F7 => 296,
        F8 => 297,
        F9 => 298,
        F10 => 299,
        F11 => 300,
        F12 => 301,
        F13 => 302,
        F14 => 303,
        F15 => 304,
        F16 => 305,
        F17 => 306,
        F18 => 307,
        F19 => 308,
        F20 => 309,
        F21 => 310,
        F22 => 311,
        F23 => 312,
        F24 => 313,
        F25 => 314,
        Numpad0 => 320,
        Numpad1 => 321,
        Numpad2 => 322,
        Numpad3 => 323,
        Numpad4 => 324,
        Numpad5 => 325,
        Numpad6 => 326,
        Numpad7 => 327,
        Numpad8 => 328,
        Numpad9 => 329,
        NumpadDecimal => 330,
        NumpadDivide => 331,
        NumpadMultiply => 332,
        NumpadSubtract => 333,
        NumpadAdd => 334,
        NumpadEnter => 335,
        NumpadEqual => 336,
        ShiftLeft => 340,
        ControlLeft => 341,
        AltLeft => 342,
        SuperLeft => 343,
        ShiftRight => 344,
        ControlRight => 345,
        AltRight => 346,
        SuperRight => 347,
        ContextMenu => 348,
        _ => return None,
    };
    Some(glfw)
}

/// Button slot in the engine state (left, right, middle first).
pub fn button_index(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(n) => u32::from(n),
    }
}

#[cfg(test)]
mod tests {
    use glium::winit::keyboard::NativeKeyCode;

    use super::*;

    #[test]
    fn printable_keys_use_ascii() {
        assert_eq!(key_code(PhysicalKey::Code(KeyCode::KeyA)), Some(65));
        assert_eq!(key_code(PhysicalKey::Code(KeyCode::Digit7)), Some(55));
        assert_eq!(key_code(PhysicalKey::Code(KeyCode::Space)), Some(32));
    }

    #[test]
    fn special_keys_use_glfw_numbering() {
        assert_eq!(key_code(PhysicalKey::Code(KeyCode::Escape)), Some(256));
        assert_eq!(key_code(PhysicalKey::Code(KeyCode::ArrowUp)), Some(265));
        assert_eq!(key_code(PhysicalKey::Code(KeyCode::ContextMenu)), Some(348));
    }

    #[test]
    fn unknown_keys_are_dropped() {
        assert_eq!(key_code(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)), None);
        assert_eq!(key_code(PhysicalKey::Code(KeyCode::F35)), None);
    }

    #[test]
    fn buttons() {
        assert_eq!(button_index(MouseButton::Left), 0);
        assert_eq!(button_index(MouseButton::Middle), 2);
        assert_eq!(button_index(MouseButton::Other(6)), 6);
    }
}
