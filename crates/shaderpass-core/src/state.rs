//! The engine-wide state block visible to every pass as `EngineBuffer`.

use std::time::Instant;

use crate::bytes::AsBytes;
use crate::inputs::{InputEvent, BUTTON_COUNT, KEY_COUNT};

pub const DEFAULT_WIDTH: i32 = 800;
pub const DEFAULT_HEIGHT: i32 = 600;

/// Mirror of the `EngineBuffer` storage block (std430).
///
/// Every member is 4 bytes wide, so the `#[repr(C)]` layout has no padding
/// and matches the GLSL declaration member for member.
#[repr(C)]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    pub time: f32,
    pub delta_time: f32,
    pub width: i32,
    pub height: i32,
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub frame: u32,
    _pad: u32,
    pub keys: [i32; KEY_COUNT],
    pub buttons: [i32; BUTTON_COUNT],
}

unsafe impl AsBytes for EngineState {}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            time: 0.0,
            delta_time: 0.0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            mouse_x: 0.0,
            mouse_y: 0.0,
            frame: 0,
            _pad: 0,
            keys: [0; KEY_COUNT],
            buttons: [0; BUTTON_COUNT],
        }
    }
}

impl EngineState {
    /// Fold one input event into the state.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resized { width, height } => {
                self.width = i32::try_from(width).unwrap_or(i32::MAX);
                self.height = i32::try_from(height).unwrap_or(i32::MAX);
            }
            InputEvent::Key { code, pressed } => {
                if let Some(slot) = usize::try_from(code).ok().and_then(|i| self.keys.get_mut(i)) {
                    *slot = pressed as i32;
                }
            }
            InputEvent::CursorMoved { x, y } => {
                self.mouse_x = x as f32;
                self.mouse_y = y as f32;
            }
            InputEvent::MouseButton { button, pressed } => {
                if let Some(slot) = self.buttons.get_mut(button as usize) {
                    *slot = pressed as i32;
                }
            }
        }
    }

    pub fn key_pressed(&self, code: i32) -> bool {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.keys.get(i))
            .is_some_and(|&state| state != 0)
    }
}

/// Wall clock driving `time`, `delta_time` and `frame`.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
    last: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last: None,
        }
    }

    /// Advance to `now`, updating the timing fields of `state`.
    ///
    /// The first tick reports the time since the clock was created as its
    /// delta.
    pub fn tick_at(&mut self, now: Instant, state: &mut EngineState) {
        let previous = self.last.unwrap_or(self.start);
        state.time = now.saturating_duration_since(self.start).as_secs_f32();
        state.delta_time = now.saturating_duration_since(previous).as_secs_f32();
        if self.last.is_some() {
            state.frame = state.frame.wrapping_add(1);
        }
        self.last = Some(now);
    }

    pub fn tick(&mut self, state: &mut EngineState) {
        self.tick_at(Instant::now(), state);
    }
}
