//! GLSL prepended to every compiled stage.
//!
//! Declares the reserved storage blocks, the draw command record and a few
//! helpers, plus `KEY_*` constants matching the key codes the window layer
//! reports.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use shaderpass_core::inputs::{BUTTON_COUNT, KEY_COUNT};

/// Storage block names the runtime provides itself.
pub const RESERVED_BLOCKS: [&str; 3] = ["EngineBuffer", "WorkGroupBuffer", "DrawCommandBuffer"];

pub const ENGINE_BINDING: u32 = 0;
pub const WORK_GROUP_BINDING: u32 = 1;
pub const DRAW_COMMAND_BINDING: u32 = 2;

/// Capacity of `DrawCommandBuffer` and the draw count of every raster pass.
pub const MAX_DRAW_COMMANDS: usize = 100;

/// Five `uint`s: count, instanceCount, firstIndex, baseVertex, baseInstance.
pub const DRAW_COMMAND_SIZE: usize = 5 * std::mem::size_of::<u32>();

const NAMED_KEYS: &[(&str, i32)] = &[
    ("SPACE", 32),
    ("ESCAPE", 256),
    ("ENTER", 257),
    ("TAB", 258),
    ("BACKSPACE", 259),
    ("RIGHT", 262),
    ("LEFT", 263),
    ("DOWN", 264),
    ("UP", 265),
    ("LEFT_SHIFT", 340),
    ("LEFT_CONTROL", 341),
    ("LEFT_ALT", 342),
    ("RIGHT_SHIFT", 344),
    ("RIGHT_CONTROL", 345),
    ("RIGHT_ALT", 346),
];

const BODY: &str = r#"
#define STATE_RELEASED 0
#define STATE_PRESSED 1

#define MOUSE_BUTTON_LEFT 0
#define MOUSE_BUTTON_RIGHT 1
#define MOUSE_BUTTON_MIDDLE 2

struct DrawCommand {
    uint count;
    uint instanceCount;
    uint firstIndex;
    uint baseVertex;
    uint baseInstance;
};

layout(std430, binding = 0) readonly buffer EngineBuffer {
    float time;
    float deltaTime;
    int width;
    int height;
    float mouseX;
    float mouseY;
    uint frame;
    uint _reserved;
    int keys[ENGINE_KEY_COUNT];
    int buttons[ENGINE_BUTTON_COUNT];
} engine;

layout(std430, binding = 1) buffer WorkGroupBuffer {
    uint x;
    uint y;
    uint z;
} workGroups;

layout(std430, binding = 2) buffer DrawCommandBuffer {
    DrawCommand commands[MAX_DRAW_COMMANDS];
} drawCommands;

void set_drawcommand(uint offset, uint count, uint firstIndex, uint baseVertex, uint baseInstance)
{
    drawCommands.commands[offset].count = count;
    drawCommands.commands[offset].instanceCount = 1;
    drawCommands.commands[offset].firstIndex = firstIndex;
    drawCommands.commands[offset].baseVertex = baseVertex;
    drawCommands.commands[offset].baseInstance = baseInstance;
}

// Non-indexed draws read the first four fields as count, instanceCount,
// first, baseInstance.
void set_draw_arrays_command(uint offset, uint count, uint first)
{
    set_drawcommand(offset, count, first, 0, 0);
}

bool key_pressed(int key)
{
    return engine.keys[key] == STATE_PRESSED;
}

bool button_pressed(int button)
{
    return engine.buttons[button] == STATE_PRESSED;
}
"#;

static PREAMBLE: Lazy<String> = Lazy::new(|| {
    let mut out = String::from("#version 460 core\n\n");
    let _ = writeln!(out, "#define ENGINE_KEY_COUNT {KEY_COUNT}");
    let _ = writeln!(out, "#define ENGINE_BUTTON_COUNT {BUTTON_COUNT}");
    let _ = writeln!(out, "#define MAX_DRAW_COMMANDS {MAX_DRAW_COMMANDS}\n");

    for digit in b'0'..=b'9' {
        let _ = writeln!(out, "#define KEY_{} {digit}", digit as char);
    }
    for letter in b'A'..=b'Z' {
        let _ = writeln!(out, "#define KEY_{} {letter}", letter as char);
    }
    for (name, code) in NAMED_KEYS {
        let _ = writeln!(out, "#define KEY_{name} {code}");
    }
    for f in 1..=12 {
        let _ = writeln!(out, "#define KEY_F{f} {}", 289 + f);
    }

    out.push_str(BODY);
    out
});

/// The engine preamble. Starts with the `#version` directive.
pub fn preamble() -> &'static str {
    &PREAMBLE
}

pub fn is_reserved_block(name: &str) -> bool {
    RESERVED_BLOCKS.contains(&name)
}

/// Whether `binding` belongs to one of the reserved blocks.
pub fn is_reserved_binding(binding: u32) -> bool {
    [ENGINE_BINDING, WORK_GROUP_BINDING, DRAW_COMMAND_BINDING].contains(&binding)
}
