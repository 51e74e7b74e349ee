//! Parameter names with a defined effect.

// Global scope.
pub const WIDTH: &str = "WIDTH";
pub const HEIGHT: &str = "HEIGHT";
pub const TITLE: &str = "TITLE";
pub const CURSOR_DISABLED: &str = "CURSOR_DISABLED";
pub const ENABLE_DEPTH_TEST: &str = "ENABLE_DEPTH_TEST";
pub const ENABLE_STENCIL_TEST: &str = "ENABLE_STENCIL_TEST";
pub const ENABLE_CULL_FACE: &str = "ENABLE_CULL_FACE";
pub const BENCHMARK: &str = "BENCHMARK";

// Pass scope.
pub const ONCE: &str = "ONCE";
pub const VBO: &str = "VBO";
pub const EBO: &str = "EBO";
pub const CUSTOM_FRAMEBUFFER: &str = "CUSTOM_FRAMEBUFFER";
