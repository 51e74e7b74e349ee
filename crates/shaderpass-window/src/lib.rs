//! Window and GL context provider for the shaderpass runtime.
//!
//! [`Window::open`] creates a glium window with a current OpenGL context and
//! loads the `gl` function pointers. [`Window::run`] then drives a
//! [`FrameHandler`] once per redraw, forwarding input as
//! [`InputEvent`]s.

use anyhow::Context as _;
use glium::backend::glutin::SimpleWindowBuilder;
use glium::glutin::surface::WindowSurface;
use glium::winit::event::{ElementState, Event, WindowEvent};
use glium::winit::event_loop::EventLoop;
use glium::winit::window::CursorGrabMode;
use glium::Display;
use shaderpass_core::parameters::keys as param;
use shaderpass_core::state::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use shaderpass_core::{Error, InputEvent, Params};
use tracing::{debug, info, warn};

mod gl_backend;
pub mod glsl;
pub mod keys;

pub const DEFAULT_TITLE: &str = "shaderpass";

/// Window settings taken from the document's global parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub cursor_disabled: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            width: DEFAULT_WIDTH as u32,
            height: DEFAULT_HEIGHT as u32,
            cursor_disabled: false,
        }
    }
}

impl WindowConfig {
    /// Read `TITLE`, `WIDTH`, `HEIGHT` and `CURSOR_DISABLED`.
    pub fn from_params(params: &Params) -> Result<Self, Error> {
        let defaults = Self::default();
        let width = params.value::<u32>(param::WIDTH)?.unwrap_or(defaults.width);
        let height = params.value::<u32>(param::HEIGHT)?.unwrap_or(defaults.height);
        if width == 0 || height == 0 {
            return Err(Error::configuration(format!(
                "window size must be non-zero, got {width}x{height}"
            )));
        }

        Ok(Self {
            title: params
                .get(param::TITLE)
                .filter(|title| !title.is_empty())
                .map_or(defaults.title, str::to_owned),
            width,
            height,
            cursor_disabled: params.contains(param::CURSOR_DISABLED),
        })
    }
}

/// Receives input and renders frames into the window's default framebuffer.
pub trait FrameHandler {
    fn input(&mut self, event: InputEvent);

    /// Render one frame. An error stops the loop and is returned by
    /// [`Window::run`].
    fn frame(&mut self) -> anyhow::Result<()>;
}

/// A window whose OpenGL context is current on the creating thread.
pub struct Window {
    event_loop: EventLoop<()>,
    window: glium::winit::window::Window,
    display: Display<WindowSurface>,
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window").finish()
    }
}

impl Window {
    pub fn open(config: &WindowConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let (window, display) = SimpleWindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(config.width, config.height)
            .build(&event_loop);

        gl_backend::load_gl();

        let version = display.get_opengl_version_string();
        let renderer = display.get_opengl_renderer_string();
        info!(
            version,
            renderer,
            "opened window"
        );
        glsl::require_glsl(&*display)?;

        if config.cursor_disabled {
            window.set_cursor_visible(false);
            if let Err(err) = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            {
                warn!(%err, "could not grab the cursor");
            }
        }

        Ok(Self {
            event_loop,
            window,
            display,
        })
    }

    /// Pump events and render until the window closes, `handler` fails, or
    /// `max_frames` frames have been presented.
    ///
    /// `handler` is dropped while the context is still current, so it may
    /// free GPU objects in its `Drop`.
    #[allow(deprecated)]
    pub fn run<H: FrameHandler>(self, mut handler: H, max_frames: Option<u64>) -> anyhow::Result<()> {
        let Self {
            event_loop,
            window,
            display,
        } = self;
        let mut presented: u64 = 0;
        let mut failure: Option<anyhow::Error> = None;

        let outcome = event_loop
            .run(|event, target| match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => target.exit(),
                    WindowEvent::Resized(size) => {
                        display.resize(size.into());
                        handler.input(InputEvent::Resized {
                            width: size.width,
                            height: size.height,
                        });
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if let Some(code) = keys::key_code(event.physical_key) {
                            handler.input(InputEvent::Key {
                                code,
                                pressed: event.state == ElementState::Pressed,
                            });
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        handler.input(InputEvent::CursorMoved {
                            x: position.x,
                            y: position.y,
                        });
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        handler.input(InputEvent::MouseButton {
                            button: keys::button_index(button),
                            pressed: state == ElementState::Pressed,
                        });
                    }
                    WindowEvent::RedrawRequested => {
                        let rendered = handler.frame().and_then(|()| {
                            display.swap_buffers().context("failed to present frame")
                        });
                        if let Err(err) = rendered {
                            failure = Some(err);
                            target.exit();
                            return;
                        }

                        presented += 1;
                        if max_frames.is_some_and(|max| presented >= max) {
                            debug!(presented, "frame limit reached");
                            target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => window.request_redraw(),
                _ => {}
            })
            .context("event loop failed");
        drop(handler);
        drop(display);

        outcome?;
        failure.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(source: &str) -> Params {
        Params::parse(source, shaderpass_core::Scope::Global)
    }

    #[test]
    fn defaults_without_parameters() {
        assert_eq!(WindowConfig::from_params(&Params::default()).unwrap(), WindowConfig::default());
    }

    #[test]
    fn reads_global_parameters() {
        let config = WindowConfig::from_params(&params(
            "#pragma PARAM WIDTH 1280;\n#pragma PARAM HEIGHT 720;\n#pragma PARAM TITLE \"Two Pass Demo\";\n#pragma PARAM CURSOR_DISABLED;\n",
        ))
        .unwrap();

        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.title, "Two Pass Demo");
        assert!(config.cursor_disabled);
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(WindowConfig::from_params(&params("#pragma PARAM WIDTH abc;")).is_err());
        assert!(WindowConfig::from_params(&params("#pragma PARAM HEIGHT 0;")).is_err());
    }
}
