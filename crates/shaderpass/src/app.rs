//! Application wiring: tracing, window, GL backend and engine.

use std::path::PathBuf;

use anyhow::Context as _;
use shaderpass_backend::gl::GlBackend;
use shaderpass_backend::GraphicsBackend;
use shaderpass_core::{Document, InputEvent, SectionKeyword};
use shaderpass_window::{FrameHandler, Window, WindowConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::engine::Engine;

const DEFAULT_FILTER: &str = "warn,shaderpass=info";

/// What to run and for how long.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub document: PathBuf,
    /// Overrides the detected `PASS`/`PROGRAM` keyword.
    pub keyword: Option<SectionKeyword>,
    /// Stop after this many presented frames.
    pub frames: Option<u64>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `verbosity` raises the default
/// filter: one `-v` enables debug output for the shaderpass crates, two
/// enable trace.
pub fn init_tracing(verbosity: u8) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = match verbosity {
                0 => DEFAULT_FILTER.to_owned(),
                1 => "warn,shaderpass=debug,shaderpass_backend=debug,shaderpass_window=debug".to_owned(),
                _ => "info,shaderpass=trace,shaderpass_backend=trace,shaderpass_window=trace".to_owned(),
            };
            EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

impl<B: GraphicsBackend> FrameHandler for Engine<B> {
    fn input(&mut self, event: InputEvent) {
        self.handle_event(event);
    }

    fn frame(&mut self) -> anyhow::Result<()> {
        self.tick();
        Ok(())
    }
}

/// Open a window for the document, load its pipeline and run it.
pub fn run(options: &RunOptions) -> anyhow::Result<()> {
    let mut document = Document::load(&options.document)
        .with_context(|| format!("failed to load {}", options.document.display()))?;
    if let Some(keyword) = options.keyword {
        document = document.with_keyword(keyword);
    }
    info!(
        path = %options.document.display(),
        keyword = %document.keyword(),
        passes = document.pass_count(),
        "loaded document"
    );

    let config = WindowConfig::from_params(&document.global_params())
        .context("invalid window parameters")?;
    let window = Window::open(&config).context("failed to open window")?;

    let engine = Engine::load(GlBackend::new(), document).context("failed to load pipeline")?;
    window.run(engine, options.frames)
}
