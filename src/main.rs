//! Headless replay of a scripted annotation session.
//!
//! Loads a signal, feeds it a JSON list of input events and prints the
//! resulting ranges as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod replay {
    use std::error::Error;
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use ndarray::ArrayView1;
    use wavemark::{
        AnnotationId, Annotator, AnnotatorConfig, Cursor, ExportedRange, Frontend, RenderSurface,
        Signal,
    };
    use wavemark_input::InputEvent;

    #[derive(Parser)]
    #[command(name = "wavemark")]
    #[command(about = "Replay input events over a signal and print the annotated ranges")]
    #[command(version)]
    struct Cli {
        /// Signal samples (.npy, 1-D or samples x channels)
        signal: PathBuf,

        /// Event script (JSON array of input events)
        events: PathBuf,

        /// Sampling frequency in Hz
        #[arg(short, long, default_value = "44100")]
        sample_rate: f32,

        /// Configuration file (defaults to the user config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Plot width in pixels that the script's pixel coordinates refer to
        #[arg(short = 'w', long, default_value = "1600")]
        surface_width: f32,

        /// Ranges to start from, as printed by a previous run
        #[arg(short, long)]
        ranges: Option<PathBuf>,
    }

    /// Logs what a real frontend would draw or play.
    #[derive(Default)]
    struct HeadlessFrontend {
        redraws: usize,
    }

    impl Frontend for HeadlessFrontend {
        fn request_redraw(&mut self) {
            self.redraws += 1;
        }

        fn set_cursor(&mut self, cursor: Cursor) {
            log::debug!("Cursor: {:?}", cursor);
        }

        fn detach(&mut self, id: AnnotationId) {
            log::debug!("Detach range {}", id);
        }

        fn show_range(&mut self, start: f64, stop: f64) {
            log::debug!("Detail view: [{:.1}, {:.1}]", start, stop);
        }

        fn play(&mut self, start: usize, stop: usize, samples: ArrayView1<'_, f32>, sample_rate: f32) {
            log::info!(
                "Play {}..{} ({} samples at {} Hz)",
                start,
                stop,
                samples.len(),
                sample_rate
            );
        }
    }

    fn load_config(path: Option<&Path>) -> Result<AnnotatorConfig, Box<dyn Error>> {
        match path {
            Some(path) => Ok(AnnotatorConfig::load(path)?),
            None => Ok(AnnotatorConfig::load_user().unwrap_or_default()),
        }
    }

    /// Level from the config unless RUST_LOG says otherwise.
    fn init_logging(config: &AnnotatorConfig) {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(config.log_level.into());
        builder.parse_default_env();
        builder.init();
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let cli = Cli::parse();
        let config = load_config(cli.config.as_deref())?;
        init_logging(&config);

        let signal = Signal::load_npy(&cli.signal, cli.sample_rate)?;
        log::info!(
            "Signal {:?}: {} samples, {:.2} s",
            cli.signal,
            signal.len(),
            signal.duration_secs()
        );

        let script = std::fs::read_to_string(&cli.events)?;
        let events: Vec<InputEvent> = serde_json::from_str(&script)?;

        let mut annotator = Annotator::new(signal, &config)
            .with_surface(RenderSurface::new(0.0, cli.surface_width));

        if let Some(path) = &cli.ranges {
            let restored: Vec<ExportedRange> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            let total = restored.len();
            let accepted = restored
                .into_iter()
                .filter_map(|range| annotator.insert_range(range.x_min, range.x_max, range.label))
                .count();
            log::info!("Restored {} of {} ranges from {:?}", accepted, total, path);
        }

        let mut frontend = HeadlessFrontend::default();
        let dispatched = annotator.replay(&events, &mut frontend);
        log::info!(
            "Replayed {} events: {} effects, {} redraws",
            events.len(),
            dispatched,
            frontend.redraws
        );

        println!("{}", serde_json::to_string_pretty(&annotator.export())?);
        Ok(())
    }
}

/// Replay entry point for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    replay::run()
}

// No command line on the web
#[cfg(target_arch = "wasm32")]
fn main() {}
