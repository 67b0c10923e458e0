//! LogicSniffer demo - Main Entry Point
//!
//! Runs one acquisition on the demo device, loads it into a capture session
//! and walks the zoom controller through its transitions for a fixed-size
//! viewport.

use anyhow::Context;
use clap::Parser;
use logicsniffer::{
    config::{SettingsStore, DEMO_DEVICE_NAMESPACE},
    generator::{ManchesterDecoder, ManchesterPolarity},
    CaptureSession, Color, DataFunction, Dimension, Rect, TestAcquisitionTask, ZoomEvent,
};
use logicsniffer::zoom::ViewGeometry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Color of the cursor placed on the trigger
const TRIGGER_COLOR: Color = Color::rgb(0xff, 0x8c, 0x00);

#[derive(Parser)]
#[command(
    name = "logicsniffer",
    version,
    about = "Run a demo acquisition and exercise the zoom engine"
)]
struct Cli {
    /// Data function to run (e.g. "Counter", "I2C sample", "Manchester encoded")
    #[arg(long = "function", value_name = "NAME")]
    function: Option<DataFunction>,

    /// Number of samples for the plain patterns
    #[arg(long = "samples")]
    samples: Option<usize>,

    /// Number of channels to capture (1-32)
    #[arg(long = "channels")]
    channels: Option<u32>,

    /// Width of the simulated viewport in pixels
    #[arg(long = "width", default_value_t = 1024)]
    width: u32,

    /// Height of the simulated viewport in pixels
    #[arg(long = "height", default_value_t = 600)]
    height: u32,

    /// Settings file to use instead of the app data directory
    #[arg(long = "settings", value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Persist the effective device settings
    #[arg(long = "save")]
    save: bool,

    /// List the available data functions and exit
    #[arg(long = "list")]
    list: bool,
}

/// Viewport of a fixed size, scrolled to the origin
struct FixedViewport {
    width: u32,
    height: u32,
}

impl ViewGeometry for FixedViewport {
    fn visible_rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn preferred_size(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    fn screen_height(&self) -> u32 {
        self.height
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,logicsniffer=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if cli.list {
        for function in DataFunction::all() {
            println!("{}", function);
        }
        return Ok(());
    }

    tracing::info!("Starting LogicSniffer demo");

    let mut store = match &cli.settings {
        Some(path) => SettingsStore::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => SettingsStore::load_or_default(),
    };
    let mut settings = store
        .device_settings(DEMO_DEVICE_NAMESPACE)
        .context("reading demo device settings")?;
    if let Some(function) = cli.function {
        settings.data_function = function;
    }
    if let Some(samples) = cli.samples {
        settings.sample_count = samples;
    }
    if let Some(channels) = cli.channels {
        settings.channel_count = channels;
    }
    settings.validate()?;

    if cli.save {
        store.set_device_settings(DEMO_DEVICE_NAMESPACE, &settings);
        match &cli.settings {
            Some(path) => store.save_to(path)?,
            None => store.save()?,
        }
    }

    let function = settings.data_function;
    let data = TestAcquisitionTask::new(settings)
        .spawn()
        .wait_with_progress(|p| tracing::debug!("Acquisition {}%", p))
        .context("demo acquisition failed")?;

    println!("Function:        {}", function);
    println!("Samples:         {}", data.sample_count());
    println!("Channels:        {}", data.channel_count());
    println!("Enabled mask:    {:#010x}", data.enabled_channel_mask());
    match data.sample_rate() {
        Some(rate) => println!("Sample rate:     {} Hz", rate),
        None => println!("Sample rate:     none (index-only)"),
    }
    println!("Absolute length: {}", data.absolute_length());
    if let Some(trigger) = data.trigger_position() {
        println!("Trigger:         sample {}", trigger);
    }
    if let Some(seconds) = data.duration_seconds() {
        println!("Duration:        {:.9} s", seconds);
    }

    if function == DataFunction::ManchesterEncoded {
        let bytes = ManchesterDecoder::new(ManchesterPolarity::default(), 0).decode(&data)?;
        println!("Decoded:         {}", String::from_utf8_lossy(&bytes));
    }

    let mut session = CaptureSession::new();
    session.load(Arc::clone(&data));
    if let Some(trigger) = data.trigger_position() {
        let timestamp = data.samples()[trigger as usize].timestamp;
        let index = session.add_cursor(timestamp)?;
        let cursor = session.cursors_mut().get_mut(index)?;
        cursor.set_label("trigger");
        cursor.set_color(Some(TRIGGER_COLOR));
    }
    for (index, label) in session.cursor_labels() {
        let color = session
            .cursor(index)?
            .color()
            .map_or_else(|| "default".to_string(), |c| c.to_hex());
        println!("Cursor {}:        {} ({})", index + 1, label, color);
    }

    let view = Arc::new(FixedViewport {
        width: cli.width,
        height: cli.height,
    });
    let zoom = session.zoom_controller(view);
    zoom.add_zoom_listener(Arc::new(|event: &ZoomEvent| println!("  {}", event)));

    println!(
        "Zoom levels:     min {:.6}, default {:.6}, max {:.6}",
        zoom.min_zoom_level(),
        zoom.default_zoom_level(),
        zoom.max_zoom_level()
    );
    zoom.zoom_all();
    zoom.zoom_in();
    zoom.zoom_in();
    zoom.zoom_out();
    zoom.zoom_default();
    zoom.zoom_maximum();
    zoom.zoom_wheel(3, None);
    zoom.restore_zoom_level();
    println!(
        "Final factor:    {:.6} ({:?})",
        zoom.factor(),
        zoom.zoom_action()
    );

    tracing::info!("Done");
    Ok(())
}
