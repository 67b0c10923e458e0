//! Acquisition task of the demo device
//!
//! [`TestAcquisitionTask`] turns [`DeviceSettings`] into a capture: it sets up
//! a builder at 1 GHz with the configured channel count, runs the selected
//! data function and builds the result. The task can run inline with
//! [`call`](TestAcquisitionTask::call) or on a worker thread with
//! [`spawn`](TestAcquisitionTask::spawn), in which case progress and the
//! final capture arrive over a crossbeam channel.

use super::{
    AcquisitionProgressListener, DataFunction, I2cGenerator, ManchesterEncoder,
    OneWireGenerator, PatternGenerator, SignalGenerator, I2C_SAMPLE_TEXT, MANCHESTER_SAMPLE_TEXT,
    ONE_WIRE_SAMPLE_TEXT,
};
use crate::acquisition::{AcquisitionData, AcquisitionDataBuilder};
use crate::config::DeviceSettings;
use crate::error::{Result, ResultExt, SnifferError};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::cell::Cell;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

/// Sample rate of the demo device
pub const DEMO_SAMPLE_RATE: u32 = 1_000_000_000;

/// Messages sent from a spawned acquisition to its owner
#[derive(Debug)]
pub enum AcquisitionEvent {
    /// Completion percentage changed
    Progress(u8),
    /// The capture is ready
    Completed(Arc<AcquisitionData>),
    /// The acquisition failed
    Failed(SnifferError),
}

/// Produces a capture from the demo device's settings
#[derive(Debug, Clone)]
pub struct TestAcquisitionTask {
    settings: DeviceSettings,
}

impl TestAcquisitionTask {
    pub fn new(settings: DeviceSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    /// Run the acquisition on the calling thread
    pub fn call(&self, progress: &dyn AcquisitionProgressListener) -> Result<AcquisitionData> {
        self.settings.validate()?;
        let function = self.settings.data_function;
        let started = Instant::now();
        tracing::info!(
            function = %function,
            samples = self.settings.sample_count,
            channels = self.settings.channel_count,
            "Starting demo acquisition"
        );

        let mut builder = AcquisitionDataBuilder::with_capacity(self.settings.sample_count);
        builder.set_sample_rate(DEMO_SAMPLE_RATE);
        builder.set_channel_count(self.settings.channel_count)?;

        let generator = self.generator();
        generator
            .generate(&mut builder, progress)
            .with_context(|| format!("Generating '{}' data", function))?;
        progress.acquisition_in_progress(100);

        let data = builder
            .build()
            .with_context(|| format!("Building '{}' capture", function))?;
        tracing::info!(
            samples = data.sample_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Demo acquisition complete"
        );
        Ok(data)
    }

    fn generator(&self) -> Box<dyn SignalGenerator> {
        match self.settings.data_function {
            DataFunction::I2cSample => {
                let mut generator = I2cGenerator::new();
                generator.write_bit_stream(I2C_SAMPLE_TEXT);
                Box::new(generator)
            }
            DataFunction::OneWireSample => {
                let mut generator = OneWireGenerator::new(true);
                generator.write_bit_stream(ONE_WIRE_SAMPLE_TEXT);
                Box::new(generator)
            }
            DataFunction::ManchesterEncoded => {
                let mut encoder = ManchesterEncoder::new();
                encoder.write_data(MANCHESTER_SAMPLE_TEXT);
                Box::new(encoder)
            }
            plain => {
                // plain_pattern() is Some for every remaining variant
                let pattern = plain
                    .plain_pattern()
                    .unwrap_or(super::PlainPattern::AllZeros);
                Box::new(PatternGenerator::new(
                    pattern,
                    self.settings.sample_count,
                    self.settings.channel_count,
                ))
            }
        }
    }

    /// Run the acquisition on a worker thread
    pub fn spawn(self) -> AcquisitionHandle {
        let (tx, rx) = unbounded();
        let thread = std::thread::spawn(move || {
            let progress = ChannelProgress::new(tx.clone());
            let event = match self.call(&progress) {
                Ok(data) => AcquisitionEvent::Completed(Arc::new(data)),
                Err(e) => {
                    tracing::warn!("Demo acquisition failed: {}", e);
                    AcquisitionEvent::Failed(e)
                }
            };
            // The owner may have dropped the handle already
            let _ = tx.send(event);
        });
        AcquisitionHandle { events: rx, thread }
    }
}

/// Forwards progress changes over a channel, skipping repeats
struct ChannelProgress {
    tx: Sender<AcquisitionEvent>,
    last: Cell<Option<u8>>,
}

impl ChannelProgress {
    fn new(tx: Sender<AcquisitionEvent>) -> Self {
        Self {
            tx,
            last: Cell::new(None),
        }
    }
}

impl AcquisitionProgressListener for ChannelProgress {
    fn acquisition_in_progress(&self, percent: u8) {
        if self.last.get() != Some(percent) {
            self.last.set(Some(percent));
            let _ = self.tx.send(AcquisitionEvent::Progress(percent));
        }
    }
}

/// Owner side of a spawned acquisition
pub struct AcquisitionHandle {
    events: Receiver<AcquisitionEvent>,
    thread: JoinHandle<()>,
}

impl AcquisitionHandle {
    /// Event stream: progress updates followed by one final event
    pub fn events(&self) -> &Receiver<AcquisitionEvent> {
        &self.events
    }

    /// Block until the acquisition finishes, calling `on_progress` for every update
    pub fn wait_with_progress(self, on_progress: impl Fn(u8)) -> Result<Arc<AcquisitionData>> {
        let mut outcome = None;
        for event in self.events.iter() {
            match event {
                AcquisitionEvent::Progress(p) => on_progress(p),
                AcquisitionEvent::Completed(data) => {
                    outcome = Some(Ok(data));
                    break;
                }
                AcquisitionEvent::Failed(e) => {
                    outcome = Some(Err(e));
                    break;
                }
            }
        }
        if self.thread.join().is_err() {
            return Err(SnifferError::UndefinedState(
                "acquisition thread panicked".to_string(),
            ));
        }
        outcome.unwrap_or_else(|| {
            Err(SnifferError::UndefinedState(
                "acquisition ended without a result".to_string(),
            ))
        })
    }

    /// Block until the acquisition finishes
    pub fn wait(self) -> Result<Arc<AcquisitionData>> {
        self.wait_with_progress(|_| {})
    }
}
