//! I2C bus transaction generator
//!
//! Writes text as one I2C write transaction on two channels: SDA on bit 0
//! and SCL on bit 1, both idling high. Bus events are spaced `step` ticks
//! apart:
//!
//! 1. idle (SDA high, SCL high)
//! 2. start condition: SDA falls while SCL is high, then SCL falls
//! 3. per byte, 8 data bits MSB first and an ACK bit (SDA held low by the
//!    receiver); every bit is set up with SCL low, clocked high, then low
//! 4. stop condition: SCL rises with SDA low, then SDA rises

use super::{bits_msb_first, percent, AcquisitionProgressListener, SignalGenerator};
use crate::acquisition::AcquisitionDataBuilder;
use crate::error::Result;

/// SDA line bit
pub const SDA: u32 = 1 << 0;
/// SCL line bit
pub const SCL: u32 = 1 << 1;

/// Default spacing of bus events in sample ticks
pub const DEFAULT_STEP: u64 = 2_500;

/// Encodes text as an I2C transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I2cGenerator {
    data: Vec<u8>,
    step: u64,
}

impl Default for I2cGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl I2cGenerator {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            step: DEFAULT_STEP,
        }
    }

    /// Set the spacing of bus events in sample ticks
    pub fn with_step(mut self, ticks: u64) -> Self {
        self.step = ticks.max(1);
        self
    }

    /// Append the bytes of `text` to the data to send
    pub fn write_bit_stream(&mut self, text: &str) {
        self.data.extend_from_slice(text.as_bytes());
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Appends bus levels at evenly spaced timestamps
struct BusWriter<'a> {
    builder: &'a mut AcquisitionDataBuilder,
    timestamp: u64,
    step: u64,
}

impl BusWriter<'_> {
    fn emit(&mut self, sda: bool, scl: bool) -> Result<()> {
        let mut value = 0;
        if sda {
            value |= SDA;
        }
        if scl {
            value |= SCL;
        }
        self.builder.add_sample(self.timestamp, value)?;
        self.timestamp += self.step;
        Ok(())
    }

    fn clock_bit(&mut self, sda: bool) -> Result<()> {
        self.emit(sda, false)?;
        self.emit(sda, true)?;
        self.emit(sda, false)
    }
}

impl SignalGenerator for I2cGenerator {
    fn generate(
        &self,
        builder: &mut AcquisitionDataBuilder,
        progress: &dyn AcquisitionProgressListener,
    ) -> Result<()> {
        let mut bus = BusWriter {
            builder,
            timestamp: 0,
            step: self.step,
        };

        bus.emit(true, true)?;
        // start
        bus.emit(false, true)?;
        bus.emit(false, false)?;

        for (i, byte) in self.data.iter().enumerate() {
            for bit in bits_msb_first(std::slice::from_ref(byte)) {
                bus.clock_bit(bit)?;
            }
            // ACK
            bus.clock_bit(false)?;
            progress.acquisition_in_progress(percent(i + 1, self.data.len()));
        }

        // stop
        bus.emit(false, false)?;
        bus.emit(false, true)?;
        bus.emit(true, true)
    }
}
