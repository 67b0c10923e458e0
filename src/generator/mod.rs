//! Synthetic signal generators for the demo device
//!
//! Every generator appends deterministic samples to an
//! [`AcquisitionDataBuilder`]; only [`PlainPattern::Random`] draws random
//! values. The generators double as self-test data for the rest of the core.
//!
//! # Data Functions
//!
//! The demo device offers these functions, identified by their persisted
//! names (see [`DataFunction`]):
//!
//! - Plain patterns written one sample per tick: `Counter`, `All zeros`,
//!   `Sine`, `Odd-even`, `0x55-0xAA`, `Random`, `Toggle`
//! - Encoded bit streams of a fixed text: `I2C sample` ([`I2cGenerator`]),
//!   `1-Wire sample` ([`OneWireGenerator`]), `Manchester encoded`
//!   ([`ManchesterEncoder`])

pub mod i2c;
pub mod manchester;
pub mod onewire;
pub mod pattern;
pub mod task;

pub use i2c::I2cGenerator;
pub use manchester::{ManchesterDecoder, ManchesterEncoder, ManchesterPolarity};
pub use onewire::{OneWireGenerator, OneWireSpeed, OneWireTiming};
pub use pattern::{PatternGenerator, PlainPattern};
pub use task::{AcquisitionEvent, AcquisitionHandle, TestAcquisitionTask};

use crate::acquisition::AcquisitionDataBuilder;
use crate::error::{Result, SnifferError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Receives progress updates while a capture is being produced
pub trait AcquisitionProgressListener {
    /// Called periodically with the completion percentage, `0..=100`
    fn acquisition_in_progress(&self, percent: u8);
}

impl<F> AcquisitionProgressListener for F
where
    F: Fn(u8),
{
    fn acquisition_in_progress(&self, percent: u8) {
        self(percent)
    }
}

/// Progress listener that ignores all updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl AcquisitionProgressListener for NoProgress {
    fn acquisition_in_progress(&self, _percent: u8) {}
}

/// Something that can write a synthetic signal into a builder
pub trait SignalGenerator {
    /// Append this generator's samples to `builder`, reporting progress
    fn generate(
        &self,
        builder: &mut AcquisitionDataBuilder,
        progress: &dyn AcquisitionProgressListener,
    ) -> Result<()>;
}

/// Completion percentage of `done` out of `total` steps
pub(crate) fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done as f64 * 100.0) / total as f64).min(100.0) as u8
}

/// Bits of `bytes`, most significant bit of each byte first
pub(crate) fn bits_msb_first(bytes: &[u8]) -> impl Iterator<Item = bool> + '_ {
    bytes
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |bit| (byte >> bit) & 1 == 1))
}

/// Demo text encoded by the I2C data function
pub const I2C_SAMPLE_TEXT: &str = "Hello World, this is a sample I2C bit stream!";
/// Demo text encoded by the 1-Wire data function
pub const ONE_WIRE_SAMPLE_TEXT: &str = "Hello World, this is a sample 1-wire bit stream!";
/// Demo text encoded by the Manchester data function
pub const MANCHESTER_SAMPLE_TEXT: &str = "Hello World of Manchester encoded data!";

/// Selectable data functions of the demo device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DataFunction {
    #[default]
    #[serde(rename = "Counter")]
    Counter,
    #[serde(rename = "All zeros")]
    AllZeros,
    #[serde(rename = "Sine")]
    Sine,
    #[serde(rename = "Odd-even")]
    OddEven,
    #[serde(rename = "0x55-0xAA")]
    Alternating,
    #[serde(rename = "Random")]
    Random,
    #[serde(rename = "I2C sample")]
    I2cSample,
    #[serde(rename = "1-Wire sample")]
    OneWireSample,
    #[serde(rename = "Manchester encoded")]
    ManchesterEncoded,
    #[serde(rename = "Toggle")]
    Toggle,
}

impl DataFunction {
    /// Get all data functions, in the order the device lists them
    pub fn all() -> &'static [DataFunction] {
        &[
            DataFunction::Counter,
            DataFunction::AllZeros,
            DataFunction::Sine,
            DataFunction::OddEven,
            DataFunction::Alternating,
            DataFunction::Random,
            DataFunction::I2cSample,
            DataFunction::OneWireSample,
            DataFunction::ManchesterEncoded,
            DataFunction::Toggle,
        ]
    }

    /// Persisted/display name
    pub fn name(&self) -> &'static str {
        match self {
            DataFunction::Counter => "Counter",
            DataFunction::AllZeros => "All zeros",
            DataFunction::Sine => "Sine",
            DataFunction::OddEven => "Odd-even",
            DataFunction::Alternating => "0x55-0xAA",
            DataFunction::Random => "Random",
            DataFunction::I2cSample => "I2C sample",
            DataFunction::OneWireSample => "1-Wire sample",
            DataFunction::ManchesterEncoded => "Manchester encoded",
            DataFunction::Toggle => "Toggle",
        }
    }

    /// Fewest channels that hold every line the function drives
    pub fn required_channels(&self) -> u32 {
        match self {
            // SDA and SCL
            DataFunction::I2cSample => 2,
            // toggles channel 15
            DataFunction::Toggle => 16,
            _ => 1,
        }
    }

    /// The plain pattern behind this function, if it is one
    pub fn plain_pattern(&self) -> Option<PlainPattern> {
        match self {
            DataFunction::Counter => Some(PlainPattern::Counter),
            DataFunction::AllZeros => Some(PlainPattern::AllZeros),
            DataFunction::Sine => Some(PlainPattern::Sine),
            DataFunction::OddEven => Some(PlainPattern::OddEven),
            DataFunction::Alternating => Some(PlainPattern::Alternating),
            DataFunction::Random => Some(PlainPattern::Random),
            DataFunction::Toggle => Some(PlainPattern::Toggle),
            DataFunction::I2cSample
            | DataFunction::OneWireSample
            | DataFunction::ManchesterEncoded => None,
        }
    }

    /// Whether the function's output is reproducible
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, DataFunction::Random)
    }
}

impl fmt::Display for DataFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataFunction {
    type Err = SnifferError;

    fn from_str(s: &str) -> Result<Self> {
        DataFunction::all()
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SnifferError::InvalidArgument(format!("unknown data function: {}", s)))
    }
}
