//! 1-Wire bus generator
//!
//! Writes text as 1-Wire master write slots on a single channel that idles
//! high. A transaction starts with a reset pulse followed by the slave's
//! presence pulse; every byte is then sent least significant bit first.
//!
//! Slot timings follow the recommended values for standard and overdrive
//! speed, in microseconds:
//!
//! | Param | Meaning | Standard | Overdrive |
//! |---|---|---|---|
//! | A | write-1 low time | 6 | 1.0 |
//! | B | write-1 recovery | 64 | 7.5 |
//! | C | write-0 low time | 60 | 7.5 |
//! | D | write-0 recovery | 10 | 2.5 |
//! | G | delay before reset | 0 | 2.5 |
//! | H | reset low time | 480 | 70 |
//! | I | reset release to presence sample | 70 | 8.5 |
//! | J | end of reset sequence | 410 | 40 |

use super::{percent, AcquisitionProgressListener, SignalGenerator};
use crate::acquisition::AcquisitionDataBuilder;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Bus speed, selecting a timing table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OneWireSpeed {
    #[default]
    Standard,
    Overdrive,
}

/// Slot timings in microseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneWireTiming {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub g: f64,
    pub h: f64,
    pub i: f64,
    pub j: f64,
    /// Delay from reset release until the slave pulls the bus low
    pub presence_delay: f64,
    /// Length of the slave's presence pulse
    pub presence_length: f64,
}

impl OneWireSpeed {
    pub fn timing(&self) -> OneWireTiming {
        match self {
            OneWireSpeed::Standard => OneWireTiming {
                a: 6.0,
                b: 64.0,
                c: 60.0,
                d: 10.0,
                g: 0.0,
                h: 480.0,
                i: 70.0,
                j: 410.0,
                presence_delay: 30.0,
                presence_length: 120.0,
            },
            OneWireSpeed::Overdrive => OneWireTiming {
                a: 1.0,
                b: 7.5,
                c: 7.5,
                d: 2.5,
                g: 2.5,
                h: 70.0,
                i: 8.5,
                j: 40.0,
                presence_delay: 3.0,
                presence_length: 12.0,
            },
        }
    }
}

/// Default number of sample ticks per microsecond (1 GHz sampling)
pub const DEFAULT_TICKS_PER_US: u64 = 1_000;

/// Encodes text as 1-Wire write slots
#[derive(Debug, Clone, PartialEq)]
pub struct OneWireGenerator {
    data: Vec<u8>,
    speed: OneWireSpeed,
    ticks_per_us: u64,
    channel: u32,
}

impl OneWireGenerator {
    /// Create a generator; `standard` selects standard speed, otherwise overdrive
    pub fn new(standard: bool) -> Self {
        Self::with_speed(if standard {
            OneWireSpeed::Standard
        } else {
            OneWireSpeed::Overdrive
        })
    }

    pub fn with_speed(speed: OneWireSpeed) -> Self {
        Self {
            data: Vec::new(),
            speed,
            ticks_per_us: DEFAULT_TICKS_PER_US,
            channel: 0,
        }
    }

    /// Set the sample ticks per microsecond
    pub fn with_ticks_per_us(mut self, ticks: u64) -> Self {
        self.ticks_per_us = ticks.max(1);
        self
    }

    pub fn with_channel(mut self, channel: u32) -> Self {
        self.channel = channel.min(31);
        self
    }

    pub fn speed(&self) -> OneWireSpeed {
        self.speed
    }

    /// Append the bytes of `text` to the data to send
    pub fn write_bit_stream(&mut self, text: &str) {
        self.data.extend_from_slice(text.as_bytes());
    }

    fn ticks(&self, micros: f64) -> u64 {
        (micros * self.ticks_per_us as f64).round() as u64
    }
}

impl SignalGenerator for OneWireGenerator {
    fn generate(
        &self,
        builder: &mut AcquisitionDataBuilder,
        progress: &dyn AcquisitionProgressListener,
    ) -> Result<()> {
        let timing = self.speed.timing();
        let high = 1u32 << self.channel;
        let mut t = 0u64;

        builder.add_sample(t, high)?;

        // reset and presence
        t += self.ticks(timing.g);
        builder.add_sample(t, 0)?;
        t += self.ticks(timing.h);
        builder.add_sample(t, high)?;
        let presence_start = t + self.ticks(timing.presence_delay);
        builder.add_sample(presence_start, 0)?;
        builder.add_sample(presence_start + self.ticks(timing.presence_length), high)?;
        t += self.ticks(timing.i + timing.j);

        for (n, byte) in self.data.iter().enumerate() {
            for bit in 0..8 {
                let (low, recovery) = if (byte >> bit) & 1 == 1 {
                    (timing.a, timing.b)
                } else {
                    (timing.c, timing.d)
                };
                builder.add_sample(t, 0)?;
                t += self.ticks(low);
                builder.add_sample(t, high)?;
                t += self.ticks(recovery);
            }
            progress.acquisition_in_progress(percent(n + 1, self.data.len()));
        }
        Ok(())
    }
}
