//! Plain sample patterns
//!
//! Each pattern writes one sample per tick, with timestamps `0..sample_count`,
//! and marks the trigger a quarter into the capture.

use super::{percent, AcquisitionProgressListener, SignalGenerator};
use crate::acquisition::AcquisitionDataBuilder;
use crate::error::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Enabled channel mask used by the toggle pattern
pub const TOGGLE_CHANNEL_MASK: u32 = 0x0000_FF00;

/// Pattern for generating plain demo data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlainPattern {
    /// Byte-wise counter, mirrored on alternate bytes
    Counter,
    /// Every channel low
    AllZeros,
    /// Sine wave over the lowest 16 channels, on an index-only timeline
    Sine,
    /// `0x55` / `0xAA` alternating every sample
    OddEven,
    /// `0x55` every fourth sample, `0xAA` otherwise
    Alternating,
    /// Random values
    Random,
    /// Channel 15 toggling every four samples, only channels 8..16 enabled
    Toggle,
}

impl PlainPattern {
    /// Value of sample `index` for a capture with `channel_count` channels
    ///
    /// `toggle_state` carries the toggle pattern's state between samples.
    fn value(&self, index: usize, channel_count: u32, toggle_state: &mut bool) -> u32 {
        match self {
            PlainPattern::Counter => {
                let v = ((index / 8) & 0xff) as u32;
                (255 - v) | (v << 8) | ((255 - v) << 16) | (v << 24)
            }
            PlainPattern::AllZeros => 0x00,
            PlainPattern::Sine => {
                let max = ((1u64 << channel_count.min(16)) - 1) as f64;
                let half = max / 2.0;
                let factor = (2.0 * std::f64::consts::PI) / max;
                (half + half * (index as f64 * factor).sin()) as u32
            }
            PlainPattern::OddEven => {
                if index % 2 == 0 {
                    0x55
                } else {
                    0xAA
                }
            }
            PlainPattern::Alternating => {
                if index % 4 == 0 {
                    0x55
                } else {
                    0xAA
                }
            }
            PlainPattern::Random => rand::thread_rng().gen(),
            PlainPattern::Toggle => {
                if index % 4 == 0 {
                    *toggle_state = !*toggle_state;
                }
                if *toggle_state {
                    0x0000
                } else {
                    0x8000
                }
            }
        }
    }
}

/// Writes a plain pattern of a fixed length
#[derive(Debug, Clone, PartialEq)]
pub struct PatternGenerator {
    pattern: PlainPattern,
    sample_count: usize,
    channel_count: u32,
}

impl PatternGenerator {
    pub fn new(pattern: PlainPattern, sample_count: usize, channel_count: u32) -> Self {
        Self {
            pattern,
            sample_count,
            channel_count,
        }
    }

    pub fn pattern(&self) -> PlainPattern {
        self.pattern
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }
}

impl SignalGenerator for PatternGenerator {
    fn generate(
        &self,
        builder: &mut AcquisitionDataBuilder,
        progress: &dyn AcquisitionProgressListener,
    ) -> Result<()> {
        let mut toggle_state = false;
        for i in 0..self.sample_count {
            let value = self.pattern.value(i, self.channel_count, &mut toggle_state);
            builder.add_sample(i as u64, value)?;
            progress.acquisition_in_progress(percent(i, self.sample_count));
        }

        match self.pattern {
            PlainPattern::Sine => {
                builder.clear_sample_rate();
            }
            PlainPattern::Toggle => {
                builder.set_enabled_channel_mask(TOGGLE_CHANNEL_MASK);
            }
            _ => {}
        }

        if self.sample_count > 0 {
            builder.set_trigger_position((self.sample_count as f64 * 0.25) as u64);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::NoProgress;

    fn generate(pattern: PlainPattern, count: usize, channels: u32) -> Vec<u32> {
        let mut builder = AcquisitionDataBuilder::new();
        builder.set_sample_rate(1_000_000_000);
        PatternGenerator::new(pattern, count, channels)
            .generate(&mut builder, &NoProgress)
            .unwrap();
        builder.build().unwrap().values().collect()
    }

    #[test]
    fn test_counter_pattern() {
        let values = generate(PlainPattern::Counter, 17, 32);
        assert_eq!(values[0], 0x00FF_00FF);
        assert_eq!(values[7], 0x00FF_00FF);
        assert_eq!(values[8], 0x01FE_01FE);
        assert_eq!(values[16], 0x02FD_02FD);
    }

    #[test]
    fn test_odd_even_and_alternating() {
        assert_eq!(
            generate(PlainPattern::OddEven, 4, 8),
            vec![0x55, 0xAA, 0x55, 0xAA]
        );
        assert_eq!(
            generate(PlainPattern::Alternating, 5, 8),
            vec![0x55, 0xAA, 0xAA, 0xAA, 0x55]
        );
    }

    #[test]
    fn test_toggle_pattern() {
        let mut builder = AcquisitionDataBuilder::new();
        builder.set_channel_count(16).unwrap();
        PatternGenerator::new(PlainPattern::Toggle, 9, 16)
            .generate(&mut builder, &NoProgress)
            .unwrap();
        let data = builder.build().unwrap();
        let values: Vec<u32> = data.values().collect();
        assert_eq!(
            values,
            vec![0, 0, 0, 0, 0x8000, 0x8000, 0x8000, 0x8000, 0]
        );
        assert_eq!(data.enabled_channel_mask(), TOGGLE_CHANNEL_MASK);
    }

    #[test]
    fn test_sine_is_index_only() {
        let mut builder = AcquisitionDataBuilder::new();
        builder.set_sample_rate(1_000_000_000);
        PatternGenerator::new(PlainPattern::Sine, 64, 8)
            .generate(&mut builder, &NoProgress)
            .unwrap();
        let data = builder.build().unwrap();
        assert!(!data.has_timing_data());
        assert!(data.values().all(|v| v <= 0xFF));
        // sin(0) sits at the midpoint
        assert_eq!(data.samples()[0].value, 127);
    }

    #[test]
    fn test_trigger_and_progress() {
        use std::cell::RefCell;

        let reports = RefCell::new(Vec::new());
        let listener = |p: u8| reports.borrow_mut().push(p);

        let mut builder = AcquisitionDataBuilder::new();
        PatternGenerator::new(PlainPattern::AllZeros, 100, 8)
            .generate(&mut builder, &listener)
            .unwrap();
        let data = builder.build().unwrap();

        assert_eq!(data.trigger_position(), Some(25));
        let reports = reports.into_inner();
        assert_eq!(reports.len(), 100);
        assert_eq!(reports[0], 0);
        assert_eq!(reports[99], 99);
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
    }
}
