//! Mutable accumulator for captures
//!
//! Producers (the demo generators, a device driver) feed samples and metadata
//! into an [`AcquisitionDataBuilder`] and call [`build`](AcquisitionDataBuilder::build)
//! once done. Contract violations are reported at the offending call:
//!
//! - [`add_sample`](AcquisitionDataBuilder::add_sample) rejects a timestamp
//!   smaller than the previous one with [`SnifferError::InvalidSequence`]
//! - [`set_channel_count`](AcquisitionDataBuilder::set_channel_count) rejects
//!   counts outside `1..=32` with [`SnifferError::InvalidArgument`]
//! - [`build`](AcquisitionDataBuilder::build) rejects an empty builder with
//!   [`SnifferError::EmptyCapture`]
//!
//! `build` consumes the builder and moves the sample buffer into the capture,
//! so a builder can never be reused and shares nothing with its output.
//!
//! A builder is owned by one producing thread; it is `Send` but offers no
//! internal synchronization.

use super::data::{channel_bits, AcquisitionData, Sample, MAX_CHANNEL_COUNT};
use crate::error::{Result, SnifferError};

/// Accumulates samples and metadata for one capture
#[derive(Debug, Clone)]
pub struct AcquisitionDataBuilder {
    samples: Vec<Sample>,
    sample_rate: Option<u32>,
    channel_count: u32,
    enabled_channel_mask: Option<u32>,
    trigger_position: Option<u64>,
    min_timestamp: Option<u64>,
    max_timestamp: Option<u64>,
}

impl Default for AcquisitionDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AcquisitionDataBuilder {
    /// Create an empty builder: no sample rate, 32 channels, all enabled
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            sample_rate: None,
            channel_count: MAX_CHANNEL_COUNT,
            enabled_channel_mask: None,
            trigger_position: None,
            min_timestamp: None,
            max_timestamp: None,
        }
    }

    /// Create an empty builder with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Append a sample.
    ///
    /// Timestamps must be non-decreasing; equal timestamps are allowed.
    pub fn add_sample(&mut self, timestamp: u64, value: u32) -> Result<&mut Self> {
        if let Some(previous) = self.max_timestamp {
            if timestamp < previous {
                return Err(SnifferError::InvalidSequence {
                    previous,
                    timestamp,
                });
            }
        }
        self.min_timestamp.get_or_insert(timestamp);
        self.max_timestamp = Some(timestamp);
        self.samples.push(Sample::new(timestamp, value));
        Ok(self)
    }

    /// Set the sample rate in Hz; zero switches to an index-only timeline
    pub fn set_sample_rate(&mut self, rate: u32) -> &mut Self {
        self.sample_rate = (rate > 0).then_some(rate);
        self
    }

    /// Switch to an index-only timeline
    pub fn clear_sample_rate(&mut self) -> &mut Self {
        self.sample_rate = None;
        self
    }

    /// Set the number of channels, `1..=32`
    pub fn set_channel_count(&mut self, count: u32) -> Result<&mut Self> {
        if !(1..=MAX_CHANNEL_COUNT).contains(&count) {
            return Err(SnifferError::InvalidArgument(format!(
                "channel count must be between 1 and {}, got {}",
                MAX_CHANNEL_COUNT, count
            )));
        }
        self.channel_count = count;
        Ok(self)
    }

    /// Set which channels are enabled; defaults to all channels
    pub fn set_enabled_channel_mask(&mut self, mask: u32) -> &mut Self {
        self.enabled_channel_mask = Some(mask);
        self
    }

    /// Set the sample index at which the trigger fired
    pub fn set_trigger_position(&mut self, position: u64) -> &mut Self {
        self.trigger_position = Some(position);
        self
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn channel_count(&self) -> u32 {
        self.channel_count
    }

    pub fn sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }

    /// Smallest timestamp added so far
    pub fn min_timestamp(&self) -> Option<u64> {
        self.min_timestamp
    }

    /// Largest timestamp added so far
    pub fn max_timestamp(&self) -> Option<u64> {
        self.max_timestamp
    }

    /// Freeze the accumulated state into an immutable capture.
    ///
    /// Sample values are truncated to the configured channel width.
    pub fn build(self) -> Result<AcquisitionData> {
        if self.samples.is_empty() {
            return Err(SnifferError::EmptyCapture);
        }
        if let Some(position) = self.trigger_position {
            if position >= self.samples.len() as u64 {
                return Err(SnifferError::InvalidArgument(format!(
                    "trigger position {} is beyond the last sample index {}",
                    position,
                    self.samples.len() - 1
                )));
            }
        }

        let width = channel_bits(self.channel_count);
        let mut samples = self.samples;
        if width != u32::MAX {
            for sample in &mut samples {
                sample.value &= width;
            }
        }
        let mask = self.enabled_channel_mask.unwrap_or(width);

        tracing::debug!(
            samples = samples.len(),
            channels = self.channel_count,
            sample_rate = ?self.sample_rate,
            trigger = ?self.trigger_position,
            "Built acquisition data"
        );

        Ok(AcquisitionData::from_parts(
            self.sample_rate,
            self.channel_count,
            mask,
            samples,
            self.trigger_position,
        ))
    }
}
