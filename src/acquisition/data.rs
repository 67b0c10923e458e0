//! Immutable representation of one capture
//!
//! An [`AcquisitionData`] holds the captured samples together with the
//! metadata needed to interpret them: sample rate, channel layout and the
//! trigger position. It can only be obtained from
//! [`AcquisitionDataBuilder::build`](super::AcquisitionDataBuilder::build) and
//! offers no mutators, so an `Arc<AcquisitionData>` can be read from any
//! number of threads.
//!
//! # Timeline
//!
//! Samples are stored as `(timestamp, value)` pairs with non-decreasing
//! timestamps. A value holds until the next sample, so the capture is a
//! sample-and-hold trace of up to 32 digital channels. Without a sample rate
//! the timeline is index-only and has no time axis.

use serde::Serialize;

/// Largest number of channels a capture can carry (one bit per channel)
pub const MAX_CHANNEL_COUNT: u32 = 32;

/// One captured sample: a timestamp and the channel levels as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Sample {
    /// Timestamp in sample ticks
    pub timestamp: u64,
    /// Channel levels, bit `n` is channel `n`
    pub value: u32,
}

impl Sample {
    pub const fn new(timestamp: u64, value: u32) -> Self {
        Self { timestamp, value }
    }

    /// Level of a single channel in this sample
    pub fn level(&self, channel: u32) -> bool {
        channel < MAX_CHANNEL_COUNT && (self.value >> channel) & 1 == 1
    }
}

/// Bitmask with the lowest `channel_count` bits set
pub(crate) fn channel_bits(channel_count: u32) -> u32 {
    if channel_count >= MAX_CHANNEL_COUNT {
        u32::MAX
    } else {
        (1u32 << channel_count) - 1
    }
}

/// A frozen capture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquisitionData {
    sample_rate: Option<u32>,
    channel_count: u32,
    enabled_channel_mask: u32,
    samples: Vec<Sample>,
    trigger_position: Option<u64>,
}

impl AcquisitionData {
    /// Only the builder creates captures; it has already validated the parts.
    pub(crate) fn from_parts(
        sample_rate: Option<u32>,
        channel_count: u32,
        enabled_channel_mask: u32,
        samples: Vec<Sample>,
        trigger_position: Option<u64>,
    ) -> Self {
        debug_assert!(!samples.is_empty());
        debug_assert!(samples.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        Self {
            sample_rate,
            channel_count,
            enabled_channel_mask,
            samples,
            trigger_position,
        }
    }

    /// Sample rate in Hz, `None` for an index-only timeline
    pub fn sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }

    /// Whether timestamps can be converted to seconds
    pub fn has_timing_data(&self) -> bool {
        self.sample_rate.is_some()
    }

    pub fn channel_count(&self) -> u32 {
        self.channel_count
    }

    pub fn enabled_channel_mask(&self) -> u32 {
        self.enabled_channel_mask
    }

    /// Whether the given channel exists in this capture and is enabled
    pub fn is_channel_enabled(&self, channel: u32) -> bool {
        channel < self.channel_count && (self.enabled_channel_mask >> channel) & 1 == 1
    }

    /// Number of enabled channels within the channel count
    pub fn enabled_channel_count(&self) -> u32 {
        (self.enabled_channel_mask & channel_bits(self.channel_count)).count_ones()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    pub fn timestamps(&self) -> impl Iterator<Item = u64> + '_ {
        self.samples.iter().map(|s| s.timestamp)
    }

    /// Sample index at which the trigger fired, if any
    pub fn trigger_position(&self) -> Option<u64> {
        self.trigger_position
    }

    pub fn has_trigger(&self) -> bool {
        self.trigger_position.is_some()
    }

    pub fn first_timestamp(&self) -> u64 {
        self.samples.first().map(|s| s.timestamp).unwrap_or(0)
    }

    pub fn last_timestamp(&self) -> u64 {
        self.samples.last().map(|s| s.timestamp).unwrap_or(0)
    }

    /// Length of the timeline used for zoom bounds.
    ///
    /// With a sample rate this is the time span between the first and last
    /// sample; an index-only capture is as long as its sample count.
    pub fn absolute_length(&self) -> u64 {
        if self.has_timing_data() {
            self.last_timestamp() - self.first_timestamp()
        } else {
            self.samples.len() as u64
        }
    }

    /// Position of `timestamp` on the timeline measured by
    /// [`absolute_length`](Self::absolute_length).
    ///
    /// With a sample rate this is the offset from the first sample; on an
    /// index-only timeline it is the index of the sample in effect.
    pub fn timeline_position(&self, timestamp: u64) -> u64 {
        if self.has_timing_data() {
            timestamp.saturating_sub(self.first_timestamp())
        } else {
            self.sample_index_for(timestamp) as u64
        }
    }

    /// Timestamp at a timeline position, see [`timeline_position`](Self::timeline_position)
    pub fn timestamp_at_position(&self, position: u64) -> u64 {
        if self.has_timing_data() {
            return self.first_timestamp().saturating_add(position);
        }
        let index = usize::try_from(position).unwrap_or(usize::MAX);
        self.samples
            .get(index)
            .or_else(|| self.samples.last())
            .map(|s| s.timestamp)
            .unwrap_or(0)
    }

    /// Index of the sample whose value is in effect at `timestamp`.
    ///
    /// This is the last sample at or before `timestamp`; timestamps before
    /// the first sample map to index 0.
    pub fn sample_index_for(&self, timestamp: u64) -> usize {
        let upper = self.samples.partition_point(|s| s.timestamp <= timestamp);
        upper.saturating_sub(1)
    }

    /// Channel levels in effect at `timestamp`
    pub fn value_at(&self, timestamp: u64) -> u32 {
        self.samples[self.sample_index_for(timestamp)].value
    }

    /// Level of one channel at a sample index
    pub fn channel_level(&self, sample_index: usize, channel: u32) -> Option<bool> {
        if channel >= self.channel_count {
            return None;
        }
        self.samples.get(sample_index).map(|s| s.level(channel))
    }

    /// Convert a timestamp to seconds, if the capture has a time axis
    pub fn timestamp_to_seconds(&self, timestamp: u64) -> Option<f64> {
        self.sample_rate
            .map(|rate| timestamp as f64 / f64::from(rate))
    }

    /// Duration of the capture in seconds, if it has a time axis
    pub fn duration_seconds(&self) -> Option<f64> {
        self.timestamp_to_seconds(self.absolute_length())
    }
}
