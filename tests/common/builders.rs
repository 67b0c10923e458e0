//! Test data builders for creating captures

use logicsniffer::{AcquisitionData, AcquisitionDataBuilder};

/// Builder for evenly spaced test captures
pub struct CaptureBuilder {
    samples: usize,
    spacing: u64,
    start: u64,
    sample_rate: Option<u32>,
    channels: u32,
}

impl CaptureBuilder {
    pub fn new(samples: usize) -> Self {
        Self {
            samples,
            spacing: 1,
            start: 0,
            sample_rate: Some(1_000_000),
            channels: 8,
        }
    }

    pub fn spacing(mut self, spacing: u64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn start(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    pub fn index_only(mut self) -> Self {
        self.sample_rate = None;
        self
    }

    pub fn channels(mut self, channels: u32) -> Self {
        self.channels = channels;
        self
    }

    pub fn build(self) -> AcquisitionData {
        let mut builder = AcquisitionDataBuilder::with_capacity(self.samples);
        if let Some(rate) = self.sample_rate {
            builder.set_sample_rate(rate);
        }
        builder.set_channel_count(self.channels).unwrap();
        for i in 0..self.samples as u64 {
            builder
                .add_sample(self.start + i * self.spacing, i as u32)
                .unwrap();
        }
        builder.build().unwrap()
    }
}

/// Capture whose timeline is exactly `length` long
pub fn capture_of_length(length: u64) -> AcquisitionData {
    let mut builder = AcquisitionDataBuilder::new();
    builder.set_sample_rate(1_000_000_000);
    builder.add_sample(0, 0).unwrap();
    builder.add_sample(length, 1).unwrap();
    builder.build().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_builder() {
        let data = CaptureBuilder::new(10).spacing(5).start(100).build();
        assert_eq!(data.sample_count(), 10);
        assert_eq!(data.first_timestamp(), 100);
        assert_eq!(data.absolute_length(), 45);
    }
}
