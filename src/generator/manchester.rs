//! Manchester line coding
//!
//! Every data bit occupies two half-bit samples with a transition in the
//! middle of the bit cell. With [`ManchesterPolarity::Ieee8023`] a `1` is
//! low-then-high and a `0` high-then-low; [`ManchesterPolarity::Thomas`]
//! inverts that. Bytes are sent most significant bit first.

use super::{bits_msb_first, percent, AcquisitionProgressListener, SignalGenerator};
use crate::acquisition::{AcquisitionData, AcquisitionDataBuilder, Sample};
use crate::error::{Result, SnifferError};
use serde::{Deserialize, Serialize};

/// Default half-bit period in sample ticks (10 Mbit/s at 1 GHz)
pub const DEFAULT_HALF_BIT_PERIOD: u64 = 50;

/// Which half-bit sequence encodes a `1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ManchesterPolarity {
    /// `1` = low-high, `0` = high-low
    #[default]
    Ieee8023,
    /// `1` = high-low, `0` = low-high
    Thomas,
}

impl ManchesterPolarity {
    /// Line levels of the two halves of a bit cell
    pub fn levels(&self, bit: bool) -> (bool, bool) {
        match (self, bit) {
            (ManchesterPolarity::Ieee8023, true) | (ManchesterPolarity::Thomas, false) => {
                (false, true)
            }
            (ManchesterPolarity::Ieee8023, false) | (ManchesterPolarity::Thomas, true) => {
                (true, false)
            }
        }
    }

    /// Bit encoded by a pair of half-bit levels, `None` without a transition
    pub fn bit(&self, first: bool, second: bool) -> Option<bool> {
        if first == second {
            return None;
        }
        let rising = !first && second;
        Some(match self {
            ManchesterPolarity::Ieee8023 => rising,
            ManchesterPolarity::Thomas => !rising,
        })
    }
}

/// Encodes text as a Manchester bit stream on one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManchesterEncoder {
    data: Vec<u8>,
    half_bit_period: u64,
    polarity: ManchesterPolarity,
    channel: u32,
}

impl Default for ManchesterEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ManchesterEncoder {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            half_bit_period: DEFAULT_HALF_BIT_PERIOD,
            polarity: ManchesterPolarity::default(),
            channel: 0,
        }
    }

    pub fn with_half_bit_period(mut self, ticks: u64) -> Self {
        self.half_bit_period = ticks.max(1);
        self
    }

    pub fn with_polarity(mut self, polarity: ManchesterPolarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_channel(mut self, channel: u32) -> Self {
        self.channel = channel.min(31);
        self
    }

    /// Append the bytes of `text` to the data to encode
    pub fn write_data(&mut self, text: &str) {
        self.data.extend_from_slice(text.as_bytes());
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl SignalGenerator for ManchesterEncoder {
    fn generate(
        &self,
        builder: &mut AcquisitionDataBuilder,
        progress: &dyn AcquisitionProgressListener,
    ) -> Result<()> {
        let total_bits = self.data.len() * 8;
        let mut timestamp = 0u64;
        for (i, bit) in bits_msb_first(&self.data).enumerate() {
            let (first, second) = self.polarity.levels(bit);
            builder.add_sample(timestamp, u32::from(first) << self.channel)?;
            timestamp += self.half_bit_period;
            builder.add_sample(timestamp, u32::from(second) << self.channel)?;
            timestamp += self.half_bit_period;

            if i % 8 == 7 {
                progress.acquisition_in_progress(percent(i + 1, total_bits));
            }
        }
        Ok(())
    }
}

/// Recovers bits from half-bit samples written by a [`ManchesterEncoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManchesterDecoder {
    polarity: ManchesterPolarity,
    channel: u32,
}

impl ManchesterDecoder {
    pub fn new(polarity: ManchesterPolarity, channel: u32) -> Self {
        Self { polarity, channel }
    }

    /// Decode consecutive pairs of half-bit samples into bits
    pub fn decode_half_bits(&self, samples: &[Sample]) -> Result<Vec<bool>> {
        if samples.len() % 2 != 0 {
            return Err(SnifferError::Decode(format!(
                "expected an even number of half-bit samples, got {}",
                samples.len()
            )));
        }
        samples
            .chunks_exact(2)
            .enumerate()
            .map(|(i, pair)| {
                self.polarity
                    .bit(pair[0].level(self.channel), pair[1].level(self.channel))
                    .ok_or_else(|| {
                        SnifferError::Decode(format!(
                            "bit {} at timestamp {} has no mid-cell transition",
                            i, pair[0].timestamp
                        ))
                    })
            })
            .collect()
    }

    /// Decode a whole capture into bytes
    pub fn decode(&self, data: &AcquisitionData) -> Result<Vec<u8>> {
        let bits = self.decode_half_bits(data.samples())?;
        Ok(bits_to_bytes(&bits))
    }
}

/// Pack bits, most significant first, into bytes; a trailing partial byte is dropped
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::NoProgress;

    fn encode(text: &str, encoder: ManchesterEncoder) -> AcquisitionData {
        let mut encoder = encoder;
        encoder.write_data(text);
        let mut builder = AcquisitionDataBuilder::new();
        encoder.generate(&mut builder, &NoProgress).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_each_bit_is_two_half_bits() {
        let data = encode("A", ManchesterEncoder::new().with_half_bit_period(10));
        assert_eq!(data.sample_count(), 16);
        let timestamps: Vec<u64> = data.timestamps().collect();
        assert_eq!(&timestamps[..4], &[0, 10, 20, 30]);
        // 'A' = 0b0100_0001: first bit 0 is high-low, second bit 1 is low-high
        let values: Vec<u32> = data.values().collect();
        assert_eq!(&values[..4], &[1, 0, 0, 1]);
    }

    #[test]
    fn test_round_trip_recovers_bits() {
        let data = encode("AB", ManchesterEncoder::new());
        let bits = ManchesterDecoder::default()
            .decode_half_bits(data.samples())
            .unwrap();
        let expected: Vec<bool> = bits_msb_first(b"AB").collect();
        assert_eq!(bits, expected);
        assert_eq!(bits_to_bytes(&bits), b"AB".to_vec());
    }

    #[test]
    fn test_thomas_polarity_round_trip() {
        let encoder = ManchesterEncoder::new()
            .with_polarity(ManchesterPolarity::Thomas)
            .with_channel(3);
        let data = encode("ok", encoder);
        let decoded = ManchesterDecoder::new(ManchesterPolarity::Thomas, 3)
            .decode(&data)
            .unwrap();
        assert_eq!(decoded, b"ok".to_vec());
    }

    #[test]
    fn test_decode_rejects_missing_transition() {
        let samples = [Sample::new(0, 1), Sample::new(1, 1)];
        let err = ManchesterDecoder::default()
            .decode_half_bits(&samples)
            .unwrap_err();
        assert!(matches!(err, SnifferError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        let samples = [Sample::new(0, 1)];
        assert!(ManchesterDecoder::default()
            .decode_half_bits(&samples)
            .is_err());
    }

    #[test]
    fn test_polarity_levels_are_inverse() {
        for polarity in [ManchesterPolarity::Ieee8023, ManchesterPolarity::Thomas] {
            for bit in [false, true] {
                let (a, b) = polarity.levels(bit);
                assert_eq!(polarity.bit(a, b), Some(bit));
            }
        }
    }
}
