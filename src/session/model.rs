//! Signal diagram model
//!
//! Holds the capture currently shown in the signal diagram. A new capture
//! replaces the old one as a whole; readers get a shared handle to an
//! immutable [`AcquisitionData`] and never see a half-loaded capture.

use crate::acquisition::AcquisitionData;
use crate::error::{Result, SnifferError};
use crate::zoom::DiagramModel;
use std::sync::{Arc, RwLock};

/// The capture shown in a signal diagram, if any
#[derive(Debug, Default)]
pub struct SignalDiagramModel {
    data: RwLock<Option<Arc<AcquisitionData>>>,
}

impl SignalDiagramModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: impl Into<Arc<AcquisitionData>>) -> Self {
        Self {
            data: RwLock::new(Some(data.into())),
        }
    }

    /// Show `data`, returning the capture it replaces
    pub fn set_data(&self, data: impl Into<Arc<AcquisitionData>>) -> Option<Arc<AcquisitionData>> {
        let data = data.into();
        tracing::debug!(
            samples = data.sample_count(),
            channels = data.channel_count(),
            "Signal diagram capture replaced"
        );
        self.data
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .replace(data)
    }

    /// Remove the current capture
    pub fn clear(&self) -> Option<Arc<AcquisitionData>> {
        self.data.write().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub fn data(&self) -> Option<Arc<AcquisitionData>> {
        self.data
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn has_data(&self) -> bool {
        self.data().is_some()
    }

    /// The current capture, or `UndefinedState` when there is none
    pub fn require_data(&self) -> Result<Arc<AcquisitionData>> {
        self.data().ok_or_else(|| {
            SnifferError::UndefinedState("signal diagram has no capture".to_string())
        })
    }

    pub fn sample_rate(&self) -> Option<u32> {
        self.data().and_then(|d| d.sample_rate())
    }

    /// Channel count of the current capture, `UndefinedState` without one
    pub fn channel_count(&self) -> Result<u32> {
        Ok(self.require_data()?.channel_count())
    }
}

impl DiagramModel for SignalDiagramModel {
    fn absolute_length(&self) -> Option<u64> {
        self.data().map(|d| d.absolute_length())
    }

    fn first_timestamp(&self) -> u64 {
        self.data().map(|d| d.first_timestamp()).unwrap_or(0)
    }

    fn timeline_position(&self, timestamp: u64) -> u64 {
        self.data().map(|d| d.timeline_position(timestamp)).unwrap_or(timestamp)
    }

    fn timestamp_at(&self, position: u64) -> u64 {
        self.data().map(|d| d.timestamp_at_position(position)).unwrap_or(position)
    }
}
