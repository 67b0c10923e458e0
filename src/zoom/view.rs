//! Collaborators queried by the zoom controller
//!
//! The controller never caches geometry or capture length: it asks these
//! traits every time it computes bounds or a proposed view size.

use crate::acquisition::AcquisitionData;
use crate::types::{Dimension, Rect};

/// Geometry of the component rendering the signal diagram
#[cfg_attr(test, mockall::automock)]
pub trait ViewGeometry: Send + Sync {
    /// Currently visible part of the view, in view coordinates
    fn visible_rect(&self) -> Rect;

    /// Size of the visible viewport
    fn visible_view_size(&self) -> Dimension {
        self.visible_rect().size()
    }

    /// Full preferred size of the (scrollable) view
    fn preferred_size(&self) -> Dimension;

    /// Height needed to show all signal elements
    fn screen_height(&self) -> u32;
}

/// Timeline of the capture shown in the view
pub trait DiagramModel: Send + Sync {
    /// Length of the timeline, `None` while there is no capture
    fn absolute_length(&self) -> Option<u64>;

    /// Timestamp at view coordinate zero
    fn first_timestamp(&self) -> u64 {
        0
    }

    /// Position of `timestamp` in the units of [`absolute_length`](Self::absolute_length)
    fn timeline_position(&self, timestamp: u64) -> u64 {
        timestamp.saturating_sub(self.first_timestamp())
    }

    /// Timestamp at a timeline position
    fn timestamp_at(&self, position: u64) -> u64 {
        self.first_timestamp().saturating_add(position)
    }
}

impl DiagramModel for AcquisitionData {
    fn absolute_length(&self) -> Option<u64> {
        Some(AcquisitionData::absolute_length(self))
    }

    fn first_timestamp(&self) -> u64 {
        AcquisitionData::first_timestamp(self)
    }

    fn timeline_position(&self, timestamp: u64) -> u64 {
        AcquisitionData::timeline_position(self, timestamp)
    }

    fn timestamp_at(&self, position: u64) -> u64 {
        self.timestamp_at_position(position)
    }
}
