//! Capture session: the shown capture plus its cursors

use super::SignalDiagramModel;
use crate::acquisition::{AcquisitionData, Cursor, CursorSet, LabelStyle};
use crate::error::{Result, SnifferError};
use crate::zoom::{ViewGeometry, ZoomController};
use std::sync::Arc;

/// One open capture with its cursor slots.
///
/// Cursors are owned by the session for its whole lifetime; loading a new
/// capture makes all of them undefined but keeps labels and colors.
#[derive(Debug)]
pub struct CaptureSession {
    model: Arc<SignalDiagramModel>,
    cursors: CursorSet,
    label_style: LabelStyle,
    cursors_visible: bool,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            model: Arc::new(SignalDiagramModel::new()),
            cursors: CursorSet::new(),
            label_style: LabelStyle::default(),
            cursors_visible: true,
        }
    }

    /// Shared handle to the diagram model, e.g. for a [`ZoomController`]
    pub fn model(&self) -> Arc<SignalDiagramModel> {
        Arc::clone(&self.model)
    }

    /// Zoom controller over this session's model and the given view
    pub fn zoom_controller(&self, view: Arc<dyn ViewGeometry>) -> ZoomController {
        ZoomController::new(view, self.model())
    }

    /// Show a new capture and reset the cursors
    pub fn load(&mut self, data: impl Into<Arc<AcquisitionData>>) {
        self.model.set_data(data);
        self.cursors.clear_all();
    }

    pub fn data(&self) -> Option<Arc<AcquisitionData>> {
        self.model.data()
    }

    pub fn cursors(&self) -> &CursorSet {
        &self.cursors
    }

    pub fn cursors_mut(&mut self) -> &mut CursorSet {
        &mut self.cursors
    }

    pub fn cursor(&self, index: usize) -> Result<&Cursor> {
        self.cursors.get(index)
    }

    pub fn label_style(&self) -> LabelStyle {
        self.label_style
    }

    pub fn set_label_style(&mut self, style: LabelStyle) {
        self.label_style = style;
    }

    pub fn cursors_visible(&self) -> bool {
        self.cursors_visible
    }

    pub fn set_cursors_visible(&mut self, visible: bool) {
        self.cursors_visible = visible;
    }

    /// Place cursor `index` at `timestamp`, which must lie within the capture
    pub fn place_cursor(&mut self, index: usize, timestamp: u64) -> Result<()> {
        let data = self.model.require_data()?;
        if timestamp < data.first_timestamp() || timestamp > data.last_timestamp() {
            return Err(SnifferError::InvalidArgument(format!(
                "timestamp {} outside capture [{}, {}]",
                timestamp,
                data.first_timestamp(),
                data.last_timestamp()
            )));
        }
        self.cursors.get_mut(index)?.set_timestamp(timestamp);
        Ok(())
    }

    /// Place the next free cursor at `timestamp`, returning its index
    pub fn add_cursor(&mut self, timestamp: u64) -> Result<usize> {
        let index = self.cursors.first_undefined().ok_or_else(|| {
            SnifferError::InvalidArgument("all cursors are in use".to_string())
        })?;
        self.place_cursor(index, timestamp)?;
        Ok(index)
    }

    /// Time between two defined cursors, in timeline units
    pub fn cursor_distance(&self, a: usize, b: usize) -> Result<u64> {
        let a = self.cursors.get(a)?.timestamp()?;
        let b = self.cursors.get(b)?.timestamp()?;
        Ok(a.abs_diff(b))
    }

    /// Labels of the defined cursors in timestamp order, in the current style
    pub fn cursor_labels(&self) -> Vec<(usize, String)> {
        let rate = self.model.sample_rate();
        self.cursors
            .defined()
            .into_iter()
            .map(|c| (c.index(), c.styled_label(self.label_style, rate)))
            .collect()
    }
}
