//! View geometry stubs

use logicsniffer::zoom::ViewGeometry;
use logicsniffer::{Dimension, Rect};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Viewport scrolled to the origin whose width can be changed
pub struct FixedView {
    width: AtomicU32,
    height: u32,
}

impl FixedView {
    pub fn new(width: u32, height: u32) -> Arc<Self> {
        Arc::new(Self {
            width: AtomicU32::new(width),
            height,
        })
    }

    pub fn resize(&self, width: u32) {
        self.width.store(width, Ordering::SeqCst);
    }

    pub fn width(&self) -> u32 {
        self.width.load(Ordering::SeqCst)
    }
}

impl ViewGeometry for FixedView {
    fn visible_rect(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height)
    }

    fn preferred_size(&self) -> Dimension {
        Dimension::new(self.width(), self.height)
    }

    fn screen_height(&self) -> u32 {
        self.height
    }
}
