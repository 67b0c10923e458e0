//! Capture session module
//!
//! This module ties a capture to the things that are viewed with it:
//!
//! - [`SignalDiagramModel`] - the swappable capture shown in the diagram,
//!   which is also the [`DiagramModel`](crate::zoom::DiagramModel) the zoom
//!   controller reads its bounds from
//! - [`CaptureSession`] - the model plus the ten cursor slots and their
//!   label style

pub mod capture;
pub mod model;

pub use capture::CaptureSession;
pub use model::SignalDiagramModel;
