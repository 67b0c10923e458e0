//! Acquisition model
//!
//! A capture is assembled sample by sample in an [`AcquisitionDataBuilder`]
//! and frozen into an immutable [`AcquisitionData`], which can then be shared
//! across threads freely. [`Cursor`]s are user-placed markers on the capture's
//! timeline; a [`CursorSet`] owns the fixed slots for one capture session.

pub mod builder;
pub mod cursor;
pub mod data;

pub use builder::AcquisitionDataBuilder;
pub use cursor::{Cursor, CursorSet, LabelStyle, MAX_CURSORS};
pub use data::{AcquisitionData, Sample, MAX_CHANNEL_COUNT};
