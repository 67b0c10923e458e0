//! # LogicSniffer core
//!
//! The computational core of a SUMP-compatible logic analyzer client: the
//! model of a captured multi-channel digital trace, the cursors placed on
//! it, the demo device's synthetic signal generators and the zoom engine
//! mapping an arbitrarily long timeline onto a bounded pixel viewport.
//!
//! ## Architecture
//!
//! - **Acquisition**: [`AcquisitionDataBuilder`] validates raw samples and
//!   freezes them into an immutable, freely shared [`AcquisitionData`]
//! - **Generators**: plain patterns, I2C, 1-Wire and Manchester encoders
//!   writing into a builder, driven by [`TestAcquisitionTask`]
//! - **Zoom**: [`ZoomController`] keeps a lock-free `(factor, action)` state
//!   and notifies listeners of every committed transition
//! - **Session**: the shown capture and its cursors
//! - **Communication**: crossbeam channels carry acquisition progress and
//!   results from the worker thread
//!
//! ## Configuration
//!
//! Demo device settings are stored in the platform-appropriate data
//! directory under `nl.lxtreme.logicsniffer`.
//!
//! ## Example
//!
//! ```no_run
//! use logicsniffer::{DataFunction, DeviceSettings, TestAcquisitionTask};
//!
//! let settings = DeviceSettings {
//!     data_function: DataFunction::I2cSample,
//!     ..Default::default()
//! };
//! let data = TestAcquisitionTask::new(settings).spawn().wait()?;
//! println!("captured {} samples", data.sample_count());
//! # Ok::<(), logicsniffer::SnifferError>(())
//! ```

pub mod acquisition;
pub mod config;
pub mod error;
pub mod generator;
pub mod session;
pub mod types;
pub mod zoom;

// Re-export commonly used types
pub use acquisition::{AcquisitionData, AcquisitionDataBuilder, Cursor, CursorSet, LabelStyle};
pub use config::{DeviceSettings, SettingsStore};
pub use error::{Result, SnifferError};
pub use generator::{DataFunction, SignalGenerator, TestAcquisitionTask};
pub use session::{CaptureSession, SignalDiagramModel};
pub use types::{Color, Dimension, Point, Rect};
pub use zoom::{ZoomAction, ZoomController, ZoomEvent, ZoomListener};
