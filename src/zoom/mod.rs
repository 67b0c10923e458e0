//! Zoom engine
//!
//! [`ZoomController`] turns zoom intents into a bounded zoom factor and
//! broadcasts every committed change to its [`ZoomListener`]s. It reads the
//! view geometry and capture length through [`ViewGeometry`] and
//! [`DiagramModel`], so it has no dependency on any rendering toolkit.

mod controller;
mod state;
mod view;

pub use controller::{
    ListenerId, ZoomController, ZoomEvent, ZoomListener, DEFAULT_SNAP_EPSILON,
    DEFAULT_ZOOM_FACTOR, DEFAULT_ZOOM_RATIO, MAX_PIXEL_WIDTH, ZOOM_REGION_THRESHOLD,
};
pub use state::{ZoomAction, ZoomState};
pub use view::{DiagramModel, ViewGeometry};
