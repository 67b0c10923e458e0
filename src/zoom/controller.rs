//! Zoom controller
//!
//! Maps the capture timeline onto a pixel viewport. The zoom factor is the
//! number of pixels per timeline unit; it is kept between a minimum level,
//! where the whole capture fits the visible width, and a maximum level, where
//! the full view would just reach [`MAX_PIXEL_WIDTH`].
//!
//! Every transition runs the same steps:
//!
//! 1. read the current factor
//! 2. compute the new factor from the requested [`ZoomAction`]
//! 3. snap to the default level when within [`DEFAULT_SNAP_EPSILON`], then
//!    clamp into `[min, max]`, turning the action into `All` or `Maximum`
//! 4. commit the new state atomically and notify every listener
//!
//! Malformed geometry never produces an error; it is clamped away.

use super::state::{AtomicZoomState, ZoomAction, ZoomState};
use super::view::{DiagramModel, ViewGeometry};
use crate::types::{Dimension, Point};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Zoom factor of a freshly created controller
pub const DEFAULT_ZOOM_FACTOR: f64 = 1.0;

/// Ratio applied by a single zoom in (its inverse for zoom out)
pub const DEFAULT_ZOOM_RATIO: f64 = 2.0;

/// Widest view, in pixels, a rendering surface can address
pub const MAX_PIXEL_WIDTH: f64 = i32::MAX as f64;

/// Factors this close to the default level snap onto it
pub const DEFAULT_SNAP_EPSILON: f64 = 1.0e-6;

/// Region selections shorter than this are treated as accidental drags
pub const ZOOM_REGION_THRESHOLD: f64 = 10.0;

/// A committed zoom transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomEvent {
    action: ZoomAction,
    old_factor: f64,
    new_factor: f64,
    center_point: Point,
    dimension: Dimension,
}

impl ZoomEvent {
    /// The action that was requested
    pub fn action(&self) -> ZoomAction {
        self.action
    }

    pub fn old_factor(&self) -> f64 {
        self.old_factor
    }

    pub fn new_factor(&self) -> f64 {
        self.new_factor
    }

    /// Ratio between the new and the old factor
    pub fn relative_factor(&self) -> f64 {
        self.new_factor / self.old_factor
    }

    /// Point the view should keep in place
    pub fn center_point(&self) -> Point {
        self.center_point
    }

    /// Proposed size of the full view
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }
}

impl fmt::Display for ZoomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ZoomEvent[action = {}, old = {:.6}, new = {:.6}, center = {}, dim = {}]",
            self.action, self.old_factor, self.new_factor, self.center_point, self.dimension
        )
    }
}

/// Receives every committed zoom transition
pub trait ZoomListener: Send + Sync {
    fn notify_zoom_change(&self, event: &ZoomEvent);
}

impl<F> ZoomListener for F
where
    F: Fn(&ZoomEvent) + Send + Sync,
{
    fn notify_zoom_change(&self, event: &ZoomEvent) {
        self(event)
    }
}

/// Handle returned when registering a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::SeqCst))
    }
}

/// Zoom bounds derived from the current geometry and capture
#[derive(Debug, Clone, Copy, PartialEq)]
struct ZoomBounds {
    min: f64,
    max: f64,
    default: f64,
}

/// Controls the zoom level of one signal diagram
pub struct ZoomController {
    view: Arc<dyn ViewGeometry>,
    model: Arc<dyn DiagramModel>,
    state: AtomicZoomState,
    listeners: RwLock<Vec<(ListenerId, Arc<dyn ZoomListener>)>>,
}

impl fmt::Debug for ZoomController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomController")
            .field("state", &self.state)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ZoomController {
    /// Create a controller at the default zoom level
    pub fn new(view: Arc<dyn ViewGeometry>, model: Arc<dyn DiagramModel>) -> Self {
        Self {
            view,
            model,
            state: AtomicZoomState::new(ZoomState::new(
                DEFAULT_ZOOM_FACTOR,
                Some(ZoomAction::Default),
            )),
            listeners: RwLock::new(Vec::new()),
        }
    }

    // ==================== Listeners ====================

    pub fn add_zoom_listener(&self, listener: Arc<dyn ZoomListener>) -> ListenerId {
        let id = ListenerId::next();
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, listener));
        id
    }

    /// Unregister a listener; returns whether it was registered
    pub fn remove_zoom_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .map(|l| l.len())
            .unwrap_or_else(|e| e.into_inner().len())
    }

    // ==================== Queries ====================

    /// Current zoom factor; `1.0` if the stored factor is not a number
    pub fn factor(&self) -> f64 {
        let factor = self.state.load().factor;
        if factor.is_nan() {
            DEFAULT_ZOOM_FACTOR
        } else {
            factor
        }
    }

    /// Action of the last committed transition, `None` after a plain in/out
    pub fn zoom_action(&self) -> Option<ZoomAction> {
        self.state.load().action
    }

    pub fn state(&self) -> ZoomState {
        self.state.load()
    }

    pub fn is_zoom_all(&self) -> bool {
        self.zoom_action() == Some(ZoomAction::All)
    }

    pub fn is_zoom_default(&self) -> bool {
        self.zoom_action() == Some(ZoomAction::Default)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.factor() < self.max_zoom_level()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.factor() > self.min_zoom_level()
    }

    /// Level at which the whole capture fits the visible width
    pub fn min_zoom_level(&self) -> f64 {
        self.bounds().min
    }

    /// Most detailed level that keeps the view within [`MAX_PIXEL_WIDTH`]
    pub fn max_zoom_level(&self) -> f64 {
        self.bounds().max
    }

    /// `max(min_zoom_level, 1.0)`
    pub fn default_zoom_level(&self) -> f64 {
        self.bounds().default
    }

    // ==================== Pixel/time mapping ====================

    /// View x coordinate of `timestamp` at the current factor
    pub fn timestamp_to_coordinate(&self, timestamp: u64) -> i32 {
        let position = self.model.timeline_position(timestamp) as f64;
        (position * self.factor()).round().clamp(0.0, MAX_PIXEL_WIDTH) as i32
    }

    /// Timestamp shown at view x coordinate `x`
    pub fn coordinate_to_timestamp(&self, x: i32) -> u64 {
        let position = (f64::from(x.max(0)) / self.factor()).floor();
        self.model.timestamp_at(position as u64)
    }

    // ==================== Transitions ====================

    /// Zoom in by [`DEFAULT_ZOOM_RATIO`] around the view center
    pub fn zoom_in(&self) -> ZoomEvent {
        self.zoom(ZoomAction::In, DEFAULT_ZOOM_RATIO, None)
    }

    /// Zoom out by [`DEFAULT_ZOOM_RATIO`] around the view center
    pub fn zoom_out(&self) -> ZoomEvent {
        self.zoom(ZoomAction::Out, 1.0 / DEFAULT_ZOOM_RATIO, None)
    }

    /// Fit the whole capture in the visible width
    pub fn zoom_all(&self) -> ZoomEvent {
        self.zoom(ZoomAction::All, self.min_zoom_level(), None)
    }

    pub fn zoom_default(&self) -> ZoomEvent {
        self.zoom(ZoomAction::Default, self.default_zoom_level(), None)
    }

    pub fn zoom_maximum(&self) -> ZoomEvent {
        self.zoom(ZoomAction::Maximum, self.max_zoom_level(), None)
    }

    /// Re-broadcast the current level, e.g. after the view was resized
    pub fn restore_zoom_level(&self) -> ZoomEvent {
        let factor = self.state.load().factor;
        self.zoom(ZoomAction::Restore, factor, None)
    }

    /// Zoom by a mouse wheel rotation.
    ///
    /// Negative rotations zoom in, positive ones zoom out, each notch by
    /// [`DEFAULT_ZOOM_RATIO`]. A zero rotation does nothing.
    pub fn zoom_wheel(&self, rotation: i32, point: Option<Point>) -> Option<ZoomEvent> {
        let notches = f64::from(rotation).abs();
        if rotation > 0 {
            Some(self.zoom(ZoomAction::Out, 1.0 / (notches * DEFAULT_ZOOM_RATIO), point))
        } else if rotation < 0 {
            Some(self.zoom(ZoomAction::In, notches * DEFAULT_ZOOM_RATIO, point))
        } else {
            None
        }
    }

    /// Zoom so that the horizontal span between two points fills the visible
    /// width, centered on their midpoint.
    ///
    /// Returns `false` without zooming when the points are closer than
    /// [`ZOOM_REGION_THRESHOLD`].
    pub fn zoom_region(&self, p1: Point, p2: Point) -> bool {
        if p1.distance(&p2) < ZOOM_REGION_THRESHOLD {
            return false;
        }
        let span = (i64::from(p2.x) - i64::from(p1.x)).unsigned_abs().max(1) as f64;
        let ratio = f64::from(self.view.visible_view_size().width) / span;
        let center = Point::new(
            ((i64::from(p1.x) + i64::from(p2.x)) / 2) as i32,
            ((i64::from(p1.y) + i64::from(p2.y)) / 2) as i32,
        );
        self.zoom(ZoomAction::In, ratio, Some(center));
        true
    }

    fn data_length(&self) -> Option<f64> {
        self.model
            .absolute_length()
            .filter(|&length| length > 0)
            .map(|length| length as f64)
    }

    fn bounds(&self) -> ZoomBounds {
        let Some(length) = self.data_length() else {
            return ZoomBounds {
                min: DEFAULT_ZOOM_FACTOR,
                max: DEFAULT_ZOOM_FACTOR,
                default: DEFAULT_ZOOM_FACTOR,
            };
        };

        let width = f64::from(self.view.visible_view_size().width);
        let mut min = width / length;
        if min <= 0.0 || !min.is_finite() {
            min = f64::MIN_POSITIVE;
        }
        let max = (MAX_PIXEL_WIDTH / length).floor().max(min);
        ZoomBounds {
            min,
            max,
            default: min.max(DEFAULT_ZOOM_FACTOR),
        }
    }

    fn zoom(&self, action: ZoomAction, factor: f64, center: Option<Point>) -> ZoomEvent {
        let old_factor = self.factor();
        let bounds = self.bounds();
        let visible = self.view.visible_view_size();
        let visible_width = f64::from(visible.width);

        let mut new_factor = match action {
            ZoomAction::In | ZoomAction::Out => factor * old_factor,
            ZoomAction::All => self
                .data_length()
                .map_or(bounds.min, |length| visible_width / length),
            ZoomAction::Maximum => bounds.max,
            ZoomAction::Default => bounds.default,
            ZoomAction::Restore => old_factor,
        };
        let mut new_action = (!action.is_relative()).then_some(action);

        if (new_factor - bounds.default).abs() < DEFAULT_SNAP_EPSILON {
            new_factor = bounds.default;
            new_action = Some(ZoomAction::Default);
        }
        if new_factor < bounds.min {
            tracing::debug!(requested = new_factor, min = bounds.min, "Zoom clamped to all");
            new_factor = bounds.min;
            new_action = Some(ZoomAction::All);
        } else if new_factor > bounds.max {
            tracing::debug!(requested = new_factor, max = bounds.max, "Zoom clamped to maximum");
            new_factor = bounds.max;
            new_action = Some(ZoomAction::Maximum);
        }

        let center_point = center.unwrap_or_else(|| {
            Point::new(self.view.visible_rect().center_x() as i32, 0)
        });
        let dimension = self.proposed_dimension(new_action, new_factor, factor);

        self.state.replace(ZoomState::new(new_factor, new_action));

        let event = ZoomEvent {
            action,
            old_factor,
            new_factor,
            center_point,
            dimension,
        };
        tracing::trace!("{}", event);
        self.fire_zoom_event(&event);
        event
    }

    /// View size matching the committed state
    fn proposed_dimension(&self, action: Option<ZoomAction>, factor: f64, ratio: f64) -> Dimension {
        let visible = self.view.visible_view_size();
        let preferred = self.view.preferred_size();
        let length = self.data_length().unwrap_or(0.0);

        let width = match action {
            Some(ZoomAction::All) => f64::from(visible.width),
            Some(ZoomAction::Maximum) | Some(ZoomAction::Default) => length * factor,
            Some(ZoomAction::Restore) => f64::from(preferred.width),
            Some(ZoomAction::In) | Some(ZoomAction::Out) | None => {
                f64::from(preferred.width) * ratio
            }
        };
        let width = width.clamp(f64::from(visible.width), MAX_PIXEL_WIDTH.max(f64::from(visible.width)));
        let height = self.view.screen_height().max(visible.height);

        Dimension::new(width as u32, height)
    }

    fn fire_zoom_event(&self, event: &ZoomEvent) {
        // Snapshot so listeners may (un)register while being notified
        let listeners: Vec<Arc<dyn ZoomListener>> = self
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener.notify_zoom_change(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;
    use crate::zoom::view::MockViewGeometry;
    use proptest::prelude::*;
    use std::sync::atomic::AtomicU32;
    use std::sync::Mutex;

    /// View whose visible width can change between calls
    struct TestView {
        width: AtomicU32,
        height: u32,
    }

    impl TestView {
        fn new(width: u32, height: u32) -> Arc<Self> {
            Arc::new(Self {
                width: AtomicU32::new(width),
                height,
            })
        }

        fn resize(&self, width: u32) {
            self.width.store(width, Ordering::SeqCst);
        }
    }

    impl ViewGeometry for TestView {
        fn visible_rect(&self) -> Rect {
            Rect::new(0, 0, self.width.load(Ordering::SeqCst), self.height)
        }

        fn preferred_size(&self) -> Dimension {
            Dimension::new(self.width.load(Ordering::SeqCst), self.height)
        }

        fn screen_height(&self) -> u32 {
            self.height / 2
        }
    }

    struct Length(Option<u64>);

    impl DiagramModel for Length {
        fn absolute_length(&self) -> Option<u64> {
            self.0
        }
    }

    fn controller(width: u32, length: Option<u64>) -> ZoomController {
        ZoomController::new(TestView::new(width, 400), Arc::new(Length(length)))
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }

    #[test]
    fn test_initial_state_is_default() {
        let zc = controller(800, Some(1_000));
        assert_eq!(zc.factor(), 1.0);
        assert!(zc.is_zoom_default());
        assert!(!zc.is_zoom_all());
    }

    #[test]
    fn test_bounds() {
        let zc = controller(800, Some(1_000));
        assert_close(zc.min_zoom_level(), 0.8);
        assert_eq!(zc.max_zoom_level(), (i32::MAX as f64 / 1_000.0).floor());
        assert_eq!(zc.default_zoom_level(), 1.0);

        // capture narrower than the view: default follows min
        let zc = controller(800, Some(100));
        assert_close(zc.default_zoom_level(), 8.0);
    }

    #[test]
    fn test_bounds_without_data() {
        for zc in [controller(800, None), controller(800, Some(0))] {
            assert_eq!(zc.min_zoom_level(), 1.0);
            assert_eq!(zc.max_zoom_level(), 1.0);
            assert!(!zc.can_zoom_in());
            assert!(!zc.can_zoom_out());
            let event = zc.zoom_in();
            assert_eq!(event.new_factor(), 1.0);
            assert_eq!(zc.zoom_action(), Some(ZoomAction::Maximum));
        }
    }

    #[test]
    fn test_zoom_all() {
        let zc = controller(800, Some(1_000));
        let event = zc.zoom_all();
        assert_close(zc.factor(), 800.0 / 1_000.0);
        assert!(zc.is_zoom_all());
        assert_eq!(event.action(), ZoomAction::All);
        assert_eq!(event.dimension(), Dimension::new(800, 400));
        assert!(!zc.can_zoom_out());
    }

    #[test]
    fn test_zoom_all_on_short_capture_snaps_to_default() {
        // min and default coincide when the capture is narrower than the view
        let zc = controller(800, Some(100));
        zc.zoom_all();
        assert_eq!(zc.factor(), 8.0);
        assert!(zc.is_zoom_default());
        assert!(!zc.is_zoom_all());
    }

    #[test]
    fn test_only_relative_actions_clear_the_action() {
        let zc = controller(800, Some(1_000));
        zc.zoom_all();
        assert_eq!(zc.zoom_action(), Some(ZoomAction::All));
        zc.zoom_in();
        assert_eq!(zc.zoom_action(), None);
        zc.zoom_in();
        zc.restore_zoom_level();
        assert_eq!(zc.zoom_action(), Some(ZoomAction::Restore));
        zc.zoom_out();
        assert_eq!(zc.zoom_action(), None);
        zc.zoom_maximum();
        assert_eq!(zc.zoom_action(), Some(ZoomAction::Maximum));
    }

    #[test]
    fn test_in_then_out_round_trip() {
        let zc = controller(800, Some(1_000));
        let event = zc.zoom_in();
        assert_eq!(zc.factor(), 2.0);
        assert_eq!(zc.zoom_action(), None);
        assert_eq!(event.relative_factor(), 2.0);

        zc.zoom_in();
        assert_eq!(zc.factor(), 4.0);
        zc.zoom_out();
        zc.zoom_out();
        assert_eq!(zc.factor(), 1.0);
        // landed on the default level
        assert!(zc.is_zoom_default());
    }

    #[test]
    fn test_clamp_below_min_becomes_all() {
        let zc = controller(800, Some(1_000));
        zc.zoom_out();
        assert_eq!(zc.factor(), zc.min_zoom_level());
        assert_eq!(zc.zoom_action(), Some(ZoomAction::All));
    }

    #[test]
    fn test_clamp_above_max_becomes_maximum() {
        let zc = controller(800, Some(1_000));
        zc.zoom_maximum();
        assert!(!zc.can_zoom_in());
        let event = zc.zoom_in();
        assert_eq!(event.action(), ZoomAction::In);
        assert_eq!(zc.factor(), zc.max_zoom_level());
        assert_eq!(zc.zoom_action(), Some(ZoomAction::Maximum));
        assert_eq!(event.relative_factor(), 1.0);
    }

    #[test]
    fn test_near_default_snaps() {
        let zc = controller(800, Some(1_000));
        zc.zoom(ZoomAction::In, 1.0 + 1e-9, None);
        assert_eq!(zc.factor(), 1.0);
        assert!(zc.is_zoom_default());
    }

    #[test]
    fn test_restore_after_resize() {
        let view = TestView::new(800, 400);
        let zc = ZoomController::new(view.clone(), Arc::new(Length(Some(1_000))));
        zc.zoom_all();

        let event = zc.restore_zoom_level();
        assert_eq!(event.action(), ZoomAction::Restore);
        assert_close(zc.factor(), 0.8);
        assert_eq!(zc.zoom_action(), Some(ZoomAction::Restore));

        // a wider view raises the minimum; the old factor clamps up to it
        view.resize(2_000);
        zc.restore_zoom_level();
        assert_close(zc.factor(), 2.0);
        assert!(zc.is_zoom_all());
    }

    #[test]
    fn test_wheel() {
        let zc = controller(800, Some(1_000));
        assert!(zc.zoom_wheel(0, None).is_none());

        let event = zc.zoom_wheel(-2, Some(Point::new(10, 20))).unwrap();
        assert_eq!(event.action(), ZoomAction::In);
        assert_eq!(zc.factor(), 4.0);
        assert_eq!(event.center_point(), Point::new(10, 20));

        let event = zc.zoom_wheel(2, None).unwrap();
        assert_eq!(event.action(), ZoomAction::Out);
        assert_eq!(zc.factor(), 1.0);
    }

    #[test]
    fn test_default_center_point() {
        let zc = controller(800, Some(1_000));
        assert_eq!(zc.zoom_in().center_point(), Point::new(400, 0));
    }

    #[test]
    fn test_zoom_region_threshold() {
        let zc = controller(800, Some(100_000));
        assert!(!zc.zoom_region(Point::new(0, 0), Point::new(6, 7)));
        assert!(zc.is_zoom_default());

        assert!(zc.zoom_region(Point::new(100, 0), Point::new(300, 0)));
        assert_close(zc.factor(), 4.0);
    }

    #[test]
    fn test_zoom_region_vertical_drag_clamps() {
        let zc = controller(800, Some(1_000));
        assert!(zc.zoom_region(Point::new(50, 0), Point::new(50, 40)));
        assert!(zc.factor() <= zc.max_zoom_level());
    }

    #[test]
    fn test_listeners_in_registration_order() {
        let zc = controller(800, Some(1_000));
        let calls = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let calls = Arc::clone(&calls);
            zc.add_zoom_listener(Arc::new(move |_: &ZoomEvent| calls.lock().unwrap().push(1)))
        };
        {
            let calls = Arc::clone(&calls);
            zc.add_zoom_listener(Arc::new(move |e: &ZoomEvent| {
                assert_eq!(e.action(), ZoomAction::In);
                calls.lock().unwrap().push(2)
            }));
        }

        zc.zoom_in();
        assert_eq!(*calls.lock().unwrap(), vec![1, 2]);

        assert!(zc.remove_zoom_listener(first));
        assert!(!zc.remove_zoom_listener(first));
        zc.zoom_in();
        assert_eq!(*calls.lock().unwrap(), vec![1, 2, 2]);
    }

    #[test]
    fn test_listener_may_unregister_itself() {
        let zc = Arc::new(controller(800, Some(1_000)));
        let id_slot = Arc::new(Mutex::new(None));
        let listener = {
            let zc = Arc::downgrade(&zc);
            let id_slot = Arc::clone(&id_slot);
            move |_: &ZoomEvent| {
                if let (Some(zc), Some(id)) = (zc.upgrade(), *id_slot.lock().unwrap()) {
                    zc.remove_zoom_listener(id);
                }
            }
        };
        let id = zc.add_zoom_listener(Arc::new(listener));
        *id_slot.lock().unwrap() = Some(id);

        zc.zoom_in();
        assert_eq!(zc.listener_count(), 0);
    }

    #[test]
    fn test_mocked_geometry() {
        let mut view = MockViewGeometry::new();
        view.expect_visible_rect()
            .returning(|| Rect::new(0, 0, 500, 300));
        view.expect_visible_view_size()
            .returning(|| Dimension::new(500, 300));
        view.expect_preferred_size()
            .returning(|| Dimension::new(500, 300));
        view.expect_screen_height().returning(|| 900);

        let zc = ZoomController::new(Arc::new(view), Arc::new(Length(Some(250))));
        let event = zc.zoom_default();
        // min 2.0 exceeds 1.0, so it is the default
        assert_eq!(zc.factor(), 2.0);
        assert_eq!(event.dimension(), Dimension::new(500, 900));
    }

    #[test]
    fn test_pixel_time_mapping() {
        let zc = controller(800, Some(1_000));
        zc.zoom_in();
        assert_eq!(zc.timestamp_to_coordinate(100), 200);
        assert_eq!(zc.coordinate_to_timestamp(200), 100);
        assert_eq!(zc.coordinate_to_timestamp(-5), 0);
    }

    #[test]
    fn test_concurrent_zooming_stays_in_bounds() {
        let zc = Arc::new(controller(800, Some(1_000)));
        let notified = Arc::new(AtomicU64::new(0));
        {
            let notified = Arc::clone(&notified);
            zc.add_zoom_listener(Arc::new(move |_: &ZoomEvent| {
                notified.fetch_add(1, Ordering::SeqCst);
            }));
        }

        let threads: Vec<_> = (0..4)
            .map(|t| {
                let zc = Arc::clone(&zc);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        if t % 2 == 0 {
                            zc.zoom_in();
                        } else {
                            zc.zoom_out();
                        }
                        let factor = zc.factor();
                        assert!(factor >= zc.min_zoom_level() && factor <= zc.max_zoom_level());
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(notified.load(Ordering::SeqCst), 1_000);
    }

    proptest! {
        #[test]
        fn prop_zoom_all_matches_width_over_length(width in 1u32..4_000, length in 1u64..10_000_000) {
            let zc = controller(width, Some(length));
            zc.zoom_all();
            let expected = f64::from(width) / length as f64;
            // a capture narrower than the view snaps onto the default level
            if expected >= 1.0 {
                prop_assert!(zc.is_zoom_default());
            } else {
                prop_assert!(zc.is_zoom_all());
            }
            prop_assert!((zc.factor() - expected).abs() < 1e-6);
        }

        #[test]
        fn prop_factor_always_within_bounds(
            width in 1u32..4_000,
            length in 1u64..1_000_000_000,
            steps in prop::collection::vec(-3i32..=3, 0..40),
        ) {
            let zc = controller(width, Some(length));
            zc.restore_zoom_level();
            for rotation in steps {
                zc.zoom_wheel(rotation, None);
                let factor = zc.factor();
                prop_assert!(factor >= zc.min_zoom_level());
                prop_assert!(factor <= zc.max_zoom_level());
            }
        }
    }
}
