//! Integration tests for the zoom controller over a capture session

mod common;

use common::builders::capture_of_length;
use common::views::FixedView;
use logicsniffer::zoom::{ZoomState, MAX_PIXEL_WIDTH};
use logicsniffer::{CaptureSession, Point, ZoomAction, ZoomController, ZoomEvent};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

fn setup(width: u32, length: u64) -> (CaptureSession, Arc<FixedView>, ZoomController) {
    let mut session = CaptureSession::new();
    session.load(capture_of_length(length));
    let view = FixedView::new(width, 300);
    let zoom = session.zoom_controller(view.clone());
    (session, view, zoom)
}

#[test]
fn test_zoom_follows_loaded_capture() {
    let (mut session, _view, zoom) = setup(1_000, 10_000);
    zoom.zoom_all();
    common::assert_float_eq(zoom.factor(), 0.1, 1e-9);

    // the controller re-reads the model on every request
    session.load(capture_of_length(100_000));
    zoom.zoom_all();
    common::assert_float_eq(zoom.factor(), 0.01, 1e-9);
    assert!(zoom.is_zoom_all());
}

#[test]
fn test_cleared_model_uses_unit_bounds() {
    let (session, _view, zoom) = setup(1_000, 10_000);
    session.model().clear();
    assert_eq!(zoom.min_zoom_level(), 1.0);
    assert_eq!(zoom.max_zoom_level(), 1.0);
    zoom.zoom_default();
    assert_eq!(zoom.factor(), 1.0);
}

#[test]
fn test_maximum_dimension_within_pixel_limit() {
    let (_session, _view, zoom) = setup(800, 3_000_000);
    let event = zoom.zoom_maximum();
    assert_eq!(zoom.state(), ZoomState::new(zoom.max_zoom_level(), Some(ZoomAction::Maximum)));
    assert!(f64::from(event.dimension().width) <= MAX_PIXEL_WIDTH);
    assert!(event.dimension().width >= 800);
    assert_eq!(event.dimension().height, 300);
}

#[test]
fn test_event_sequence_seen_by_listener() {
    let (_session, _view, zoom) = setup(1_000, 10_000);
    let events = Arc::new(Mutex::new(Vec::<ZoomEvent>::new()));
    {
        let events = Arc::clone(&events);
        zoom.add_zoom_listener(Arc::new(move |e: &ZoomEvent| {
            events.lock().unwrap().push(*e)
        }));
    }

    zoom.zoom_in();
    zoom.zoom_wheel(1, Some(Point::new(250, 10)));
    assert!(zoom.zoom_region(Point::new(0, 0), Point::new(500, 0)));
    assert!(!zoom.zoom_region(Point::new(0, 0), Point::new(3, 3)));

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].action(), ZoomAction::In);
    assert_eq!(events[0].old_factor(), 1.0);
    assert_eq!(events[0].new_factor(), 2.0);
    assert_eq!(events[1].action(), ZoomAction::Out);
    assert_eq!(events[1].center_point(), Point::new(250, 10));
    assert_eq!(events[2].center_point(), Point::new(250, 0));
    common::assert_float_eq(events[2].relative_factor(), 2.0, 1e-9);
}

#[test]
fn test_resize_then_restore() {
    let (_session, view, zoom) = setup(1_000, 10_000);
    zoom.zoom_all();
    view.resize(5_000);
    let event = zoom.restore_zoom_level();
    assert_eq!(event.action(), ZoomAction::Restore);
    common::assert_float_eq(zoom.factor(), 0.5, 1e-9);
    assert!(zoom.is_zoom_all());
    assert_eq!(event.dimension().width, 5_000);
}

#[test]
fn test_mapping_with_offset_capture() {
    let mut session = CaptureSession::new();
    session.load(common::builders::CaptureBuilder::new(11).start(1_000).spacing(100).build());
    let zoom = session.zoom_controller(FixedView::new(500, 100));
    zoom.zoom_all();
    // 1000 units over 500 pixels
    assert_eq!(zoom.timestamp_to_coordinate(1_000), 0);
    assert_eq!(zoom.timestamp_to_coordinate(2_000), 500);
    assert_eq!(zoom.coordinate_to_timestamp(250), 1_500);
}

#[test]
fn test_mapping_index_only_capture_fits_view() {
    let mut session = CaptureSession::new();
    session.load(common::builders::CaptureBuilder::new(3).spacing(1_000).index_only().build());
    let zoom = session.zoom_controller(FixedView::new(300, 100));
    zoom.zoom_all();
    // three samples over 300 pixels, placed by index
    common::assert_float_eq(zoom.factor(), 100.0, 1e-9);
    assert_eq!(zoom.timestamp_to_coordinate(0), 0);
    assert_eq!(zoom.timestamp_to_coordinate(1_000), 100);
    assert_eq!(zoom.timestamp_to_coordinate(2_000), 200);
    assert_eq!(zoom.timestamp_to_coordinate(1_500), 100);
    assert_eq!(zoom.coordinate_to_timestamp(150), 1_000);
    assert_eq!(zoom.coordinate_to_timestamp(299), 2_000);
    assert_eq!(zoom.coordinate_to_timestamp(5_000), 2_000);
}

proptest! {
    #[test]
    fn prop_zoom_all_factor(width in 1u32..5_000, length in 1u64..100_000_000) {
        let (_session, _view, zoom) = setup(width, length);
        zoom.zoom_all();
        let expected = f64::from(width) / length as f64;
        prop_assert!((zoom.factor() - expected).abs() < 1e-6);
    }

    #[test]
    fn prop_in_out_round_trip(width in 1u32..2_000, length in 1_000u64..1_000_000, ins in 0usize..6) {
        let (_session, _view, zoom) = setup(width, length);
        zoom.zoom_all();
        let start = zoom.factor();
        // stay clear of the bounds so nothing clamps
        let room = zoom.max_zoom_level() / start;
        let steps = ins.min(room.log2().floor().max(0.0) as usize);
        for _ in 0..steps {
            zoom.zoom_in();
        }
        for _ in 0..steps {
            zoom.zoom_out();
        }
        prop_assert!((zoom.factor() - start).abs() < 1e-6);
    }

    #[test]
    fn prop_clamping_is_exact(width in 1u32..2_000, length in 1u64..1_000_000, rotations in prop::collection::vec(-8i32..=8, 1..20)) {
        let (_session, _view, zoom) = setup(width, length);
        zoom.restore_zoom_level();
        for rotation in rotations {
            zoom.zoom_wheel(rotation, None);
            match zoom.zoom_action() {
                Some(ZoomAction::All) => prop_assert_eq!(zoom.factor(), zoom.min_zoom_level()),
                Some(ZoomAction::Maximum) => prop_assert_eq!(zoom.factor(), zoom.max_zoom_level()),
                Some(ZoomAction::Default) => prop_assert_eq!(zoom.factor(), zoom.default_zoom_level()),
                _ => {
                    prop_assert!(zoom.factor() >= zoom.min_zoom_level());
                    prop_assert!(zoom.factor() <= zoom.max_zoom_level());
                }
            }
        }
    }
}
