use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use chart_interact::core::{
    AffineTransform, BrushRect, DataPoint, Direction, Point, Viewport, ZoomExtent,
};
use chart_interact::extensions::{SurfaceContext, SurfaceEvent, SurfaceObserver};
use chart_interact::interaction::{GestureState, InteractionMode, PersistMode, WheelInput};
use chart_interact::{ChartSurface, SurfaceConfig};

type EventLog = Rc<RefCell<Vec<SurfaceEvent>>>;

struct Recorder {
    id: String,
    log: EventLog,
}

impl SurfaceObserver for Recorder {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &SurfaceEvent, _context: &SurfaceContext) {
        self.log.borrow_mut().push(event.clone());
    }
}

fn surface(mode: InteractionMode) -> ChartSurface {
    let config = SurfaceConfig::new(Viewport::new(400.0, 300.0)).with_mode(mode);
    ChartSurface::new(config).expect("surface init")
}

fn record(surface: &mut ChartSurface) -> EventLog {
    let log = EventLog::default();
    surface
        .register_observer(Box::new(Recorder {
            id: "recorder".to_owned(),
            log: Rc::clone(&log),
        }))
        .expect("register observer");
    log
}

#[test]
fn pan_mode_drag_translates_and_notifies() {
    let mut surface = surface(InteractionMode::Pan);
    let log = record(&mut surface);

    assert!(surface.pointer_down(Point::new(100.0, 100.0)));
    assert_eq!(surface.gesture_state(), GestureState::Active);
    assert!(surface.pointer_move(Point::new(130.0, 90.0)));
    assert!(surface.pointer_up(Point::new(130.0, 90.0)));

    assert_eq!(surface.transform(), AffineTransform::from_translation(30.0, -10.0));
    assert_eq!(surface.gesture_state(), GestureState::Idle);
    assert_eq!(
        *log.borrow(),
        vec![
            SurfaceEvent::PanStarted,
            SurfaceEvent::TransformChanged {
                transform: AffineTransform::from_translation(30.0, -10.0)
            },
            SurfaceEvent::PanEnded,
        ]
    );
}

#[test]
fn pan_click_reports_point() {
    let mut surface = surface(InteractionMode::Pan);
    let log = record(&mut surface);
    surface.pointer_down(Point::new(10.0, 10.0));
    surface.pointer_up(Point::new(11.0, 10.0));

    assert!(log.borrow().contains(&SurfaceEvent::Clicked {
        point: Point::new(11.0, 10.0)
    }));
    assert_eq!(surface.transform(), AffineTransform::identity());
}

#[test]
fn pan_axis_lock_is_taken_from_config() {
    let config = SurfaceConfig::new(Viewport::new(400.0, 300.0))
        .with_mode(InteractionMode::Pan)
        .with_pan_axis(Direction::X);
    let mut surface = ChartSurface::new(config).expect("surface init");
    surface.pointer_down(Point::new(0.0, 0.0));
    surface.pointer_move(Point::new(40.0, 40.0));
    surface.pointer_up(Point::new(40.0, 40.0));
    assert_eq!(surface.transform(), AffineTransform::from_translation(40.0, 0.0));
}

#[test]
fn wheel_zooms_in_pan_and_zoom_modes_only() {
    for mode in [InteractionMode::Pan, InteractionMode::Zoom] {
        let mut surface = surface(mode);
        assert!(surface.wheel(WheelInput::pixels(-100.0, 200.0, 150.0)));
        assert_relative_eq!(surface.transform().scale(), 0.1_f64.exp(), epsilon = 1e-12);
    }
    for mode in [InteractionMode::None, InteractionMode::Lasso, InteractionMode::Brush] {
        let mut surface = surface(mode);
        assert!(!surface.wheel(WheelInput::pixels(-100.0, 200.0, 150.0)));
        assert_eq!(surface.transform(), AffineTransform::identity());
    }
}

#[test]
fn wheel_is_ignored_while_pan_drag_is_active() {
    let mut surface = surface(InteractionMode::Pan);
    assert!(surface.pointer_down(Point::new(100.0, 100.0)));
    assert!(surface.pointer_move(Point::new(120.0, 100.0)));

    assert!(!surface.wheel(WheelInput::pixels(-100.0, 200.0, 200.0)));
    assert_eq!(surface.transform(), AffineTransform::from_translation(20.0, 0.0));

    assert!(surface.pointer_move(Point::new(121.0, 100.0)));
    assert_eq!(surface.transform(), AffineTransform::from_translation(21.0, 0.0));
    assert!(surface.pointer_up(Point::new(121.0, 100.0)));

    assert!(surface.wheel(WheelInput::pixels(-100.0, 200.0, 200.0)));
    assert_relative_eq!(surface.transform().scale(), 0.1_f64.exp(), epsilon = 1e-12);
}

#[test]
fn programmatic_zoom_during_pan_drag_survives_next_move() {
    let mut surface = surface(InteractionMode::Pan);
    assert!(surface.pointer_down(Point::new(100.0, 100.0)));
    assert!(surface.pointer_move(Point::new(120.0, 100.0)));

    assert!(surface.zoom_by(2.0, Point::new(0.0, 0.0)).expect("zoom"));
    let zoomed = AffineTransform::new(2.0, 40.0, 0.0).expect("transform");
    assert_eq!(surface.transform(), zoomed);

    assert!(surface.pointer_move(Point::new(125.0, 100.0)));
    assert_eq!(
        surface.transform(),
        AffineTransform::new(2.0, 45.0, 0.0).expect("transform")
    );
}

#[test]
fn zoom_mode_ignores_drags() {
    let mut surface = surface(InteractionMode::Zoom);
    assert!(!surface.pointer_down(Point::new(10.0, 10.0)));
    assert!(!surface.pointer_move(Point::new(80.0, 80.0)));
    assert!(!surface.pointer_up(Point::new(80.0, 80.0)));
    assert_eq!(surface.transform(), AffineTransform::identity());
}

#[test]
fn pinch_is_routed_only_in_zoom_mode() {
    let mut pan = surface(InteractionMode::Pan);
    assert!(!pan.pinch_start());

    let mut zoom = surface(InteractionMode::Zoom);
    assert!(zoom.pinch_start());
    assert!(zoom.pinch_update(2.0, Point::new(200.0, 150.0)));
    assert!(zoom.pinch_end());
    assert_relative_eq!(zoom.transform().scale(), 2.0);
}

#[test]
fn zoom_by_clamps_to_configured_extent() {
    let config = SurfaceConfig::new(Viewport::new(400.0, 300.0))
        .with_zoom_extent(ZoomExtent::new(1.0, 10.0));
    let mut surface = ChartSurface::new(config).expect("surface init");

    assert!(surface.zoom_by(20.0, Point::new(0.0, 0.0)).expect("valid zoom"));
    assert_relative_eq!(surface.transform().scale(), 10.0);
    assert!(!surface.zoom_by(2.0, Point::new(0.0, 0.0)).expect("valid zoom"));
    assert!(surface.zoom_by(-1.0, Point::new(0.0, 0.0)).is_err());
}

#[test]
fn containment_flag_keeps_content_covering_viewport() {
    let config = SurfaceConfig::new(Viewport::new(400.0, 300.0))
        .with_mode(InteractionMode::Pan)
        .with_constrain_to_viewport(true);
    let mut surface = ChartSurface::new(config).expect("surface init");
    surface.pointer_down(Point::new(100.0, 100.0));
    surface.pointer_move(Point::new(160.0, 120.0));
    surface.pointer_up(Point::new(160.0, 120.0));
    assert!(surface.transform().approx_eq(AffineTransform::identity(), 1e-12));
}

#[test]
fn lasso_mode_reports_completed_path() {
    let mut surface = surface(InteractionMode::Lasso);
    let log = record(&mut surface);

    surface.pointer_down(Point::new(100.0, 100.0));
    surface.pointer_move(Point::new(200.0, 100.0));
    surface.pointer_move(Point::new(200.0, 200.0));
    surface.pointer_up(Point::new(100.0, 200.0));

    let path = surface.lasso_path().expect("completed lasso").clone();
    assert_eq!(path.len(), 4);
    let events = log.borrow();
    assert_eq!(
        events.last(),
        Some(&SurfaceEvent::LassoCompleted {
            path: Some(path.clone())
        })
    );
    assert!(events.contains(&SurfaceEvent::LassoChanged { vertices: 2 }));
}

#[test]
fn lasso_selection_uses_current_transform() {
    let mut surface = surface(InteractionMode::Lasso);
    surface.pointer_down(Point::new(0.0, 0.0));
    surface.pointer_move(Point::new(200.0, 0.0));
    surface.pointer_move(Point::new(200.0, 300.0));
    surface.pointer_up(Point::new(0.0, 300.0));

    // x: [0, 10] over 400px, y: [0, 10] over 300px bottom-up.
    let points = [
        DataPoint::new(2.0, 5.0),
        DataPoint::new(7.0, 5.0),
    ];
    let selected = surface
        .select_in_lasso(&points, (0.0, 10.0), (0.0, 10.0))
        .expect("valid domains");
    assert_eq!(selected, vec![0]);

    surface
        .set_transform(AffineTransform::from_translation(-200.0, 0.0))
        .expect("valid transform");
    let selected = surface
        .select_in_lasso(&points, (0.0, 10.0), (0.0, 10.0))
        .expect("valid domains");
    assert_eq!(selected, vec![1]);
}

#[test]
fn brush_mode_with_clear_on_mouse_up() {
    let config = SurfaceConfig::new(Viewport::new(400.0, 300.0))
        .with_mode(InteractionMode::Brush)
        .with_persist_mode(PersistMode::ClearOnMouseUp);
    let mut surface = ChartSurface::new(config).expect("surface init");
    let log = record(&mut surface);

    surface.pointer_down(Point::new(10.0, 10.0));
    surface.pointer_move(Point::new(50.0, 5.0));
    surface.pointer_up(Point::new(50.0, 5.0));

    let expected = BrushRect {
        x0: 10.0,
        y0: 5.0,
        x1: 50.0,
        y1: 10.0,
    };
    let events = log.borrow();
    assert!(events.contains(&SurfaceEvent::BrushCompleted {
        rect: Some(expected)
    }));
    assert_eq!(events.last(), Some(&SurfaceEvent::BrushChanged { rect: None }));
    assert_eq!(surface.brush_rect(), None);
}

#[test]
fn brush_selection_in_data_space() {
    let mut surface = surface(InteractionMode::Brush);
    surface
        .set_brush_rect(Some(BrushRect {
            x0: 0.0,
            y0: 0.0,
            x1: 200.0,
            y1: 150.0,
        }))
        .expect("finite rect");
    let points = [
        DataPoint::new(2.5, 7.5),
        DataPoint::new(2.5, 2.5),
        DataPoint::new(7.5, 7.5),
    ];
    let selected = surface
        .select_in_brush(&points, (0.0, 10.0), (0.0, 10.0))
        .expect("valid domains");
    assert_eq!(selected, vec![0]);
}

#[test]
fn switching_mode_aborts_gesture_without_emitting_completion() {
    let mut surface = surface(InteractionMode::Lasso);
    let log = record(&mut surface);
    surface.pointer_down(Point::new(10.0, 10.0));
    surface.pointer_move(Point::new(60.0, 10.0));

    surface.set_mode(InteractionMode::Pan);
    assert_eq!(surface.gesture_state(), GestureState::Idle);
    assert!(surface.lasso_path().is_none());
    let events = log.borrow();
    assert_eq!(
        events.last(),
        Some(&SurfaceEvent::ModeChanged {
            mode: InteractionMode::Pan
        })
    );
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, SurfaceEvent::LassoCompleted { .. }))
    );
}

#[test]
fn mode_switch_keeps_finished_brush() {
    let mut surface = surface(InteractionMode::Brush);
    surface.pointer_down(Point::new(10.0, 10.0));
    surface.pointer_move(Point::new(60.0, 60.0));
    surface.pointer_up(Point::new(60.0, 60.0));
    surface.set_mode(InteractionMode::None);
    assert!(surface.brush_rect().is_some());

    surface.clear_selection();
    assert!(surface.brush_rect().is_none());
}

#[test]
fn observers_need_unique_non_empty_ids() {
    let mut surface = surface(InteractionMode::Pan);
    let _log = record(&mut surface);
    assert!(surface.has_observer("recorder"));
    assert_eq!(surface.observer_count(), 1);

    let duplicate = Recorder {
        id: "recorder".to_owned(),
        log: EventLog::default(),
    };
    assert!(surface.register_observer(Box::new(duplicate)).is_err());
    let unnamed = Recorder {
        id: String::new(),
        log: EventLog::default(),
    };
    assert!(surface.register_observer(Box::new(unnamed)).is_err());

    assert!(surface.unregister_observer("recorder"));
    assert!(!surface.unregister_observer("recorder"));
    assert_eq!(surface.observer_count(), 0);
}

#[test]
fn viewport_resize_notifies_and_keeps_transform() {
    let mut surface = surface(InteractionMode::Pan);
    surface
        .set_transform(AffineTransform::new(2.0, 5.0, 5.0).expect("valid"))
        .expect("valid transform");
    let log = record(&mut surface);

    surface
        .set_viewport(Viewport::new(800.0, 600.0))
        .expect("valid viewport");
    assert_eq!(
        *log.borrow(),
        vec![SurfaceEvent::ViewportResized {
            viewport: Viewport::new(800.0, 600.0)
        }]
    );
    assert_relative_eq!(surface.transform().scale(), 2.0);
    assert!(surface.set_viewport(Viewport::new(-1.0, 10.0)).is_err());
}

#[test]
fn animation_reaches_target_exactly() {
    let mut surface = surface(InteractionMode::Pan);
    let target = AffineTransform::new(4.0, -100.0, -50.0).expect("valid");
    surface.animate_to(target, 0.0, 500.0).expect("valid target");

    assert!(surface.advance_animation(250.0));
    let midway = surface.transform();
    assert!(midway.scale() > 1.0 && midway.scale() < 4.0);

    assert!(!surface.advance_animation(500.0));
    assert_eq!(surface.transform(), target);
    assert!(!surface.is_animating());
}

#[test]
fn gesture_cancels_running_animation() {
    let mut surface = surface(InteractionMode::Pan);
    let target = AffineTransform::new(4.0, 0.0, 0.0).expect("valid");
    surface.animate_to(target, 0.0, 500.0).expect("valid target");
    surface.pointer_down(Point::new(10.0, 10.0));
    assert!(!surface.is_animating());
}

#[test]
fn invalid_config_is_rejected() {
    let config = SurfaceConfig::new(Viewport::new(400.0, 300.0))
        .with_zoom_extent(ZoomExtent::new(10.0, 1.0));
    assert!(ChartSurface::new(config).is_err());

    let config = SurfaceConfig::new(Viewport::new(400.0, 300.0)).with_wheel_step(f64::NAN);
    assert!(ChartSurface::new(config).is_err());
}

#[test]
fn config_json_round_trip() {
    let config = SurfaceConfig::new(Viewport::new(640.0, 480.0))
        .with_mode(InteractionMode::Brush)
        .with_persist_mode(PersistMode::ClearOnMouseUp)
        .with_zoom_extent(ZoomExtent::new(0.5, 20.0));
    let json = config.to_json_pretty().expect("serialize");
    let parsed = SurfaceConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn minimal_config_json_fills_defaults() {
    let parsed = SurfaceConfig::from_json_str(r#"{"viewport":{"width":300.0,"height":200.0}}"#)
        .expect("parse");
    assert_eq!(parsed, SurfaceConfig::new(Viewport::new(300.0, 200.0)));
    assert!(SurfaceConfig::from_json_str(r#"{"viewport":{"width":-3.0,"height":2.0}}"#).is_err());
}

#[test]
fn snapshot_serializes_selection_state() {
    let mut surface = surface(InteractionMode::Brush);
    surface
        .set_brush_rect(Some(BrushRect {
            x0: 1.0,
            y0: 2.0,
            x1: 3.0,
            y1: 4.0,
        }))
        .expect("finite rect");
    let json = surface.snapshot().to_json_pretty().expect("serialize");
    assert!(json.contains("\"brush\""));
    assert!(json.contains("\"Brush\""));
}
