use approx::assert_relative_eq;
use chart_interact::core::{
    AffineTransform, ContainViewport, Direction, Point, Viewport, ZoomExtent,
};
use chart_interact::interaction::{
    DeltaMode, GestureState, PanController, PanRelease, WheelInput, ZoomBehavior, ZoomController,
};

fn drag(
    pan: &mut PanController,
    from: Point,
    to: Point,
    current: AffineTransform,
) -> AffineTransform {
    assert!(pan.on_pointer_down(from, current));
    let mut latest = current;
    let steps = 4;
    for step in 1..=steps {
        let t = f64::from(step) / f64::from(steps);
        let point = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        if let Some(next) = pan.on_pointer_move(point) {
            latest = next;
        }
    }
    latest
}

#[test]
fn pan_translates_by_total_pointer_delta() {
    let mut pan = PanController::new(Direction::XY);
    let start = AffineTransform::new(2.0, 5.0, -5.0).expect("valid transform");
    let result = drag(&mut pan, Point::new(10.0, 10.0), Point::new(40.0, 30.0), start);

    assert_relative_eq!(result.tx(), 35.0);
    assert_relative_eq!(result.ty(), 15.0);
    assert_relative_eq!(result.scale(), 2.0);
    assert_eq!(pan.on_pointer_up(Point::new(40.0, 30.0)), PanRelease::Finished);
    assert_eq!(pan.state(), GestureState::Idle);
}

#[test]
fn x_locked_pan_leaves_vertical_translation_untouched() {
    let mut pan = PanController::new(Direction::X);
    let start = AffineTransform::from_translation(0.0, 12.0);
    let result = drag(&mut pan, Point::new(0.0, 0.0), Point::new(25.0, 60.0), start);

    assert_relative_eq!(result.tx(), 25.0);
    assert_relative_eq!(result.ty(), 12.0);
}

#[test]
fn y_locked_pan_leaves_horizontal_translation_untouched() {
    let mut pan = PanController::new(Direction::Y);
    let result = drag(
        &mut pan,
        Point::new(0.0, 0.0),
        Point::new(25.0, 60.0),
        AffineTransform::identity(),
    );

    assert_relative_eq!(result.tx(), 0.0);
    assert_relative_eq!(result.ty(), 60.0);
}

#[test]
fn press_and_release_without_movement_is_a_click() {
    let mut pan = PanController::default();
    assert!(pan.on_pointer_down(Point::new(5.0, 5.0), AffineTransform::identity()));
    assert_eq!(
        pan.on_pointer_up(Point::new(6.0, 5.0)),
        PanRelease::Click(Point::new(6.0, 5.0))
    );
}

#[test]
fn disabling_mid_gesture_stops_emission() {
    let mut pan = PanController::default();
    assert!(pan.on_pointer_down(Point::new(0.0, 0.0), AffineTransform::identity()));
    assert!(pan.on_pointer_move(Point::new(20.0, 0.0)).is_some());

    pan.set_enabled(false);
    assert_eq!(pan.state(), GestureState::Idle);
    assert!(pan.on_pointer_move(Point::new(40.0, 0.0)).is_none());
    assert_eq!(pan.on_pointer_up(Point::new(40.0, 0.0)), PanRelease::Ignored);
    assert!(!pan.on_pointer_down(Point::new(0.0, 0.0), AffineTransform::identity()));
}

#[test]
fn pointer_leave_ends_gesture_silently() {
    let mut pan = PanController::default();
    assert!(!pan.on_pointer_leave());
    assert!(pan.on_pointer_down(Point::new(0.0, 0.0), AffineTransform::identity()));
    assert!(pan.on_pointer_leave());
    assert!(pan.on_pointer_move(Point::new(50.0, 50.0)).is_none());
}

#[test]
fn pan_constraint_is_applied_to_each_candidate() {
    let mut pan = PanController::new(Direction::XY)
        .with_constraint(ContainViewport::new(Viewport::new(100.0, 100.0)));
    let result = drag(
        &mut pan,
        Point::new(50.0, 50.0),
        Point::new(90.0, 70.0),
        AffineTransform::identity(),
    );
    assert!(result.approx_eq(AffineTransform::identity(), 1e-12));
}

#[test]
fn closure_constraints_are_accepted() {
    let mut pan = PanController::new(Direction::XY)
        .with_constraint(|candidate: AffineTransform| {
            AffineTransform::from_translation(candidate.tx().min(10.0), candidate.ty())
        });
    let result = drag(
        &mut pan,
        Point::new(0.0, 0.0),
        Point::new(50.0, 0.0),
        AffineTransform::identity(),
    );
    assert_relative_eq!(result.tx(), 10.0);
}

#[test]
fn wheel_up_zooms_in_around_pointer() {
    let zoom = ZoomController::new(ZoomExtent::new(0.5, 8.0));
    let anchor = Point::new(100.0, 40.0);
    let next = zoom
        .on_wheel(WheelInput::pixels(-120.0, anchor.x, anchor.y), AffineTransform::identity())
        .expect("zoomed");

    assert_relative_eq!(next.scale(), 0.1_f64.exp(), epsilon = 1e-12);
    let content = next.invert(anchor);
    assert_relative_eq!(content.x, anchor.x, epsilon = 1e-9);
    assert_relative_eq!(content.y, anchor.y, epsilon = 1e-9);
}

#[test]
fn wheel_notch_ignores_delta_magnitude() {
    let zoom = ZoomController::new(ZoomExtent::new(0.1, 10.0));
    let small = zoom
        .on_wheel(WheelInput::pixels(3.0, 0.0, 0.0), AffineTransform::identity())
        .expect("zoomed");
    let large = zoom
        .on_wheel(
            WheelInput {
                delta_x: 0.0,
                delta_y: 2.0,
                delta_mode: DeltaMode::Page,
                x: 0.0,
                y: 0.0,
            },
            AffineTransform::identity(),
        )
        .expect("zoomed");

    assert_relative_eq!(small.scale(), (-0.1_f64).exp(), epsilon = 1e-12);
    assert_eq!(small, large);
}

#[test]
fn wheel_at_extent_limit_is_a_no_op() {
    let zoom = ZoomController::new(ZoomExtent::new(1.0, 10.0));
    let at_min = AffineTransform::identity();
    assert!(zoom.on_wheel(WheelInput::pixels(50.0, 10.0, 10.0), at_min).is_none());
}

#[test]
fn wheel_outside_viewport_is_ignored() {
    let zoom = ZoomController::default().with_viewport(Viewport::new(100.0, 100.0));
    let outside = WheelInput::pixels(-10.0, 150.0, 50.0);
    assert!(zoom.on_wheel(outside, AffineTransform::identity()).is_none());
}

#[test]
fn zoom_by_rejects_bad_numbers() {
    let zoom = ZoomController::default();
    let current = AffineTransform::identity();
    assert!(zoom.zoom_by(current, 0.0, Point::new(0.0, 0.0)).is_err());
    assert!(zoom.zoom_by(current, f64::NAN, Point::new(0.0, 0.0)).is_err());
    assert!(zoom.zoom_by(current, 2.0, Point::new(f64::INFINITY, 0.0)).is_err());
}

#[test]
fn zoom_by_clamps_to_extent() {
    let zoom = ZoomController::new(ZoomExtent::new(1.0, 10.0));
    let next = zoom
        .zoom_by(AffineTransform::identity(), 20.0, Point::new(0.0, 0.0))
        .expect("valid input")
        .expect("changed");
    assert_relative_eq!(next.scale(), 10.0);

    let unchanged = zoom
        .zoom_by(next, 3.0, Point::new(0.0, 0.0))
        .expect("valid input");
    assert!(unchanged.is_none());
}

#[test]
fn pinch_uses_transform_captured_at_start() {
    let mut zoom = ZoomController::new(ZoomExtent::new(0.5, 8.0));
    let start = AffineTransform::identity();
    assert!(zoom.pinch_start(start));
    assert!(!zoom.pinch_start(start));
    assert_eq!(zoom.state(), GestureState::Active);

    let center = Point::new(50.0, 50.0);
    let first = zoom.pinch_update(2.0, center).expect("zoomed");
    let second = zoom.pinch_update(3.0, center).expect("zoomed");
    assert_relative_eq!(first.scale(), 2.0);
    assert_relative_eq!(second.scale(), 3.0);

    assert!(zoom.pinch_end());
    assert!(zoom.pinch_update(4.0, center).is_none());
    assert_eq!(zoom.state(), GestureState::Idle);
}

#[test]
fn disabling_zoom_aborts_pinch() {
    let mut zoom = ZoomController::default();
    assert!(zoom.pinch_start(AffineTransform::identity()));
    zoom.set_enabled(false);
    assert_eq!(zoom.state(), GestureState::Idle);
    assert!(!zoom.pinch_end());
    assert!(
        zoom.on_wheel(WheelInput::pixels(-10.0, 0.0, 0.0), AffineTransform::identity())
            .is_none()
    );
}

#[test]
fn behavior_with_bad_extent_is_rejected() {
    let behavior = ZoomBehavior {
        extent: ZoomExtent::new(10.0, 1.0),
        ..ZoomBehavior::default()
    };
    assert!(ZoomController::from_behavior(behavior).is_err());

    let behavior = ZoomBehavior {
        wheel_step: -0.1,
        ..ZoomBehavior::default()
    };
    assert!(ZoomController::from_behavior(behavior).is_err());
}
