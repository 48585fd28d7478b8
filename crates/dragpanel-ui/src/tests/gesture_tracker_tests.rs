use super::*;
use crate::test_panel::TestPanel;
use dragpanel_foundation::Pointer;

fn armed(panel: &mut TestPanel, y: f32) -> GestureTracker {
    let mut tracker = GestureTracker::new();
    assert_eq!(
        tracker.on_touch_event(panel, &PointerEvent::down(1, 10.0, y, 0)),
        TouchOutcome::Armed
    );
    tracker
}

#[test]
fn first_drag_delta_loses_the_touch_slop() {
    let mut panel = TestPanel::new(200);
    let mut tracker = armed(&mut panel, 100.0);

    let outcome = tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 50.0, 16));
    assert_eq!(outcome, TouchOutcome::Handled { consumed: 42 });
    assert_eq!(panel.top_and_bottom_offset(), -42);
    assert!(tracker.is_dragging());

    let outcome = tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 20.0, 32));
    assert_eq!(outcome, TouchOutcome::Handled { consumed: 30 });
    assert_eq!(panel.top_and_bottom_offset(), -72);
}

#[test]
fn downward_drag_past_slop_keeps_its_direction() {
    let mut panel = TestPanel::new(200);
    panel.offset.set_offset(-100);
    let mut tracker = armed(&mut panel, 50.0);

    tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 70.0, 16));
    assert_eq!(panel.top_and_bottom_offset(), -88);
}

#[test]
fn moves_within_slop_do_nothing() {
    let mut panel = TestPanel::new(200);
    let mut tracker = armed(&mut panel, 100.0);

    for (t, y) in [(8, 104.0), (16, 93.0), (24, 108.0)] {
        let outcome = tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, y, t));
        assert_eq!(outcome, TouchOutcome::Handled { consumed: 0 });
    }
    assert!(!tracker.is_dragging());
    assert_eq!(panel.top_and_bottom_offset(), 0);
    assert_eq!(tracker.session().last_y, 100);
}

#[test]
fn drag_stops_at_max_drag_offset() {
    let mut panel = TestPanel::new(200);
    let mut tracker = armed(&mut panel, 150.0);

    tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, -400.0, 16));
    assert_eq!(panel.top_and_bottom_offset(), -200);

    tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 900.0, 32));
    assert_eq!(panel.top_and_bottom_offset(), 0);
}

#[test]
fn intercept_detects_drag_without_moving_the_panel() {
    let panel = TestPanel::new(200);
    let mut tracker = GestureTracker::new();

    assert!(!tracker.on_intercept(&panel, &PointerEvent::down(1, 10.0, 100.0, 0)));
    assert_eq!(tracker.active_pointer_id(), Some(1));
    assert!(!tracker.on_intercept(&panel, &PointerEvent::move_to(1, 10.0, 95.0, 8)));
    assert!(tracker.on_intercept(&panel, &PointerEvent::move_to(1, 10.0, 60.0, 16)));
    assert!(tracker.on_intercept(&panel, &PointerEvent::move_to(1, 10.0, 30.0, 24)));

    assert_eq!(tracker.session().last_y, 60);
    assert_eq!(panel.top_and_bottom_offset(), 0);
}

#[test]
fn handling_continues_an_intercepted_drag_from_its_last_y() {
    let mut panel = TestPanel::new(200);
    let mut tracker = GestureTracker::new();

    tracker.on_intercept(&panel, &PointerEvent::down(1, 10.0, 100.0, 0));
    assert!(tracker.on_intercept(&panel, &PointerEvent::move_to(1, 10.0, 60.0, 16)));

    let outcome = tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 40.0, 32));
    assert_eq!(outcome, TouchOutcome::Handled { consumed: 20 });
    assert_eq!(panel.top_and_bottom_offset(), -20);
}

#[test]
fn move_without_the_tracked_pointer_is_rejected() {
    let mut panel = TestPanel::new(200);
    let mut tracker = armed(&mut panel, 100.0);

    let stray = PointerEvent::move_to(7, 10.0, 10.0, 16);
    assert_eq!(tracker.on_touch_event(&mut panel, &stray), TouchOutcome::Rejected);
    assert_eq!(panel.top_and_bottom_offset(), 0);

    let mut idle = GestureTracker::new();
    assert_eq!(
        idle.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 10.0, 16)),
        TouchOutcome::Rejected
    );
}

#[test]
fn tracked_pointer_is_found_by_id_not_index() {
    let mut panel = TestPanel::new(200);
    let mut tracker = armed(&mut panel, 100.0);

    let event = PointerEvent::move_to(4, 200.0, 300.0, 16).with_pointer(Pointer::new(1, 10.0, 50.0));
    tracker.on_touch_event(&mut panel, &event);
    assert_eq!(panel.top_and_bottom_offset(), -42);
}

#[test]
fn down_outside_panel_or_on_locked_panel_is_rejected() {
    let mut panel = TestPanel::new(200);
    let mut tracker = GestureTracker::new();

    let below = PointerEvent::down(1, 10.0, 250.0, 0);
    assert_eq!(tracker.on_touch_event(&mut panel, &below), TouchOutcome::Rejected);
    let beside = PointerEvent::down(1, 400.0, 100.0, 0);
    assert_eq!(tracker.on_touch_event(&mut panel, &beside), TouchOutcome::Rejected);

    panel.draggable = false;
    let inside = PointerEvent::down(1, 10.0, 100.0, 0);
    assert_eq!(tracker.on_touch_event(&mut panel, &inside), TouchOutcome::Rejected);
    assert!(!tracker.on_intercept(&panel, &inside));
    assert_eq!(tracker.active_pointer_id(), None);
    assert!(!tracker.is_sampling_velocity());
}

#[test]
fn hit_test_follows_the_offset_panel() {
    let mut panel = TestPanel::new(200);
    panel.offset.set_offset(-150);
    let mut tracker = GestureTracker::new();

    let old_area = PointerEvent::down(1, 10.0, 100.0, 0);
    assert_eq!(tracker.on_touch_event(&mut panel, &old_area), TouchOutcome::Rejected);
    let visible = PointerEvent::down(1, 10.0, 20.0, 0);
    assert_eq!(tracker.on_touch_event(&mut panel, &visible), TouchOutcome::Armed);
}

#[test]
fn release_requests_fling_over_the_scroll_range() {
    let mut panel = TestPanel::new(200);
    let mut tracker = armed(&mut panel, 100.0);
    assert!(tracker.is_sampling_velocity());

    tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 50.0, 16));
    tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 20.0, 32));
    let outcome = tracker.on_touch_event(&mut panel, &PointerEvent::up(1, 10.0, 20.0, 40));

    let TouchOutcome::Released(request) = outcome else {
        panic!("expected a release, got {outcome:?}");
    };
    assert_eq!(request.min_offset, -200);
    assert_eq!(request.max_offset, 0);
    assert!(request.velocity_y < 0.0, "upward drag gave {}", request.velocity_y);
    assert!(request.velocity_y >= -8_000.0);

    assert_eq!(tracker.session(), PointerSession::default());
    assert!(!tracker.is_sampling_velocity());
}

#[test]
fn release_velocity_is_capped() {
    let mut panel = TestPanel::new(200);
    panel.config = ViewConfiguration::builder()
        .max_fling_velocity(500.0)
        .build()
        .expect("valid config");
    let mut tracker = armed(&mut panel, 150.0);

    tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 50.0, 8));
    tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 0.0, 16));
    let outcome = tracker.on_touch_event(&mut panel, &PointerEvent::up(1, 10.0, -50.0, 24));

    let TouchOutcome::Released(request) = outcome else {
        panic!("expected a release, got {outcome:?}");
    };
    assert_eq!(request.velocity_y, -500.0);
}

#[test]
fn up_without_a_session_is_not_a_fling() {
    let mut panel = TestPanel::new(200);
    let mut tracker = GestureTracker::new();

    let outcome = tracker.on_touch_event(&mut panel, &PointerEvent::up(1, 10.0, 20.0, 40));
    assert_eq!(outcome, TouchOutcome::Handled { consumed: 0 });
}

#[test]
fn cancel_clears_the_session() {
    let mut panel = TestPanel::new(200);
    let mut tracker = armed(&mut panel, 100.0);
    tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 50.0, 16));

    tracker.on_touch_event(&mut panel, &PointerEvent::cancel(1, 10.0, 50.0, 24));
    assert_eq!(tracker.session(), PointerSession::default());
    assert!(!tracker.is_sampling_velocity());

    // The next gesture starts fresh, with its own pointer id.
    let offset = panel.top_and_bottom_offset();
    let down = PointerEvent::down(2, 10.0, 60.0, 100);
    assert_eq!(tracker.on_touch_event(&mut panel, &down), TouchOutcome::Armed);
    assert_eq!(tracker.active_pointer_id(), Some(2));
    assert!(!tracker.is_dragging());

    tracker.on_touch_event(&mut panel, &PointerEvent::move_to(2, 10.0, 55.0, 116));
    assert_eq!(panel.top_and_bottom_offset(), offset);
}

#[test]
fn intercept_up_resets_the_session() {
    let panel = TestPanel::new(200);
    let mut tracker = GestureTracker::new();

    tracker.on_intercept(&panel, &PointerEvent::down(1, 10.0, 100.0, 0));
    tracker.on_intercept(&panel, &PointerEvent::move_to(1, 10.0, 40.0, 16));
    assert!(!tracker.on_intercept(&panel, &PointerEvent::up(1, 10.0, 40.0, 24)));
    assert_eq!(tracker.active_pointer_id(), None);
}

#[test]
fn touch_slop_is_resolved_once() {
    let mut panel = TestPanel::new(200);
    let mut tracker = GestureTracker::new();
    assert_eq!(tracker.touch_slop(), None);

    tracker.on_touch_event(&mut panel, &PointerEvent::down(1, 10.0, 100.0, 0));
    assert_eq!(tracker.touch_slop(), Some(8));

    panel.config = ViewConfiguration::builder()
        .touch_slop(40.0)
        .build()
        .expect("valid config");
    tracker.reset();
    tracker.on_touch_event(&mut panel, &PointerEvent::down(1, 10.0, 100.0, 0));
    tracker.on_touch_event(&mut panel, &PointerEvent::move_to(1, 10.0, 80.0, 16));

    assert_eq!(tracker.touch_slop(), Some(8));
    assert!(tracker.is_dragging());
    assert_eq!(panel.top_and_bottom_offset(), -12);
}
