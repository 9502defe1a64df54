//! End-to-end behaviour of the resolver on an in-memory host.

use flipnav_core::gesture_constants::{DEBOUNCE_QUIET_MS, THROTTLE_WINDOW_MS};
use flipnav_core::{
    GestureSettings, ListenerSlot, NavigationDirection, Orientation, PointerKind, PointerSample,
    WheelSample,
};
use flipnav_testing::{FakeEnvironment, GestureRobot, TestHost};
use std::cell::Cell;
use std::rc::Rc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn desktop_robot() -> GestureRobot {
    init_logging();
    GestureRobot::new(Orientation::Horizontal, FakeEnvironment::desktop())
}

fn phone_robot(orientation: Orientation) -> GestureRobot {
    init_logging();
    GestureRobot::new(
        orientation,
        FakeEnvironment::phone().with_viewport(1000.0, 800.0),
    )
}

#[test]
fn spaced_wheel_flicks_dispatch_once_each() {
    let robot = desktop_robot();
    for _ in 0..5 {
        assert_eq!(robot.wheel(3.0), 1);
        robot.advance(250);
    }
    assert_eq!(robot.next_count(), 5);
    assert_eq!(robot.prev_count(), 0);
}

#[test]
fn wheel_up_dispatches_prev() {
    let robot = desktop_robot();
    robot.wheel(-3.0);
    assert_eq!(robot.dispatched(), vec![NavigationDirection::Prev]);
}

#[test]
fn decaying_momentum_burst_dispatches_once() {
    let robot = desktop_robot();
    let mut delta = 40.0;
    for _ in 0..30 {
        robot.wheel(delta);
        robot.advance(10);
        delta *= 0.92;
    }
    assert_eq!(robot.next_count(), 1);
}

#[test]
fn momentum_spanning_several_windows_stays_silent() {
    let robot = desktop_robot();
    let mut delta = 50.0;
    // 80 samples, 12 ms apart: roughly a second of trackpad momentum.
    for _ in 0..80 {
        robot.wheel(delta);
        robot.advance(12);
        delta = (delta * 0.97_f64).max(1.0);
    }
    assert_eq!(robot.dispatched(), vec![NavigationDirection::Next]);
}

#[test]
fn jittery_momentum_tail_dispatches_once() {
    let robot = desktop_robot();
    let mut deltas: Vec<f64> = (4..=12).rev().map(f64::from).collect();
    deltas.extend([4.0, 5.0, 4.0, 3.0, 2.0, 1.0, 1.0, 2.0, 1.0]);
    for delta in deltas {
        robot.wheel(delta);
        robot.advance(12);
    }
    assert_eq!(robot.dispatched(), vec![NavigationDirection::Next]);
}

#[test]
fn throttle_drops_genuine_flicks_inside_window() {
    let robot = desktop_robot();
    robot.wheel(3.0);
    robot.advance(50);
    // Opposite sign breaks the decay pattern, but the window is still open.
    robot.wheel(-3.0);
    robot.advance(THROTTLE_WINDOW_MS);
    robot.wheel(-3.0);
    assert_eq!(
        robot.dispatched(),
        vec![NavigationDirection::Next, NavigationDirection::Prev]
    );
}

#[test]
fn legacy_mousewheel_events_are_understood() {
    init_logging();
    let environment = FakeEnvironment::bare().with_event("mousewheel");
    let robot = GestureRobot::new(Orientation::Vertical, environment);
    assert_eq!(
        robot.resolver().bound_events(),
        vec![("mousewheel", ListenerSlot::Wheel)]
    );

    robot.emit_wheel(WheelSample::from_wheel_delta(-120.0));
    robot.advance(300);
    robot.emit_wheel(WheelSample::from_wheel_delta(120.0));
    assert_eq!(
        robot.dispatched(),
        vec![NavigationDirection::Next, NavigationDirection::Prev]
    );
}

#[test]
fn malformed_wheel_event_is_ignored() {
    let robot = desktop_robot();
    robot.emit_wheel(WheelSample::default());
    robot.emit_wheel(WheelSample::from_delta_y(f64::NAN));
    robot.emit_wheel(WheelSample::from_delta_y(0.0));
    assert!(robot.dispatched().is_empty());
}

#[test]
fn horizontal_swipe_left_dispatches_next_once() {
    let robot = phone_robot(Orientation::Horizontal);
    robot.swipe((500.0, 300.0), (300.0, 300.0));
    robot.advance(1_000);
    assert_eq!(robot.dispatched(), vec![NavigationDirection::Next]);
}

#[test]
fn vertical_swipe_down_dispatches_prev_once() {
    let robot = phone_robot(Orientation::Vertical);
    robot.swipe((200.0, 100.0), (200.0, 500.0));
    robot.advance(1_000);
    assert_eq!(robot.dispatched(), vec![NavigationDirection::Prev]);
}

#[test]
fn short_swipe_dispatches_nothing() {
    let robot = phone_robot(Orientation::Horizontal);
    robot.swipe((500.0, 300.0), (470.0, 300.0));
    robot.advance(1_000);
    assert!(robot.dispatched().is_empty());
}

#[test]
fn swipe_along_wrong_axis_dispatches_nothing() {
    let robot = phone_robot(Orientation::Horizontal);
    robot.swipe((500.0, 100.0), (500.0, 600.0));
    robot.advance(1_000);
    assert!(robot.dispatched().is_empty());
}

#[test]
fn only_last_move_of_a_burst_is_evaluated() {
    let robot = phone_robot(Orientation::Horizontal);
    robot.touch_start(500.0, 300.0);
    // Far past the threshold, then back near the start, all inside one burst.
    robot.touch_move(100.0, 300.0);
    robot.advance(50);
    robot.touch_move(490.0, 300.0);
    robot.advance(DEBOUNCE_QUIET_MS);
    assert!(robot.dispatched().is_empty());
}

#[test]
fn evaluation_waits_for_quiet_period() {
    let robot = phone_robot(Orientation::Horizontal);
    robot.drag((500.0, 300.0), (300.0, 300.0));
    robot.advance(DEBOUNCE_QUIET_MS - 1);
    assert!(robot.dispatched().is_empty());
    robot.advance(1);
    assert_eq!(robot.next_count(), 1);
}

#[test]
fn viewport_is_read_at_evaluation_time() {
    let robot = phone_robot(Orientation::Horizontal);
    robot.drag((500.0, 300.0), (400.0, 300.0));
    // 100px is above 5% of 1000 but below 5% of 4000.
    robot.host().environment.resize(4000.0, 800.0);
    robot.advance(DEBOUNCE_QUIET_MS);
    assert!(robot.dispatched().is_empty());
}

#[test]
fn mouse_pointer_cannot_start_a_swipe() {
    let robot = phone_robot(Orientation::Horizontal);
    let mouse = |x: f64| PointerSample::from_page(x, 300.0).with_pointer_kind(PointerKind::Mouse);

    robot.emit_pointer(ListenerSlot::TouchStart, mouse(500.0));
    robot.emit_pointer(ListenerSlot::TouchMove, mouse(100.0));
    robot.advance(1_000);
    assert!(robot.dispatched().is_empty());
    assert_eq!(robot.host().scheduler.pending(), 0);
}

#[test]
fn teardown_suppresses_pending_evaluation() {
    let robot = phone_robot(Orientation::Horizontal);
    robot.drag((500.0, 300.0), (300.0, 300.0));
    robot.teardown();
    robot.advance(1_000);
    assert!(robot.dispatched().is_empty());
    assert_eq!(robot.host().source.listener_count(), 0);
}

#[test]
fn teardown_suppresses_pending_evaluation_when_host_cannot_cancel() {
    init_logging();
    let host = TestHost::new(FakeEnvironment::phone().with_viewport(1000.0, 800.0))
        .with_stubborn_scheduler();
    let robot = GestureRobot::with_host(Orientation::Horizontal, GestureSettings::default(), host);

    robot.drag((500.0, 300.0), (300.0, 300.0));
    robot.teardown();
    assert!(robot.host().scheduler.pending() > 0);
    robot.advance(1_000);
    assert!(robot.dispatched().is_empty());
}

#[test]
fn events_after_teardown_reach_nobody() {
    let robot = phone_robot(Orientation::Horizontal);
    robot.teardown();

    let source = &robot.host().source;
    assert_eq!(
        source.emit(
            "wheel",
            flipnav_core::InputEvent::Wheel(WheelSample::from_delta_y(3.0))
        ),
        0
    );
    assert_eq!(robot.wheel(3.0), 0);
    robot.swipe((500.0, 300.0), (300.0, 300.0));
    robot.advance(1_000);
    assert!(robot.dispatched().is_empty());
    assert!(!robot.resolver().is_active());
}

#[test]
fn injected_events_after_teardown_are_ignored() {
    let robot = desktop_robot();
    robot.teardown();
    robot
        .resolver()
        .handle_event(flipnav_core::InputEvent::Wheel(WheelSample::from_delta_y(3.0)));
    assert!(robot.dispatched().is_empty());
}

#[test]
fn teardown_is_idempotent() {
    let robot = phone_robot(Orientation::Horizontal);
    robot.teardown();
    robot.teardown();
    assert_eq!(robot.host().source.listener_count(), 0);
    assert!(robot.resolver().bound_events().is_empty());
}

#[test]
fn disabling_before_pending_dispatch_suppresses_it() {
    let robot = phone_robot(Orientation::Horizontal);
    robot.drag((500.0, 300.0), (300.0, 300.0));
    robot.set_disabled(true);
    robot.advance(DEBOUNCE_QUIET_MS);
    assert!(robot.dispatched().is_empty());

    robot.set_disabled(false);
    robot.advance(THROTTLE_WINDOW_MS);
    robot.swipe((500.0, 300.0), (300.0, 300.0));
    assert_eq!(robot.dispatched(), vec![NavigationDirection::Next]);
}

#[test]
fn disabled_wheel_events_are_classified_but_not_dispatched() {
    let robot = desktop_robot();
    robot.set_disabled(true);
    robot.wheel(3.0);
    robot.advance(10);
    robot.set_disabled(false);
    // Still the same momentum run, so it stays inertial.
    robot.wheel(2.0);
    assert!(robot.dispatched().is_empty());
}

#[test]
fn callback_can_disable_its_own_resolver() {
    init_logging();
    let host = TestHost::new(FakeEnvironment::desktop());
    let calls = Rc::new(Cell::new(0));
    let flag_slot: Rc<Cell<Option<flipnav_core::DisabledFlag>>> = Rc::new(Cell::new(None));

    let resolver = {
        let calls = Rc::clone(&calls);
        let flag_slot = Rc::clone(&flag_slot);
        flipnav_core::GestureDirectionResolver::create(
            move || {
                calls.set(calls.get() + 1);
                if let Some(flag) = flag_slot.take() {
                    flag.set(true);
                }
            },
            || {},
            Orientation::Vertical,
            host.host(),
        )
    };
    flag_slot.set(Some(resolver.disabled_flag()));

    for _ in 0..3 {
        host.source.emit(
            "wheel",
            flipnav_core::InputEvent::Wheel(WheelSample::from_delta_y(3.0)),
        );
        host.scheduler.advance(300);
    }
    assert_eq!(calls.get(), 1);
    assert!(resolver.disabled());
}

#[test]
fn independent_resolvers_do_not_share_wheel_history() {
    let first = desktop_robot();
    let second = desktop_robot();

    first.wheel(10.0);
    first.advance(10);
    first.wheel(9.0);
    second.wheel(9.0);

    assert_eq!(first.next_count(), 1);
    assert_eq!(second.next_count(), 1);
}

#[test]
fn dropping_the_resolver_removes_listeners() {
    init_logging();
    let host = TestHost::new(FakeEnvironment::phone());
    {
        let _resolver = flipnav_core::GestureDirectionResolver::create(
            || {},
            || {},
            Orientation::Horizontal,
            host.host(),
        );
        assert_eq!(host.source.listener_count(), 3);
    }
    assert_eq!(host.source.listener_count(), 0);
}
