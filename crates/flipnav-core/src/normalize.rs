//! Reduces the many host event shapes to one canonical value before any
//! detector logic runs.

use crate::gesture_constants::LEGACY_DELTA_SCALE;
use crate::types::{Point, PointerKind, PointerSample, WheelSample};

/// A pointer sample counts as touch unless the host says it came from a mouse.
/// Plain touch events carry no pointer type and always qualify.
pub fn is_real_touch(sample: &PointerSample) -> bool {
    sample.pointer_kind != Some(PointerKind::Mouse)
}

/// Canonical page point for a touch or pointer event.
///
/// Page coordinates win when present and not both zero; otherwise the first
/// touch point is used. On touch-capable devices a real touch with a touch
/// list always takes the touch list, since page fields on those events are
/// unreliable. `None` when nothing usable is present.
pub fn normalize_point(sample: &PointerSample, touch_capable: bool) -> Option<Point> {
    let first_touch = sample.first_touch().filter(Point::is_finite);

    if touch_capable && is_real_touch(sample) && sample.touches.is_some() {
        return first_touch;
    }

    sample
        .page
        .filter(|page| !page.is_zero() && page.is_finite())
        .or(first_touch)
}

/// Signed wheel delta in the legacy `wheelDelta` convention, where scrolling
/// down is negative.
///
/// Prefers `wheelDelta`, then `deltaY`, then `detail`. Non-finite values are
/// treated as absent.
pub fn normalize_wheel_delta(sample: &WheelSample) -> Option<f64> {
    sample
        .wheel_delta
        .filter(|delta| delta.is_finite())
        .or_else(|| {
            sample
                .delta_y
                .filter(|delta| delta.is_finite())
                .map(|delta| delta * LEGACY_DELTA_SCALE)
        })
        .or_else(|| {
            sample
                .detail
                .filter(|detail| detail.is_finite())
                .map(|detail| detail * LEGACY_DELTA_SCALE)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn page_coordinates_win_when_non_zero() {
        let sample = PointerSample {
            page: Some(Point::new(10.0, 20.0)),
            touches: Some(smallvec![Point::new(1.0, 2.0)]),
            pointer_kind: Some(PointerKind::Mouse),
        };
        assert_eq!(normalize_point(&sample, true), Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn zero_page_falls_back_to_first_touch() {
        let sample = PointerSample {
            page: Some(Point::ZERO),
            touches: Some(smallvec![Point::new(5.0, 6.0), Point::new(7.0, 8.0)]),
            pointer_kind: None,
        };
        assert_eq!(normalize_point(&sample, false), Some(Point::new(5.0, 6.0)));
    }

    #[test]
    fn touch_list_takes_precedence_on_touch_devices() {
        let sample = PointerSample {
            page: Some(Point::new(10.0, 20.0)),
            touches: Some(smallvec![Point::new(1.0, 2.0)]),
            pointer_kind: None,
        };
        assert_eq!(normalize_point(&sample, true), Some(Point::new(1.0, 2.0)));
        assert_eq!(normalize_point(&sample, false), Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn empty_event_has_no_point() {
        assert_eq!(normalize_point(&PointerSample::default(), true), None);

        let empty_touches = PointerSample::from_touches(std::iter::empty::<Point>());
        assert_eq!(normalize_point(&empty_touches, true), None);
        assert_eq!(normalize_point(&empty_touches, false), None);
    }

    #[test]
    fn mouse_pointers_are_not_touch() {
        let mouse = PointerSample::from_page(1.0, 1.0).with_pointer_kind(PointerKind::Mouse);
        let pen = PointerSample::from_page(1.0, 1.0).with_pointer_kind(PointerKind::Pen);
        assert!(!is_real_touch(&mouse));
        assert!(is_real_touch(&pen));
        assert!(is_real_touch(&PointerSample::default()));
    }

    #[test]
    fn wheel_delta_priority_and_sign() {
        let legacy = WheelSample {
            wheel_delta: Some(120.0),
            delta_y: Some(3.0),
            detail: None,
        };
        assert_eq!(normalize_wheel_delta(&legacy), Some(120.0));
        assert_eq!(
            normalize_wheel_delta(&WheelSample::from_delta_y(3.0)),
            Some(-120.0)
        );

        let detail = WheelSample {
            detail: Some(-2.0),
            ..WheelSample::default()
        };
        assert_eq!(normalize_wheel_delta(&detail), Some(80.0));
        assert_eq!(normalize_wheel_delta(&WheelSample::default()), None);
    }

    #[test]
    fn non_finite_wheel_fields_are_skipped() {
        let sample = WheelSample {
            wheel_delta: Some(f64::NAN),
            delta_y: Some(1.0),
            detail: None,
        };
        assert_eq!(normalize_wheel_delta(&sample), Some(-40.0));
    }
}
