use super::*;
use crate::foundation::error::VexelError;

fn bounds_100() -> TextureBounds {
    TextureBounds::new(100, 100).expect("valid bounds")
}

fn centered_quad() -> QuadGeometry {
    QuadGeometry::new(
        bounds_100(),
        Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
        Some(Point::new(50.0, 50.0)),
        100.0,
    )
    .expect("valid quad")
}

#[test]
fn corners_match_documented_formula() {
    let mut quad = centered_quad();
    assert!(quad.resolve());

    assert_eq!(
        quad.positions(),
        &[
            Point::new(-0.5, 0.5),
            Point::new(0.5, 0.5),
            Point::new(0.5, -0.5),
            Point::new(-0.5, -0.5),
        ]
    );
}

#[test]
fn resolve_is_idempotent() {
    let mut quad = centered_quad();
    assert!(quad.resolve());
    let positions = *quad.positions();
    let uv = *quad.uv();
    let indices = *quad.indices();

    assert!(!quad.resolve());
    assert_eq!(quad.positions(), &positions);
    assert_eq!(quad.uv(), &uv);
    assert_eq!(quad.indices(), &indices);
}

#[test]
fn pivot_mutation_dirties_only_positions() {
    let mut quad = centered_quad();
    quad.resolve();
    let uv_before = *quad.uv();
    let indices_before = *quad.indices();
    let positions_before = *quad.positions();

    quad.set_pivot(Point::new(0.0, 0.0));
    assert!(quad.needs_resolve());
    assert!(quad.resolve());

    assert_ne!(quad.positions(), &positions_before);
    assert_eq!(quad.uv(), &uv_before);
    assert_eq!(quad.indices(), &indices_before);
}

#[test]
fn uv_mapping_is_constant_and_ignores_rect() {
    // The constant corner mapping is the authored contract of this layer:
    // atlas remapping belongs to a consumer, so a sub-rect must not move UVs.
    let mut quad = centered_quad();
    quad.resolve();
    let uv_full = *quad.uv();

    quad.set_rect(Rect::new(10.0, 20.0, 40.0, 60.0)).unwrap();
    quad.resolve();
    assert_eq!(quad.uv(), &uv_full);
    assert_eq!(
        quad.uv(),
        &[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    );
}

#[test]
fn index_winding_shares_the_zero_two_diagonal() {
    let mut quad = centered_quad();
    quad.resolve();
    assert_eq!(quad.indices(), &[0, 2, 1, 2, 0, 3]);
}

#[test]
fn construction_rejects_rect_out_of_bounds() {
    let err = QuadGeometry::new(
        bounds_100(),
        Some(Rect::new(0.0, 0.0, 200.0, 50.0)),
        None,
        100.0,
    )
    .unwrap_err();
    assert!(matches!(err, VexelError::OutOfRange(_)));
}

#[test]
fn construction_defaults_to_full_rect_and_center_pivot() {
    let quad = QuadGeometry::new(bounds_100(), None, None, 100.0).expect("defaults valid");
    assert_eq!(quad.rect(), Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(quad.pivot(), Point::new(50.0, 50.0));
    assert!(quad.needs_resolve());
}

#[test]
fn set_rect_failure_leaves_prior_state_untouched() {
    let mut quad = centered_quad();
    quad.resolve();
    let rect_before = quad.rect();

    let err = quad.set_rect(Rect::new(50.0, 0.0, 151.0, 100.0)).unwrap_err();
    assert!(matches!(err, VexelError::OutOfRange(_)));
    assert_eq!(quad.rect(), rect_before);
    assert!(!quad.needs_resolve());
}

#[test]
fn set_pixels_per_unit_rejects_non_positive_and_non_finite() {
    let mut quad = centered_quad();
    quad.resolve();

    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = quad.set_pixels_per_unit(bad).unwrap_err();
        assert!(matches!(err, VexelError::InvalidArgument(_)));
    }
    assert_eq!(quad.pixels_per_unit(), 100.0);
    assert!(!quad.needs_resolve());
}

#[test]
fn rect_origin_does_not_shift_positions() {
    // Positions depend on rect extent and pivot only; where the rect sits on
    // the source texture is a sampling concern.
    let mut at_origin = QuadGeometry::new(
        bounds_100(),
        Some(Rect::new(0.0, 0.0, 40.0, 40.0)),
        Some(Point::new(20.0, 20.0)),
        100.0,
    )
    .unwrap();
    let mut offset = QuadGeometry::new(
        bounds_100(),
        Some(Rect::new(30.0, 50.0, 70.0, 90.0)),
        Some(Point::new(20.0, 20.0)),
        100.0,
    )
    .unwrap();

    at_origin.resolve();
    offset.resolve();
    assert_eq!(at_origin.positions(), offset.positions());
}

#[test]
fn serde_round_trip_restores_authored_state_fully_stale() {
    let mut quad = centered_quad();
    quad.resolve();
    assert!(!quad.needs_resolve());

    let json = serde_json::to_string(&quad).expect("serialize");
    let mut restored: QuadGeometry = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored.rect(), quad.rect());
    assert_eq!(restored.pivot(), quad.pivot());
    assert_eq!(restored.pixels_per_unit(), quad.pixels_per_unit());
    assert!(restored.needs_resolve());
    assert!(restored.resolve());
    assert_eq!(restored.positions(), quad.positions());
}
