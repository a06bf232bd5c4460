use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn line_center_is_midpoint() {
    let line = Mobject::line(Vec3::LEFT * 3.0, Vec3::LEFT * 2.0);
    assert_eq!(line.center, Vec3::new(-2.5, 0.0, 0.0));
    assert_eq!(line.half_extent(), Vec3::new(0.5, 0.0, 0.0));
    assert_eq!(line.kind(), ShapeKind::LineSegment);
}

#[test]
fn only_cube_is_filled_by_default() {
    assert_eq!(Mobject::dot().style.fill_opacity(), 0.0);
    assert_eq!(Mobject::square(1.0).style.fill_opacity(), 0.0);
    assert_eq!(Mobject::text("x", 24.0).style.fill_opacity(), 0.0);
    assert!(Mobject::cube(1.0).style.fill_opacity() > 0.0);
}

#[test]
fn set_fill_clamps_opacity() {
    let cube = Mobject::cube(1.0).set_fill(Color::BLUE, 1.5);
    assert_eq!(cube.style.fill_opacity(), 1.0);
}

#[test]
fn next_to_down_places_below_with_buffer() {
    let square = Mobject::square(1.0).shift(Vec3::RIGHT * 2.0);
    let label = Mobject::text("2D: Square", 24.0).next_to(
        &square,
        Vec3::DOWN,
        DEFAULT_MOBJECT_TO_MOBJECT_BUFFER,
    );
    let label_half = label.half_extent();
    assert!(approx(label.center.x, 2.0));
    assert!(approx(
        label.center.y + label_half.y,
        -0.5 - DEFAULT_MOBJECT_TO_MOBJECT_BUFFER
    ));
}

#[test]
fn to_edge_up_keeps_horizontal_position() {
    let frame = SceneFrame::default();
    let title = Mobject::text("Understanding Dimensions", 40.0).to_edge(
        Vec3::UP,
        DEFAULT_MOBJECT_TO_EDGE_BUFFER,
        frame,
    );
    let top = title.center.y + title.half_extent().y;
    assert!(approx(top, SceneFrame::HEIGHT / 2.0 - DEFAULT_MOBJECT_TO_EDGE_BUFFER));
    assert!(approx(title.center.x, 0.0));
}

#[test]
fn part_counts_follow_shape() {
    assert_eq!(Mobject::dot().part_count(), 1);
    assert_eq!(Mobject::cube(1.0).part_count(), 6);
    assert_eq!(Mobject::text("0D: Point", 24.0).part_count(), 8);
}

#[test]
fn validate_rejects_degenerate_geometry() {
    assert!(Mobject::square(0.0).validate().is_err());
    assert!(Mobject::line(Vec3::ORIGIN, Vec3::ORIGIN).validate().is_err());
    assert!(Mobject::text("   ", 24.0).validate().is_err());
    assert!(Mobject::text("ok", -1.0).validate().is_err());
    assert!(Mobject::cube(1.0).validate().is_ok());
}

#[test]
fn cube_faces_lie_on_the_surface() {
    let faces = cube_faces(Vec3::RIGHT * 3.0, 1.0);
    assert_eq!(faces.len(), 6);
    // OUT face sits at z = +0.5.
    assert!(faces[1].iter().all(|p| approx(p.z, 0.5)));
    // LEFT face sits at x = 2.5.
    assert!(faces[2].iter().all(|p| approx(p.x, 2.5)));
    for face in faces {
        for p in face {
            assert!(approx((p.x - 3.0).abs(), 0.5) || approx(p.y.abs(), 0.5) || approx(p.z.abs(), 0.5));
            assert!((p.x - 3.0).abs() <= 0.5 + 1e-9);
            assert!(p.y.abs() <= 0.5 + 1e-9);
            assert!(p.z.abs() <= 0.5 + 1e-9);
        }
    }
}

#[test]
fn shape_serializes_with_kind_tag() {
    let v = serde_json::to_value(&Mobject::square(1.0).shape).unwrap();
    assert_eq!(v["kind"], "square");
    assert_eq!(v["side"], 1.0);
}
