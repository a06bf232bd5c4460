use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    assert!(
        FrameRange::new(FrameIndex(3), FrameIndex(3))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(123);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
}

#[test]
fn fps_rounding_matches_whole_seconds() {
    let fps = Fps::new(15, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(14.0), 210);
    assert_eq!(fps.secs_to_frames_round(0.5), 8);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn canvas_rejects_zero_and_reports_aspect() {
    assert!(Canvas::new(0, 10).is_err());
    let c = Canvas::new(1920, 1080).unwrap();
    assert!((c.aspect() - 16.0 / 9.0).abs() < 1e-12);
}

#[test]
fn vec3_arithmetic_and_lerp() {
    let a = Vec3::LEFT * 3.0;
    let b = Vec3::LEFT * 2.0;
    assert_eq!(a + b, Vec3::new(-5.0, 0.0, 0.0));
    assert_eq!(a.lerp(b, 0.5), Vec3::new(-2.5, 0.0, 0.0));
    assert_eq!(-Vec3::UP, Vec3::DOWN);
    assert!((Vec3::new(3.0, 4.0, 0.0).length() - 5.0).abs() < 1e-12);
}
