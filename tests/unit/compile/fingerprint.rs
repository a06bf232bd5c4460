use super::*;
use crate::eval::evaluator::Evaluator;
use crate::scene::mobject::SceneFrame;
use crate::scenes::dimensional;

#[test]
fn held_frames_share_a_fingerprint() {
    let tl = dimensional::build(SceneFrame::default()).unwrap();
    // 2.0..3.0 is the pause after the title is written.
    let a = Evaluator::eval_at(&tl, 2.1).unwrap();
    let b = Evaluator::eval_at(&tl, 2.9).unwrap();
    assert_eq!(fingerprint_eval(&a), fingerprint_eval(&b));
}

#[test]
fn animated_frames_differ() {
    let tl = dimensional::build(SceneFrame::default()).unwrap();
    let a = Evaluator::eval_at(&tl, 3.2).unwrap();
    let b = Evaluator::eval_at(&tl, 3.4).unwrap();
    assert_ne!(fingerprint_eval(&a), fingerprint_eval(&b));
}

#[test]
fn empty_frames_are_equal() {
    let tl = dimensional::build(SceneFrame::default()).unwrap();
    let a = Evaluator::eval_at(&tl, 0.0).unwrap();
    let mut b = a.clone();
    b.time_secs = 42.0;
    assert_eq!(fingerprint_eval(&a), fingerprint_eval(&b));
}
