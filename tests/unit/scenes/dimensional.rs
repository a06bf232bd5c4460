use super::*;
use crate::scene::animation::{AnimationKind, ScheduledAction};
use crate::scene::mobject::ShapeKind;
use crate::scene::timeline::TimelineEvent;

fn timeline() -> Timeline {
    build(SceneFrame::default()).unwrap()
}

#[test]
fn steps_follow_dimension_order() {
    let steps = progression_steps();
    let got: Vec<(ShapeKind, &str)> = steps
        .iter()
        .map(|s| (s.shape.kind(), s.label.text_content().unwrap()))
        .collect();
    assert_eq!(
        got,
        vec![
            (ShapeKind::Point, "0D: Point"),
            (ShapeKind::LineSegment, "1D: Line"),
            (ShapeKind::Square, "2D: Square"),
            (ShapeKind::Cube, "3D: Cube"),
        ]
    );
    for (i, s) in steps.iter().enumerate() {
        assert_eq!(usize::from(s.dimension), i);
    }
}

#[test]
fn horizontal_offsets_strictly_increase() {
    let xs: Vec<f64> = progression_steps().iter().map(|s| s.shape.center.x).collect();
    assert_eq!(xs, vec![-4.0, -2.5, 0.0, 3.0]);
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn shapes_and_labels_are_named_after_their_dimension() {
    let names: Vec<(String, String)> = progression_steps()
        .into_iter()
        .map(|s| (s.shape.name, s.label.name))
        .collect();
    let expected = [
        ("point", "label_0d"),
        ("line", "label_1d"),
        ("square", "label_2d"),
        ("cube", "label_3d"),
    ];
    assert_eq!(names.len(), expected.len());
    for ((shape, label), (want_shape, want_label)) in names.iter().zip(expected) {
        assert_eq!(shape, want_shape);
        assert_eq!(label, want_label);
    }
}

#[test]
fn only_the_cube_is_filled() {
    for step in progression_steps() {
        let filled = step.shape.style.fill_opacity() > 0.0;
        assert_eq!(filled, step.shape.kind() == ShapeKind::Cube);
        assert_eq!(step.label.style.fill_opacity(), 0.0);
    }
    let cube = progression_steps().pop().unwrap().shape;
    assert_eq!(cube.style.fill_opacity(), CUBE_FILL_OPACITY);
    assert_eq!(cube.style.fill.unwrap().color, Color::BLUE);
}

#[test]
fn labels_sit_just_below_their_shapes() {
    for step in progression_steps() {
        assert_eq!(step.label.center.x, step.shape.center.x);
        let gap = (step.shape.center.y - step.shape.half_extent().y)
            - (step.label.center.y + step.label.half_extent().y);
        assert!((gap - DEFAULT_MOBJECT_TO_MOBJECT_BUFFER).abs() < 1e-9);
    }
}

#[test]
fn timeline_matches_script_order() {
    let tl = timeline();
    let shape: Vec<String> = tl
        .events
        .iter()
        .map(|e| match e {
            TimelineEvent::Play(p) => format!("play{}", p.animations.len()),
            TimelineEvent::Wait(w) => format!("wait{}", w.duration_secs),
        })
        .collect();
    assert_eq!(
        shape,
        vec![
            "play1", "wait1", "play1", "play2", "wait1", "play2", "wait1", "play2", "wait1",
            "play2", "wait1", "wait2",
        ]
    );
    assert_eq!(tl.duration_secs, 14.0);
    assert_eq!(tl.waits().filter(|w| w.duration_secs == 1.0).count(), 5);
}

#[test]
fn title_moves_to_top_edge_once_before_any_step() {
    let tl = timeline();
    let title = tl
        .mobjects
        .iter()
        .position(|m| m.text_content() == Some(TITLE))
        .unwrap();

    let moves: Vec<_> = tl
        .animations()
        .filter(|a| matches!(a.action, ScheduledAction::Move { .. }))
        .collect();
    assert_eq!(moves.len(), 1);
    let mv = moves[0];
    assert_eq!(mv.target.0 as usize, title);
    assert!(matches!(mv.kind, AnimationKind::ToEdge { edge, .. } if edge == Vec3::UP));

    let write = tl.introduction_of(mv.target).unwrap();
    assert!(write.end_secs() <= mv.start_secs);

    let first_create = tl
        .animations()
        .find(|a| a.kind == AnimationKind::Create)
        .unwrap();
    assert!(mv.end_secs() <= first_create.start_secs);

    if let ScheduledAction::Move { to, .. } = mv.action {
        let top = to.y + tl.mobjects[title].half_extent().y;
        assert!((top - (SceneFrame::HEIGHT / 2.0 - 0.5)).abs() < 1e-9);
    }
}

#[test]
fn phases_advance_linearly() {
    let tl = timeline();
    let cases = [
        (0.0, ProgressionPhase::TitleIn),
        (2.5, ProgressionPhase::TitleIn),
        (3.5, ProgressionPhase::TitleMoved),
        (4.0, ProgressionPhase::Step(0)),
        (7.9, ProgressionPhase::Step(1)),
        (10.0, ProgressionPhase::Step(3)),
        (13.9, ProgressionPhase::Step(3)),
        (14.0, ProgressionPhase::Done),
    ];
    for (t, want) in cases {
        assert_eq!(phase_at(&tl, t), want, "t={t}");
    }

    let mut phase = ProgressionPhase::TitleIn;
    let mut seen = vec![phase];
    while phase != ProgressionPhase::Done {
        phase = phase.next();
        seen.push(phase);
    }
    assert_eq!(seen.len(), 7);
}

#[test]
fn build_is_deterministic() {
    assert_eq!(timeline(), timeline());
}
