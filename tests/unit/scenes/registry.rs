use super::*;

#[test]
fn finds_registered_scene() {
    let factory = scene_by_name(dimensional::SCENE_NAME).unwrap();
    let timeline = factory(SceneFrame::default()).unwrap();
    assert_eq!(timeline.name, dimensional::SCENE_NAME);
}

#[test]
fn unknown_scene_lists_available_names() {
    let err = scene_by_name("Nope").err().unwrap();
    let msg = err.to_string();
    assert!(matches!(err, SceneError::Validation(_)));
    assert!(msg.contains("Nope"));
    assert!(msg.contains(dimensional::SCENE_NAME));
}

#[test]
fn names_are_unique() {
    for (i, (a, _)) in SCENES.iter().enumerate() {
        assert!(SCENES[i + 1..].iter().all(|(b, _)| a != b), "duplicate {a}");
    }
}
