use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SceneError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SceneError::timeline("x")
            .to_string()
            .contains("timeline error:")
    );
    assert!(
        SceneError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(SceneError::render("x").to_string().contains("render error:"));
    assert!(SceneError::encode("x").to_string().contains("encode error:"));
    assert!(
        SceneError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SceneError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
