//! Built-in scenes, addressable by name from the command line.

pub mod dimensional;

use crate::{
    foundation::error::{SceneError, SceneResult},
    scene::mobject::SceneFrame,
    scene::timeline::Timeline,
};

/// Function that records a scene for a given world frame.
pub type SceneFactory = fn(SceneFrame) -> SceneResult<Timeline>;

/// Every registered scene, by name.
pub const SCENES: &[(&str, SceneFactory)] = &[(dimensional::SCENE_NAME, dimensional::build)];

/// Look up a scene factory by exact name.
pub fn scene_by_name(name: &str) -> SceneResult<SceneFactory> {
    SCENES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, f)| *f)
        .ok_or_else(|| {
            let known: Vec<&str> = SCENES.iter().map(|(n, _)| *n).collect();
            SceneError::validation(format!(
                "unknown scene '{name}' (available: {})",
                known.join(", ")
            ))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/registry.rs"]
mod tests;
