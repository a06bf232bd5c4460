//! "Understanding Dimensions": a point, a line, a square and a cube appear one after another,
//! each labeled with its dimension.

use crate::{
    foundation::core::{Vec3, WorldDirections},
    foundation::error::SceneResult,
    scene::animation::Animation,
    scene::color::Color,
    scene::mobject::{DEFAULT_MOBJECT_TO_MOBJECT_BUFFER, Mobject, SceneFrame},
    scene::timeline::{Scene, Timeline},
};

/// Registry name of this scene.
pub const SCENE_NAME: &str = "DimensionalProgression";
/// Title shown before the progression.
pub const TITLE: &str = "Understanding Dimensions";
/// Title font size.
pub const TITLE_FONT_SIZE: f64 = 40.0;
/// Label font size.
pub const LABEL_FONT_SIZE: f64 = 24.0;
/// Pause after the title and after each step.
pub const STEP_WAIT_SECS: f64 = 1.0;
/// Pause before the scene ends.
pub const FINAL_WAIT_SECS: f64 = 2.0;
/// Fill opacity of the cube.
pub const CUBE_FILL_OPACITY: f64 = 0.1;

/// One stage of the progression: a shape and the label placed below it.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressionStep {
    /// Dimension shown by this step (0 to 3).
    pub dimension: u8,
    /// The shape.
    pub shape: Mobject,
    /// The label, placed just below the shape.
    pub label: Mobject,
}

struct StepDef {
    dimension: u8,
    label: &'static str,
    build: fn() -> Mobject,
}

fn point() -> Mobject {
    Mobject::dot().shift(Vec3::LEFT * 4.0).named("point")
}

fn line() -> Mobject {
    Mobject::line(Vec3::LEFT * 3.0, Vec3::LEFT * 2.0).named("line")
}

fn square() -> Mobject {
    Mobject::square(1.0).named("square")
}

fn cube() -> Mobject {
    Mobject::cube(1.0)
        .shift(Vec3::RIGHT * 3.0)
        .set_fill(Color::BLUE, CUBE_FILL_OPACITY)
        .named("cube")
}

const STEPS: [StepDef; 4] = [
    StepDef {
        dimension: 0,
        label: "0D: Point",
        build: point,
    },
    StepDef {
        dimension: 1,
        label: "1D: Line",
        build: line,
    },
    StepDef {
        dimension: 2,
        label: "2D: Square",
        build: square,
    },
    StepDef {
        dimension: 3,
        label: "3D: Cube",
        build: cube,
    },
];

/// The four steps in display order.
pub fn progression_steps() -> Vec<ProgressionStep> {
    STEPS
        .iter()
        .map(|def| {
            let shape = (def.build)();
            let label = Mobject::text(def.label, LABEL_FONT_SIZE)
                .named(format!("label_{}d", def.dimension))
                .next_to(&shape, Vec3::DOWN, DEFAULT_MOBJECT_TO_MOBJECT_BUFFER);
            ProgressionStep {
                dimension: def.dimension,
                shape,
                label,
            }
        })
        .collect()
}

/// Record the scene into a timeline.
#[tracing::instrument]
pub fn build(frame: SceneFrame) -> SceneResult<Timeline> {
    let mut scene = Scene::with_frame(SCENE_NAME, frame);

    let title = scene.add(Mobject::text(TITLE, TITLE_FONT_SIZE).named("title"))?;
    scene.play([Animation::write(title)])?;
    scene.wait(STEP_WAIT_SECS)?;
    scene.play([Animation::to_edge(title, Vec3::UP)])?;

    for step in progression_steps() {
        let shape = scene.add(step.shape)?;
        let label = scene.add(step.label)?;
        scene.play([Animation::create(shape), Animation::write(label)])?;
        scene.wait(STEP_WAIT_SECS)?;
    }

    scene.wait(FINAL_WAIT_SECS)?;
    scene.finish()
}

/// Coarse position of the scene along its linear script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ProgressionPhase {
    /// The title is being written, or the pause after it.
    TitleIn,
    /// The title is moving to the top edge.
    TitleMoved,
    /// Step `n` (0 to 3) is being shown, or the pause after it.
    Step(u8),
    /// The scene has ended.
    Done,
}

impl ProgressionPhase {
    /// The phase that follows `self`; `Done` is terminal.
    pub fn next(self) -> Self {
        match self {
            Self::TitleIn => Self::TitleMoved,
            Self::TitleMoved => Self::Step(0),
            Self::Step(n) if n < 3 => Self::Step(n + 1),
            Self::Step(_) | Self::Done => Self::Done,
        }
    }
}

/// Phase of a timeline built by [`build`] at timeline time `t`.
pub fn phase_at(timeline: &Timeline, t: f64) -> ProgressionPhase {
    if t >= timeline.duration_secs {
        return ProgressionPhase::Done;
    }
    let started = timeline.plays().filter(|p| p.start_secs <= t).count();
    match started {
        0 | 1 => ProgressionPhase::TitleIn,
        2 => ProgressionPhase::TitleMoved,
        n => ProgressionPhase::Step(u8::try_from(n - 3).unwrap_or(u8::MAX).min(3)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/dimensional.rs"]
mod tests;
