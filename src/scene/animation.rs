use crate::{
    animation::ease::Ease,
    foundation::core::Vec3,
    scene::mobject::{DEFAULT_MOBJECT_TO_EDGE_BUFFER, Mobject, MobjectId},
};

/// Run time of an animation when none is given.
pub const DEFAULT_RUN_TIME: f64 = 1.0;
/// Parts at or above this count make a `Write` run for [`LONG_WRITE_RUN_TIME`].
const LONG_WRITE_PARTS: usize = 15;
const LONG_WRITE_RUN_TIME: f64 = 2.0;

/// What an animation does to its target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AnimationKind {
    /// Draw the target in along its outline.
    Create,
    /// Reveal the target part by part, as if written.
    Write,
    /// Slide the target against a frame edge.
    ToEdge {
        /// Edge direction (for example [`WorldDirections::UP`](crate::WorldDirections::UP)).
        edge: Vec3,
        /// Gap to leave between the target and the edge.
        buff: f64,
    },
}

/// An animation request passed to [`Scene::play`](crate::Scene::play).
///
/// Unset run time, rate function and lag ratio resolve to per-kind defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    /// Target mobject.
    pub target: MobjectId,
    /// Animation kind.
    pub kind: AnimationKind,
    run_time: Option<f64>,
    ease: Option<Ease>,
    lag_ratio: Option<f64>,
}

impl Animation {
    fn new(target: MobjectId, kind: AnimationKind) -> Self {
        Self {
            target,
            kind,
            run_time: None,
            ease: None,
            lag_ratio: None,
        }
    }

    /// Draw `target` in.
    pub fn create(target: MobjectId) -> Self {
        Self::new(target, AnimationKind::Create)
    }

    /// Write `target` in.
    pub fn write(target: MobjectId) -> Self {
        Self::new(target, AnimationKind::Write)
    }

    /// Move `target` against the frame edge in direction `edge`.
    pub fn to_edge(target: MobjectId, edge: Vec3) -> Self {
        Self::new(
            target,
            AnimationKind::ToEdge {
                edge,
                buff: DEFAULT_MOBJECT_TO_EDGE_BUFFER,
            },
        )
    }

    /// Override the run time in seconds.
    pub fn run_time(mut self, secs: f64) -> Self {
        self.run_time = Some(secs);
        self
    }

    /// Override the rate function.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Override the lag ratio between parts.
    pub fn lag_ratio(mut self, lag_ratio: f64) -> Self {
        self.lag_ratio = Some(lag_ratio);
        self
    }

    pub(crate) fn resolved_run_time(&self, target: &Mobject) -> f64 {
        self.run_time.unwrap_or(match self.kind {
            AnimationKind::Write if target.part_count() >= LONG_WRITE_PARTS => LONG_WRITE_RUN_TIME,
            _ => DEFAULT_RUN_TIME,
        })
    }

    pub(crate) fn resolved_ease(&self) -> Ease {
        self.ease.unwrap_or(match self.kind {
            AnimationKind::Write => Ease::Linear,
            _ => Ease::Smooth,
        })
    }

    pub(crate) fn resolved_lag_ratio(&self, target: &Mobject) -> f64 {
        self.lag_ratio.unwrap_or(match self.kind {
            AnimationKind::Create => 1.0,
            AnimationKind::Write => (4.0 / target.part_count().max(1) as f64).min(0.2),
            AnimationKind::ToEdge { .. } => 0.0,
        })
    }
}

/// What a scheduled animation does, with positions already resolved.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum ScheduledAction {
    /// The target appears through `kind` (`Create` or `Write`).
    Introduce {
        /// The introducing animation kind.
        kind: AnimationKind,
    },
    /// The target's center travels from `from` to `to`.
    Move {
        /// Center at the start of the animation.
        from: Vec3,
        /// Center at the end of the animation.
        to: Vec3,
    },
}

/// An animation placed on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduledAnimation {
    /// Target mobject.
    pub target: MobjectId,
    /// The animation as requested.
    pub kind: AnimationKind,
    /// Resolved effect.
    pub action: ScheduledAction,
    /// Timeline start in seconds.
    pub start_secs: f64,
    /// Run time in seconds.
    pub run_time: f64,
    /// Rate function.
    pub ease: Ease,
    /// Lag ratio between parts.
    pub lag_ratio: f64,
}

impl ScheduledAnimation {
    /// Timeline end in seconds.
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.run_time
    }

    /// Linear progress at timeline time `t`, clamped to `[0, 1]`.
    pub fn alpha_at(&self, t: f64) -> f64 {
        if t >= self.end_secs() {
            return 1.0;
        }
        ((t - self.start_secs) / self.run_time).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/animation.rs"]
mod tests;
