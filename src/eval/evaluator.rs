use crate::{
    animation::lag::Reveal,
    composition::model::Composition,
    foundation::core::{FrameIndex, Vec3},
    foundation::error::{SceneError, SceneResult},
    scene::animation::{AnimationKind, ScheduledAction},
    scene::mobject::MobjectId,
    scene::timeline::Timeline,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Scene state at a single instant, before compilation.
pub struct EvaluatedFrame {
    /// Evaluated frame index (`0` when evaluated by time).
    pub frame: FrameIndex,
    /// Timeline time in seconds.
    pub time_secs: f64,
    /// Visible mobjects in painter's order (introduction order).
    pub nodes: Vec<EvaluatedNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A visible mobject at the evaluated instant.
pub struct EvaluatedNode {
    /// Mobject identifier in the timeline.
    pub id: MobjectId,
    /// Current center in world units.
    pub center: Vec3,
    /// How the mobject appears (`Create` or `Write`).
    pub introduced_by: AnimationKind,
    /// Reveal progress of the introducing animation.
    pub reveal: Reveal,
}

/// Stateless evaluator from timeline time to visible scene state.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(comp))]
    /// Evaluate one frame of a composition.
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> SceneResult<EvaluatedFrame> {
        if frame.0 >= comp.duration.0 {
            return Err(SceneError::evaluation("frame is out of bounds"));
        }
        let mut out = Self::eval_at(&comp.timeline, comp.frame_time(frame))?;
        out.frame = frame;
        Ok(out)
    }

    /// Evaluate a timeline at `t` seconds.
    ///
    /// Times past the end evaluate to the final state.
    pub fn eval_at(timeline: &Timeline, t: f64) -> SceneResult<EvaluatedFrame> {
        if !t.is_finite() || t < 0.0 {
            return Err(SceneError::evaluation(format!(
                "time must be finite and >= 0, got {t}"
            )));
        }

        let mut intros: Vec<(f64, usize, EvaluatedNode)> = Vec::new();
        for (idx, mob) in timeline.mobjects.iter().enumerate() {
            let id = MobjectId(idx as u32);
            let Some(intro) = timeline.introduction_of(id) else {
                continue;
            };
            let alpha = intro.alpha_at(t);
            if alpha <= 0.0 {
                continue;
            }
            let ScheduledAction::Introduce { kind } = intro.action else {
                continue;
            };
            intros.push((
                intro.start_secs,
                idx,
                EvaluatedNode {
                    id,
                    center: center_at(timeline, id, mob.center, t),
                    introduced_by: kind,
                    reveal: Reveal {
                        alpha,
                        lag_ratio: intro.lag_ratio,
                        ease: intro.ease,
                    },
                },
            ));
        }
        intros.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        Ok(EvaluatedFrame {
            frame: FrameIndex(0),
            time_secs: t,
            nodes: intros.into_iter().map(|(_, _, n)| n).collect(),
        })
    }
}

fn center_at(timeline: &Timeline, id: MobjectId, initial: Vec3, t: f64) -> Vec3 {
    let mut center = initial;
    for anim in timeline.animations().filter(|a| a.target == id) {
        let ScheduledAction::Move { from, to } = anim.action else {
            continue;
        };
        if t < anim.start_secs {
            break;
        }
        let k = anim.ease.apply(anim.alpha_at(t));
        center = if k >= 1.0 { to } else { from.lerp(to, k) };
    }
    center
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
