use crate::{
    foundation::core::Vec3,
    foundation::error::{SceneError, SceneResult},
    scene::animation::{Animation, AnimationKind, ScheduledAction, ScheduledAnimation},
    scene::mobject::{Mobject, MobjectId, SceneFrame, edge_center},
};

/// A group of animations that start together.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayEvent {
    /// Timeline start in seconds.
    pub start_secs: f64,
    /// Longest run time in the group.
    pub duration_secs: f64,
    /// Animations in request order.
    pub animations: Vec<ScheduledAnimation>,
}

/// A pause checkpoint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaitEvent {
    /// Timeline start in seconds.
    pub start_secs: f64,
    /// Pause length in seconds.
    pub duration_secs: f64,
}

/// One entry of a [`Timeline`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum TimelineEvent {
    /// See [`PlayEvent`].
    Play(PlayEvent),
    /// See [`WaitEvent`].
    Wait(WaitEvent),
}

impl TimelineEvent {
    /// Timeline start in seconds.
    pub fn start_secs(&self) -> f64 {
        match self {
            Self::Play(p) => p.start_secs,
            Self::Wait(w) => w.start_secs,
        }
    }

    /// Event length in seconds.
    pub fn duration_secs(&self) -> f64 {
        match self {
            Self::Play(p) => p.duration_secs,
            Self::Wait(w) => w.duration_secs,
        }
    }
}

/// A finished scene: mobjects in their initial state plus the ordered event list.
///
/// Timelines are immutable; every frame of the output video is a pure function of the
/// timeline and a time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Scene name.
    pub name: String,
    /// World-space frame used for edge placement.
    pub frame: SceneFrame,
    /// Registered mobjects, indexed by [`MobjectId`].
    pub mobjects: Vec<Mobject>,
    /// Events in timeline order.
    pub events: Vec<TimelineEvent>,
    /// Total length in seconds.
    pub duration_secs: f64,
}

impl Timeline {
    /// Look up a mobject.
    pub fn mobject(&self, id: MobjectId) -> Option<&Mobject> {
        self.mobjects.get(id.0 as usize)
    }

    /// Iterate play events.
    pub fn plays(&self) -> impl Iterator<Item = &PlayEvent> {
        self.events.iter().filter_map(|e| match e {
            TimelineEvent::Play(p) => Some(p),
            TimelineEvent::Wait(_) => None,
        })
    }

    /// Iterate wait events.
    pub fn waits(&self) -> impl Iterator<Item = &WaitEvent> {
        self.events.iter().filter_map(|e| match e {
            TimelineEvent::Wait(w) => Some(w),
            TimelineEvent::Play(_) => None,
        })
    }

    /// Iterate every scheduled animation in timeline order.
    pub fn animations(&self) -> impl Iterator<Item = &ScheduledAnimation> {
        self.plays().flat_map(|p| p.animations.iter())
    }

    /// The animation that makes `id` appear, if any.
    pub fn introduction_of(&self, id: MobjectId) -> Option<&ScheduledAnimation> {
        self.animations()
            .find(|a| a.target == id && matches!(a.action, ScheduledAction::Introduce { .. }))
    }

}

/// Builder that records `play` and `wait` calls into a [`Timeline`].
///
/// Mobjects are registered with [`Scene::add`] and stay invisible until a `Create` or
/// `Write` animation introduces them. Each mobject is introduced exactly once and then
/// stays on screen until the end.
pub struct Scene {
    name: String,
    frame: SceneFrame,
    mobjects: Vec<Mobject>,
    centers: Vec<Vec3>,
    introduced: Vec<bool>,
    events: Vec<TimelineEvent>,
    cursor_secs: f64,
}

impl Scene {
    /// Start an empty scene with the default frame.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_frame(name, SceneFrame::default())
    }

    /// Start an empty scene with an explicit world frame.
    pub fn with_frame(name: impl Into<String>, frame: SceneFrame) -> Self {
        Self {
            name: name.into(),
            frame,
            mobjects: Vec::new(),
            centers: Vec::new(),
            introduced: Vec::new(),
            events: Vec::new(),
            cursor_secs: 0.0,
        }
    }

    /// World frame used for edge placement.
    pub fn frame(&self) -> SceneFrame {
        self.frame
    }

    /// Current timeline position in seconds.
    pub fn time(&self) -> f64 {
        self.cursor_secs
    }

    /// Register a mobject. It stays invisible until introduced by an animation.
    pub fn add(&mut self, mobject: Mobject) -> SceneResult<MobjectId> {
        mobject.validate()?;
        let id = MobjectId(
            u32::try_from(self.mobjects.len())
                .map_err(|_| SceneError::timeline("too many mobjects"))?,
        );
        self.centers.push(mobject.center);
        self.introduced.push(false);
        self.mobjects.push(mobject);
        Ok(id)
    }

    /// The mobject as registered, with its center at the current timeline position.
    pub fn mobject(&self, id: MobjectId) -> Option<Mobject> {
        let idx = id.0 as usize;
        let mut mob = self.mobjects.get(idx)?.clone();
        mob.center = self.centers[idx];
        Some(mob)
    }

    /// Play `animations` together; the cursor advances by the longest run time.
    pub fn play(&mut self, animations: impl IntoIterator<Item = Animation>) -> SceneResult<()> {
        let animations: Vec<Animation> = animations.into_iter().collect();
        if animations.is_empty() {
            return Err(SceneError::timeline("play requires at least one animation"));
        }

        let start = self.cursor_secs;
        let mut scheduled = Vec::with_capacity(animations.len());
        let mut touched = Vec::with_capacity(animations.len());
        for anim in &animations {
            let idx = anim.target.0 as usize;
            let target = self.mobjects.get(idx).ok_or_else(|| {
                SceneError::timeline(format!("unknown mobject id {}", anim.target.0))
            })?;
            if touched.contains(&anim.target) {
                return Err(SceneError::timeline(format!(
                    "mobject '{}' is animated twice in one play",
                    target.name
                )));
            }
            touched.push(anim.target);

            let run_time = anim.resolved_run_time(target);
            if !(run_time.is_finite() && run_time > 0.0) {
                return Err(SceneError::timeline(format!(
                    "run time for '{}' must be finite and > 0",
                    target.name
                )));
            }
            let lag_ratio = anim.resolved_lag_ratio(target);
            if !(lag_ratio.is_finite() && lag_ratio >= 0.0) {
                return Err(SceneError::timeline("lag ratio must be finite and >= 0"));
            }

            let action = match anim.kind {
                AnimationKind::Create | AnimationKind::Write => {
                    if self.introduced[idx] {
                        return Err(SceneError::timeline(format!(
                            "mobject '{}' is already on screen",
                            target.name
                        )));
                    }
                    ScheduledAction::Introduce { kind: anim.kind }
                }
                AnimationKind::ToEdge { edge, buff } => {
                    self.require_visible(idx)?;
                    let from = self.centers[idx];
                    let to = edge_center(target, from, edge, buff, self.frame);
                    ScheduledAction::Move { from, to }
                }
            };

            scheduled.push(ScheduledAnimation {
                target: anim.target,
                kind: anim.kind,
                action,
                start_secs: start,
                run_time,
                ease: anim.resolved_ease(),
                lag_ratio,
            });
        }

        for s in &scheduled {
            let idx = s.target.0 as usize;
            match s.action {
                ScheduledAction::Introduce { .. } => self.introduced[idx] = true,
                ScheduledAction::Move { to, .. } => self.centers[idx] = to,
            }
        }

        let duration = scheduled
            .iter()
            .map(|s| s.run_time)
            .fold(0.0_f64, f64::max);
        tracing::debug!(
            scene = %self.name,
            start,
            duration,
            count = scheduled.len(),
            "play"
        );
        self.events.push(TimelineEvent::Play(PlayEvent {
            start_secs: start,
            duration_secs: duration,
            animations: scheduled,
        }));
        self.cursor_secs = start + duration;
        Ok(())
    }

    /// Pause for `secs` seconds.
    pub fn wait(&mut self, secs: f64) -> SceneResult<()> {
        if !(secs.is_finite() && secs > 0.0) {
            return Err(SceneError::timeline("wait duration must be finite and > 0"));
        }
        tracing::debug!(scene = %self.name, start = self.cursor_secs, secs, "wait");
        self.events.push(TimelineEvent::Wait(WaitEvent {
            start_secs: self.cursor_secs,
            duration_secs: secs,
        }));
        self.cursor_secs += secs;
        Ok(())
    }

    /// Finish recording.
    pub fn finish(self) -> SceneResult<Timeline> {
        if self.events.is_empty() {
            return Err(SceneError::timeline("scene has no events"));
        }
        Ok(Timeline {
            name: self.name,
            frame: self.frame,
            mobjects: self.mobjects,
            events: self.events,
            duration_secs: self.cursor_secs,
        })
    }

    fn require_visible(&self, idx: usize) -> SceneResult<()> {
        if !self.introduced[idx] {
            return Err(SceneError::timeline(format!(
                "mobject '{}' must be on screen before it can move",
                self.mobjects[idx].name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/timeline.rs"]
mod tests;
