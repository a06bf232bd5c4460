/// Rate functions mapping linear animation progress to eased progress.
///
/// All variants clamp their input to `[0, 1]` and satisfy `f(0) = 0`, `f(1) = 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity.
    Linear,
    /// Normalized logistic curve (slow start, slow end).
    #[default]
    Smooth,
}

const SMOOTH_INFLECTION: f64 = 10.0;

impl Ease {
    /// Apply the rate function to `t`.
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Smooth => smooth(t, SMOOTH_INFLECTION),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn smooth(t: f64, inflection: f64) -> f64 {
    let error = sigmoid(-inflection / 2.0);
    ((sigmoid(inflection * (t - 0.5)) - error) / (1.0 - 2.0 * error)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
