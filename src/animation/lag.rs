use crate::animation::ease::Ease;

/// Progress of a single animation, shared by all sub-parts of its target.
///
/// A target with `n` parts (glyphs of a text, faces of a solid) reveals them in order: part `i`
/// starts once the previous parts have progressed by `lag_ratio` of their own span.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Reveal {
    /// Linear animation progress in `[0, 1]` before easing.
    pub alpha: f64,
    /// Fraction of a part's span after which the next part starts.
    pub lag_ratio: f64,
    /// Rate function applied to each part's local progress.
    pub ease: Ease,
}

impl Reveal {
    /// A finished reveal: every part is fully shown.
    pub fn complete() -> Self {
        Self {
            alpha: 1.0,
            lag_ratio: 0.0,
            ease: Ease::Linear,
        }
    }

    /// Return `true` once every part is fully shown.
    pub fn is_complete(&self) -> bool {
        self.alpha >= 1.0
    }

    /// Eased progress of part `index` out of `count` parts.
    pub fn part_alpha(&self, index: usize, count: usize) -> f64 {
        sub_alpha(self.alpha, index, count, self.lag_ratio, self.ease)
    }
}

/// Eased local progress of part `index` of `count` for a lagged animation at `alpha`.
pub fn sub_alpha(alpha: f64, index: usize, count: usize, lag_ratio: f64, ease: Ease) -> f64 {
    if alpha >= 1.0 {
        return 1.0;
    }
    let alpha = alpha.max(0.0);
    let count = count.max(1);
    let lag_ratio = lag_ratio.max(0.0);
    let full_length = (count - 1) as f64 * lag_ratio + 1.0;
    let value = alpha * full_length;
    let lower = index.min(count - 1) as f64 * lag_ratio;
    ease.apply((value - lower).clamp(0.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lag.rs"]
mod tests;
