use std::hash::Hasher;

use crate::{
    eval::evaluator::EvaluatedFrame, foundation::math::Fnv1a64, scene::animation::AnimationKind,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// 128-bit identity of an evaluated frame.
///
/// Two frames with equal fingerprints compile to the same plan and render to the same
/// pixels; the pipeline uses this to skip re-rendering held frames.
pub struct FrameFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Two independently seeded FNV streams fed the same bytes.
struct Wide(Fnv1a64, Fnv1a64);

impl Wide {
    fn new() -> Self {
        Self(Fnv1a64::default(), Fnv1a64::with_seed(0x9ae1_6a3b_2f90_404f))
    }

    fn write_f64(&mut self, v: f64) {
        self.0.write_f64(v);
        self.1.write_f64(v);
    }

    fn fingerprint(&self) -> FrameFingerprint {
        FrameFingerprint {
            hi: self.0.finish(),
            lo: self.1.finish(),
        }
    }
}

impl Hasher for Wide {
    fn write(&mut self, bytes: &[u8]) {
        self.0.write(bytes);
        self.1.write(bytes);
    }

    fn finish(&self) -> u64 {
        self.0.finish() ^ self.1.finish()
    }
}

/// Fingerprint the visible state of `eval`, ignoring its frame index and time.
pub fn fingerprint_eval(eval: &EvaluatedFrame) -> FrameFingerprint {
    let mut h = Wide::new();
    h.write_u64(eval.nodes.len() as u64);
    for node in &eval.nodes {
        h.write_u32(node.id.0);
        for c in [node.center.x, node.center.y, node.center.z] {
            h.write_f64(c);
        }
        h.write_u8(match node.introduced_by {
            AnimationKind::Create => 0,
            AnimationKind::Write => 1,
            AnimationKind::ToEdge { .. } => 2,
        });
        h.write_f64(node.reveal.alpha);
        h.write_f64(node.reveal.lag_ratio);
        h.write_u8(node.reveal.ease as u8);
    }
    h.fingerprint()
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
