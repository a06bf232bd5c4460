use std::hash::Hasher;

/// 64-bit FNV-1a. Deterministic across runs and platforms, unlike `DefaultHasher`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    pub(crate) fn with_seed(seed: u64) -> Self {
        Self(seed)
    }

    /// Hash `v` by bit pattern, with `-0.0` folded into `0.0`.
    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64(if v == 0.0 { 0 } else { v.to_bits() });
    }
}

impl Default for Fnv1a64 {
    fn default() -> Self {
        Self(Self::OFFSET_BASIS)
    }
}

impl Hasher for Fnv1a64 {
    fn write(&mut self, bytes: &[u8]) {
        self.0 = bytes
            .iter()
            .fold(self.0, |h, &b| (h ^ u64::from(b)).wrapping_mul(Self::PRIME));
    }

    fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
