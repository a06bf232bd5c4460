pub(crate) mod fingerprint;
pub(crate) mod geometry;
pub(crate) mod plan;
pub(crate) mod projection;
