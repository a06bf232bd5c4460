pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod font;
pub(crate) mod pipeline;
pub(crate) mod text;
