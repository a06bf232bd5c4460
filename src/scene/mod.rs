pub(crate) mod animation;
pub(crate) mod color;
pub(crate) mod mobject;
pub(crate) mod timeline;
