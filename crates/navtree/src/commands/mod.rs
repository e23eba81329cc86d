//! CLI command implementations.

pub(crate) mod canonical;
pub(crate) mod render;

pub(crate) use canonical::CanonicalArgs;
pub(crate) use render::RenderArgs;
