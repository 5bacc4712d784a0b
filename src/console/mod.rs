//! Console entry points.
pub mod plugins;
