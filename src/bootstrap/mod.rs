//! Setup shared by the plugin binaries.
pub mod logging;
