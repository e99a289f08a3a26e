//! CLI library components for Pipeline Desk.

pub mod logging;
pub mod render;
pub mod replay;
