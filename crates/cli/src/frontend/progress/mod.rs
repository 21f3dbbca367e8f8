//! Per-transfer progress output on standard output.

mod render;

pub(crate) use self::render::{ProgressRenderer, render_plan};
