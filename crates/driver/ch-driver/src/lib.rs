//! Compilation driver
//!
//! Lowers a whole project: the stage first, then every sprite on its own
//! diagnostics sink. Sinks are merged in sprite order so the combined error
//! list does not depend on how units are scheduled.

mod config;
mod pipeline;

pub use config::Config;
pub use pipeline::{Compilation, SpriteOutput, compile_project};
