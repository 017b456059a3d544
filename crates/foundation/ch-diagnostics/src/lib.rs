//! Compiler diagnostics
//!
//! Lowering never aborts on a user error. Each problem becomes a
//! [`CompilerError`] appended to a [`Diagnostics`] sink, and the offending
//! construct lowers to an empty or best-effort result.

mod error;
mod sink;
mod suggest;

pub use error::{CompilerError, ErrorKind};
pub use sink::{Diagnostics, simple_files};
pub use suggest::{levenshtein_distance, suggest};
