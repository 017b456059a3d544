//! Block intermediate representation
//!
//! The output of lowering is a tree of [`Block`]s: an [`Opcode`] plus an
//! ordered list of [`Param`]s, where a parameter is a literal, a nested
//! reporter block, or a body of statement blocks. Blocks have no back
//! references, and serialize directly to the array form used by Scratch 2
//! project files.

mod block;
mod builder;
mod opcode;
mod procedure;
mod storage;

pub use block::{Block, Param};
pub use builder::BlockBuilder;
pub use ch_hir::Literal;
pub use opcode::Opcode;
pub use procedure::ProcedureDefinition;
pub use storage::{List, Variable};
