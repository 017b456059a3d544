//! Incremental block construction

use crate::{Block, Literal, Opcode, Param};

/// Accumulates parameters for one block
///
/// ```
/// use ch_blocks::{BlockBuilder, Opcode};
///
/// let block = BlockBuilder::new(Opcode::SetVariable)
///     .text("score")
///     .number(0.0)
///     .build();
/// assert_eq!(block.to_string(), r#"setVar:to:("score", 0)"#);
/// ```
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    opcode: Opcode,
    params: Vec<Param>,
}

impl BlockBuilder {
    /// Starts a block with no parameters
    #[must_use]
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            params: Vec::with_capacity(opcode.arity()),
        }
    }

    /// Appends any parameter
    #[must_use]
    pub fn param(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Appends a literal
    #[must_use]
    pub fn literal(self, literal: impl Into<Literal>) -> Self {
        self.param(Param::Literal(literal.into()))
    }

    /// Appends a text literal
    #[must_use]
    pub fn text(self, value: impl Into<String>) -> Self {
        self.param(Param::text(value))
    }

    /// Appends a number literal
    #[must_use]
    pub fn number(self, value: f64) -> Self {
        self.param(Param::number(value))
    }

    /// Appends a nested statement body
    #[must_use]
    pub fn body(self, body: Vec<Block>) -> Self {
        self.param(Param::Body(body))
    }

    /// Finishes the block
    ///
    /// # Panics
    ///
    /// Panics if the parameter count does not match the opcode's arity. That
    /// is a defect in the caller, never a property of the input program.
    #[must_use]
    pub fn build(self) -> Block {
        assert_eq!(
            self.params.len(),
            self.opcode.arity(),
            "malformed `{}` block",
            self.opcode
        );
        Block::from_parts(self.opcode, self.params)
    }

    /// Finishes the block as a one-element sequence
    #[must_use]
    pub fn build_seq(self) -> Vec<Block> {
        vec![self.build()]
    }
}

impl From<BlockBuilder> for Param {
    fn from(builder: BlockBuilder) -> Self {
        Self::from(builder.build())
    }
}
