//! Blocks and their parameters

use crate::Opcode;
use ch_hir::{Literal, format_number};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// One parameter of a block
#[derive(Clone, Debug, PartialEq)]
pub enum Param {
    /// A literal value
    Literal(Literal),
    /// A nested reporter block
    Block(Box<Block>),
    /// A nested statement body
    Body(Vec<Block>),
    /// Placeholder left where lowering failed
    Empty,
}

impl Param {
    /// A text literal, used for variable and list names
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Literal(Literal::Text(value.into()))
    }

    /// A number literal
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Literal(Literal::Number(value))
    }

    /// The literal, if this parameter is one
    #[must_use]
    pub const fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// The nested block, if this parameter is one
    #[must_use]
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Self::Block(block) => Some(&**block),
            _ => None,
        }
    }

    /// The nested body, if this parameter is one
    #[must_use]
    pub fn as_body(&self) -> Option<&[Block]> {
        match self {
            Self::Body(body) => Some(body.as_slice()),
            _ => None,
        }
    }

    /// Whether this is the failure placeholder
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Block> for Param {
    fn from(block: Block) -> Self {
        Self::Block(Box::new(block))
    }
}

impl From<Literal> for Param {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

/// One IR node: an opcode and its parameters
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    opcode: Opcode,
    params: Vec<Param>,
}

impl Block {
    /// Creates a block without checking arity; see [`BlockBuilder`](crate::BlockBuilder)
    #[must_use]
    pub const fn from_parts(opcode: Opcode, params: Vec<Param>) -> Self {
        Self { opcode, params }
    }

    /// The opcode
    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Parameters in order
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Parameter at `index`
    #[must_use]
    pub fn param(&self, index: usize) -> Option<&Param> {
        self.params.get(index)
    }

    /// Body parameter at `index`, for control blocks
    #[must_use]
    pub fn body(&self, index: usize) -> Option<&[Block]> {
        self.param(index).and_then(Param::as_body)
    }
}

/// Writes a literal the way the project format stores values
///
/// Integral numbers are written without a fractional part.
pub(crate) fn serialize_literal<S: Serializer>(
    literal: &Literal,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match literal {
        Literal::Number(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 => {
            serializer.serialize_i64(*value as i64)
        }
        Literal::Number(value) => serializer.serialize_f64(*value),
        Literal::Text(value) => serializer.serialize_str(value),
        Literal::Boolean(value) => serializer.serialize_bool(*value),
    }
}

impl Serialize for Param {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(literal) => serialize_literal(literal, serializer),
            Self::Block(block) => block.serialize(serializer),
            Self::Body(body) if body.is_empty() => serializer.serialize_none(),
            Self::Body(body) => body.serialize(serializer),
            Self::Empty => serializer.serialize_none(),
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.params.len() + 1))?;
        seq.serialize_element(self.opcode.selector())?;
        for param in &self.params {
            seq.serialize_element(param)?;
        }
        seq.end()
    }
}

impl fmt::Display for Param {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(Literal::Number(value)) => formatter.write_str(&format_number(*value)),
            Self::Literal(Literal::Text(value)) => write!(formatter, "{value:?}"),
            Self::Literal(Literal::Boolean(value)) => write!(formatter, "{value}"),
            Self::Block(block) => write!(formatter, "{block}"),
            Self::Body(body) if body.is_empty() => formatter.write_str("{}"),
            Self::Body(body) => {
                formatter.write_str("{ ")?;
                for (idx, block) in body.iter().enumerate() {
                    if idx > 0 {
                        formatter.write_str("; ")?;
                    }
                    write!(formatter, "{block}")?;
                }
                formatter.write_str(" }")
            }
            Self::Empty => formatter.write_str("_"),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}(", self.opcode.selector())?;
        for (idx, param) in self.params.iter().enumerate() {
            if idx > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{param}")?;
        }
        formatter.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_x(value: f64) -> Block {
        Block::from_parts(
            Opcode::SetVariable,
            vec![Param::text("x"), Param::number(value)],
        )
    }

    #[test]
    fn test_serialize_scratch_array() {
        let json = serde_json::to_string(&set_x(5.0)).ok();
        assert_eq!(json.as_deref(), Some(r#"["setVar:to:","x",5]"#));
    }

    #[test]
    fn test_serialize_nested_body() {
        let repeat = Block::from_parts(
            Opcode::Repeat,
            vec![Param::number(2.0), Param::Body(vec![set_x(0.5)])],
        );
        let json = serde_json::to_string(&repeat).ok();
        assert_eq!(
            json.as_deref(),
            Some(r#"["doRepeat",2,[["setVar:to:","x",0.5]]]"#)
        );
    }

    #[test]
    fn test_empty_body_is_null() {
        let forever = Block::from_parts(Opcode::Forever, vec![Param::Body(Vec::new())]);
        let json = serde_json::to_string(&forever).ok();
        assert_eq!(json.as_deref(), Some(r#"["doForever",null]"#));
    }

    #[test]
    fn test_display() {
        let block = Block::from_parts(
            Opcode::IfThen,
            vec![
                Param::from(Block::from_parts(
                    Opcode::Equal,
                    vec![Param::text("a"), Param::Literal(Literal::Boolean(true))],
                )),
                Param::Body(vec![set_x(1.0), set_x(2.0)]),
            ],
        );
        assert_eq!(
            block.to_string(),
            r#"doIf(=("a", true), { setVar:to:("x", 1); setVar:to:("x", 2) })"#
        );
    }
}
