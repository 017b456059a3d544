//! Block opcodes

use std::fmt;

/// The instruction a [`Block`](crate::Block) performs
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Opcode {
    /// Set a named variable: `(name, value)`
    SetVariable,
    /// Change a named variable by an amount: `(name, delta)`
    ChangeVariable,
    /// Read a named variable: `(name)`
    ReadVariable,
    /// Read a custom block parameter: `(name, kind)`
    GetParam,
    /// Run a body N times: `(count, body)`
    Repeat,
    /// Run a body until a condition holds: `(condition, body)`
    RepeatUntil,
    /// Run a body forever: `(body)`
    Forever,
    /// `(condition, then)`
    IfThen,
    /// `(condition, then, else)`
    IfThenElse,
    /// Stop execution: `(target)`
    Stop,
    /// Item of a list: `(index, list)`
    ItemOfList,
    /// Replace an item of a list: `(index, list, value)`
    ReplaceItemOfList,
    /// Delete an item of a list: `(index, list)`
    DeleteOfList,
    /// Append to a list: `(value, list)`
    AppendToList,
    /// Number of items in a list: `(list)`
    LengthOfList,
    /// A list joined into text: `(list)`
    ContentsOfList,
    /// `(left, right)`
    Add,
    /// `(left, right)`
    Subtract,
    /// `(left, right)`
    Multiply,
    /// `(left, right)`
    Divide,
    /// `(left, right)`
    Modulo,
    /// Join two values as text: `(left, right)`
    Concat,
    /// `(left, right)`
    Equal,
    /// `(left, right)`
    LessThan,
    /// `(left, right)`
    GreaterThan,
    /// `(left, right)`
    And,
    /// `(left, right)`
    Or,
    /// `(operand)`
    Not,
}

impl Opcode {
    /// Selector string in the serialized project format
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::SetVariable => "setVar:to:",
            Self::ChangeVariable => "changeVar:by:",
            Self::ReadVariable => "readVariable",
            Self::GetParam => "getParam",
            Self::Repeat => "doRepeat",
            Self::RepeatUntil => "doUntil",
            Self::Forever => "doForever",
            Self::IfThen => "doIf",
            Self::IfThenElse => "doIfElse",
            Self::Stop => "stopScripts",
            Self::ItemOfList => "getLine:ofList:",
            Self::ReplaceItemOfList => "setLine:ofList:to:",
            Self::DeleteOfList => "deleteLine:ofList:",
            Self::AppendToList => "append:toList:",
            Self::LengthOfList => "lineCountOfList:",
            Self::ContentsOfList => "contentsOfList:",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Concat => "concatenate:with:",
            Self::Equal => "=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::And => "&",
            Self::Or => "|",
            Self::Not => "not",
        }
    }

    /// Number of parameters a well-formed block carries
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::ReadVariable
            | Self::Forever
            | Self::Stop
            | Self::LengthOfList
            | Self::ContentsOfList
            | Self::Not => 1,
            Self::ReplaceItemOfList | Self::IfThenElse => 3,
            Self::SetVariable
            | Self::ChangeVariable
            | Self::GetParam
            | Self::Repeat
            | Self::RepeatUntil
            | Self::IfThen
            | Self::ItemOfList
            | Self::DeleteOfList
            | Self::AppendToList
            | Self::Add
            | Self::Subtract
            | Self::Multiply
            | Self::Divide
            | Self::Modulo
            | Self::Concat
            | Self::Equal
            | Self::LessThan
            | Self::GreaterThan
            | Self::And
            | Self::Or => 2,
        }
    }

    /// Whether the block nests statement bodies
    #[must_use]
    pub const fn is_control(self) -> bool {
        matches!(
            self,
            Self::Repeat | Self::RepeatUntil | Self::Forever | Self::IfThen | Self::IfThenElse
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.selector())
    }
}
