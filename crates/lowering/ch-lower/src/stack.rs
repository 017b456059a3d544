//! Addressing of stack-allocated locals
//!
//! Locals live at the end of a global list. A binding with `depth` slots
//! allocated after it is at `length - depth`, which is the literal `"last"`
//! when nothing sits above it. List indices are 1-based.

use ch_blocks::{Block, BlockBuilder, Opcode, Param};

/// Index of a single-slot binding
pub(crate) fn slot_index(depth: u32, stack_list: &str) -> Param {
    if depth == 0 {
        return Param::text("last");
    }
    BlockBuilder::new(Opcode::Subtract)
        .param(length(stack_list))
        .number(f64::from(depth))
        .into()
}

/// Index of element `index` of an array of `len` slots
pub(crate) fn element_index(depth: u32, len: u32, index: Param, stack_list: &str) -> Param {
    let base = BlockBuilder::new(Opcode::Subtract)
        .param(length(stack_list))
        .number(f64::from(depth + len));
    BlockBuilder::new(Opcode::Add).param(base).param(index).into()
}

fn length(stack_list: &str) -> Param {
    BlockBuilder::new(Opcode::LengthOfList)
        .text(stack_list)
        .into()
}

/// Reads the slot at `index`
pub(crate) fn read(index: Param, stack_list: &str) -> Param {
    BlockBuilder::new(Opcode::ItemOfList)
        .param(index)
        .text(stack_list)
        .into()
}

/// Overwrites the slot at `index`
pub(crate) fn write(index: Param, value: Param, stack_list: &str) -> Block {
    BlockBuilder::new(Opcode::ReplaceItemOfList)
        .param(index)
        .text(stack_list)
        .param(value)
        .build()
}

/// Allocates one slot holding `value`
pub(crate) fn push(value: Param, stack_list: &str) -> Block {
    BlockBuilder::new(Opcode::AppendToList)
        .param(value)
        .text(stack_list)
        .build()
}
