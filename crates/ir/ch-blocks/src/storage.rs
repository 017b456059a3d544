//! Named variables and lists owned by a sprite or the stage

use crate::block::serialize_literal;
use ch_hir::Literal;
use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

/// A named variable with its initial value
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Variable {
    /// Variable name
    pub name: String,
    /// Initial value
    #[serde(serialize_with = "serialize_literal")]
    pub value: Literal,
    /// Whether the value survives between sessions
    #[serde(rename = "isPersistent")]
    pub is_persistent: bool,
}

impl Variable {
    /// A non-persistent variable
    #[must_use]
    pub fn new(name: impl Into<String>, value: Literal) -> Self {
        Self {
            name: name.into(),
            value,
            is_persistent: false,
        }
    }
}

/// A named list with its initial contents
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct List {
    /// List name
    #[serde(rename = "listName")]
    pub name: String,
    /// Initial items
    #[serde(serialize_with = "serialize_items")]
    pub contents: Vec<Literal>,
    /// Whether the contents survive between sessions
    #[serde(rename = "isPersistent")]
    pub is_persistent: bool,
}

impl List {
    /// A non-persistent list
    #[must_use]
    pub fn new(name: impl Into<String>, contents: Vec<Literal>) -> Self {
        Self {
            name: name.into(),
            contents,
            is_persistent: false,
        }
    }
}

struct Item<'lit>(&'lit Literal);

impl Serialize for Item<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_literal(self.0, serializer)
    }
}

fn serialize_items<S: Serializer>(items: &[Literal], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(items.len()))?;
    for item in items {
        seq.serialize_element(&Item(item))?;
    }
    seq.end()
}
