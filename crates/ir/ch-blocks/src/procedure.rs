//! Custom block definitions

use crate::{Block, Literal, Param};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A lowered method: a custom block header plus its body
#[derive(Clone, Debug, PartialEq)]
pub struct ProcedureDefinition {
    /// Method name
    pub name: String,
    /// Block spec, e.g. `"move %n %s"`
    pub spec: String,
    /// Parameter names in order
    pub params: Vec<String>,
    /// Default argument per parameter
    pub defaults: Vec<Literal>,
    /// Run without screen refresh
    pub atomic: bool,
    /// Lowered body
    pub body: Vec<Block>,
}

struct Header<'def>(&'def ProcedureDefinition);

impl Serialize for Header<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let definition = self.0;
        let defaults: Vec<Param> = definition
            .defaults
            .iter()
            .cloned()
            .map(Param::Literal)
            .collect();

        let mut seq = serializer.serialize_seq(Some(5))?;
        seq.serialize_element("procDef")?;
        seq.serialize_element(&definition.spec)?;
        seq.serialize_element(&definition.params)?;
        seq.serialize_element(&defaults)?;
        seq.serialize_element(&definition.atomic)?;
        seq.end()
    }
}

/// Serializes as a script: the `procDef` header followed by the body blocks
impl Serialize for ProcedureDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.body.len() + 1))?;
        seq.serialize_element(&Header(self))?;
        for block in &self.body {
            seq.serialize_element(block)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockBuilder, Opcode};
    use expect_test::expect;

    #[test]
    fn test_serialize_script() {
        let definition = ProcedureDefinition {
            name: "reset".to_string(),
            spec: "reset %n".to_string(),
            params: vec!["to".to_string()],
            defaults: vec![Literal::Number(0.0)],
            atomic: true,
            body: BlockBuilder::new(Opcode::SetVariable)
                .text("score")
                .param(BlockBuilder::new(Opcode::GetParam).text("to").text("r"))
                .build_seq(),
        };

        let json = serde_json::to_string(&definition).unwrap_or_default();
        expect![[r#"[["procDef","reset %n",["to"],[0],true],["setVar:to:","score",["getParam","to","r"]]]"#]]
            .assert_eq(&json);
    }
}
