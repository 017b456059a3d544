//! Methods, sprites and the project

use crate::{DataType, Declaration, GlobalDeclaration, ParamDeclaration, Statement};
use ch_span::FileSpan;
use serde::{Deserialize, Serialize};

/// A method (custom block) of a sprite
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    /// Method name
    pub name: String,
    /// Return type, if the method returns a value
    pub return_type: Option<DataType>,
    /// Parameters in order
    pub params: Vec<ParamDeclaration>,
    /// Method body
    pub body: Vec<Statement>,
    /// Requested inlining at call sites
    pub inline: bool,
    /// Run without screen refresh
    pub atomic: bool,
    /// Skip generated safety checks
    pub is_unsafe: bool,
    /// Source location
    pub span: FileSpan,
}

impl MethodDeclaration {
    /// Creates a plain method with no flags set
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        params: Vec<ParamDeclaration>,
        body: Vec<Statement>,
        span: FileSpan,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            params,
            body,
            inline: false,
            atomic: false,
            is_unsafe: false,
            span,
        }
    }

    /// Whether the method returns a value
    #[must_use]
    pub const fn has_return(&self) -> bool {
        self.return_type.is_some()
    }

    /// Looks up a parameter by name
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamDeclaration> {
        self.params.iter().find(|param| param.name == name)
    }
}

/// A sprite: the containing unit of methods and sprite-level globals
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteDeclaration {
    /// Sprite name
    pub name: String,
    /// Sprite-level constants, variables and lists
    pub declarations: Vec<GlobalDeclaration>,
    /// Methods in source order
    pub methods: Vec<MethodDeclaration>,
    /// Source location
    pub span: FileSpan,
}

impl SpriteDeclaration {
    /// Creates an empty sprite
    #[must_use]
    pub fn new(name: impl Into<String>, span: FileSpan) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            methods: Vec::new(),
            span,
        }
    }

    /// Finds a sprite-level declaration, then a method, by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Declaration<'_>> {
        self.declarations
            .iter()
            .find(|decl| decl.name() == name)
            .map(GlobalDeclaration::as_declaration)
            .or_else(|| {
                self.methods
                    .iter()
                    .find(|method| method.name == name)
                    .map(Declaration::Method)
            })
    }

    /// Every name declared at sprite level
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations
            .iter()
            .map(GlobalDeclaration::name)
            .chain(self.methods.iter().map(|method| method.name.as_str()))
    }
}

/// A whole program: project-level globals plus its sprites
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDeclaration {
    /// Project name
    pub name: String,
    /// Globals visible from every sprite
    pub declarations: Vec<GlobalDeclaration>,
    /// Sprites in source order
    pub sprites: Vec<SpriteDeclaration>,
}

impl ProjectDeclaration {
    /// Creates an empty project
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            sprites: Vec::new(),
        }
    }

    /// Finds a project-level declaration by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Declaration<'_>> {
        self.declarations
            .iter()
            .find(|decl| decl.name() == name)
            .map(GlobalDeclaration::as_declaration)
    }

    /// Every name declared at project level
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(GlobalDeclaration::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GlobalVarDeclaration;
    use ch_span::{FileId, Span};

    fn span() -> FileSpan {
        FileSpan::new(FileId::new(0), Span::new(0, 1))
    }

    #[test]
    fn test_sprite_prefers_variables_over_methods() {
        let mut sprite = SpriteDeclaration::new("Cat", span());
        sprite.methods.push(MethodDeclaration::new("jump", Vec::new(), Vec::new(), span()));
        sprite
            .declarations
            .push(GlobalDeclaration::Variable(GlobalVarDeclaration {
                name: "jump".to_string(),
                data_type: DataType::Number,
                value: None,
                span: span(),
            }));

        assert!(matches!(
            sprite.find("jump"),
            Some(Declaration::GlobalVariable(_))
        ));
        assert_eq!(sprite.names().count(), 2);
    }

    #[test]
    fn test_project_round_trips_through_json() {
        let mut project = ProjectDeclaration::new("Game");
        project.sprites.push(SpriteDeclaration::new("Cat", span()));

        let json = serde_json::to_string(&project).ok();
        let back: Option<ProjectDeclaration> =
            json.and_then(|text| serde_json::from_str(&text).ok());
        assert_eq!(back, Some(project));
    }
}
