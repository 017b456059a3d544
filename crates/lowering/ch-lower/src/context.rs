//! The context every lowering call reads names through

use crate::{ScopeId, ScopeTree};
use ch_hir::{Declaration, ProjectDeclaration, ScopedDeclaration, SpriteDeclaration};

/// Where lowering currently is: project, sprite and innermost scope
///
/// Contexts are small `Copy` values. Each `with_*` method returns a new
/// context that differs in exactly one axis, so nesting never mutates the
/// parent's view. The diagnostics sink is not part of the context.
#[derive(Debug, Clone, Copy)]
pub struct TranslationContext<'decl> {
    project: &'decl ProjectDeclaration,
    sprite: Option<&'decl SpriteDeclaration>,
    scope: Option<ScopeId<'decl>>,
}

impl<'decl> TranslationContext<'decl> {
    /// A project-level context, outside any sprite or method
    #[must_use]
    pub const fn new(project: &'decl ProjectDeclaration) -> Self {
        Self {
            project,
            sprite: None,
            scope: None,
        }
    }

    /// Same context with a different project
    #[must_use]
    pub const fn with_project(self, project: &'decl ProjectDeclaration) -> Self {
        Self { project, ..self }
    }

    /// Same context inside `sprite`
    #[must_use]
    pub const fn with_sprite(self, sprite: &'decl SpriteDeclaration) -> Self {
        Self {
            sprite: Some(sprite),
            ..self
        }
    }

    /// Same context with `scope` as the innermost scope
    #[must_use]
    pub const fn with_scope(self, scope: ScopeId<'decl>) -> Self {
        Self {
            scope: Some(scope),
            ..self
        }
    }

    /// The project
    #[must_use]
    pub const fn project(&self) -> &'decl ProjectDeclaration {
        self.project
    }

    /// The containing sprite, if any
    #[must_use]
    pub const fn sprite(&self) -> Option<&'decl SpriteDeclaration> {
        self.sprite
    }

    /// The innermost scope, if lowering is inside a method body
    #[must_use]
    pub const fn scope(&self) -> Option<ScopeId<'decl>> {
        self.scope
    }

    /// Resolves `name`, innermost binding first
    ///
    /// Search order is the scope chain from the innermost scope outward, then
    /// the parameters of the method that owns `scopes`, then sprite-level
    /// declarations and methods, then project-level declarations. The first
    /// match wins, so a local shadows a parameter, which shadows a sprite
    /// global, which shadows a project global.
    #[must_use]
    pub fn resolve(&self, name: &str, scopes: &ScopeTree<'decl>) -> Option<Declaration<'decl>> {
        self.scope
            .and_then(|scope| scopes.search(scope, name))
            .map(ScopedDeclaration::as_declaration)
            .or_else(|| {
                scopes
                    .method()
                    .and_then(|method| method.param(name))
                    .map(Declaration::Parameter)
            })
            .or_else(|| self.sprite.and_then(|sprite| sprite.find(name)))
            .or_else(|| self.project.find(name))
    }

    /// Every name `resolve` could find, in search order
    #[must_use]
    pub fn visible_names(&self, scopes: &ScopeTree<'decl>) -> Vec<&'decl str> {
        let mut names = self
            .scope
            .map(|scope| scopes.visible_names(scope))
            .unwrap_or_default();
        if let Some(method) = scopes.method() {
            names.extend(method.params.iter().map(|param| param.name.as_str()));
        }
        if let Some(sprite) = self.sprite {
            names.extend(sprite.names());
        }
        names.extend(self.project.names());
        names
    }
}
