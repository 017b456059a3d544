//! Project-level lowering pipeline

use crate::Config;
use ch_blocks::{List, ProcedureDefinition, Variable};
use ch_diagnostics::{CompilerError, Diagnostics};
use ch_hir::{GlobalDeclaration, ProjectDeclaration, SpriteDeclaration};
use ch_lower::{GlobalStorage, LowerOptions, TranslationContext, lower_global, lower_method};
use ch_span::FileSpan;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Everything lowered for one sprite, or for the stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteOutput {
    /// Sprite name, or the project name for the stage
    #[serde(rename = "objName")]
    pub name: String,
    /// Variables in declaration order
    pub variables: Vec<Variable>,
    /// Lists in declaration order
    pub lists: Vec<List>,
    /// One script per method
    #[serde(rename = "scripts")]
    pub procedures: Vec<ProcedureDefinition>,
}

/// Result of compiling a project
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    /// Project-level storage
    pub stage: SpriteOutput,
    /// Sprites in declaration order
    pub sprites: Vec<SpriteOutput>,
    /// Errors from the stage followed by each sprite's errors
    pub diagnostics: Diagnostics,
}

impl Compilation {
    /// Whether compilation reported no errors
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Finds a lowered sprite by name
    #[must_use]
    pub fn sprite(&self, name: &str) -> Option<&SpriteOutput> {
        self.sprites.iter().find(|sprite| sprite.name == name)
    }
}

/// Lowers every declaration and method of `project`
///
/// Never fails: problems in the program are collected in
/// [`Compilation::diagnostics`] and lowering carries on.
pub fn compile_project(project: &ProjectDeclaration, config: &Config) -> Compilation {
    let options = &config.lowering;
    log::debug!(
        "compiling project `{}` with {} sprites",
        project.name,
        project.sprites.len()
    );

    let mut diagnostics = Diagnostics::new();
    let stage = compile_stage(project, options, &mut diagnostics);

    let ctx = TranslationContext::new(project);
    let sprites = project
        .sprites
        .iter()
        .map(|sprite| {
            let mut sprite_diagnostics = Diagnostics::new();
            let output = compile_sprite(ctx, sprite, options, &mut sprite_diagnostics);
            log::debug!(
                "sprite `{}` lowered with {} errors",
                sprite.name,
                sprite_diagnostics.len()
            );
            diagnostics.extend_from(sprite_diagnostics);
            output
        })
        .collect();

    log::debug!("project `{}` finished with {} errors", project.name, diagnostics.len());
    Compilation {
        stage,
        sprites,
        diagnostics,
    }
}

fn compile_stage(
    project: &ProjectDeclaration,
    options: &LowerOptions,
    diagnostics: &mut Diagnostics,
) -> SpriteOutput {
    let mut storage = Storage::default();
    for decl in &project.declarations {
        storage.declare(decl, diagnostics);
    }

    let has_methods = project.sprites.iter().any(|sprite| !sprite.methods.is_empty());
    if has_methods {
        match project.find(&options.stack_list) {
            Some(taken) => diagnostics.push(CompilerError::duplicate_declaration(
                &options.stack_list,
                taken.span(),
            )),
            None => storage.insert_list(List::new(&options.stack_list, Vec::new())),
        }
    }

    storage.finish(&project.name, Vec::new())
}

fn compile_sprite<'decl>(
    ctx: TranslationContext<'decl>,
    sprite: &'decl SpriteDeclaration,
    options: &LowerOptions,
    diagnostics: &mut Diagnostics,
) -> SpriteOutput {
    log::debug!("lowering sprite `{}`", sprite.name);
    let ctx = ctx.with_sprite(sprite);

    let mut storage = Storage::default();
    for decl in &sprite.declarations {
        storage.declare(decl, diagnostics);
    }
    for method in &sprite.methods {
        if let Some(return_type) = method.return_type {
            let variable = Variable::new(
                options.return_variable(&method.name),
                return_type.default_value(),
            );
            storage.insert_variable(variable, method.span, diagnostics);
        }
    }

    let procedures = sprite
        .methods
        .iter()
        .map(|method| lower_method(ctx, method, options, diagnostics))
        .collect();

    storage.finish(&sprite.name, procedures)
}

/// Variables and lists of one unit, keyed by name
#[derive(Debug, Default)]
struct Storage {
    names: FxHashSet<String>,
    variables: IndexMap<String, Variable>,
    lists: IndexMap<String, List>,
}

impl Storage {
    fn declare(&mut self, decl: &GlobalDeclaration, diagnostics: &mut Diagnostics) {
        let span = decl.as_declaration().span();
        if !self.names.insert(decl.name().to_string()) {
            diagnostics.push(CompilerError::duplicate_declaration(decl.name(), span));
            return;
        }

        match lower_global(decl, diagnostics) {
            Some(GlobalStorage::Variable(variable)) => {
                self.variables.insert(variable.name.clone(), variable);
            }
            Some(GlobalStorage::List(list)) => self.insert_list(list),
            None => {}
        }
    }

    fn insert_variable(&mut self, variable: Variable, span: FileSpan, diagnostics: &mut Diagnostics) {
        if !self.names.insert(variable.name.clone()) {
            diagnostics.push(CompilerError::duplicate_declaration(&variable.name, span));
            return;
        }
        self.variables.insert(variable.name.clone(), variable);
    }

    fn insert_list(&mut self, list: List) {
        self.names.insert(list.name.clone());
        self.lists.insert(list.name.clone(), list);
    }

    fn finish(self, name: &str, procedures: Vec<ProcedureDefinition>) -> SpriteOutput {
        SpriteOutput {
            name: name.to_string(),
            variables: self.variables.into_values().collect(),
            lists: self.lists.into_values().collect(),
            procedures,
        }
    }
}
