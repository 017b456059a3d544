//! Fixtures for lowering tests
//!
//! Builders here stand in for the front-end: they produce the program model
//! directly so tests can state a method body in a few lines and inspect the
//! blocks it lowers to.

use ch_blocks::{Block, ProcedureDefinition};
use ch_diagnostics::{Diagnostics, ErrorKind};
use ch_hir::{
    Assignment, CaseBlock, CompoundOperator, ConstDeclaration, DataType, Expression, ForeverLoop,
    GlobalArrayDeclaration, GlobalDeclaration, GlobalVarDeclaration, IfStmt, Literal,
    MethodDeclaration, ParamDeclaration, ProjectDeclaration, RepeatLoop, ReturnStmt,
    ScopeStmt, ScopedArrayDeclaration, ScopedDeclaration, ScopedVarDeclaration,
    SpriteDeclaration, Statement, SwitchStmt, UnaryOperator, VarAssignStmt, WhileLoop,
};
use ch_lower::{LowerOptions, TranslationContext, lower_method};
use ch_span::{FileId, FileSpan, Span};

/// Name of the sprite every fixture lowers in
pub const SPRITE: &str = "Cat";

/// Name of the method built by [`lower_body`]
pub const METHOD: &str = "test";

/// A zero-width span at the start of file 0
pub fn span() -> FileSpan {
    at(0, 0)
}

/// A span covering `start..end` of file 0
pub fn at(start: u32, end: u32) -> FileSpan {
    FileSpan::new(FileId::new(0), Span::new(start, end))
}

// Expressions

/// Number literal
pub fn num(value: f64) -> Expression {
    Expression::number(value, span())
}

/// String literal
pub fn text(value: &str) -> Expression {
    Expression::text(value, span())
}

/// Boolean literal
pub fn boolean(value: bool) -> Expression {
    Expression::boolean(value, span())
}

/// Name lookup
pub fn var(name: &str) -> Expression {
    Expression::lookup(name, span())
}

/// `name[index]`
pub fn index(name: &str, position: Expression) -> Expression {
    Expression::array_lookup(name, position, span())
}

/// Binary operator
pub fn binary(operator: CompoundOperator, left: Expression, right: Expression) -> Expression {
    Expression::compound(operator, left, right, span())
}

/// Prefix operator
pub fn unary(operator: UnaryOperator, operand: Expression) -> Expression {
    Expression::unary(operator, operand, span())
}

// Statements

/// `var name: ty = value;`
pub fn declare(name: &str, data_type: DataType, value: Option<Expression>) -> Statement {
    Statement::Declare(ScopedDeclaration::Variable(ScopedVarDeclaration::new(
        name,
        data_type,
        value,
        span(),
    )))
}

/// `var name: ty[] = { items };`
pub fn declare_array(name: &str, data_type: DataType, items: Vec<Expression>) -> Statement {
    Statement::Declare(ScopedDeclaration::Array(ScopedArrayDeclaration::new(
        name,
        data_type,
        items,
        span(),
    )))
}

/// `name op value;`
pub fn assign(name: &str, assignment: Assignment) -> Statement {
    Statement::Assign(VarAssignStmt::new(name, assignment, span()))
}

/// `repeat (count) { body }`
pub fn repeat(count: Expression, body: Vec<Statement>) -> Statement {
    Statement::Repeat(RepeatLoop {
        inline: false,
        iterations: count,
        body,
        span: span(),
    })
}

/// `inline repeat (count) { body }`
pub fn inline_repeat(count: Expression, body: Vec<Statement>) -> Statement {
    Statement::Repeat(RepeatLoop {
        inline: true,
        iterations: count,
        body,
        span: span(),
    })
}

/// `while (condition) { body }`
pub fn while_loop(condition: Expression, body: Vec<Statement>) -> Statement {
    Statement::While(WhileLoop {
        condition,
        body,
        span: span(),
    })
}

/// `forever { body }`
pub fn forever(body: Vec<Statement>) -> Statement {
    Statement::Forever(ForeverLoop { body, span: span() })
}

/// `if (condition) { then_body } else { else_body }`
pub fn if_else(
    condition: Expression,
    then_body: Vec<Statement>,
    else_body: Vec<Statement>,
) -> Statement {
    Statement::If(IfStmt {
        condition,
        then_body,
        else_body,
        span: span(),
    })
}

/// `{ body }`
pub fn scope(body: Vec<Statement>) -> Statement {
    Statement::Scope(ScopeStmt { body, span: span() })
}

/// `switch (subject) { blocks }`
pub fn switch(subject: Expression, blocks: Vec<CaseBlock>) -> Statement {
    Statement::Switch(SwitchStmt {
        subject,
        blocks,
        span: span(),
    })
}

/// `case conditions: body`
pub fn case(conditions: Vec<Expression>, body: Vec<Statement>) -> CaseBlock {
    CaseBlock {
        conditions,
        body,
        is_default: false,
        span: span(),
    }
}

/// `default: body`
pub fn default_case(body: Vec<Statement>) -> CaseBlock {
    CaseBlock {
        conditions: Vec::new(),
        body,
        is_default: true,
        span: span(),
    }
}

/// `return;` or `return value;`
pub fn ret(value: Option<Expression>) -> Statement {
    Statement::Return(ReturnStmt {
        value,
        span: span(),
    })
}

// Declarations

/// Method parameter
pub fn param(name: &str, data_type: DataType) -> ParamDeclaration {
    ParamDeclaration {
        name: name.to_string(),
        data_type,
        span: span(),
    }
}

/// Method without a return value
pub fn method(name: &str, params: Vec<ParamDeclaration>, body: Vec<Statement>) -> MethodDeclaration {
    MethodDeclaration::new(name, params, body, span())
}

/// Method returning `return_type`
pub fn returning(
    name: &str,
    return_type: DataType,
    params: Vec<ParamDeclaration>,
    body: Vec<Statement>,
) -> MethodDeclaration {
    let mut decl = method(name, params, body);
    decl.return_type = Some(return_type);
    decl
}

/// `const name: ty = value;`
pub fn constant(name: &str, data_type: DataType, value: Literal) -> GlobalDeclaration {
    GlobalDeclaration::Constant(ConstDeclaration {
        name: name.to_string(),
        data_type,
        value,
        span: span(),
    })
}

/// Global variable
pub fn global(name: &str, data_type: DataType, value: Option<Literal>) -> GlobalDeclaration {
    GlobalDeclaration::Variable(GlobalVarDeclaration {
        name: name.to_string(),
        data_type,
        value,
        span: span(),
    })
}

/// Global list
pub fn global_array(name: &str, data_type: DataType, items: Vec<Literal>) -> GlobalDeclaration {
    GlobalDeclaration::Array(GlobalArrayDeclaration {
        name: name.to_string(),
        data_type,
        items,
        span: span(),
    })
}

/// A project named `Game` with a single sprite named [`SPRITE`]
#[derive(Debug, Clone)]
pub struct Fixture {
    project: ProjectDeclaration,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Creates the empty project
    pub fn new() -> Self {
        let mut project = ProjectDeclaration::new("Game");
        project.sprites.push(SpriteDeclaration::new(SPRITE, span()));
        Self { project }
    }

    /// Adds a project-level declaration
    #[must_use]
    pub fn project_decl(mut self, decl: GlobalDeclaration) -> Self {
        self.project.declarations.push(decl);
        self
    }

    /// Adds a sprite-level declaration
    #[must_use]
    pub fn sprite_decl(mut self, decl: GlobalDeclaration) -> Self {
        self.sprite_mut().declarations.push(decl);
        self
    }

    /// Adds a method to the sprite
    #[must_use]
    pub fn method(mut self, method: MethodDeclaration) -> Self {
        self.sprite_mut().methods.push(method);
        self
    }

    /// The project built so far
    pub const fn project(&self) -> &ProjectDeclaration {
        &self.project
    }

    /// Lowers the sprite method `name` with default options
    pub fn lower(&self, name: &str) -> Lowered {
        self.lower_with(name, &LowerOptions::default())
    }

    /// Lowers the sprite method `name`
    #[allow(clippy::panic, reason = "a missing method is a mistake in the test itself")]
    pub fn lower_with(&self, name: &str, options: &LowerOptions) -> Lowered {
        let sprite = self.sprite();
        let Some(method) = sprite.methods.iter().find(|method| method.name == name) else {
            panic!("fixture has no method `{name}`");
        };

        let ctx = TranslationContext::new(&self.project).with_sprite(sprite);
        let mut diagnostics = Diagnostics::new();
        let procedure = lower_method(ctx, method, options, &mut diagnostics);
        Lowered {
            procedure,
            diagnostics,
        }
    }

    fn sprite(&self) -> &SpriteDeclaration {
        &self.project.sprites[0]
    }

    fn sprite_mut(&mut self) -> &mut SpriteDeclaration {
        &mut self.project.sprites[0]
    }
}

/// Lowers `body` as the body of a parameterless method
pub fn lower_body(body: Vec<Statement>) -> Lowered {
    Fixture::new().method(method(METHOD, Vec::new(), body)).lower(METHOD)
}

/// A lowered method and everything it reported
#[derive(Debug, Clone)]
pub struct Lowered {
    /// The custom block definition
    pub procedure: ProcedureDefinition,
    /// Errors reported while lowering
    pub diagnostics: Diagnostics,
}

impl Lowered {
    /// The lowered body
    pub fn blocks(&self) -> &[Block] {
        &self.procedure.body
    }

    /// One top-level block per line
    pub fn render(&self) -> String {
        render(self.blocks())
    }

    /// Messages of every reported error, in order
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .map(|error| error.message.as_str())
            .collect()
    }

    /// Kinds of every reported error, in order
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.diagnostics.kinds()
    }
}

/// Renders blocks one per line, each line newline-terminated
pub fn render(blocks: &[Block]) -> String {
    blocks.iter().map(|block| format!("{block}\n")).collect()
}
