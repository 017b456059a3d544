//! Scope tree for one method's stack-allocated locals
//!
//! Scopes live in an arena and point at their parent, so lookup walks
//! outward in O(depth) without shared ownership. A scope records its
//! declarations in order; that order fixes where each local sits on the
//! stack list and the order cleanup releases them in.

use ch_blocks::{Block, BlockBuilder, Opcode};
use ch_hir::{MethodDeclaration, ScopedDeclaration};
use ch_span::FileSpan;
use la_arena::{Arena, Idx};
use rustc_hash::FxHashMap;
use std::iter;

/// Handle to a scope in a [`ScopeTree`]
pub type ScopeId<'decl> = Idx<ScopeData<'decl>>;

/// Errors raised while registering declarations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// Name is already declared in the same scope
    #[error("`{name}` declared at {second:?} is already declared at {first:?}")]
    DuplicateDeclaration {
        /// The redeclared name
        name: String,
        /// First declaration
        first: FileSpan,
        /// Rejected declaration
        second: FileSpan,
    },
}

/// One lexical scope
#[derive(Debug, Default)]
pub struct ScopeData<'decl> {
    parent: Option<ScopeId<'decl>>,
    declarations: Vec<&'decl ScopedDeclaration>,
    names: FxHashMap<&'decl str, usize>,
}

impl<'decl> ScopeData<'decl> {
    /// Enclosing scope, `None` for the method's root scope
    #[must_use]
    pub const fn parent(&self) -> Option<ScopeId<'decl>> {
        self.parent
    }

    /// Declarations in the order they were registered
    #[must_use]
    pub fn declarations(&self) -> &[&'decl ScopedDeclaration] {
        &self.declarations
    }

    /// Stack slots owned by this scope
    #[must_use]
    pub fn slot_count(&self) -> u32 {
        self.declarations.iter().map(|decl| decl.slots()).sum()
    }
}

/// All scopes created while lowering one method
#[derive(Debug, Default)]
pub struct ScopeTree<'decl> {
    scopes: Arena<ScopeData<'decl>>,
    method: Option<&'decl MethodDeclaration>,
}

impl<'decl> ScopeTree<'decl> {
    /// Creates a tree that is not tied to a method
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree for lowering `method`'s body
    #[must_use]
    pub fn for_method(method: &'decl MethodDeclaration) -> Self {
        Self {
            scopes: Arena::new(),
            method: Some(method),
        }
    }

    /// The method being lowered
    #[must_use]
    pub const fn method(&self) -> Option<&'decl MethodDeclaration> {
        self.method
    }

    /// Creates a scope with no parent
    pub fn create_root(&mut self) -> ScopeId<'decl> {
        self.scopes.alloc(ScopeData::default())
    }

    /// Creates a scope nested in `parent`
    pub fn create_child(&mut self, parent: ScopeId<'decl>) -> ScopeId<'decl> {
        self.scopes.alloc(ScopeData {
            parent: Some(parent),
            ..ScopeData::default()
        })
    }

    /// Data of one scope
    #[must_use]
    pub fn get(&self, scope: ScopeId<'decl>) -> &ScopeData<'decl> {
        &self.scopes[scope]
    }

    /// `scope` followed by each of its ancestors
    pub fn chain(&self, scope: ScopeId<'decl>) -> impl Iterator<Item = ScopeId<'decl>> + '_ {
        iter::successors(Some(scope), |id| self.scopes[*id].parent)
    }

    /// Registers a declaration at the top of `scope`
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::DuplicateDeclaration` if `scope` itself already
    /// declares the name. Shadowing a name of an enclosing scope is allowed.
    pub fn declare(
        &mut self,
        scope: ScopeId<'decl>,
        decl: &'decl ScopedDeclaration,
    ) -> Result<(), ScopeError> {
        let data = &mut self.scopes[scope];
        if let Some(&existing) = data.names.get(decl.name()) {
            return Err(ScopeError::DuplicateDeclaration {
                name: decl.name().to_string(),
                first: data.declarations[existing].span(),
                second: decl.span(),
            });
        }
        data.names.insert(decl.name(), data.declarations.len());
        data.declarations.push(decl);
        Ok(())
    }

    /// Finds the innermost declaration of `name` visible from `scope`
    #[must_use]
    pub fn search(&self, scope: ScopeId<'decl>, name: &str) -> Option<&'decl ScopedDeclaration> {
        self.chain(scope).find_map(|id| {
            let data = &self.scopes[id];
            data.names.get(name).map(|&idx| data.declarations[idx])
        })
    }

    /// Number of stack slots allocated after the last slot of `name`
    ///
    /// Zero means the binding sits at the end of the stack list. Only
    /// declarations on the chain from `scope` outward count, since sibling
    /// scopes have already released their slots.
    #[must_use]
    pub fn stack_depth(&self, scope: ScopeId<'decl>, name: &str) -> Option<u32> {
        let mut above = 0;
        for id in self.chain(scope) {
            let data = &self.scopes[id];
            if let Some(&idx) = data.names.get(name) {
                let later: u32 = data.declarations[idx + 1..]
                    .iter()
                    .map(|decl| decl.slots())
                    .sum();
                return Some(above + later);
            }
            above += data.slot_count();
        }
        None
    }

    /// Every name visible from `scope`, innermost first
    #[must_use]
    pub fn visible_names(&self, scope: ScopeId<'decl>) -> Vec<&'decl str> {
        self.chain(scope)
            .flat_map(|id| self.scopes[id].declarations.iter().rev())
            .copied()
            .map(ScopedDeclaration::name)
            .collect()
    }

    /// Blocks that release the stack slots owned by `scope`
    ///
    /// Declarations are released latest first. A multi-slot declaration is
    /// released with a repeat around a single delete.
    #[must_use]
    pub fn cleanup(&self, scope: ScopeId<'decl>, stack_list: &str) -> Vec<Block> {
        let data = &self.scopes[scope];
        let blocks: Vec<Block> = data
            .declarations
            .iter()
            .rev()
            .filter(|decl| decl.slots() > 0)
            .map(|decl| release(decl.slots(), stack_list))
            .collect();
        if !blocks.is_empty() {
            log::trace!("releasing {} stack slots", data.slot_count());
        }
        blocks
    }

    /// Cleanup for `scope` and every enclosing scope, innermost first
    ///
    /// Used before a transfer of control that leaves the whole method.
    #[must_use]
    pub fn unwind(&self, scope: ScopeId<'decl>, stack_list: &str) -> Vec<Block> {
        self.chain(scope)
            .flat_map(|id| self.cleanup(id, stack_list))
            .collect()
    }
}

fn release(slots: u32, stack_list: &str) -> Block {
    let delete = BlockBuilder::new(Opcode::DeleteOfList)
        .text("last")
        .text(stack_list)
        .build();
    if slots == 1 {
        delete
    } else {
        BlockBuilder::new(Opcode::Repeat)
            .number(f64::from(slots))
            .body(vec![delete])
            .build()
    }
}
